//! Product Repository (catalog collaborator)

use super::RepoResult;
use shared::models::{Product, ProductCreate};
use sqlx::SqliteExecutor;
use sqlx::types::Json;

const SELECT_PRODUCT: &str = "SELECT id, tenant_key, name, image, description, category, stock, cost, sale_price, extras, created_at FROM product";

/// Tenant-scoped lookup
pub async fn find_by_id<'e, E: SqliteExecutor<'e>>(
    executor: E,
    tenant: &str,
    id: i64,
) -> RepoResult<Option<Product>> {
    let sql = format!("{SELECT_PRODUCT} WHERE tenant_key = ? AND id = ?");
    let row = sqlx::query_as::<_, Product>(&sql)
        .bind(tenant)
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(row)
}

/// Subtract `quantity` from stock. Stock may go negative.
///
/// Returns `false` when no product row matched.
pub async fn decrement_stock<'e, E: SqliteExecutor<'e>>(
    executor: E,
    tenant: &str,
    id: i64,
    quantity: i64,
) -> RepoResult<bool> {
    let result =
        sqlx::query("UPDATE product SET stock = stock - ? WHERE tenant_key = ? AND id = ?")
            .bind(quantity)
            .bind(tenant)
            .bind(id)
            .execute(executor)
            .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn create<'e, E: SqliteExecutor<'e>>(
    executor: E,
    data: ProductCreate,
) -> RepoResult<Product> {
    let product = Product {
        id: shared::util::snowflake_id(),
        tenant_key: data.tenant,
        name: data.name,
        image: data.image,
        description: data.description,
        category: data.category,
        stock: data.stock,
        cost: data.cost,
        sale_price: data.sale_price,
        extras: data.extras,
        created_at: shared::util::now_millis(),
    };
    sqlx::query(
        "INSERT INTO product (id, tenant_key, name, image, description, category, stock, cost, sale_price, extras, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
    )
    .bind(product.id)
    .bind(&product.tenant_key)
    .bind(&product.name)
    .bind(&product.image)
    .bind(&product.description)
    .bind(&product.category)
    .bind(product.stock)
    .bind(product.cost)
    .bind(product.sale_price)
    .bind(Json(&product.extras))
    .bind(product.created_at)
    .execute(executor)
    .await?;
    Ok(product)
}
