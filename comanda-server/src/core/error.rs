use thiserror::Error;

/// Startup / serve errors
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("数据库初始化失败: {0}")]
    Database(String),

    #[error("内部服务器错误")]
    Internal(#[from] anyhow::Error),
}

impl From<std::io::Error> for ServerError {
    fn from(err: std::io::Error) -> Self {
        ServerError::Internal(err.into())
    }
}

pub type Result<T> = std::result::Result<T, ServerError>;
