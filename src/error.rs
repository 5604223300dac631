use sea_orm::DbErr;

use crate::db::dao::DaoLayerError;

/// How the front end should present an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    Unavailable(String),
    Store(String),
    Internal(String),
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::Store(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn message(&self) -> &str {
        match self {
            Self::BadRequest(message)
            | Self::Unauthorized(message)
            | Self::Forbidden(message)
            | Self::Unavailable(message)
            | Self::Store(message)
            | Self::Internal(message) => message.as_str(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "Missing Info",
            Self::Unauthorized(_) => "Login Failed",
            Self::Forbidden(_) => "Access Denied",
            Self::Unavailable(_) => "Connection Error",
            Self::Store(_) => "Database Error",
            Self::Internal(_) => "Error",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Self::BadRequest(_) | Self::Forbidden(_) => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AppError {}

impl From<DaoLayerError> for AppError {
    fn from(err: DaoLayerError) -> Self {
        match err {
            DaoLayerError::Db(DbErr::Conn(_) | DbErr::ConnectionAcquire(_)) => {
                AppError::unavailable(format!("Database connection failed: {err}"))
            }
            DaoLayerError::Db(_) => AppError::store(err.to_string()),
            DaoLayerError::Timeout { .. } => AppError::unavailable(err.to_string()),
            DaoLayerError::Catalog(_) | DaoLayerError::Decode { .. } => {
                AppError::internal(err.to_string())
            }
        }
    }
}
