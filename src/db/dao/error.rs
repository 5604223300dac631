use sea_orm::DbErr;
use std::fmt;

use crate::db::catalog::CatalogError;

#[derive(Debug)]
pub enum DaoLayerError {
    Db(DbErr),
    Catalog(CatalogError),
    Decode { column: String, source: DbErr },
    Timeout { operation: String },
}

pub type DaoResult<T> = Result<T, DaoLayerError>;

impl fmt::Display for DaoLayerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DaoLayerError::Db(err) => write!(f, "Database error: {err}"),
            DaoLayerError::Catalog(err) => write!(f, "Catalog error: {err}"),
            DaoLayerError::Decode { column, source } => {
                write!(f, "Could not read column '{column}': {source}")
            }
            DaoLayerError::Timeout { operation } => write!(f, "{operation} timed out"),
        }
    }
}

impl std::error::Error for DaoLayerError {}

impl From<CatalogError> for DaoLayerError {
    fn from(err: CatalogError) -> Self {
        DaoLayerError::Catalog(err)
    }
}
