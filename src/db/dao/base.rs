use std::{future::Future, time::Duration};

use sea_orm::{
    ConnectionTrait, DatabaseBackend, DatabaseConnection, DbErr, ExecResult, QueryResult,
    Statement,
};

use super::error::{DaoLayerError, DaoResult};

/// Shared plumbing for every DAO: one connection handle and one time budget
/// applied to each round trip.
#[async_trait::async_trait]
pub trait DaoBase: Clone + Send + Sync + Sized {
    fn from_parts(db: DatabaseConnection, timeout: Duration) -> Self;

    fn new(db: &DatabaseConnection, timeout: Duration) -> Self {
        Self::from_parts(db.clone(), timeout)
    }

    fn db(&self) -> &DatabaseConnection;

    fn timeout(&self) -> Duration;

    fn backend(&self) -> DatabaseBackend {
        self.db().get_database_backend()
    }

    async fn bounded<T, F>(&self, operation: &str, fut: F) -> DaoResult<T>
    where
        T: Send,
        F: Future<Output = Result<T, DbErr>> + Send,
    {
        match tokio::time::timeout(self.timeout(), fut).await {
            Ok(result) => result.map_err(DaoLayerError::Db),
            Err(_) => {
                tracing::error!(operation, timeout = ?self.timeout(), "store call timed out");
                Err(DaoLayerError::Timeout {
                    operation: operation.to_string(),
                })
            }
        }
    }

    async fn fetch_all(&self, operation: &str, stmt: Statement) -> DaoResult<Vec<QueryResult>> {
        tracing::debug!(operation, sql = %stmt.sql, "query");
        self.bounded(operation, self.db().query_all_raw(stmt)).await
    }

    async fn fetch_one(&self, operation: &str, stmt: Statement) -> DaoResult<Option<QueryResult>> {
        tracing::debug!(operation, sql = %stmt.sql, "query");
        self.bounded(operation, self.db().query_one_raw(stmt)).await
    }

    async fn exec(&self, operation: &str, stmt: Statement) -> DaoResult<ExecResult> {
        tracing::debug!(operation, sql = %stmt.sql, "execute");
        self.bounded(operation, self.db().execute_raw(stmt)).await
    }
}
