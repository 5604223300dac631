use std::time::Duration;

use sea_orm::DatabaseConnection;

use super::{DaoBase, RecordDao, ReportDao, UserDao};

#[derive(Clone)]
pub struct DaoContext {
    db: DatabaseConnection,
    timeout: Duration,
}

impl DaoContext {
    pub fn new(db: &DatabaseConnection, timeout: Duration) -> Self {
        Self {
            db: db.clone(),
            timeout,
        }
    }

    pub fn user(&self) -> UserDao {
        DaoBase::new(&self.db, self.timeout)
    }

    pub fn record(&self) -> RecordDao {
        DaoBase::new(&self.db, self.timeout)
    }

    pub fn report(&self) -> ReportDao {
        DaoBase::new(&self.db, self.timeout)
    }
}
