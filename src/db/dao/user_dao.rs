use std::time::Duration;

use sea_orm::{DatabaseConnection, EntityTrait, Set};

use super::{DaoBase, DaoResult};
use crate::db::entities::{prelude::Users, users};

#[derive(Clone)]
pub struct UserDao {
    db: DatabaseConnection,
    timeout: Duration,
}

impl DaoBase for UserDao {
    fn from_parts(db: DatabaseConnection, timeout: Duration) -> Self {
        Self { db, timeout }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl UserDao {
    pub async fn find_by_username(&self, username: &str) -> DaoResult<Option<users::Model>> {
        self.bounded(
            "find user",
            Users::find_by_id(username.to_string()).one(self.db()),
        )
        .await
    }

    pub async fn create_user(&self, username: &str, password: &str, role: &str) -> DaoResult<()> {
        let model = users::ActiveModel {
            username: Set(username.to_string()),
            password: Set(password.to_string()),
            role: Set(role.to_string()),
        };
        self.bounded(
            "create user",
            Users::insert(model).exec_without_returning(self.db()),
        )
        .await
        .map(|_| ())
    }
}
