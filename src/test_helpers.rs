use std::collections::BTreeMap;

use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult, Value};

use crate::{
    auth::{Role, Session},
    config::AppConfig,
    services::ServiceContext,
};

pub type MockRow = BTreeMap<&'static str, Value>;

pub fn mock_db() -> MockDatabase {
    MockDatabase::new(DatabaseBackend::MySql)
}

pub fn test_config() -> AppConfig {
    let mut cfg = AppConfig::default();
    cfg.general.request_timeout_secs = 2;
    cfg
}

pub fn services_with(db: DatabaseConnection) -> ServiceContext {
    ServiceContext::new(&db, &test_config())
}

pub fn session(role: Role) -> Session {
    let username = match role {
        Role::Admin => "admin",
        Role::Librarian => "lib",
        Role::Viewer => "guest",
    };
    Session::new(username, role)
}

pub fn exec_ok(rows_affected: u64) -> MockExecResult {
    MockExecResult {
        last_insert_id: 0,
        rows_affected,
    }
}

pub fn publisher_row(id: i64, name: &str, address: &str) -> MockRow {
    BTreeMap::from([
        ("publisher_id", Value::from(id)),
        ("name", Value::from(name.to_string())),
        ("address", Value::from(address.to_string())),
    ])
}

pub fn user_row(username: &str, password: &str, role: &str) -> MockRow {
    BTreeMap::from([
        ("username", Value::from(username.to_string())),
        ("password", Value::from(password.to_string())),
        ("role", Value::from(role.to_string())),
    ])
}
