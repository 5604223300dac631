use crate::{
    auth::{
        Role, Session,
        password::{hash_password, verify_stored_password},
    },
    config::AuthConfig,
    db::dao::UserDao,
    error::AppError,
};

const MISSING_CREDENTIALS: &str = "Please enter both username and password.";
const INVALID_CREDENTIALS: &str = "Invalid username or password.";

#[derive(Clone)]
pub struct SessionService {
    user_dao: UserDao,
    allow_plaintext_passwords: bool,
}

impl SessionService {
    pub fn new(user_dao: UserDao, allow_plaintext_passwords: bool) -> Self {
        Self {
            user_dao,
            allow_plaintext_passwords,
        }
    }

    /// Checks credentials against `Users` and returns the session for the stored role.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, AppError> {
        let username = username.trim();
        let password = password.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AppError::bad_request(MISSING_CREDENTIALS));
        }

        let user = match self.user_dao.find_by_username(username).await {
            Ok(user) => user,
            Err(err) => {
                tracing::error!(username, error = %err, "login lookup failed");
                return Err(AppError::from(err));
            }
        };
        let Some(user) = user else {
            tracing::info!(username, "login rejected: unknown user");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        };

        if !verify_stored_password(password, &user.password, self.allow_plaintext_passwords)? {
            tracing::info!(username, "login rejected: wrong password");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        let Ok(role) = Role::try_from(user.role.as_str()) else {
            tracing::warn!(username, role = %user.role, "login rejected: unknown role");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        };

        tracing::info!(username, role = %role, "login succeeded");
        Ok(Session::new(user.username, role))
    }

    pub async fn seed_admin(&self, cfg: &AuthConfig) -> anyhow::Result<()> {
        let Some((username, password)) = cfg.admin_seed() else {
            return Ok(());
        };

        if let Some(existing) = self
            .user_dao
            .find_by_username(username)
            .await
            .map_err(|err| anyhow::anyhow!("{err}"))?
        {
            tracing::info!("admin user already present: {}", existing.username);
            return Ok(());
        }

        let hash = hash_password(password)
            .map_err(|e| anyhow::anyhow!("admin seed hash error: {e}"))?;
        self.user_dao
            .create_user(username, &hash, Role::Admin.as_str())
            .await
            .map_err(|err| anyhow::anyhow!("{err}"))?;
        tracing::info!("seeded admin user {username}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult};

    use crate::{
        auth::password::hash_password,
        config::AuthConfig,
        db::entities::users,
        services::session_service::SessionService,
        test_helpers::services_with,
    };

    fn service(mock: MockDatabase) -> SessionService {
        services_with(mock.into_connection()).session()
    }

    fn admin_config(password: &str) -> AuthConfig {
        AuthConfig {
            admin_username: Some("admin".to_string()),
            admin_password: Some(password.to_string()),
            ..AuthConfig::default()
        }
    }

    #[tokio::test]
    async fn seed_admin_noops_when_admin_exists() {
        let existing = users::Model {
            username: "admin".to_string(),
            password: "hashed".to_string(),
            role: "Admin".to_string(),
        };
        let db = MockDatabase::new(DatabaseBackend::MySql)
            .append_query_results([[existing]])
            .into_connection();
        let svc = services_with(db.clone()).session();

        svc.seed_admin(&admin_config("admin-password"))
            .await
            .expect("seed should succeed");
        assert_eq!(db.into_transaction_log().len(), 1);
    }

    #[tokio::test]
    async fn seed_admin_creates_admin_when_missing() {
        let db = MockDatabase::new(DatabaseBackend::MySql)
            .append_query_results([Vec::<users::Model>::new()])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();
        let svc = services_with(db.clone()).session();

        svc.seed_admin(&admin_config("admin-password"))
            .await
            .expect("seed should succeed");
        assert_eq!(db.into_transaction_log().len(), 2);
    }

    #[tokio::test]
    async fn seed_admin_is_skipped_without_config() {
        let db = MockDatabase::new(DatabaseBackend::MySql).into_connection();
        let svc = services_with(db.clone()).session();

        svc.seed_admin(&AuthConfig::default())
            .await
            .expect("nothing to seed");
        assert!(db.into_transaction_log().is_empty());
    }

    #[tokio::test]
    async fn seed_admin_fails_when_admin_password_is_empty() {
        let svc = service(
            MockDatabase::new(DatabaseBackend::MySql)
                .append_query_results([Vec::<users::Model>::new()]),
        );

        let err = svc
            .seed_admin(&admin_config(""))
            .await
            .expect_err("seed_admin should fail");
        assert!(err.to_string().starts_with("admin seed hash error:"));
    }

    #[tokio::test]
    async fn seed_admin_propagates_insert_errors() {
        let svc = service(
            MockDatabase::new(DatabaseBackend::MySql)
                .append_query_results([Vec::<users::Model>::new()])
                .append_exec_errors([DbErr::Custom("insert failed".to_string())]),
        );

        let err = svc
            .seed_admin(&admin_config("admin-password"))
            .await
            .expect_err("seed_admin should fail");
        assert!(err.to_string().contains("insert failed"));
    }

    #[tokio::test]
    async fn unknown_role_is_refused() {
        let hash = hash_password("password123").expect("hash should succeed");
        let svc = service(MockDatabase::new(DatabaseBackend::MySql).append_query_results([[
            users::Model {
                username: "mgr".to_string(),
                password: hash,
                role: "Manager".to_string(),
            },
        ]]));

        let err = svc
            .login("mgr", "password123")
            .await
            .expect_err("unknown role should fail");
        assert_eq!(err.message(), "Invalid username or password.");
    }
}
