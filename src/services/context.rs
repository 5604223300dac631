use sea_orm::DatabaseConnection;

use crate::{
    config::AppConfig,
    db::dao::DaoContext,
    services::{
        dashboard_service::DashboardService, report_service::ReportService,
        session_service::SessionService,
    },
    state::AppState,
};

#[derive(Clone)]
pub struct ServiceContext {
    daos: DaoContext,
    allow_plaintext_passwords: bool,
}

impl ServiceContext {
    pub fn new(db: &DatabaseConnection, config: &AppConfig) -> Self {
        Self {
            daos: DaoContext::new(db, config.general.request_timeout()),
            allow_plaintext_passwords: config.auth.allow_plaintext_passwords,
        }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(&state.db, &state.config)
    }

    pub fn session(&self) -> SessionService {
        SessionService::new(self.daos.user(), self.allow_plaintext_passwords)
    }

    pub fn dashboard(&self) -> DashboardService {
        DashboardService::new(self.daos.record())
    }

    pub fn report(&self) -> ReportService {
        ReportService::new(self.daos.report())
    }
}
