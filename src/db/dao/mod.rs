pub mod base;
mod context;
pub mod error;
pub mod record_dao;
pub mod report_dao;
pub mod user_dao;

pub use base::DaoBase;
pub use context::DaoContext;
pub use error::{DaoLayerError, DaoResult};
pub use record_dao::RecordDao;
pub use report_dao::{IssuedBook, LibraryMetrics, PublisherBookCount, ReportDao};
pub use user_dao::UserDao;
