pub mod auth;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod services;
pub mod shell;
pub mod state;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;
