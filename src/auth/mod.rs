pub mod password;
mod types;

pub use types::{Action, Role, Session};
