use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Role {
    Admin,
    Librarian,
    Viewer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Librarian => "Librarian",
            Role::Viewer => "Viewer",
        }
    }

    pub fn permits(self, action: Action) -> bool {
        match action {
            Action::View => true,
            Action::Add => !matches!(self, Role::Viewer),
            Action::Delete => matches!(self, Role::Admin),
        }
    }
}

impl TryFrom<&str> for Role {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "librarian" => Ok(Role::Librarian),
            "viewer" => Ok(Role::Viewer),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    View,
    Add,
    Delete,
}

impl Action {
    fn denied_message(self) -> &'static str {
        match self {
            Action::View => "You cannot view this data.",
            Action::Add => "Viewers cannot add data.",
            Action::Delete => "Only Admin can delete records.",
        }
    }
}

/// Who is logged in. Handed to every dashboard operation; never re-validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub username: String,
    pub role: Role,
}

impl Session {
    pub fn new(username: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            role,
        }
    }

    pub fn require(&self, action: Action) -> Result<(), AppError> {
        if self.role.permits(action) {
            return Ok(());
        }
        tracing::warn!(
            username = %self.username,
            role = %self.role,
            action = ?action,
            "action denied"
        );
        Err(AppError::forbidden(action.denied_message()))
    }
}
