//! The logged-in call-center operator.

use serde::{Deserialize, Serialize};

/// An authenticated operator as returned by the auth backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub name: String,
    pub department: String,
    pub role: String,
    /// Bearer token for subsequent API calls.
    pub token: String,
}

impl User {
    /// Short display form: "name (role)".
    pub fn display(&self) -> String {
        format!("{} ({})", self.name, self.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_form() {
        let user = User {
            id: "7".into(),
            username: "jkim".into(),
            name: "J. Kim".into(),
            department: "Inbound".into(),
            role: "agent".into(),
            token: "tok".into(),
        };
        assert_eq!(user.display(), "J. Kim (agent)");
    }
}
