use serde::{Deserialize, Serialize};

/// A registered account as persisted in the credential store
///
/// Passwords are kept as entered; the store is a local convenience, not an
/// identity service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// The part of a user that is safe to hand back to callers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PublicUser {
    pub name: String,
    pub email: String,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

/// The logged-in session record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub is_authenticated: bool,
    pub user: PublicUser,
}
