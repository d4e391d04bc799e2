use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    db::KeyValueStore,
    error::{AppError, AppResult},
    models::{AuthSession, PublicUser, User},
};

/// Store key holding the JSON list of registered users
pub const USERS_KEY: &str = "movie_app_users";
/// Store key holding the JSON session of the logged-in user
pub const AUTH_KEY: &str = "movie_app_auth";

pub const MIN_PASSWORD_LEN: usize = 6;

/// Sign-up, login and logout over a key-value store
///
/// There is no hashing or token issuing; this only gates the UI the way the
/// local-storage login of a static front-end does.
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn KeyValueStore>,
    // Serializes the read-modify-write of the user list
    users_lock: Arc<Mutex<()>>,
}

impl AuthService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            users_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Registers a new user
    pub async fn signup(&self, name: &str, email: &str, password: &str) -> AppResult<PublicUser> {
        let (name, email) = (name.trim(), email.trim());
        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(AppError::InvalidInput(
                "Please fill in all fields".to_string(),
            ));
        }

        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::InvalidInput(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }

        let _guard = self.users_lock.lock().await;

        let mut users = self.load_users().await?;
        if users.iter().any(|u| u.email == email) {
            return Err(AppError::Conflict("Email already exists".to_string()));
        }

        let user = User {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        let public = PublicUser::from(&user);

        users.push(user);
        self.store
            .set(USERS_KEY, serde_json::to_string(&users)?)
            .await?;

        tracing::info!(email = %public.email, "User signed up");

        Ok(public)
    }

    /// Checks credentials and records the session
    pub async fn login(&self, email: &str, password: &str) -> AppResult<PublicUser> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(AppError::InvalidInput(
                "Please fill in all fields".to_string(),
            ));
        }

        let users = self.load_users().await?;
        let user = users
            .iter()
            .find(|u| u.email == email && u.password == password)
            .ok_or_else(|| AppError::Unauthorized("Invalid email or password".to_string()))?;

        let session = AuthSession {
            is_authenticated: true,
            user: PublicUser::from(user),
        };
        self.store
            .set(AUTH_KEY, serde_json::to_string(&session)?)
            .await?;

        tracing::info!(email = %email, "User logged in");

        Ok(session.user)
    }

    pub async fn logout(&self) -> AppResult<()> {
        self.store.remove(AUTH_KEY).await
    }

    pub async fn current_session(&self) -> AppResult<Option<AuthSession>> {
        match self.store.get(AUTH_KEY).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// True only for a readable session flagged as authenticated
    pub async fn is_authenticated(&self) -> bool {
        match self.current_session().await {
            Ok(session) => session.is_some_and(|s| s.is_authenticated),
            Err(e) => {
                tracing::warn!(error = %e, "Unreadable session record");
                false
            }
        }
    }

    async fn load_users(&self) -> AppResult<Vec<User>> {
        match self.store.get(USERS_KEY).await? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }
}
