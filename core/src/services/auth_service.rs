// bookstore_core/src/services/auth_service.rs

//! Authentication collaborator: password hashing and verification, opaque
//! session tokens, and the role capability policy.
//!
//! The rest of the core never parses credentials itself; it receives a
//! verified [`User`] principal from an [`Authenticator`].

use std::collections::HashMap;
use std::sync::Arc;

use argon2::{
  password_hash::{
    rand_core::OsRng, // For generating random salts
    PasswordHash,
    PasswordHasher,
    PasswordVerifier,
    SaltString,
  },
  Argon2,
};
use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{Role, User};
use crate::store::{BookstoreStore, StoreError};

/// Hashes a plain-text password using Argon2 with default parameters.
#[instrument(name = "auth_service::hash_password", skip(password), err(Display))]
pub fn hash_password(password: &str) -> Result<String> {
  if password.is_empty() {
    return Err(AppError::Validation("Password cannot be empty for hashing.".to_string()));
  }

  let salt = SaltString::generate(&mut OsRng);
  let argon2_hasher = Argon2::default();

  match argon2_hasher.hash_password(password.as_bytes(), &salt) {
    Ok(password_hash_obj) => Ok(password_hash_obj.to_string()),
    Err(argon_err) => {
      error!(error = %argon_err, "Argon2 password hashing failed.");
      Err(AppError::Internal(format!("Password hashing process failed: {}", argon_err)))
    }
  }
}

/// Verifies a plain-text password against a stored Argon2 hash.
#[instrument(name = "auth_service::verify_password", skip_all, err(Display))]
pub fn verify_password(hashed_password_str: &str, provided_password: &str) -> Result<bool> {
  if hashed_password_str.is_empty() || provided_password.is_empty() {
    return Err(AppError::Auth("Invalid credentials.".to_string()));
  }

  let parsed_hash = match PasswordHash::new(hashed_password_str) {
    Ok(ph) => ph,
    Err(parse_err) => {
      error!(error = %parse_err, "Failed to parse stored password hash string.");
      return Err(AppError::Internal(format!(
        "Invalid stored password hash format: {}",
        parse_err
      )));
    }
  };

  match Argon2::default().verify_password(provided_password.as_bytes(), &parsed_hash) {
    Ok(()) => Ok(true),
    Err(argon2::password_hash::Error::Password) => {
      debug!("Password verification failed: passwords do not match.");
      Ok(false)
    }
    Err(other_argon_err) => {
      error!(error = %other_argon_err, "Argon2 password verification process encountered an error.");
      Err(AppError::Internal(format!(
        "Password verification process failed: {}",
        other_argon_err
      )))
    }
  }
}

/// Operations a principal may attempt. Used by callers to gate entry into the
/// services; the mapping lives in [`role_permits`] rather than scattered
/// per-endpoint annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
  BrowseCatalog,
  MutateCart,
  PlaceOrder,
  ViewOwnOrders,
  ManageCatalog,
}

/// Pure capability check: principal role -> permitted operation.
pub fn role_permits(role: Role, operation: Operation) -> bool {
  match operation {
    Operation::ManageCatalog => role == Role::Admin,
    Operation::BrowseCatalog | Operation::MutateCart | Operation::PlaceOrder | Operation::ViewOwnOrders => true,
  }
}

/// Resolves request credentials to a verified principal.
#[async_trait]
pub trait Authenticator: Send + Sync {
  async fn authenticate(&self, token: &str) -> Result<User>;
}

/// Token-based authenticator over the user store. Sessions are opaque uuid
/// tokens held in memory; issuing a wire format (e.g. JWT) is transport-layer
/// concern outside this core.
pub struct SessionAuthenticator {
  store: Arc<dyn BookstoreStore>,
  sessions: RwLock<HashMap<String, Uuid>>,
}

impl SessionAuthenticator {
  pub fn new(store: Arc<dyn BookstoreStore>) -> Self {
    Self {
      store,
      sessions: RwLock::new(HashMap::new()),
    }
  }

  /// Registers a new account with a hashed password. Username/email
  /// collisions surface as validation errors.
  #[instrument(name = "auth_service::register", skip(self, password), err(Display))]
  pub async fn register(&self, username: &str, email: &str, password: &str, role: Role) -> Result<User> {
    if username.trim().is_empty() || email.trim().is_empty() {
      return Err(AppError::Validation("Username and email are required.".to_string()));
    }
    let password_hash = hash_password(password)?;
    let user = User::new(username, email, password_hash, role);
    match self.store.insert_user(user).await {
      Ok(user) => {
        info!(username = %user.username, "User registered successfully.");
        Ok(user)
      }
      Err(StoreError::Duplicate { field }) => {
        Err(AppError::Validation(format!("A user with this {} already exists.", field)))
      }
      Err(e) => Err(e.into()),
    }
  }

  /// Verifies credentials and opens a session, returning the opaque token.
  #[instrument(name = "auth_service::login", skip(self, password), err(Display))]
  pub async fn login(&self, username: &str, password: &str) -> Result<String> {
    let user = self
      .store
      .find_user_by_username(username)
      .await?
      .ok_or_else(|| AppError::Auth("Invalid username or password.".to_string()))?;

    if !verify_password(&user.password_hash, password)? {
      warn!(username, "Login failed: password mismatch.");
      return Err(AppError::Auth("Invalid username or password.".to_string()));
    }

    let token = Uuid::new_v4().to_string();
    self.sessions.write().insert(token.clone(), user.id);
    info!(username, "Session opened.");
    Ok(token)
  }

  /// Closes the session. Unknown tokens are ignored.
  pub fn logout(&self, token: &str) {
    self.sessions.write().remove(token);
  }
}

#[async_trait]
impl Authenticator for SessionAuthenticator {
  #[instrument(name = "auth_service::authenticate", skip_all, err(Display))]
  async fn authenticate(&self, token: &str) -> Result<User> {
    let user_id = {
      let sessions = self.sessions.read();
      sessions.get(token).copied()
    };
    let user_id = user_id.ok_or_else(|| AppError::Auth("Invalid or expired session token.".to_string()))?;

    self
      .store
      .find_user_by_id(user_id)
      .await?
      .ok_or_else(|| AppError::Auth("Session refers to an unknown user.".to_string()))
  }
}
