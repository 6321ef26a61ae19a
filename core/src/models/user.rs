// bookstore_core/src/models/user.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The single role tag carried by every account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
  User,
  Admin,
}

impl Role {
  pub fn as_str(&self) -> &'static str {
    match self {
      Role::User => "USER",
      Role::Admin => "ADMIN",
    }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
  pub id: Uuid,
  pub username: String,
  pub email: String,
  #[serde(skip_serializing)] // Never send password hash to client
  pub password_hash: String,
  pub role: Role,
  pub created_at: DateTime<Utc>,
}

impl User {
  /// Builds a user record with a fresh id. The password must already be hashed.
  pub fn new(username: impl Into<String>, email: impl Into<String>, password_hash: impl Into<String>, role: Role) -> Self {
    Self {
      id: Uuid::new_v4(),
      username: username.into(),
      email: email.into(),
      password_hash: password_hash.into(),
      role,
      created_at: Utc::now(),
    }
  }
}
