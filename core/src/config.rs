// bookstore_core/src/config.rs

use crate::error::{AppError, Result};
use dotenvy::dotenv;
use std::env;

/// Injected application configuration. Loaded once at startup and passed to
/// the constructing components; never a process-wide mutable singleton.
#[derive(Debug, Clone)]
pub struct AppConfig {
  /// Whether bootstrap should seed default accounts and catalog data.
  pub seed_db: bool,

  /// Query handed to the catalog source when populating an empty catalog.
  pub catalog_populate_query: String,
  pub catalog_populate_limit: usize,

  // Seed account credentials (hashed before storage by bootstrap)
  pub admin_username: String,
  pub admin_password: String,
  pub demo_username: String,
  pub demo_password: String,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let get_env = |var_name: &str| {
      env::var(var_name).map_err(|e| AppError::Config(format!("Missing environment variable '{}': {}", var_name, e)))
    };

    let seed_db = get_env("SEED_DB")
      .unwrap_or_else(|_| "true".to_string())
      .parse::<bool>()
      .map_err(|e| AppError::Config(format!("Invalid SEED_DB value: {}", e)))?;

    let catalog_populate_query = get_env("CATALOG_POPULATE_QUERY").unwrap_or_else(|_| "programming".to_string());
    let catalog_populate_limit = get_env("CATALOG_POPULATE_LIMIT")
      .unwrap_or_else(|_| "30".to_string())
      .parse::<usize>()
      .map_err(|e| AppError::Config(format!("Invalid CATALOG_POPULATE_LIMIT: {}", e)))?;

    let admin_username = get_env("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string());
    let admin_password = get_env("ADMIN_PASSWORD").unwrap_or_else(|_| "admin".to_string());
    let demo_username = get_env("DEMO_USERNAME").unwrap_or_else(|_| "user".to_string());
    let demo_password = get_env("DEMO_PASSWORD").unwrap_or_else(|_| "user".to_string());

    tracing::info!("Application configuration loaded successfully.");

    Ok(Self {
      seed_db,
      catalog_populate_query,
      catalog_populate_limit,
      admin_username,
      admin_password,
      demo_username,
      demo_password,
    })
  }
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      seed_db: true,
      catalog_populate_query: "programming".to_string(),
      catalog_populate_limit: 30,
      admin_username: "admin".to_string(),
      admin_password: "admin".to_string(),
      demo_username: "user".to_string(),
      demo_password: "user".to_string(),
    }
  }
}
