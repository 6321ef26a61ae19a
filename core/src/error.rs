// bookstore_core/src/error.rs

use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Authentication Failed: {0}")]
  Auth(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Cannot place an order with an empty cart.")]
  EmptyCart,

  /// Server fault: a cart row referenced a book that no longer exists.
  /// The whole operation aborts rather than skipping the offending line.
  #[error("Cart data inconsistency: {0}")]
  DataInconsistency(String),

  #[error("Store Error: {0}")]
  Store(#[from] StoreError),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Internal Error: {0}")]
  Internal(String),
}

impl AppError {
  /// Whether the whole call is safe to retry from the top. True only for
  /// transient store failures (optimistic conflicts); never for validation,
  /// not-found, or domain-precondition failures.
  pub fn is_retryable(&self) -> bool {
    matches!(self, AppError::Store(e) if e.is_retryable())
  }
}

// Allow anyhow::Error to be converted into AppError::Internal for convenience
// in collaborators that use `?` on functions returning anyhow::Result.
impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    if err.is::<StoreError>() {
      // Already have `From<StoreError>`; this handles one wrapped in anyhow.
      match err.downcast::<StoreError>() {
        Ok(store_err) => return AppError::Store(store_err),
        Err(err) => return AppError::Internal(err.to_string()),
      }
    }
    AppError::Internal(err.to_string())
  }
}

// Define a Result type alias for the crate
pub type Result<T, E = AppError> = std::result::Result<T, E>;
