// src/lib.rs

//! Bookstore backend core: catalog browsing, per-user shopping carts, and
//! order placement behind token-based authentication.
//!
//! The centerpiece is the cart-to-order commitment workflow:
//!  - A cart manager enforcing quantity/existence/ownership invariants.
//!  - An order workflow that snapshots the cart, prices every line with exact
//!    decimal arithmetic, and commits order + cart teardown as one atomic
//!    write with optimistic conflict detection.
//!  - A store seam ([`store::BookstoreStore`]) behind which any transactional
//!    row store can sit; an in-memory implementation ships with the crate.
//!  - Collaborator contracts for authentication and catalog ingestion.

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod store;

// --- Re-exports for the Public API ---

pub use crate::config::AppConfig;
pub use crate::error::{AppError, Result};
pub use crate::models::{Book, CartItem, Order, OrderItem, OrderStatus, Role, User};
pub use crate::services::{
  role_permits, Authenticator, BookService, CartLine, CartService, CatalogSource, JsonCatalogSource,
  MockCatalogSource, Operation, OrderService, SessionAuthenticator,
};
pub use crate::store::{BookstoreStore, CartSnapshot, InMemoryStore, StoreError};
