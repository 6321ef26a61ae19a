// bookstore_core/src/services/mod.rs

//! Application services over the store seam: authentication, catalog
//! management, the cart manager, and the order commitment workflow.

pub mod auth_service;
pub mod book_service;
pub mod cart_service;
pub mod catalog_json;
pub mod catalog_mock;
pub mod order_service;

pub use auth_service::{role_permits, Authenticator, Operation, SessionAuthenticator};
pub use book_service::{BookService, CatalogSource};
pub use cart_service::{CartLine, CartService};
pub use catalog_json::JsonCatalogSource;
pub use catalog_mock::MockCatalogSource;
pub use order_service::OrderService;
