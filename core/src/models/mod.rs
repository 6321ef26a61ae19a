// bookstore_core/src/models/mod.rs

//! Data structures representing the bookstore's persisted entities.

pub mod book;
pub mod cart_item;
pub mod order;
pub mod order_item;
pub mod user;

// Re-export the model structs for convenient access
pub use book::Book;
pub use cart_item::CartItem;
pub use order::{Order, OrderStatus};
pub use order_item::OrderItem;
pub use user::{Role, User};
