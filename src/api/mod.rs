//! API route modules
//!
//! One module per resource, each exposing a `router()`:
//!
//! - [`health`] - health check
//! - [`cafe_items`] - cafe stock CRUD and queries
//! - [`bar_games`] - bar game CRUD plus session check-in/check-out
//! - [`customers`] - customer CRUD, search, membership linking
//! - [`memberships`] - membership CRUD
//! - [`orders`] - composite order lifecycle

pub mod bar_games;
pub mod cafe_items;
pub mod customers;
pub mod health;
pub mod memberships;
pub mod orders;
