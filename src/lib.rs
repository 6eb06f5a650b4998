//! Barcade Server - cafe and game-rental venue management
//!
//! # Architecture
//!
//! - **Inventory** (`inventory`): stock ledger, serialized reservations
//! - **Sessions** (`sessions`): timed game rentals, checkout billing
//! - **Orders** (`orders`): composite orders over goods and sessions
//! - **Database** (`db`): embedded SurrealDB storage
//! - **HTTP API** (`api`, `routes`): RESTful interface
//!
//! # Module structure
//!
//! ```text
//! src/
//! ├── core/        # Config, state, server lifecycle
//! ├── api/         # HTTP routers and handlers
//! ├── routes/      # Router assembly + middleware
//! ├── db/          # Database layer (models, repositories)
//! ├── inventory/   # Stock ledger
//! ├── sessions/    # Rental session tracker
//! ├── orders/      # Order engine
//! └── utils/       # Errors, response envelope, logging
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod inventory;
pub mod orders;
pub mod routes;
pub mod sessions;
pub mod utils;

// Re-export public types
pub use crate::core::{Config, Server, ServerState};
pub use crate::inventory::InventoryLedger;
pub use crate::orders::OrderEngine;
pub use crate::sessions::SessionTracker;
pub use crate::utils::{AppError, AppResponse, AppResult};

// Re-export logger functions
pub use crate::utils::logger::{init_logger, init_logger_with_file};

/// Load environment and set up logging for the serving process
pub fn setup_environment() {
    dotenv::dotenv().ok();
    init_logger();
}
