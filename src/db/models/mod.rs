//! Database Models

// Serde helpers
pub mod serde_helpers;

// Catalog
pub mod bar_game;
pub mod cafe_item;

// Customers
pub mod customer;
pub mod membership;

// Sessions and orders
pub mod game_session;
pub mod order;

// Re-exports
pub use bar_game::{BarGame, BarGameCreate, BarGameUpdate};
pub use cafe_item::{CafeItem, CafeItemCreate, CafeItemUpdate};
pub use customer::{AssignMembership, Customer, CustomerCreate, CustomerUpdate};
pub use game_session::{CheckInRequest, GameSession, GameSessionUpdate};
pub use membership::{Membership, MembershipCreate, MembershipUpdate};
pub use order::{
    Order, OrderAddItems, OrderCreate, OrderDetail, OrderItem, OrderItemQuantityUpdate,
    OrderItemType, OrderLineInput, PaymentStatus,
};
