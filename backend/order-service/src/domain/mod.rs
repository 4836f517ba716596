pub mod cart;
pub mod order;

pub use cart::{CartLine, CartSnapshot};
pub use order::{Order, OrderDraft, OrderItem, OrderStatus};
