pub mod orders;

pub use orders::AppState;
