pub mod orders;

pub use orders::{CartGateway, OrderService, PaymentGateway, SagaStep, StepPolicy};
