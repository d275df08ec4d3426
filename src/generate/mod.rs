pub mod customers;
pub mod employees;
pub mod error;
pub mod financial;
pub mod model;
pub mod operations;
pub mod sales;
pub mod sampling;
pub mod service;

pub use error::GenerateError;
pub use service::{BusinessDataGenerator, GeneratedData, GeneratorService};
