pub mod color;
pub mod currency;
pub mod engine;
pub mod pricing;
pub mod service;

pub use crate::domain::model::{BoxRecord, BoxSubmission, NewBox};
pub use crate::domain::ports::BoxStore;
pub use crate::utils::error::Result;
