pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::{JsonFileStore, MemoryStore, RestStore};
pub use crate::core::{
    color::Color,
    currency::{CurrencyFormat, Grouping},
    engine::{BoxRow, ShippingEngine},
    pricing::PricingTable,
    service::BoxService,
};
pub use domain::model::{
    BoxField, BoxRecord, BoxSubmission, BoxSummary, CountryOption, DestinationCountry, NewBox,
    ValidationErrors,
};
pub use domain::ports::BoxStore;
pub use utils::error::{ErrorCategory, Result, ShippingError};
