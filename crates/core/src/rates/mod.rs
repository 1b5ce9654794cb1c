pub mod rates_model;
pub mod rates_service;
pub mod rates_traits;
pub mod sources;

pub use rates_model::{RateResponse, RateSnapshot};
pub use rates_service::RateService;
pub use rates_traits::RateServiceTrait;
pub use sources::RateSources;
