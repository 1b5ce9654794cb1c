//! Goldrate Core - settings, price conversion and the rate service.
//!
//! This crate turns the quantities resolved by `goldrate-market-data` into
//! taxed INR prices per 10 g, and exposes the single-session rate service
//! the binary drives.

pub mod constants;
pub mod errors;
pub mod pricing;
pub mod rates;
pub mod settings;

pub use pricing::{GoldRateCalculator, PriceTable, Purity};
pub use rates::{RateResponse, RateService, RateServiceTrait, RateSnapshot, RateSources};
pub use settings::{AdjustmentStage, CalculatorSettings, GstBase, PricingSettings};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
