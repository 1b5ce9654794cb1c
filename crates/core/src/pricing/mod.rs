//! Conversion of spot gold into taxed INR prices per 10 g.

mod calculator;
pub mod pricing_model;
pub mod rounding;

pub use calculator::GoldRateCalculator;
pub use pricing_model::{DisplayRow, PriceRow, PriceTable, Purity};
pub use rounding::{round_for_display, round_to_increment};
