use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Gold purity, in karats out of 24.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Purity {
    #[serde(rename = "24K")]
    K24,
    #[serde(rename = "22K")]
    K22,
    #[serde(rename = "18K")]
    K18,
}

impl Purity {
    pub const ALL: [Purity; 3] = [Purity::K24, Purity::K22, Purity::K18];

    pub fn karats(&self) -> u8 {
        match self {
            Purity::K24 => 24,
            Purity::K22 => 22,
            Purity::K18 => 18,
        }
    }

    /// Share of pure gold.
    pub fn ratio(&self) -> f64 {
        f64::from(self.karats()) / 24.0
    }

    pub fn label(&self) -> &'static str {
        match self {
            Purity::K24 => "24K (pure) per 10g",
            Purity::K22 => "22K per 10g (22/24)",
            Purity::K18 => "18K per 10g (18/24)",
        }
    }
}

impl fmt::Display for Purity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}K", self.karats())
    }
}

/// INR per 10 g for one purity, at each tax stage. Unrounded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRow {
    pub purity: Purity,
    pub pre_tax: f64,
    pub after_import: f64,
    pub after_gst: f64,
    /// `after_gst` with the MCX adjustment applied when it applies after tax;
    /// equal to `after_gst` otherwise.
    pub final_price: f64,
}

/// A [`PriceRow`] rounded for display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayRow {
    pub purity: Purity,
    pub pre_tax: Decimal,
    pub after_import: Decimal,
    pub after_gst: Decimal,
    pub final_price: Decimal,
}

/// Converted prices for every purity, plus the intermediate figures.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceTable {
    pub xau_usd: f64,
    pub usd_inr: f64,
    pub usd_per_gram: f64,
    pub inr_per_10g_24k: f64,
    pub rows: Vec<PriceRow>,
}

impl PriceTable {
    pub fn row(&self, purity: Purity) -> Option<&PriceRow> {
        self.rows.iter().find(|r| r.purity == purity)
    }
}
