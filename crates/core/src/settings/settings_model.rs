use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::errors::{Error, Result};

/// What GST is levied on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GstBase {
    /// GST on the duty-inclusive price.
    #[default]
    DutyInclusive,
    /// GST on the pre-duty price, added on top of the duty-inclusive price.
    PreDuty,
}

/// Where the MCX adjustment is applied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdjustmentStage {
    /// Scale the final GST-inclusive price only.
    #[default]
    AfterTax,
    /// Scale the pre-tax price; duty and GST are computed from the result.
    BeforeTax,
}

impl FromStr for GstBase {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "duty-inclusive" | "duty_inclusive" => Ok(Self::DutyInclusive),
            "pre-duty" | "pre_duty" => Ok(Self::PreDuty),
            other => Err(Error::InvalidConfigValue(format!(
                "unknown GST base '{}' (expected duty-inclusive or pre-duty)",
                other
            ))),
        }
    }
}

impl FromStr for AdjustmentStage {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "after-tax" | "after_tax" => Ok(Self::AfterTax),
            "before-tax" | "before_tax" => Ok(Self::BeforeTax),
            other => Err(Error::InvalidConfigValue(format!(
                "unknown adjustment stage '{}' (expected after-tax or before-tax)",
                other
            ))),
        }
    }
}

impl fmt::Display for GstBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DutyInclusive => write!(f, "duty-inclusive"),
            Self::PreDuty => write!(f, "pre-duty"),
        }
    }
}

impl fmt::Display for AdjustmentStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AfterTax => write!(f, "after-tax"),
            Self::BeforeTax => write!(f, "before-tax"),
        }
    }
}

/// Taxes, adjustment and display rounding applied to the converted price.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingSettings {
    pub import_duty_pct: f64,
    pub gst_pct: f64,
    /// Display rounding increment in rupees; `<= 0` disables rounding.
    pub round_to: f64,
    pub mcx_adjustment_pct: f64,
    pub gst_base: GstBase,
    pub adjustment_stage: AdjustmentStage,
}

impl Default for PricingSettings {
    fn default() -> Self {
        Self {
            import_duty_pct: DEFAULT_IMPORT_DUTY_PCT,
            gst_pct: DEFAULT_GST_PCT,
            round_to: DEFAULT_ROUND_TO,
            mcx_adjustment_pct: DEFAULT_MCX_ADJUSTMENT_PCT,
            gst_base: GstBase::default(),
            adjustment_stage: AdjustmentStage::default(),
        }
    }
}

impl PricingSettings {
    pub fn validate(&self) -> Result<()> {
        non_negative("import duty", self.import_duty_pct)?;
        non_negative("GST", self.gst_pct)?;
        if !self.round_to.is_finite() {
            return Err(Error::InvalidConfigValue(format!(
                "round-to increment must be a number, got {}",
                self.round_to
            )));
        }
        if !self.mcx_adjustment_pct.is_finite() || self.mcx_adjustment_pct <= -100.0 {
            return Err(Error::InvalidConfigValue(format!(
                "MCX adjustment must be greater than -100%, got {}",
                self.mcx_adjustment_pct
            )));
        }
        Ok(())
    }
}

fn non_negative(name: &str, pct: f64) -> Result<()> {
    if pct.is_finite() && pct >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidConfigValue(format!(
            "{} percentage must be a non-negative number, got {}",
            name, pct
        )))
    }
}

/// Everything the rate pipeline and calculator are parameterised by.
#[derive(Clone, Debug, PartialEq)]
pub struct CalculatorSettings {
    pub pricing: PricingSettings,
    pub cache_ttl: Duration,
    pub cooldown: Duration,
    pub max_attempts: u32,
    pub base_backoff: Duration,
    pub http_timeout: Duration,
    /// Enables the paid fallback sources when set.
    pub metal_price_api_key: Option<String>,
}

impl Default for CalculatorSettings {
    fn default() -> Self {
        Self {
            pricing: PricingSettings::default(),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            cooldown: Duration::from_secs(DEFAULT_COOLDOWN_SECS),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_backoff: Duration::from_millis(DEFAULT_BACKOFF_MS),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            metal_price_api_key: None,
        }
    }
}

impl CalculatorSettings {
    pub fn validate(&self) -> Result<()> {
        self.pricing.validate()?;

        if self.max_attempts == 0 {
            return Err(Error::InvalidConfigValue(
                "max attempts must be at least 1".to_string(),
            ));
        }
        if self.http_timeout.is_zero() {
            return Err(Error::InvalidConfigValue(
                "HTTP timeout must be greater than zero".to_string(),
            ));
        }
        if let Some(key) = &self.metal_price_api_key {
            if key.trim().is_empty() {
                return Err(Error::InvalidConfigValue(
                    "Metal Price API key is set but empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}
