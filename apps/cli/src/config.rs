//! Configuration loaded from the environment (and `.env`).

use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Context};
use goldrate_core::constants::*;
use goldrate_core::{AdjustmentStage, CalculatorSettings, GstBase, PricingSettings};

#[derive(Clone, Debug)]
pub struct Config {
    pub settings: CalculatorSettings,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional, with defaults:
    /// - `GOLDRATE_IMPORT_DUTY_PCT` (10), `GOLDRATE_GST_PCT` (3)
    /// - `GOLDRATE_ROUND_TO` (0.1; `0` disables rounding)
    /// - `GOLDRATE_MCX_ADJUSTMENT_PCT` (0)
    /// - `GOLDRATE_GST_BASE` (`duty-inclusive` | `pre-duty`)
    /// - `GOLDRATE_ADJUSTMENT_STAGE` (`after-tax` | `before-tax`)
    /// - `GOLDRATE_CACHE_TTL_SECS` (120), `GOLDRATE_COOLDOWN_SECS` (30)
    /// - `GOLDRATE_MAX_ATTEMPTS` (3), `GOLDRATE_BACKOFF_MS` (500)
    /// - `GOLDRATE_HTTP_TIMEOUT_SECS` (10)
    /// - `METALPRICE_API_KEY`: enables the paid fallback sources
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let pricing = PricingSettings {
            import_duty_pct: parse_or(&var, "GOLDRATE_IMPORT_DUTY_PCT", DEFAULT_IMPORT_DUTY_PCT)?,
            gst_pct: parse_or(&var, "GOLDRATE_GST_PCT", DEFAULT_GST_PCT)?,
            round_to: parse_or(&var, "GOLDRATE_ROUND_TO", DEFAULT_ROUND_TO)?,
            mcx_adjustment_pct: parse_or(
                &var,
                "GOLDRATE_MCX_ADJUSTMENT_PCT",
                DEFAULT_MCX_ADJUSTMENT_PCT,
            )?,
            gst_base: parse_or(&var, "GOLDRATE_GST_BASE", GstBase::default())?,
            adjustment_stage: parse_or(
                &var,
                "GOLDRATE_ADJUSTMENT_STAGE",
                AdjustmentStage::default(),
            )?,
        };

        let settings = CalculatorSettings {
            pricing,
            cache_ttl: Duration::from_secs(parse_or(
                &var,
                "GOLDRATE_CACHE_TTL_SECS",
                DEFAULT_CACHE_TTL_SECS,
            )?),
            cooldown: Duration::from_secs(parse_or(
                &var,
                "GOLDRATE_COOLDOWN_SECS",
                DEFAULT_COOLDOWN_SECS,
            )?),
            max_attempts: parse_or(&var, "GOLDRATE_MAX_ATTEMPTS", DEFAULT_MAX_ATTEMPTS)?,
            base_backoff: Duration::from_millis(parse_or(
                &var,
                "GOLDRATE_BACKOFF_MS",
                DEFAULT_BACKOFF_MS,
            )?),
            http_timeout: Duration::from_secs(parse_or(
                &var,
                "GOLDRATE_HTTP_TIMEOUT_SECS",
                DEFAULT_HTTP_TIMEOUT_SECS,
            )?),
            metal_price_api_key: var("METALPRICE_API_KEY"),
        };

        settings
            .validate()
            .context("invalid goldrate configuration")?;

        Ok(Self { settings })
    }
}

fn parse_or<T>(var: &impl Fn(&str) -> Option<String>, name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match var(name) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow!("{} has an invalid value '{}': {}", name, raw, e)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.settings, CalculatorSettings::default());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("GOLDRATE_IMPORT_DUTY_PCT", "6"),
            ("GOLDRATE_ROUND_TO", "1"),
            ("GOLDRATE_GST_BASE", "pre-duty"),
            ("GOLDRATE_CACHE_TTL_SECS", "60"),
            ("GOLDRATE_BACKOFF_MS", "250"),
            ("METALPRICE_API_KEY", "abc"),
        ])
        .unwrap();

        let s = &config.settings;
        assert_eq!(s.pricing.import_duty_pct, 6.0);
        assert_eq!(s.pricing.round_to, 1.0);
        assert_eq!(s.pricing.gst_base, GstBase::PreDuty);
        assert_eq!(s.cache_ttl, Duration::from_secs(60));
        assert_eq!(s.base_backoff, Duration::from_millis(250));
        assert_eq!(s.metal_price_api_key.as_deref(), Some("abc"));
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = load(&[("METALPRICE_API_KEY", "  "), ("GOLDRATE_GST_PCT", "")]).unwrap();
        assert!(config.settings.metal_price_api_key.is_none());
        assert_eq!(config.settings.pricing.gst_pct, 3.0);
    }

    #[test]
    fn test_invalid_values_are_errors() {
        let err = load(&[("GOLDRATE_GST_PCT", "three")]).unwrap_err();
        assert!(err.to_string().contains("GOLDRATE_GST_PCT"));

        assert!(load(&[("GOLDRATE_IMPORT_DUTY_PCT", "-1")]).is_err());
        assert!(load(&[("GOLDRATE_MAX_ATTEMPTS", "0")]).is_err());
        assert!(load(&[("GOLDRATE_ADJUSTMENT_STAGE", "whenever")]).is_err());
    }
}
