use log::debug;

use super::pricing_model::{DisplayRow, PriceRow, PriceTable, Purity};
use super::rounding::round_for_display;
use crate::constants::{GRAMS_PER_QUOTE_UNIT, GRAMS_PER_TROY_OUNCE};
use crate::errors::{Error, Result, ValidationError};
use crate::settings::{AdjustmentStage, GstBase, PricingSettings};

/// Converts spot gold and the FX rate into taxed INR prices per 10 g.
#[derive(Clone, Debug, Default)]
pub struct GoldRateCalculator {
    settings: PricingSettings,
}

impl GoldRateCalculator {
    pub fn new(settings: PricingSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &PricingSettings {
        &self.settings
    }

    /// Price table for `xau_usd` (USD per troy ounce) at `usd_inr`.
    pub fn compute(&self, xau_usd: f64, usd_inr: f64) -> Result<PriceTable> {
        ensure_positive("xau_usd", xau_usd)?;
        ensure_positive("usd_inr", usd_inr)?;

        let usd_per_gram = xau_usd / GRAMS_PER_TROY_OUNCE;
        let inr_per_10g_24k = usd_per_gram * GRAMS_PER_QUOTE_UNIT * usd_inr;

        let rows = Purity::ALL
            .iter()
            .map(|purity| self.price_row(*purity, inr_per_10g_24k * purity.ratio()))
            .collect::<Vec<_>>();

        if rows
            .iter()
            .any(|r| !r.final_price.is_finite() || !r.after_gst.is_finite())
        {
            return Err(Error::Calculation(format!(
                "price overflowed for xau_usd={} usd_inr={}",
                xau_usd, usd_inr
            )));
        }

        debug!(
            "Converted xau_usd={} usd_inr={} to {:.2} INR/10g (24K, pre-tax)",
            xau_usd, usd_inr, inr_per_10g_24k
        );

        Ok(PriceTable {
            xau_usd,
            usd_inr,
            usd_per_gram,
            inr_per_10g_24k,
            rows,
        })
    }

    /// Rows of `table` rounded with this calculator's increment.
    pub fn display_rows(&self, table: &PriceTable) -> Result<Vec<DisplayRow>> {
        let round_to = self.settings.round_to;
        table
            .rows
            .iter()
            .map(|row| {
                Ok(DisplayRow {
                    purity: row.purity,
                    pre_tax: round_for_display(row.pre_tax, round_to)?,
                    after_import: round_for_display(row.after_import, round_to)?,
                    after_gst: round_for_display(row.after_gst, round_to)?,
                    final_price: round_for_display(row.final_price, round_to)?,
                })
            })
            .collect()
    }

    fn price_row(&self, purity: Purity, base: f64) -> PriceRow {
        let s = &self.settings;
        let adjustment = 1.0 + s.mcx_adjustment_pct / 100.0;

        let pre_tax = match s.adjustment_stage {
            AdjustmentStage::BeforeTax => base * adjustment,
            AdjustmentStage::AfterTax => base,
        };
        let after_import = pre_tax * (1.0 + s.import_duty_pct / 100.0);
        let after_gst = match s.gst_base {
            GstBase::DutyInclusive => after_import * (1.0 + s.gst_pct / 100.0),
            GstBase::PreDuty => after_import + pre_tax * s.gst_pct / 100.0,
        };
        let final_price = match s.adjustment_stage {
            AdjustmentStage::AfterTax => after_gst * adjustment,
            AdjustmentStage::BeforeTax => after_gst,
        };

        PriceRow {
            purity,
            pre_tax,
            after_import,
            after_gst,
            final_price,
        }
    }
}

fn ensure_positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidInput(format!(
            "{} must be a positive number, got {}",
            name, value
        ))
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const EPS: f64 = 1e-6;

    fn table(settings: PricingSettings) -> PriceTable {
        GoldRateCalculator::new(settings)
            .compute(2000.0, 83.0)
            .unwrap()
    }

    #[test]
    fn test_reference_conversion() {
        let table = table(PricingSettings::default());

        assert!((table.usd_per_gram - 64.30149313725596).abs() < EPS);
        assert!((table.inr_per_10g_24k - 53370.239303922455).abs() < EPS);

        let k24 = table.row(Purity::K24).unwrap();
        assert!((k24.pre_tax - 53370.239303922455).abs() < EPS);
        assert!((k24.after_import - 58707.263234314705).abs() < EPS);
        assert!((k24.after_gst - 60468.481131344146).abs() < EPS);
        assert_eq!(k24.final_price, k24.after_gst);
    }

    #[test]
    fn test_display_rows_are_rounded() {
        let calc = GoldRateCalculator::new(PricingSettings::default());
        let table = calc.compute(2000.0, 83.0).unwrap();
        let rows = calc.display_rows(&table).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].purity, Purity::K24);
        assert_eq!(rows[0].pre_tax, dec!(53370.2));
        assert_eq!(rows[0].after_import, dec!(58707.3));
        assert_eq!(rows[0].after_gst, dec!(60468.5));
        assert_eq!(rows[1].after_gst, dec!(55429.4));
        assert_eq!(rows[2].after_gst, dec!(45351.4));
    }

    #[test]
    fn test_gst_on_pre_duty_price() {
        let table = table(PricingSettings {
            gst_base: GstBase::PreDuty,
            ..PricingSettings::default()
        });
        let k24 = table.row(Purity::K24).unwrap();
        assert!((k24.after_gst - 60308.37041343238).abs() < EPS);
    }

    #[test]
    fn test_mcx_adjustment_stages() {
        let after = table(PricingSettings {
            mcx_adjustment_pct: 0.5,
            ..PricingSettings::default()
        });
        let k24 = after.row(Purity::K24).unwrap();
        assert!((k24.pre_tax - 53370.239303922455).abs() < EPS);
        assert!((k24.final_price - 60468.481131344146 * 1.005).abs() < EPS);

        let before = table(PricingSettings {
            mcx_adjustment_pct: 0.5,
            adjustment_stage: AdjustmentStage::BeforeTax,
            ..PricingSettings::default()
        });
        let k24 = before.row(Purity::K24).unwrap();
        assert!((k24.pre_tax - 53370.239303922455 * 1.005).abs() < EPS);
        assert_eq!(k24.final_price, k24.after_gst);

        // With a duty-inclusive GST base both stages land on the same final price.
        let a = after.row(Purity::K24).unwrap().final_price;
        let b = before.row(Purity::K24).unwrap().final_price;
        assert!((a - b).abs() < EPS);
    }

    #[test]
    fn test_zero_taxes_leave_price_unchanged() {
        let table = table(PricingSettings {
            import_duty_pct: 0.0,
            gst_pct: 0.0,
            ..PricingSettings::default()
        });
        for row in &table.rows {
            assert_eq!(row.pre_tax, row.after_gst);
        }
    }

    #[test]
    fn test_rejects_non_positive_inputs() {
        let calc = GoldRateCalculator::default();
        assert!(matches!(
            calc.compute(0.0, 83.0),
            Err(Error::Validation(ValidationError::InvalidInput(_)))
        ));
        assert!(calc.compute(2000.0, -1.0).is_err());
        assert!(calc.compute(f64::NAN, 83.0).is_err());
        assert!(calc.compute(2000.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_overflow_is_a_calculation_error() {
        let calc = GoldRateCalculator::default();
        assert!(matches!(
            calc.compute(f64::MAX, f64::MAX),
            Err(Error::Calculation(_))
        ));
    }
}
