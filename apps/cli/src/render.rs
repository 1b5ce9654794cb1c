//! Plain-text rendering of snapshots.

use std::fmt::Write;

use goldrate_core::pricing::DisplayRow;
use goldrate_core::{AdjustmentStage, PricingSettings, RateSnapshot};
use rust_decimal::Decimal;

/// Rupee amount with thousands grouping: `1234567.5` → `₹ 1,234,567.5`.
pub fn format_inr(amount: Decimal) -> String {
    let text = amount.to_string();
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("₹ {}{}.{}", sign, grouped, frac),
        None => format!("₹ {}{}", sign, grouped),
    }
}

pub fn render_snapshot(snapshot: &RateSnapshot, pricing: &PricingSettings) -> String {
    let mut out = String::new();
    let headline = if snapshot.from_cache {
        "Used cached rates (run `fetch` to refresh)."
    } else {
        "Fetched live prices."
    };

    let _ = writeln!(out, "{}", headline);
    let _ = writeln!(out, "Source: {}", snapshot.xau_usd.source_name());
    let _ = writeln!(out, "XAU (USD per troy oz): {}", snapshot.xau_usd.quantity());
    let _ = writeln!(
        out,
        "USD → INR: {} ({})",
        snapshot.usd_inr.quantity(),
        snapshot.usd_inr.source_name()
    );
    let _ = writeln!(
        out,
        "Last update: {}",
        snapshot.fetched_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    for row in &snapshot.display {
        let _ = writeln!(out);
        render_row(&mut out, row, pricing);
    }

    out
}

fn render_row(out: &mut String, row: &DisplayRow, pricing: &PricingSettings) {
    let _ = writeln!(out, "{}", row.purity.label());
    let _ = writeln!(out, "- Pre-tax: {}", format_inr(row.pre_tax));
    let _ = writeln!(
        out,
        "- After import duty ({}%): {}",
        pricing.import_duty_pct,
        format_inr(row.after_import)
    );
    let _ = writeln!(
        out,
        "- After GST ({}%): {}",
        pricing.gst_pct,
        format_inr(row.after_gst)
    );
    if pricing.mcx_adjustment_pct != 0.0 && pricing.adjustment_stage == AdjustmentStage::AfterTax
    {
        let _ = writeln!(
            out,
            "- After MCX adjustment ({}%): {}",
            pricing.mcx_adjustment_pct,
            format_inr(row.final_price)
        );
    }
}
