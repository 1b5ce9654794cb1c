/// Grams in one troy ounce.
pub const GRAMS_PER_TROY_OUNCE: f64 = 31.1034768;

/// Grams in the unit Indian bullion is quoted in.
pub const GRAMS_PER_QUOTE_UNIT: f64 = 10.0;

pub const DEFAULT_IMPORT_DUTY_PCT: f64 = 10.0;
pub const DEFAULT_GST_PCT: f64 = 3.0;
pub const DEFAULT_ROUND_TO: f64 = 0.1;
pub const DEFAULT_MCX_ADJUSTMENT_PCT: f64 = 0.0;

pub const DEFAULT_CACHE_TTL_SECS: u64 = 120;
pub const DEFAULT_COOLDOWN_SECS: u64 = 30;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_BACKOFF_MS: u64 = 500;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
