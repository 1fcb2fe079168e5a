use crate::error::{AwamuError, Result};
use chrono::Duration;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_CURRENCY: &str = "KES";
pub const DEFAULT_PRODUCT_NAME: &str = "InstallmentPay Purchase";
pub const DEFAULT_EMERGENCY_PERIOD_SECS: i64 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// ISO currency code sent with hosted checkouts and ledger rows.
    pub currency: String,
    /// Product name used when the caller does not supply one.
    pub product_name: String,
    /// How long an emergency request blocks the next one.
    pub emergency_period: Duration,
    pub db_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
            product_name: DEFAULT_PRODUCT_NAME.to_string(),
            emergency_period: Duration::seconds(DEFAULT_EMERGENCY_PERIOD_SECS),
            db_path: None,
        }
    }
}

impl Config {
    /// Reads `AWAMU_*` variables, loading a `.env` file first if present.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let emergency_period = match lookup("AWAMU_EMERGENCY_PERIOD_SECS") {
            Some(raw) => {
                let secs: i64 = raw.trim().parse().map_err(|_| {
                    AwamuError::Config(format!(
                        "AWAMU_EMERGENCY_PERIOD_SECS must be a whole number of seconds, got {raw:?}"
                    ))
                })?;
                if secs < 0 {
                    return Err(AwamuError::Config(
                        "AWAMU_EMERGENCY_PERIOD_SECS cannot be negative".to_string(),
                    ));
                }
                Duration::try_seconds(secs).ok_or_else(|| {
                    AwamuError::Config(format!(
                        "AWAMU_EMERGENCY_PERIOD_SECS is too large, got {secs}"
                    ))
                })?
            }
            None => defaults.emergency_period,
        };

        Ok(Self {
            currency: lookup("AWAMU_CURRENCY")
                .map(|c| c.trim().to_uppercase())
                .filter(|c| !c.is_empty())
                .unwrap_or(defaults.currency),
            product_name: lookup("AWAMU_PRODUCT_NAME")
                .filter(|p| !p.trim().is_empty())
                .unwrap_or(defaults.product_name),
            emergency_period,
            db_path: lookup("AWAMU_DB_PATH")
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
        })
    }
}
