//! Engine configuration.
//!
//! Deserialized from TOML at startup, validated before use:
//!
//! ```toml
//! registry_id = 1
//!
//! [default_fee]
//! numerator = 30
//! denominator = 10000
//! ```

use crate::error::AmmError;
use serde::{Deserialize, Serialize};

/// Rational trading fee, `numerator / denominator` of each swap's input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeConfig {
    pub numerator: u64,
    pub denominator: u64,
}

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Identifier stamped onto every pool this registry creates.
    pub registry_id: u64,
    /// Fee applied to newly registered pools. `None` leaves a new pool
    /// without a fee until `set_fee` configures one.
    #[serde(default)]
    pub default_fee: Option<FeeConfig>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            registry_id: 1,
            default_fee: None,
        }
    }
}

impl EngineConfig {
    pub fn with_default_fee(registry_id: u64, numerator: u64, denominator: u64) -> Self {
        Self {
            registry_id,
            default_fee: Some(FeeConfig {
                numerator,
                denominator,
            }),
        }
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(raw: &str) -> Result<Self, AmmError> {
        let config: Self =
            toml::from_str(raw).map_err(|e| AmmError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AmmError> {
        if let Some(fee) = self.default_fee {
            if fee.numerator == 0 || fee.denominator <= fee.numerator {
                return Err(AmmError::FeeOutOfRange {
                    numerator: fee.numerator,
                    denominator: fee.denominator,
                });
            }
        }
        Ok(())
    }
}
