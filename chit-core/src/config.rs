//! Engine Configuration
//!
//! Commission rates are configuration, never hard-coded at call sites:
//! platform-level defaults live here (env-overridable), and a scheme may
//! carry its own override.
//!
//! Environment variables:
//! - `CHIT_DIRECT_RATE_BPS`: direct (L1) commission rate in basis points
//! - `CHIT_INDIRECT_RATE_BPS`: indirect (L2) commission rate in basis points

use crate::error::ChitResult;
use crate::types::commission::CommissionRates;

/// Platform-level engine configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    pub rates: CommissionRates,
}

impl EngineConfig {
    /// Create from environment variables, falling back to defaults.
    ///
    /// Unparseable values fall back to the default for that rate; a
    /// combined rate above 100% is rejected.
    pub fn from_env() -> ChitResult<Self> {
        let defaults = CommissionRates::default();

        let direct_bps = std::env::var("CHIT_DIRECT_RATE_BPS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or_else(|| defaults.direct_bps.value());
        let indirect_bps = std::env::var("CHIT_INDIRECT_RATE_BPS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or_else(|| defaults.indirect_bps.value());

        let rates = CommissionRates::new(direct_bps, indirect_bps);
        rates.validate()?;

        Ok(Self { rates })
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rates: CommissionRates::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.rates.direct_bps.value(), 500);
        assert_eq!(config.rates.indirect_bps.value(), 200);
    }
}
