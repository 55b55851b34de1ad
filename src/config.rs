use crate::error::{LedgerError, Result};
use crate::goals::LABEL_DECIMALS;
use crate::trend::TREND_WINDOW_MONTHS;
use serde::{Deserialize, Serialize};

const MAX_LABEL_DECIMALS: u32 = 10;

fn default_window_months() -> usize {
    TREND_WINDOW_MONTHS
}

fn default_label_decimals() -> u32 {
    LABEL_DECIMALS
}

/// Tunables for [`crate::Dashboard::compute_with_config`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardConfig {
    /// Months per trend page
    #[serde(default = "default_window_months")]
    pub window_months: usize,

    /// Decimal places on goal percentage labels
    #[serde(default = "default_label_decimals")]
    pub label_decimals: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            window_months: TREND_WINDOW_MONTHS,
            label_decimals: LABEL_DECIMALS,
        }
    }
}

impl DashboardConfig {
    pub fn validate(&self) -> Result<()> {
        if self.window_months == 0 {
            return Err(LedgerError::InvalidWindowSize(self.window_months));
        }
        if self.label_decimals > MAX_LABEL_DECIMALS {
            return Err(LedgerError::InvalidLabelDecimals(self.label_decimals));
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.window_months, 6);
        assert_eq!(config.label_decimals, 2);
        assert!(config.validate().is_ok());

        assert_eq!(DashboardConfig::from_json("{}").unwrap(), config);
    }

    #[test]
    fn test_validation() {
        assert!(matches!(
            DashboardConfig::from_json(r#"{"windowMonths": 0}"#),
            Err(LedgerError::InvalidWindowSize(0))
        ));
        assert!(matches!(
            DashboardConfig::from_json(r#"{"labelDecimals": 11}"#),
            Err(LedgerError::InvalidLabelDecimals(11))
        ));
        assert!(matches!(
            DashboardConfig::from_json("not json"),
            Err(LedgerError::Serialization(_))
        ));

        let config = DashboardConfig::from_json(r#"{"windowMonths": 12}"#).unwrap();
        assert_eq!(config.window_months, 12);
        assert_eq!(config.label_decimals, 2);
    }
}
