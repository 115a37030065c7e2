use std::path::Path;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

use crate::error::PricingError;
use crate::pricing::types::{OptionKind, PricingInput};

/// Largest number of decimals that still carries information for an `f64`
pub const MAX_PRECISION: usize = 17;

/// Inputs used when the caller does not supply a value.
///
/// The defaults are the initial values of the original calculator form:
/// an out-of-the-money three-month call.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct DefaultInputs {
    pub spot: f64,
    pub strike: f64,
    pub rate: f64,
    pub time_to_expiry: f64,
    pub volatility: f64,
    pub kind: OptionKind,
}

impl Default for DefaultInputs {
    fn default() -> Self {
        Self {
            spot: 8.0,
            strike: 9.0,
            rate: 0.01,
            time_to_expiry: 3.0 / 12.0,
            volatility: 0.2,
            kind: OptionKind::Call,
        }
    }
}

impl DefaultInputs {
    /// Validated [`PricingInput`] built from these defaults.
    pub fn to_input(&self) -> Result<PricingInput, PricingError> {
        PricingInput::new(
            self.spot,
            self.strike,
            self.rate,
            self.time_to_expiry,
            self.volatility,
            self.kind,
        )
    }
}

/// How the step-by-step breakdown is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Latex,
}

impl FromStr for ReportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "latex" => Ok(ReportFormat::Latex),
            other => Err(anyhow!("unknown report format '{}': expected 'text' or 'latex'", other)),
        }
    }
}

/// Display settings
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct DisplayConfig {
    /// Number of decimals shown for every value
    #[serde(default = "default_precision")]
    pub precision: usize,

    /// Print the step-by-step calculation before the price
    #[serde(default = "default_show_steps")]
    pub show_steps: bool,

    #[serde(default)]
    pub format: ReportFormat,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            precision: default_precision(),
            show_steps: default_show_steps(),
            format: ReportFormat::default(),
        }
    }
}

/// Main configuration struct for the calculator
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct CalculatorConfig {
    #[serde(default)]
    pub defaults: DefaultInputs,

    #[serde(default)]
    pub display: DisplayConfig,
}

impl CalculatorConfig {
    /// Price only, four decimals
    pub fn compact() -> Self {
        Self {
            defaults: DefaultInputs::default(),
            display: DisplayConfig {
                precision: 4,
                show_steps: false,
                format: ReportFormat::Text,
            },
        }
    }

    /// Price plus the plain-text step-by-step breakdown
    pub fn detailed() -> Self {
        Self {
            defaults: DefaultInputs::default(),
            display: DisplayConfig {
                precision: 6,
                show_steps: true,
                format: ReportFormat::Text,
            },
        }
    }

    /// Step-by-step breakdown as a LaTeX block
    pub fn latex() -> Self {
        Self {
            defaults: DefaultInputs::default(),
            display: DisplayConfig {
                precision: 6,
                show_steps: true,
                format: ReportFormat::Latex,
            },
        }
    }

    /// Parse a TOML document. Missing sections and fields fall back to defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: CalculatorConfig =
            toml::from_str(contents).context("failed to parse calculator config")?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml_str(&contents).with_context(|| format!("in {}", path.display()))
    }

    /// Check settings that serde cannot express. Call again after applying
    /// overrides from another source.
    pub fn validate(&self) -> Result<()> {
        if self.display.precision > MAX_PRECISION {
            return Err(anyhow!(
                "display.precision ({}) must be at most {}",
                self.display.precision,
                MAX_PRECISION
            ));
        }
        Ok(())
    }
}

fn default_precision() -> usize {
    6
}

fn default_show_steps() -> bool {
    true
}
