use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PricingError;

/// European option kind.
///
/// Parsing is case-insensitive and accepts `call`/`c` and `put`/`p`. Any other
/// selector is rejected with [`PricingError::UnsupportedOptionKind`] before it
/// can reach the pricer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum OptionKind {
    #[default]
    Call,
    Put,
}

impl OptionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionKind::Call => "call",
            OptionKind::Put => "put",
        }
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionKind {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "call" | "c" => Ok(OptionKind::Call),
            "put" | "p" => Ok(OptionKind::Put),
            _ => Err(PricingError::UnsupportedOptionKind(s.to_string())),
        }
    }
}

impl TryFrom<String> for OptionKind {
    type Error = PricingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Inputs for a single Black-Scholes evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingInput {
    /// Price of the underlying asset
    pub spot: f64,
    /// Strike price
    pub strike: f64,
    /// Continuously compounded risk-free rate (may be negative)
    pub rate: f64,
    /// Time to expiration in years
    pub time_to_expiry: f64,
    /// Annualised volatility (as decimal, e.g., 0.2 for 20%)
    pub volatility: f64,
    /// Call or put
    pub kind: OptionKind,
}

impl PricingInput {
    /// Build a validated input.
    pub fn new(
        spot: f64,
        strike: f64,
        rate: f64,
        time_to_expiry: f64,
        volatility: f64,
        kind: OptionKind,
    ) -> Result<Self, PricingError> {
        let input = Self {
            spot,
            strike,
            rate,
            time_to_expiry,
            volatility,
            kind,
        };
        input.validate()?;
        Ok(input)
    }

    /// Same input with a different option kind.
    pub fn with_kind(self, kind: OptionKind) -> Self {
        Self { kind, ..self }
    }

    /// Check that every field is finite and that spot, strike, time and
    /// volatility are strictly positive. The rate only has to be finite.
    pub fn validate(&self) -> Result<(), PricingError> {
        let positive = [
            ("spot", self.spot),
            ("strike", self.strike),
            ("time_to_expiry", self.time_to_expiry),
            ("volatility", self.volatility),
        ];
        for (field, value) in positive {
            if !value.is_finite() {
                return Err(PricingError::non_finite(field, value));
            }
            if value <= 0.0 {
                return Err(PricingError::non_positive(field, value));
            }
        }
        if !self.rate.is_finite() {
            return Err(PricingError::non_finite("rate", self.rate));
        }
        Ok(())
    }
}

/// Result of a Black-Scholes evaluation, including every intermediate term.
///
/// Both the call and the put values are kept so that a step-by-step display
/// can be rendered from the same numbers as the headline price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricingResult {
    pub kind: OptionKind,
    pub d1: f64,
    pub d2: f64,
    /// N(d1)
    pub cdf_d1: f64,
    /// N(d2)
    pub cdf_d2: f64,
    /// N(-d1)
    pub cdf_neg_d1: f64,
    /// N(-d2)
    pub cdf_neg_d2: f64,
    /// Call option value
    pub call: f64,
    /// Put option value
    pub put: f64,
    /// `call` or `put`, depending on `kind`
    pub price: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_kind_parsing() {
        assert_eq!("call".parse::<OptionKind>().unwrap(), OptionKind::Call);
        assert_eq!(" PUT ".parse::<OptionKind>().unwrap(), OptionKind::Put);
        assert_eq!("c".parse::<OptionKind>().unwrap(), OptionKind::Call);
        assert_eq!("P".parse::<OptionKind>().unwrap(), OptionKind::Put);

        let err = "straddle".parse::<OptionKind>().unwrap_err();
        assert_eq!(err, PricingError::UnsupportedOptionKind("straddle".into()));
    }

    #[test]
    fn test_option_kind_display_round_trips() {
        for kind in [OptionKind::Call, OptionKind::Put] {
            assert_eq!(kind.to_string().parse::<OptionKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_input_validation() {
        assert!(PricingInput::new(8.0, 9.0, 0.01, 0.25, 0.2, OptionKind::Call).is_ok());
        // Negative rates are allowed
        assert!(PricingInput::new(8.0, 9.0, -0.02, 0.25, 0.2, OptionKind::Put).is_ok());

        let cases = [
            (0.0, 9.0, 0.01, 0.25, 0.2, "spot"),
            (-1.0, 9.0, 0.01, 0.25, 0.2, "spot"),
            (8.0, 0.0, 0.01, 0.25, 0.2, "strike"),
            (8.0, 9.0, 0.01, 0.0, 0.2, "time_to_expiry"),
            (8.0, 9.0, 0.01, 0.25, -0.2, "volatility"),
            (8.0, 9.0, f64::NAN, 0.25, 0.2, "rate"),
            (f64::INFINITY, 9.0, 0.01, 0.25, 0.2, "spot"),
        ];
        for (s, k, r, t, v, field) in cases {
            let err = PricingInput::new(s, k, r, t, v, OptionKind::Call).unwrap_err();
            assert_eq!(err.field(), Some(field), "unexpected error {err}");
        }
    }

    #[test]
    fn test_input_deserializes_kind_strictly() {
        let ok: PricingInput = toml::from_str(
            "spot = 8.0\nstrike = 9.0\nrate = 0.01\ntime_to_expiry = 0.25\nvolatility = 0.2\nkind = \"Put\"",
        )
        .unwrap();
        assert_eq!(ok.kind, OptionKind::Put);

        let bad = toml::from_str::<PricingInput>(
            "spot = 8.0\nstrike = 9.0\nrate = 0.01\ntime_to_expiry = 0.25\nvolatility = 0.2\nkind = \"straddle\"",
        );
        assert!(bad.is_err());
    }
}
