//! Error taxonomy for the pricer.
//!
//! Only two things can go wrong when evaluating the closed-form formula: one of
//! the numeric inputs makes `d1` undefined, or a textual option selector names
//! something other than a call or a put. The second case can only surface while
//! parsing, since [`OptionKind`](crate::OptionKind) is a closed enum.

/// Errors raised by input validation and option-kind parsing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PricingError {
    #[error("invalid input: {field} = {value} ({reason})")]
    InvalidInput {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("unsupported option kind '{0}': expected 'call' or 'put'")]
    UnsupportedOptionKind(String),
}

impl PricingError {
    pub(crate) fn non_positive(field: &'static str, value: f64) -> Self {
        PricingError::InvalidInput {
            field,
            value,
            reason: "must be > 0",
        }
    }

    pub(crate) fn non_finite(field: &'static str, value: f64) -> Self {
        PricingError::InvalidInput {
            field,
            value,
            reason: "must be finite",
        }
    }

    pub(crate) fn overflow(field: &'static str, value: f64) -> Self {
        PricingError::InvalidInput {
            field,
            value,
            reason: "too extreme for the closed-form formula",
        }
    }

    /// Name of the offending input field, if this is an `InvalidInput` error.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            PricingError::InvalidInput { field, .. } => Some(*field),
            PricingError::UnsupportedOptionKind(_) => None,
        }
    }
}
