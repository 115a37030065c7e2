pub mod bs;

/// Common traits used by option pricers
pub mod traits {
    use crate::error::PricingError;
    use crate::pricing::types::{PricingInput, PricingResult};

    /// A model that turns a [`PricingInput`] into a [`PricingResult`].
    pub trait OptionPricer: Send + Sync {
        /// Returns the name of the model (e.g., "black-scholes")
        fn model_name(&self) -> &str;

        fn price(&self, input: &PricingInput) -> Result<PricingResult, PricingError>;
    }
}

/// Utility functions for option pricing
pub mod utils {
    use crate::error::PricingError;
    use crate::models::bs;
    use crate::pricing::types::{OptionKind, PricingInput};

    /// Price an option from raw scalars and a textual kind selector.
    ///
    /// The selector is parsed before any arithmetic happens, so `"straddle"` fails
    /// with [`PricingError::UnsupportedOptionKind`] and a bad number fails with
    /// [`PricingError::InvalidInput`].
    pub fn price_option(
        spot: f64,
        strike: f64,
        rate: f64,
        time_to_expiry: f64,
        volatility: f64,
        option_type: &str,
    ) -> Result<f64, PricingError> {
        let kind: OptionKind = option_type.parse()?;
        let input = PricingInput::new(spot, strike, rate, time_to_expiry, volatility, kind)?;
        Ok(bs::price(&input)?.price)
    }
}
