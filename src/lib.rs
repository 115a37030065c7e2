//! # bs-calc-lib: Black-Scholes European Option Calculator
//!
//! `bs-calc-lib` evaluates the Black-Scholes closed-form price of a European call or put
//! and exposes every intermediate term of the calculation, so a front end can show the
//! step-by-step derivation next to the final price.
//!
//! ## Core Features
//!
//! - **Closed-form pricing**: d1, d2, N(±d1), N(±d2), call and put values in one pass
//! - **Type-safe selector**: [`OptionKind`] is a closed enum, parsed at the boundary
//! - **Fail fast**: non-positive spot, strike, time or volatility is rejected
//! - **Step-by-step report**: plain-text or LaTeX breakdown of a [`PricingResult`]
//! - **Batch pricing**: price many inputs at once, optionally loaded from CSV
//!
//! ## Quick Start
//!
//! ```rust
//! use bs_calc_lib::{price, OptionKind, PricingInput, ReportFormat, StepReport};
//!
//! let input = PricingInput::new(8.0, 9.0, 0.01, 0.25, 0.2, OptionKind::Call)?;
//! let result = price(&input)?;
//!
//! println!("d1 = {:.4}, d2 = {:.4}", result.d1, result.d2);
//! println!("{}", StepReport::from_result(&result).render(ReportFormat::Text, 4));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Configuration Presets
//!
//! The [`default_configs`] module offers display presets:
//! - `compact()`: price only
//! - `detailed()`: price plus a plain-text breakdown
//! - `latex()`: breakdown as a LaTeX `align*` block

// ================================================================================================
// MODULES
// ================================================================================================

pub mod error;
pub mod models;
pub mod pricing;
pub mod report;

// ================================================================================================
// IMPORTS
// ================================================================================================

use models::bs::BlackScholes;

// ================================================================================================
// PUBLIC RE-EXPORTS
// ================================================================================================

// Core types
pub use error::PricingError;
pub use pricing::types::{OptionKind, PricingInput, PricingResult};

// Black-Scholes model
pub use models::bs::{bs_call_price, bs_put_price, d1_d2, norm_cdf, price};
pub use models::traits::OptionPricer;
pub use models::utils::price_option;

// Configuration and batch helpers
pub use pricing::batch::{load_inputs_csv, load_inputs_from_reader, price_batch_with};
pub use pricing::config::{CalculatorConfig, DefaultInputs, DisplayConfig, ReportFormat};

// Step-by-step display
pub use report::{price_line, Step, StepReport};

// ================================================================================================
// DEFAULT CONFIGURATIONS
// ================================================================================================

/// Pre-configured calculator settings.
///
/// All presets share the default inputs of the calculator form (S0 = 8, K = 9,
/// r = 1%, T = 3 months, sigma = 20%, call) and differ only in how results are shown.
pub mod default_configs {
    use crate::pricing::config::CalculatorConfig;

    /// Headline price only, four decimals.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bs_calc_lib::default_configs;
    ///
    /// let config = default_configs::compact();
    /// assert!(!config.display.show_steps);
    /// ```
    pub fn compact() -> CalculatorConfig {
        CalculatorConfig::compact()
    }

    /// Price plus the plain-text step-by-step breakdown, six decimals.
    pub fn detailed() -> CalculatorConfig {
        CalculatorConfig::detailed()
    }

    /// Step-by-step breakdown rendered as LaTeX, six decimals.
    pub fn latex() -> CalculatorConfig {
        CalculatorConfig::latex()
    }
}

/// Price a batch of options with the Black-Scholes model.
///
/// Results are returned in input order. Each slot carries either the full
/// [`PricingResult`] or the [`PricingError`] that rejected that row; one bad row
/// never prevents the others from being priced.
///
/// # Example
///
/// ```rust
/// use bs_calc_lib::{price_batch, OptionKind, PricingInput};
///
/// let call = PricingInput::new(100.0, 100.0, 0.05, 1.0, 0.2, OptionKind::Call)?;
/// let results = price_batch(&[call, call.with_kind(OptionKind::Put)]);
///
/// let call_price = results[0].as_ref().unwrap().price;
/// let put_price = results[1].as_ref().unwrap().price;
/// assert!((call_price - put_price - (100.0 - 100.0 * (-0.05f64).exp())).abs() < 1e-9);
/// # Ok::<(), bs_calc_lib::PricingError>(())
/// ```
pub fn price_batch(inputs: &[PricingInput]) -> Vec<Result<PricingResult, PricingError>> {
    price_batch_with(&BlackScholes, inputs)
}
