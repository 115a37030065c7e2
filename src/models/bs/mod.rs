// Closed-form Black-Scholes valuation of European calls and puts. Everything the
// step-by-step display needs (d1, d2 and the four cumulative-normal terms) is
// produced in one pass and returned alongside the price.

use std::f64::consts::SQRT_2;

use tracing::debug;

use crate::error::PricingError;
use crate::models::traits::OptionPricer;
use crate::pricing::types::{OptionKind, PricingInput, PricingResult};

/// Standard normal cumulative distribution function.
///
/// Uses `0.5 * erfc(-x / sqrt(2))` rather than `0.5 * (1 + erf(x / sqrt(2)))` so
/// the lower tail keeps full relative precision instead of cancelling to zero.
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * libm::erfc(-x / SQRT_2)
}

/// The standardized terms `(d1, d2)`.
///
/// Evaluated as `ln(S/K)/(sigma*sqrt(T)) + (r/sigma + sigma/2)*sqrt(T)`, which never
/// squares sigma and stays defined at the money when `sigma*sqrt(T)` underflows.
/// Extreme inputs can still produce non-finite terms; [`price`] rejects those.
#[allow(non_snake_case)]
pub fn d1_d2(S: f64, K: f64, r: f64, T: f64, sigma: f64) -> (f64, f64) {
    let sqrt_t = T.sqrt();
    let vol_sqrt_t = sigma * sqrt_t;
    let log_moneyness = (S / K).ln();
    let moneyness_term = if log_moneyness == 0.0 {
        0.0
    } else {
        log_moneyness / vol_sqrt_t
    };
    let d1 = moneyness_term + (r / sigma + 0.5 * sigma) * sqrt_t;
    (d1, d1 - vol_sqrt_t)
}

/// Price of a European call option under Black-Scholes assumptions.
#[allow(non_snake_case)]
pub fn bs_call_price(S: f64, K: f64, r: f64, T: f64, sigma: f64) -> Result<f64, PricingError> {
    let input = PricingInput::new(S, K, r, T, sigma, OptionKind::Call)?;
    Ok(price(&input)?.price)
}

/// Price of a European put option under Black-Scholes assumptions.
#[allow(non_snake_case)]
pub fn bs_put_price(S: f64, K: f64, r: f64, T: f64, sigma: f64) -> Result<f64, PricingError> {
    let input = PricingInput::new(S, K, r, T, sigma, OptionKind::Put)?;
    Ok(price(&input)?.price)
}

/// Evaluate the Black-Scholes formula for `input`.
///
/// Fails with [`PricingError::InvalidInput`] when spot, strike, time or
/// volatility is not strictly positive, when any field is not finite, or when
/// the inputs are so extreme that d1, d2, the discount factor or an option value
/// overflows.
pub fn price(input: &PricingInput) -> Result<PricingResult, PricingError> {
    input.validate()?;

    let PricingInput {
        spot,
        strike,
        rate,
        time_to_expiry: t,
        volatility,
        kind,
    } = *input;

    let (d1, d2) = d1_d2(spot, strike, rate, t, volatility);
    if !d1.is_finite() || !d2.is_finite() {
        return Err(PricingError::overflow("volatility", volatility));
    }

    let cdf_d1 = norm_cdf(d1);
    let cdf_d2 = norm_cdf(d2);
    let cdf_neg_d1 = norm_cdf(-d1);
    let cdf_neg_d2 = norm_cdf(-d2);

    let discounted_strike = strike * (-rate * t).exp();
    if !discounted_strike.is_finite() {
        return Err(PricingError::overflow("rate", rate));
    }
    let call = cdf_d1 * spot - cdf_d2 * discounted_strike;
    let put = discounted_strike * cdf_neg_d2 - spot * cdf_neg_d1;
    if !call.is_finite() || !put.is_finite() {
        return Err(PricingError::overflow("spot", spot));
    }

    let price = match kind {
        OptionKind::Call => call,
        OptionKind::Put => put,
    };

    debug!(%kind, spot, strike, rate, t, volatility, d1, d2, price, "priced option");

    Ok(PricingResult {
        kind,
        d1,
        d2,
        cdf_d1,
        cdf_d2,
        cdf_neg_d1,
        cdf_neg_d2,
        call,
        put,
        price,
    })
}

/// The closed-form Black-Scholes pricer.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlackScholes;

impl OptionPricer for BlackScholes {
    fn model_name(&self) -> &str {
        "black-scholes"
    }

    fn price(&self, input: &PricingInput) -> Result<PricingResult, PricingError> {
        price(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_input() -> PricingInput {
        PricingInput {
            spot: 8.0,
            strike: 9.0,
            rate: 0.01,
            time_to_expiry: 0.25,
            volatility: 0.2,
            kind: OptionKind::Call,
        }
    }

    #[test]
    fn test_norm_cdf_known_values() {
        assert!((norm_cdf(0.0) - 0.5).abs() < 1e-15);
        assert!((norm_cdf(1.0) - 0.841_344_746_068_542_9).abs() < 1e-12);
        assert!((norm_cdf(-1.959_963_984_540_054) - 0.025).abs() < 1e-12);
        assert_eq!(norm_cdf(f64::INFINITY), 1.0);
        assert_eq!(norm_cdf(f64::NEG_INFINITY), 0.0);
    }

    #[test]
    fn test_norm_cdf_deep_lower_tail_keeps_precision() {
        // Phi(-10) ~ 7.619853e-24; 1 + erf(...) would collapse this to 0
        let p = norm_cdf(-10.0);
        assert!(p > 0.0);
        assert!((p / 7.619_853_024_160_527e-24 - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_reference_scenario() {
        let result = price(&reference_input()).unwrap();

        assert!((result.d1 - (-1.102_830_356_563_835)).abs() < 1e-9, "d1 = {}", result.d1);
        assert!((result.d2 - (-1.202_830_356_563_835)).abs() < 1e-9, "d2 = {}", result.d2);
        assert!((result.call - 0.052_287_986_936_3).abs() < 1e-9, "call = {}", result.call);
        assert!((result.put - 1.029_816_088_513_4).abs() < 1e-9, "put = {}", result.put);
        assert_eq!(result.price, result.call);
        assert_eq!(result.kind, OptionKind::Call);
    }

    #[test]
    fn test_kind_selects_price() {
        let call = price(&reference_input()).unwrap();
        let put = price(&reference_input().with_kind(OptionKind::Put)).unwrap();

        assert_eq!(put.price, put.put);
        // Intermediate terms do not depend on the kind
        assert_eq!(call.d1, put.d1);
        assert_eq!(call.call, put.call);
        assert_eq!(call.put, put.put);
    }

    #[test]
    fn test_at_the_money_textbook_value() {
        // S = K = 100, r = 5%, T = 1, sigma = 20%: call 10.4506, put 5.5735
        let call = bs_call_price(100.0, 100.0, 0.05, 1.0, 0.2).unwrap();
        let put = bs_put_price(100.0, 100.0, 0.05, 1.0, 0.2).unwrap();
        assert!((call - 10.450_583_572_185_57).abs() < 1e-9);
        assert!((put - 5.573_526_022_256_971).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_inputs_are_rejected() {
        let mut input = reference_input();
        input.spot = 0.0;
        assert!(matches!(
            price(&input),
            Err(PricingError::InvalidInput { field: "spot", .. })
        ));

        input = reference_input();
        input.volatility = 0.0;
        assert!(matches!(
            price(&input),
            Err(PricingError::InvalidInput {
                field: "volatility",
                ..
            })
        ));

        assert!(bs_call_price(8.0, -9.0, 0.01, 0.25, 0.2).is_err());
        assert!(bs_put_price(8.0, 9.0, 0.01, -0.25, 0.2).is_err());
    }

    #[test]
    fn test_huge_volatility_prices_at_the_bounds() {
        // sigma^2 would overflow; the result must still be the sigma -> inf limit
        let input = PricingInput::new(100.0, 100.0, 0.05, 1.0, 1e160, OptionKind::Call).unwrap();
        let result = price(&input).unwrap();

        assert!(result.d1.is_finite() && result.d2.is_finite());
        assert!((result.call - 100.0).abs() < 1e-9, "call = {}", result.call);
        assert!((result.put - 100.0 * (-0.05f64).exp()).abs() < 1e-9, "put = {}", result.put);
    }

    #[test]
    fn test_overflowing_volatility_is_rejected() {
        let input = PricingInput::new(100.0, 100.0, 0.05, 100.0, 1e308, OptionKind::Call).unwrap();
        assert!(matches!(
            price(&input),
            Err(PricingError::InvalidInput {
                field: "volatility",
                ..
            })
        ));
    }

    #[test]
    fn test_overflowing_discount_factor_is_rejected() {
        let input = PricingInput::new(8.0, 9.0, -1.0, 1000.0, 0.2, OptionKind::Put).unwrap();
        assert!(matches!(
            price(&input),
            Err(PricingError::InvalidInput { field: "rate", .. })
        ));
    }

    #[test]
    fn test_at_the_money_with_vanishing_vol_and_time() {
        // sigma * sqrt(T) underflows to zero; d1 must not become 0/0
        let input = PricingInput::new(100.0, 100.0, 0.0, 1e-300, 1e-200, OptionKind::Call).unwrap();
        let result = price(&input).unwrap();

        assert_eq!(result.d1, 0.0);
        assert_eq!(result.d2, 0.0);
        assert!(result.call.abs() < 1e-12, "call = {}", result.call);
        assert!(result.put.abs() < 1e-12, "put = {}", result.put);
    }

    #[test]
    fn test_pricer_trait_matches_free_function() {
        let pricer = BlackScholes;
        assert_eq!(pricer.model_name(), "black-scholes");
        assert_eq!(
            pricer.price(&reference_input()).unwrap(),
            price(&reference_input()).unwrap()
        );
    }
}
