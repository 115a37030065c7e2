use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::error::PricingError;
use crate::models::traits::OptionPricer;
use crate::pricing::types::{PricingInput, PricingResult};

/// Price every input with `pricer`, keeping input order.
///
/// A rejected row does not stop the batch: its slot holds the error and the
/// remaining rows are still priced.
pub fn price_batch_with<P: OptionPricer + ?Sized>(
    pricer: &P,
    inputs: &[PricingInput],
) -> Vec<Result<PricingResult, PricingError>> {
    let mut results = Vec::with_capacity(inputs.len());

    for (row, input) in inputs.iter().enumerate() {
        let result = pricer.price(input);
        if let Err(ref e) = result {
            warn!(row, model = pricer.model_name(), "rejected input: {e}");
        }
        results.push(result);
    }

    results
}

/// Load pricing inputs from a CSV file with the header
/// `spot,strike,rate,time_to_expiry,volatility,kind`.
///
/// Rows are only parsed here; numeric validation happens when they are priced.
/// An unknown `kind` fails the load since it cannot be represented.
pub fn load_inputs_csv(path: impl AsRef<Path>) -> Result<Vec<PricingInput>> {
    let path = path.as_ref();
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let inputs = read_inputs(reader).with_context(|| format!("in {}", path.display()))?;
    info!(rows = inputs.len(), path = %path.display(), "loaded pricing inputs");
    Ok(inputs)
}

/// Same as [`load_inputs_csv`] but from any reader.
pub fn load_inputs_from_reader<R: std::io::Read>(rdr: R) -> Result<Vec<PricingInput>> {
    let reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(rdr);
    read_inputs(reader)
}

fn read_inputs<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Vec<PricingInput>> {
    let mut inputs = Vec::new();
    for (idx, record) in reader.deserialize().enumerate() {
        // +2: one for the header, one for 1-based line numbers
        let input: PricingInput =
            record.with_context(|| format!("bad pricing input on line {}", idx + 2))?;
        inputs.push(input);
    }
    Ok(inputs)
}
