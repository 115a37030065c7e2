// src/main.rs
//
// Command-line front end for the Black-Scholes calculator. Inputs come from the
// command line, falling back to the config file and then to the built-in
// defaults of the calculator form.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use bs_calc_lib::{
    load_inputs_csv, price, price_batch, price_line, CalculatorConfig, OptionKind, PricingInput,
    ReportFormat, StepReport,
};

#[derive(Parser)]
#[command(name = "bs-calc")]
#[command(about = "Black-Scholes calculator for European calls and puts")]
struct Args {
    /// Path to configuration file (TOML)
    #[arg(long, short)]
    config: Option<String>,

    /// Price of the underlying asset
    #[arg(long)]
    spot: Option<f64>,

    /// Strike price
    #[arg(long)]
    strike: Option<f64>,

    /// Risk-free interest rate (decimal, e.g. 0.01)
    #[arg(long, allow_negative_numbers = true)]
    rate: Option<f64>,

    /// Time to option expiration in years
    #[arg(long)]
    time: Option<f64>,

    /// Volatility (decimal, e.g. 0.2)
    #[arg(long)]
    volatility: Option<f64>,

    /// Option type: call or put
    #[arg(long)]
    kind: Option<OptionKind>,

    /// Show the step-by-step calculation
    #[arg(long, conflicts_with = "price_only")]
    steps: bool,

    /// Show only the final price
    #[arg(long)]
    price_only: bool,

    /// Render the step-by-step calculation as LaTeX (same as --format latex)
    #[arg(long, conflicts_with = "format")]
    latex: bool,

    /// Step-by-step output format: text or latex
    #[arg(long)]
    format: Option<ReportFormat>,

    /// Number of decimals to display
    #[arg(long)]
    precision: Option<usize>,

    /// Price every row of a CSV file (spot,strike,rate,time_to_expiry,volatility,kind)
    #[arg(long)]
    batch: Option<String>,

    /// Enable debug logging
    #[arg(long, short)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&args) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => CalculatorConfig::from_file(path)?,
        None => CalculatorConfig::default(),
    };
    apply_overrides(&mut config, args);
    config.validate()?;
    debug!(?config, "effective configuration");

    match &args.batch {
        Some(path) => run_batch(path, &config),
        None => run_single(&config),
    }
}

/// Command-line values win over the config file.
fn apply_overrides(config: &mut CalculatorConfig, args: &Args) {
    let defaults = &mut config.defaults;
    if let Some(v) = args.spot {
        defaults.spot = v;
    }
    if let Some(v) = args.strike {
        defaults.strike = v;
    }
    if let Some(v) = args.rate {
        defaults.rate = v;
    }
    if let Some(v) = args.time {
        defaults.time_to_expiry = v;
    }
    if let Some(v) = args.volatility {
        defaults.volatility = v;
    }
    if let Some(kind) = args.kind {
        defaults.kind = kind;
    }

    let display = &mut config.display;
    let format = if args.latex {
        Some(ReportFormat::Latex)
    } else {
        args.format
    };
    if args.steps || format.is_some() {
        display.show_steps = true;
    }
    if args.price_only {
        display.show_steps = false;
    }
    if let Some(format) = format {
        display.format = format;
    }
    if let Some(p) = args.precision {
        display.precision = p;
    }
}

fn run_single(config: &CalculatorConfig) -> Result<()> {
    let input: PricingInput = config
        .defaults
        .to_input()
        .context("cannot price with the given inputs")?;
    let result = price(&input)?;
    let display = &config.display;

    if display.show_steps {
        let report = StepReport::from_result(&result);
        println!("{}", report.render(display.format, display.precision));
    } else {
        println!("{}", price_line(result.kind, result.price, display.precision));
    }
    Ok(())
}

fn run_batch(path: &str, config: &CalculatorConfig) -> Result<()> {
    let inputs = load_inputs_csv(path)?;
    let precision = config.display.precision;

    for (row, result) in price_batch(&inputs).into_iter().enumerate() {
        match result {
            Ok(r) => println!("row {}: {}", row + 1, price_line(r.kind, r.price, precision)),
            Err(e) => println!("row {}: error: {}", row + 1, e),
        }
    }
    Ok(())
}
