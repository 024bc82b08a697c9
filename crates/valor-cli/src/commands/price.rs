//! Price command implementation.
//!
//! Prices one instrument kind, or every kind, from a market snapshot.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::Tabled;
use tracing::debug;

use valor_config::DispatchStrategy;
use valor_core::CalculationInput;
use valor_engine::PricingService;

use crate::cli::OutputFormat;
use crate::commands::{load_config, parse_dispatch, parse_kinds};
use crate::output::{format_price, print_header, print_output, print_warning};

/// Arguments for the price command.
#[derive(Args, Debug)]
pub struct PriceArgs {
    /// Instrument kind (option, future, forward, swap, warrant) or "all"
    #[arg(short, long)]
    pub kind: String,

    /// Spot price of the underlying
    #[arg(long, allow_negative_numbers = true)]
    pub spot: Decimal,

    /// Strike price
    #[arg(long, allow_negative_numbers = true)]
    pub strike: Decimal,

    /// Annualized volatility as a fraction (0.2 for 20%)
    #[arg(long, allow_negative_numbers = true)]
    pub volatility: Decimal,

    /// Time to expiry in years
    #[arg(long, allow_negative_numbers = true)]
    pub expiry: Decimal,

    /// Risk-free rate as a fraction
    #[arg(long, allow_negative_numbers = true)]
    pub rate: Decimal,

    /// Fixed leg rate as a fraction
    #[arg(long, allow_negative_numbers = true)]
    pub fixed_rate: Decimal,

    /// Floating leg rate as a fraction
    #[arg(long, allow_negative_numbers = true)]
    pub floating_rate: Decimal,

    /// Notional amount
    #[arg(long, allow_negative_numbers = true)]
    pub notional: Decimal,

    /// Dispatch strategy (registry, builtin, layered). Overrides the config file.
    #[arg(short, long)]
    pub dispatch: Option<String>,

    /// Engine configuration file (.toml or .json)
    #[arg(short, long, env = "VALOR_CONFIG")]
    pub config: Option<PathBuf>,
}

impl PriceArgs {
    fn input(&self) -> CalculationInput {
        CalculationInput::new(
            self.spot,
            self.strike,
            self.volatility,
            self.expiry,
            self.rate,
            self.fixed_rate,
            self.floating_rate,
            self.notional,
        )
    }
}

/// One priced instrument.
#[derive(Debug, Serialize, Tabled)]
pub struct PriceRow {
    #[tabled(rename = "Instrument")]
    pub kind: String,
    #[tabled(rename = "Price")]
    pub price: String,
}

/// Execute the price command.
pub fn execute(args: PriceArgs, format: OutputFormat) -> Result<()> {
    let kinds = parse_kinds(&args.kind)?;

    let mut config = load_config(args.config.as_deref())?;
    if let Some(ref dispatch) = args.dispatch {
        config.dispatch = parse_dispatch(dispatch)?;
    }
    let precision = config.price_precision;
    debug!(config = %config.name, dispatch = %config.dispatch, "loaded engine configuration");

    let service = PricingService::new(config)?;
    if service.config().dispatch == DispatchStrategy::Registry
        && service.registered_kinds().is_empty()
    {
        print_warning("no valuations registered; registry dispatch prices every kind at zero");
    }

    let input = args.input();
    let rows = kinds
        .into_iter()
        .map(|kind| -> Result<PriceRow> {
            let price = service.recalculate(kind, &input)?;
            Ok(PriceRow {
                kind: kind.name().to_string(),
                price: format_price(price, precision),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    if format == OutputFormat::Table {
        print_header(&format!(
            "Valuation Results ({} dispatch)",
            service.config().dispatch
        ));
    }
    print_output(&rows, format)
}
