//! Kinds command implementation.

use anyhow::Result;
use serde::Serialize;
use tabled::Tabled;

use valor_core::InstrumentKind;

use crate::cli::OutputFormat;
use crate::output::{print_header, print_output};

/// One supported instrument kind.
#[derive(Debug, Serialize, Tabled)]
pub struct KindRow {
    #[tabled(rename = "Kind")]
    pub name: &'static str,
    #[tabled(rename = "Formula")]
    pub formula: &'static str,
}

fn formula_text(kind: InstrumentKind) -> &'static str {
    match kind {
        InstrumentKind::Option => "max(0, S - K) + vol * T * 0.1",
        InstrumentKind::Future => "S * exp(r * T)",
        InstrumentKind::Forward => "S * (1 + r * T)",
        InstrumentKind::Swap => "N * (fixed - floating) * T",
        InstrumentKind::Warrant => "max(0, S - K) * 0.95",
        _ => "-",
    }
}

/// Execute the kinds command.
pub fn execute(format: OutputFormat) -> Result<()> {
    let rows: Vec<KindRow> = InstrumentKind::ALL
        .into_iter()
        .map(|kind| KindRow {
            name: kind.name(),
            formula: formula_text(kind),
        })
        .collect();

    match format {
        OutputFormat::Minimal => {
            for row in &rows {
                println!("{}", row.name);
            }
            Ok(())
        }
        OutputFormat::Table => {
            print_header("Supported Instrument Kinds");
            print_output(&rows, format)
        }
        OutputFormat::Json => print_output(&rows, format),
    }
}
