//! Config command implementation.
//!
//! Prints the effective engine configuration.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use valor_config::EngineConfig;

use crate::cli::OutputFormat;
use crate::commands::load_config;
use crate::output::{print_header, print_output, KeyValue};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Engine configuration file (.toml or .json). Defaults are shown if omitted.
    #[arg(short, long, env = "VALOR_CONFIG")]
    pub config: Option<PathBuf>,
}

fn settings(config: &EngineConfig) -> Vec<KeyValue> {
    vec![
        KeyValue::new("name", config.name.clone()),
        KeyValue::new("description", config.description.clone().unwrap_or_default()),
        KeyValue::new("dispatch", config.dispatch.as_str()),
        KeyValue::new(
            "preload_standard_formulas",
            config.preload_standard_formulas.to_string(),
        ),
        KeyValue::new(
            "price_precision",
            config
                .price_precision
                .map_or_else(|| "none".to_string(), |p| p.to_string()),
        ),
    ]
}

/// Execute the config command.
///
/// `minimal` prints the configuration as TOML, ready to save to a file.
pub fn execute(args: ConfigArgs, format: OutputFormat) -> Result<()> {
    let config = load_config(args.config.as_deref())?;

    match format {
        OutputFormat::Table => {
            print_header("Engine Configuration");
            print_output(&settings(&config), format)?;
        }
        OutputFormat::Json => println!("{}", config.to_json_string()?),
        OutputFormat::Minimal => print!("{}", config.to_toml_string()?),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use valor_config::DispatchStrategy;

    #[test]
    fn test_settings_rows() {
        let config = EngineConfig::new("desk")
            .with_dispatch(DispatchStrategy::Builtin)
            .with_price_precision(4);
        let rows = settings(&config);

        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].value, "desk");
        assert_eq!(rows[2].value, "builtin");
        assert_eq!(rows[4].value, "4");
    }
}
