//! Subcommand implementations.

use anyhow::Context;

use censo_cli::pipeline::run_batch;
use censo_cli::summary::{print_indicators, print_summary};
use censo_cli::types::{BatchResult, RunConfig};
use censo_standards::Registry;

use crate::cli::RunArgs;

pub fn run_run(args: &RunArgs) -> anyhow::Result<BatchResult> {
    if args.from_year > args.to_year {
        anyhow::bail!(
            "--from-year {} is after --to-year {}",
            args.from_year,
            args.to_year
        );
    }
    let registry = Registry::load().context("load mapping registry")?;
    let config = RunConfig {
        data_root: args.data_root.clone(),
        output_root: args.output_root.clone(),
        years: args.from_year..=args.to_year,
        only: args.only.clone(),
        skip_microdados: args.skip_microdados,
    };
    let result = run_batch(&config, &registry)?;
    print_summary(&result);
    Ok(result)
}

pub fn run_indicators() -> anyhow::Result<()> {
    let registry = Registry::load().context("load mapping registry")?;
    print_indicators(&registry);
    Ok(())
}
