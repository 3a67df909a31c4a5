//! Command-line interface orchestration for shima.
//!
//! The CLI offers a `label` command that loads a raster from an ASCII text
//! file or a Parquet column, labels it with the configured strategy and
//! prints the label grid.

mod commands;

pub use commands::{
    Cli, CliError, Command, ExecutionSummary, LabelCommand, LabelSource, ParquetArgs, ReduceArg,
    StrategyArg, TextArgs, render_summary, run_cli,
};

#[cfg(test)]
mod test_fixtures;
#[cfg(test)]
mod test_helpers;
