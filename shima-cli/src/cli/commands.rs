//! Command implementations and argument parsing for the shima CLI.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use shima_core::{
    ExecutionStrategy, LabelError, Labeller, LabellerBuilder, Labelling, RasterSource, ReduceMode,
};
use shima_providers_dense::{ParquetRasterError, ParquetRasterProvider};
use shima_providers_text::{TextRasterError, TextRasterProvider};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

const DEFAULT_CHUNKS: usize = 4;
const DEFAULT_BAND_ROWS: usize = 64;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "shima",
    about = "Label the 8-connected components of a binary raster."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Label a raster and print the label grid.
    Label(LabelCommand),
}

/// Options accepted by the `label` command.
#[derive(Debug, Args, Clone)]
pub struct LabelCommand {
    /// How the labelling phases are scheduled.
    #[arg(long, value_enum, default_value_t = StrategyArg::Auto)]
    pub strategy: StrategyArg,

    /// Row chunks used by the chunked strategy.
    #[arg(long, default_value_t = DEFAULT_CHUNKS)]
    pub chunks: usize,

    /// Rows per band during parallel pair collection.
    #[arg(long = "band-rows", default_value_t = DEFAULT_BAND_ROWS)]
    pub band_rows: usize,

    /// Size of a dedicated worker pool (defaults to the global rayon pool).
    #[arg(long)]
    pub threads: Option<usize>,

    /// How the parallel strategy applies unions.
    #[arg(long, value_enum, default_value_t = ReduceArg::Sequential)]
    pub reduce: ReduceArg,

    /// Also print per-component cell counts and bounding boxes.
    #[arg(long)]
    pub stats: bool,

    /// Raster source.
    #[command(subcommand)]
    pub source: LabelSource,
}

/// Execution strategies selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Pick from the raster size.
    Auto,
    /// Single-threaded pipeline.
    Sequential,
    /// Parallel pair collection and compression.
    Parallel,
    /// Independent row chunks reconciled at the seams.
    Chunked,
}

impl From<StrategyArg> for ExecutionStrategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Auto => Self::Auto,
            StrategyArg::Sequential => Self::Sequential,
            StrategyArg::Parallel => Self::Parallel,
            StrategyArg::Chunked => Self::Chunked,
        }
    }
}

/// Union modes selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReduceArg {
    /// Apply the merged pair list on one thread.
    Sequential,
    /// Apply pairs from every worker under one lock.
    Locked,
}

impl From<ReduceArg> for ReduceMode {
    fn from(value: ReduceArg) -> Self {
        match value {
            ReduceArg::Sequential => Self::Sequential,
            ReduceArg::Locked => Self::Locked,
        }
    }
}

/// Raster inputs supported by the CLI.
#[derive(Debug, Subcommand, Clone)]
pub enum LabelSource {
    /// Label an ASCII raster (`#`/`1` foreground, `.`/`0` background).
    Text(TextArgs),
    /// Label a Parquet column of `FixedSizeList<UInt8, W>` rows.
    Parquet(ParquetArgs),
}

/// Text raster arguments.
#[derive(Debug, Args, Clone)]
pub struct TextArgs {
    /// Path to the text raster, one row per line.
    pub path: PathBuf,

    /// Override name for the raster (defaults to the file name).
    #[arg(long)]
    pub name: Option<String>,
}

/// Parquet raster arguments.
#[derive(Debug, Args, Clone)]
pub struct ParquetArgs {
    /// Path to the Parquet file.
    pub path: PathBuf,

    /// Column containing `FixedSizeList<UInt8, W>` rows.
    #[arg(long)]
    pub column: String,

    /// Override name for the raster (defaults to the file name).
    #[arg(long)]
    pub name: Option<String>,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O failed while loading an input source.
    #[error("failed to open `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Parquet ingestion failed.
    #[error(transparent)]
    Parquet(#[from] ParquetRasterError),
    /// Text parsing failed.
    #[error(transparent)]
    Text(#[from] TextRasterError),
    /// Configuration or labelling failed.
    #[error(transparent)]
    Core(#[from] LabelError),
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Name reported by the raster source.
    pub raster: String,
    /// Labels produced for the raster.
    pub labelling: Labelling,
    /// Whether [`render_summary`] prints component statistics.
    pub stats: bool,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when loading or labelling fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use shima_cli::cli::{
/// #     Cli, Command, LabelCommand, LabelSource, ReduceArg, StrategyArg, TextArgs, run_cli,
/// # };
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "#.#\n...\n")?;
/// let cli = Cli {
///     command: Command::Label(LabelCommand {
///         strategy: StrategyArg::Sequential,
///         chunks: 4,
///         band_rows: 64,
///         threads: None,
///         reduce: ReduceArg::Sequential,
///         stats: false,
///         source: LabelSource::Text(TextArgs {
///             path: file.path().to_path_buf(),
///             name: None,
///         }),
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.labelling.component_count(), 2);
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Label(label) => {
            Span::current().record("command", field::display("label"));
            run_command(label)
        }
    }
}

#[instrument(
    name = "cli.execute",
    err,
    skip(command),
    fields(strategy = field::Empty, chunks = field::Empty, source = field::Empty),
)]
pub(super) fn run_command(command: LabelCommand) -> Result<ExecutionSummary, CliError> {
    let labeller = build_labeller(&command)?;

    let span = Span::current();
    span.record("strategy", field::debug(command.strategy));
    span.record("chunks", command.chunks);

    let summary = match command.source {
        LabelSource::Parquet(args) => {
            span.record("source", field::display("parquet"));
            label_parquet(&labeller, args, command.stats)?
        }
        LabelSource::Text(args) => {
            span.record("source", field::display("text"));
            label_text(&labeller, args, command.stats)?
        }
    };

    info!(
        raster = summary.raster.as_str(),
        components = summary.labelling.component_count(),
        "command completed"
    );
    Ok(summary)
}

pub(super) fn build_labeller(command: &LabelCommand) -> Result<Labeller, LabelError> {
    let builder = LabellerBuilder::new()
        .with_execution_strategy(command.strategy.into())
        .with_chunk_count(command.chunks)
        .with_band_rows(command.band_rows)
        .with_reduce_mode(command.reduce.into());
    let builder = match command.threads {
        Some(threads) => builder.with_worker_threads(threads),
        None => builder,
    };
    builder.build()
}

#[instrument(
    name = "cli.label_parquet",
    err,
    skip(labeller, args),
    fields(path = field::Empty, column = field::Empty, override_name = field::Empty),
)]
pub(super) fn label_parquet(
    labeller: &Labeller,
    args: ParquetArgs,
    stats: bool,
) -> Result<ExecutionSummary, CliError> {
    let ParquetArgs { path, column, name } = args;
    let span = Span::current();
    span.record("path", field::display(path.display()));
    span.record("column", field::display(&column));
    span.record(
        "override_name",
        field::display(name.as_deref().unwrap_or("<derived>")),
    );
    let chosen_name = derive_raster_name(&path, name.as_deref());
    let provider = ParquetRasterProvider::try_from_parquet_path(chosen_name, &path, &column)?;
    label_source(labeller, &provider, stats)
}

#[instrument(
    name = "cli.label_text",
    err,
    skip(labeller, args),
    fields(path = field::Empty, override_name = field::Empty),
)]
pub(super) fn label_text(
    labeller: &Labeller,
    args: TextArgs,
    stats: bool,
) -> Result<ExecutionSummary, CliError> {
    let TextArgs { path, name } = args;
    let span = Span::current();
    span.record("path", field::display(path.display()));
    span.record(
        "override_name",
        field::display(name.as_deref().unwrap_or("<derived>")),
    );
    let chosen_name = derive_raster_name(&path, name.as_deref());
    let reader = open_text_reader(&path)?;
    let provider = TextRasterProvider::try_from_reader(chosen_name, reader)?;
    label_source(labeller, &provider, stats)
}

fn label_source(
    labeller: &Labeller,
    source: &dyn RasterSource,
    stats: bool,
) -> Result<ExecutionSummary, CliError> {
    let labelling = labeller.run(source)?;
    info!(
        raster = source.name(),
        width = source.width(),
        height = source.height(),
        components = labelling.component_count(),
        "raster labelled"
    );
    Ok(ExecutionSummary {
        raster: source.name().to_owned(),
        labelling,
        stats,
    })
}

#[instrument(name = "cli.open_text_reader", err, fields(path = field::Empty))]
pub(super) fn open_text_reader(path: &Path) -> Result<BufReader<File>, CliError> {
    Span::current().record("path", field::display(path.display()));
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

pub(super) fn derive_raster_name(path: &Path, override_name: Option<&str>) -> String {
    if let Some(name) = override_name {
        return name.to_owned();
    }

    path.file_stem()
        .and_then(|value| value.to_str())
        .map_or_else(|| "raster".to_owned(), ToOwned::to_owned)
}

/// Renders `summary` to `writer` as a header followed by the label grid.
///
/// Background cells print as `.`; labels are right-aligned to the widest
/// label. With [`ExecutionSummary::stats`] set, one line per component
/// follows with its cell count and bounding box.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use shima_cli::cli::{ExecutionSummary, render_summary};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let summary = ExecutionSummary {
///     raster: "demo".into(),
///     labelling: shima_core::label(&[1, 0, 0, 0, 0, 1], 3, 2)?,
///     stats: false,
/// };
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// assert_eq!(
///     String::from_utf8(buffer)?,
///     "raster: demo\nsize: 3x2\ncomponents: 2\n1 . .\n. . 2\n",
/// );
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    let labelling = &summary.labelling;
    writeln!(writer, "raster: {}", summary.raster)?;
    writeln!(writer, "size: {}x{}", labelling.width(), labelling.height())?;
    writeln!(writer, "components: {}", labelling.component_count())?;

    let cell_width = labelling.component_count().max(1).to_string().len();
    for row in labelling.labels().chunks(labelling.width()) {
        let line: Vec<String> = row
            .iter()
            .map(|&label| match label {
                0 => format!("{:>cell_width$}", "."),
                other => format!("{other:>cell_width$}"),
            })
            .collect();
        writeln!(writer, "{}", line.join(" "))?;
    }

    if summary.stats {
        writeln!(writer, "label\tcells\tmin_row\tmin_col\tmax_row\tmax_col")?;
        for stats in labelling.component_stats() {
            let bounds = stats.bounds;
            writeln!(
                writer,
                "{}\t{}\t{}\t{}\t{}\t{}",
                stats.label,
                stats.cell_count,
                bounds.min_row,
                bounds.min_col,
                bounds.max_row,
                bounds.max_col
            )?;
        }
    }
    Ok(())
}
