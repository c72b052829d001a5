//! Common logging initializer
//!
//! Everything goes to `stderr` so that `stdout` only carries results.
//!

use std::path::PathBuf;

use eyre::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};
use tracing_tree::HierarchicalLayer;

/// Map the number of `-v` into a default filter directive, used only when `RUST_LOG` is
/// not set.
///
pub fn verbosity_to_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initialise logging.
///
/// - `name` is used as the prefix of the log files
/// - `verbose` gives the default level
/// - `use_tree` switch the console output to a hierarchical display of spans
/// - `use_file` adds an hourly rolling file in the given directory
///
/// The returned guard must be kept alive for the file writer to flush.
///
pub fn init_logging(
    name: &'static str,
    verbose: u8,
    use_tree: bool,
    use_file: Option<PathBuf>,
) -> Result<Option<WorkerGuard>> {
    // Load filters from environment, fall back on verbosity
    //
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity_to_level(verbose)));

    // Do we want hierarchical output?
    //
    let (tree, compact) = if use_tree {
        let tree = HierarchicalLayer::new(2)
            .with_ansi(true)
            .with_span_retrace(true)
            .with_span_modes(true)
            .with_targets(true)
            .with_verbose_entry(true)
            .with_verbose_exit(true)
            .with_bracketed_fields(true);
        (Some(tree), None)
    } else {
        let compact = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact();
        (None, Some(compact))
    };

    // Log to file?
    //
    let (file, guard) = match use_file {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::hourly(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(file_appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    // Combine filters & exporters
    //
    tracing_subscriber::registry()
        .with(filter)
        .with(tree)
        .with(compact)
        .with(file)
        .try_init()?;

    Ok(guard)
}
