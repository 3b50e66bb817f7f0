//! lingo-t binary entrypoint kept minimal. Resolution lives in `args::resolve`.

mod args;

use std::fmt;
use std::sync::OnceLock;

use clap::Parser;

struct LingoTimer;

impl tracing_subscriber::fmt::time::FormatTime for LingoTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        let ts = chrono::Local::now()
            .format("%Y-%m-%d-T %H:%M:%S")
            .to_string();
        w.write_str(&ts)
    }
}

static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// What: Initialize the tracing subscriber.
///
/// Inputs:
/// - `level`: Default filter when `RUST_LOG` is unset.
/// - `log_file`: Optional file to append logs to.
///
/// Details:
/// - With a log file, writes go through a non-blocking appender whose guard is kept
///   for the life of the process.
/// - Without one, or when the file cannot be opened, logs go to stderr so stdout
///   only carries resolved strings.
fn init_logging(level: &str, log_file: Option<&std::path::Path>) {
    let env_filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level))
    };
    let open_result = log_file.map(|path| {
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map(|file| (file, path))
    });
    match open_result {
        Some(Ok((file, path))) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking)
                .with_timer(LingoTimer)
                .init();
            let _ = LOG_GUARD.set(guard);
            tracing::info!(path = %path.display(), "logging initialized");
        }
        other => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(true)
                .with_writer(std::io::stderr)
                .with_timer(LingoTimer)
                .init();
            if let Some(Err(e)) = other {
                tracing::warn!(error = %e, "failed to open log file; using stderr");
            }
        }
    }
}

#[tokio::main]
async fn main() {
    let args = args::Args::parse();
    init_logging(&args::determine_log_level(&args), args.log_file.as_deref());

    tracing::debug!(?args, "lingo-t starting");
    if let Err(err) = args::handle_resolve(&args).await {
        tracing::error!(error = %err, "Resolution failed");
        eprintln!("lingo-t: {err}");
        std::process::exit(1);
    }
}
