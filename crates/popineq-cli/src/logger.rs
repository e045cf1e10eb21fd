use std::io::{self, Write as _};

use anyhow::Context as _;
use log::{LevelFilter, Log, Metadata, Record};

/// Writes every enabled record to stderr as `[LEVEL] target: message`.
#[derive(Debug)]
struct StderrLogger {
    level: LevelFilter,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let mut stderr = io::stderr().lock();
        // nowhere left to report a failed write to stderr
        let _ = writeln!(
            stderr,
            "[{}] {}: {}",
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

/// Installs the stderr logger. Warnings are always shown, `verbose` adds
/// debug output from the statistics crates.
pub(crate) fn init(verbose: bool) -> anyhow::Result<()> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    log::set_boxed_logger(Box::new(StderrLogger { level }))
        .map(|()| log::set_max_level(level))
        .context("Failed to install logger")
}
