//! One end-to-end generation run: resolve seed and anchor, generate the
//! dataset, write the script, and report what was written.

use crate::config::{SeedConfig, DATETIME_FORMAT};
use crate::generator::Generator;
use crate::script::{write_script, ScriptOptions};
use crate::writer::StatementWriter;
use anyhow::Context;
use chrono::{NaiveDateTime, SubsecRound};
use flate2::write::GzEncoder;
use flate2::Compression;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Where the script goes
#[derive(Debug, Clone, PartialEq)]
pub enum OutputTarget {
    /// Write to a file; a `.gz` extension enables gzip compression
    File(PathBuf),
    Stdout,
    /// Generate and count, but write nothing
    Discard,
}

impl OutputTarget {
    /// `-` means stdout, anything else is a file path
    pub fn from_arg(arg: &Path) -> Self {
        if arg.as_os_str() == "-" {
            OutputTarget::Stdout
        } else {
            OutputTarget::File(arg.to_path_buf())
        }
    }

    fn describe(&self) -> String {
        match self {
            OutputTarget::File(path) => path.display().to_string(),
            OutputTarget::Stdout => "stdout".to_string(),
            OutputTarget::Discard => "(dry run)".to_string(),
        }
    }
}

/// Options for a single run
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub config: SeedConfig,
    pub output: OutputTarget,
    pub progress: bool,
}

/// Row counts and output facts for a finished run
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub output: String,
    pub seed: u64,
    pub anchor: String,
    pub explicit_ids: bool,
    pub products: usize,
    pub product_views: usize,
    pub orders: usize,
    pub order_items: usize,
    pub statements: u64,
    /// Uncompressed script size
    pub bytes_written: u64,
    pub elapsed_ms: u128,
}

enum Sink {
    Plain(File),
    Gzip(GzEncoder<File>),
    Stdout(io::Stdout),
    Discard(io::Sink),
}

impl Sink {
    fn open(target: &OutputTarget) -> anyhow::Result<Self> {
        Ok(match target {
            OutputTarget::File(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create output file {}", path.display()))?;
                if path.extension().is_some_and(|ext| ext == "gz") {
                    Sink::Gzip(GzEncoder::new(file, Compression::default()))
                } else {
                    Sink::Plain(file)
                }
            }
            OutputTarget::Stdout => Sink::Stdout(io::stdout()),
            OutputTarget::Discard => Sink::Discard(io::sink()),
        })
    }

    fn finish(self) -> io::Result<()> {
        match self {
            Sink::Plain(mut f) => f.flush(),
            Sink::Gzip(enc) => enc.finish().map(|_| ()),
            Sink::Stdout(mut s) => s.flush(),
            Sink::Discard(_) => Ok(()),
        }
    }
}

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Sink::Plain(f) => f.write(buf),
            Sink::Gzip(enc) => enc.write(buf),
            Sink::Stdout(s) => s.write(buf),
            Sink::Discard(s) => s.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Sink::Plain(f) => f.flush(),
            Sink::Gzip(enc) => enc.flush(),
            Sink::Stdout(s) => s.flush(),
            Sink::Discard(s) => s.flush(),
        }
    }
}

/// Configured anchor, or the current local time truncated to whole seconds
fn resolve_anchor(config: &SeedConfig) -> anyhow::Result<NaiveDateTime> {
    Ok(match config.anchor_time()? {
        Some(anchor) => anchor,
        None => chrono::Local::now().naive_local().trunc_subsecs(0),
    })
}

/// Run the generator and write the script
pub fn run(opts: RunOptions) -> anyhow::Result<Summary> {
    let started = Instant::now();
    let config = opts.config;

    let seed = config.seed.unwrap_or_else(rand::random);
    let anchor = resolve_anchor(&config)?;
    debug!(seed, anchor = %anchor.format(DATETIME_FORMAT), "starting generation");

    // Validation happens here, before the output is opened
    let mut generator = Generator::new(&config, seed, anchor)?;
    let data = generator.generate();

    let sink = Sink::open(&opts.output)?;
    let mut out = StatementWriter::new(sink);

    let progress_bar = if opts.progress {
        let pb = ProgressBar::new(data.orders.len() as u64);
        pb.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} orders ({percent}%) {msg}",
            )
            .unwrap()
            .progress_chars("█▓▒░  ")
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb.set_message("Writing script...");
        Some(pb)
    } else {
        None
    };

    let script_opts = ScriptOptions {
        anchor,
        seed,
        explicit_ids: config.explicit_ids,
        batch_size: config.views.batch_size,
    };
    write_script(&data, &script_opts, &mut out, progress_bar.as_ref())
        .with_context(|| format!("Failed to write {}", opts.output.describe()))?;

    if let Some(pb) = progress_bar {
        pb.finish_and_clear();
    }

    let statements = out.statements();
    let (sink, bytes_written) = out
        .finish()
        .with_context(|| format!("Failed to write {}", opts.output.describe()))?;
    sink.finish()
        .with_context(|| format!("Failed to finalize {}", opts.output.describe()))?;

    let summary = Summary {
        output: opts.output.describe(),
        seed,
        anchor: anchor.format(DATETIME_FORMAT).to_string(),
        explicit_ids: config.explicit_ids,
        products: data.products.len(),
        product_views: data.views.len(),
        orders: data.orders.len(),
        order_items: data.item_count(),
        statements,
        bytes_written,
        elapsed_ms: started.elapsed().as_millis(),
    };
    info!(
        statements = summary.statements,
        bytes = summary.bytes_written,
        "seed script written"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_resolve_anchor_uses_configured_time() {
        let config = SeedConfig {
            anchor: Some("2025-03-01 12:00:00".to_string()),
            ..Default::default()
        };
        assert_eq!(
            resolve_anchor(&config).unwrap().format(DATETIME_FORMAT).to_string(),
            "2025-03-01 12:00:00"
        );
    }

    #[test]
    fn test_resolve_anchor_now_has_no_subseconds() {
        let anchor = resolve_anchor(&SeedConfig::default()).unwrap();
        assert_eq!(anchor.nanosecond(), 0);
    }
}
