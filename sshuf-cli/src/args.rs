//! Command-line argument parsing

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

use sshuf_core::{CoreError, Delimiter, ShuffleConfig, WindowCap};

/// Shuffle a delimiter-separated record stream using bounded memory
///
/// Reads records from standard input (or FILE), shuffles them in a single
/// pass through a bounded window, and writes them to standard output in
/// randomized order. The total record count never needs to fit in memory.
#[derive(Debug, Parser)]
#[command(name = "sshuf", version, about)]
pub struct Cli {
    /// Input file ("-" or omitted: standard input)
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Write output to FILE instead of standard output
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Line delimiter is NUL, not newline
    #[arg(short = 'z', long)]
    pub zero_terminated: bool,

    /// Minimum window size in records before streaming output begins
    #[arg(
        long,
        value_name = "N",
        default_value_t = 1024,
        allow_negative_numbers = true
    )]
    pub window_min: i64,

    /// Maximum window size in records (default: unbounded)
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub window_max: Option<i64>,

    /// Seed the random generator for reproducible output
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Suppress log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Resolve the window and delimiter arguments into a validated config
    ///
    /// Window arguments are parsed as signed integers so that zero and
    /// negative values reach this validation (and exit code 1) instead of
    /// clap's usage error.
    pub fn shuffle_config(&self) -> Result<ShuffleConfig, CoreError> {
        if self.window_min <= 0 {
            return Err(CoreError::Configuration(
                "window-min must be a positive integer".into(),
            ));
        }

        let mut builder = ShuffleConfig::builder().window_min(self.window_min as usize);

        if let Some(max) = self.window_max {
            // A non-positive cap falls below any valid window-min and is
            // rejected by the builder with the usual diagnostic.
            builder = builder.window_max(WindowCap::Bounded(max.max(0) as usize));
        }

        if self.zero_terminated {
            builder = builder.delimiter(Delimiter::Nul);
        }

        builder.build()
    }

    /// The engine's random generator: seeded when `--seed` is given
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
                .init();
        }
    }
}
