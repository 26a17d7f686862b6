//! Shuffle configuration

use crate::error::{CoreError, Result};

/// Default configuration constants
pub mod defaults {
    /// Default minimum window depth in records
    pub const WINDOW_MIN: usize = 1024;

    /// Read chunk size in bytes (performance parameter, not a correctness one)
    pub const READ_CHUNK_SIZE: usize = 64 * 1024;
}

/// Record delimiter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    /// Records end with a newline (`\n`)
    #[default]
    Newline,
    /// Records end with a NUL byte (`\0`)
    Nul,
}

impl Delimiter {
    /// The delimiter byte
    pub fn as_byte(self) -> u8 {
        match self {
            Delimiter::Newline => b'\n',
            Delimiter::Nul => b'\0',
        }
    }
}

/// Upper bound on the window buffer size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowCap {
    /// The window may grow without limit
    #[default]
    Unbounded,
    /// The window holds at most this many records
    Bounded(usize),
}

impl WindowCap {
    /// Clamp a value to the cap
    pub fn clamp(self, value: usize) -> usize {
        match self {
            WindowCap::Unbounded => value,
            WindowCap::Bounded(max) => value.min(max),
        }
    }

    /// Whether a window of `len` records fits under the cap
    pub fn admits(self, len: usize) -> bool {
        match self {
            WindowCap::Unbounded => true,
            WindowCap::Bounded(max) => len <= max,
        }
    }
}

/// Validated parameters for one shuffle run
#[derive(Debug, Clone)]
pub struct ShuffleConfig {
    pub(crate) window_min: usize,
    pub(crate) window_max: WindowCap,
    pub(crate) delimiter: Delimiter,
}

impl Default for ShuffleConfig {
    fn default() -> Self {
        Self {
            window_min: defaults::WINDOW_MIN,
            window_max: WindowCap::Unbounded,
            delimiter: Delimiter::Newline,
        }
    }
}

impl ShuffleConfig {
    /// Create a configuration builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Minimum number of records buffered before any output begins
    pub fn window_min(&self) -> usize {
        self.window_min
    }

    /// Hard cap on the window buffer size
    pub fn window_max(&self) -> WindowCap {
        self.window_max
    }

    /// Record delimiter
    pub fn delimiter(&self) -> Delimiter {
        self.delimiter
    }

    /// Validate the configuration
    pub(crate) fn validate(&self) -> Result<()> {
        if self.window_min == 0 {
            return Err(CoreError::Configuration(
                "window-min must be a positive integer".into(),
            ));
        }

        if let WindowCap::Bounded(max) = self.window_max {
            if max < self.window_min {
                return Err(CoreError::Configuration(format!(
                    "window-min ({}) cannot be greater than window-max ({max})",
                    self.window_min
                )));
            }
        }

        Ok(())
    }
}

/// Fluent builder for [`ShuffleConfig`]
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    window_min: Option<usize>,
    window_max: Option<WindowCap>,
    delimiter: Option<Delimiter>,
}

impl ConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum buffered depth in records
    pub fn window_min(mut self, records: usize) -> Self {
        self.window_min = Some(records);
        self
    }

    /// Set the maximum window size in records
    pub fn window_max(mut self, cap: WindowCap) -> Self {
        self.window_max = Some(cap);
        self
    }

    /// Set the record delimiter
    pub fn delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<ShuffleConfig> {
        let mut config = ShuffleConfig::default();

        if let Some(min) = self.window_min {
            config.window_min = min;
        }

        if let Some(max) = self.window_max {
            config.window_max = max;
        }

        if let Some(delimiter) = self.delimiter {
            config.delimiter = delimiter;
        }

        config.validate()?;
        Ok(config)
    }
}
