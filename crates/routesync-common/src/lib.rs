//! Common infrastructure for the routesync reconciliation driver.
//!
//! - [`options`]: [`DriverOptions`], the configuration passed at construction
//! - [`sink`]: the injected [`LogSink`] capability and its `tracing` backend
//! - [`color`]: ANSI painting for terminal output
//! - [`diff`]: line diffs between two route attribute sets
//! - [`logging`]: `tracing-subscriber` bootstrap for embedding programs
//!
//! # Example
//!
//! ```ignore
//! use routesync_common::{DriverOptions, LogRecord, LogSink, TracingSink, Color};
//!
//! let options = DriverOptions::default().with_dry_run(true);
//! let sink = TracingSink::new(options.color);
//! sink.log(&LogRecord::info("Create Route Table `vpc-1` > `public`").with_color(Color::Cyan));
//! ```

pub mod color;
pub mod diff;
pub mod logging;
pub mod options;
pub mod sink;

pub use color::Color;
pub use diff::{DiffLine, DiffLineKind, RouteDiff};
pub use logging::{LoggingConfig, LoggingError};
pub use options::DriverOptions;
pub use sink::{Level, LogRecord, LogSink, TracingSink};
