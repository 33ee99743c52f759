//! Startup: configuration, filesystem layout, logging and the preflight
//! that wires services together.
//!
//! # Components
//!
//! - [`config`] - `TUIMAN_*` environment configuration
//! - [`paths`] - Data directory layout
//! - [`logging`] - File-backed `tracing` subscriber
//! - [`preflight`] - Builds [`crate::app::Services`] or fails fatally
//!
//! # Usage
//!
//! ```ignore
//! use tuiman::startup::{run_preflight, AppConfig};
//!
//! let config = AppConfig::from_env()?;
//! let result = run_preflight(&config)?;
//! // result.services is ready for App::new
//! ```

pub mod config;
pub mod logging;
pub mod paths;
pub mod preflight;

pub use config::{AppConfig, SecretBackend};
pub use logging::init_logging;
pub use paths::AppPaths;
pub use preflight::{run_preflight, PreflightError, StartupResult};
