use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::window::{WindowId, WindowStateKind};

/// Reasons a window operation did not apply.
///
/// The public [`crate::window::WindowManager`] operations swallow these and
/// log them: stale ids and redundant transitions are routine in an event
/// driven UI. The `try_*` variants surface them to callers that care.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WmError {
    #[error("window {0} not found")]
    NotFound(WindowId),

    #[error("cannot {operation} window {id} while {state}")]
    InvalidTransition {
        id: WindowId,
        state: WindowStateKind,
        operation: &'static str,
    },

    #[error(
        "window {id} size {width}x{height} is below its minimum {min_width}x{min_height}"
    )]
    ConstraintViolation {
        id: WindowId,
        width: u32,
        height: u32,
        min_width: u32,
        min_height: u32,
    },
}

pub type WmResult<T> = Result<T, WmError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}
