//! Error types for the pointer input manager

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PointerError {
    #[error("failed to open pointer device {node}: {reason}")]
    DeviceOpen { node: String, reason: String },

    #[error("device {0} has no pointer capability")]
    NotAPointer(String),

    #[error("device discovery unavailable: {0}")]
    Discovery(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PointerError>;
