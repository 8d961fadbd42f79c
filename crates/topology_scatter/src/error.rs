//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! invalid configuration and colors, infeasible placement or connection constraints,
//! image encoding and IO.
use thiserror::Error;

use crate::topology::connection::ConnectionKind;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid color '{input}': {reason}")]
    InvalidColor { input: String, reason: String },

    #[error("no free space for node {index} after {attempts} attempts")]
    PlacementExhausted { index: usize, attempts: usize },

    #[error("no interface nodes were selected in any domain")]
    NoInterfaceNodes,

    #[error(
        "cannot build {kind} connection {placed} of {target}: no valid pair after {attempts} attempts"
    )]
    UnsatisfiableConstraint {
        kind: ConnectionKind,
        placed: usize,
        target: usize,
        attempts: usize,
    },

    #[error("image encoding failed: {0}")]
    Encoding(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
