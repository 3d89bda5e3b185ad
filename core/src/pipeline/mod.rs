//! # Pipeline Module
//!
//! The two end-to-end orchestrations and their shared plumbing:
//!
//! - **distribute** — scramble the secret, split it into shadows, hide
//!   each shadow in a cover, label and save the stegos.
//! - **recover** — read the labels, extract the shadows, solve the
//!   polynomial blocks, unscramble, save the secret.
//! - **covers** — deterministic enumeration of suitable cover bitmaps.
//!
//! Everything here is synchronous and single-pass; each run owns its
//! grids and buffers for the duration of the operation and releases them
//! on every exit path.

pub mod covers;
pub mod distribute;
pub mod recover;

use thiserror::Error;

use crate::raster::{BmpError, GridError};
use crate::sharing::{RecoverError, ShareError};
use crate::stego::StegoError;

pub use covers::{count_bmp_files, load_covers};
pub use distribute::Distributor;
pub use recover::Recoverer;

/// The stego file name for a 1-based share index: `stego1.bmp`,
/// `stego2.bmp`, …
pub fn stego_file_name(index: u16) -> String {
    format!("{}{}.bmp", crate::config::STEGO_FILE_PREFIX, index)
}


/// Any failure of a distribute or recover run. All variants are fatal for
/// the current operation; nothing here is retried.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Bmp(#[from] BmpError),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Share(#[from] ShareError),

    #[error(transparent)]
    Recover(#[from] RecoverError),

    #[error(transparent)]
    Stego(#[from] StegoError),

    /// The covers directory did not yield enough usable covers.
    #[error("only {found} suitable covers found, need {needed}")]
    NotEnoughCovers {
        /// Usable covers discovered.
        found: usize,
        /// Covers the access structure requires.
        needed: usize,
    },
}
