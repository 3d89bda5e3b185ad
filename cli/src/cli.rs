//! # CLI Interface
//!
//! Defines the command-line argument structure for `umbra` using `clap`
//! derive. The surface is flag-driven rather than subcommand-driven:
//! exactly one of `--d` (distribute) or `--r` (recover) selects the
//! operation, and the remaining flags parameterize it.

use clap::{ArgGroup, Parser};
use std::path::PathBuf;

/// Umbra — threshold secret image sharing with steganographic
/// concealment.
///
/// Distribute splits a secret bitmap into n shadows hidden inside cover
/// images; recover rebuilds the secret from any k of the resulting
/// stego images.
#[derive(Parser, Debug)]
#[command(
    name = "umbra",
    about = "Threshold secret image sharing with steganographic concealment",
    version,
    group(ArgGroup::new("mode").required(true).args(["distribute", "recover"]))
)]
pub struct UmbraCli {
    /// Distribute: split the secret image and hide the shadows.
    #[arg(long = "d")]
    pub distribute: bool,

    /// Recover: rebuild the secret image from stego images.
    #[arg(long = "r")]
    pub recover: bool,

    /// The secret bitmap: input file when distributing, output file when
    /// recovering.
    #[arg(long)]
    pub secret: PathBuf,

    /// Reconstruction threshold, 2 to 10.
    #[arg(long)]
    pub k: u8,

    /// Total number of shares. Distribute default: the number of .bmp
    /// files in --dir. Recover always reads exactly k stegos.
    #[arg(long)]
    pub n: Option<u16>,

    /// Covers directory when distributing; stego directory when
    /// recovering (expects stego1.bmp, stego2.bmp, ...).
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,

    /// Output directory for stego images when distributing.
    #[arg(long, default_value = umbra_core::config::DEFAULT_OUTPUT_DIR)]
    pub out: PathBuf,

    /// Scramble seed for distribution, 0 to 65535. Drawn at random when
    /// omitted; pass one for reproducible runs.
    #[arg(long)]
    pub seed: Option<u16>,

    /// Default log filter when RUST_LOG is not set.
    #[arg(long, env = "UMBRA_LOG", default_value = "info")]
    pub log_level: String,
}
