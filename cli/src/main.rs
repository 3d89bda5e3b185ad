// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Umbra CLI
//!
//! Entry point for the `umbra` binary. Parses arguments, initializes
//! logging, and runs one of the two pipelines:
//!
//! - `--d` — distribute: split a secret bitmap into n shadows and hide
//!   them in cover images as `stego1.bmp … stegoN.bmp`.
//! - `--r` — recover: rebuild the secret from `stego1.bmp … stegoK.bmp`.
//!
//! Exit code 0 on success, 1 on any failure: bad parameters, unreadable
//! inputs, insufficient covers, or an unrecoverable shadow set.

mod cli;
mod logging;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use umbra_core::pipeline::count_bmp_files;
use umbra_core::raster::load_bmp;
use umbra_core::{Distributor, Recoverer, ThresholdConfig};

use cli::UmbraCli;
use logging::LogFormat;

fn main() -> ExitCode {
    let args = UmbraCli::parse();

    let log_filter = format!(
        "umbra_cli={level},umbra_core={level}",
        level = args.log_level
    );
    logging::init_logging(&log_filter, LogFormat::Pretty);

    let outcome = if args.distribute {
        run_distribute(&args)
    } else {
        run_recover(&args)
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Distribute: load the secret, resolve n, run the pipeline.
fn run_distribute(args: &UmbraCli) -> Result<()> {
    let secret = load_bmp(&args.secret)
        .with_context(|| format!("could not load secret image {}", args.secret.display()))?;

    // When --n is omitted, every .bmp in the covers directory is a share.
    let n = match args.n {
        Some(n) => n,
        None => {
            let count = count_bmp_files(&args.dir).with_context(|| {
                format!("could not scan covers directory {}", args.dir.display())
            })?;
            u16::try_from(count).unwrap_or(u16::MAX)
        }
    };

    let config = ThresholdConfig::new(args.k, n).context("invalid access structure")?;

    let distributor = match args.seed {
        Some(seed) => Distributor::with_seed(config, seed),
        None => Distributor::new(config),
    };
    let written = distributor
        .run(secret, &args.dir, &args.out)
        .context("distribution failed")?;

    println!(
        "Distributed {} shares into {}",
        written.len(),
        args.out.display()
    );
    Ok(())
}

/// Recover: read k stegos from the directory, write the secret.
fn run_recover(args: &UmbraCli) -> Result<()> {
    let recovered = Recoverer::new(args.k)
        .context("invalid access structure")?
        .run(&args.dir, &args.secret)
        .context("recovery failed")?;

    println!(
        "Recovered {}x{} image into {}",
        recovered.width(),
        recovered.height(),
        args.secret.display()
    );
    Ok(())
}
