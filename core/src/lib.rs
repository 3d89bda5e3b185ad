// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Umbra — Core Library
//!
//! Threshold secret image sharing with steganographic concealment: split
//! an 8-bit bitmap into n shadow streams so that any k of them rebuild it
//! exactly, then hide each shadow in the least-significant bits of an
//! innocent-looking cover image.
//!
//! The numbers do the hiding, not the format. Sharing happens over
//! GF(257) — the smallest prime field that holds a byte — with consecutive
//! pixels packed as *all* the coefficients of one polynomial, so every
//! shadow byte pays for k secret bytes at recovery time. The price of the
//! prime is the value 256, which cannot ride in a byte; the split path
//! nudges saturated blocks until every evaluation fits, and that nudge is
//! the one place the scheme is deliberately lossy.
//!
//! ## Architecture
//!
//! The pipeline is a straight line and the modules mirror its stages:
//!
//! - **raster** — the `PixelGrid` view and the Windows v3 BMP container.
//! - **scramble** — the 48-bit LCG keystream that diffuses the secret
//!   before sharing.
//! - **sharing** — GF(257) arithmetic, polynomial split, Gaussian-
//!   elimination recovery.
//! - **stego** — the LSB payload channel and the reserved-byte label.
//! - **pipeline** — the distribute/recover orchestrations and cover
//!   enumeration.
//! - **config** — every constant that is really a wire-format promise.
//!
//! ## Design Philosophy
//!
//! 1. Determinism is a feature: same seed, same bits, every platform.
//! 2. Errors are values with names, not strings with vibes.
//! 3. The scheme hides images; it does not authenticate them. Treat the
//!    shadows accordingly.

pub mod config;
pub mod pipeline;
pub mod raster;
pub mod scramble;
pub mod sharing;
pub mod stego;

pub use pipeline::{Distributor, PipelineError, Recoverer};
pub use raster::{load_bmp, save_bmp, PixelGrid};
pub use sharing::ThresholdConfig;
