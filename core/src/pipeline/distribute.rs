//! # Distributor
//!
//! The full hiding pipeline: scramble the secret in place, split it into
//! n shadow streams, hide each stream in a distinct cover, stamp the
//! seed and share abscissa into the cover's reserved header bytes, and
//! save the results as `stego1.bmp … stegoN.bmp`.
//!
//! The secret grid is *consumed* — the scramble mutates it and nothing
//! restores it. Callers that still need the original must clone first.

use std::path::{Path, PathBuf};

use rand::Rng;

use crate::pipeline::{covers, stego_file_name, PipelineError};
use crate::raster::{save_bmp, PixelGrid};
use crate::scramble::Keystream;
use crate::sharing::{split_grid, ThresholdConfig};
use crate::stego::{lsb, CodecMode, StegoLabel};

/// Orchestrates one distribution run.
#[derive(Debug, Clone)]
pub struct Distributor {
    config: ThresholdConfig,
    seed: u16,
}

impl Distributor {
    /// A distributor with a freshly drawn scramble seed.
    pub fn new(config: ThresholdConfig) -> Self {
        let seed = rand::thread_rng().gen::<u16>();
        Self { config, seed }
    }

    /// A distributor with an injected seed, for reproducible runs.
    pub fn with_seed(config: ThresholdConfig, seed: u16) -> Self {
        Self { config, seed }
    }

    /// The seed this run will scramble with.
    pub fn seed(&self) -> u16 {
        self.seed
    }

    /// Execute the pipeline. Returns the paths of the written stegos,
    /// in share order.
    ///
    /// Covers are drawn from `covers_dir` in file-name order; each must
    /// hold `L·8` bits (k = 8) or `L·8 + 32` bits (otherwise), where L is
    /// the shadow stream length. `output_dir` is created if missing.
    pub fn run(
        &self,
        mut secret: PixelGrid,
        covers_dir: &Path,
        output_dir: &Path,
    ) -> Result<Vec<PathBuf>, PipelineError> {
        let config = &self.config;
        let mode = if config.uses_dim_header() {
            CodecMode::WithDimHeader
        } else {
            CodecMode::FixedDim
        };

        tracing::info!(
            k = config.k,
            n = config.n,
            width = secret.width(),
            height = secret.height(),
            "distributing secret image"
        );

        let secret_width = secret.width() as u16;
        let secret_height = secret.height() as u16;

        // 1. Scramble the secret over its full padded buffer.
        Keystream::new(self.seed).xor_into(&mut secret);

        // 2. Split into n shadow streams.
        let streams = split_grid(&secret, config);
        let shadow_len = streams[0].len();
        let required_bits = mode.required_bits(shadow_len);

        // 3. Find n covers that can hold a stream each.
        let loaded = covers::load_covers(covers_dir, config.n as usize, required_bits)?;

        std::fs::create_dir_all(output_dir)?;

        // 4. Embed, label, save.
        let mut written = Vec::with_capacity(loaded.len());
        for (index, ((cover_path, mut cover), stream)) in
            loaded.into_iter().zip(streams).enumerate()
        {
            let share_index = index as u16 + 1;
            match mode {
                CodecMode::FixedDim => lsb::embed(&mut cover, &stream)?,
                CodecMode::WithDimHeader => {
                    lsb::embed_with_dims(&mut cover, &stream, secret_width, secret_height)?
                }
            }
            cover.set_reserved(StegoLabel::new(self.seed, share_index).to_reserved());

            let out_path = output_dir.join(stego_file_name(share_index));
            save_bmp(&out_path, &cover)?;

            tracing::info!(
                share = share_index,
                cover = %cover_path.display(),
                stego = %out_path.display(),
                "shadow embedded"
            );
            written.push(out_path);
        }

        tracing::info!(
            stegos = written.len(),
            shadow_len,
            "distribution complete"
        );
        Ok(written)
    }
}
