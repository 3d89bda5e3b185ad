//! # Recoverer
//!
//! The reverse pipeline: open `stego1.bmp … stego{k}.bmp`, read the seed
//! and share abscissas from their reserved header bytes, extract the
//! shadow streams from the LSB plane, solve every polynomial block, undo
//! the scramble, and save the recovered image.
//!
//! With k = 8 there is no in-band dimension header; the secret is assumed
//! to have the first stego's dimensions. When the original secret was a
//! different size than the cover, that assumption is wrong and the
//! recovered image will be too — a limitation of the k = 8 layout, kept
//! as-is rather than silently changed.

use std::path::Path;

use crate::pipeline::{stego_file_name, PipelineError};
use crate::raster::{load_bmp, save_bmp, PixelGrid};
use crate::scramble::Keystream;
use crate::sharing::{recover_grid, ShadowSource, ThresholdConfig};
use crate::stego::{lsb, StegoLabel};

/// Orchestrates one recovery run.
#[derive(Debug, Clone, Copy)]
pub struct Recoverer {
    config: ThresholdConfig,
}

impl Recoverer {
    /// A recoverer for threshold `k`, validated against the same bounds
    /// as distribution.
    pub fn new(k: u8) -> Result<Self, PipelineError> {
        // Recovery needs exactly k stegos; the share total plays no role
        // here, so validate with n = k.
        let config = ThresholdConfig::new(k, u16::from(k)).map_err(PipelineError::Share)?;
        Ok(Self { config })
    }

    /// Execute the pipeline: read `{stego_dir}/stego1.bmp …
    /// stego{k}.bmp`, reconstruct the secret, and write it to
    /// `output_path`. The recovered grid is also returned.
    pub fn run(&self, stego_dir: &Path, output_path: &Path) -> Result<PixelGrid, PipelineError> {
        let k = self.config.k;

        tracing::info!(k, dir = %stego_dir.display(), "recovering secret image");

        let stegos = self.load_stegos(stego_dir)?;
        let first = &stegos[0];

        let seed = StegoLabel::from_reserved(first.reserved()).seed;

        // Secret dimensions: in-band header on the generic path, the
        // cover's own dimensions on the k = 8 path.
        let (width, height) = if self.config.uses_dim_header() {
            let (w, h) = lsb::read_dim_header(first)?;
            (i32::from(w), i32::from(h))
        } else {
            (first.width(), first.height())
        };

        let shadow_len = self.config.shadow_len(width as usize * height as usize);

        let mut shadows = Vec::with_capacity(stegos.len());
        for stego in &stegos {
            let x = StegoLabel::from_reserved(stego.reserved()).share_index;
            let stream = if self.config.uses_dim_header() {
                let (stream, _, _) = lsb::extract_with_dims(stego, shadow_len)?;
                stream
            } else {
                lsb::extract(stego, shadow_len)?
            };
            shadows.push(ShadowSource { x, stream });
        }

        let mut recovered = recover_grid(&shadows, width, height, first.clone_palette())?;

        // Undo the scramble over the full padded buffer, with the seed
        // every stego carries.
        Keystream::new(seed).xor_into(&mut recovered);

        save_bmp(output_path, &recovered)?;

        tracing::info!(
            width,
            height,
            output = %output_path.display(),
            "recovery complete"
        );
        Ok(recovered)
    }

    fn load_stegos(&self, stego_dir: &Path) -> Result<Vec<PixelGrid>, PipelineError> {
        (1..=self.config.k)
            .map(|i| {
                let path = stego_dir.join(stego_file_name(u16::from(i)));
                load_bmp(&path).map_err(PipelineError::from)
            })
            .collect()
    }
}
