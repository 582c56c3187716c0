//! Texture indexer (RGB(A) image -> palette-indexed skin)
//!
//! Images are downsampled to fit the configured maximum, alpha is dropped and
//! the pixels are reduced to an adaptive palette of at most 256 colors with
//! NeuQuant. Unreadable textures degrade to a fixed checkerboard.

use std::path::Path;

use color_quant::NeuQuant;
use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView, RgbImage};
use mdl_common::Skin;

use crate::config::TextureConfig;
use crate::error::ExportWarning;
use crate::mesh::DiffuseTexture;

/// Palette size of the target format.
pub const PALETTE_SIZE: usize = 256;

/// Side length of the fallback checkerboard.
pub const CHECKER_SIZE: u32 = 64;

/// Tile size of the fallback checkerboard.
pub const CHECKER_TILE: u32 = 8;

/// A palette-indexed image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedTexture {
    pub width: u32,
    pub height: u32,
    /// Color for each index that appears in `indices`.
    pub palette: Vec<[u8; 3]>,
    /// One palette index per pixel, row-major.
    pub indices: Vec<u8>,
}

impl IndexedTexture {
    /// The 64×64 fallback skin: 8-pixel tiles alternating 0 and 255, with 0 at
    /// the top-left tile.
    pub fn checkerboard() -> Self {
        Self::checkerboard_sized(CHECKER_SIZE, CHECKER_SIZE)
    }

    /// The fallback tile pattern at an arbitrary size.
    pub fn checkerboard_sized(width: u32, height: u32) -> Self {
        let indices = (0..height)
            .flat_map(|y| {
                (0..width).map(move |x| {
                    if (x / CHECKER_TILE + y / CHECKER_TILE) % 2 == 0 {
                        0
                    } else {
                        255
                    }
                })
            })
            .collect();
        // Grayscale ramp, so index 0 is black and 255 is white.
        let palette = (0..=255u8).map(|v| [v, v, v]).collect();
        Self {
            width,
            height,
            palette,
            indices,
        }
    }

    pub fn into_skin(self) -> Skin {
        Skin::new(self.width, self.height, self.indices)
    }
}

/// Result of resolving one material's texture.
///
/// A failure to decode never aborts the build; it becomes `Fallback` and
/// carries the warning to report.
#[derive(Debug, Clone, PartialEq)]
pub enum TextureOutcome {
    Indexed(IndexedTexture),
    Fallback {
        texture: IndexedTexture,
        warning: ExportWarning,
    },
}

impl TextureOutcome {
    pub fn texture(&self) -> &IndexedTexture {
        match self {
            Self::Indexed(texture) | Self::Fallback { texture, .. } => texture,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    pub fn into_parts(self) -> (IndexedTexture, Option<ExportWarning>) {
        match self {
            Self::Indexed(texture) => (texture, None),
            Self::Fallback { texture, warning } => (texture, Some(warning)),
        }
    }
}

/// Decodes texture files referenced by materials.
pub trait ImageDecoder: Send + Sync {
    fn decode(&self, path: &Path) -> image::ImageResult<DynamicImage>;
}

/// Decodes from the filesystem with `image::open`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileImageDecoder;

impl ImageDecoder for FileImageDecoder {
    fn decode(&self, path: &Path) -> image::ImageResult<DynamicImage> {
        image::open(path)
    }
}

/// Reduces images to palette-indexed skins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureIndexer {
    pub max_dimension: u32,
    /// NeuQuant sampling factor, 1 (best) to 30 (fastest).
    pub sample_factor: i32,
}

impl Default for TextureIndexer {
    fn default() -> Self {
        TextureConfig::default().into()
    }
}

impl From<TextureConfig> for TextureIndexer {
    fn from(config: TextureConfig) -> Self {
        Self {
            max_dimension: config.max_dimension,
            sample_factor: config.sample_factor,
        }
    }
}

impl TextureIndexer {
    /// Output size for a source image: unchanged when it fits, otherwise
    /// scaled so the longer side equals `max_dimension`.
    pub fn target_size(&self, width: u32, height: u32) -> (u32, u32) {
        let max = self.max_dimension.max(1);
        if width <= max && height <= max {
            return (width, height);
        }
        let ratio = f64::from(max) / f64::from(width.max(height));
        let scale = |side: u32| ((f64::from(side) * ratio).round() as u32).clamp(1, max);
        (scale(width), scale(height))
    }

    /// Index an image at its own size, downsampling if it is too large.
    pub fn index_image(&self, image: &DynamicImage) -> IndexedTexture {
        let (width, height) = self.target_size(image.width(), image.height());
        self.index_image_to(image, width, height)
    }

    /// Index an image resampled to exactly `width`×`height`.
    pub fn index_image_to(&self, image: &DynamicImage, width: u32, height: u32) -> IndexedTexture {
        let rgb = image.to_rgb8();
        let rgb = if rgb.dimensions() == (width, height) {
            rgb
        } else {
            imageops::resize(&rgb, width, height, FilterType::Lanczos3)
        };
        self.quantize(&rgb)
    }

    fn quantize(&self, rgb: &RgbImage) -> IndexedTexture {
        let rgba: Vec<u8> = rgb
            .pixels()
            .flat_map(|p| [p.0[0], p.0[1], p.0[2], u8::MAX])
            .collect();
        let quant = NeuQuant::new(self.sample_factor.clamp(1, 30), PALETTE_SIZE, &rgba);

        let indices = rgba
            .chunks_exact(4)
            .map(|pixel| quant.index_of(pixel) as u8)
            .collect();
        let palette = quant
            .color_map_rgb()
            .chunks_exact(3)
            .map(|c| [c[0], c[1], c[2]])
            .collect();

        IndexedTexture {
            width: rgb.width(),
            height: rgb.height(),
            palette,
            indices,
        }
    }

    /// Resolve a material's diffuse texture at its natural size.
    pub fn resolve(
        &self,
        material: &str,
        diffuse: Option<&DiffuseTexture>,
        decoder: &dyn ImageDecoder,
    ) -> TextureOutcome {
        self.resolve_sized(material, diffuse, decoder, None)
    }

    /// Resolve a material's diffuse texture, resampled to `size` when given.
    ///
    /// The fallback checkerboard is 64×64 unless `size` is given.
    pub fn resolve_sized(
        &self,
        material: &str,
        diffuse: Option<&DiffuseTexture>,
        decoder: &dyn ImageDecoder,
        size: Option<(u32, u32)>,
    ) -> TextureOutcome {
        let fallback = |warning: ExportWarning| {
            tracing::warn!("{}", warning);
            let texture = match size {
                Some((w, h)) => IndexedTexture::checkerboard_sized(w, h),
                None => IndexedTexture::checkerboard(),
            };
            TextureOutcome::Fallback { texture, warning }
        };
        let unreadable = |reason: String| {
            fallback(ExportWarning::TextureUnreadable {
                material: material.to_string(),
                reason,
            })
        };

        let decoded;
        let image = match diffuse {
            None => return fallback(ExportWarning::NoTexture),
            Some(DiffuseTexture::Image(image)) => image,
            Some(DiffuseTexture::File(path)) => match decoder.decode(path) {
                Ok(image) => {
                    decoded = image;
                    &decoded
                }
                Err(e) => return unreadable(format!("{}: {}", path.display(), e)),
            },
        };

        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return unreadable(format!("image is {width}x{height}"));
        }

        let texture = match size {
            Some((w, h)) => self.index_image_to(image, w, h),
            None => self.index_image(image),
        };
        tracing::debug!(
            "Indexed texture for '{}': {}x{} -> {}x{}",
            material,
            width,
            height,
            texture.width,
            texture.height
        );
        TextureOutcome::Indexed(texture)
    }
}
