//! Image loading and region extraction
//!
//! Decodes PNG (and other supported formats) into RGBA8 pixel data, and
//! extracts transformed subregions the way sprite sheets are sliced. Decoding
//! failures surface as [`Fault::Decode`]; a region falling outside its source
//! surfaces as [`Fault::Region`].

use std::path::{Path, PathBuf};

use image;

use crate::fault::Fault;

/// Sprite-style region transform.
///
/// Rotations are clockwise; the mirror is about the vertical axis and is
/// applied before the rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transform {
    /// No transform
    #[default]
    None,
    /// Rotate 90 degrees clockwise
    Rot90,
    /// Rotate 180 degrees
    Rot180,
    /// Rotate 270 degrees clockwise
    Rot270,
    /// Mirror about the vertical axis
    Mirror,
    /// Mirror, then rotate 90 degrees clockwise
    MirrorRot90,
    /// Mirror, then rotate 180 degrees
    MirrorRot180,
    /// Mirror, then rotate 270 degrees clockwise
    MirrorRot270,
}

impl Transform {
    /// Whether this transform swaps the region's width and height
    pub fn swaps_axes(self) -> bool {
        matches!(self, Self::Rot90 | Self::Rot270 | Self::MirrorRot90 | Self::MirrorRot270)
    }
}

/// Decoded image data, RGBA8
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    /// Raw RGBA pixel data
    pub data: Vec<u8>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl ImageData {
    /// Load an image from a file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Fault> {
        let path_ref = path.as_ref();

        log::debug!("Loading image from: {:?}", path_ref);

        let img = image::open(path_ref)
            .map_err(|e| Fault::Decode(format!("failed to load {}: {}", path_ref.display(), e)))?;

        let rgba_img = img.to_rgba8();
        let (width, height) = rgba_img.dimensions();

        log::info!("Loaded image {}x{} from {:?}", width, height, path_ref);

        Ok(Self { data: rgba_img.into_raw(), width, height })
    }

    /// Load an image by name, resolving against the given search paths.
    ///
    /// Each search path is tried in order; a name that resolves nowhere is
    /// tried as-is so absolute paths keep working.
    pub fn from_search_paths(search_paths: &[String], name: &str) -> Result<Self, Fault> {
        let mut resolved = None;
        for search_path in search_paths {
            let mut candidate = PathBuf::from(search_path);
            candidate.push(name);
            if candidate.exists() {
                resolved = Some(candidate);
                break;
            }
        }
        Self::from_file(resolved.unwrap_or_else(|| PathBuf::from(name)))
    }

    /// Load image from memory (useful for embedded resources)
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Fault> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| Fault::Decode(format!("failed to load image from bytes: {}", e)))?;

        let rgba_img = img.to_rgba8();
        let (width, height) = rgba_img.dimensions();

        log::debug!("Loaded image {}x{} from memory", width, height);

        Ok(Self { data: rgba_img.into_raw(), width, height })
    }

    /// Create a solid color image (useful for testing and defaults)
    pub fn solid_color(width: u32, height: u32, color: [u8; 4]) -> Self {
        let pixel_count = (width * height) as usize;
        let mut data = Vec::with_capacity(pixel_count * 4);

        for _ in 0..pixel_count {
            data.extend_from_slice(&color);
        }

        Self { data, width, height }
    }

    /// Encode this image as PNG at the given path
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), Fault> {
        let buffer = image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .ok_or_else(|| Fault::Decode("pixel buffer does not match dimensions".to_string()))?;
        buffer
            .save(path.as_ref())
            .map_err(|e| Fault::Decode(format!("failed to encode {}: {}", path.as_ref().display(), e)))
    }

    /// Read the RGBA value at `(x, y)`.
    ///
    /// # Panics
    /// Panics when the coordinate is outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) outside image");
        let at = ((y * self.width + x) * 4) as usize;
        [self.data[at], self.data[at + 1], self.data[at + 2], self.data[at + 3]]
    }

    /// Write the RGBA value at `(x, y)`.
    ///
    /// # Panics
    /// Panics when the coordinate is outside the image.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) outside image");
        let at = ((y * self.width + x) * 4) as usize;
        self.data[at..at + 4].copy_from_slice(&rgba);
    }

    /// Extract a transformed copy of the region `(x, y, width, height)`.
    ///
    /// The region must lie entirely within this image; anything else raises
    /// [`Fault::Region`] and produces nothing.
    pub fn subregion(
        &self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        transform: Transform,
    ) -> Result<Self, Fault> {
        let in_bounds = x >= 0
            && y >= 0
            && width > 0
            && height > 0
            && i64::from(x) + i64::from(width) <= i64::from(self.width)
            && i64::from(y) + i64::from(height) <= i64::from(self.height);
        if !in_bounds {
            return Err(Fault::Region {
                x,
                y,
                width,
                height,
                source_width: self.width,
                source_height: self.height,
            });
        }

        let w = width as u32;
        let h = height as u32;
        let (out_w, out_h) = if transform.swaps_axes() { (h, w) } else { (w, h) };

        let mut out = Self::solid_color(out_w, out_h, [0, 0, 0, 0]);
        for oy in 0..out_h {
            for ox in 0..out_w {
                // Region-space coordinate that lands at (ox, oy) after the
                // transform; mirror is folded in before the rotation.
                let (rx, ry) = match transform {
                    Transform::None => (ox, oy),
                    Transform::Mirror => (w - 1 - ox, oy),
                    Transform::Rot90 => (oy, h - 1 - ox),
                    Transform::MirrorRot90 => (w - 1 - oy, h - 1 - ox),
                    Transform::Rot180 => (w - 1 - ox, h - 1 - oy),
                    Transform::MirrorRot180 => (ox, h - 1 - oy),
                    Transform::Rot270 => (w - 1 - oy, ox),
                    Transform::MirrorRot270 => (oy, ox),
                };
                let rgba = self.pixel(x as u32 + rx, y as u32 + ry);
                out.set_pixel(ox, oy, rgba);
            }
        }
        Ok(out)
    }

    /// Get the size of the image data in bytes
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }
}
