//! Texture resources as seen by the batching core
//!
//! A [`Texture2D`] is a thin record of a device texture: the opaque
//! handle plus dimensions. It does not own pixel data and the slot
//! table never dereferences it; batching compares handles only.

use crate::render::api::{GraphicsDevice, TextureFormat, TextureHandle};
use crate::render::{RenderError, RenderResult};

/// A 2D texture created on the injected graphics device
///
/// Lifetime is owned by whoever created the texture; the renderer holds
/// only non-owning handles. Destroying a texture that is still
/// referenced by an unflushed batch is a caller error the core does not
/// defend against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Texture2D {
    handle: TextureHandle,
    width: u32,
    height: u32,
}

impl Texture2D {
    /// Create an empty RGBA8 texture
    pub fn new(device: &mut dyn GraphicsDevice, width: u32, height: u32) -> RenderResult<Self> {
        let handle = device.create_texture(width, height, TextureFormat::Rgba8)?;
        Ok(Self {
            handle,
            width,
            height,
        })
    }

    /// Create an RGBA8 texture and upload its full pixel contents
    pub fn from_pixels(
        device: &mut dyn GraphicsDevice,
        width: u32,
        height: u32,
        pixels: &[u8],
    ) -> RenderResult<Self> {
        let expected = (width * height * TextureFormat::Rgba8.bytes_per_texel()) as usize;
        if pixels.len() != expected {
            return Err(RenderError::ResourceCreationFailed(format!(
                "texture data is {} bytes, expected {} for {}x{} RGBA8",
                pixels.len(),
                expected,
                width,
                height
            )));
        }

        let texture = Self::new(device, width, height)?;
        device.upload_texture_data(texture.handle, pixels);
        Ok(texture)
    }

    /// Create the 1x1 opaque white texture reserved for slot 0
    ///
    /// Untextured quads sample this through the textured draw path, so
    /// one shader covers both cases.
    pub(crate) fn white(device: &mut dyn GraphicsDevice) -> RenderResult<Self> {
        Self::from_pixels(device, 1, 1, &[0xff, 0xff, 0xff, 0xff])
    }

    /// Opaque device handle; the identity the slot table keys on
    #[must_use]
    pub const fn handle(&self) -> TextureHandle {
        self.handle
    }

    /// Texture width in texels
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Texture height in texels
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }
}
