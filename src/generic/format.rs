#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    R8Unorm,
    Rg8Unorm,
    Rgba8Unorm,
    Rgba8Srgb,
    Bgra8Unorm,
    Bgra8Srgb,
    R32Float,
    Rg32Float,
    Rgba32Float,
}

impl PixelFormat {
    #[inline(always)]
    pub fn is_srgb(&self) -> bool {
        match self {
            PixelFormat::Rgba8Srgb | PixelFormat::Bgra8Srgb => true,
            PixelFormat::R8Unorm
            | PixelFormat::Rg8Unorm
            | PixelFormat::Rgba8Unorm
            | PixelFormat::Bgra8Unorm
            | PixelFormat::R32Float
            | PixelFormat::Rg32Float
            | PixelFormat::Rgba32Float => false,
        }
    }

    /// Size of one texel in bytes.
    #[inline(always)]
    pub fn texel_size(&self) -> usize {
        match self {
            PixelFormat::R8Unorm => 1,
            PixelFormat::Rg8Unorm => 2,
            PixelFormat::Rgba8Unorm
            | PixelFormat::Rgba8Srgb
            | PixelFormat::Bgra8Unorm
            | PixelFormat::Bgra8Srgb
            | PixelFormat::R32Float => 4,
            PixelFormat::Rg32Float => 8,
            PixelFormat::Rgba32Float => 16,
        }
    }
}
