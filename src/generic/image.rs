use super::format::PixelFormat;

/// Image component swizzle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ComponentSwizzle {
    Identity,
    Zero,
    One,
    R,
    G,
    B,
    A,
}

impl Default for ComponentSwizzle {
    fn default() -> Self {
        ComponentSwizzle::Identity
    }
}

/// Image swizzle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Swizzle {
    pub r: ComponentSwizzle,
    pub g: ComponentSwizzle,
    pub b: ComponentSwizzle,
    pub a: ComponentSwizzle,
}

impl Swizzle {
    pub const IDENTITY: Self = Swizzle {
        r: ComponentSwizzle::Identity,
        g: ComponentSwizzle::Identity,
        b: ComponentSwizzle::Identity,
        a: ComponentSwizzle::Identity,
    };

    pub const RRRR: Self = Swizzle {
        r: ComponentSwizzle::R,
        g: ComponentSwizzle::R,
        b: ComponentSwizzle::R,
        a: ComponentSwizzle::R,
    };

    /// Select output channels from a fetched color.
    #[inline(always)]
    pub fn resolve(&self, rgba: [f32; 4]) -> [f32; 4] {
        use ComponentSwizzle::*;

        let pick = |c: ComponentSwizzle, i: usize| match c {
            Identity => rgba[i],
            Zero => 0.0,
            One => 1.0,
            R => rgba[0],
            G => rgba[1],
            B => rgba[2],
            A => rgba[3],
        };

        [
            pick(self.r, 0),
            pick(self.g, 1),
            pick(self.b, 2),
            pick(self.a, 3),
        ]
    }
}

/// Dimensionality of an image view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewType {
    D1,
    D2,
    D3,
    Cube,
    D1Array,
    D2Array,
    CubeArray,
}

impl Default for ViewType {
    fn default() -> Self {
        ViewType::D2
    }
}

/// A typed, dimensionality-tagged handle onto image storage.
///
/// `id` is a stable 32-bit identity, valid for as long as the view
/// object lives. The specialization cache keys on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageViewDesc {
    pub id: u32,
    pub view_type: ViewType,
    pub format: PixelFormat,
    pub swizzle: Swizzle,
}

impl ImageViewDesc {
    pub const fn new(id: u32, view_type: ViewType, format: PixelFormat) -> Self {
        ImageViewDesc {
            id,
            view_type,
            format,
            swizzle: Swizzle::IDENTITY,
        }
    }

    pub const fn swizzle(mut self, swizzle: Swizzle) -> Self {
        self.swizzle = swizzle;
        self
    }
}
