use std::sync::Arc;

use crate::generic::PixelFormat;

use super::routine::SamplerFunction;
use super::state::{AddressingMode, FilterType, SamplerState, TextureType};

/// Number of fragments a routine shades per invocation.
pub const LANES: usize = 4;

/// One value per execution lane.
pub type Lanes = [f32; LANES];

/// Four color channels, each a lane-wide vector.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector4 {
    pub x: Lanes,
    pub y: Lanes,
    pub z: Lanes,
    pub w: Lanes,
}

impl Vector4 {
    pub const ZERO: Self = Vector4 {
        x: [0.0; LANES],
        y: [0.0; LANES],
        z: [0.0; LANES],
        w: [0.0; LANES],
    };
}

/// Texel storage read by the texture engine.
///
/// Layers are stored contiguously, row-major within a layer. Cube
/// textures hold six layers, one per face in +X, -X, +Y, -Y, +Z, -Z
/// order.
#[derive(Clone, Debug)]
pub struct Texture {
    format: PixelFormat,
    width: u32,
    height: u32,
    layers: u32,
    data: Vec<u8>,
}

impl Texture {
    /// Wrap raw texel bytes.
    ///
    /// `data` must hold exactly `width * height * layers` texels of
    /// `format`.
    pub fn new(format: PixelFormat, width: u32, height: u32, layers: u32, data: Vec<u8>) -> Self {
        let texels = width as usize * height as usize * layers as usize;
        assert_eq!(data.len(), texels * format.texel_size());
        Texture {
            format,
            width,
            height,
            layers,
            data,
        }
    }

    /// Single-layer texture filled with one color.
    ///
    /// The color is stored as-is, with no transfer function applied.
    pub fn solid(format: PixelFormat, width: u32, height: u32, color: [f32; 4]) -> Self {
        let mut texel = Vec::new();
        match format {
            PixelFormat::R8Unorm => texel.push(unorm8(color[0])),
            PixelFormat::Rg8Unorm => texel.extend([unorm8(color[0]), unorm8(color[1])]),
            PixelFormat::Rgba8Unorm | PixelFormat::Rgba8Srgb => {
                texel.extend(color.map(unorm8));
            }
            PixelFormat::Bgra8Unorm | PixelFormat::Bgra8Srgb => {
                texel.extend([color[2], color[1], color[0], color[3]].map(unorm8));
            }
            PixelFormat::R32Float => texel.extend_from_slice(bytemuck::cast_slice(&color[..1])),
            PixelFormat::Rg32Float => texel.extend_from_slice(bytemuck::cast_slice(&color[..2])),
            PixelFormat::Rgba32Float => texel.extend_from_slice(bytemuck::cast_slice(&color)),
        }

        let texels = width as usize * height as usize;
        let mut data = Vec::with_capacity(texels * texel.len());
        for _ in 0..texels {
            data.extend_from_slice(&texel);
        }
        Texture::new(format, width, height, 1, data)
    }

    #[inline(always)]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    #[inline(always)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline(always)]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline(always)]
    pub fn layers(&self) -> u32 {
        self.layers
    }

    /// Decode one texel to normalized RGBA. Missing components read as
    /// 0 for color and 1 for alpha. No transfer function is applied.
    pub fn texel(&self, layer: u32, x: u32, y: u32) -> [f32; 4] {
        debug_assert!(layer < self.layers && x < self.width && y < self.height);
        let idx = ((layer * self.height + y) * self.width + x) as usize;
        let size = self.format.texel_size();
        let bytes = &self.data[idx * size..(idx + 1) * size];

        let f = |offset: usize| bytemuck::pod_read_unaligned::<f32>(&bytes[offset..offset + 4]);
        let u = |offset: usize| bytes[offset] as f32 / 255.0;

        match self.format {
            PixelFormat::R8Unorm => [u(0), 0.0, 0.0, 1.0],
            PixelFormat::Rg8Unorm => [u(0), u(1), 0.0, 1.0],
            PixelFormat::Rgba8Unorm | PixelFormat::Rgba8Srgb => [u(0), u(1), u(2), u(3)],
            PixelFormat::Bgra8Unorm | PixelFormat::Bgra8Srgb => [u(2), u(1), u(0), u(3)],
            PixelFormat::R32Float => [f(0), 0.0, 0.0, 1.0],
            PixelFormat::Rg32Float => [f(0), f(4), 0.0, 1.0],
            PixelFormat::Rgba32Float => [f(0), f(4), f(8), f(12)],
        }
    }
}

#[inline(always)]
fn unorm8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0 + 0.5) as u8
}

/// In-memory descriptor block bound for a sampled image.
///
/// A compiled routine reads the texture handle from the block's leading
/// field.
#[derive(Clone)]
pub struct ImageDescriptor {
    pub texture: Arc<Texture>,
}

impl ImageDescriptor {
    pub fn new(texture: Arc<Texture>) -> Self {
        ImageDescriptor { texture }
    }
}

/// Shared read-only constants block.
///
/// Opaque to compiled routines; passed through to the texture engine
/// unchanged.
#[derive(Clone, Debug)]
pub struct Constants {
    /// Texel returned for out-of-range border reads.
    pub transparent_black: [f32; 4],
}

impl Default for Constants {
    fn default() -> Self {
        Constants {
            transparent_black: [0.0; 4],
        }
    }
}

/// Per-texel fetch and filtering arithmetic.
///
/// Implementations must be pure functions of their arguments plus the
/// referenced texel storage, so compiled routines stay freely shareable
/// across threads.
pub trait TextureEngine: Send + Sync {
    /// Filter one quad of samples.
    ///
    /// `q` is the projective W row, `bias_or_lod` carries the LOD
    /// operand (or zero), `dsx`/`dsy` are gradient rows and `offset` is
    /// the texel offset row; this backend always passes the latter
    /// three as zero.
    #[allow(clippy::too_many_arguments)]
    fn sample_texture(
        &self,
        texture: &Texture,
        state: &SamplerState,
        u: Lanes,
        v: Lanes,
        w: Lanes,
        q: Lanes,
        bias_or_lod: Lanes,
        dsx: Vector4,
        dsy: Vector4,
        offset: Vector4,
        function: SamplerFunction,
        constants: &Constants,
    ) -> Vector4;
}

/// Scalar software filtering engine.
///
/// Executes routines for real: point and bilinear filtering over 1D/2D
/// textures and major-axis face selection for cubes, with all six
/// addressing modes, sRGB decode and swizzle resolution. Samples the
/// base level only; mixed min/mag filters resolve by the sign of the
/// LOD operand.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReferenceEngine;

impl ReferenceEngine {
    pub const fn new() -> Self {
        ReferenceEngine
    }

    fn fetch(
        &self,
        texture: &Texture,
        state: &SamplerState,
        layer: u32,
        x: i64,
        y: i64,
        constants: &Constants,
    ) -> [f32; 4] {
        let x = match resolve_axis(x, texture.width() as i64, state.addressing_u) {
            Some(x) => x,
            None => return constants.transparent_black,
        };
        let y = match resolve_axis(y, texture.height() as i64, state.addressing_v) {
            Some(y) => y,
            None => return constants.transparent_black,
        };

        let mut rgba = texture.texel(layer, x as u32, y as u32);
        if state.srgb {
            for c in &mut rgba[..3] {
                *c = srgb_to_linear(*c);
            }
        }
        rgba
    }

    fn sample_lane(
        &self,
        texture: &Texture,
        state: &SamplerState,
        u: f32,
        v: f32,
        w: f32,
        lod: f32,
        constants: &Constants,
    ) -> [f32; 4] {
        let (layer, u, v) = match state.texture_type {
            TextureType::Cube => cube_face(u, v, w),
            TextureType::D1 | TextureType::D2 => (0, u, v),
        };

        let minified = lod > 0.0;
        let linear = match state.filter {
            FilterType::Point => false,
            FilterType::Linear => true,
            FilterType::MinLinearMagPoint => minified,
            FilterType::MinPointMagLinear => !minified,
        };

        let width = texture.width() as f32;
        let height = texture.height() as f32;

        let rgba = if linear {
            let uf = u * width - 0.5;
            let vf = v * height - 0.5;
            let x0 = uf.floor();
            let y0 = vf.floor();
            let fu = uf - x0;
            let fv = vf - y0;
            let x0 = x0 as i64;
            let y0 = y0 as i64;

            let t00 = self.fetch(texture, state, layer, x0, y0, constants);
            let t10 = self.fetch(texture, state, layer, x0 + 1, y0, constants);
            let t01 = self.fetch(texture, state, layer, x0, y0 + 1, constants);
            let t11 = self.fetch(texture, state, layer, x0 + 1, y0 + 1, constants);

            let mut rgba = [0.0; 4];
            for c in 0..4 {
                let top = t00[c] + (t10[c] - t00[c]) * fu;
                let bottom = t01[c] + (t11[c] - t01[c]) * fu;
                rgba[c] = top + (bottom - top) * fv;
            }
            rgba
        } else {
            let x = (u * width).floor() as i64;
            let y = (v * height).floor() as i64;
            self.fetch(texture, state, layer, x, y, constants)
        };

        state.swizzle.resolve(rgba)
    }
}

impl TextureEngine for ReferenceEngine {
    fn sample_texture(
        &self,
        texture: &Texture,
        state: &SamplerState,
        u: Lanes,
        v: Lanes,
        w: Lanes,
        _q: Lanes,
        bias_or_lod: Lanes,
        _dsx: Vector4,
        _dsy: Vector4,
        _offset: Vector4,
        _function: SamplerFunction,
        constants: &Constants,
    ) -> Vector4 {
        let mut out = Vector4::ZERO;
        for lane in 0..LANES {
            let rgba = self.sample_lane(
                texture,
                state,
                u[lane],
                v[lane],
                w[lane],
                bias_or_lod[lane],
                constants,
            );
            out.x[lane] = rgba[0];
            out.y[lane] = rgba[1];
            out.z[lane] = rgba[2];
            out.w[lane] = rgba[3];
        }
        out
    }
}

/// Map a texel index onto the addressable range, or `None` for border
/// reads.
fn resolve_axis(i: i64, size: i64, mode: AddressingMode) -> Option<i64> {
    match mode {
        AddressingMode::Wrap => Some(i.rem_euclid(size)),
        // The engine sees Seamless per face; edge reads stay on the
        // selected face.
        AddressingMode::Clamp | AddressingMode::Seamless => Some(i.clamp(0, size - 1)),
        AddressingMode::Mirror => {
            let period = 2 * size;
            let j = i.rem_euclid(period);
            Some(if j < size { j } else { period - 1 - j })
        }
        AddressingMode::MirrorOnce => {
            let j = if i < 0 { -1 - i } else { i };
            Some(j.min(size - 1))
        }
        AddressingMode::Border => (0..size).contains(&i).then_some(i),
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Select a cube face from a direction vector and project onto its
/// local coordinates. Face order matches texture layer order.
fn cube_face(x: f32, y: f32, z: f32) -> (u32, f32, f32) {
    let ax = x.abs();
    let ay = y.abs();
    let az = z.abs();

    let (face, sc, tc, ma) = if ax >= ay && ax >= az {
        if x >= 0.0 {
            (0, -z, -y, ax)
        } else {
            (1, z, -y, ax)
        }
    } else if ay >= az {
        if y >= 0.0 {
            (2, x, z, ay)
        } else {
            (3, x, -z, ay)
        }
    } else if z >= 0.0 {
        (4, x, -y, az)
    } else {
        (5, -x, -y, az)
    };

    let u = 0.5 * (sc / ma + 1.0);
    let v = 0.5 * (tc / ma + 1.0);
    (face, u, v)
}
