use std::hash::{Hash, Hasher};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Filter {
    Nearest,
    Linear,
}

impl Default for Filter {
    fn default() -> Self {
        Filter::Nearest
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MipMapMode {
    Nearest,
    Linear,
}

impl Default for MipMapMode {
    fn default() -> Self {
        MipMapMode::Nearest
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AddressMode {
    Repeat,
    MirrorRepeat,
    ClampToEdge,
    ClampToBorder,
    MirrorClampToEdge,
}

impl Default for AddressMode {
    fn default() -> Self {
        AddressMode::Repeat
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CompareFunction {
    Never,
    Less,
    Equal,
    LessEqual,
    Greater,
    NotEqual,
    GreaterEqual,
    Always,
}

/// Filtering and addressing policy applied when reading an image view.
///
/// `id` is a stable 32-bit identity, valid for as long as the sampler
/// object lives. The specialization cache keys on it.
#[derive(Clone, Copy, Debug)]
pub struct SamplerDesc {
    pub id: u32,
    pub min_filter: Filter,
    pub mag_filter: Filter,
    pub mip_map_mode: MipMapMode,
    pub address_mode: [AddressMode; 3],
    pub compare: Option<CompareFunction>,
    pub lod_bias: f32,
    pub anisotropy: Option<f32>,
    pub normalized: bool,
}

impl PartialEq for SamplerDesc {
    #[inline(never)]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.min_filter == other.min_filter
            && self.mag_filter == other.mag_filter
            && self.mip_map_mode == other.mip_map_mode
            && self.address_mode == other.address_mode
            && self.compare == other.compare
            && f32::total_cmp(&self.lod_bias, &other.lod_bias).is_eq()
            && match (self.anisotropy, other.anisotropy) {
                (Some(a), Some(b)) => f32::total_cmp(&a, &b).is_eq(),
                (None, None) => true,
                _ => false,
            }
            && self.normalized == other.normalized
    }
}

impl Eq for SamplerDesc {}

impl Hash for SamplerDesc {
    #[inline(never)]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.min_filter.hash(state);
        self.mag_filter.hash(state);
        self.mip_map_mode.hash(state);
        self.address_mode.hash(state);
        self.compare.hash(state);
        self.lod_bias.to_bits().hash(state);
        self.anisotropy.map(|v| v.to_bits().hash(state));
        self.normalized.hash(state);
    }
}

impl SamplerDesc {
    pub const fn new(id: u32) -> Self {
        SamplerDesc {
            id,
            min_filter: Filter::Nearest,
            mag_filter: Filter::Nearest,
            mip_map_mode: MipMapMode::Nearest,
            address_mode: [AddressMode::Repeat; 3],
            compare: None,
            lod_bias: 0.0,
            anisotropy: None,
            normalized: true,
        }
    }

    pub const fn filter(mut self, min: Filter, mag: Filter) -> Self {
        self.min_filter = min;
        self.mag_filter = mag;
        self
    }

    pub const fn mip_map_mode(mut self, mode: MipMapMode) -> Self {
        self.mip_map_mode = mode;
        self
    }

    pub const fn address_mode(mut self, mode: AddressMode) -> Self {
        self.address_mode = [mode; 3];
        self
    }
}

impl Default for SamplerDesc {
    fn default() -> Self {
        SamplerDesc::new(0)
    }
}
