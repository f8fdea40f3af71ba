mod format;
mod image;
mod sampler;

pub use self::{
    format::PixelFormat,
    image::{ComponentSwizzle, ImageViewDesc, Swizzle, ViewType},
    sampler::{AddressMode, CompareFunction, Filter, MipMapMode, SamplerDesc},
};
