mod cache;
mod engine;
mod routine;
mod state;

pub use self::{
    cache::SamplerCache,
    engine::{
        Constants, ImageDescriptor, Lanes, ReferenceEngine, Texture, TextureEngine, Vector4, LANES,
    },
    routine::{
        EngineRoutine, EngineRoutineBuilder, RoutineBuilder, SamplerFunction, SamplerOption,
        SamplerRoutine, SamplingMethod,
    },
    state::{
        AddressingMode, FilterType, MipmapFilter, SamplerState, TextureType, TranslateError,
    },
};
