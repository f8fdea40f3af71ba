//! Software specialization of image sampling.
//!
//! Pairs an image view with a sampler, translates their declarative
//! state into the normalized descriptor a texture-filtering engine
//! consumes, assembles a specialized sampling routine around that
//! engine and caches the routine per identity pair. Unsupported
//! configurations are rejected outright; nothing silently degrades.

pub mod generic;
pub mod soft;

pub use self::{generic::*, soft::*};
