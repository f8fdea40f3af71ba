use std::sync::Arc;

use super::engine::{Constants, ImageDescriptor, Lanes, TextureEngine, Vector4, LANES};
use super::state::{SamplerState, TextureType};

/// How the sampling instruction selects its level of detail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SamplingMethod {
    /// LOD derived implicitly; no extra operand.
    Implicit,
    /// LOD supplied as the operand directly after the coordinates.
    ExplicitLod,
}

/// Optional-operand form of a sampling instruction. Only the bare form
/// exists in this backend; offset, gradient and bias operands are
/// always passed as zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SamplerOption {
    None,
}

impl Default for SamplerOption {
    fn default() -> Self {
        SamplerOption::None
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SamplerFunction {
    pub method: SamplingMethod,
    pub option: SamplerOption,
}

/// A specialized, executable sampling entry point.
///
/// Immutable once built and safe to invoke from any number of threads
/// concurrently: behavior depends only on the arguments and the state
/// captured at build time.
pub trait SamplerRoutine: Send + Sync {
    /// Run the routine over one quad.
    ///
    /// `input` is a packed row of operands: the leading entries are
    /// coordinates (one per texture axis), optionally followed by one
    /// LOD operand. `output` receives the R, G, B, A channels in lanes
    /// 0 through 3.
    fn invoke(
        &self,
        image: &ImageDescriptor,
        input: &[Lanes],
        output: &mut [Lanes; 4],
        constants: &Constants,
    );
}

/// Compile strategy: realizes a normalized state and sampling method as
/// an executable routine.
pub trait RoutineBuilder: Send + Sync {
    fn build(&self, state: &SamplerState, method: SamplingMethod) -> Arc<dyn SamplerRoutine>;
}

/// Default compile strategy: an interpreted closure over a texture
/// engine.
pub struct EngineRoutineBuilder {
    engine: Arc<dyn TextureEngine>,
}

impl EngineRoutineBuilder {
    pub fn new(engine: Arc<dyn TextureEngine>) -> Self {
        EngineRoutineBuilder { engine }
    }
}

impl RoutineBuilder for EngineRoutineBuilder {
    fn build(&self, state: &SamplerState, method: SamplingMethod) -> Arc<dyn SamplerRoutine> {
        Arc::new(EngineRoutine {
            state: *state,
            coordinates: coordinate_count(state.texture_type),
            function: SamplerFunction {
                method,
                option: SamplerOption::None,
            },
            engine: self.engine.clone(),
        })
    }
}

fn coordinate_count(texture_type: TextureType) -> usize {
    match texture_type {
        TextureType::D1 => 1,
        TextureType::D2 => 2,
        TextureType::Cube => 3,
    }
}

/// Routine realized over a [`TextureEngine`].
pub struct EngineRoutine {
    state: SamplerState,
    function: SamplerFunction,
    coordinates: usize,
    engine: Arc<dyn TextureEngine>,
}

impl SamplerRoutine for EngineRoutine {
    fn invoke(
        &self,
        image: &ImageDescriptor,
        input: &[Lanes],
        output: &mut [Lanes; 4],
        constants: &Constants,
    ) {
        let mut uvw = [[0.0; LANES]; 3];
        for (axis, coordinate) in uvw.iter_mut().zip(&input[..self.coordinates]) {
            *axis = *coordinate;
        }

        // 1D runs as a degenerate 2D sample on row zero.
        if self.state.texture_type == TextureType::D1 {
            uvw[1] = [0.0; LANES];
        }

        let bias_or_lod = match self.function.method {
            // Lod is incompatible with the Bias operand, so when
            // present it always directly follows the coordinates.
            SamplingMethod::ExplicitLod => input[self.coordinates],
            SamplingMethod::Implicit => [0.0; LANES],
        };

        let sample = self.engine.sample_texture(
            &image.texture,
            &self.state,
            uvw[0],
            uvw[1],
            uvw[2],
            [0.0; LANES],
            bias_or_lod,
            Vector4::ZERO,
            Vector4::ZERO,
            Vector4::ZERO,
            self.function,
            constants,
        );

        output[0] = sample.x;
        output[1] = sample.y;
        output[2] = sample.z;
        output[3] = sample.w;
    }
}
