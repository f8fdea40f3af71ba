use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use hashbrown::HashMap;
use parking_lot::Mutex;

use crate::generic::{ImageViewDesc, SamplerDesc};

use super::engine::TextureEngine;
use super::routine::{EngineRoutineBuilder, RoutineBuilder, SamplerRoutine, SamplingMethod};
use super::state::{SamplerState, TranslateError};

/// Specialization cache for compiled sampling routines.
///
/// Routines are built at most once per (view, sampler) identity pair
/// and reused for the cache's lifetime; there is no eviction. Two known
/// limitations of the keying are kept as-is:
///
/// - Identities carry no generation counter. Reusing an id after the
///   original object's destruction serves the stale routine.
/// - The key ignores the sampling method and the call site's operand
///   shape, so the first acquire for a pair fixes the compiled method.
pub struct SamplerCache {
    routines: Mutex<HashMap<u64, Arc<dyn SamplerRoutine>>>,
    builder: Arc<dyn RoutineBuilder>,
    builds: AtomicU64,
}

impl SamplerCache {
    pub fn new(builder: Arc<dyn RoutineBuilder>) -> Self {
        SamplerCache {
            routines: Mutex::new(HashMap::new()),
            builder,
            builds: AtomicU64::new(0),
        }
    }

    /// Cache compiling routines over `engine` with the default
    /// strategy.
    pub fn with_engine(engine: Arc<dyn TextureEngine>) -> Self {
        SamplerCache::new(Arc::new(EngineRoutineBuilder::new(engine)))
    }

    /// Routine for an implicit-LOD sampling instruction.
    pub fn acquire_implicit(
        &self,
        view: &ImageViewDesc,
        sampler: &SamplerDesc,
    ) -> Result<Arc<dyn SamplerRoutine>, TranslateError> {
        self.acquire(SamplingMethod::Implicit, view, sampler)
    }

    /// Routine for an explicit-LOD sampling instruction.
    pub fn acquire_explicit_lod(
        &self,
        view: &ImageViewDesc,
        sampler: &SamplerDesc,
    ) -> Result<Arc<dyn SamplerRoutine>, TranslateError> {
        self.acquire(SamplingMethod::ExplicitLod, view, sampler)
    }

    fn acquire(
        &self,
        method: SamplingMethod,
        view: &ImageViewDesc,
        sampler: &SamplerDesc,
    ) -> Result<Arc<dyn SamplerRoutine>, TranslateError> {
        let key = (u64::from(view.id) << 32) | u64::from(sampler.id);

        // The lock is held across lookup and, on a miss, the whole
        // translate + build + insert sequence: at most one build per
        // key, and no caller observes a partial entry.
        let mut routines = self.routines.lock();
        if let Some(routine) = routines.get(&key) {
            tracing::trace!(view = view.id, sampler = sampler.id, "routine cache hit");
            return Ok(routine.clone());
        }

        let state = SamplerState::translate(view, sampler)?;
        let routine = self.builder.build(&state, method);
        routines.insert(key, routine.clone());
        self.builds.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(
            view = view.id,
            sampler = sampler.id,
            ?method,
            "compiled sampling routine"
        );
        Ok(routine)
    }

    /// Number of routines built so far.
    pub fn builds(&self) -> u64 {
        self.builds.load(Ordering::Relaxed)
    }

    pub fn len(&self) -> usize {
        self.routines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.routines.lock().is_empty()
    }
}

#[cfg(test)]
mod test_cache {
    use approx::assert_abs_diff_eq;

    use crate::generic::{AddressMode, Filter, MipMapMode, PixelFormat, ViewType};
    use crate::soft::engine::{Constants, ImageDescriptor, ReferenceEngine, Texture, LANES};

    use super::*;

    fn cache() -> SamplerCache {
        SamplerCache::with_engine(Arc::new(ReferenceEngine::new()))
    }

    fn view(id: u32) -> ImageViewDesc {
        ImageViewDesc::new(id, ViewType::D2, PixelFormat::Rgba8Unorm)
    }

    fn sampler(id: u32) -> SamplerDesc {
        SamplerDesc::new(id)
    }

    #[test]
    fn test_acquire_is_idempotent() {
        let cache = cache();
        let first = cache.acquire_implicit(&view(1), &sampler(2)).unwrap();
        for _ in 0..10 {
            let again = cache.acquire_implicit(&view(1), &sampler(2)).unwrap();
            assert!(Arc::ptr_eq(&first, &again));
        }
        assert_eq!(cache.builds(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_distinct_pairs_build_distinct_routines() {
        let cache = cache();
        let a = cache.acquire_implicit(&view(1), &sampler(1)).unwrap();
        let b = cache.acquire_implicit(&view(1), &sampler(2)).unwrap();
        let c = cache.acquire_implicit(&view(2), &sampler(1)).unwrap();

        assert!(!Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &c));
        assert!(!Arc::ptr_eq(&b, &c));
        assert_eq!(cache.builds(), 3);
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_methods_share_one_entry_per_pair() {
        // The key ignores the method; the first acquire wins.
        let cache = cache();
        let implicit = cache.acquire_implicit(&view(1), &sampler(2)).unwrap();
        let explicit = cache.acquire_explicit_lod(&view(1), &sampler(2)).unwrap();
        assert!(Arc::ptr_eq(&implicit, &explicit));
        assert_eq!(cache.builds(), 1);
    }

    #[test]
    fn test_rejected_pair_caches_nothing() {
        let cache = cache();
        let bad = SamplerDesc {
            anisotropy: Some(8.0),
            ..sampler(2)
        };
        assert!(cache.acquire_implicit(&view(1), &bad).is_err());
        assert_eq!(cache.builds(), 0);
        assert!(cache.is_empty());

        // The same key stays buildable with a valid sampler.
        cache.acquire_implicit(&view(1), &sampler(2)).unwrap();
        assert_eq!(cache.builds(), 1);
    }

    #[test]
    fn test_concurrent_acquire_builds_once() {
        let cache = Arc::new(cache());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let cache = cache.clone();
            handles.push(std::thread::spawn(move || {
                cache.acquire_implicit(&view(7), &sampler(3)).unwrap();
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(cache.builds(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_red_texture_end_to_end() {
        let cache = cache();

        let view = ImageViewDesc::new(7, ViewType::D2, PixelFormat::Rgba8Unorm);
        let sampler = SamplerDesc::new(3)
            .filter(Filter::Linear, Filter::Linear)
            .mip_map_mode(MipMapMode::Linear)
            .address_mode(AddressMode::Repeat);

        let routine = cache.acquire_implicit(&view, &sampler).unwrap();

        let image = ImageDescriptor::new(Arc::new(Texture::solid(
            PixelFormat::Rgba8Unorm,
            4,
            4,
            [1.0, 0.0, 0.0, 1.0],
        )));
        let input = [[0.5; LANES], [0.5; LANES]];
        let mut output = [[0.0; LANES]; 4];
        routine.invoke(&image, &input, &mut output, &Constants::default());

        for lane in 0..LANES {
            assert_abs_diff_eq!(output[0][lane], 1.0, epsilon = 1e-6);
            assert_abs_diff_eq!(output[1][lane], 0.0, epsilon = 1e-6);
            assert_abs_diff_eq!(output[2][lane], 0.0, epsilon = 1e-6);
            assert_abs_diff_eq!(output[3][lane], 1.0, epsilon = 1e-6);
        }

        let again = cache.acquire_implicit(&view, &sampler).unwrap();
        assert!(Arc::ptr_eq(&routine, &again));
        assert_eq!(cache.builds(), 1);
    }
}
