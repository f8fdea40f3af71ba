use std::fmt;

use crate::generic::{
    AddressMode, CompareFunction, Filter, ImageViewDesc, MipMapMode, SamplerDesc, Swizzle, ViewType,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextureType {
    D1,
    D2,
    Cube,
}

/// Combined magnification/minification filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FilterType {
    Point,
    MinLinearMagPoint,
    MinPointMagLinear,
    Linear,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    Wrap,
    Clamp,
    Mirror,
    MirrorOnce,
    Border,
    /// Cross-face-aware sampling at cube map edges.
    Seamless,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MipmapFilter {
    Point,
    Linear,
}

/// Translation failure for a view/sampler pair.
///
/// Neither variant is recoverable into a usable state: a rejected pair
/// never produces a [`SamplerState`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TranslateError {
    /// The pair names a configuration with no software path.
    #[error("unsupported {field}: {value}")]
    Unsupported { field: &'static str, value: String },

    /// A sampler feature outside this backend's scope was enabled.
    #[error("{field} must stay disabled, requested {value}")]
    Rejected { field: &'static str, value: String },
}

impl TranslateError {
    fn unsupported(field: &'static str, value: impl fmt::Debug) -> Self {
        TranslateError::Unsupported {
            field,
            value: format!("{value:?}"),
        }
    }

    fn rejected(field: &'static str, value: impl fmt::Debug) -> Self {
        TranslateError::Rejected {
            field,
            value: format!("{value:?}"),
        }
    }
}

/// Normalized filtering descriptor consumed by the texture engine.
///
/// Immutable once built; derived from an (image view, sampler) pair by
/// [`SamplerState::translate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SamplerState {
    pub texture_type: TextureType,
    pub filter: FilterType,
    pub addressing_u: AddressingMode,
    pub addressing_v: AddressingMode,
    pub addressing_w: AddressingMode,
    pub mipmap: MipmapFilter,
    pub srgb: bool,
    pub swizzle: Swizzle,
    /// Always `None`: comparison sampling is bypassed in this backend.
    pub compare: Option<CompareFunction>,
    /// Fixed `false` in this backend.
    pub high_precision_filtering: bool,
}

impl SamplerState {
    /// Map an (image view, sampler) pair onto a normalized state.
    ///
    /// Sampler features with no software path are rejected up front;
    /// there is no degraded fallback for them.
    pub fn translate(
        view: &ImageViewDesc,
        sampler: &SamplerDesc,
    ) -> Result<Self, TranslateError> {
        check_sampler(sampler)?;

        Ok(SamplerState {
            texture_type: texture_type(view.view_type)?,
            filter: filter_type(sampler.mag_filter, sampler.min_filter),
            addressing_u: addressing_mode(sampler.address_mode[0], view.view_type)?,
            addressing_v: addressing_mode(sampler.address_mode[1], view.view_type)?,
            addressing_w: addressing_mode(sampler.address_mode[2], view.view_type)?,
            mipmap: mipmap_filter(sampler.mip_map_mode),
            srgb: view.format.is_srgb(),
            swizzle: view.swizzle,
            compare: None,
            high_precision_filtering: false,
        })
    }
}

fn check_sampler(sampler: &SamplerDesc) -> Result<(), TranslateError> {
    if let Some(compare) = sampler.compare {
        return Err(TranslateError::rejected("compare", compare));
    }
    if sampler.lod_bias != 0.0 {
        return Err(TranslateError::rejected("lod_bias", sampler.lod_bias));
    }
    if let Some(anisotropy) = sampler.anisotropy {
        return Err(TranslateError::rejected("anisotropy", anisotropy));
    }
    if !sampler.normalized {
        return Err(TranslateError::rejected("unnormalized coordinates", true));
    }
    Ok(())
}

fn texture_type(view_type: ViewType) -> Result<TextureType, TranslateError> {
    match view_type {
        ViewType::D1 => Ok(TextureType::D1),
        ViewType::D2 => Ok(TextureType::D2),
        ViewType::Cube => Ok(TextureType::Cube),
        ViewType::D3 | ViewType::D1Array | ViewType::D2Array | ViewType::CubeArray => {
            Err(TranslateError::unsupported("view type", view_type))
        }
    }
}

fn filter_type(mag: Filter, min: Filter) -> FilterType {
    match (mag, min) {
        (Filter::Nearest, Filter::Nearest) => FilterType::Point,
        (Filter::Nearest, Filter::Linear) => FilterType::MinLinearMagPoint,
        (Filter::Linear, Filter::Nearest) => FilterType::MinPointMagLinear,
        (Filter::Linear, Filter::Linear) => FilterType::Linear,
    }
}

fn mipmap_filter(mode: MipMapMode) -> MipmapFilter {
    match mode {
        MipMapMode::Nearest => MipmapFilter::Point,
        MipMapMode::Linear => MipmapFilter::Linear,
    }
}

fn addressing_mode(
    mode: AddressMode,
    view_type: ViewType,
) -> Result<AddressingMode, TranslateError> {
    // Cube images ignore the sampler's wrap modes. Edge texels are
    // filtered across adjacent faces instead, which is the Seamless
    // addressing mode.
    match view_type {
        ViewType::Cube | ViewType::CubeArray => return Ok(AddressingMode::Seamless),
        ViewType::D1 | ViewType::D2 => {}
        ViewType::D3 | ViewType::D1Array | ViewType::D2Array => {
            return Err(TranslateError::unsupported("view type", view_type));
        }
    }

    Ok(match mode {
        AddressMode::Repeat => AddressingMode::Wrap,
        AddressMode::MirrorRepeat => AddressingMode::Mirror,
        AddressMode::ClampToEdge => AddressingMode::Clamp,
        AddressMode::ClampToBorder => AddressingMode::Border,
        AddressMode::MirrorClampToEdge => AddressingMode::MirrorOnce,
    })
}

#[cfg(test)]
mod test_state {
    use crate::generic::{ComponentSwizzle, PixelFormat};

    use super::*;

    const ALL_ADDRESS_MODES: [AddressMode; 5] = [
        AddressMode::Repeat,
        AddressMode::MirrorRepeat,
        AddressMode::ClampToEdge,
        AddressMode::ClampToBorder,
        AddressMode::MirrorClampToEdge,
    ];

    #[test]
    fn test_filter_table_bijective() {
        let combos = [
            (Filter::Nearest, Filter::Nearest, FilterType::Point),
            (Filter::Nearest, Filter::Linear, FilterType::MinLinearMagPoint),
            (Filter::Linear, Filter::Nearest, FilterType::MinPointMagLinear),
            (Filter::Linear, Filter::Linear, FilterType::Linear),
        ];
        let mut seen = Vec::new();
        for (mag, min, expected) in combos {
            let got = filter_type(mag, min);
            assert_eq!(got, expected);
            assert!(!seen.contains(&got));
            seen.push(got);
        }
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn test_mipmap_table() {
        assert_eq!(mipmap_filter(MipMapMode::Nearest), MipmapFilter::Point);
        assert_eq!(mipmap_filter(MipMapMode::Linear), MipmapFilter::Linear);
    }

    #[test]
    fn test_cube_addressing_always_seamless() {
        for view_type in [ViewType::Cube, ViewType::CubeArray] {
            for mode in ALL_ADDRESS_MODES {
                assert_eq!(
                    addressing_mode(mode, view_type),
                    Ok(AddressingMode::Seamless),
                );
            }
        }
    }

    #[test]
    fn test_flat_addressing_table() {
        for view_type in [ViewType::D1, ViewType::D2] {
            assert_eq!(
                addressing_mode(AddressMode::Repeat, view_type),
                Ok(AddressingMode::Wrap),
            );
            assert_eq!(
                addressing_mode(AddressMode::MirrorRepeat, view_type),
                Ok(AddressingMode::Mirror),
            );
            assert_eq!(
                addressing_mode(AddressMode::ClampToEdge, view_type),
                Ok(AddressingMode::Clamp),
            );
            assert_eq!(
                addressing_mode(AddressMode::ClampToBorder, view_type),
                Ok(AddressingMode::Border),
            );
            assert_eq!(
                addressing_mode(AddressMode::MirrorClampToEdge, view_type),
                Ok(AddressingMode::MirrorOnce),
            );
        }
    }

    #[test]
    fn test_addressing_rejects_other_dimensionalities() {
        for view_type in [ViewType::D3, ViewType::D1Array, ViewType::D2Array] {
            assert!(matches!(
                addressing_mode(AddressMode::Repeat, view_type),
                Err(TranslateError::Unsupported { .. }),
            ));
        }
    }

    #[test]
    fn test_texture_type_table() {
        assert_eq!(texture_type(ViewType::D1), Ok(TextureType::D1));
        assert_eq!(texture_type(ViewType::D2), Ok(TextureType::D2));
        assert_eq!(texture_type(ViewType::Cube), Ok(TextureType::Cube));
        for view_type in [
            ViewType::D3,
            ViewType::D1Array,
            ViewType::D2Array,
            ViewType::CubeArray,
        ] {
            assert!(matches!(
                texture_type(view_type),
                Err(TranslateError::Unsupported { .. }),
            ));
        }
    }

    #[test]
    fn test_translate_rejects_unsupported_view_type() {
        let view = ImageViewDesc::new(1, ViewType::D3, PixelFormat::Rgba8Unorm);
        let sampler = SamplerDesc::new(2);
        assert!(matches!(
            SamplerState::translate(&view, &sampler),
            Err(TranslateError::Unsupported { field: "view type", .. }),
        ));
    }

    #[test]
    fn test_translate_rejects_forbidden_features() {
        let view = ImageViewDesc::new(1, ViewType::D2, PixelFormat::Rgba8Unorm);

        let compare = SamplerDesc {
            compare: Some(CompareFunction::Less),
            ..SamplerDesc::new(2)
        };
        assert!(matches!(
            SamplerState::translate(&view, &compare),
            Err(TranslateError::Rejected { field: "compare", .. }),
        ));

        let biased = SamplerDesc {
            lod_bias: 0.5,
            ..SamplerDesc::new(2)
        };
        assert!(matches!(
            SamplerState::translate(&view, &biased),
            Err(TranslateError::Rejected { field: "lod_bias", .. }),
        ));

        let aniso = SamplerDesc {
            anisotropy: Some(16.0),
            ..SamplerDesc::new(2)
        };
        assert!(matches!(
            SamplerState::translate(&view, &aniso),
            Err(TranslateError::Rejected { field: "anisotropy", .. }),
        ));

        let unnormalized = SamplerDesc {
            normalized: false,
            ..SamplerDesc::new(2)
        };
        assert!(matches!(
            SamplerState::translate(&view, &unnormalized),
            Err(TranslateError::Rejected { field: "unnormalized coordinates", .. }),
        ));
    }

    #[test]
    fn test_translate_passthrough() {
        let swizzle = Swizzle {
            r: ComponentSwizzle::B,
            g: ComponentSwizzle::G,
            b: ComponentSwizzle::R,
            a: ComponentSwizzle::One,
        };
        let view = ImageViewDesc::new(1, ViewType::D2, PixelFormat::Rgba8Srgb).swizzle(swizzle);
        let sampler = SamplerDesc::new(2)
            .filter(Filter::Linear, Filter::Nearest)
            .mip_map_mode(MipMapMode::Linear)
            .address_mode(AddressMode::ClampToEdge);

        let state = SamplerState::translate(&view, &sampler).unwrap();
        assert_eq!(state.texture_type, TextureType::D2);
        assert_eq!(state.filter, FilterType::MinLinearMagPoint);
        assert_eq!(state.addressing_u, AddressingMode::Clamp);
        assert_eq!(state.addressing_v, AddressingMode::Clamp);
        assert_eq!(state.addressing_w, AddressingMode::Clamp);
        assert_eq!(state.mipmap, MipmapFilter::Linear);
        assert!(state.srgb);
        assert_eq!(state.swizzle, swizzle);
        assert_eq!(state.compare, None);
        assert!(!state.high_precision_filtering);
    }

    #[test]
    fn test_translate_per_axis_addressing() {
        let view = ImageViewDesc::new(1, ViewType::D2, PixelFormat::Rgba8Unorm);
        let sampler = SamplerDesc {
            address_mode: [
                AddressMode::Repeat,
                AddressMode::ClampToBorder,
                AddressMode::MirrorRepeat,
            ],
            ..SamplerDesc::new(2)
        };

        let state = SamplerState::translate(&view, &sampler).unwrap();
        assert_eq!(state.addressing_u, AddressingMode::Wrap);
        assert_eq!(state.addressing_v, AddressingMode::Border);
        assert_eq!(state.addressing_w, AddressingMode::Mirror);
    }
}
