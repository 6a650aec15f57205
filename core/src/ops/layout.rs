//! Feature map layouts and the shared layout-aware shape derivation.
use crate::internal::*;
use std::fmt;

/// Memory layout of a feature map.
///
/// NHWC is plain channel-last: (1, h, w, c). NHCWB16 packs channels in
/// bricks of 16: (1, h, ceil(c/16), w, 16).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FeatureLayout {
    #[default]
    Nhwc,
    Nhcwb16,
}

impl fmt::Display for FeatureLayout {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FeatureLayout::Nhwc => write!(fmt, "NHWC"),
            FeatureLayout::Nhcwb16 => write!(fmt, "NHCWB16"),
        }
    }
}

pub const BRICK: usize = 16;

/// Derives the output shape of an elementwise NPU operator from the input
/// feature map shape, the layouts on both sides and the declared output
/// channel count. Shared by all elementwise operators.
pub fn elementwise_output_shape(
    ifm_shape: &[Dim],
    ifm_layout: FeatureLayout,
    ofm_layout: FeatureLayout,
    ofm_channels: &Dim,
) -> BasaltResult<TVec<Dim>> {
    // reduce the ifm to (n, h, w), dropping its channel information
    let (n, h, w) = match ifm_layout {
        FeatureLayout::Nhwc => {
            ensure!(
                ifm_shape.len() == 4,
                "Expected a rank 4 NHWC input feature map, got {ifm_shape:?}"
            );
            (&ifm_shape[0], &ifm_shape[1], &ifm_shape[2])
        }
        FeatureLayout::Nhcwb16 => {
            ensure!(
                ifm_shape.len() == 5,
                "Expected a rank 5 NHCWB16 input feature map, got {ifm_shape:?}"
            );
            (&ifm_shape[0], &ifm_shape[1], &ifm_shape[3])
        }
    };
    match ofm_layout {
        FeatureLayout::Nhwc => {
            Ok(tvec!(n.clone(), h.clone(), w.clone(), ofm_channels.clone()))
        }
        FeatureLayout::Nhcwb16 => {
            let bricks = ofm_channels
                .divceil(BRICK)
                .context("NHCWB16 output needs a concrete channel count")?;
            Ok(tvec!(n.clone(), h.clone(), bricks, w.clone(), BRICK.into()))
        }
    }
}
