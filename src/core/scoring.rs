//! Scoring module - stage parameter formulas and match points
//!
//! Stages are numbered from 1. All difficulty scaling lives here so the
//! board generator and the session share one source of truth.

use crate::types::{
    BASE_LAYERS, BASE_PAIRS, LAYER_CAP, MATCH_BASE_POINTS, PAIRS_PER_STAGE, PAIR_CAP,
};

/// Number of tile pairs dealt for a stage, capped at the board's capacity.
pub fn pair_count(stage: u32) -> u32 {
    (BASE_PAIRS + stage * PAIRS_PER_STAGE).min(PAIR_CAP)
}

/// Number of layers in the stage's pyramid.
pub fn layer_count(stage: u32) -> u8 {
    let layers = BASE_LAYERS as u32 + stage / 2;
    layers.min(LAYER_CAP as u32) as u8
}

/// Points awarded for clearing one pair at the given stage.
pub fn match_points(stage: u32) -> u32 {
    MATCH_BASE_POINTS * stage
}
