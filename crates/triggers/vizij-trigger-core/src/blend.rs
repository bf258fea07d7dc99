//! Blend weight reconstruction for offline preview.
//!
//! - 1-D trees: the preview position is scaled into threshold space and the two
//!   bracketing children are linearly interpolated, matching the runtime.
//! - 2-D freeform trees (cartesian and directional): inverse-distance weighting
//!   around the position read from the blend parameters. This is an
//!   approximation for previews, not the runtime's gradient-band blending.
//!
//! Weights always come back non-negative and either sum to one or are all zero.

use crate::config::Config;
use crate::data::{BlendTree, BlendType, Vec2};

/// Read access to the animator's current blend parameter values.
pub trait BlendParameters {
    fn blend_value(&self, name: &str) -> Option<f32>;
}

impl BlendParameters for std::collections::HashMap<String, f32> {
    fn blend_value(&self, name: &str) -> Option<f32> {
        self.get(name).copied()
    }
}

impl BlendParameters for hashbrown::HashMap<String, f32> {
    fn blend_value(&self, name: &str) -> Option<f32> {
        self.get(name).copied()
    }
}

/// Float comparison with the tolerance the host runtime uses.
#[inline]
pub fn approximately(a: f32, b: f32) -> bool {
    (b - a).abs() < (1e-6 * a.abs().max(b.abs())).max(f32::EPSILON * 8.0)
}

/// Position of `v` between `a` and `b`, clamped to [0, 1]; 0 when `a == b`.
#[inline]
pub fn inverse_lerp(a: f32, b: f32, v: f32) -> f32 {
    if a != b {
        ((v - a) / (b - a)).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Scale a normalized time into the tree's threshold range.
pub fn target_weight_1d(tree: &BlendTree, normalized_time: f32) -> f32 {
    let max = tree.max_threshold();
    let min = tree.min_threshold();
    (normalized_time * max).max(min).min(max)
}

/// Tightest thresholds bracketing a target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Neighbors {
    pub lower: Option<f32>,
    pub upper: Option<f32>,
}

impl Neighbors {
    pub fn around(tree: &BlendTree, target: f32) -> Self {
        let mut lower: Option<f32> = None;
        let mut upper: Option<f32> = None;
        for t in tree.children.iter().map(|c| c.threshold) {
            if t <= target && lower.map_or(true, |l| t > l) {
                lower = Some(t);
            }
            if t >= target && upper.map_or(true, |u| t < u) {
                upper = Some(t);
            }
        }
        Self { lower, upper }
    }
}

/// Unnormalized 1-D weight of the child at `threshold`.
pub fn child_weight_1d(neighbors: Neighbors, threshold: f32, target: f32) -> f32 {
    match (neighbors.lower, neighbors.upper) {
        (Some(lo), Some(hi)) => {
            if approximately(threshold, lo) {
                1.0 - inverse_lerp(lo, hi, target)
            } else if approximately(threshold, hi) {
                inverse_lerp(lo, hi, target)
            } else {
                0.0
            }
        }
        _ => {
            if approximately(target, threshold) {
                1.0
            } else {
                0.0
            }
        }
    }
}

/// Unnormalized freeform 2-D weight of the child at `position`.
pub fn child_weight_2d(target: Vec2, position: Vec2, epsilon: f32) -> f32 {
    (1.0 / (target.distance(position) + epsilon)).clamp(0.0, 1.0)
}

fn parameter(params: &dyn BlendParameters, name: &str) -> f32 {
    params.blend_value(name).unwrap_or_else(|| {
        log::warn!("blend parameter '{name}' not found; using 0");
        0.0
    })
}

/// Per-child weights for `tree` previewed at `normalized_time`, in child order.
pub fn reconstruct_weights(
    tree: &BlendTree,
    normalized_time: f32,
    params: &dyn BlendParameters,
    cfg: &Config,
) -> Vec<f32> {
    let mut weights: Vec<f32> = match tree.blend_type {
        BlendType::Simple1D => {
            let target = target_weight_1d(tree, normalized_time);
            let neighbors = Neighbors::around(tree, target);
            tree.children
                .iter()
                .map(|c| child_weight_1d(neighbors, c.threshold, target))
                .collect()
        }
        BlendType::FreeformCartesian2D | BlendType::FreeformDirectional2D => {
            let target = Vec2::new(
                parameter(params, &tree.blend_parameter),
                parameter(params, &tree.blend_parameter_y),
            );
            tree.children
                .iter()
                .map(|c| child_weight_2d(target, c.position, cfg.freeform_epsilon))
                .collect()
        }
    };

    let total: f32 = weights.iter().sum();
    if total > 0.0 && total.is_finite() {
        for w in weights.iter_mut() {
            *w /= total;
        }
    } else {
        if !weights.is_empty() {
            log::warn!(
                "blend tree '{}' produced no usable weight at t={normalized_time}; previewing with zero weights",
                tree.name
            );
        }
        weights.iter_mut().for_each(|w| *w = 0.0);
    }
    weights
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverse_lerp_matches_host_semantics() {
        assert_eq!(inverse_lerp(0.0, 0.5, 0.25), 0.5);
        assert_eq!(inverse_lerp(0.0, 1.0, 2.0), 1.0);
        assert_eq!(inverse_lerp(0.0, 1.0, -1.0), 0.0);
        assert_eq!(inverse_lerp(0.3, 0.3, 0.3), 0.0);
    }

    #[test]
    fn approximately_tolerates_rounding() {
        assert!(approximately(0.1 + 0.2, 0.3));
        assert!(!approximately(0.3, 0.31));
    }

    #[test]
    fn one_dimensional_neighbors() {
        let n = Neighbors {
            lower: Some(0.0),
            upper: Some(0.5),
        };
        assert_eq!(child_weight_1d(n, 0.0, 0.25), 0.5);
        assert_eq!(child_weight_1d(n, 0.5, 0.25), 0.5);
        assert_eq!(child_weight_1d(n, 1.0, 0.25), 0.0);

        let degenerate = Neighbors {
            lower: None,
            upper: Some(0.5),
        };
        assert_eq!(child_weight_1d(degenerate, 0.5, 0.5), 1.0);
        assert_eq!(child_weight_1d(degenerate, 0.5, 0.1), 0.0);
    }

    #[test]
    fn two_dimensional_weight_is_clamped() {
        let w = child_weight_2d(Vec2::new(0.0, 0.0), Vec2::new(0.0, 0.0), 0.001);
        assert_eq!(w, 1.0);
        let far = child_weight_2d(Vec2::new(0.0, 0.0), Vec2::new(4.0, 0.0), 0.0);
        assert_eq!(far, 0.25);
    }
}
