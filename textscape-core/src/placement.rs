/// Placement emission: scatter descriptors for one term match
use rand::Rng;
use std::f64::consts::PI;

/// Height below which scattered objects sit relative to the world origin.
/// Scene calibration constant shared with the demos' camera framing.
const VERTICAL_BIAS: f64 = 10.0;

/// Per-term emission parameters.
///
/// One immutable value per visualize invocation; frontends build it from a
/// `TermSpec` rather than sharing a live panel-bound object with the emitter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementConfig {
    /// Number of placements produced per term match.
    pub count: usize,
    /// Nominal horizontal scatter diameter.
    pub diameter: f64,
    /// Draw each rotation axis independently from `[0, 2π)`.
    pub randomized: bool,
    /// Widen the scatter diameter with height, capped at 3x.
    pub dia_increase: bool,
    /// Derive one rotation scalar from height and apply it to all three axes.
    pub height_rotation: bool,
    /// Scale the object uniformly by `height * 0.1`.
    pub height_scale: bool,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            count: 100,
            diameter: 10.0,
            randomized: false,
            dia_increase: false,
            height_rotation: false,
            height_scale: false,
        }
    }
}

/// A single scatter descriptor, consumed once by a rendering frontend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub position: [f64; 3],
    pub rotation: [f64; 3],
    pub scale: f64,
}

/// Height-dependent widening factor for the scatter diameter.
pub fn diameter_multiplier(height: f64) -> f64 {
    (1.0 + height * 0.09).min(3.0)
}

/// Linear remap of `value` from `[in_min, in_max]` to `[out_min, out_max]`.
fn map_linear(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    out_min + (value - in_min) * (out_max - out_min) / (in_max - in_min)
}

/// Emit `config.count` placements for one term match at `height`.
///
/// X/Z offsets are independent uniform draws over the effective diameter;
/// the Y offset is the height minus the fixed vertical bias. When both
/// rotation flags are set, the height-derived rotation wins.
///
/// The height-derived path maps height from the nominal `[0, 10]` domain to
/// `[0, π]`, multiplies by a single uniform `[0, 1)` draw, and applies the
/// identical scalar to all three axes. The all-axes coupling is observed
/// product behavior; pending clarification it is kept as is.
pub fn emit<R: Rng + ?Sized>(height: f64, config: &PlacementConfig, rng: &mut R) -> Vec<Placement> {
    let dia_multiplier = if config.dia_increase {
        diameter_multiplier(height)
    } else {
        1.0
    };
    let effective_diameter = config.diameter * dia_multiplier;

    (0..config.count)
        .map(|_| {
            let x = (rng.gen::<f64>() - 0.5) * effective_diameter;
            let z = (rng.gen::<f64>() - 0.5) * effective_diameter;
            let y = height - VERTICAL_BIAS;

            let scale = if config.height_scale {
                height * 0.1
            } else {
                1.0
            };

            let mut rotation = [0.0; 3];
            if config.randomized {
                rotation = [
                    rng.gen::<f64>() * 2.0 * PI,
                    rng.gen::<f64>() * 2.0 * PI,
                    rng.gen::<f64>() * 2.0 * PI,
                ];
            }
            if config.height_rotation {
                let amount = map_linear(height, 0.0, 10.0, 0.0, PI);
                let angle = amount * rng.gen::<f64>();
                rotation = [angle, angle, angle];
            }

            Placement {
                position: [x, y, z],
                rotation,
                scale,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_emit_count_and_bounds() {
        let config = PlacementConfig {
            count: 100,
            diameter: 10.0,
            dia_increase: true,
            ..Default::default()
        };
        let height = 12.0;
        let placements = emit(height, &config, &mut seeded());
        assert_eq!(placements.len(), 100);

        let half = 0.5 * config.diameter * diameter_multiplier(height);
        for p in &placements {
            assert!(p.position[0] >= -half && p.position[0] < half);
            assert!(p.position[2] >= -half && p.position[2] < half);
            assert_eq!(p.position[1], height - 10.0);
        }
    }

    #[test]
    fn test_diameter_multiplier_caps_at_three() {
        assert_eq!(diameter_multiplier(0.0), 1.0);
        assert!((diameter_multiplier(10.0) - 1.9).abs() < 1e-12);
        assert_eq!(diameter_multiplier(100.0), 3.0);
    }

    #[test]
    fn test_emit_defaults_leave_rotation_and_scale_neutral() {
        let config = PlacementConfig {
            count: 5,
            ..Default::default()
        };
        for p in emit(4.0, &config, &mut seeded()) {
            assert_eq!(p.rotation, [0.0, 0.0, 0.0]);
            assert_eq!(p.scale, 1.0);
        }
    }

    #[test]
    fn test_emit_height_scale() {
        let config = PlacementConfig {
            count: 3,
            height_scale: true,
            ..Default::default()
        };
        for p in emit(6.0, &config, &mut seeded()) {
            assert!((p.scale - 0.6).abs() < 1e-12);
        }
    }

    #[test]
    fn test_height_rotation_couples_all_axes() {
        let config = PlacementConfig {
            count: 50,
            height_rotation: true,
            ..Default::default()
        };
        let height = 5.0;
        let ceiling = map_linear(height, 0.0, 10.0, 0.0, PI);
        for p in emit(height, &config, &mut seeded()) {
            assert_eq!(p.rotation[0], p.rotation[1]);
            assert_eq!(p.rotation[1], p.rotation[2]);
            assert!(p.rotation[0] >= 0.0 && p.rotation[0] < ceiling);
        }
    }

    #[test]
    fn test_randomized_rotation_draws_axes_independently() {
        let config = PlacementConfig {
            count: 20,
            randomized: true,
            ..Default::default()
        };
        let placements = emit(3.0, &config, &mut seeded());
        assert!(placements
            .iter()
            .any(|p| p.rotation[0] != p.rotation[1] || p.rotation[1] != p.rotation[2]));
        for p in &placements {
            for axis in p.rotation {
                assert!(axis >= 0.0 && axis < 2.0 * PI);
            }
        }
    }

    #[test]
    fn test_height_rotation_overrides_randomized() {
        let config = PlacementConfig {
            count: 10,
            randomized: true,
            height_rotation: true,
            ..Default::default()
        };
        for p in emit(8.0, &config, &mut seeded()) {
            assert_eq!(p.rotation[0], p.rotation[1]);
            assert_eq!(p.rotation[1], p.rotation[2]);
        }
    }

    #[test]
    fn test_emit_is_deterministic_under_a_fixed_seed() {
        let config = PlacementConfig {
            count: 25,
            randomized: true,
            height_scale: true,
            ..Default::default()
        };
        let a = emit(9.0, &config, &mut StdRng::seed_from_u64(42));
        let b = emit(9.0, &config, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_emit_zero_count_is_empty() {
        let config = PlacementConfig {
            count: 0,
            ..Default::default()
        };
        assert!(emit(1.0, &config, &mut seeded()).is_empty());
    }
}
