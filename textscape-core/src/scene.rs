/// Renderer-agnostic scene description and the visualization pipeline
use crate::config::{Color, Shape, TermSpec, VisualizationSpec};
use crate::placement::{emit, Placement};
use crate::text::{find_matches, map_height, tokenize};
use crate::transform::RotationState;
use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One placed primitive: transform and material values for a frontend
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub shape: Shape,
    pub position: [f32; 3],
    pub rotation: RotationState,
    pub scale: f32,
    pub color: Color,
}

impl SceneObject {
    /// Narrow an emitted placement into a renderable object for its term
    pub fn materialize(spec: &TermSpec, placement: &Placement) -> Self {
        Self {
            shape: spec.shape,
            position: [
                placement.position[0] as f32,
                placement.position[1] as f32,
                placement.position[2] as f32,
            ],
            rotation: RotationState::new(
                placement.rotation[0] as f32,
                placement.rotation[1] as f32,
                placement.rotation[2] as f32,
            ),
            scale: placement.scale as f32,
            color: spec.color,
        }
    }
}

/// All objects placed for one search term, toggleable as a unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneGroup {
    pub name: String,
    pub color: Color,
    pub visible: bool,
    pub objects: Vec<SceneObject>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionalLight {
    pub direction: [f32; 3],
    pub intensity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmbientLight {
    pub intensity: f32,
}

/// The built scene: background, lights, one group per term
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub background: Color,
    pub directional: DirectionalLight,
    pub ambient: AmbientLight,
    pub groups: Vec<SceneGroup>,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            // Near-black backdrop the demos frame their scatter against
            background: Color::new(0.04, 0.04, 0.04),
            directional: DirectionalLight {
                direction: [0.0, 0.0, 1.0],
                intensity: 1.0,
            },
            ambient: AmbientLight { intensity: 0.25 },
            groups: Vec::new(),
        }
    }
}

impl Scene {
    /// Total object count across all groups
    pub fn object_count(&self) -> usize {
        self.groups.iter().map(|g| g.objects.len()).sum()
    }

    pub fn toggle_group(&mut self, index: usize) {
        if let Some(group) = self.groups.get_mut(index) {
            group.visible = !group.visible;
        }
    }
}

/// Run the full pipeline for a visualization spec.
///
/// Tokenizes the source once, then for every term: locate matches, map each
/// match index to a height, emit placements, and materialize them into the
/// term's scene group. Terms without matches still get an (empty) group so
/// frontend visibility toggles line up with the spec's term order.
pub fn build_scene<R: Rng + ?Sized>(spec: &VisualizationSpec, rng: &mut R) -> Scene {
    let tokens = tokenize(&spec.source_text);

    let mut scene = Scene::default();
    for term_spec in &spec.terms {
        let matches = find_matches(&tokens, &term_spec.term);
        let config = term_spec.placement_config();

        let mut objects = Vec::with_capacity(matches.len() * config.count);
        for &index in &matches {
            let height = map_height(index, tokens.len());
            debug!(
                "term {:?}: match at token {} of {}, height {:.3}",
                term_spec.term,
                index,
                tokens.len(),
                height
            );
            for placement in emit(height, &config, rng) {
                objects.push(SceneObject::materialize(term_spec, &placement));
            }
        }

        info!(
            "term {:?}: {} matches, {} objects",
            term_spec.term,
            matches.len(),
            objects.len()
        );
        scene.groups.push(SceneGroup {
            name: term_spec.term.clone(),
            color: term_spec.color,
            visible: term_spec.visible,
            objects,
        });
    }

    scene
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded() -> StdRng {
        StdRng::seed_from_u64(11)
    }

    #[test]
    fn test_build_scene_demo_counts() {
        let spec = VisualizationSpec::demo();
        let scene = build_scene(&spec, &mut seeded());

        assert_eq!(scene.groups.len(), 2);
        // One match each for "fox" and "dog", 100 placements per match
        assert_eq!(scene.groups[0].name, "fox");
        assert_eq!(scene.groups[0].objects.len(), 100);
        assert_eq!(scene.groups[1].name, "dog");
        assert_eq!(scene.groups[1].objects.len(), 100);
        assert_eq!(scene.object_count(), 200);
    }

    #[test]
    fn test_unmatched_term_gets_an_empty_group() {
        let mut spec = VisualizationSpec::demo();
        spec.terms[0].term = "zebra".to_owned();
        let scene = build_scene(&spec, &mut seeded());
        assert_eq!(scene.groups.len(), 2);
        assert!(scene.groups[0].objects.is_empty());
        assert_eq!(scene.groups[1].objects.len(), 100);
    }

    #[test]
    fn test_empty_source_builds_an_empty_scene() {
        let mut spec = VisualizationSpec::demo();
        spec.source_text = String::new();
        let scene = build_scene(&spec, &mut seeded());
        assert_eq!(scene.groups.len(), 2);
        assert_eq!(scene.object_count(), 0);
    }

    #[test]
    fn test_materialized_objects_carry_term_styling() {
        let spec = VisualizationSpec::demo();
        let scene = build_scene(&spec, &mut seeded());
        let group = &scene.groups[0];
        for object in &group.objects {
            assert_eq!(object.color, group.color);
            assert_eq!(object.shape, Shape::Cube);
            // Vertical offset for the single "fox" match: height - 10
            let expected = (100.0 / 9.0) * 3.0 * 0.2 - 10.0;
            assert!((object.position[1] - expected as f32).abs() < 1e-5);
        }
    }

    #[test]
    fn test_toggle_group_flips_visibility() {
        let mut scene = build_scene(&VisualizationSpec::demo(), &mut seeded());
        assert!(scene.groups[0].visible);
        scene.toggle_group(0);
        assert!(!scene.groups[0].visible);
        // Out-of-range toggles are ignored
        scene.toggle_group(99);
    }

    #[test]
    fn test_scene_survives_json_round_trip() {
        let scene = build_scene(&VisualizationSpec::demo(), &mut seeded());
        let json = serde_json::to_string(&scene).unwrap();
        let back: Scene = serde_json::from_str(&json).unwrap();
        assert_eq!(back.groups.len(), scene.groups.len());
        assert_eq!(back.object_count(), scene.object_count());
    }
}
