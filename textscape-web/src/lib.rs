/// Textscape Web - WASM surface for browser rendering collaborators
///
/// Exposes the analysis/emission pipeline to JavaScript: load a
/// visualization spec as JSON, then pull the built scene back out as JSON
/// for a scene-graph renderer (three.js in the original demos) to draw.

use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;
use textscape_core::{build_scene, tokenize, VisualizationSpec};

#[wasm_bindgen]
pub struct WebVisualizer {
    spec: Option<VisualizationSpec>,
    rng: StdRng,
}

#[wasm_bindgen]
impl WebVisualizer {
    /// Seeded construction keeps scatter reproducible across page reloads
    /// and avoids a host entropy source inside the WASM sandbox.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u32) -> WebVisualizer {
        WebVisualizer {
            spec: None,
            rng: StdRng::seed_from_u64(seed as u64),
        }
    }

    /// Load and validate a visualization spec from JSON
    pub fn load_spec(&mut self, json: &str) -> Result<(), JsValue> {
        let spec =
            VisualizationSpec::from_json_str(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        web_sys::console::log_1(
            &format!("textscape: loaded spec with {} terms", spec.terms.len()).into(),
        );
        self.spec = Some(spec);
        Ok(())
    }

    /// Number of tokens in the loaded source text
    pub fn token_count(&self) -> Result<u32, JsValue> {
        let spec = self
            .spec
            .as_ref()
            .ok_or_else(|| JsValue::from_str("no spec loaded"))?;
        Ok(tokenize(&spec.source_text).len() as u32)
    }

    /// Run the pipeline and return the scene as JSON.
    ///
    /// The result is a `{background, directional, ambient, groups}` object;
    /// each group carries its term name, color, visibility, and an array of
    /// `{shape, position, rotation, scale, color}` objects for the renderer.
    pub fn scene_json(&mut self) -> Result<String, JsValue> {
        let spec = self
            .spec
            .as_ref()
            .ok_or_else(|| JsValue::from_str("no spec loaded"))?;
        let scene = build_scene(spec, &mut self.rng);
        serde_json::to_string(&scene).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    Ok(())
}
