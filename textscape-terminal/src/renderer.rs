/// ASCII rasterizer for terminal rendering of a built scene
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::{Matrix4, Vector3};
use std::collections::HashMap;
use std::io::Write;
use textscape_core::geometry::mesh_for;
use textscape_core::{Camera, Mesh, Scene, SceneObject, Shape, Transform, Triangle};

/// Character luminosity ramp for depth/shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// ASCII renderer that rasterizes scene objects into colored terminal cells
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    char_buffer: Vec<char>,
    color_buffer: Vec<(u8, u8, u8)>,
    meshes: HashMap<Shape, Mesh>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        // The shape set is closed, so the mesh cache is complete up front
        let meshes = [
            Shape::Cube,
            Shape::Sphere,
            Shape::Torus,
            Shape::Cylinder,
            Shape::Plane,
        ]
        .into_iter()
        .map(|shape| (shape, mesh_for(shape)))
        .collect();

        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            char_buffer: vec![' '; size],
            color_buffer: vec![(0, 0, 0); size],
            meshes,
        }
    }

    pub fn clear(&mut self) {
        for i in 0..self.depth_buffer.len() {
            self.depth_buffer[i] = f32::INFINITY;
            self.char_buffer[i] = ' ';
            self.color_buffer[i] = (0, 0, 0);
        }
    }

    /// Rasterize every visible group of the scene
    pub fn render_scene(&mut self, scene: &Scene, camera: &Camera) {
        let light_dir = Vector3::from(scene.directional.direction).normalize();
        let ambient = scene.ambient.intensity;

        let meshes = std::mem::take(&mut self.meshes);
        for group in &scene.groups {
            if !group.visible {
                continue;
            }
            for object in &group.objects {
                if let Some(mesh) = meshes.get(&object.shape) {
                    self.render_object(object, mesh, camera, &light_dir, ambient);
                }
            }
        }
        self.meshes = meshes;
    }

    fn render_object(
        &mut self,
        object: &SceneObject,
        mesh: &Mesh,
        camera: &Camera,
        light_dir: &Vector3<f32>,
        ambient: f32,
    ) {
        let model = Transform::model_matrix(&object.position, &object.rotation, object.scale);
        let rgb = (object.color.r, object.color.g, object.color.b);
        for triangle in &mesh.triangles {
            self.render_triangle(triangle, &model, camera, rgb, light_dir, ambient);
        }
    }

    fn render_triangle(
        &mut self,
        triangle: &Triangle,
        model_matrix: &Matrix4<f32>,
        camera: &Camera,
        rgb: (f32, f32, f32),
        light_dir: &Vector3<f32>,
        ambient: f32,
    ) {
        // Project vertices to screen space
        let mut screen_coords = Vec::new();
        for vertex in &triangle.vertices {
            if let Some((x, y, z)) = camera.project_to_screen(
                &vertex.position,
                model_matrix,
                self.width as u32,
                self.height as u32,
            ) {
                screen_coords.push((x, y, z));
            } else {
                return; // Triangle is clipped
            }
        }

        if screen_coords.len() != 3 {
            return;
        }

        // Shade against the scene light, in world space
        let normal = model_matrix
            .transform_vector(&triangle.calculate_normal())
            .normalize();
        let diffuse = normal.dot(light_dir).max(0.0);
        let brightness = (ambient + (1.0 - ambient) * diffuse).min(1.0);

        // Map brightness to character
        let char_index = (brightness * (LUMINOSITY_RAMP.len() - 1) as f32) as usize;
        let char_index = char_index.min(LUMINOSITY_RAMP.len() - 1);
        let character = LUMINOSITY_RAMP[char_index];

        let channel = |v: f32| (v.clamp(0.0, 1.0) * brightness * 255.0) as u8;
        let color = (channel(rgb.0), channel(rgb.1), channel(rgb.2));

        // Rasterize triangle using scanline algorithm
        self.rasterize_triangle(&screen_coords, character, color);
    }

    fn rasterize_triangle(
        &mut self,
        coords: &[(f32, f32, f32)],
        character: char,
        color: (u8, u8, u8),
    ) {
        let (v0, v1, v2) = (coords[0], coords[1], coords[2]);

        // Bounding box
        let min_x = v0.0.min(v1.0).min(v2.0).floor() as i32;
        let max_x = v0.0.max(v1.0).max(v2.0).ceil() as i32;
        let min_y = v0.1.min(v1.1).min(v2.1).floor() as i32;
        let max_y = v0.1.max(v1.1).max(v2.1).ceil() as i32;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        // Scanline rasterization
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                // Barycentric coordinates
                if let Some((w0, w1, w2)) =
                    barycentric((v0.0, v0.1), (v1.0, v1.1), (v2.0, v2.1), (px, py))
                {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        // Interpolate depth
                        let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;

                        let idx = y as usize * self.width + x as usize;
                        if depth < self.depth_buffer[idx] {
                            self.depth_buffer[idx] = depth;
                            self.char_buffer[idx] = character;
                            self.color_buffer[idx] = color;
                        }
                    }
                }
            }
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = y * self.width + x;
                let (r, g, b) = self.color_buffer[idx];

                writer.queue(SetForegroundColor(Color::Rgb { r, g, b }))?;
                writer.queue(Print(self.char_buffer[idx]))?;
            }
            writer.queue(Print('\n'))?;
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}
