/// Camera, projection, and orbit utilities
use nalgebra::{Matrix4, Point3, Vector3};

/// Projection mode for rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectionMode {
    Orthographic,
    Perspective,
}

/// Camera configuration for 3D rendering
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub mode: ProjectionMode,
}

impl Camera {
    /// Default framing for the term visualization: pulled back and slightly
    /// above the scatter volume, looking at the origin.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            position: Point3::new(0.0, 10.0, -20.0),
            target: Point3::new(0.0, 0.0, 0.0),
            up: Vector3::new(0.0, 1.0, 0.0),
            fov: 75.0_f32.to_radians(),
            aspect: width as f32 / height as f32,
            near: 0.1,
            far: 100.0,
            mode: ProjectionMode::Perspective,
        }
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        match self.mode {
            ProjectionMode::Perspective => {
                Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far)
            }
            ProjectionMode::Orthographic => {
                let height = (self.position - self.target).norm();
                let width = height * self.aspect;
                Matrix4::new_orthographic(
                    -width / 2.0,
                    width / 2.0,
                    -height / 2.0,
                    height / 2.0,
                    self.near,
                    self.far,
                )
            }
        }
    }

    /// Project a 3D point to 2D screen space
    pub fn project_to_screen(
        &self,
        point: &Point3<f32>,
        model_matrix: &Matrix4<f32>,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        let view = self.view_matrix();
        let projection = self.projection_matrix();
        let mvp = projection * view * model_matrix;

        // Transform to clip space
        let clip = mvp.transform_point(point);

        // Prevent division by near-zero depth values
        if clip.z.abs() < 1e-6 {
            return None;
        }

        let ndc_x = clip.x / clip.z;
        let ndc_y = clip.y / clip.z;
        let depth = clip.z;

        // Clip test
        if ndc_x < -1.0 || ndc_x > 1.0 || ndc_y < -1.0 || ndc_y > 1.0 {
            return None;
        }

        // Convert to screen space
        let screen_x = (ndc_x + 1.0) * 0.5 * width as f32;
        let screen_y = (1.0 - ndc_y) * 0.5 * height as f32;

        Some((screen_x, screen_y, depth))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

/// Pointer-style orbit state: spherical coordinates around the camera target
#[derive(Debug, Clone, Copy)]
pub struct Orbit {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
}

impl Orbit {
    const MIN_DISTANCE: f32 = 1.0;
    const MAX_PITCH: f32 = 1.5;

    /// Derive orbit angles from the camera's current position
    pub fn from_camera(camera: &Camera) -> Self {
        let offset = camera.position - camera.target;
        let distance = offset.norm().max(Self::MIN_DISTANCE);
        Self {
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / distance).asin(),
            distance,
        }
    }

    pub fn rotate(&mut self, d_yaw: f32, d_pitch: f32) {
        self.yaw += d_yaw;
        self.pitch = (self.pitch + d_pitch).clamp(-Self::MAX_PITCH, Self::MAX_PITCH);
    }

    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance + delta).max(Self::MIN_DISTANCE);
    }

    /// Reposition the camera on the orbit sphere, keeping its target
    pub fn apply(&self, camera: &mut Camera) {
        let horizontal = self.distance * self.pitch.cos();
        camera.position = camera.target
            + Vector3::new(
                horizontal * self.yaw.sin(),
                self.distance * self.pitch.sin(),
                horizontal * self.yaw.cos(),
            );
    }
}

/// Automatic turntable sweep around the scene origin
#[derive(Debug, Clone, Copy)]
pub struct Turntable {
    pub enabled: bool,
    pub radius: f32,
    pub height: f32,
    pub speed: f32,
}

impl Default for Turntable {
    fn default() -> Self {
        Self {
            enabled: false,
            radius: 20.0,
            height: 15.0,
            speed: 0.1,
        }
    }
}

impl Turntable {
    /// Place the camera on the turntable circle for the given elapsed time
    pub fn apply(&self, camera: &mut Camera, elapsed_seconds: f32) {
        if !self.enabled {
            return;
        }
        let angle = elapsed_seconds * self.speed;
        camera.position = Point3::new(angle.sin() * self.radius, self.height, angle.cos() * self.radius);
        camera.target = Point3::origin();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_creation() {
        let camera = Camera::new(800, 600);
        assert_eq!(camera.mode, ProjectionMode::Perspective);
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-6);
        assert!((camera.position - Point3::new(0.0, 10.0, -20.0)).norm() < 1e-6);
    }

    #[test]
    fn test_view_matrix() {
        let camera = Camera::new(800, 600);
        let view = camera.view_matrix();
        // View matrix should be non-zero
        assert!(view.norm() > 0.0);
    }

    #[test]
    fn test_orbit_round_trip() {
        let mut camera = Camera::new(800, 600);
        let start = camera.position;
        let orbit = Orbit::from_camera(&camera);
        orbit.apply(&mut camera);
        assert!((camera.position - start).norm() < 1e-4);
    }

    #[test]
    fn test_orbit_preserves_distance() {
        let mut camera = Camera::new(800, 600);
        let mut orbit = Orbit::from_camera(&camera);
        let distance = orbit.distance;
        orbit.rotate(0.7, -0.2);
        orbit.apply(&mut camera);
        assert!(((camera.position - camera.target).norm() - distance).abs() < 1e-4);
    }

    #[test]
    fn test_turntable_start_position() {
        let mut camera = Camera::new(800, 600);
        let turntable = Turntable {
            enabled: true,
            ..Default::default()
        };
        turntable.apply(&mut camera, 0.0);
        assert!((camera.position - Point3::new(0.0, 15.0, 20.0)).norm() < 1e-6);
    }

    #[test]
    fn test_disabled_turntable_leaves_camera_alone() {
        let mut camera = Camera::new(800, 600);
        let start = camera.position;
        Turntable::default().apply(&mut camera, 42.0);
        assert_eq!(camera.position, start);
    }
}
