/// Geometry primitives and shape generators for the visualization
use crate::config::Shape;
use nalgebra::{Point3, Vector3};
use std::f32::consts::PI;

/// A 3D vertex with position and normal
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
}

impl Vertex {
    pub fn new(x: f32, y: f32, z: f32, nx: f32, ny: f32, nz: f32) -> Self {
        Self {
            position: Point3::new(x, y, z),
            normal: Vector3::new(nx, ny, nz),
        }
    }
}

/// A triangle face defined by three vertices
#[derive(Debug, Clone)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Calculate the face normal from the triangle's vertices
    pub fn calculate_normal(&self) -> Vector3<f32> {
        let v0 = self.vertices[0].position;
        let v1 = self.vertices[1].position;
        let v2 = self.vertices[2].position;

        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        edge1.cross(&edge2).normalize()
    }
}

/// A 3D mesh composed of triangles
#[derive(Debug, Clone)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Axis-aligned cube centered at the origin
    pub fn cube(size: f32) -> Self {
        let half = size / 2.0;
        let mut mesh = Self::new();

        // Front face
        mesh.add_triangle(Triangle::new(
            Vertex::new(-half, -half, half, 0.0, 0.0, 1.0),
            Vertex::new(half, -half, half, 0.0, 0.0, 1.0),
            Vertex::new(half, half, half, 0.0, 0.0, 1.0),
        ));
        mesh.add_triangle(Triangle::new(
            Vertex::new(-half, -half, half, 0.0, 0.0, 1.0),
            Vertex::new(half, half, half, 0.0, 0.0, 1.0),
            Vertex::new(-half, half, half, 0.0, 0.0, 1.0),
        ));

        // Back face
        mesh.add_triangle(Triangle::new(
            Vertex::new(-half, -half, -half, 0.0, 0.0, -1.0),
            Vertex::new(-half, half, -half, 0.0, 0.0, -1.0),
            Vertex::new(half, half, -half, 0.0, 0.0, -1.0),
        ));
        mesh.add_triangle(Triangle::new(
            Vertex::new(-half, -half, -half, 0.0, 0.0, -1.0),
            Vertex::new(half, half, -half, 0.0, 0.0, -1.0),
            Vertex::new(half, -half, -half, 0.0, 0.0, -1.0),
        ));

        // Top face
        mesh.add_triangle(Triangle::new(
            Vertex::new(-half, half, -half, 0.0, 1.0, 0.0),
            Vertex::new(-half, half, half, 0.0, 1.0, 0.0),
            Vertex::new(half, half, half, 0.0, 1.0, 0.0),
        ));
        mesh.add_triangle(Triangle::new(
            Vertex::new(-half, half, -half, 0.0, 1.0, 0.0),
            Vertex::new(half, half, half, 0.0, 1.0, 0.0),
            Vertex::new(half, half, -half, 0.0, 1.0, 0.0),
        ));

        // Bottom face
        mesh.add_triangle(Triangle::new(
            Vertex::new(-half, -half, -half, 0.0, -1.0, 0.0),
            Vertex::new(half, -half, -half, 0.0, -1.0, 0.0),
            Vertex::new(half, -half, half, 0.0, -1.0, 0.0),
        ));
        mesh.add_triangle(Triangle::new(
            Vertex::new(-half, -half, -half, 0.0, -1.0, 0.0),
            Vertex::new(half, -half, half, 0.0, -1.0, 0.0),
            Vertex::new(-half, -half, half, 0.0, -1.0, 0.0),
        ));

        // Right face
        mesh.add_triangle(Triangle::new(
            Vertex::new(half, -half, -half, 1.0, 0.0, 0.0),
            Vertex::new(half, half, -half, 1.0, 0.0, 0.0),
            Vertex::new(half, half, half, 1.0, 0.0, 0.0),
        ));
        mesh.add_triangle(Triangle::new(
            Vertex::new(half, -half, -half, 1.0, 0.0, 0.0),
            Vertex::new(half, half, half, 1.0, 0.0, 0.0),
            Vertex::new(half, -half, half, 1.0, 0.0, 0.0),
        ));

        // Left face
        mesh.add_triangle(Triangle::new(
            Vertex::new(-half, -half, -half, -1.0, 0.0, 0.0),
            Vertex::new(-half, -half, half, -1.0, 0.0, 0.0),
            Vertex::new(-half, half, half, -1.0, 0.0, 0.0),
        ));
        mesh.add_triangle(Triangle::new(
            Vertex::new(-half, -half, -half, -1.0, 0.0, 0.0),
            Vertex::new(-half, half, half, -1.0, 0.0, 0.0),
            Vertex::new(-half, half, -half, -1.0, 0.0, 0.0),
        ));

        mesh
    }

    /// UV sphere built from latitude/longitude bands
    pub fn sphere(radius: f32, lat_segments: usize, long_segments: usize) -> Self {
        let mut mesh = Self::with_capacity(lat_segments * long_segments * 2);

        let point = |lat: usize, long: usize| {
            let theta = lat as f32 * PI / lat_segments as f32;
            let phi = long as f32 * 2.0 * PI / long_segments as f32;
            Vector3::new(
                theta.sin() * phi.cos(),
                theta.cos(),
                theta.sin() * phi.sin(),
            )
        };
        let vertex = |n: Vector3<f32>| {
            Vertex::new(n.x * radius, n.y * radius, n.z * radius, n.x, n.y, n.z)
        };

        for lat in 0..lat_segments {
            for long in 0..long_segments {
                let a = point(lat, long);
                let b = point(lat + 1, long);
                let c = point(lat + 1, long + 1);
                let d = point(lat, long + 1);

                mesh.add_triangle(Triangle::new(vertex(a), vertex(b), vertex(c)));
                mesh.add_triangle(Triangle::new(vertex(a), vertex(c), vertex(d)));
            }
        }

        mesh
    }

    /// Torus around the Z axis with the given ring and tube radii
    pub fn torus(radius: f32, tube: f32, radial_segments: usize, tubular_segments: usize) -> Self {
        let mut mesh = Self::with_capacity(radial_segments * tubular_segments * 2);

        // Position on the tube surface plus its outward normal
        let surface = |radial: usize, tubular: usize| {
            let u = tubular as f32 * 2.0 * PI / tubular_segments as f32;
            let v = radial as f32 * 2.0 * PI / radial_segments as f32;

            let center = Point3::new(radius * u.cos(), radius * u.sin(), 0.0);
            let normal = Vector3::new(v.cos() * u.cos(), v.cos() * u.sin(), v.sin());
            (center + normal * tube, normal)
        };

        for radial in 0..radial_segments {
            for tubular in 0..tubular_segments {
                let (pa, na) = surface(radial, tubular);
                let (pb, nb) = surface(radial + 1, tubular);
                let (pc, nc) = surface(radial + 1, tubular + 1);
                let (pd, nd) = surface(radial, tubular + 1);

                let vert = |p: Point3<f32>, n: Vector3<f32>| {
                    Vertex::new(p.x, p.y, p.z, n.x, n.y, n.z)
                };
                mesh.add_triangle(Triangle::new(vert(pa, na), vert(pb, nb), vert(pc, nc)));
                mesh.add_triangle(Triangle::new(vert(pa, na), vert(pc, nc), vert(pd, nd)));
            }
        }

        mesh
    }

    /// Capped cylinder along the Y axis
    pub fn cylinder(radius: f32, height: f32, radial_segments: usize) -> Self {
        let mut mesh = Self::with_capacity(radial_segments * 4);
        let half = height / 2.0;

        let rim = |segment: usize| {
            let phi = segment as f32 * 2.0 * PI / radial_segments as f32;
            (phi.cos(), phi.sin())
        };

        for segment in 0..radial_segments {
            let (xa, za) = rim(segment);
            let (xb, zb) = rim(segment + 1);

            // Side wall
            mesh.add_triangle(Triangle::new(
                Vertex::new(xa * radius, -half, za * radius, xa, 0.0, za),
                Vertex::new(xb * radius, -half, zb * radius, xb, 0.0, zb),
                Vertex::new(xb * radius, half, zb * radius, xb, 0.0, zb),
            ));
            mesh.add_triangle(Triangle::new(
                Vertex::new(xa * radius, -half, za * radius, xa, 0.0, za),
                Vertex::new(xb * radius, half, zb * radius, xb, 0.0, zb),
                Vertex::new(xa * radius, half, za * radius, xa, 0.0, za),
            ));

            // Caps
            mesh.add_triangle(Triangle::new(
                Vertex::new(0.0, half, 0.0, 0.0, 1.0, 0.0),
                Vertex::new(xa * radius, half, za * radius, 0.0, 1.0, 0.0),
                Vertex::new(xb * radius, half, zb * radius, 0.0, 1.0, 0.0),
            ));
            mesh.add_triangle(Triangle::new(
                Vertex::new(0.0, -half, 0.0, 0.0, -1.0, 0.0),
                Vertex::new(xb * radius, -half, zb * radius, 0.0, -1.0, 0.0),
                Vertex::new(xa * radius, -half, za * radius, 0.0, -1.0, 0.0),
            ));
        }

        mesh
    }

    /// Flat plane in the XY plane facing +Z
    pub fn plane(width: f32, height: f32) -> Self {
        let hw = width / 2.0;
        let hh = height / 2.0;
        let mut mesh = Self::with_capacity(2);
        mesh.add_triangle(Triangle::new(
            Vertex::new(-hw, -hh, 0.0, 0.0, 0.0, 1.0),
            Vertex::new(hw, -hh, 0.0, 0.0, 0.0, 1.0),
            Vertex::new(hw, hh, 0.0, 0.0, 0.0, 1.0),
        ));
        mesh.add_triangle(Triangle::new(
            Vertex::new(-hw, -hh, 0.0, 0.0, 0.0, 1.0),
            Vertex::new(hw, hh, 0.0, 0.0, 0.0, 1.0),
            Vertex::new(-hw, hh, 0.0, 0.0, 0.0, 1.0),
        ));
        mesh
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

/// Unit-ish mesh for a configured shape, sized like the demo primitives.
pub fn mesh_for(shape: Shape) -> Mesh {
    match shape {
        Shape::Cube => Mesh::cube(0.5),
        Shape::Sphere => Mesh::sphere(0.5, 8, 12),
        Shape::Torus => Mesh::torus(0.5, 0.4, 12, 10),
        Shape::Cylinder => Mesh::cylinder(0.03, 0.3, 12),
        Shape::Plane => Mesh::plane(1.0, 1.0),
    }
}
