use crate::catalog::Shape;
use crate::model::Appearance;
use crate::picking::Camera;
use crate::scene::{HelperNode, SceneContext};
use glam::{Mat4, Vec3};
use ratatui::style::Color;
use std::f32::consts::TAU;

/// Scene background the translucent materials fade into.
const BACKGROUND: (u8, u8, u8) = (0x22, 0x22, 0x22);
const GRID_COLOR: Color = Color::Rgb(0x3a, 0x3a, 0x3a);
/// Grid lines drawn every this many divisions.
const GRID_STRIDE: u32 = 5;
const CYLINDER_SEGMENTS: usize = 8;

/// A projected edge in normalized device coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub color: Color,
}

/// Everything the scene canvas paints this frame: ground grid first, then
/// every visible element's edges.
#[must_use]
pub fn wireframe(scene: &SceneContext, camera: &Camera) -> Vec<Segment> {
    let view_projection = camera.view_projection();
    let mut segments = Vec::new();

    for helper in scene.helpers() {
        match *helper {
            HelperNode::Grid { size, divisions } => {
                grid_edges(size, divisions, |a, b| {
                    push_edge(&mut segments, camera, &view_projection, a, b, GRID_COLOR);
                });
            }
        }
    }

    for element in scene.elements().iter().filter(|e| e.visible()) {
        let color = element_color(element.appearance());
        let world = element.world_matrix();
        for (a, b) in local_edges(&element.shape) {
            push_edge(
                &mut segments,
                camera,
                &view_projection,
                world.transform_point3(a),
                world.transform_point3(b),
                color,
            );
        }
    }
    segments
}

/// Terminal colour for an appearance, faded toward the background by opacity.
#[must_use]
pub fn element_color(appearance: Appearance) -> Color {
    let material = appearance.material();
    // A ghost at its real opacity would vanish into the background.
    if material.wireframe {
        return Color::DarkGray;
    }
    let (r, g, b) = material.rgb();
    let t = material.opacity.clamp(0.0, 1.0);
    let blend = |fg: u8, bg: u8| (f32::from(bg) + (f32::from(fg) - f32::from(bg)) * t).round() as u8;
    Color::Rgb(
        blend(r, BACKGROUND.0),
        blend(g, BACKGROUND.1),
        blend(b, BACKGROUND.2),
    )
}

fn push_edge(
    segments: &mut Vec<Segment>,
    camera: &Camera,
    view_projection: &Mat4,
    a: Vec3,
    b: Vec3,
    color: Color,
) {
    let project = |p: Vec3| {
        let clip = *view_projection * p.extend(1.0);
        (clip.w > camera.near).then(|| clip.truncate() / clip.w)
    };
    if let (Some(a), Some(b)) = (project(a), project(b)) {
        segments.push(Segment {
            x1: f64::from(a.x),
            y1: f64::from(a.y),
            x2: f64::from(b.x),
            y2: f64::from(b.y),
            color,
        });
    }
}

fn grid_edges(size: f32, divisions: u32, mut edge: impl FnMut(Vec3, Vec3)) {
    if divisions == 0 {
        return;
    }
    let half = size / 2.0;
    let step = size / divisions as f32;
    for i in (0..=divisions).step_by(GRID_STRIDE as usize) {
        let offset = -half + step * i as f32;
        edge(Vec3::new(offset, 0.0, -half), Vec3::new(offset, 0.0, half));
        edge(Vec3::new(-half, 0.0, offset), Vec3::new(half, 0.0, offset));
    }
}

/// Outline edges of a shape in its local frame, centred on the origin.
fn local_edges(shape: &Shape) -> Vec<(Vec3, Vec3)> {
    match *shape {
        Shape::Box {
            width,
            height,
            depth,
        } => {
            let h = Vec3::new(width, height, depth) * 0.5;
            let corner = |i: usize| {
                Vec3::new(
                    if i & 1 == 0 { -h.x } else { h.x },
                    if i & 2 == 0 { -h.y } else { h.y },
                    if i & 4 == 0 { -h.z } else { h.z },
                )
            };
            let mut edges = Vec::with_capacity(12);
            for i in 0..8 {
                for bit in [1, 2, 4] {
                    if i & bit == 0 {
                        edges.push((corner(i), corner(i | bit)));
                    }
                }
            }
            edges
        }
        Shape::Cylinder { radius, height } => {
            let half = height * 0.5;
            let ring = |k: usize, y: f32| {
                let angle = TAU * k as f32 / CYLINDER_SEGMENTS as f32;
                Vec3::new(radius * angle.cos(), y, radius * angle.sin())
            };
            let mut edges = Vec::with_capacity(CYLINDER_SEGMENTS * 2 + 4);
            for k in 0..CYLINDER_SEGMENTS {
                let next = (k + 1) % CYLINDER_SEGMENTS;
                edges.push((ring(k, -half), ring(next, -half)));
                edges.push((ring(k, half), ring(next, half)));
            }
            for k in (0..CYLINDER_SEGMENTS).step_by(CYLINDER_SEGMENTS / 4) {
                edges.push((ring(k, -half), ring(k, half)));
            }
            edges
        }
        Shape::Plane { width, height } => {
            let (x, y) = (width * 0.5, height * 0.5);
            let corners = [
                Vec3::new(-x, -y, 0.0),
                Vec3::new(x, -y, 0.0),
                Vec3::new(x, y, 0.0),
                Vec3::new(-x, y, 0.0),
            ];
            (0..4).map(|i| (corners[i], corners[(i + 1) % 4])).collect()
        }
    }
}
