//! Fixed geometry catalog: which primitive solids make up each schedule task.
//!
//! Coordinates are catalog-local, right-handed and Y-up, with the building
//! centred on the origin. Rotations are Euler angles applied in XYZ order.

use crate::error::CatalogError;
use crate::model::{Finish, Floor, TaskId};
use glam::{EulerRot, Mat4, Quat, Vec3};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};
use std::fmt;
use std::str::FromStr;

/// Primitive solid, centred on its local origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Box { width: f32, height: f32, depth: f32 },
    /// Axis along local Y.
    Cylinder { radius: f32, height: f32 },
    /// Lies in the local XY plane, visible from both sides.
    Plane { width: f32, height: f32 },
}

impl Shape {
    #[must_use]
    pub const fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        Self::Box {
            width,
            height,
            depth,
        }
    }

    #[must_use]
    pub const fn cylinder(radius: f32, height: f32) -> Self {
        Self::Cylinder { radius, height }
    }

    #[must_use]
    pub const fn plane(width: f32, height: f32) -> Self {
        Self::Plane { width, height }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Box { .. } => "box",
            Self::Cylinder { .. } => "cylinder",
            Self::Plane { .. } => "plane",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub scale: Vec3,
    /// Euler angles in radians, XYZ order.
    pub rotation: Vec3,
}

impl Transform {
    #[must_use]
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            scale: Vec3::ONE,
            rotation: Vec3::ZERO,
        }
    }

    #[must_use]
    pub fn rotated(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    #[must_use]
    pub fn scaled(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Local-to-world matrix.
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Mat4::from_scale_rotation_translation(self.scale, rotation, self.position)
    }
}

/// One catalog row as authored. Floor and finish stay as raw tags until
/// [`Catalog::resolve`] checks them.
#[derive(Debug, Clone, PartialEq)]
pub struct PartSpec {
    pub task_id: TaskId,
    pub shape: Shape,
    pub transform: Transform,
    pub floor: String,
    pub finish: Option<String>,
}

/// A validated catalog row.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPart {
    pub task_id: TaskId,
    pub shape: Shape,
    pub transform: Transform,
    pub floor: Floor,
    pub finish: Finish,
}

/// Building types with a shipped catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectType {
    #[default]
    Villa,
}

impl FromStr for ProjectType {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "villa" => Ok(Self::Villa),
            _ => Err(CatalogError::UnknownProjectType {
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Villa => f.write_str("Villa"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    parts: Vec<PartSpec>,
}

impl Catalog {
    #[must_use]
    pub fn new(parts: Vec<PartSpec>) -> Self {
        Self { parts }
    }

    #[must_use]
    pub fn for_project(project_type: ProjectType) -> Self {
        match project_type {
            ProjectType::Villa => villa(),
        }
    }

    #[must_use]
    pub fn parts(&self) -> &[PartSpec] {
        &self.parts
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Checks every row and resolves floor and finish tags.
    ///
    /// Fails on the first row with an empty task id or an unknown floor tag.
    /// Unknown finish keys are not an error; they resolve to concrete.
    pub fn resolve(&self) -> Result<Vec<ResolvedPart>, CatalogError> {
        self.parts
            .iter()
            .enumerate()
            .map(|(index, part)| {
                if part.task_id.is_empty() {
                    return Err(CatalogError::EmptyTaskId { index });
                }
                let floor =
                    Floor::from_tag(&part.floor).ok_or_else(|| CatalogError::UnknownFloor {
                        index,
                        task_id: part.task_id.to_string(),
                        floor: part.floor.clone(),
                    })?;
                Ok(ResolvedPart {
                    task_id: part.task_id.clone(),
                    shape: part.shape,
                    transform: part.transform,
                    floor,
                    finish: Finish::resolve(part.finish.as_deref()),
                })
            })
            .collect()
    }
}

struct CatalogBuilder {
    parts: Vec<PartSpec>,
}

impl CatalogBuilder {
    fn new() -> Self {
        Self { parts: Vec::new() }
    }

    fn add(&mut self, task: i32, shape: Shape, at: [f32; 3], floor: &str, finish: &str) {
        self.add_rotated(task, shape, at, [0.0, 0.0, 0.0], floor, finish);
    }

    fn add_rotated(
        &mut self,
        task: i32,
        shape: Shape,
        at: [f32; 3],
        rotation: [f32; 3],
        floor: &str,
        finish: &str,
    ) {
        self.parts.push(PartSpec {
            task_id: TaskId::from(task),
            shape,
            transform: Transform::at(Vec3::from(at)).rotated(Vec3::from(rotation)),
            floor: floor.to_string(),
            finish: Some(finish.to_string()),
        });
    }

    fn build(self) -> Catalog {
        Catalog::new(self.parts)
    }
}

const QUARTER_Y: [f32; 3] = [0.0, FRAC_PI_2, 0.0];
const CORNERS: [(f32, f32); 4] = [(-7.0, -7.0), (7.0, -7.0), (-7.0, 7.0), (7.0, 7.0)];

/// Two-storey villa with basement, roof services and external works.
fn villa() -> Catalog {
    let mut c = CatalogBuilder::new();

    // Mobilization: site fencing, signboard, clearance
    let fence = Shape::cuboid(0.1, 2.0, 30.0);
    c.add(1, fence, [15.0, 1.0, 0.0], "sub", "steel");
    c.add(1, fence, [-15.0, 1.0, 0.0], "sub", "steel");
    c.add_rotated(1, fence, [0.0, 1.0, 15.0], QUARTER_Y, "sub", "steel");
    c.add_rotated(1, fence, [0.0, 1.0, -15.0], QUARTER_Y, "sub", "steel");
    c.add_rotated(
        2,
        Shape::cuboid(1.5, 3.0, 0.1),
        [11.0, 4.0, 15.0],
        [0.0, -FRAC_PI_4, 0.0],
        "sub",
        "paint",
    );
    c.add_rotated(
        3,
        Shape::plane(28.0, 28.0),
        [0.0, 0.1, 0.0],
        [-FRAC_PI_2, 0.0, 0.0],
        "sub",
        "ground",
    );

    // Shoring piles around the perimeter, 2 m centres
    let pile = Shape::cylinder(0.2, 6.0);
    for step in 0..13 {
        let i = -12.0 + 2.0 * step as f32;
        c.add(6, pile, [14.0, -3.0, i], "sub", "concrete");
        c.add(6, pile, [-14.0, -3.0, i], "sub", "concrete");
        c.add(6, pile, [i, -3.0, 14.0], "sub", "concrete");
        c.add(6, pile, [i, -3.0, -14.0], "sub", "concrete");
    }
    let waler = Shape::cuboid(28.0, 0.3, 0.3);
    c.add(8, waler, [0.0, -1.0, 13.8], "sub", "steel");
    c.add(8, waler, [0.0, -3.0, 13.8], "sub", "steel");

    // Earthworks
    c.add(9, Shape::cuboid(28.0, 0.1, 28.0), [0.0, -4.6, 0.0], "sub", "ground");
    c.add(13, Shape::cuboid(18.0, 0.1, 18.0), [0.0, -4.8, 0.0], "sub", "ground");
    c.add(14, Shape::cuboid(18.0, 0.2, 18.0), [0.0, -4.7, 0.0], "sub", "ground");

    // Substructure
    c.add(19, Shape::cuboid(17.0, 0.1, 17.0), [0.0, -4.6, 0.0], "sub", "concrete");
    c.add(48, Shape::cuboid(17.0, 0.05, 17.0), [0.0, -4.55, 0.0], "sub", "steel");
    c.add(20, Shape::cuboid(16.0, 0.8, 16.0), [0.0, -4.1, 0.0], "sub", "concrete");

    let column = Shape::cuboid(0.6, 3.5, 0.6);
    for (x, z) in CORNERS {
        c.add(21, column, [x, -2.0, z], "sub", "concrete");
    }
    let retaining = Shape::cuboid(16.0, 3.5, 0.3);
    c.add(21, retaining, [0.0, -2.0, 7.85], "sub", "concrete");
    c.add(21, retaining, [0.0, -2.0, -7.85], "sub", "concrete");
    c.add_rotated(21, retaining, [7.85, -2.0, 0.0], QUARTER_Y, "sub", "concrete");
    c.add_rotated(21, retaining, [-7.85, -2.0, 0.0], QUARTER_Y, "sub", "concrete");

    c.add(49, Shape::cuboid(16.2, 3.5, 0.05), [0.0, -2.0, 8.05], "sub", "steel");
    c.add(17, Shape::cuboid(30.0, 4.0, 30.0), [0.0, -2.0, 0.0], "sub", "ground");

    // Ground floor
    c.add(26, Shape::cuboid(16.5, 0.3, 16.5), [0.0, 0.0, 0.0], "gf", "concrete");
    for (x, z) in CORNERS {
        c.add(27, column, [x, 1.9, z], "gf", "concrete");
    }
    let block_wall = Shape::cuboid(16.0, 3.5, 0.2);
    c.add(39, block_wall, [0.0, 1.9, 7.5], "gf", "block");
    c.add(39, block_wall, [0.0, 1.9, -7.5], "gf", "block");
    c.add_rotated(39, block_wall, [7.5, 1.9, 0.0], QUARTER_Y, "gf", "block");
    c.add_rotated(39, block_wall, [-7.5, 1.9, 0.0], QUARTER_Y, "gf", "block");

    // First floor
    c.add(28, Shape::cuboid(17.0, 0.3, 17.0), [0.0, 3.8, 0.0], "1", "concrete");
    for (x, z) in CORNERS {
        c.add(29, column, [x, 5.7, z], "1", "concrete");
    }
    c.add(40, block_wall, [0.0, 5.7, 7.5], "1", "block");
    c.add(40, block_wall, [0.0, 5.7, -7.5], "1", "block");
    c.add_rotated(40, block_wall, [7.5, 5.7, 0.0], QUARTER_Y, "1", "block");
    c.add_rotated(40, block_wall, [-7.5, 5.7, 0.0], QUARTER_Y, "1", "block");

    // Roof
    c.add(30, Shape::cuboid(17.0, 0.3, 17.0), [0.0, 7.6, 0.0], "roof", "concrete");
    let parapet = Shape::cuboid(17.0, 1.0, 0.2);
    c.add(33, parapet, [0.0, 8.2, 8.4], "roof", "concrete");
    c.add(33, parapet, [0.0, 8.2, -8.4], "roof", "concrete");
    c.add_rotated(33, parapet, [8.4, 8.2, 0.0], QUARTER_Y, "roof", "concrete");
    c.add_rotated(33, parapet, [-8.4, 8.2, 0.0], QUARTER_Y, "roof", "concrete");
    c.add(41, Shape::cuboid(4.0, 3.0, 4.0), [5.0, 9.1, 5.0], "roof", "block");

    // Upper roof
    c.add(31, Shape::cuboid(0.4, 3.0, 0.4), [5.0, 9.1, 5.0], "upper_roof", "concrete");
    c.add(32, Shape::cuboid(4.5, 0.2, 4.5), [5.0, 10.7, 5.0], "upper_roof", "concrete");
    let upper_parapet = Shape::cuboid(4.5, 0.8, 0.1);
    c.add(34, upper_parapet, [5.0, 11.2, 7.2], "upper_roof", "concrete");
    c.add(34, upper_parapet, [5.0, 11.2, 2.75], "upper_roof", "concrete");
    c.add_rotated(34, upper_parapet, [2.8, 11.2, 5.0], QUARTER_Y, "upper_roof", "concrete");
    c.add_rotated(34, upper_parapet, [7.2, 11.2, 5.0], QUARTER_Y, "upper_roof", "concrete");

    // Finishes: inner plaster skins, then floor tiles
    let plaster = Shape::cuboid(15.8, 3.4, 0.05);
    c.add(43, plaster, [0.0, -2.0, 7.7], "sub", "plaster");
    c.add(44, plaster, [0.0, 1.9, 7.3], "gf", "plaster");
    c.add(45, plaster, [0.0, 5.7, 7.3], "1", "plaster");
    // "tile" has no finish of its own and renders as concrete
    c.add(64, Shape::cuboid(15.0, 0.05, 15.0), [0.0, -3.65, 0.0], "sub", "tile");
    c.add(65, Shape::cuboid(16.0, 0.05, 16.0), [0.0, 0.2, 0.0], "gf", "tile");
    c.add(66, Shape::cuboid(16.0, 0.05, 16.0), [0.0, 4.0, 0.0], "1", "tile");

    // External works
    c.add(81, Shape::cuboid(16.4, 7.6, 16.4), [0.0, 3.8, 0.0], "ext", "paint");
    let boundary = Shape::cuboid(40.0, 2.0, 0.3);
    c.add(135, boundary, [0.0, 1.0, 19.0], "ext", "block");
    c.add(135, boundary, [0.0, 1.0, -19.0], "ext", "block");
    c.add_rotated(135, boundary, [19.85, 1.0, 0.0], QUARTER_Y, "ext", "block");
    c.add_rotated(135, boundary, [-19.85, 1.0, 0.0], QUARTER_Y, "ext", "block");
    c.add(138, Shape::cuboid(4.0, 1.5, 6.0), [12.0, 0.5, 0.0], "ext", "water");
    c.add(140, Shape::cuboid(35.0, 0.1, 35.0), [0.0, 0.1, 0.0], "ext", "paving");

    // MEP on the roof
    c.add(156, Shape::cuboid(1.0, 1.0, 2.0), [5.0, 8.6, -5.0], "roof", "mep");
    let ac_unit = Shape::cuboid(1.0, 1.0, 0.5);
    c.add(193, ac_unit, [2.0, 8.1, 8.0], "roof", "mep");
    c.add(193, ac_unit, [-2.0, 8.1, 8.0], "roof", "mep");

    c.build()
}
