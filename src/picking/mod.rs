//! Pointer → ray → element → task.

pub mod camera;
pub mod intersect;

pub use camera::{Camera, Ray};
pub use intersect::intersect;

use crate::model::{ConstructionState, TaskId};
use crate::scene::{ElementId, SceneContext};
use glam::Vec2;
use std::time::{Duration, Instant};

/// How long a picked element stays highlighted.
pub const HIGHLIGHT_DURATION: Duration = Duration::from_millis(500);

/// Bounding rectangle of the render surface, in the pointer's coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Pointer position to normalized device coordinates, Y up.
    /// `None` for a zero-sized surface.
    #[must_use]
    pub fn to_ndc(&self, pointer: Vec2) -> Option<Vec2> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return None;
        }
        Some(Vec2::new(
            ((pointer.x - self.x) / self.width) * 2.0 - 1.0,
            -((pointer.y - self.y) / self.height) * 2.0 + 1.0,
        ))
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0.0, 0.0, 600.0, 400.0)
    }
}

/// Pending revert of a pick highlight, stamped with the element version at
/// highlight time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlight {
    pub element: ElementId,
    pub deadline: Instant,
    pub version: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub element: ElementId,
    pub distance: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PickResult {
    pub task_id: TaskId,
    pub element: ElementId,
    pub state: ConstructionState,
}

/// Nearest visible element under the pointer, without side effects.
#[must_use]
pub fn cast(pointer: Vec2, viewport: &Viewport, camera: &Camera, scene: &SceneContext) -> Option<Hit> {
    let ray = camera.ray_through(viewport.to_ndc(pointer)?)?;

    scene
        .elements()
        .iter()
        .filter(|e| e.visible())
        .filter_map(|e| {
            intersect(&ray, &e.shape, e.inverse_world_matrix()).map(|distance| Hit {
                element: e.id,
                distance,
            })
        })
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}

/// Picks the element under the pointer and highlights it until
/// `now + HIGHLIGHT_DURATION`. `None` means the info display should clear.
pub fn pick(
    pointer: Vec2,
    viewport: &Viewport,
    camera: &Camera,
    scene: &mut SceneContext,
    now: Instant,
) -> Option<PickResult> {
    let Some(hit) = cast(pointer, viewport, camera, scene) else {
        tracing::debug!(x = pointer.x, y = pointer.y, "pick missed");
        return None;
    };
    let element = scene.element(hit.element)?;
    let result = PickResult {
        task_id: element.task_id.clone(),
        element: hit.element,
        state: element.state(),
    };

    scene.highlight(hit.element, now + HIGHLIGHT_DURATION);
    tracing::debug!(
        task = %result.task_id,
        element = hit.element,
        distance = hit.distance,
        "pick hit"
    );
    Some(result)
}
