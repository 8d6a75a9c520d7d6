use glam::{Mat4, Vec2, Vec3};
use std::f32::consts::PI;

/// Half-line in world space. `direction` is unit length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    #[must_use]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

const MIN_DISTANCE: f32 = 5.0;
const MAX_DISTANCE: f32 = 200.0;
const MIN_POLAR: f32 = 0.05;

/// Perspective camera orbiting a target point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view, radians.
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(40.0, 30.0, 40.0),
            target: Vec3::new(0.0, 5.0, 0.0),
            fov_y: 45f32.to_radians(),
            aspect: 600.0 / 400.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Camera {
    #[must_use]
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    #[must_use]
    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y, self.aspect, self.near, self.far)
    }

    #[must_use]
    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }

    /// Keeps the projection in step with the render surface. Degenerate sizes
    /// (a collapsed panel) are ignored.
    pub fn set_aspect(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// Ray from the eye through a point in normalized device coordinates.
    #[must_use]
    pub fn ray_through(&self, ndc: Vec2) -> Option<Ray> {
        let inverse = self.view_projection().inverse();
        let on_frustum = inverse.project_point3(ndc.extend(0.5));
        let direction = (on_frustum - self.position).normalize_or_zero();
        if direction == Vec3::ZERO || !direction.is_finite() {
            return None;
        }
        Some(Ray {
            origin: self.position,
            direction,
        })
    }

    /// World point to normalized device coordinates; `None` behind the eye.
    #[must_use]
    pub fn project(&self, world: Vec3) -> Option<Vec3> {
        let clip = self.view_projection() * world.extend(1.0);
        if clip.w <= self.near {
            return None;
        }
        Some(clip.truncate() / clip.w)
    }

    /// Rotates the eye around the target. `yaw` turns about world Y, `pitch`
    /// tilts toward or away from the top view.
    pub fn orbit(&mut self, yaw: f32, pitch: f32) {
        let offset = self.position - self.target;
        let radius = offset.length();
        if radius <= f32::EPSILON {
            return;
        }
        let azimuth = offset.x.atan2(offset.z) + yaw;
        let polar = ((offset.y / radius).clamp(-1.0, 1.0).acos() - pitch)
            .clamp(MIN_POLAR, PI - MIN_POLAR);
        self.position = self.target
            + Vec3::new(
                radius * polar.sin() * azimuth.sin(),
                radius * polar.cos(),
                radius * polar.sin() * azimuth.cos(),
            );
    }

    /// Scales the eye distance; `factor < 1` moves closer.
    pub fn zoom(&mut self, factor: f32) {
        let offset = self.position - self.target;
        let distance = (offset.length() * factor).clamp(MIN_DISTANCE, MAX_DISTANCE);
        self.position = self.target + offset.normalize_or_zero() * distance;
    }
}
