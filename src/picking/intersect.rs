use super::Ray;
use crate::catalog::Shape;
use glam::{Mat4, Vec3};

const PARALLEL_EPSILON: f32 = 1e-8;

/// Distance along `ray` to the first surface of `shape` placed by `world`,
/// or `None` when it is missed. A ray starting inside a closed solid hits
/// the far wall.
#[must_use]
pub fn intersect(ray: &Ray, shape: &Shape, inverse_world: &Mat4) -> Option<f32> {
    // Unnormalized local direction keeps the world-space ray parameter.
    let origin = inverse_world.transform_point3(ray.origin);
    let direction = inverse_world.transform_vector3(ray.direction);

    match *shape {
        Shape::Box {
            width,
            height,
            depth,
        } => intersect_box(origin, direction, Vec3::new(width, height, depth) * 0.5),
        Shape::Cylinder { radius, height } => {
            intersect_cylinder(origin, direction, radius, height * 0.5)
        }
        Shape::Plane { width, height } => intersect_plane(origin, direction, width * 0.5, height * 0.5),
    }
}

fn intersect_box(origin: Vec3, direction: Vec3, half: Vec3) -> Option<f32> {
    let mut t_min = f32::NEG_INFINITY;
    let mut t_max = f32::INFINITY;

    for axis in 0..3 {
        let (o, d, h) = (origin[axis], direction[axis], half[axis]);
        if d.abs() < PARALLEL_EPSILON {
            if o < -h || o > h {
                return None;
            }
            continue;
        }
        let (mut t0, mut t1) = ((-h - o) / d, (h - o) / d);
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_min = t_min.max(t0);
        t_max = t_max.min(t1);
        if t_min > t_max {
            return None;
        }
    }

    if t_max < 0.0 {
        None
    } else if t_min >= 0.0 {
        Some(t_min)
    } else {
        Some(t_max)
    }
}

fn intersect_cylinder(origin: Vec3, direction: Vec3, radius: f32, half_height: f32) -> Option<f32> {
    let mut best: Option<f32> = None;
    let mut consider = |t: f32| {
        if t >= 0.0 && best.is_none_or(|b| t < b) {
            best = Some(t);
        }
    };

    // Side wall
    let a = direction.x * direction.x + direction.z * direction.z;
    if a > PARALLEL_EPSILON {
        let b = 2.0 * (origin.x * direction.x + origin.z * direction.z);
        let c = origin.x * origin.x + origin.z * origin.z - radius * radius;
        let discriminant = b * b - 4.0 * a * c;
        if discriminant >= 0.0 {
            let root = discriminant.sqrt();
            for t in [(-b - root) / (2.0 * a), (-b + root) / (2.0 * a)] {
                let y = origin.y + t * direction.y;
                if y.abs() <= half_height {
                    consider(t);
                }
            }
        }
    }

    // Caps
    if direction.y.abs() > PARALLEL_EPSILON {
        for cap in [-half_height, half_height] {
            let t = (cap - origin.y) / direction.y;
            let x = origin.x + t * direction.x;
            let z = origin.z + t * direction.z;
            if x * x + z * z <= radius * radius {
                consider(t);
            }
        }
    }

    best
}

fn intersect_plane(origin: Vec3, direction: Vec3, half_width: f32, half_height: f32) -> Option<f32> {
    if direction.z.abs() < PARALLEL_EPSILON {
        return None;
    }
    let t = -origin.z / direction.z;
    if t < 0.0 {
        return None;
    }
    let x = origin.x + t * direction.x;
    let y = origin.y + t * direction.y;
    (x.abs() <= half_width && y.abs() <= half_height).then_some(t)
}
