use glam::Vec3;

/// Hits closer than this are treated as self-intersection and ignored
const MIN_HIT_DISTANCE: f32 = 1e-4;

/// World-space ray with a normalized direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

pub fn intersect_aabb(ray: &Ray, box_min: Vec3, box_max: Vec3) -> Option<f32> {
    const EPSILON: f32 = 1e-8;

    // Clamp near-zero components so the slab test never divides by zero
    let d = ray.direction;
    let inv_dir = Vec3::new(
        if d.x.abs() < EPSILON { 1.0 / EPSILON.copysign(d.x) } else { 1.0 / d.x },
        if d.y.abs() < EPSILON { 1.0 / EPSILON.copysign(d.y) } else { 1.0 / d.y },
        if d.z.abs() < EPSILON { 1.0 / EPSILON.copysign(d.z) } else { 1.0 / d.z },
    );

    let t_min = (box_min - ray.origin) * inv_dir;
    let t_max = (box_max - ray.origin) * inv_dir;

    let t1 = t_min.min(t_max);
    let t2 = t_min.max(t_max);

    let t_near = t1.max_element();
    let t_far = t2.min_element();

    if t_near > t_far || t_far < 0.0 {
        return None;
    }

    if t_near < 0.0 {
        // Origin inside the box: report the exit point
        (t_far > MIN_HIT_DISTANCE).then_some(t_far)
    } else {
        Some(t_near)
    }
}

pub fn intersect_sphere(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let a = ray.direction.dot(ray.direction);
    if a == 0.0 {
        return None;
    }
    let half_b = oc.dot(ray.direction);
    let c = oc.dot(oc) - radius * radius;

    let discriminant = half_b * half_b - a * c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrt_d = discriminant.sqrt();
    let t = (-half_b - sqrt_d) / a;
    if t > MIN_HIT_DISTANCE {
        return Some(t);
    }

    let t = (-half_b + sqrt_d) / a;
    (t > MIN_HIT_DISTANCE).then_some(t)
}

/// Flat annulus (or disc when `inner` is zero) centred at `center`,
/// lying in the plane with the given `normal`.
pub fn intersect_annulus(ray: &Ray, center: Vec3, normal: Vec3, inner: f32, outer: f32) -> Option<f32> {
    let denom = normal.dot(ray.direction);
    if denom.abs() < 1e-6 {
        return None;
    }

    let t = (center - ray.origin).dot(normal) / denom;
    if t <= MIN_HIT_DISTANCE {
        return None;
    }

    let radial = (ray.at(t) - center).length();
    (radial >= inner && radial <= outer).then_some(t)
}
