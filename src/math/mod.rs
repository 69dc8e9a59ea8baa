mod color;
mod easing;
mod ray;
mod smoothing;

pub use color::{hsv_to_rgb, palette};
pub use easing::Easing;
pub use ray::{intersect_aabb, intersect_annulus, intersect_sphere, Ray};
pub use smoothing::Smoothed;
