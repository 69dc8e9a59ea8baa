use glam::Vec3;
use concept_stage::math::{intersect_aabb, intersect_annulus, intersect_sphere, Ray};

#[cfg(test)]
mod ray_intersection_tests {
    use super::*;

    #[test]
    fn test_ray_hits_aabb_from_outside() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let t = intersect_aabb(&ray, Vec3::new(5.0, -1.0, -1.0), Vec3::new(10.0, 1.0, 1.0));

        let t = t.expect("Ray should hit AABB");
        assert!((t - 5.0).abs() < 0.001, "Hit distance should be ~5.0, got {}", t);
    }

    #[test]
    fn test_ray_misses_aabb() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let t = intersect_aabb(&ray, Vec3::splat(5.0), Vec3::splat(10.0));
        assert_eq!(t, None, "Ray should miss AABB");
    }

    #[test]
    fn test_ray_starts_inside_aabb() {
        let ray = Ray::new(Vec3::new(5.0, 0.0, 0.0), Vec3::X);
        let t = intersect_aabb(&ray, Vec3::new(0.0, -1.0, -1.0), Vec3::new(10.0, 1.0, 1.0));
        assert!((t.unwrap() - 5.0).abs() < 0.001, "Should return exit distance when ray starts inside");
    }

    #[test]
    fn test_ray_hits_aabb_at_angle() {
        let ray = Ray::new(Vec3::ZERO, Vec3::ONE);
        let box_min = Vec3::splat(5.0);
        let box_max = Vec3::splat(10.0);

        let t = intersect_aabb(&ray, box_min, box_max).expect("Ray should hit AABB at angle");
        let hit_point = ray.at(t);
        assert!(
            hit_point.cmpge(box_min - 0.001).all() && hit_point.cmple(box_max + 0.001).all(),
            "Hit point should be within AABB bounds, got {:?}",
            hit_point
        );
    }

    #[test]
    fn test_ray_pointing_away_from_aabb() {
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_X);
        let t = intersect_aabb(&ray, Vec3::new(5.0, -1.0, -1.0), Vec3::new(10.0, 1.0, 1.0));
        assert_eq!(t, None, "Ray pointing away should not hit AABB");
    }

    #[test]
    fn test_axis_parallel_ray_grazing_box() {
        // Direction has exact zero components; slab test must not produce NaN
        let ray = Ray::new(Vec3::new(0.0, 0.5, 0.5), Vec3::X);
        let t = intersect_aabb(&ray, Vec3::new(2.0, 0.0, 0.0), Vec3::new(3.0, 1.0, 1.0));
        assert!((t.unwrap() - 2.0).abs() < 0.001);
    }

    #[test]
    fn test_sphere_front_face_distance() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z);
        let t = intersect_sphere(&ray, Vec3::ZERO, 2.0).unwrap();
        assert!((t - 8.0).abs() < 0.001, "got {}", t);
    }

    #[test]
    fn test_sphere_behind_ray_missed() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::Z);
        assert_eq!(intersect_sphere(&ray, Vec3::ZERO, 2.0), None);
    }

    #[test]
    fn test_tilted_annulus() {
        let normal = Vec3::new(0.0, 1.0, 1.0).normalize();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z);

        // Straight through the centre: inside a disc, inside the hole of a ring
        assert!(intersect_annulus(&ray, Vec3::ZERO, normal, 0.0, 1.0).is_some());
        assert_eq!(intersect_annulus(&ray, Vec3::ZERO, normal, 0.5, 1.0), None);
    }

    #[test]
    fn test_annulus_parallel_ray_missed() {
        let ray = Ray::new(Vec3::new(-5.0, 0.0, 0.0), Vec3::X);
        assert_eq!(intersect_annulus(&ray, Vec3::ZERO, Vec3::Y, 0.0, 10.0), None);
    }
}
