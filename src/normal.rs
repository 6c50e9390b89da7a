use crate::math::*;
use crate::sdf::SignedDistance;

use serde::Deserialize;

pub const NORMAL_EPSILON: f32 = 0.0005;

#[derive(Deserialize, Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum NormalEstimator {
    // four samples at the corners of a tetrahedron
    #[default]
    Tetrahedral,
    // six samples, two per axis
    Central,
}

impl NormalEstimator {
    pub fn normal<S>(&self, sdf: &S, p: Vec3) -> Vec3
    where
        S: SignedDistance + ?Sized,
    {
        match self {
            NormalEstimator::Tetrahedral => calc_normal(sdf, p),
            NormalEstimator::Central => calc_normal_central(sdf, p),
        }
    }
}

/// Gradient of the field at `p`, from four tetrahedral taps.
pub fn calc_normal<S>(sdf: &S, p: Vec3) -> Vec3
where
    S: SignedDistance + ?Sized,
{
    let (x, y) = (NORMAL_EPSILON, -NORMAL_EPSILON);
    let xyy = Vec3::new(x, y, y);
    let yyx = Vec3::new(y, y, x);
    let yxy = Vec3::new(y, x, y);
    let xxx = Vec3::new(x, x, x);
    (xyy * sdf.distance(p + xyy)
        + yyx * sdf.distance(p + yyx)
        + yxy * sdf.distance(p + yxy)
        + xxx * sdf.distance(p + xxx))
    .normalized()
}

pub fn calc_normal_central<S>(sdf: &S, p: Vec3) -> Vec3
where
    S: SignedDistance + ?Sized,
{
    let dx = Vec3::new(NORMAL_EPSILON, 0.0, 0.0);
    let dy = Vec3::new(0.0, NORMAL_EPSILON, 0.0);
    let dz = Vec3::new(0.0, 0.0, NORMAL_EPSILON);
    Vec3::new(
        sdf.distance(p + dx) - sdf.distance(p - dx),
        sdf.distance(p + dy) - sdf.distance(p - dy),
        sdf.distance(p + dz) - sdf.distance(p - dz),
    )
    .normalized()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::scene::{Scene, SceneParameters};
    use approx::assert_abs_diff_eq;

    const ESTIMATORS: [NormalEstimator; 2] = [NormalEstimator::Tetrahedral, NormalEstimator::Central];

    #[test]
    fn test_floor_normal_points_up() {
        let params = SceneParameters {
            sphere_position: Vec3::new(50.0, 50.0, 50.0),
            ..Default::default()
        };
        let scene = Scene::new(&params);
        for estimator in ESTIMATORS {
            let n = estimator.normal(&scene, Vec3::new(0.3, 0.0, -2.1));
            assert_abs_diff_eq!(n.x, 0.0, epsilon = 1e-4);
            assert_abs_diff_eq!(n.y, 1.0, epsilon = 1e-4);
            assert_abs_diff_eq!(n.z, 0.0, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_sphere_normal_is_radial_unit() {
        let params = SceneParameters {
            sphere_position: Vec3::new(0.0, 3.0, 0.0),
            sphere_radius: 1.0,
            ..Default::default()
        };
        let scene = Scene::new(&params);
        for direction in [
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(1.0, 1.0, -1.0).normalized(),
            Vec3::new(-0.2, 0.5, 0.8).normalized(),
        ] {
            let p = params.sphere_position + direction * params.sphere_radius;
            for estimator in ESTIMATORS {
                let n = estimator.normal(&scene, p);
                assert_abs_diff_eq!(n.mag(), 1.0, epsilon = 1e-4);
                assert!(n.dot(direction) > 0.999, "{:?} vs {:?}", n, direction);
            }
        }
    }
}
