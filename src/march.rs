use crate::math::*;
use crate::sdf::{SignedDistance, Surface};

pub const MAX_STEPS: usize = 255;
pub const MIN_DIST: f32 = 0.01;
pub const MAX_DIST: f32 = 5000.0;
pub const PRECISION: f32 = 0.001;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarchOutcome {
    // last step was within PRECISION of a surface
    Converged,
    // accumulated depth went past the far bound
    Escaped,
    // ran out of steps without either
    Exhausted,
}

#[derive(Copy, Clone, Debug)]
pub struct March {
    /// `distance` holds the accumulated depth along the ray, not the last field sample.
    pub surface: Surface,
    pub steps: usize,
    pub outcome: MarchOutcome,
}

impl March {
    pub fn depth(&self) -> f32 {
        self.surface.distance
    }
}

/// Sphere traces `direction` from `origin`, starting `start` units along the ray.
///
/// The loop never evaluates `sdf` more than [`MAX_STEPS`] times. A march that runs out of steps
/// is reported as-is, the depth it reached is not corrected. Callers decide whether that depth
/// counts as a hit.
pub fn march<S>(
    sdf: &S,
    origin: Vec3,
    direction: Vec3,
    start: f32,
    end: f32,
    printout: bool,
) -> March
where
    S: SignedDistance + ?Sized,
{
    let mut depth = start;
    let mut nearest = Surface::new(start, Vec3::zero());
    let mut steps = 0;
    let mut outcome = MarchOutcome::Exhausted;
    while steps < MAX_STEPS {
        let p = origin + direction * depth;
        nearest = sdf.surface(p);
        steps += 1;
        if printout {
            info!(
                "step {}: from point {:?}, depth ({}) = {} + {}",
                steps,
                p,
                depth + nearest.distance,
                depth,
                nearest.distance
            );
        }
        depth += nearest.distance;
        if nearest.distance < PRECISION {
            outcome = MarchOutcome::Converged;
            break;
        }
        if depth > end {
            outcome = MarchOutcome::Escaped;
            break;
        }
    }
    nearest.distance = depth;
    March {
        surface: nearest,
        steps,
        outcome,
    }
}

/// Nearest surface along the ray, with `distance` replaced by the marched depth.
///
/// `color` is only meaningful when the march converged.
pub fn ray_march<S>(sdf: &S, origin: Vec3, direction: Vec3, start: f32, end: f32) -> Surface
where
    S: SignedDistance + ?Sized,
{
    march(sdf, origin, direction, start, end, false).surface
}
