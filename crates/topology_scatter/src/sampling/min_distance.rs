//! Minimum-distance rejection sampling for node positions.
use glam::Vec2;
use rand::Rng as RngCore;
use tracing::debug;

use crate::config::DEFAULT_MAX_PLACEMENT_ATTEMPTS;
use crate::error::{Error, Result};
use crate::sampling::rand_coord;

/// Rejection sampler placing points uniformly over `[0, w) × [0, h)` while keeping
/// every pair at least `min_distance` apart.
///
/// Each candidate is checked against all accepted points with a linear scan.
/// The sampler places `count + 1` points.
#[derive(Debug, Clone)]
pub struct MinDistanceSampling {
    /// Target point count; one more point than this is placed.
    pub count: usize,
    /// Minimum distance between any two accepted points.
    pub min_distance: f32,
    /// Consecutive rejected candidates allowed for a single point.
    pub max_attempts: usize,
}

impl MinDistanceSampling {
    pub fn new(count: usize, min_distance: f32) -> Self {
        Self {
            count,
            min_distance,
            max_attempts: DEFAULT_MAX_PLACEMENT_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Places the points, failing with [`Error::PlacementExhausted`] when a point
    /// cannot be placed within `max_attempts` candidates.
    pub fn generate(&self, extent: Vec2, rng: &mut dyn RngCore) -> Result<Vec<Vec2>> {
        if extent.x <= 0.0 || extent.y <= 0.0 {
            return Err(Error::InvalidConfig(
                "sampling extent must be > 0 in both components".into(),
            ));
        }

        let min_d2 = self.min_distance * self.min_distance;
        let mut points: Vec<Vec2> = Vec::with_capacity(self.count + 1);
        let mut rejected = 0usize;

        for index in 0..=self.count {
            let mut attempt = 0;
            loop {
                if attempt >= self.max_attempts {
                    return Err(Error::PlacementExhausted {
                        index,
                        attempts: attempt,
                    });
                }
                attempt += 1;

                let candidate = Vec2::new(rand_coord(rng, extent.x), rand_coord(rng, extent.y));
                if can_place(candidate, &points, min_d2) {
                    points.push(candidate);
                    break;
                }
                rejected += 1;
            }
        }

        debug!(
            "Placed {} points on {}x{} with min distance {} ({} candidates rejected).",
            points.len(),
            extent.x,
            extent.y,
            self.min_distance,
            rejected
        );

        Ok(points)
    }
}

fn can_place(candidate: Vec2, placed: &[Vec2], min_d2: f32) -> bool {
    placed
        .iter()
        .all(|&p| p.distance_squared(candidate) >= min_d2)
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn pairwise_min_distance(points: &[Vec2]) -> f32 {
        let mut min = f32::MAX;
        for i in 0..points.len() {
            for j in (i + 1)..points.len() {
                min = min.min(points[i].distance(points[j]));
            }
        }
        min
    }

    #[test]
    fn places_count_plus_one_points_in_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        let s = MinDistanceSampling::new(40, 5.0);
        let pts = s.generate(Vec2::new(200.0, 120.0), &mut rng).unwrap();
        assert_eq!(pts.len(), 41);
        for p in pts {
            assert!(p.x >= 0.0 && p.x < 200.0);
            assert!(p.y >= 0.0 && p.y < 120.0);
        }
    }

    #[test]
    fn min_distance_holds_across_seeds() {
        let s = MinDistanceSampling::new(60, 12.0);
        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let pts = s.generate(Vec2::new(400.0, 300.0), &mut rng).unwrap();
            assert!(
                pairwise_min_distance(&pts) >= 12.0 - 1e-3,
                "seed {seed} violated the minimum distance"
            );
        }
    }

    #[test]
    fn zero_count_still_places_one_point() {
        let mut rng = StdRng::seed_from_u64(3);
        let pts = MinDistanceSampling::new(0, 5.0)
            .generate(Vec2::new(10.0, 10.0), &mut rng)
            .unwrap();
        assert_eq!(pts.len(), 1);
    }

    #[test]
    fn infeasible_density_exhausts_attempts() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = MinDistanceSampling::new(4, 100.0)
            .with_max_attempts(25)
            .generate(Vec2::new(10.0, 10.0), &mut rng)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::PlacementExhausted {
                index: 1,
                attempts: 25
            }
        ));
    }

    #[test]
    fn rejects_empty_extent() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = MinDistanceSampling::new(4, 1.0)
            .generate(Vec2::new(0.0, 10.0), &mut rng)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn determinism_for_same_seed() {
        let s = MinDistanceSampling::new(32, 4.0);
        let pa = s
            .generate(Vec2::new(100.0, 100.0), &mut StdRng::seed_from_u64(123))
            .unwrap();
        let pb = s
            .generate(Vec2::new(100.0, 100.0), &mut StdRng::seed_from_u64(123))
            .unwrap();
        assert_eq!(pa, pb);

        let pc = s
            .generate(Vec2::new(100.0, 100.0), &mut StdRng::seed_from_u64(456))
            .unwrap();
        assert_ne!(pa, pc);
    }
}
