use crate::geom::Point;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Serve speed ranges, units per second. Horizontal is the fast axis.
pub const SERVE_SPEED_X: (f64, f64) = (200.0, 320.0);
pub const SERVE_SPEED_Y: (f64, f64) = (20.0, 40.0);

/// Dice-roll helper that picks serve directions for the ball.
pub struct Roller {
    rng: StdRng,
}

impl Roller {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic roller for tests.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Value with magnitude uniform in [min, max] and a fair-coin sign.
    pub fn between(&mut self, min: f64, max: f64) -> f64 {
        let val = self.rng.gen_range(min..=max);
        self.maybe_do(0.5, || -val, || val)
    }

    /// Run `action` with probability `odds`, otherwise `fallback`.
    pub fn maybe_do<T>(
        &mut self,
        odds: f64,
        action: impl FnOnce() -> T,
        fallback: impl FnOnce() -> T,
    ) -> T {
        if self.rng.gen::<f64>() < odds {
            action()
        } else {
            fallback()
        }
    }

    /// As `maybe_do` without a fallback branch.
    pub fn maybe<T>(&mut self, odds: f64, action: impl FnOnce() -> T) -> Option<T> {
        if self.rng.gen::<f64>() < odds {
            Some(action())
        } else {
            None
        }
    }

    /// Serve velocity: fast horizontally, slow vertically, each axis
    /// independently signed so every serve is a diagonal.
    pub fn random_direction(&mut self) -> Point {
        Point::new(
            self.between(SERVE_SPEED_X.0, SERVE_SPEED_X.1),
            self.between(SERVE_SPEED_Y.0, SERVE_SPEED_Y.1),
        )
    }
}

impl Default for Roller {
    fn default() -> Self {
        Self::new()
    }
}
