//! A single moving point of the particle field.

use rand::Rng;

/// Per-frame alpha increment used when the fade-in variant is active.
const FADE_IN_STEP: f64 = 0.02;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    /// Fixed at creation, never mutated.
    pub radius: f64,
    /// Hue in the blue band, fixed at creation.
    pub hue: f64,
    /// Current alpha; equals `max_alpha` unless the particle is fading in.
    pub alpha: f64,
    pub max_alpha: f64,
}

impl Particle {
    /// Sample a fresh particle uniformly within `width` × `height`.
    ///
    /// Velocity components land in [-1, 1), radius in [1, 3), hue in the
    /// [200, 260) band the page uses everywhere.
    pub fn sample(rng: &mut impl Rng, width: f64, height: f64, fade_in: bool) -> Self {
        let max_alpha = rng.random_range(0.4..1.0);
        Self {
            x: sample_extent(rng, width),
            y: sample_extent(rng, height),
            vx: rng.random_range(-1.0..1.0),
            vy: rng.random_range(-1.0..1.0),
            radius: rng.random_range(1.0..3.0),
            hue: rng.random_range(200.0..260.0),
            alpha: if fade_in { 0.0 } else { max_alpha },
            max_alpha,
        }
    }

    /// Advance one frame and reflect off the surface edges.
    ///
    /// A velocity component is negated only when the particle is past the
    /// bound on that axis and still moving outward, so a particle stranded
    /// outside after the surface shrinks drifts back in instead of
    /// oscillating at the edge. Position is never clamped; a particle may
    /// overshoot by at most one frame's travel.
    pub fn step(&mut self, width: f64, height: f64) {
        self.x += self.vx;
        self.y += self.vy;

        if (self.x < 0.0 && self.vx < 0.0) || (self.x > width && self.vx > 0.0) {
            self.vx = -self.vx;
        }
        if (self.y < 0.0 && self.vy < 0.0) || (self.y > height && self.vy > 0.0) {
            self.vy = -self.vy;
        }
    }

    /// Raise alpha toward `max_alpha`; used by the fade-in variant.
    pub fn fade_in(&mut self) {
        self.alpha = (self.alpha + FADE_IN_STEP).min(self.max_alpha);
    }

    /// CSS color for the filled circle.
    pub fn css_color(&self) -> String {
        format!("hsla({:.0}, 70%, 60%, {:.3})", self.hue, self.alpha)
    }

    pub fn distance_to(&self, other: &Particle) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Uniform in [0, extent). A zero or negative extent (hidden frame,
/// collapsed viewport) yields 0 instead of panicking on an empty range.
fn sample_extent(rng: &mut impl Rng, extent: f64) -> f64 {
    if extent > 0.0 {
        rng.random_range(0.0..extent)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn particle(x: f64, y: f64, vx: f64, vy: f64) -> Particle {
        Particle {
            x,
            y,
            vx,
            vy,
            radius: 2.0,
            hue: 220.0,
            alpha: 1.0,
            max_alpha: 1.0,
        }
    }

    #[test]
    fn reflects_at_right_edge() {
        let mut p = particle(99.5, 50.0, 1.0, 0.0);
        p.step(100.0, 100.0);
        assert_eq!(p.x, 100.5);
        assert_eq!(p.vx, -1.0);
        assert_eq!(p.vy, 0.0);
    }

    #[test]
    fn reflects_at_left_and_top_edges() {
        let mut p = particle(0.3, 0.3, -0.8, -0.8);
        p.step(100.0, 100.0);
        assert_eq!(p.vx, 0.8);
        assert_eq!(p.vy, 0.8);
    }

    #[test]
    fn velocity_unchanged_while_inside() {
        let mut p = particle(50.0, 50.0, 0.7, -0.4);
        p.step(100.0, 100.0);
        assert_eq!((p.vx, p.vy), (0.7, -0.4));
        assert_eq!((p.x, p.y), (50.7, 49.6));
    }

    #[test]
    fn stranded_particle_drifts_back_without_oscillating() {
        // Surface shrank; the particle is far outside but already heading in.
        let mut p = particle(500.0, 50.0, -1.0, 0.0);
        for _ in 0..200 {
            p.step(400.0, 300.0);
            assert_eq!(p.vx, -1.0, "inbound velocity must not flip at x={}", p.x);
            if p.x <= 400.0 {
                return;
            }
        }
        panic!("particle never re-entered the surface");
    }

    #[test]
    fn fade_in_saturates_at_max_alpha() {
        let mut p = particle(10.0, 10.0, 0.0, 0.0);
        p.alpha = 0.0;
        p.max_alpha = 0.5;
        for _ in 0..100 {
            p.fade_in();
        }
        assert_eq!(p.alpha, 0.5);
    }

    #[test]
    fn sampling_a_degenerate_surface_pins_position_to_origin() {
        let mut rng = SmallRng::seed_from_u64(8);
        for (w, h) in [(0.0, 0.0), (0.0, 600.0), (800.0, -1.0)] {
            let p = Particle::sample(&mut rng, w, h, false);
            if w <= 0.0 {
                assert_eq!(p.x, 0.0);
            }
            if h <= 0.0 {
                assert_eq!(p.y, 0.0);
            }
        }
    }

    #[test]
    fn css_color_carries_hue_and_alpha() {
        let p = particle(0.0, 0.0, 0.0, 0.0);
        assert_eq!(p.css_color(), "hsla(220, 70%, 60%, 1.000)");
    }
}
