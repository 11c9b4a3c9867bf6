//! The particle field: an owned state object holding the particle set and
//! the current surface dimensions. All mutation happens through explicit
//! calls from the frame loop or the resize handler; there is no global
//! state and no internal scheduling.

use rand::Rng;

use crate::config::FieldOptions;
use crate::particle::Particle;

/// A line between two particles closer than the connection threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    /// Falls off linearly from 1 at zero distance to 0 at the threshold.
    pub alpha: f64,
}

impl Connection {
    /// CSS stroke color; the cornflower line color the page uses.
    pub fn css_color(&self) -> String {
        format!("rgba(100, 149, 237, {:.3})", self.alpha)
    }
}

#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    width: f64,
    height: f64,
    options: FieldOptions,
}

impl ParticleField {
    /// Populate a field for the given viewport. The particle count is
    /// derived from `width` via the options' breakpoint rule and never
    /// changes afterwards.
    pub fn new(width: f64, height: f64, options: FieldOptions, rng: &mut impl Rng) -> Self {
        let count = options.particle_count(width);
        let particles = (0..count)
            .map(|_| Particle::sample(rng, width, height, options.fade_in))
            .collect();
        Self {
            particles,
            width,
            height,
            options,
        }
    }

    /// Build a field from pre-made particles. Useful for callers that want
    /// a fixed layout rather than a sampled one.
    pub fn from_particles(
        particles: Vec<Particle>,
        width: f64,
        height: f64,
        options: FieldOptions,
    ) -> Self {
        Self {
            particles,
            width,
            height,
            options,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn options(&self) -> &FieldOptions {
        &self.options
    }

    /// Connections for the current frame, computed from current positions.
    ///
    /// O(n²) over unordered pairs; this dominates frame cost at the high
    /// particle count.
    pub fn connections(&self) -> Vec<Connection> {
        let threshold = self.options.connection_threshold;
        let mut out = Vec::new();
        for i in 0..self.particles.len() {
            for j in (i + 1)..self.particles.len() {
                let a = &self.particles[i];
                let b = &self.particles[j];
                let d = a.distance_to(b);
                if d < threshold {
                    out.push(Connection {
                        x1: a.x,
                        y1: a.y,
                        x2: b.x,
                        y2: b.y,
                        alpha: 1.0 - d / threshold,
                    });
                }
            }
        }
        out
    }

    /// Advance every particle by one frame, reflecting at the current
    /// surface bounds.
    pub fn step(&mut self) {
        let (width, height) = (self.width, self.height);
        let fade_in = self.options.fade_in;
        for p in &mut self.particles {
            p.step(width, height);
            if fade_in {
                p.fade_in();
            }
        }
    }

    /// Adopt new surface dimensions. Particles are neither repositioned nor
    /// resampled; anything left outside the new bounds reflects back in on
    /// a later frame.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }
}
