//! Per-variant constants for the particle field, consolidated into one
//! options struct. The original page shipped five near-duplicate copies of
//! the renderer differing only in these numbers.

/// Viewport width below which the reduced particle count is used.
pub const MOBILE_BREAKPOINT: f64 = 768.0;

/// Distance below which two particles are connected by a line.
pub const CONNECTION_THRESHOLD: f64 = 150.0;

/// How long the first-visit field stays on screen before fading out.
pub const FIRST_VISIT_LIFETIME_MS: f64 = 10_000.0;

/// Duration of the opacity transition used when the field fades out.
pub const FADE_OUT_MS: f64 = 1_500.0;

#[derive(Debug, Clone, PartialEq)]
pub struct FieldOptions {
    /// Viewport width separating the low and high particle counts.
    pub breakpoint: f64,
    /// Particle count for narrow viewports.
    pub particle_count_low: usize,
    /// Particle count for wide viewports.
    pub particle_count_high: usize,
    /// Pairwise distance under which a connecting line is drawn.
    pub connection_threshold: f64,
    /// Opacity of the canvas element itself.
    pub base_opacity: f64,
    /// When set, the field stops and fades out after this many milliseconds.
    pub lifetime_ms: Option<f64>,
    /// Whether particles fade in from zero alpha over their first frames.
    pub fade_in: bool,
}

impl Default for FieldOptions {
    /// The ambient variant: runs for the lifetime of the page.
    fn default() -> Self {
        Self {
            breakpoint: MOBILE_BREAKPOINT,
            particle_count_low: 30,
            particle_count_high: 100,
            connection_threshold: CONNECTION_THRESHOLD,
            base_opacity: 0.3,
            lifetime_ms: None,
            fade_in: false,
        }
    }
}

impl FieldOptions {
    /// The subtle variant shown only on a visitor's first session: fewer
    /// particles, lower opacity, fade-in, and a fixed lifetime after which
    /// the field fades out and removes itself.
    pub fn first_visit() -> Self {
        Self {
            particle_count_low: 20,
            particle_count_high: 50,
            base_opacity: 0.12,
            lifetime_ms: Some(FIRST_VISIT_LIFETIME_MS),
            fade_in: true,
            ..Self::default()
        }
    }

    /// Particle count for a given viewport width.
    pub fn particle_count(&self, viewport_width: f64) -> usize {
        if viewport_width < self.breakpoint {
            self.particle_count_low
        } else {
            self.particle_count_high
        }
    }
}
