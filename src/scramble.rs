//! Text-scramble state machine: each character of a heading flickers
//! through random glyphs for a randomized window of frames before settling
//! on its final value. Pure state; the browser glue drives it one call per
//! animation frame.

use rand::Rng;

/// Glyphs shown while a character is still scrambling. The underscore
/// repeats so the flicker leans heavily toward it; that weighting is part
/// of the effect's look.
pub const SCRAMBLE_CHARS: &[char] = &[
    '!', '<', '>', '-', '_', '\\', '/', '[', ']', '{', '}', '—', '=', '+', '*', '^', '?', '#',
    '_', '_', '_', '_', '_', '_', '_', '_',
];

/// Chance per frame that an in-flight slot re-rolls its glyph.
const REROLL_CHANCE: f64 = 0.28;

/// Latest frame on which a slot may settle: start in [0, 40) plus a window
/// in [0, 40).
pub const MAX_FRAMES: u32 = 80;

#[derive(Debug, Clone)]
struct Slot {
    /// `None` when the source text is shorter than the target.
    from: Option<char>,
    /// `None` when the target text is shorter than the source.
    to: Option<char>,
    start: u32,
    end: u32,
    current: char,
}

#[derive(Debug, Clone)]
pub struct TextScramble {
    slots: Vec<Slot>,
    frame: u32,
}

impl TextScramble {
    /// Prepare a transition from `from` to `to`. Each slot gets its own
    /// randomized start/end window, so characters settle out of order.
    pub fn new(from: &str, to: &str, rng: &mut impl Rng) -> Self {
        let from: Vec<char> = from.chars().collect();
        let to: Vec<char> = to.chars().collect();
        let len = from.len().max(to.len());

        let slots = (0..len)
            .map(|i| {
                let start = rng.random_range(0..40);
                Slot {
                    from: from.get(i).copied(),
                    to: to.get(i).copied(),
                    start,
                    end: start + rng.random_range(0..40),
                    current: random_glyph(rng),
                }
            })
            .collect();

        Self { slots, frame: 0 }
    }

    /// Advance one frame and render the current text. Settled slots show
    /// their target character, pending slots their source character, and
    /// in-flight slots a flickering glyph.
    pub fn step(&mut self, rng: &mut impl Rng) -> String {
        let mut out = String::with_capacity(self.slots.len());
        for slot in &mut self.slots {
            if self.frame >= slot.end {
                if let Some(c) = slot.to {
                    out.push(c);
                }
            } else if self.frame >= slot.start {
                if rng.random_bool(REROLL_CHANCE) {
                    slot.current = random_glyph(rng);
                }
                out.push(slot.current);
            } else if let Some(c) = slot.from {
                out.push(c);
            }
        }
        self.frame += 1;
        out
    }

    /// True once every slot has rendered its target character. `step`
    /// increments the frame counter after rendering, so a slot counts as
    /// settled only once the counter has passed its `end`.
    pub fn is_done(&self) -> bool {
        self.slots.iter().all(|s| self.frame > s.end)
    }
}

fn random_glyph(rng: &mut impl Rng) -> char {
    SCRAMBLE_CHARS[rng.random_range(0..SCRAMBLE_CHARS.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn settles_on_target_within_frame_bound() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut scramble = TextScramble::new("EXPERIENCE", "EXPERIENCE", &mut rng);

        let mut last = String::new();
        for _ in 0..MAX_FRAMES {
            last = scramble.step(&mut rng);
            if scramble.is_done() {
                break;
            }
        }
        assert!(scramble.is_done());
        assert_eq!(last, "EXPERIENCE");
    }

    #[test]
    fn grows_from_empty_source() {
        let mut rng = SmallRng::seed_from_u64(2);
        let mut scramble = TextScramble::new("", "Skills", &mut rng);
        let mut last = String::new();
        while !scramble.is_done() {
            last = scramble.step(&mut rng);
        }
        assert_eq!(last, "Skills");
    }

    #[test]
    fn shrinks_to_shorter_target() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut scramble = TextScramble::new("Curriculum Vitae", "CV", &mut rng);
        let mut last = String::new();
        while !scramble.is_done() {
            last = scramble.step(&mut rng);
        }
        assert_eq!(last, "CV");
    }

    #[test]
    fn in_flight_output_draws_from_known_alphabet() {
        let mut rng = SmallRng::seed_from_u64(4);
        let mut scramble = TextScramble::new("abc", "xyz", &mut rng);
        while !scramble.is_done() {
            for c in scramble.step(&mut rng).chars() {
                let settled_or_source = "abcxyz".contains(c);
                assert!(
                    settled_or_source || SCRAMBLE_CHARS.contains(&c),
                    "unexpected glyph {c:?}"
                );
            }
        }
    }

    #[test]
    fn done_implies_target_was_rendered() {
        // Whatever windows the seed deals out, the string held when the
        // animation reports done must be the target, including the slot
        // that settles last.
        for seed in 0..20 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let mut scramble = TextScramble::new("", "Skills", &mut rng);
            let mut last = String::new();
            let mut steps = 0;
            while !scramble.is_done() {
                last = scramble.step(&mut rng);
                steps += 1;
                assert!(steps <= MAX_FRAMES, "seed {seed}: did not converge");
            }
            assert_eq!(last, "Skills", "seed {seed} stopped on a glyph");
        }
    }

    #[test]
    fn not_done_before_first_step() {
        let mut rng = SmallRng::seed_from_u64(6);
        let scramble = TextScramble::new("x", "y", &mut rng);
        assert!(!scramble.is_done());
    }

    #[test]
    fn alphabet_is_weighted_toward_underscore() {
        assert_eq!(SCRAMBLE_CHARS.len(), 26);
        let underscores = SCRAMBLE_CHARS.iter().filter(|c| **c == '_').count();
        assert_eq!(underscores, 9);
    }

    #[test]
    fn deterministic_under_fixed_seed() {
        let run = |seed| {
            let mut rng = SmallRng::seed_from_u64(seed);
            let mut scramble = TextScramble::new("About", "About", &mut rng);
            let mut frames = Vec::new();
            while !scramble.is_done() {
                frames.push(scramble.step(&mut rng));
            }
            frames
        };
        assert_eq!(run(9), run(9));
    }
}
