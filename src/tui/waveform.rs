//! Audio-reactive looking bars around the clock.

use rand::Rng;

/// Number of bars.
pub const BAR_COUNT: usize = 32;

/// Bar height while nothing is playing.
pub const IDLE_HEIGHT: f64 = 0.1;

/// Random bar heights, refreshed every animation frame while music plays
/// during a running session.
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    bars: Vec<f64>,
}

impl Default for Waveform {
    fn default() -> Self {
        Self::new()
    }
}

impl Waveform {
    /// Flat bars.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bars: vec![IDLE_HEIGHT; BAR_COUNT],
        }
    }

    /// Advance one frame. Heights are random in 0.2..1.0 when `active`,
    /// flat otherwise.
    pub fn frame(&mut self, active: bool) {
        if active {
            let mut rng = rand::thread_rng();
            for bar in &mut self.bars {
                *bar = rng.gen_range(0.2..1.0);
            }
        } else {
            self.bars.fill(IDLE_HEIGHT);
        }
    }

    /// Current heights, 0.0 to 1.0.
    #[must_use]
    pub fn bars(&self) -> &[f64] {
        &self.bars
    }

    /// Heights scaled for a sparkline of the given maximum.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn scaled(&self, max: u64) -> Vec<u64> {
        self.bars
            .iter()
            .map(|h| (h * max as f64).round() as u64)
            .collect()
    }
}
