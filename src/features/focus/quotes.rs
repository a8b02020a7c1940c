//! Rotating motivational quotes.

use chrono::{DateTime, Utc};

use super::scheduler::QUOTE_INTERVAL;

/// The quote rotation.
pub const QUOTES: [&str; 10] = [
    "The future depends on what you do today.",
    "Focus on progress, not perfection.",
    "Success is the sum of small efforts repeated daily.",
    "You are capable of amazing things.",
    "Don't watch the clock; do what it does. Keep going.",
    "Great things never come from comfort zones.",
    "The only way to do great work is to love what you do.",
    "Believe you can and you're halfway there.",
    "Your limitation—it's only your imagination.",
    "Push yourself, because no one else is going to do it for you.",
];

/// Cycles through [`QUOTES`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuoteRotator {
    index: usize,
}

impl QuoteRotator {
    /// Start at the first quote.
    #[must_use]
    pub const fn new() -> Self {
        Self { index: 0 }
    }

    /// The quote shown at `now`, so separate invocations agree on it.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn at(now: DateTime<Utc>) -> Self {
        let interval = i64::try_from(QUOTE_INTERVAL.as_millis()).unwrap_or(i64::MAX);
        let slot = now.timestamp_millis().max(0) / interval;
        Self {
            index: (slot as usize) % QUOTES.len(),
        }
    }

    /// Move to the next quote, wrapping around.
    pub fn advance(&mut self) {
        self.index = (self.index + 1) % QUOTES.len();
    }

    /// The current quote.
    #[must_use]
    pub const fn current(&self) -> &'static str {
        QUOTES[self.index]
    }

    /// Position in [`QUOTES`].
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }
}
