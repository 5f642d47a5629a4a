use chrono::{DateTime, Utc};

use crate::State;

/// Wall clock as a state, so code that stamps file names or dates can be
/// driven with a fixed instant in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Time {
    now: DateTime<Utc>,
    frozen: bool,
}

impl Default for Time {
    fn default() -> Self {
        Self {
            now: Utc::now(),
            frozen: false,
        }
    }
}

impl State for Time {}

impl Time {
    /// A clock that ignores [`Time::tick`].
    pub fn fixed(now: DateTime<Utc>) -> Self {
        Self { now, frozen: true }
    }

    /// Advances to the real current time unless frozen.
    pub fn tick(&mut self) {
        if !self.frozen {
            self.now = Utc::now();
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }
}

impl AsRef<DateTime<Utc>> for Time {
    fn as_ref(&self) -> &DateTime<Utc> {
        &self.now
    }
}
