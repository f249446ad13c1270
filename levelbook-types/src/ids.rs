//! Level identifiers and the clock that issues them.
//!
//! Ids are milliseconds since the Unix epoch at creation time, so a higher id
//! means a more recently created level. [`IdClock`] guarantees strictly
//! increasing ids even when the wall clock stalls or steps backwards.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

/// Unique identifier for a level in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelId(u64);

impl LevelId {
    /// Creates a level ID from its raw value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for LevelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for LevelId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|_| Error::InvalidId(s.to_string()))
    }
}

impl From<u64> for LevelId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// A source of wall-clock time in milliseconds since the Unix epoch.
pub trait Clock {
    fn now_millis(&self) -> u64;
}

/// The system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// A manually driven clock, for deterministic tests and replays.
#[derive(Debug, Default)]
pub struct FixedClock {
    now: Cell<u64>,
}

impl FixedClock {
    #[must_use]
    pub fn new(now: u64) -> Self {
        Self { now: Cell::new(now) }
    }

    /// Moves the clock to `now`. Going backwards is allowed.
    pub fn set(&self, now: u64) {
        self.now.set(now);
    }

    /// Advances the clock by `millis`.
    pub fn advance(&self, millis: u64) {
        self.now.set(self.now.get().saturating_add(millis));
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> u64 {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for std::rc::Rc<C> {
    fn now_millis(&self) -> u64 {
        (**self).now_millis()
    }
}

/// Issues strictly increasing level ids.
///
/// Each id is the current wall time, unless that would not exceed the last
/// issued (or observed) id, in which case it is `last + 1`.
pub struct IdClock {
    clock: Box<dyn Clock>,
    last: u64,
}

impl IdClock {
    /// Creates an id clock over an arbitrary time source.
    pub fn new(clock: impl Clock + 'static) -> Self {
        Self {
            clock: Box::new(clock),
            last: 0,
        }
    }

    /// Creates an id clock over the system clock.
    #[must_use]
    pub fn system() -> Self {
        Self::new(SystemClock)
    }

    /// Records an existing id so that later ids are issued above it.
    pub fn observe(&mut self, id: LevelId) {
        self.last = self.last.max(id.0);
    }

    /// Returns the last issued or observed id value.
    #[must_use]
    pub fn last(&self) -> u64 {
        self.last
    }

    /// Issues the next id.
    pub fn next_id(&mut self) -> LevelId {
        let now = self.clock.now_millis();
        self.last = if now > self.last {
            now
        } else {
            self.last.saturating_add(1)
        };
        LevelId(self.last)
    }
}

impl Default for IdClock {
    fn default() -> Self {
        Self::system()
    }
}

impl fmt::Debug for IdClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdClock").field("last", &self.last).finish()
    }
}
