/// Keyboard state tracking.
///
/// Instead of acting on each key event individually, the tracker records the
/// timestamp of the last press/repeat for every key.  Terminals that report
/// releases keep a key held from press until release.  Classic terminals only
/// send repeated presses, so there a key stays held while its last press
/// arrived within `HOLD_WINDOW_MS`, which the OS auto-repeat keeps refreshing.
use std::collections::HashMap;

use crate::config::timing::HOLD_WINDOW_MS;

/// Keys the game reacts to.  Letters are stored lowercased.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Space,
    Esc,
    Char(char),
}

impl Key {
    pub fn letter(c: char) -> Self {
        if c == ' ' {
            Key::Space
        } else {
            Key::Char(c.to_ascii_lowercase())
        }
    }
}

/// Per-frame snapshot of the held controls consumed by `compute::tick`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub shooting: bool,
}

#[derive(Debug)]
pub struct InputTracker {
    last_seen: HashMap<Key, u64>,
    release_events: bool,
}

impl InputTracker {
    /// `release_events` says whether the terminal reports key releases.  A
    /// tracker created without them switches over on the first release seen.
    pub fn new(release_events: bool) -> Self {
        Self { last_seen: HashMap::new(), release_events }
    }

    pub fn reports_releases(&self) -> bool {
        self.release_events
    }

    /// Record a press or auto-repeat seen at `now_ms`.
    pub fn key_down(&mut self, key: Key, now_ms: u64) {
        self.last_seen.insert(key, now_ms);
    }

    pub fn key_up(&mut self, key: Key) {
        self.release_events = true;
        self.last_seen.remove(&key);
    }

    pub fn is_held(&self, key: Key, now_ms: u64) -> bool {
        match self.last_seen.get(&key) {
            None => false,
            Some(_) if self.release_events => true,
            Some(&last) => now_ms.saturating_sub(last) <= HOLD_WINDOW_MS,
        }
    }

    /// The continuous-fire flag: set while the space bar is held.
    pub fn is_shooting(&self, now_ms: u64) -> bool {
        self.is_held(Key::Space, now_ms)
    }

    pub fn controls(&self, now_ms: u64) -> Controls {
        Controls {
            left: self.is_held(Key::Left, now_ms),
            right: self.is_held(Key::Right, now_ms),
            shooting: self.is_shooting(now_ms),
        }
    }

    pub fn clear(&mut self) {
        self.last_seen.clear();
    }
}

impl Default for InputTracker {
    fn default() -> Self {
        Self::new(true)
    }
}
