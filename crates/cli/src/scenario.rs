//! Scripted key events for headless runs.
//!
//! A scenario is a TOML file with one `[[events]]` table per key transition:
//!
//! ```toml
//! [[events]]
//! at = 0.0
//! key = "throttle_up"
//!
//! [[events]]
//! at = 4.0
//! key = "brake"
//!
//! [[events]]
//! at = 6.0
//! key = "brake"
//! transition = "up"
//! ```

use std::{
    collections::VecDeque,
    fs,
    path::{Path, PathBuf},
};

use cockpit_sim::controls::{Key, KeyEvent, Transition};
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur while loading a scenario.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid scenario: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("event {index} is scheduled at {at} s; times must be finite and non-negative")]
    BadTime { index: usize, at: f64 },
}

/// A key transition scheduled at a simulated time.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScheduledKey {
    /// Simulated time at which the event is delivered, in seconds.
    pub at: f64,
    pub key: Key,
    #[serde(default)]
    pub transition: Transition,
    #[serde(default)]
    pub repeat: bool,
}

impl ScheduledKey {
    fn event(&self) -> KeyEvent {
        KeyEvent {
            key: self.key,
            transition: self.transition,
            repeat: self.repeat,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Scenario {
    pub events: Vec<ScheduledKey>,
}

impl Scenario {
    /// Parses a scenario from TOML text.
    ///
    /// # Errors
    ///
    /// Returns a [`ScenarioError`] for malformed TOML, unknown key names, or
    /// event times that are negative or not finite.
    pub fn from_toml_str(text: &str) -> Result<Self, ScenarioError> {
        let scenario: Self = toml::from_str(text)?;
        if let Some((index, event)) = scenario
            .events
            .iter()
            .enumerate()
            .find(|(_, e)| !e.at.is_finite() || e.at < 0.0)
        {
            return Err(ScenarioError::BadTime {
                index,
                at: event.at,
            });
        }
        Ok(scenario)
    }

    /// Reads and parses a scenario file.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::Io`] if the file cannot be read, otherwise the
    /// same errors as [`Scenario::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Orders the events by time into a queue, keeping file order for ties.
    #[must_use]
    pub fn into_queue(self) -> EventQueue {
        let mut events = self.events;
        events.sort_by(|a, b| a.at.total_cmp(&b.at));
        EventQueue {
            pending: events.into(),
        }
    }
}

/// Scheduled events waiting to be delivered.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    pending: VecDeque<ScheduledKey>,
}

impl EventQueue {
    /// Removes and returns the next event due at or before `now`.
    pub fn pop_due(&mut self, now: f64) -> Option<KeyEvent> {
        if self.pending.front()?.at <= now {
            self.pending.pop_front().map(|e| e.event())
        } else {
            None
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
