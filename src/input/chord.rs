//! Two-key chords in the main screen's normal mode: `gg`, `ZZ`, `ZQ`.

use super::command::Command;

/// What the chord machine did with a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChordStep {
    /// First key of a chord; nothing else happens.
    Pending,
    /// Chord completed.
    Fired(Command),
    /// Not part of a chord. Any pending key was dropped; handle the key normally.
    Passthrough,
}

/// Holds at most one pending keystroke.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChordState {
    pending: Option<char>,
}

impl ChordState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> Option<char> {
        self.pending
    }

    pub fn reset(&mut self) {
        self.pending = None;
    }

    /// Feed a key. `None` stands for a non-character key.
    pub fn feed(&mut self, key: Option<char>) -> ChordStep {
        match (self.pending.take(), key) {
            (Some('g'), Some('g')) => ChordStep::Fired(Command::SelectFirst),
            (Some('Z'), Some('Z')) | (Some('Z'), Some('Q')) => ChordStep::Fired(Command::Quit),
            (Some(_), _) => ChordStep::Passthrough,
            (None, Some(c @ ('g' | 'Z'))) => {
                self.pending = Some(c);
                ChordStep::Pending
            }
            (None, _) => ChordStep::Passthrough,
        }
    }
}
