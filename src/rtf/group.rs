//! RTF group state and the group stack.
//!
//! Each `{` opens a group that starts as a full copy of its parent, so a
//! control word recorded inside a nested group never leaks back out when the
//! group closes.

use std::collections::HashMap;

/// Value recorded for a control word that produced no direct output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlValue {
    /// The word carried no parameter.
    Flag,
    /// Signed integer parameter.
    Number(i32),
    /// A `-` with no digits after it.
    BareMinus,
}

/// Control words whose presence turns a group into a destination.
const DESTINATION_WORDS: [&str; 5] = ["*", "fonttbl", "colortbl", "datastore", "themedata"];

/// One frame of the group stack.
#[derive(Debug, Clone, Default)]
pub struct Group {
    keywords: HashMap<String, ControlValue>,
    /// Bit `i` set when `DESTINATION_WORDS[i]` has been recorded.
    destinations: u8,
}

impl Group {
    /// Record a control word on this group.
    pub fn record(&mut self, word: &str, value: ControlValue) {
        if let Some(bit) = DESTINATION_WORDS.iter().position(|w| *w == word) {
            self.destinations |= 1 << bit;
        }
        self.keywords.insert(word.to_string(), value);
    }

    /// Mark the group ignorable (`\*`).
    pub fn mark_ignorable(&mut self) {
        self.record("*", ControlValue::Flag);
    }

    /// Whether literal content in this group is suppressed.
    #[inline]
    #[must_use]
    pub fn is_destination(&self) -> bool {
        self.destinations != 0
    }

    #[must_use]
    pub fn get(&self, word: &str) -> Option<ControlValue> {
        self.keywords.get(word).copied()
    }

    /// Positive numeric value of `word`, if recorded.
    #[must_use]
    pub fn positive(&self, word: &str) -> Option<usize> {
        match self.get(word) {
            Some(ControlValue::Number(n)) if n > 0 => usize::try_from(n).ok(),
            _ => None,
        }
    }
}

/// Stack of groups that always keeps its root frame.
#[derive(Debug, Clone)]
pub struct GroupStack {
    groups: Vec<Group>,
    unmatched_closes: usize,
}

impl GroupStack {
    #[must_use]
    pub fn new() -> Self {
        Self {
            groups: vec![Group::default()],
            unmatched_closes: 0,
        }
    }

    #[must_use]
    pub fn current(&self) -> &Group {
        // The root frame is never popped
        &self.groups[self.groups.len() - 1]
    }

    pub fn current_mut(&mut self) -> &mut Group {
        let top = self.groups.len() - 1;
        &mut self.groups[top]
    }

    /// Open a group inheriting a copy of the current one.
    pub fn push(&mut self) {
        let copy = self.current().clone();
        self.groups.push(copy);
    }

    /// Close the current group. Closing the root is a counted no-op.
    pub fn pop(&mut self) {
        if self.groups.len() > 1 {
            self.groups.pop();
        } else {
            self.unmatched_closes += 1;
        }
    }

    /// Number of frames, including the root.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.groups.len()
    }

    /// Number of `}` seen while only the root frame was open.
    #[must_use]
    pub fn unmatched_closes(&self) -> usize {
        self.unmatched_closes
    }
}

impl Default for GroupStack {
    fn default() -> Self {
        Self::new()
    }
}
