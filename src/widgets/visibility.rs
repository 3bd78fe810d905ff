//! Timeline entrance tracking.
//!
//! The host samples each timeline entry against the viewport (an
//! `IntersectionObserver` in the browser) and feeds the samples here. The
//! tracker keeps the set of entries judged visible, which drives the
//! entrance/exit animation classes and nothing else.
//!
//! Entering and leaving use separate cutoffs. With the defaults an entry
//! appears once more than 10% of it intersects and disappears only when it
//! drops below 5% (or stops intersecting), so an entry sitting right at the
//! edge does not flicker. Setting both ratios equal gives a single symmetric
//! cutoff.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Visibility tuning, loaded from the `[timeline]` section of `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VisibilitySettings {
    /// An intersecting entry becomes visible above this ratio.
    pub enter_ratio: f64,
    /// A visible entry is hidden again below this ratio.
    pub exit_ratio: f64,
    /// Ratios at which the observer reports samples.
    pub thresholds: Vec<f64>,
    /// Observer root margin (CSS margin syntax).
    pub root_margin: String,
    /// Start with every entry visible so nothing is blank on first paint.
    pub start_visible: bool,
    /// Delay before observation starts, letting layout settle.
    pub observe_delay_ms: u32,
}

impl Default for VisibilitySettings {
    fn default() -> Self {
        Self {
            enter_ratio: 0.1,
            exit_ratio: 0.05,
            thresholds: vec![0.0, 0.05, 0.1, 0.5],
            root_margin: "50px 0px -50px 0px".to_string(),
            start_visible: true,
            observe_delay_ms: 100,
        }
    }
}

/// One intersection observation of one entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionSample {
    pub index: usize,
    pub is_intersecting: bool,
    pub ratio: f64,
}

/// A change in an entry's visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Entered(usize),
    Exited(usize),
}

#[derive(Debug, Clone)]
pub struct VisibilityTracker {
    len: usize,
    enter_ratio: f64,
    exit_ratio: f64,
    visible: BTreeSet<usize>,
}

impl VisibilityTracker {
    /// Track `len` entries.
    pub fn new(len: usize, settings: &VisibilitySettings) -> Self {
        let visible = if settings.start_visible {
            (0..len).collect()
        } else {
            BTreeSet::new()
        };
        Self {
            len,
            enter_ratio: settings.enter_ratio,
            exit_ratio: settings.exit_ratio,
            visible,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_visible(&self, index: usize) -> bool {
        self.visible.contains(&index)
    }

    /// Visible entries in ascending order.
    pub fn visible(&self) -> impl Iterator<Item = usize> + '_ {
        self.visible.iter().copied()
    }

    /// Apply one sample. Returns the transition it caused, if any.
    pub fn observe(&mut self, sample: IntersectionSample) -> Option<Transition> {
        if sample.index >= self.len {
            return None;
        }
        let entering = sample.is_intersecting && sample.ratio > self.enter_ratio;
        let exiting = !sample.is_intersecting || sample.ratio < self.exit_ratio;

        if entering {
            self.visible
                .insert(sample.index)
                .then_some(Transition::Entered(sample.index))
        } else if exiting {
            self.visible
                .remove(&sample.index)
                .then_some(Transition::Exited(sample.index))
        } else {
            None
        }
    }
}
