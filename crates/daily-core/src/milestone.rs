//! Threshold selection shared by every presentation surface.
//!
//! Themes, progress glyphs and ETA text all read the same ordered list of
//! `(minutes, payload)` entries through these functions, so a tier change
//! happens at the same minute everywhere.

/// Built-in tiers as `(minutes, name)`.
pub const DEFAULT_TIERS: [(i64, &str); 5] = [
    (0, "base"),
    (240, "deep-blue"),
    (360, "night-mode"),
    (480, "deep-amber"),
    (600, "alert-red"),
];

/// One threshold and what it unlocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Milestone<T> {
    pub minutes: i64,
    pub payload: T,
}

/// What the next milestone is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextTarget<'a, T> {
    Threshold(&'a Milestone<T>),
    /// The daily goal arrives before any remaining threshold.
    Goal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextMilestone<'a, T> {
    pub minutes: i64,
    pub target: NextTarget<'a, T>,
}

impl<T> NextMilestone<'_, T> {
    /// Minutes of work left until this milestone.
    pub const fn remaining(&self, work_minutes: i64) -> i64 {
        self.minutes - work_minutes
    }
}

/// An ascending list of milestones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Milestones<T> {
    entries: Vec<Milestone<T>>,
}

impl<T> Milestones<T> {
    /// Builds the list, ordering entries by threshold.
    ///
    /// Entries sharing a threshold keep their relative order.
    pub fn new(mut entries: Vec<Milestone<T>>) -> Self {
        entries.sort_by_key(|m| m.minutes);
        Self { entries }
    }

    pub fn entries(&self) -> &[Milestone<T>] {
        &self.entries
    }

    /// The greatest threshold at or below `work_minutes`.
    ///
    /// When several entries share that threshold the last one wins.
    pub fn current(&self, work_minutes: i64) -> Option<&Milestone<T>> {
        self.entries
            .iter()
            .take_while(|m| m.minutes <= work_minutes)
            .last()
    }

    /// The smallest threshold above `work_minutes`, or the goal if it comes
    /// first.
    ///
    /// A goal equal to a threshold resolves to the threshold.
    pub fn next(&self, work_minutes: i64, goal_minutes: i64) -> Option<NextMilestone<'_, T>> {
        let threshold = self.entries.iter().find(|m| m.minutes > work_minutes);
        let goal_pending = goal_minutes > work_minutes;
        match threshold {
            Some(m) if goal_pending && goal_minutes < m.minutes => Some(NextMilestone {
                minutes: goal_minutes,
                target: NextTarget::Goal,
            }),
            Some(m) => Some(NextMilestone {
                minutes: m.minutes,
                target: NextTarget::Threshold(m),
            }),
            None if goal_pending => Some(NextMilestone {
                minutes: goal_minutes,
                target: NextTarget::Goal,
            }),
            None => None,
        }
    }

    /// Thresholds reached while work grew from `previous` to `current`.
    pub fn crossed(
        &self,
        previous: i64,
        current: i64,
    ) -> impl Iterator<Item = &Milestone<T>> + '_ {
        self.entries
            .iter()
            .filter(move |m| m.minutes > previous && m.minutes <= current)
    }
}

impl Default for Milestones<String> {
    fn default() -> Self {
        Self::new(
            DEFAULT_TIERS
                .iter()
                .map(|(minutes, name)| Milestone {
                    minutes: *minutes,
                    payload: (*name).to_string(),
                })
                .collect(),
        )
    }
}
