use std::collections::HashMap;

use kwatch_webclient::{Submission, SubmissionRef, SubmissionStatus};
use serde::Deserialize;

/// What to do with a submission that is absent from the cache.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, strum::Display, Deserialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum FirstSeenPolicy {
    /// Record silently. Only transitions between two observed statuses notify.
    #[default]
    Silent,

    /// The first successful fetch is a silent baseline;
    /// submissions appearing afterwards notify.
    AfterBaseline,

    /// Notify unless the submission is already complete.
    Unfinished,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusChange {
    pub submission: Submission,
    /// `None` if the submission was not in the cache.
    pub previous: Option<SubmissionStatus>,
}

impl StatusChange {
    pub fn current(&self) -> &SubmissionStatus {
        &self.submission.status
    }
}

/// Last observed status per submission, for the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct StatusTracker {
    policy: FirstSeenPolicy,
    statuses: HashMap<SubmissionRef, SubmissionStatus>,
    has_baseline: bool,
}

impl StatusTracker {
    pub fn new(policy: FirstSeenPolicy) -> Self {
        Self {
            policy,
            statuses: HashMap::new(),
            has_baseline: false,
        }
    }

    pub fn status_of(&self, id: &SubmissionRef) -> Option<&SubmissionStatus> {
        self.statuses.get(id)
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    /// Whether a complete snapshot has been observed at least once.
    pub fn has_baseline(&self) -> bool {
        self.has_baseline
    }

    /// Diffs a complete snapshot against the cache, then overwrites the cache with it.
    ///
    /// Must only be called with the result of a successful fetch.
    /// Entries missing from `snapshot` are kept as they are.
    /// If an identifier appears more than once, the last record wins.
    pub fn observe(&mut self, snapshot: &[Submission]) -> Vec<StatusChange> {
        let mut latest: HashMap<SubmissionRef, &Submission> =
            HashMap::with_capacity(snapshot.len());
        let mut order = Vec::with_capacity(snapshot.len());
        for sub in snapshot {
            if latest.insert(sub.id, sub).is_none() {
                order.push(sub.id);
            }
        }

        let mut changes = Vec::new();
        for id in order {
            let sub = latest[&id];
            let previous = self.statuses.get(&id);
            let notify = match previous {
                Some(prev) => *prev != sub.status,
                None => self.should_notify_first_seen(&sub.status),
            };
            if notify {
                changes.push(StatusChange {
                    submission: sub.clone(),
                    previous: previous.cloned(),
                });
            }
        }

        for (id, sub) in latest {
            self.statuses.insert(id, sub.status.clone());
        }
        self.has_baseline = true;
        changes
    }

    fn should_notify_first_seen(&self, status: &SubmissionStatus) -> bool {
        use FirstSeenPolicy::*;
        match self.policy {
            Silent => false,
            AfterBaseline => self.has_baseline,
            Unfinished => *status != SubmissionStatus::Complete,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use SubmissionStatus::*;

    fn sub(id: u64, status: SubmissionStatus) -> Submission {
        Submission::new(id, status)
    }

    fn ids(changes: &[StatusChange]) -> Vec<u64> {
        changes.iter().map(|c| c.submission.id.0).collect()
    }

    #[test]
    fn silent_policy_baselines_everything_new() {
        let mut t = StatusTracker::new(FirstSeenPolicy::Silent);
        assert!(t.observe(&[sub(1, Pending), sub(2, Complete)]).is_empty());
        assert!(t.has_baseline());
        assert_eq!(t.len(), 2);

        // newly seen after the first pass: still silent
        assert!(t.observe(&[sub(1, Pending), sub(3, Pending)]).is_empty());
        assert_eq!(t.status_of(&SubmissionRef(3)), Some(&Pending));
    }

    #[test]
    fn transition_notifies_once() {
        let mut t = StatusTracker::new(FirstSeenPolicy::Silent);
        t.observe(&[sub(1, Pending)]);

        let changes = t.observe(&[sub(1, Complete), sub(2, Pending)]);
        assert_eq!(ids(&changes), vec![1]);
        assert_eq!(changes[0].previous, Some(Pending));
        assert_eq!(changes[0].current(), &Complete);

        assert!(t.observe(&[sub(1, Complete), sub(2, Pending)]).is_empty());
    }

    #[test]
    fn after_baseline_policy_notifies_later_arrivals() {
        let mut t = StatusTracker::new(FirstSeenPolicy::AfterBaseline);
        assert!(t.observe(&[sub(1, Pending)]).is_empty());

        let changes = t.observe(&[sub(1, Pending), sub(2, Pending)]);
        assert_eq!(ids(&changes), vec![2]);
        assert_eq!(changes[0].previous, None);
    }

    #[test]
    fn after_baseline_policy_treats_empty_first_snapshot_as_baseline() {
        let mut t = StatusTracker::new(FirstSeenPolicy::AfterBaseline);
        assert!(t.observe(&[]).is_empty());
        assert_eq!(ids(&t.observe(&[sub(7, Complete)])), vec![7]);
    }

    #[test]
    fn unfinished_policy_skips_already_complete() {
        let mut t = StatusTracker::new(FirstSeenPolicy::Unfinished);
        let changes = t.observe(&[sub(1, Pending), sub(2, Complete), sub(3, Error)]);
        assert_eq!(ids(&changes), vec![1, 3]);
    }

    #[test]
    fn score_only_change_does_not_notify() {
        let mut t = StatusTracker::new(FirstSeenPolicy::Silent);
        t.observe(&[sub(1, Complete).with_scores(Some(0.8), None)]);
        let changes = t.observe(&[sub(1, Complete).with_scores(Some(0.8), Some(0.79))]);
        assert!(changes.is_empty());
    }

    #[test]
    fn vanished_entries_are_kept() {
        let mut t = StatusTracker::new(FirstSeenPolicy::Silent);
        t.observe(&[sub(1, Pending), sub(2, Pending)]);
        t.observe(&[sub(2, Running)]);
        assert_eq!(t.status_of(&SubmissionRef(1)), Some(&Pending));

        // reappearing with another status is a transition from the cached one
        let changes = t.observe(&[sub(1, Complete), sub(2, Running)]);
        assert_eq!(ids(&changes), vec![1]);
        assert_eq!(changes[0].previous, Some(Pending));
    }

    #[test]
    fn duplicated_ref_in_snapshot_uses_last_record() {
        let mut t = StatusTracker::new(FirstSeenPolicy::Silent);
        t.observe(&[sub(1, Pending)]);
        let changes = t.observe(&[sub(1, Pending), sub(1, Complete)]);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].current(), &Complete);
        assert_eq!(t.status_of(&SubmissionRef(1)), Some(&Complete));
    }

    #[test]
    fn other_status_transitions_are_detected() {
        let mut t = StatusTracker::new(FirstSeenPolicy::Silent);
        t.observe(&[sub(1, Complete)]);
        let changes = t.observe(&[sub(1, Other("rescoring".into()))]);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].previous, Some(Complete));
    }
}
