//! Per-(user, office) checklist completion state.
//!
//! [`PlanProgress`] is the pure mapping from checklist-item id to done flag;
//! [`ProgressStore`] is the persistence collaborator; [`ProgressTracker`]
//! ties the two together with the store's failure semantics: writes are
//! best-effort, failures are logged and never surfaced, the in-memory state
//! always reflects the latest toggle.

use std::collections::BTreeMap;
use std::collections::btree_map::Iter;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::plan::CampaignPlan;

// ---------------------------------------------------------------------------
// PlanProgress
// ---------------------------------------------------------------------------

/// Completion flags for one user's checklist on one office.
///
/// An absent key means "not done", and equality honors that: a map with no
/// entry for `"bank"` equals one with `"bank" => false`. That keeps toggle
/// pairs involutive (`toggle(toggle(s, id), id) == s`) for every state,
/// including states loaded from payloads that stored explicit `false`s.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanProgress(BTreeMap<String, bool>);

impl PlanProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an item is checked off. Absent keys read as false.
    pub fn is_done(&self, item_id: &str) -> bool {
        self.0.get(item_id).copied().unwrap_or(false)
    }

    /// Pure toggle: a new state with `item_id`'s flag flipped. The first
    /// toggle of an unseen id sets it to true.
    #[must_use]
    pub fn toggle(&self, item_id: &str) -> Self {
        let mut next = self.0.clone();
        let flipped = !self.is_done(item_id);
        next.insert(item_id.to_owned(), flipped);
        Self(next)
    }

    /// Raw entries, for hosts that render the map directly.
    pub fn iter(&self) -> Iter<'_, String, bool> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(|v| !v)
    }
}

impl PartialEq for PlanProgress {
    fn eq(&self, other: &Self) -> bool {
        self.0
            .keys()
            .chain(other.0.keys())
            .all(|k| self.is_done(k) == other.is_done(k))
    }
}

impl Eq for PlanProgress {}

impl FromIterator<(String, bool)> for PlanProgress {
    fn from_iter<I: IntoIterator<Item = (String, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// ---------------------------------------------------------------------------
// Derived statistics
// ---------------------------------------------------------------------------

/// Completion counts derived from a plan and a progress state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlanStats {
    pub completed: usize,
    pub total: usize,
    /// Rounded percentage; 0 when the plan has no items.
    pub percentage: u32,
}

/// Recompute statistics from the current toggle state.
///
/// `total` counts every item across the seven sections; `completed` counts
/// the items whose id maps to true. Where a plan reuses an id across
/// sections, one flag covers all items carrying it, matching the production
/// templates' behavior.
pub fn compute_stats(plan: &CampaignPlan, progress: &PlanProgress) -> PlanStats {
    let total = plan.len();
    let completed = plan.items().filter(|i| progress.is_done(&i.id)).count();
    let percentage = if total == 0 {
        0
    } else {
        (100.0 * completed as f64 / total as f64).round() as u32
    };
    PlanStats {
        completed,
        total,
        percentage,
    }
}

// ---------------------------------------------------------------------------
// Persistence collaborator
// ---------------------------------------------------------------------------

/// Persistence collaborator for progress state, keyed by (user, office).
///
/// Object-safe so hosts hold `Arc<dyn ProgressStore>`; the PostgreSQL
/// implementation lives in `d2r-db`. `put` is an upsert and the store's own
/// write arbitration serializes concurrent saves for one key (last write
/// wins).
#[async_trait]
pub trait ProgressStore: Send + Sync {
    /// Saved state for the pair, or `None` when no record exists.
    async fn get(&self, user_id: Uuid, office_id: Uuid) -> Result<Option<PlanProgress>>;

    /// Upsert the full state for the pair.
    async fn put(&self, user_id: Uuid, office_id: Uuid, state: &PlanProgress) -> Result<()>;
}

// ---------------------------------------------------------------------------
// Tracker service
// ---------------------------------------------------------------------------

/// Progress service with the core's failure semantics baked in.
///
/// Each (user, office) mapping is logically private to that user, so there
/// is no cross-user coordination here; concurrent saves for one key are
/// left to the store's upsert arbitration.
#[derive(Clone)]
pub struct ProgressTracker {
    store: Arc<dyn ProgressStore>,
}

impl ProgressTracker {
    pub fn new(store: Arc<dyn ProgressStore>) -> Self {
        Self { store }
    }

    /// Load saved progress for a user/office pair.
    ///
    /// `Ok(None)` when there is no authenticated user or no saved record;
    /// callers render that identically to an all-false mapping. Store
    /// errors do propagate here: a failed load is distinguishable from an
    /// absent record, and the host decides how to present it.
    pub async fn load(&self, user: Option<Uuid>, office_id: Uuid) -> Result<Option<PlanProgress>> {
        match user {
            Some(user_id) => self.store.get(user_id, office_id).await,
            None => Ok(None),
        }
    }

    /// Toggle one item and fire off a background save.
    ///
    /// The returned state is authoritative for the caller immediately; the
    /// write is optimistic and a persistence failure is logged, not
    /// surfaced, and never rolls the toggle back. Without a user the save
    /// is a no-op (UI shells prompt for sign-in instead).
    pub fn toggle(
        &self,
        user: Option<Uuid>,
        office_id: Uuid,
        current: &PlanProgress,
        item_id: &str,
    ) -> PlanProgress {
        let next = current.toggle(item_id);

        if let Some(user_id) = user {
            let store = Arc::clone(&self.store);
            let snapshot = next.clone();
            tokio::spawn(async move {
                if let Err(err) = store.put(user_id, office_id, &snapshot).await {
                    warn!(%user_id, %office_id, error = %format!("{err:#}"), "progress save failed");
                }
            });
        }

        next
    }

    /// Awaited best-effort save, for single-shot hosts (the CLI) that would
    /// otherwise exit before a spawned write lands. Same semantics: failures
    /// are logged and swallowed, no user means no-op.
    pub async fn save(&self, user: Option<Uuid>, office_id: Uuid, state: &PlanProgress) {
        let Some(user_id) = user else { return };
        if let Err(err) = self.store.put(user_id, office_id, state).await {
            warn!(%user_id, %office_id, error = %format!("{err:#}"), "progress save failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::office::Office;
    use crate::plan::build_plan;
    use anyhow::bail;
    use std::sync::Mutex;

    #[test]
    fn first_toggle_sets_true() {
        let state = PlanProgress::default();
        assert!(!state.is_done("research"));
        let next = state.toggle("research");
        assert!(next.is_done("research"));
    }

    #[test]
    fn toggle_pairs_are_involutive() {
        let states = [
            PlanProgress::default(),
            [("bank".to_owned(), true)].into_iter().collect(),
            [("bank".to_owned(), false), ("org".to_owned(), true)]
                .into_iter()
                .collect(),
        ];
        for state in states {
            for id in ["bank", "org", "unseen"] {
                assert_eq!(state.toggle(id).toggle(id), state, "id {id:?}");
            }
        }
    }

    #[test]
    fn equality_treats_absent_as_false() {
        let explicit: PlanProgress = [("bank".to_owned(), false)].into_iter().collect();
        assert_eq!(explicit, PlanProgress::default());

        let one_true: PlanProgress = [("bank".to_owned(), true)].into_iter().collect();
        assert_ne!(one_true, PlanProgress::default());
    }

    #[test]
    fn serializes_as_plain_map() {
        let state = PlanProgress::default().toggle("research").toggle("bank").toggle("bank");
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, r#"{"bank":false,"research":true}"#);
        let back: PlanProgress = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn stats_on_empty_progress() {
        let plan = build_plan(&Office::default());
        let stats = compute_stats(&plan, &PlanProgress::default());
        assert_eq!(
            stats,
            PlanStats {
                completed: 0,
                total: 14,
                percentage: 0
            }
        );
    }

    #[test]
    fn stats_on_empty_plan_are_zero() {
        let stats = compute_stats(&CampaignPlan::default(), &PlanProgress::default());
        assert_eq!(stats.total, 0);
        assert_eq!(stats.percentage, 0);
    }

    #[test]
    fn stats_round_percentage() {
        let plan = build_plan(&Office::default());
        // 5 of 14 = 35.7 -> 36.
        let mut state = PlanProgress::default();
        for id in ["research", "eligibility", "bank", "deadline", "org"] {
            state = state.toggle(id);
        }
        let stats = compute_stats(&plan, &state);
        assert_eq!(stats.completed, 5);
        assert_eq!(stats.percentage, 36);
    }

    // -- tracker ----------------------------------------------------------

    /// In-memory store; `fail_puts` simulates a backend outage.
    #[derive(Default)]
    struct MemoryStore {
        records: Mutex<BTreeMap<(Uuid, Uuid), PlanProgress>>,
        fail_puts: bool,
    }

    #[async_trait]
    impl ProgressStore for MemoryStore {
        async fn get(&self, user_id: Uuid, office_id: Uuid) -> Result<Option<PlanProgress>> {
            Ok(self
                .records
                .lock()
                .unwrap()
                .get(&(user_id, office_id))
                .cloned())
        }

        async fn put(&self, user_id: Uuid, office_id: Uuid, state: &PlanProgress) -> Result<()> {
            if self.fail_puts {
                bail!("backend rejected write");
            }
            self.records
                .lock()
                .unwrap()
                .insert((user_id, office_id), state.clone());
            Ok(())
        }
    }

    #[tokio::test]
    async fn load_without_user_is_absent() {
        let tracker = ProgressTracker::new(Arc::new(MemoryStore::default()));
        let got = tracker.load(None, Uuid::new_v4()).await.unwrap();
        assert_eq!(got, None);
    }

    #[tokio::test]
    async fn load_absent_record_is_none_not_empty_map() {
        let tracker = ProgressTracker::new(Arc::new(MemoryStore::default()));
        let got = tracker.load(Some(Uuid::new_v4()), Uuid::new_v4()).await.unwrap();
        assert!(got.is_none());
    }

    #[tokio::test]
    async fn save_then_load_roundtrips() {
        let tracker = ProgressTracker::new(Arc::new(MemoryStore::default()));
        let user = Some(Uuid::new_v4());
        let office = Uuid::new_v4();

        let state = PlanProgress::default().toggle("research");
        tracker.save(user, office, &state).await;

        let loaded = tracker.load(user, office).await.unwrap();
        assert_eq!(loaded, Some(state));
    }

    #[tokio::test]
    async fn toggle_without_user_skips_persistence() {
        let store = Arc::new(MemoryStore::default());
        let tracker = ProgressTracker::new(store.clone());
        let office = Uuid::new_v4();

        let next = tracker.toggle(None, office, &PlanProgress::default(), "bank");
        assert!(next.is_done("bank"));
        assert!(store.records.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn persist_failure_keeps_local_state() {
        let store = Arc::new(MemoryStore {
            fail_puts: true,
            ..MemoryStore::default()
        });
        let tracker = ProgressTracker::new(store);
        let user = Some(Uuid::new_v4());
        let office = Uuid::new_v4();

        let state = PlanProgress::default().toggle("bank");
        // The failed write must not surface or roll anything back.
        tracker.save(user, office, &state).await;
        assert!(state.is_done("bank"));

        let next = tracker.toggle(user, office, &state, "org");
        assert!(next.is_done("org"));
        assert!(next.is_done("bank"));
    }

    #[tokio::test]
    async fn background_toggle_write_lands() {
        let store = Arc::new(MemoryStore::default());
        let tracker = ProgressTracker::new(store.clone());
        let user = Uuid::new_v4();
        let office = Uuid::new_v4();

        let next = tracker.toggle(Some(user), office, &PlanProgress::default(), "research");
        assert!(next.is_done("research"));

        // The write is fire-and-forget; yield until it lands.
        for _ in 0..100 {
            if !store.records.lock().unwrap().is_empty() {
                break;
            }
            tokio::task::yield_now().await;
        }
        let saved = store.records.lock().unwrap().get(&(user, office)).cloned();
        assert_eq!(saved, Some(next));
    }
}
