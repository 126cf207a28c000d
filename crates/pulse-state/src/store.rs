//! The view-state store.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use pulse_core::{ActivityRow, FilterState, Post, Run, SourceStat, Stats, TrendTopic};
use tokio::sync::broadcast;

/// Capacity of the change-notification channel. A lagging observer only
/// misses intermediate notifications, never the current state.
const CHANGE_CHANNEL_CAPACITY: usize = 64;

/// Which field of the store was just written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateChange {
    Filters,
    Posts,
    Stats,
    Trends,
    Sources,
    Runs,
    Activity,
    Connectivity,
    Loading,
    LastUpdated,
}

#[derive(Debug, Default)]
struct ViewState {
    filters: FilterState,
    posts: Vec<Post>,
    stats: Stats,
    trends: Vec<TrendTopic>,
    source_stats: Vec<SourceStat>,
    runs: Vec<Run>,
    activity: Vec<ActivityRow>,
    connected: bool,
    loading: bool,
    last_updated: Option<DateTime<Utc>>,
}

/// The single mutable view-state.
///
/// Setters replace the whole field and notify registered observers.
/// Changing the filters does not refetch; callers pair a filter change
/// with an orchestrated refresh.
pub struct StateStore {
    inner: RwLock<ViewState>,
    changes: broadcast::Sender<StateChange>,
}

impl StateStore {
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            inner: RwLock::new(ViewState::default()),
            changes,
        }
    }

    /// Subscribe to change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<StateChange> {
        self.changes.subscribe()
    }

    fn notify(&self, change: StateChange) {
        // No receivers is normal before the render loop starts.
        let _ = self.changes.send(change);
    }

    // --- filters ---

    pub fn filters(&self) -> FilterState {
        self.inner.read().filters.clone()
    }

    pub fn set_filters(&self, filters: FilterState) {
        self.inner.write().filters = filters;
        self.notify(StateChange::Filters);
    }

    // --- fetched collections ---

    pub fn posts(&self) -> Vec<Post> {
        self.inner.read().posts.clone()
    }

    pub fn set_posts(&self, posts: Vec<Post>) {
        self.inner.write().posts = posts;
        self.notify(StateChange::Posts);
    }

    pub fn stats(&self) -> Stats {
        self.inner.read().stats.clone()
    }

    pub fn set_stats(&self, stats: Stats) {
        self.inner.write().stats = stats;
        self.notify(StateChange::Stats);
    }

    pub fn trends(&self) -> Vec<TrendTopic> {
        self.inner.read().trends.clone()
    }

    pub fn set_trends(&self, trends: Vec<TrendTopic>) {
        self.inner.write().trends = trends;
        self.notify(StateChange::Trends);
    }

    pub fn source_stats(&self) -> Vec<SourceStat> {
        self.inner.read().source_stats.clone()
    }

    pub fn set_source_stats(&self, stats: Vec<SourceStat>) {
        self.inner.write().source_stats = stats;
        self.notify(StateChange::Sources);
    }

    pub fn runs(&self) -> Vec<Run> {
        self.inner.read().runs.clone()
    }

    pub fn set_runs(&self, runs: Vec<Run>) {
        self.inner.write().runs = runs;
        self.notify(StateChange::Runs);
    }

    pub fn activity(&self) -> Vec<ActivityRow> {
        self.inner.read().activity.clone()
    }

    pub fn set_activity(&self, rows: Vec<ActivityRow>) {
        self.inner.write().activity = rows;
        self.notify(StateChange::Activity);
    }

    // --- flags ---

    pub fn is_connected(&self) -> bool {
        self.inner.read().connected
    }

    pub fn set_connected(&self, connected: bool) {
        self.inner.write().connected = connected;
        self.notify(StateChange::Connectivity);
    }

    pub fn is_loading(&self) -> bool {
        self.inner.read().loading
    }

    pub fn set_loading(&self, loading: bool) {
        self.inner.write().loading = loading;
        self.notify(StateChange::Loading);
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.inner.read().last_updated
    }

    pub fn set_last_updated(&self, at: DateTime<Utc>) {
        self.inner.write().last_updated = Some(at);
        self.notify(StateChange::LastUpdated);
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.read();
        f.debug_struct("StateStore")
            .field("posts", &state.posts.len())
            .field("trends", &state.trends.len())
            .field("runs", &state.runs.len())
            .field("connected", &state.connected)
            .field("loading", &state.loading)
            .field("last_updated", &state.last_updated)
            .finish()
    }
}
