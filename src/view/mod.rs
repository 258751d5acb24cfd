//! View state for the story list.
//!
//! [`StoriesView`] is everything the presentation layer needs short of
//! drawing: the persisted search term, the working collection, the load
//! state and a one-shot focus hint. Every change is published as a
//! [`ViewEvent`] on a broadcast channel so renderers can subscribe instead
//! of polling.
//!
//! # Loading
//!
//! A view runs at most one load at a time. [`StoriesView::begin_load`]
//! spawns the delayed load on the tokio runtime and hands back a
//! [`PendingLoad`]; the owner awaits it and passes the outcome to
//! [`StoriesView::complete_load`]. [`StoriesView::dispose`] (or dropping
//! the view) cancels the in-flight load, and a result that arrives after
//! disposal is discarded. Each outcome carries the id of the load that
//! produced it, so only the load currently in flight can fill the
//! collection.

use serde::Serialize;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::storage::{KeyValueStore, PersistentCell, StoreError};
use crate::stories::{self, LoadError, Story, StoryRepository};

const EVENT_CAPACITY: usize = 64;

/// Progress of the story load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "lowercase")]
pub enum LoadState {
    /// Nothing has been requested yet.
    Idle,
    /// A load is in flight; the collection is still empty.
    Loading,
    /// The collection holds the loaded stories.
    Loaded,
    /// The load failed; the collection is empty.
    Failed(String),
}

/// A change notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    /// The search term changed.
    QueryChanged(String),
    /// The working collection changed (load or dismissal).
    StoriesChanged,
    /// The load state changed.
    LoadStateChanged(LoadState),
    /// The view was disposed; no further events follow.
    Disposed,
}

/// Errors from view operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewError {
    /// The view has been disposed.
    #[error("View has been disposed")]
    Disposed,

    /// A load is already in flight.
    #[error("A story load is already in progress")]
    LoadInProgress,
}

/// Serializable picture of what should be on screen.
#[derive(Debug, Clone, Serialize)]
pub struct ViewSnapshot {
    pub query: String,
    pub load_state: LoadState,
    pub stories: Vec<Story>,
}

/// Handle to a load started by [`StoriesView::begin_load`].
#[derive(Debug)]
pub struct PendingLoad {
    generation: u64,
    handle: JoinHandle<Result<Vec<Story>, LoadError>>,
}

impl PendingLoad {
    /// Waits for the load to resolve.
    pub async fn wait(self) -> LoadOutcome {
        let result = match self.handle.await {
            Ok(result) => result,
            Err(e) => Err(LoadError::Task(e.to_string())),
        };
        LoadOutcome {
            generation: self.generation,
            result,
        }
    }
}

/// A resolved load, tagged with the load it belongs to.
#[derive(Debug)]
pub struct LoadOutcome {
    generation: u64,
    pub result: Result<Vec<Story>, LoadError>,
}

/// State behind the story list screen.
pub struct StoriesView<S> {
    search: PersistentCell<S>,
    stories: Vec<Story>,
    load_state: LoadState,
    focus_requested: bool,
    // Incremented by every begin_load; outcomes from other loads are stale.
    generation: u64,
    events: broadcast::Sender<ViewEvent>,
    // None once disposed.
    shutdown_tx: Option<broadcast::Sender<()>>,
}

impl<S: KeyValueStore> StoriesView<S> {
    /// Creates a view with an empty collection.
    ///
    /// `focus_requested` is handed out once through
    /// [`Self::take_focus_request`].
    pub fn new(search: PersistentCell<S>, focus_requested: bool) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let (shutdown_tx, _) = broadcast::channel(1);

        Self {
            search,
            stories: Vec::new(),
            load_state: LoadState::Idle,
            focus_requested,
            generation: 0,
            events,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Subscribes to change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<ViewEvent> {
        self.events.subscribe()
    }

    /// Current search term.
    pub fn current_query(&self) -> &str {
        self.search.get()
    }

    /// The search cell, for inspecting store failures.
    pub fn search(&self) -> &PersistentCell<S> {
        &self.search
    }

    /// The full working collection, before filtering.
    pub fn stories(&self) -> &[Story] {
        &self.stories
    }

    /// Stories matching the current search term.
    pub fn visible_stories(&self) -> Vec<&Story> {
        stories::filter(&self.stories, self.search.get())
    }

    /// Current load state.
    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    /// Whether [`Self::dispose`] has run.
    pub fn is_disposed(&self) -> bool {
        self.shutdown_tx.is_none()
    }

    /// Returns the focus hint the first time it is called, `false` after.
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_requested)
    }

    /// Applies a new search term and persists it.
    ///
    /// The term and the notification take effect even if the write fails;
    /// the write failure is returned so the caller can warn about it.
    pub fn on_query_change(&mut self, query: impl Into<String>) -> Result<(), StoreError> {
        let result = self.search.set(query);
        tracing::debug!("Search term is now {:?}", self.search.get());
        self.notify(ViewEvent::QueryChanged(self.search.get().to_string()));
        result
    }

    /// Removes every story with `object_id`. Returns how many were removed.
    ///
    /// Unknown ids are a no-op and emit nothing.
    pub fn on_dismiss(&mut self, object_id: u64) -> usize {
        let removed = stories::dismiss_in_place(&mut self.stories, object_id);
        if removed > 0 {
            tracing::debug!("Dismissed story {}", object_id);
            self.notify(ViewEvent::StoriesChanged);
        }
        removed
    }

    /// Installs a collection directly, for the synchronous repository.
    ///
    /// Rejected while a load is in flight.
    pub fn set_stories(&mut self, stories: Vec<Story>) -> Result<(), ViewError> {
        if self.is_disposed() {
            return Err(ViewError::Disposed);
        }
        if self.load_state == LoadState::Loading {
            return Err(ViewError::LoadInProgress);
        }
        self.stories = stories;
        self.notify(ViewEvent::StoriesChanged);
        self.set_load_state(LoadState::Loaded);
        Ok(())
    }

    /// Starts a delayed load on the current tokio runtime.
    ///
    /// The collection is cleared and the view enters
    /// [`LoadState::Loading`] until [`Self::complete_load`] runs.
    pub fn begin_load(&mut self, repository: StoryRepository) -> Result<PendingLoad, ViewError> {
        let shutdown_rx = match &self.shutdown_tx {
            Some(tx) => tx.subscribe(),
            None => return Err(ViewError::Disposed),
        };
        if self.load_state == LoadState::Loading {
            return Err(ViewError::LoadInProgress);
        }

        if !self.stories.is_empty() {
            self.stories.clear();
            self.notify(ViewEvent::StoriesChanged);
        }
        self.set_load_state(LoadState::Loading);

        self.generation += 1;
        let handle = tokio::spawn(async move { repository.load_delayed(shutdown_rx).await });
        Ok(PendingLoad {
            generation: self.generation,
            handle,
        })
    }

    /// Applies the outcome of a load.
    ///
    /// Returns false if the outcome was discarded because the view was
    /// disposed, the load was cancelled, or the outcome is not from the
    /// load currently in flight.
    pub fn complete_load(&mut self, outcome: LoadOutcome) -> bool {
        if self.is_disposed() {
            tracing::debug!("Discarding story load result for disposed view");
            return false;
        }
        if self.load_state != LoadState::Loading || outcome.generation != self.generation {
            tracing::debug!("Discarding stale story load result");
            return false;
        }

        match outcome.result {
            Ok(stories) => {
                self.stories = stories;
                self.notify(ViewEvent::StoriesChanged);
                self.set_load_state(LoadState::Loaded);
                true
            }
            Err(LoadError::Cancelled) => {
                self.set_load_state(LoadState::Idle);
                false
            }
            Err(e) => {
                tracing::warn!("Story load failed: {}", e);
                self.stories.clear();
                self.set_load_state(LoadState::Failed(e.to_string()));
                true
            }
        }
    }

    /// Starts a load and waits for it, applying the outcome.
    pub async fn load(&mut self, repository: StoryRepository) -> Result<bool, ViewError> {
        let pending = self.begin_load(repository)?;
        let outcome = pending.wait().await;
        Ok(self.complete_load(outcome))
    }

    /// Cancels any in-flight load and stops accepting load results.
    pub fn dispose(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            if self.load_state == LoadState::Loading {
                self.set_load_state(LoadState::Idle);
            }
            self.notify(ViewEvent::Disposed);
        }
    }

    /// What a renderer should draw right now.
    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            query: self.current_query().to_string(),
            load_state: self.load_state.clone(),
            stories: self.visible_stories().into_iter().cloned().collect(),
        }
    }

    fn set_load_state(&mut self, state: LoadState) {
        if self.load_state != state {
            self.load_state = state.clone();
            self.notify(ViewEvent::LoadStateChanged(state));
        }
    }

    fn notify(&self, event: ViewEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, SEARCH_KEY};
    use crate::stories::seed_stories;
    use std::time::Duration;

    fn view_over<'a>(store: &'a MemoryStore, default: &str) -> StoriesView<&'a MemoryStore> {
        StoriesView::new(PersistentCell::create(store, SEARCH_KEY, default), true)
    }

    fn drain(rx: &mut broadcast::Receiver<ViewEvent>) -> Vec<ViewEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[test]
    fn test_query_change_filters_and_persists() {
        let store = MemoryStore::new();
        let mut view = view_over(&store, "React");
        view.set_stories(seed_stories()).unwrap();

        assert_eq!(view.visible_stories().len(), 1);
        assert_eq!(view.visible_stories()[0].title, "React");

        view.on_query_change("Redux").expect("write should succeed");
        assert_eq!(view.current_query(), "Redux");
        assert_eq!(view.visible_stories()[0].title, "Redux");
        assert_eq!(store.get(SEARCH_KEY).unwrap().as_deref(), Some("Redux"));
    }

    #[test]
    fn test_dismiss_scenario() {
        let store = MemoryStore::new();
        let mut view = view_over(&store, "Redux");
        view.set_stories(seed_stories()).unwrap();

        assert_eq!(view.visible_stories().len(), 1);
        assert_eq!(view.on_dismiss(1), 1);
        assert!(view.visible_stories().is_empty());

        // Dismissing again, or an unknown id, changes nothing.
        assert_eq!(view.on_dismiss(1), 0);
        assert_eq!(view.on_dismiss(99), 0);
        assert_eq!(view.stories().len(), 1);

        view.on_dismiss(0);
        view.on_query_change("").unwrap();
        assert!(view.visible_stories().is_empty());
    }

    #[test]
    fn test_focus_request_is_one_shot() {
        let store = MemoryStore::new();
        let mut view = view_over(&store, "");

        assert!(view.take_focus_request());
        assert!(!view.take_focus_request());

        let mut unfocused = StoriesView::new(PersistentCell::create(&store, SEARCH_KEY, ""), false);
        assert!(!unfocused.take_focus_request());
    }

    #[test]
    fn test_events_are_published() {
        let store = MemoryStore::new();
        let mut view = view_over(&store, "");
        let mut rx = view.subscribe();

        view.set_stories(seed_stories()).unwrap();
        view.on_query_change("re").unwrap();
        view.on_dismiss(0);
        view.on_dismiss(0);

        assert_eq!(
            drain(&mut rx),
            vec![
                ViewEvent::StoriesChanged,
                ViewEvent::LoadStateChanged(LoadState::Loaded),
                ViewEvent::QueryChanged("re".to_string()),
                ViewEvent::StoriesChanged,
            ]
        );
    }

    #[test]
    fn test_set_stories_after_dispose_rejected() {
        let store = MemoryStore::new();
        let mut view = view_over(&store, "");
        view.dispose();

        assert!(view.is_disposed());
        assert_eq!(view.set_stories(seed_stories()), Err(ViewError::Disposed));
    }

    #[test]
    fn test_snapshot_serializes() {
        let store = MemoryStore::new();
        let mut view = view_over(&store, "redux");
        view.set_stories(seed_stories()).unwrap();

        let json = serde_json::to_value(view.snapshot()).expect("serialize snapshot");
        assert_eq!(json["query"], "redux");
        assert_eq!(json["load_state"]["state"], "loaded");
        assert_eq!(json["stories"][0]["objectID"], 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delayed_load_empty_until_resolved() {
        let store = MemoryStore::new();
        let mut view = view_over(&store, "");
        let repo = StoryRepository::seeded().with_delay(Duration::from_secs(2));

        let pending = view.begin_load(repo).expect("load should start");
        assert_eq!(view.load_state(), &LoadState::Loading);
        assert!(view.visible_stories().is_empty());

        let outcome = pending.wait().await;
        assert!(view.complete_load(outcome));

        assert_eq!(view.load_state(), &LoadState::Loaded);
        let visible: Vec<Story> = view.visible_stories().into_iter().cloned().collect();
        assert_eq!(visible, seed_stories());
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_load_while_loading_rejected() {
        let store = MemoryStore::new();
        let mut view = view_over(&store, "");
        let repo = StoryRepository::seeded().with_delay(Duration::from_secs(2));

        let _pending = view.begin_load(repo.clone()).unwrap();
        assert_eq!(
            view.begin_load(repo).unwrap_err(),
            ViewError::LoadInProgress
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_dispose_cancels_in_flight_load() {
        let store = MemoryStore::new();
        let mut view = view_over(&store, "");
        let repo = StoryRepository::seeded().with_delay(Duration::from_secs(60));

        let mut rx = view.subscribe();
        let pending = view.begin_load(repo).unwrap();
        view.dispose();

        let outcome = pending.wait().await;
        assert!(matches!(outcome.result, Err(LoadError::Cancelled)));
        assert!(!view.complete_load(outcome));
        assert!(view.stories().is_empty());
        assert_eq!(view.load_state(), &LoadState::Idle);
        assert_eq!(
            drain(&mut rx),
            vec![
                ViewEvent::LoadStateChanged(LoadState::Loading),
                ViewEvent::LoadStateChanged(LoadState::Idle),
                ViewEvent::Disposed,
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_result_after_dispose_is_discarded() {
        let store = MemoryStore::new();
        let mut view = view_over(&store, "");

        let pending = view.begin_load(StoryRepository::seeded()).unwrap();
        let outcome = pending.wait().await;
        assert!(outcome.result.is_ok());

        view.dispose();
        assert!(!view.complete_load(outcome));
        assert!(view.stories().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_stories_while_loading_rejected() {
        let store = MemoryStore::new();
        let mut view = view_over(&store, "");
        let repo = StoryRepository::seeded().with_delay(Duration::from_secs(2));

        let pending = view.begin_load(repo).unwrap();
        assert_eq!(
            view.set_stories(seed_stories()),
            Err(ViewError::LoadInProgress)
        );
        assert!(view.stories().is_empty());
        assert_eq!(view.load_state(), &LoadState::Loading);

        assert!(view.complete_load(pending.wait().await));
        assert_eq!(view.stories().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_outcome_from_other_load_is_ignored() {
        let store = MemoryStore::new();
        let mut view = view_over(&store, "");
        let repo = StoryRepository::seeded().with_delay(Duration::from_secs(2));

        let pending = view.begin_load(repo).unwrap();
        let stale = LoadOutcome {
            generation: pending.generation + 1,
            result: Ok(seed_stories()),
        };
        assert!(!view.complete_load(stale));
        assert!(view.stories().is_empty());
        assert_eq!(view.load_state(), &LoadState::Loading);

        let outcome = pending.wait().await;
        assert!(view.complete_load(outcome));
        assert_eq!(view.load_state(), &LoadState::Loaded);
    }

    #[tokio::test(start_paused = true)]
    async fn test_outcome_applied_only_once() {
        let store = MemoryStore::new();
        let mut view = view_over(&store, "");

        let pending = view.begin_load(StoryRepository::seeded()).unwrap();
        let generation = pending.generation;
        assert!(view.complete_load(pending.wait().await));
        view.on_dismiss(0);

        let replay = LoadOutcome {
            generation,
            result: Ok(seed_stories()),
        };
        assert!(!view.complete_load(replay));
        assert_eq!(view.stories().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_load_leaves_empty_with_error() {
        let store = MemoryStore::new();
        let mut view = view_over(&store, "");
        view.set_stories(seed_stories()).unwrap();

        let repo = StoryRepository::from_file("/nonexistent/stories.json");
        let applied = view.load(repo).await.expect("load should start");

        assert!(applied);
        assert!(view.stories().is_empty());
        assert!(matches!(view.load_state(), LoadState::Failed(msg) if msg.contains("nonexistent")));
    }
}
