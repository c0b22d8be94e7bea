//! Application Core
//!
//! `GroceryApp` owns all mutable state (lists, pending queue, transient
//! status, frequency table) and is injected with its persistence and
//! categorization collaborators. Cloning is cheap; spawned categorization
//! tasks hold a clone.

use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::autocomplete::{self, ItemFrequency};
use crate::commands::Categorizer;
use crate::config::ClientConfig;
use crate::connectivity::Connectivity;
use crate::domain::{
    DomainResult, GroceryItem, ListColor, ListIcon, ListsStorage, PendingCategorization,
    PendingDeletion, SectionKey, ShoppingList,
};
use crate::repository::ListsRepository;
use crate::status::{CategorizationPhase, Highlight, StatusBoard};
use crate::store::{ListStore, ListUpdate};

struct AppState {
    store: ListStore,
    pending: Vec<PendingCategorization>,
    status: StatusBoard,
    frequency: ItemFrequency,
}

impl AppState {
    /// Drop queue entries whose item no longer exists. Returns true if any were dropped.
    fn prune_pending(&mut self) -> bool {
        let before = self.pending.len();
        let store = &self.store;
        self.pending.retain(|entry| store.find_item(&entry.item_id).is_some());
        self.pending.len() != before
    }
}

#[derive(Clone)]
pub struct GroceryApp {
    state: Arc<Mutex<AppState>>,
    repo: ListsRepository,
    categorizer: Arc<dyn Categorizer>,
    config: ClientConfig,
}

impl GroceryApp {
    /// Load persisted state (running the legacy migration if needed)
    pub async fn load(
        repo: ListsRepository,
        categorizer: Arc<dyn Categorizer>,
        config: ClientConfig,
    ) -> DomainResult<Self> {
        let lists = repo.load_lists().await?;
        let stored_frequency = repo.load_item_frequency().await?;
        let frequency = autocomplete::aggregate_item_frequency(&stored_frequency, &lists.lists);
        let pending = repo.load_pending().await?;

        let mut state = AppState {
            store: ListStore::new(lists),
            pending,
            status: StatusBoard::new(),
            frequency,
        };

        if state.prune_pending() {
            repo.save_pending(&state.pending).await?;
        }
        for entry in state.pending.clone() {
            state.store.with_item(&entry.item_id, |item| item.pending_categorization = true);
            state.status.set_phase(&entry.item_id, CategorizationPhase::QueuedOffline);
        }

        log::info!(
            "Loaded {} lists, {} queued categorizations",
            state.store.lists().len(),
            state.pending.len()
        );

        Ok(Self {
            state: Arc::new(Mutex::new(state)),
            repo,
            categorizer,
            config,
        })
    }

    // ========================
    // Read access
    // ========================

    pub async fn snapshot(&self) -> ListsStorage {
        self.state.lock().await.store.storage().clone()
    }

    pub async fn active_list(&self) -> Option<ShoppingList> {
        self.state.lock().await.store.active_list().cloned()
    }

    pub async fn find_item(&self, item_id: &str) -> Option<GroceryItem> {
        self.state.lock().await.store.find_item(item_id).cloned()
    }

    pub async fn pending(&self) -> Vec<PendingCategorization> {
        self.state.lock().await.pending.clone()
    }

    pub async fn phase(&self, item_id: &str) -> CategorizationPhase {
        self.state.lock().await.status.phase(item_id)
    }

    pub async fn is_highlighted(&self, item_id: &str, flag: Highlight) -> bool {
        self.state.lock().await.status.is_highlighted(item_id, flag)
    }

    pub async fn grouped_items(&self) -> Vec<(SectionKey, Vec<GroceryItem>)> {
        self.state.lock().await.store.grouped_active_items()
    }

    pub async fn suggestions(&self, input: &str) -> Vec<String> {
        autocomplete::get_suggestions(input, &self.state.lock().await.frequency)
    }

    // ========================
    // Persistence
    // ========================

    async fn persist_lists(&self, state: &AppState) -> DomainResult<()> {
        self.repo.save_lists(state.store.storage()).await
    }

    async fn persist_pending(&self, state: &AppState) -> DomainResult<()> {
        self.repo.save_pending(&state.pending).await
    }

    // ========================
    // List lifecycle
    // ========================

    pub async fn create_list(
        &self,
        name: &str,
        icon: Option<ListIcon>,
        color: Option<ListColor>,
    ) -> DomainResult<ShoppingList> {
        let mut state = self.state.lock().await;
        let list = state.store.create_list(name, icon, color)?;
        self.persist_lists(&state).await?;
        Ok(list)
    }

    pub async fn update_list(&self, id: &str, update: ListUpdate) -> DomainResult<ShoppingList> {
        let mut state = self.state.lock().await;
        let list = state.store.update_list(id, update)?;
        self.persist_lists(&state).await?;
        Ok(list)
    }

    pub async fn delete_list(&self, id: &str) -> DomainResult<()> {
        let mut state = self.state.lock().await;
        let removed = state.store.delete_list(id)?;
        for item in &removed.items {
            state.status.forget(&item.id);
        }
        self.persist_lists(&state).await?;
        if state.prune_pending() {
            self.persist_pending(&state).await?;
        }
        Ok(())
    }

    pub async fn archive_list(&self, id: &str) -> DomainResult<()> {
        let mut state = self.state.lock().await;
        state.store.archive_list(id)?;
        self.persist_lists(&state).await
    }

    pub async fn restore_list(&self, id: &str) -> DomainResult<()> {
        let mut state = self.state.lock().await;
        state.store.restore_list(id)?;
        self.persist_lists(&state).await
    }

    /// Copy a list and make it active.
    ///
    /// Copies of queued items join the retry queue; copies of items still
    /// being categorized get their own categorization run.
    pub async fn duplicate_list(&self, id: &str) -> DomainResult<ShoppingList> {
        let mut state = self.state.lock().await;
        let source_ids: Vec<String> = state
            .store
            .get(id)
            .map(|list| list.items.iter().map(|item| item.id.clone()).collect())
            .unwrap_or_default();
        let copy = state.store.duplicate_list(id)?;

        let mut requeued = false;
        let mut in_flight = Vec::new();
        for (source_id, item) in source_ids.iter().zip(&copy.items) {
            if item.pending_categorization {
                state.status.set_phase(&item.id, CategorizationPhase::QueuedOffline);
                state.pending.push(PendingCategorization {
                    item_id: item.id.clone(),
                    item_name: item.name.clone(),
                });
                requeued = true;
            } else if state.status.phase(source_id) == CategorizationPhase::Categorizing {
                state.status.set_phase(&item.id, CategorizationPhase::Categorizing);
                in_flight.push((item.id.clone(), item.name.clone()));
            }
        }

        self.persist_lists(&state).await?;
        if requeued {
            self.persist_pending(&state).await?;
        }
        drop(state);

        for (item_id, item_name) in in_flight {
            tokio::spawn(self.clone().run_categorization(item_id, item_name));
        }
        Ok(copy)
    }

    pub async fn set_active_list(&self, id: Option<&str>) -> DomainResult<()> {
        let mut state = self.state.lock().await;
        state.store.set_active_list(id)?;
        self.persist_lists(&state).await
    }

    // ========================
    // Items
    // ========================

    /// Add an item to the active list and start categorizing it.
    ///
    /// Returns as soon as the item is stored; the handle resolves when the
    /// categorization attempt has been applied.
    pub async fn add_item(&self, name: &str) -> DomainResult<(GroceryItem, JoinHandle<()>)> {
        let item = {
            let mut state = self.state.lock().await;
            let item = state.store.add_item(name)?;
            if let Err(e) = self.persist_lists(&state).await {
                if let Err(rollback) = state.store.remove_item(&item.id) {
                    log::error!("Failed to roll back unsaved item {}: {}", item.id, rollback);
                }
                return Err(e);
            }
            autocomplete::increment_item_frequency(&mut state.frequency, &item.name);
            state.status.set_phase(&item.id, CategorizationPhase::Categorizing);
            state.status.highlight(&item.id, Highlight::New);
            if let Err(e) = self.repo.save_item_frequency(&state.frequency).await {
                log::warn!("Failed to save item frequency: {}", e);
            }
            item
        };

        let task = tokio::spawn(self.clone().run_categorization(item.id.clone(), item.name.clone()));
        Ok((item, task))
    }

    pub async fn toggle_purchased(&self, item_id: &str) -> DomainResult<GroceryItem> {
        let mut state = self.state.lock().await;
        let item = state.store.toggle_purchased(item_id)?;
        self.persist_lists(&state).await?;
        Ok(item)
    }

    pub async fn remove_item(&self, item_id: &str) -> DomainResult<PendingDeletion> {
        let mut state = self.state.lock().await;
        let deletion = state.store.remove_item(item_id)?;
        state.status.forget(item_id);
        state.status.highlight(item_id, Highlight::Removing);
        self.persist_lists(&state).await?;
        if state.prune_pending() {
            self.persist_pending(&state).await?;
        }
        Ok(deletion)
    }

    pub async fn undo_remove(&self, deletion: PendingDeletion) -> DomainResult<()> {
        let mut state = self.state.lock().await;
        let requeue = deletion.item.pending_categorization.then(|| PendingCategorization {
            item_id: deletion.item.id.clone(),
            item_name: deletion.item.name.clone(),
        });
        state.store.undo_remove(deletion)?;
        self.persist_lists(&state).await?;
        if let Some(entry) = requeue {
            state.status.set_phase(&entry.item_id, CategorizationPhase::QueuedOffline);
            state.pending.push(entry);
            self.persist_pending(&state).await?;
        }
        Ok(())
    }

    // ========================
    // Categorization
    // ========================

    async fn run_categorization(self, item_id: String, item_name: String) {
        let result = self.categorizer.categorize(&item_name).await;

        let mut state = self.state.lock().await;
        let outcome = match result {
            Ok(section) => self.apply_section(&mut state, &item_id, section).await,
            Err(e) => {
                log::info!("Queueing '{}' for retry: {}", item_name, e);
                self.queue_offline(&mut state, &item_id, &item_name).await
            }
        };
        if let Err(e) = outcome {
            log::error!("Failed to persist categorization of '{}': {}", item_name, e);
        }
    }

    async fn apply_section(&self, state: &mut AppState, item_id: &str, section: SectionKey) -> DomainResult<()> {
        let applied = state.store.set_item_section(item_id, section);
        let before = state.pending.len();
        state.pending.retain(|entry| entry.item_id != item_id);
        let dequeued = state.pending.len() != before;

        if applied {
            state.status.set_phase(item_id, CategorizationPhase::Categorized);
            self.persist_lists(state).await?;
        } else {
            log::debug!("Dropping section for removed item {}", item_id);
            state.status.forget(item_id);
        }
        if dequeued {
            self.persist_pending(state).await?;
        }
        Ok(())
    }

    async fn queue_offline(&self, state: &mut AppState, item_id: &str, item_name: &str) -> DomainResult<()> {
        if !state.store.with_item(item_id, |item| item.pending_categorization = true) {
            state.status.forget(item_id);
            return Ok(());
        }
        state.status.set_phase(item_id, CategorizationPhase::QueuedOffline);
        if !state.pending.iter().any(|entry| entry.item_id == item_id) {
            state.pending.push(PendingCategorization {
                item_id: item_id.to_string(),
                item_name: item_name.to_string(),
            });
        }
        self.persist_lists(state).await?;
        self.persist_pending(state).await
    }

    /// Re-attempt every queued item in enqueue order, staggered.
    ///
    /// Items already being categorized are skipped. Returns one handle per
    /// attempt issued.
    pub async fn retry_pending(&self) -> Vec<JoinHandle<()>> {
        let queued: Vec<PendingCategorization> = {
            let mut state = self.state.lock().await;
            if state.prune_pending() {
                if let Err(e) = self.persist_pending(&state).await {
                    log::error!("Failed to persist pruned queue: {}", e);
                }
            }
            let queued: Vec<_> = state
                .pending
                .iter()
                .filter(|entry| state.status.phase(&entry.item_id) != CategorizationPhase::Categorizing)
                .cloned()
                .collect();
            for entry in &queued {
                state.status.set_phase(&entry.item_id, CategorizationPhase::Categorizing);
            }
            queued
        };

        if !queued.is_empty() {
            log::info!("Retrying {} queued categorizations", queued.len());
        }

        let mut handles = Vec::with_capacity(queued.len());
        for (i, entry) in queued.into_iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(self.config.retry_stagger).await;
            }
            handles.push(tokio::spawn(self.clone().run_categorization(entry.item_id, entry.item_name)));
        }
        handles
    }

    /// Drain the queue every time connectivity comes back
    pub fn spawn_reconnect_listener(&self, connectivity: &Connectivity) -> JoinHandle<()> {
        let app = self.clone();
        let mut rx = connectivity.subscribe();
        tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                let online = *rx.borrow_and_update();
                if !online {
                    continue;
                }
                log::info!("Connectivity restored");
                for handle in app.retry_pending().await {
                    if let Err(e) = handle.await {
                        log::error!("Retry task failed: {}", e);
                    }
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::ConnectivityError;
    use crate::repository::{init_db, KeyValueStore};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::path::Path;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;
    use tokio::sync::Semaphore;

    struct FakeCategorizer {
        online: AtomicBool,
        sections: HashMap<String, SectionKey>,
        gate: Option<Arc<Semaphore>>,
        calls: std::sync::Mutex<Vec<String>>,
        instants: std::sync::Mutex<Vec<tokio::time::Instant>>,
    }

    impl FakeCategorizer {
        fn new(online: bool) -> Self {
            let sections = [("Milk", SectionKey::Dairy), ("Apple", SectionKey::Produce), ("Bread", SectionKey::Bakery)]
                .into_iter()
                .map(|(name, section)| (name.to_string(), section))
                .collect();
            Self {
                online: AtomicBool::new(online),
                sections,
                gate: None,
                calls: std::sync::Mutex::new(Vec::new()),
                instants: std::sync::Mutex::new(Vec::new()),
            }
        }

        fn set_online(&self, online: bool) {
            self.online.store(online, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl Categorizer for FakeCategorizer {
        async fn categorize(&self, item_name: &str) -> Result<SectionKey, ConnectivityError> {
            self.calls.lock().unwrap().push(item_name.to_string());
            self.instants.lock().unwrap().push(tokio::time::Instant::now());
            if let Some(gate) = &self.gate {
                gate.acquire().await.unwrap().forget();
            }
            if !self.online.load(Ordering::SeqCst) {
                return Err(ConnectivityError("network unreachable".into()));
            }
            Ok(self.sections.get(item_name).copied().unwrap_or(SectionKey::Other))
        }
    }

    fn test_config() -> ClientConfig {
        ClientConfig {
            retry_stagger: Duration::from_millis(1),
            ..ClientConfig::default()
        }
    }

    async fn setup(categorizer: Arc<FakeCategorizer>) -> (GroceryApp, ListsRepository) {
        setup_with_config(categorizer, test_config()).await
    }

    async fn setup_with_config(categorizer: Arc<FakeCategorizer>, config: ClientConfig) -> (GroceryApp, ListsRepository) {
        let store = init_db(Path::new(":memory:")).await.expect("Failed to init test DB");
        let repo = ListsRepository::new(Arc::new(store));
        let app = GroceryApp::load(repo.clone(), categorizer, config).await.unwrap();
        app.create_list("Weekly", None, None).await.unwrap();
        (app, repo)
    }

    /// Store whose writes can be made to fail
    struct FlakyStore {
        inner: crate::repository::SqliteStore,
        fail_writes: AtomicBool,
    }

    #[async_trait]
    impl KeyValueStore for FlakyStore {
        async fn get(&self, key: &str) -> DomainResult<Option<String>> {
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: &str) -> DomainResult<()> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(crate::domain::DomainError::Internal("disk full".into()));
            }
            self.inner.set(key, value).await
        }

        async fn remove(&self, key: &str) -> DomainResult<()> {
            self.inner.remove(key).await
        }
    }

    #[tokio::test]
    async fn test_add_item_online_categorizes() {
        let categorizer = Arc::new(FakeCategorizer::new(true));
        let (app, repo) = setup(categorizer).await;

        let (item, task) = app.add_item("Milk").await.unwrap();
        assert_eq!(item.section, SectionKey::Other);
        assert!(app.is_highlighted(&item.id, Highlight::New).await);
        task.await.unwrap();

        assert_eq!(app.find_item(&item.id).await.unwrap().section, SectionKey::Dairy);
        assert_eq!(app.phase(&item.id).await, CategorizationPhase::Categorized);

        let stored = repo.load_lists().await.unwrap();
        assert_eq!(stored.lists[0].items[0].section, SectionKey::Dairy);
    }

    #[tokio::test]
    async fn test_unknown_item_still_counts_as_categorized() {
        let categorizer = Arc::new(FakeCategorizer::new(true));
        let (app, _) = setup(categorizer).await;

        let (item, task) = app.add_item("Mystery").await.unwrap();
        task.await.unwrap();
        assert_eq!(app.phase(&item.id).await, CategorizationPhase::Categorized);
        assert!(app.pending().await.is_empty());
    }

    #[tokio::test]
    async fn test_offline_item_is_queued_then_resolved() {
        let categorizer = Arc::new(FakeCategorizer::new(false));
        let (app, repo) = setup(categorizer.clone()).await;

        let (item, task) = app.add_item("Milk").await.unwrap();
        task.await.unwrap();

        assert_eq!(app.phase(&item.id).await, CategorizationPhase::QueuedOffline);
        assert!(app.find_item(&item.id).await.unwrap().pending_categorization);
        let pending = app.pending().await;
        assert_eq!(pending, vec![PendingCategorization { item_id: item.id.clone(), item_name: "Milk".into() }]);
        assert_eq!(repo.load_pending().await.unwrap(), pending);

        categorizer.set_online(true);
        for handle in app.retry_pending().await {
            handle.await.unwrap();
        }

        let resolved = app.find_item(&item.id).await.unwrap();
        assert_eq!(resolved.section, SectionKey::Dairy);
        assert!(!resolved.pending_categorization);
        assert!(app.pending().await.is_empty());
        assert!(repo.load_pending().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_retry_preserves_enqueue_order() {
        let categorizer = Arc::new(FakeCategorizer::new(false));
        let (app, _) = setup(categorizer.clone()).await;

        for name in ["Bread", "Apple", "Milk"] {
            let (_, task) = app.add_item(name).await.unwrap();
            task.await.unwrap();
        }
        categorizer.calls.lock().unwrap().clear();

        categorizer.set_online(true);
        for handle in app.retry_pending().await {
            handle.await.unwrap();
        }
        assert_eq!(*categorizer.calls.lock().unwrap(), vec!["Bread", "Apple", "Milk"]);
        assert!(app.pending().await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_are_spaced_by_stagger() {
        let categorizer = Arc::new(FakeCategorizer::new(false));
        let stagger = Duration::from_millis(250);
        let config = ClientConfig {
            retry_stagger: stagger,
            ..ClientConfig::default()
        };
        let (app, _) = setup_with_config(categorizer.clone(), config).await;
        for name in ["Bread", "Apple", "Milk"] {
            let (_, task) = app.add_item(name).await.unwrap();
            task.await.unwrap();
        }
        categorizer.instants.lock().unwrap().clear();

        categorizer.set_online(true);
        for handle in app.retry_pending().await {
            handle.await.unwrap();
        }

        let instants = categorizer.instants.lock().unwrap().clone();
        assert_eq!(instants.len(), 3);
        for pair in instants.windows(2) {
            let gap = pair[1] - pair[0];
            assert!(gap >= stagger && gap < stagger * 2, "gap between retries was {:?}", gap);
        }
    }

    #[tokio::test]
    async fn test_reconnect_listener_drains_queue() {
        let categorizer = Arc::new(FakeCategorizer::new(false));
        let (app, _) = setup(categorizer.clone()).await;
        let connectivity = Connectivity::new(false);
        let listener = app.spawn_reconnect_listener(&connectivity);

        let (item, task) = app.add_item("Apple").await.unwrap();
        task.await.unwrap();
        assert_eq!(app.pending().await.len(), 1);

        categorizer.set_online(true);
        connectivity.set_online(true);

        let drained = tokio::time::timeout(Duration::from_secs(5), async {
            while !app.pending().await.is_empty() {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await;
        assert!(drained.is_ok());
        assert_eq!(app.find_item(&item.id).await.unwrap().section, SectionKey::Produce);
        listener.abort();
    }

    #[tokio::test]
    async fn test_queue_survives_reload() {
        let categorizer = Arc::new(FakeCategorizer::new(false));
        let (app, repo) = setup(categorizer.clone()).await;
        let (item, task) = app.add_item("Bread").await.unwrap();
        task.await.unwrap();
        drop(app);

        let reloaded = GroceryApp::load(repo, categorizer.clone(), test_config()).await.unwrap();
        assert_eq!(reloaded.pending().await.len(), 1);
        assert_eq!(reloaded.phase(&item.id).await, CategorizationPhase::QueuedOffline);

        categorizer.set_online(true);
        for handle in reloaded.retry_pending().await {
            handle.await.unwrap();
        }
        assert_eq!(reloaded.find_item(&item.id).await.unwrap().section, SectionKey::Bakery);
    }

    #[tokio::test]
    async fn test_result_for_removed_item_is_dropped() {
        let gate = Arc::new(Semaphore::new(0));
        let mut fake = FakeCategorizer::new(true);
        fake.gate = Some(gate.clone());
        let (app, repo) = setup(Arc::new(fake)).await;

        let (item, task) = app.add_item("Milk").await.unwrap();
        app.remove_item(&item.id).await.unwrap();
        gate.add_permits(1);
        task.await.unwrap();

        assert!(app.find_item(&item.id).await.is_none());
        let stored = repo.load_lists().await.unwrap();
        assert!(stored.lists[0].items.is_empty());
    }

    #[tokio::test]
    async fn test_removing_queued_item_prunes_queue() {
        let categorizer = Arc::new(FakeCategorizer::new(false));
        let (app, _) = setup(categorizer).await;
        let (item, task) = app.add_item("Milk").await.unwrap();
        task.await.unwrap();

        let deletion = app.remove_item(&item.id).await.unwrap();
        assert!(app.pending().await.is_empty());

        app.undo_remove(deletion).await.unwrap();
        assert_eq!(app.pending().await.len(), 1);
        assert_eq!(app.phase(&item.id).await, CategorizationPhase::QueuedOffline);
    }

    #[tokio::test]
    async fn test_duplicate_of_queued_item_is_categorized_after_reconnect() {
        let categorizer = Arc::new(FakeCategorizer::new(false));
        let (app, repo) = setup(categorizer.clone()).await;
        let original = app.active_list().await.unwrap();
        let (_, task) = app.add_item("Milk").await.unwrap();
        task.await.unwrap();

        let copy = app.duplicate_list(&original.id).await.unwrap();
        let copied = &copy.items[0];
        assert_eq!(app.phase(&copied.id).await, CategorizationPhase::QueuedOffline);
        assert_eq!(app.pending().await.len(), 2);
        assert_eq!(repo.load_pending().await.unwrap().len(), 2);

        categorizer.set_online(true);
        for handle in app.retry_pending().await {
            handle.await.unwrap();
        }

        let resolved = app.find_item(&copied.id).await.unwrap();
        assert_eq!(resolved.section, SectionKey::Dairy);
        assert!(!resolved.pending_categorization);
        assert_eq!(app.phase(&copied.id).await, CategorizationPhase::Categorized);
        assert!(app.pending().await.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_of_item_being_categorized_gets_own_run() {
        let gate = Arc::new(Semaphore::new(0));
        let mut fake = FakeCategorizer::new(true);
        fake.gate = Some(gate.clone());
        let (app, _) = setup(Arc::new(fake)).await;
        let original = app.active_list().await.unwrap();

        let (_, task) = app.add_item("Bread").await.unwrap();
        let copy = app.duplicate_list(&original.id).await.unwrap();
        let copied_id = copy.items[0].id.clone();
        assert_eq!(app.phase(&copied_id).await, CategorizationPhase::Categorizing);

        gate.add_permits(2);
        task.await.unwrap();
        let resolved = tokio::time::timeout(Duration::from_secs(5), async {
            while app.phase(&copied_id).await != CategorizationPhase::Categorized {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await;
        assert!(resolved.is_ok());
        assert_eq!(app.find_item(&copied_id).await.unwrap().section, SectionKey::Bakery);
    }

    #[tokio::test]
    async fn test_failed_save_rolls_back_added_item() {
        let inner = init_db(Path::new(":memory:")).await.unwrap();
        let store = Arc::new(FlakyStore {
            inner,
            fail_writes: AtomicBool::new(false),
        });
        let repo = ListsRepository::new(store.clone());
        let app = GroceryApp::load(repo, Arc::new(FakeCategorizer::new(true)), test_config())
            .await
            .unwrap();
        app.create_list("Weekly", None, None).await.unwrap();

        store.fail_writes.store(true, Ordering::SeqCst);
        assert!(app.add_item("Milk").await.is_err());
        assert!(app.active_list().await.unwrap().items.is_empty());

        store.fail_writes.store(false, Ordering::SeqCst);
        let (item, task) = app.add_item("Milk").await.unwrap();
        task.await.unwrap();
        assert_eq!(app.find_item(&item.id).await.unwrap().section, SectionKey::Dairy);
    }

    #[tokio::test]
    async fn test_add_item_feeds_suggestions() {
        let categorizer = Arc::new(FakeCategorizer::new(true));
        let (app, repo) = setup(categorizer).await;
        for name in ["kombucha", "Kombucha "] {
            let (_, task) = app.add_item(name).await.unwrap();
            task.await.unwrap();
        }
        assert_eq!(app.suggestions("ko").await, vec!["Kombucha"]);
        assert_eq!(repo.load_item_frequency().await.unwrap().get("kombucha"), Some(&2));
    }

    #[tokio::test]
    async fn test_duplicate_scenario() {
        let categorizer = Arc::new(FakeCategorizer::new(true));
        let (app, _) = setup(categorizer).await;
        let original = app.active_list().await.unwrap();
        for name in ["Milk", "Bread"] {
            let (_, task) = app.add_item(name).await.unwrap();
            task.await.unwrap();
        }

        let copy = app.duplicate_list(&original.id).await.unwrap();
        let snapshot = app.snapshot().await;
        assert_eq!(snapshot.active_list_id.as_deref(), Some(copy.id.as_str()));
        assert_eq!(copy.items.len(), 2);
        let source = snapshot.lists.iter().find(|l| l.id == original.id).unwrap();
        for (a, b) in source.items.iter().zip(&copy.items) {
            assert_ne!(a.id, b.id);
            assert_eq!(a.name, b.name);
            assert_eq!(a.purchased, b.purchased);
        }
    }

    #[tokio::test]
    async fn test_corrupted_storage_loads_empty() {
        let store = init_db(Path::new(":memory:")).await.unwrap();
        store.set(crate::repository::LIST_STORAGE_KEY, "{not json").await.unwrap();
        store.set(crate::repository::PENDING_STORAGE_KEY, "[1, 2").await.unwrap();
        let repo = ListsRepository::new(Arc::new(store));

        let app = GroceryApp::load(repo, Arc::new(FakeCategorizer::new(true)), test_config())
            .await
            .unwrap();
        assert!(app.snapshot().await.lists.is_empty());
        assert!(app.pending().await.is_empty());
    }
}
