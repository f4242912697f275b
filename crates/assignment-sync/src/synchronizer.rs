//! Assignment Synchronizer
//!
//! Keeps the local assignable/selected split for one course consistent with
//! the remote authority. Additions are batched until `commit`; removals go
//! through the confirmation gate and hit the server immediately.
//!
//! All state lives behind `Cell`/`RefCell` and every borrow is released
//! before an `.await`, so the UI can hold the synchronizer in an `Rc` and
//! drive several operations from independent event handlers.

use std::cell::{Cell, RefCell};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, error, info, warn};

use crate::api::AssignmentApi;
use crate::error::{ApiResult, SyncError};
use crate::gate::ConfirmationGate;
use crate::models::Area;
use crate::notify::Notifier;
use crate::sets::AssignmentSets;

pub const LOAD_FAILED: &str = "Error al cargar las áreas";
pub const REMOVAL_SUCCEEDED: &str = "Área desasignada correctamente";
pub const REMOVAL_FAILED: &str = "Error al desasignar el área";
pub const COMMIT_SUCCEEDED: &str = "Áreas asignadas correctamente";
pub const COMMIT_FAILED: &str = "Error al asignar las áreas";

/// Shared flag flipped when the owning view goes away
///
/// `Send + Sync` so it can be moved into UI cleanup hooks.
#[derive(Debug, Clone, Default)]
pub struct TeardownHandle(Arc<AtomicBool>);

impl TeardownHandle {
    pub fn dispose(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_disposed(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Render-ready view of the synchronizer state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssignmentSnapshot {
    pub curso_id: i64,
    /// Sorted by name
    pub assignable: Vec<Area>,
    pub selected: Vec<Area>,
    /// (area, confirmation message) while the modal is open
    pub pending: Option<(Area, String)>,
    pub loading: bool,
    pub committing: bool,
    pub removing: bool,
    pub unsaved: bool,
}

/// Callback fired after a successful commit
pub type CommittedCallback = Box<dyn Fn()>;

/// Observer receiving a fresh snapshot after every state change
pub type ChangeCallback = Box<dyn Fn(AssignmentSnapshot)>;

/// One synchronizer per course id
pub struct AssignmentSynchronizer<A, N> {
    curso_id: i64,
    api: A,
    notifier: N,
    sets: RefCell<AssignmentSets>,
    gate: RefCell<ConfirmationGate>,
    loading: Cell<bool>,
    committing: Cell<bool>,
    removing: Cell<bool>,
    teardown: TeardownHandle,
    on_committed: Option<CommittedCallback>,
    on_change: Option<ChangeCallback>,
}

impl<A: AssignmentApi, N: Notifier> AssignmentSynchronizer<A, N> {
    pub fn new(curso_id: i64, api: A, notifier: N) -> Self {
        Self {
            curso_id,
            api,
            notifier,
            sets: RefCell::new(AssignmentSets::default()),
            gate: RefCell::new(ConfirmationGate::Idle),
            loading: Cell::new(false),
            committing: Cell::new(false),
            removing: Cell::new(false),
            teardown: TeardownHandle::default(),
            on_committed: None,
            on_change: None,
        }
    }

    /// Notify the parent view once a commit lands
    pub fn with_on_committed(mut self, callback: impl Fn() + 'static) -> Self {
        self.on_committed = Some(Box::new(callback));
        self
    }

    /// Push snapshots to the view whenever state changes
    pub fn with_on_change(mut self, callback: impl Fn(AssignmentSnapshot) + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    fn changed(&self) {
        if let Some(callback) = &self.on_change {
            callback(self.snapshot());
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn teardown_handle(&self) -> TeardownHandle {
        self.teardown.clone()
    }

    pub fn dispose(&self) {
        self.teardown.dispose();
    }

    pub fn is_disposed(&self) -> bool {
        self.teardown.is_disposed()
    }

    pub fn is_committing(&self) -> bool {
        self.committing.get()
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.sets.borrow().has_unsaved_changes()
    }

    pub fn snapshot(&self) -> AssignmentSnapshot {
        let sets = self.sets.borrow();
        let pending = match &*self.gate.borrow() {
            ConfirmationGate::PendingConfirmation { area, message } => {
                Some((area.clone(), message.clone()))
            }
            ConfirmationGate::Idle => None,
        };

        AssignmentSnapshot {
            curso_id: self.curso_id,
            assignable: sets.sorted_assignable(),
            selected: sets.selected().to_vec(),
            pending,
            loading: self.loading.get(),
            committing: self.committing.get(),
            removing: self.removing.get(),
            unsaved: sets.has_unsaved_changes(),
        }
    }

    /// Fetch the area universe and the course's assigned areas.
    ///
    /// Both fetches must succeed; otherwise both halves stay empty.
    pub async fn load(&self) -> Result<(), SyncError> {
        if self.is_disposed() {
            return Err(SyncError::Disposed);
        }
        self.loading.set(true);
        self.changed();
        let fetched = self.fetch_all().await;

        if self.is_disposed() {
            debug!("[SYNC] curso {}: discarding load response after teardown", self.curso_id);
            return Err(SyncError::Disposed);
        }
        self.loading.set(false);

        match fetched {
            Ok((universe, assigned)) => {
                info!(
                    "[SYNC] curso {}: loaded {} areas, {} assigned",
                    self.curso_id,
                    universe.len(),
                    assigned.len()
                );
                *self.sets.borrow_mut() = AssignmentSets::from_load(universe, assigned);
                self.changed();
                Ok(())
            }
            Err(err) => {
                error!("[SYNC] curso {}: error fetching areas: {}", self.curso_id, err);
                *self.sets.borrow_mut() = AssignmentSets::default();
                self.changed();
                self.notifier.error(LOAD_FAILED);
                Err(SyncError::Load(err))
            }
        }
    }

    async fn fetch_all(&self) -> ApiResult<(Vec<Area>, Vec<Area>)> {
        let universe = self.api.list_areas().await?;
        let assigned = self.api.list_assigned(self.curso_id).await?;
        Ok((universe, assigned))
    }

    /// Move an assignable area into the selection. Unknown ids are ignored.
    pub fn select(&self, area_id: i64) -> bool {
        let moved = self.sets.borrow_mut().select(area_id);
        if moved {
            debug!("[SYNC] curso {}: selected area {}", self.curso_id, area_id);
            self.changed();
        } else {
            debug!("[SYNC] curso {}: area {} is not assignable", self.curso_id, area_id);
        }
        moved
    }

    /// Ask the user to confirm removing `area`. Nothing is sent yet.
    pub fn request_removal(&self, area: Area) {
        debug!("[SYNC] curso {}: removal of area {} awaiting confirmation", self.curso_id, area.id);
        self.gate.borrow_mut().request(area);
        self.changed();
    }

    /// Close the confirmation without touching the server
    pub fn cancel_removal(&self) {
        self.gate.borrow_mut().cancel();
        self.changed();
    }

    /// Send the pending removal to the server.
    ///
    /// With nothing pending this is a no-op. While a commit is outstanding
    /// the request stays pending and nothing is sent.
    pub async fn confirm_removal(&self) -> Result<(), SyncError> {
        if self.is_disposed() {
            return Err(SyncError::Disposed);
        }
        if self.removing.get() {
            warn!("[SYNC] curso {}: removal already in flight", self.curso_id);
            return Err(SyncError::RemovalInFlight);
        }
        if self.committing.get() {
            warn!("[SYNC] curso {}: removal blocked by commit in flight", self.curso_id);
            return Err(SyncError::CommitInFlight);
        }
        let pending = self.gate.borrow_mut().confirm();
        let Some(area) = pending else {
            self.changed();
            return Ok(());
        };

        self.removing.set(true);
        self.changed();
        let result = self.api.remove_assignment(self.curso_id, area.id).await;

        if self.is_disposed() {
            debug!("[SYNC] curso {}: discarding removal response after teardown", self.curso_id);
            return Err(SyncError::Disposed);
        }
        self.removing.set(false);

        match result {
            Ok(()) => {
                info!("[SYNC] curso {}: removed area {}", self.curso_id, area.id);
                self.sets.borrow_mut().return_to_assignable(area);
                self.changed();
                self.notifier.success(REMOVAL_SUCCEEDED);
                Ok(())
            }
            Err(err) => {
                error!("[SYNC] curso {}: error removing area {}: {}", self.curso_id, area.id, err);
                self.changed();
                self.notifier.error(REMOVAL_FAILED);
                Err(SyncError::Removal(err))
            }
        }
    }

    /// Replace the course's assignment with the current selection.
    ///
    /// Single-flight: a second call while a commit or removal is outstanding
    /// is rejected without a request. A failed commit keeps the user's edits.
    pub async fn commit(&self) -> Result<(), SyncError> {
        if self.is_disposed() {
            return Err(SyncError::Disposed);
        }
        if self.committing.get() {
            warn!("[SYNC] curso {}: commit already in flight", self.curso_id);
            return Err(SyncError::CommitInFlight);
        }
        if self.removing.get() {
            warn!("[SYNC] curso {}: commit blocked by removal in flight", self.curso_id);
            return Err(SyncError::RemovalInFlight);
        }

        self.committing.set(true);
        self.changed();
        let (submitted, area_ids) = {
            let sets = self.sets.borrow();
            (sets.selected().to_vec(), sets.selected_ids())
        };
        let result = self.api.replace_assignment(self.curso_id, &area_ids).await;

        if self.is_disposed() {
            debug!("[SYNC] curso {}: discarding commit response after teardown", self.curso_id);
            return Err(SyncError::Disposed);
        }
        self.committing.set(false);

        match result {
            Ok(()) => {
                info!("[SYNC] curso {}: assigned {} areas", self.curso_id, area_ids.len());
                self.sets.borrow_mut().mark_saved(submitted);
                self.changed();
                self.notifier.success(COMMIT_SUCCEEDED);
                if let Some(callback) = &self.on_committed {
                    callback();
                }
                Ok(())
            }
            Err(err) => {
                error!("[SYNC] curso {}: error saving areas: {}", self.curso_id, err);
                self.changed();
                self.notifier.error(COMMIT_FAILED);
                Err(SyncError::Commit(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::testing::{FakeApi, RecordingNotifier, Toast};
    use std::rc::Rc;

    type TestSync = AssignmentSynchronizer<FakeApi, Rc<RecordingNotifier>>;

    fn universe() -> Vec<Area> {
        vec![Area::new(1, "Math"), Area::new(2, "Art"), Area::new(3, "Bio")]
    }

    fn setup(api: FakeApi) -> (TestSync, Rc<RecordingNotifier>, Rc<Cell<u32>>) {
        let notifier = Rc::new(RecordingNotifier::default());
        let committed = Rc::new(Cell::new(0));
        let counter = committed.clone();
        let sync = AssignmentSynchronizer::new(7, api, notifier.clone())
            .with_on_committed(move || counter.set(counter.get() + 1));
        (sync, notifier, committed)
    }

    async fn loaded() -> (TestSync, Rc<RecordingNotifier>, Rc<Cell<u32>>) {
        let (sync, notifier, committed) =
            setup(FakeApi::new(universe(), vec![Area::new(2, "Art")]));
        sync.load().await.expect("load failed");
        (sync, notifier, committed)
    }

    fn server_error() -> ApiError {
        ApiError::Status { status: 500, message: "boom".to_string() }
    }

    #[tokio::test]
    async fn test_load_splits_universe() {
        let (sync, notifier, _) = loaded().await;

        let view = sync.snapshot();
        assert_eq!(view.assignable, vec![Area::new(3, "Bio"), Area::new(1, "Math")]);
        assert_eq!(view.selected, vec![Area::new(2, "Art")]);
        assert!(!view.loading);
        assert!(!view.unsaved);
        assert!(notifier.toasts().is_empty());
        assert_eq!(sync.api().assigned_requests(), vec![7]);
    }

    #[tokio::test]
    async fn test_load_failure_leaves_both_sets_empty() {
        let api = FakeApi::new(universe(), vec![Area::new(2, "Art")]);
        api.fail_list_assigned(server_error());
        let (sync, notifier, _) = setup(api);

        let result = sync.load().await;

        assert_eq!(result, Err(SyncError::Load(server_error())));
        let view = sync.snapshot();
        assert!(view.assignable.is_empty());
        assert!(view.selected.is_empty());
        assert_eq!(notifier.toasts(), vec![Toast::Error(LOAD_FAILED.to_string())]);
    }

    #[tokio::test]
    async fn test_load_failure_on_universe_skips_assigned_fetch() {
        let api = FakeApi::new(universe(), vec![]);
        api.fail_list_areas(ApiError::Transport("offline".to_string()));
        let (sync, notifier, _) = setup(api);

        assert!(matches!(sync.load().await, Err(SyncError::Load(ApiError::Transport(_)))));
        assert!(sync.api().assigned_requests().is_empty());
        assert_eq!(notifier.toasts().len(), 1);
    }

    #[tokio::test]
    async fn test_select_moves_one_area() {
        let (sync, _, _) = loaded().await;

        assert!(sync.select(1));
        let view = sync.snapshot();
        assert_eq!(view.selected, vec![Area::new(2, "Art"), Area::new(1, "Math")]);
        assert_eq!(view.assignable, vec![Area::new(3, "Bio")]);
        assert!(view.unsaved);

        assert!(!sync.select(42));
        assert_eq!(sync.snapshot(), view);
    }

    #[tokio::test]
    async fn test_confirm_removal_returns_area_sorted() {
        let (sync, notifier, _) = loaded().await;
        sync.select(1);

        sync.request_removal(Area::new(2, "Art"));
        assert!(sync.snapshot().pending.is_some());
        sync.confirm_removal().await.expect("removal failed");

        let view = sync.snapshot();
        assert_eq!(view.selected, vec![Area::new(1, "Math")]);
        assert_eq!(view.assignable, vec![Area::new(2, "Art"), Area::new(3, "Bio")]);
        assert_eq!(view.pending, None);
        assert_eq!(sync.api().removals(), vec![(7, 2)]);
        assert_eq!(notifier.toasts(), vec![Toast::Success(REMOVAL_SUCCEEDED.to_string())]);
    }

    #[tokio::test]
    async fn test_confirm_removal_failure_keeps_selection() {
        let (sync, notifier, _) = loaded().await;
        sync.api().fail_remove(server_error());

        sync.request_removal(Area::new(2, "Art"));
        let result = sync.confirm_removal().await;

        assert_eq!(result, Err(SyncError::Removal(server_error())));
        let view = sync.snapshot();
        assert_eq!(view.selected, vec![Area::new(2, "Art")]);
        assert_eq!(view.pending, None);
        assert!(!view.removing);
        assert_eq!(notifier.toasts(), vec![Toast::Error(REMOVAL_FAILED.to_string())]);
    }

    #[tokio::test]
    async fn test_cancel_removal_sends_nothing() {
        let (sync, notifier, _) = loaded().await;

        sync.request_removal(Area::new(2, "Art"));
        sync.cancel_removal();
        sync.confirm_removal().await.expect("no-op confirm");

        assert!(sync.api().removals().is_empty());
        assert_eq!(sync.snapshot().selected, vec![Area::new(2, "Art")]);
        assert!(notifier.toasts().is_empty());
    }

    #[tokio::test]
    async fn test_commit_sends_full_selection() {
        let (sync, notifier, committed) = loaded().await;
        sync.select(3);
        sync.select(1);

        sync.commit().await.expect("commit failed");

        assert_eq!(sync.api().replacements(), vec![(7, vec![2, 3, 1])]);
        assert_eq!(committed.get(), 1);
        assert!(!sync.has_unsaved_changes());
        assert_eq!(notifier.toasts(), vec![Toast::Success(COMMIT_SUCCEEDED.to_string())]);
    }

    #[tokio::test]
    async fn test_commit_failure_keeps_edits() {
        let (sync, notifier, committed) = loaded().await;
        sync.select(1);
        sync.api().fail_replace(server_error());

        let result = sync.commit().await;

        assert_eq!(result, Err(SyncError::Commit(server_error())));
        assert_eq!(sync.snapshot().selected, vec![Area::new(2, "Art"), Area::new(1, "Math")]);
        assert!(sync.has_unsaved_changes());
        assert!(!sync.is_committing());
        assert_eq!(committed.get(), 0);
        assert_eq!(notifier.toasts(), vec![Toast::Error(COMMIT_FAILED.to_string())]);
    }

    #[tokio::test]
    async fn test_second_commit_is_rejected_while_in_flight() {
        let (sync, _, committed) = loaded().await;
        let release = sync.api().hold_next_replace();

        let (first, second, _) = futures::join!(sync.commit(), sync.commit(), async {
            release.send(()).ok();
        });

        assert_eq!(first, Ok(()));
        assert_eq!(second, Err(SyncError::CommitInFlight));
        assert_eq!(sync.api().replacements().len(), 1);
        assert_eq!(committed.get(), 1);
    }

    #[tokio::test]
    async fn test_second_removal_is_rejected_while_in_flight() {
        let (sync, _, _) = loaded().await;
        let release = sync.api().hold_next_remove();
        sync.request_removal(Area::new(2, "Art"));

        let (first, second, _) = futures::join!(
            sync.confirm_removal(),
            async {
                sync.request_removal(Area::new(2, "Art"));
                sync.confirm_removal().await
            },
            async {
                release.send(()).ok();
            }
        );

        assert_eq!(first, Ok(()));
        assert_eq!(second, Err(SyncError::RemovalInFlight));
        assert_eq!(sync.api().removals(), vec![(7, 2)]);
    }

    #[tokio::test]
    async fn test_commit_is_rejected_while_removal_in_flight() {
        let (sync, notifier, committed) = loaded().await;
        let release = sync.api().hold_next_remove();
        sync.request_removal(Area::new(2, "Art"));

        let (removed, commit, _) = futures::join!(sync.confirm_removal(), sync.commit(), async {
            release.send(()).ok();
        });

        assert_eq!(removed, Ok(()));
        assert_eq!(commit, Err(SyncError::RemovalInFlight));
        assert!(sync.api().replacements().is_empty());
        assert_eq!(sync.api().removals(), vec![(7, 2)]);
        assert!(sync.snapshot().selected.is_empty());
        assert!(!sync.has_unsaved_changes());
        assert_eq!(committed.get(), 0);
        assert_eq!(notifier.toasts(), vec![Toast::Success(REMOVAL_SUCCEEDED.to_string())]);
    }

    #[tokio::test]
    async fn test_removal_waits_for_commit_in_flight() {
        let (sync, _, _) = loaded().await;
        sync.select(1);
        let release = sync.api().hold_next_replace();
        sync.request_removal(Area::new(2, "Art"));

        let (commit, removed, _) = futures::join!(sync.commit(), sync.confirm_removal(), async {
            release.send(()).ok();
        });

        assert_eq!(commit, Ok(()));
        assert_eq!(removed, Err(SyncError::CommitInFlight));
        assert!(sync.api().removals().is_empty());
        assert_eq!(sync.snapshot().pending.map(|(area, _)| area.id), Some(2));

        sync.confirm_removal().await.expect("removal failed");
        assert_eq!(sync.api().removals(), vec![(7, 2)]);
        assert_eq!(sync.snapshot().selected, vec![Area::new(1, "Math")]);
        assert!(!sync.has_unsaved_changes());
    }

    #[tokio::test]
    async fn test_on_change_reports_busy_commit() {
        let views = Rc::new(RefCell::new(Vec::new()));
        let sink = views.clone();
        let notifier = Rc::new(RecordingNotifier::default());
        let sync = AssignmentSynchronizer::new(
            7,
            FakeApi::new(universe(), vec![Area::new(2, "Art")]),
            notifier,
        )
        .with_on_change(move |view| sink.borrow_mut().push(view));

        sync.load().await.unwrap();
        sync.commit().await.unwrap();

        let views = views.borrow();
        let flags: Vec<(bool, bool)> = views.iter().map(|v| (v.loading, v.committing)).collect();
        assert_eq!(flags, vec![(true, false), (false, false), (false, true), (false, false)]);
        assert_eq!(views[1].selected, vec![Area::new(2, "Art")]);
    }

    #[tokio::test]
    async fn test_response_after_teardown_is_discarded() {
        let (sync, notifier, committed) = loaded().await;
        sync.select(1);
        let handle = sync.teardown_handle();
        let release = sync.api().hold_next_replace();

        let (result, _) = futures::join!(sync.commit(), async {
            handle.dispose();
            release.send(()).ok();
        });

        assert_eq!(result, Err(SyncError::Disposed));
        assert_eq!(committed.get(), 0);
        assert!(notifier.toasts().is_empty());
        assert!(sync.has_unsaved_changes());
        assert_eq!(sync.commit().await, Err(SyncError::Disposed));
    }

    #[tokio::test]
    async fn test_load_after_teardown_is_discarded() {
        let api = FakeApi::new(universe(), vec![Area::new(2, "Art")]);
        let release = api.hold_next_list_assigned();
        let (sync, notifier, _) = setup(api);
        let handle = sync.teardown_handle();

        let (result, _) = futures::join!(sync.load(), async {
            handle.dispose();
            release.send(()).ok();
        });

        assert_eq!(result, Err(SyncError::Disposed));
        let view = sync.snapshot();
        assert!(view.assignable.is_empty());
        assert!(view.selected.is_empty());
        assert!(notifier.toasts().is_empty());
    }

    #[tokio::test]
    async fn test_removal_after_teardown_is_discarded() {
        let (sync, notifier, _) = loaded().await;
        let handle = sync.teardown_handle();
        let release = sync.api().hold_next_remove();
        sync.request_removal(Area::new(2, "Art"));

        let (result, _) = futures::join!(sync.confirm_removal(), async {
            handle.dispose();
            release.send(()).ok();
        });

        assert_eq!(result, Err(SyncError::Disposed));
        assert_eq!(sync.api().removals(), vec![(7, 2)]);
        assert_eq!(sync.snapshot().selected, vec![Area::new(2, "Art")]);
        assert!(sync.snapshot().assignable.iter().all(|a| a.id != 2));
        assert!(notifier.toasts().is_empty());
    }
}
