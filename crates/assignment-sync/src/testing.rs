//! In-memory fakes for the remote authority and the toast sink.

use std::cell::RefCell;

use async_trait::async_trait;
use futures::channel::oneshot;

use crate::api::AssignmentApi;
use crate::error::{ApiError, ApiResult};
use crate::models::Area;
use crate::notify::Notifier;

#[derive(Debug, Clone, PartialEq)]
pub enum Toast {
    Success(String),
    Error(String),
}

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    toasts: RefCell<Vec<Toast>>,
}

impl RecordingNotifier {
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.toasts.borrow_mut().push(Toast::Success(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.toasts.borrow_mut().push(Toast::Error(message.to_string()));
    }
}

/// Scripted `AssignmentApi` that records every call
#[derive(Default)]
pub struct FakeApi {
    universe: Vec<Area>,
    assigned: Vec<Area>,
    list_areas_error: RefCell<Option<ApiError>>,
    list_assigned_error: RefCell<Option<ApiError>>,
    replace_error: RefCell<Option<ApiError>>,
    remove_error: RefCell<Option<ApiError>>,
    assigned_hold: RefCell<Option<oneshot::Receiver<()>>>,
    replace_hold: RefCell<Option<oneshot::Receiver<()>>>,
    remove_hold: RefCell<Option<oneshot::Receiver<()>>>,
    assigned_requests: RefCell<Vec<i64>>,
    replacements: RefCell<Vec<(i64, Vec<i64>)>>,
    removals: RefCell<Vec<(i64, i64)>>,
}

impl FakeApi {
    pub fn new(universe: Vec<Area>, assigned: Vec<Area>) -> Self {
        Self { universe, assigned, ..Default::default() }
    }

    pub fn fail_list_areas(&self, err: ApiError) {
        *self.list_areas_error.borrow_mut() = Some(err);
    }

    pub fn fail_list_assigned(&self, err: ApiError) {
        *self.list_assigned_error.borrow_mut() = Some(err);
    }

    pub fn fail_replace(&self, err: ApiError) {
        *self.replace_error.borrow_mut() = Some(err);
    }

    pub fn fail_remove(&self, err: ApiError) {
        *self.remove_error.borrow_mut() = Some(err);
    }

    /// Park the next assigned-areas fetch until the returned sender fires
    pub fn hold_next_list_assigned(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.assigned_hold.borrow_mut() = Some(rx);
        tx
    }

    /// Park the next replace call until the returned sender fires
    pub fn hold_next_replace(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.replace_hold.borrow_mut() = Some(rx);
        tx
    }

    /// Park the next remove call until the returned sender fires
    pub fn hold_next_remove(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.remove_hold.borrow_mut() = Some(rx);
        tx
    }

    pub fn assigned_requests(&self) -> Vec<i64> {
        self.assigned_requests.borrow().clone()
    }

    pub fn replacements(&self) -> Vec<(i64, Vec<i64>)> {
        self.replacements.borrow().clone()
    }

    pub fn removals(&self) -> Vec<(i64, i64)> {
        self.removals.borrow().clone()
    }
}

async fn wait_for(hold: Option<oneshot::Receiver<()>>) {
    if let Some(rx) = hold {
        rx.await.ok();
    }
}

#[async_trait(?Send)]
impl AssignmentApi for FakeApi {
    async fn list_areas(&self) -> ApiResult<Vec<Area>> {
        match self.list_areas_error.borrow().clone() {
            Some(err) => Err(err),
            None => Ok(self.universe.clone()),
        }
    }

    async fn list_assigned(&self, curso_id: i64) -> ApiResult<Vec<Area>> {
        self.assigned_requests.borrow_mut().push(curso_id);
        let hold = self.assigned_hold.borrow_mut().take();
        wait_for(hold).await;
        match self.list_assigned_error.borrow().clone() {
            Some(err) => Err(err),
            None => Ok(self.assigned.clone()),
        }
    }

    async fn replace_assignment(&self, curso_id: i64, area_ids: &[i64]) -> ApiResult<()> {
        self.replacements.borrow_mut().push((curso_id, area_ids.to_vec()));
        let hold = self.replace_hold.borrow_mut().take();
        wait_for(hold).await;
        match self.replace_error.borrow().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn remove_assignment(&self, curso_id: i64, area_id: i64) -> ApiResult<()> {
        self.removals.borrow_mut().push((curso_id, area_id));
        let hold = self.remove_hold.borrow_mut().take();
        wait_for(hold).await;
        match self.remove_error.borrow().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
