//! The "Manage Assignments" page: fetch, reconcile, row actions and the
//! delete confirmation, wired together.
//!
//! Action handlers never touch page state. They push a [`RowIntent`] onto
//! the page's queue, and the page applies queued intents on its own turn in
//! [`AssignmentsPage::tick`].

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::anyhow;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, instrument, warn};

use crate::api::{self, DataSource};
use crate::confirm::{ConfirmationState, ConfirmationWorkflow, RefetchReason};
use crate::fetcher::{CycleResult, CycleTicket, RosterFetcher, Snapshot};
use crate::model::RosterRow;
use crate::notify::{Notification, NotificationSink};
use crate::placeholder::PlaceholderSource;
use crate::reconcile::ReconcileMemo;
use crate::schema::{base_columns, build_schema, column_visibility, ActionDescriptor, ColumnSchema};

pub const CREATE_PATH: &str = "new";

pub fn edit_path(id: i64) -> String {
    format!("edit/{}", id)
}

/// Routing collaborator.
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowIntent {
    Edit(RosterRow),
    Delete(RosterRow),
}

/// What the view surface is handed each render.
#[derive(Debug, Clone)]
pub struct RosterView {
    pub data: Arc<Vec<RosterRow>>,
    pub columns: Arc<Vec<ColumnSchema>>,
    pub column_visibility: BTreeMap<String, bool>,
}

pub struct AssignmentsPage {
    fetcher: RosterFetcher,
    workflow: ConfirmationWorkflow,
    memo: ReconcileMemo,
    placeholders: Box<dyn PlaceholderSource>,
    navigator: Arc<dyn Navigator>,
    sink: Arc<dyn NotificationSink>,
    intents_tx: UnboundedSender<RowIntent>,
    intents_rx: UnboundedReceiver<RowIntent>,
    columns: Arc<Vec<ColumnSchema>>,
    user_id: Option<i64>,
}

impl AssignmentsPage {
    /// Mount the page. The initial fetch is scheduled and runs on the first
    /// [`tick`](Self::tick).
    pub fn mount(
        source: Arc<dyn DataSource>,
        sink: Arc<dyn NotificationSink>,
        navigator: Arc<dyn Navigator>,
        placeholders: Box<dyn PlaceholderSource>,
    ) -> Self {
        let (intents_tx, intents_rx) = unbounded_channel();
        let mut page = Self {
            fetcher: RosterFetcher::new(source, Arc::clone(&sink)),
            workflow: ConfirmationWorkflow::mount(),
            memo: ReconcileMemo::new(),
            placeholders,
            navigator,
            sink,
            intents_tx,
            intents_rx,
            columns: Arc::new(Vec::new()),
            user_id: None,
        };
        page.set_actions(Vec::new());
        page
    }

    /// Edit and delete, always first, followed by `extra` in order.
    pub fn row_actions(&self, extra: Vec<ActionDescriptor>) -> Vec<ActionDescriptor> {
        let edit_tx = self.intents_tx.clone();
        let delete_tx = self.intents_tx.clone();
        let mut actions = vec![
            ActionDescriptor::edit(move |row: &RosterRow| {
                edit_tx
                    .send(RowIntent::Edit(row.clone()))
                    .map_err(|_| anyhow!("assignments page is no longer mounted"))
            }),
            ActionDescriptor::delete(move |row: &RosterRow| {
                delete_tx
                    .send(RowIntent::Delete(row.clone()))
                    .map_err(|_| anyhow!("assignments page is no longer mounted"))
            }),
        ];
        actions.extend(extra);
        actions
    }

    /// Rebuild the schema with additional secondary actions.
    pub fn set_actions(&mut self, extra: Vec<ActionDescriptor>) {
        let actions = self.row_actions(extra);
        self.columns = Arc::new(build_schema(&base_columns(), actions));
    }

    pub fn columns(&self) -> Arc<Vec<ColumnSchema>> {
        Arc::clone(&self.columns)
    }

    pub fn snapshot(&self) -> &Snapshot {
        self.fetcher.snapshot()
    }

    pub fn confirmation(&self) -> &ConfirmationState {
        self.workflow.state()
    }

    pub fn workflow(&self) -> &ConfirmationWorkflow {
        &self.workflow
    }

    /// The signed-in user is a refetch dependency.
    pub fn set_user(&mut self, user_id: Option<i64>) {
        if self.user_id != user_id {
            self.user_id = user_id;
            self.workflow.dependencies_changed();
        }
    }

    pub fn create(&self) {
        self.navigator.navigate(CREATE_PATH);
    }

    /// Apply every queued row intent.
    pub fn process_intents(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(intent) = self.intents_rx.try_recv() {
            applied += 1;
            match intent {
                RowIntent::Edit(row) => self.navigator.navigate(&edit_path(row.id)),
                RowIntent::Delete(row) => {
                    self.workflow.request_delete(row);
                }
            }
        }
        applied
    }

    /// One turn: apply intents, then run the scheduled refetch if the
    /// workflow allows it. Returns the reason when a refetch ran.
    #[instrument(skip_all)]
    pub async fn tick(&mut self) -> Option<RefetchReason> {
        self.process_intents();
        let reason = self.workflow.take_refetch()?;
        debug!(?reason, "refetching roster");
        self.fetcher.refetch().await;
        Some(reason)
    }

    /// Start a cycle whose I/O the host drives itself.
    pub fn begin_cycle(&mut self) -> CycleTicket {
        self.fetcher.begin()
    }

    pub fn finish_cycle(&mut self, ticket: CycleTicket, result: CycleResult) -> bool {
        self.fetcher.commit(ticket, result)
    }

    /// Send the delete for the pending target, then close the dialog. A
    /// failed delete is reported; the dialog closes either way.
    #[instrument(skip_all)]
    pub async fn confirm_delete(&mut self) -> bool {
        let Some(target) = self.workflow.target().cloned() else {
            return false;
        };
        let source = self.fetcher.source();
        let path = api::assignment_path(target.id);
        let deleted = match source.delete(&path).await {
            Ok(()) => {
                info!(id = target.id, "assignment deleted");
                true
            }
            Err(err) => {
                warn!(id = target.id, error = %err, "assignment delete failed");
                self.sink.notify(Notification::danger(err.to_string()));
                false
            }
        };
        self.workflow.close();
        deleted
    }

    pub fn cancel_delete(&mut self) {
        self.workflow.close();
    }

    /// Data for the view surface. Empty while loading or until both
    /// collections of the current cycle are present.
    pub fn view(&mut self) -> RosterView {
        let data = {
            let snapshot = self.fetcher.snapshot();
            if snapshot.is_loading() {
                Arc::new(Vec::new())
            } else {
                self.memo.get(
                    snapshot.assignments.data.as_ref(),
                    snapshot.courses.data.as_ref(),
                    self.placeholders.as_mut(),
                )
            }
        };
        RosterView {
            data,
            column_visibility: column_visibility(&self.columns),
            columns: Arc::clone(&self.columns),
        }
    }

    /// Ignore any response still in flight.
    pub fn unmount(&mut self) {
        self.fetcher.invalidate();
        self.memo.clear();
    }
}
