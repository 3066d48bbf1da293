//! Concurrent assignment/course reads with per-collection load state.
//!
//! A fetch cycle is started with [`RosterFetcher::begin`], which hands out a
//! [`CycleTicket`]. Results are applied with [`RosterFetcher::commit`]; only
//! the ticket of the most recent cycle is accepted, so a late response from
//! an older cycle (or after [`RosterFetcher::invalidate`]) is dropped. Both
//! collections are replaced together, never one at a time.

use std::sync::Arc;

use futures::future::join;
use tracing::{debug, info, instrument, warn};

use crate::api::{self, DataSource, ASSIGNMENTS_PATH, COURSES_PATH};
use crate::error::FetchError;
use crate::model::{AssignmentRecord, CourseRecord};
use crate::notify::{Notification, NotificationSink};

/// `{ isLoading, error, data }` for one collection.
#[derive(Debug, Clone)]
pub struct Resource<T> {
    pub is_loading: bool,
    pub error: Option<String>,
    pub data: Option<Arc<Vec<T>>>,
}

impl<T> Default for Resource<T> {
    fn default() -> Self {
        Self {
            is_loading: false,
            error: None,
            data: None,
        }
    }
}

impl<T> Resource<T> {
    fn settle(&mut self, result: Result<Vec<T>, FetchError>) -> Option<FetchError> {
        self.is_loading = false;
        match result {
            Ok(items) => {
                self.error = None;
                self.data = Some(Arc::new(items));
                None
            }
            Err(err) => {
                self.error = Some(err.to_string());
                self.data = None;
                Some(err)
            }
        }
    }
}

/// Both collections as of the last committed cycle.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub cycle: u64,
    pub assignments: Resource<AssignmentRecord>,
    pub courses: Resource<CourseRecord>,
}

impl Snapshot {
    pub fn is_loading(&self) -> bool {
        self.assignments.is_loading || self.courses.is_loading
    }

    /// First error of this cycle, assignments before courses.
    pub fn error(&self) -> Option<&str> {
        self.assignments
            .error
            .as_deref()
            .or(self.courses.error.as_deref())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleTicket(u64);

impl CycleTicket {
    pub fn cycle(&self) -> u64 {
        self.0
    }
}

/// Outcome of both reads of one cycle.
#[derive(Debug)]
pub struct CycleResult {
    pub assignments: Result<Vec<AssignmentRecord>, FetchError>,
    pub courses: Result<Vec<CourseRecord>, FetchError>,
}

/// Issue both reads concurrently and wait until both have settled.
#[instrument(skip_all)]
pub async fn load_both(source: &dyn DataSource) -> CycleResult {
    let (assignments, courses) = join(
        api::fetch_collection::<AssignmentRecord>(source, ASSIGNMENTS_PATH),
        api::fetch_collection::<CourseRecord>(source, COURSES_PATH),
    )
    .await;
    CycleResult {
        assignments,
        courses,
    }
}

pub struct RosterFetcher {
    source: Arc<dyn DataSource>,
    sink: Arc<dyn NotificationSink>,
    issued: u64,
    snapshot: Snapshot,
}

impl RosterFetcher {
    pub fn new(source: Arc<dyn DataSource>, sink: Arc<dyn NotificationSink>) -> Self {
        Self {
            source,
            sink,
            issued: 0,
            snapshot: Snapshot::default(),
        }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn source(&self) -> Arc<dyn DataSource> {
        Arc::clone(&self.source)
    }

    /// Start a cycle: marks both collections loading and supersedes any
    /// cycle still in flight.
    pub fn begin(&mut self) -> CycleTicket {
        self.issued += 1;
        self.snapshot.assignments.is_loading = true;
        self.snapshot.courses.is_loading = true;
        debug!(cycle = self.issued, "fetch cycle started");
        CycleTicket(self.issued)
    }

    /// Drop whatever is in flight; its results will be ignored.
    pub fn invalidate(&mut self) {
        self.issued += 1;
        self.snapshot.assignments.is_loading = false;
        self.snapshot.courses.is_loading = false;
    }

    /// Apply a cycle's results. Returns `false` when the ticket is stale.
    /// Each error is forwarded to the sink once.
    pub fn commit(&mut self, ticket: CycleTicket, result: CycleResult) -> bool {
        if ticket.0 != self.issued {
            debug!(cycle = ticket.0, current = self.issued, "dropping stale fetch result");
            return false;
        }

        let mut errors = Vec::new();
        errors.extend(self.snapshot.assignments.settle(result.assignments));
        errors.extend(self.snapshot.courses.settle(result.courses));
        self.snapshot.cycle = ticket.0;

        for err in errors {
            warn!(path = err.path(), error = %err, "collection fetch failed");
            self.sink.notify(Notification::danger(err.to_string()));
        }
        info!(
            cycle = ticket.0,
            assignments = self.snapshot.assignments.data.as_ref().map(|d| d.len()),
            courses = self.snapshot.courses.data.as_ref().map(|d| d.len()),
            "fetch cycle committed"
        );
        true
    }

    /// Run one full cycle against the data source.
    pub async fn refetch(&mut self) -> bool {
        let ticket = self.begin();
        let source = Arc::clone(&self.source);
        let result = load_both(source.as_ref()).await;
        self.commit(ticket, result)
    }
}
