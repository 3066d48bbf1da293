use std::sync::Arc;

use tracing::debug;

use crate::model::{AssignmentRecord, AssignmentViewModel, CourseRecord, RosterRow};
use crate::placeholder::PlaceholderSource;

/// Join assignments to their courses and append the placeholder rows.
///
/// Returns an empty roster unless both collections are present. Real rows
/// keep fetch order and always precede the placeholders.
pub fn reconcile(
    assignments: Option<&[AssignmentRecord]>,
    courses: Option<&[CourseRecord]>,
    placeholders: &mut dyn PlaceholderSource,
) -> Vec<RosterRow> {
    let (Some(assignments), Some(courses)) = (assignments, courses) else {
        return Vec::new();
    };

    let mut rows: Vec<RosterRow> = assignments
        .iter()
        .map(|assignment| {
            let course = courses.iter().find(|c| c.id == assignment.course_id);
            AssignmentViewModel::from_record(assignment, course.map(|c| c.name.as_str()))
        })
        .collect();
    rows.extend(placeholders.placeholders());
    rows
}

/// Caches the last [`reconcile`] output, keyed by the identity of the two
/// input collections. A new fetch cycle hands in new `Arc`s and so forces a
/// recompute.
#[derive(Debug, Default)]
pub struct ReconcileMemo {
    key: Option<(Arc<Vec<AssignmentRecord>>, Arc<Vec<CourseRecord>>)>,
    rows: Arc<Vec<RosterRow>>,
}

impl ReconcileMemo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(
        &mut self,
        assignments: Option<&Arc<Vec<AssignmentRecord>>>,
        courses: Option<&Arc<Vec<CourseRecord>>>,
        placeholders: &mut dyn PlaceholderSource,
    ) -> Arc<Vec<RosterRow>> {
        let (Some(assignments), Some(courses)) = (assignments, courses) else {
            self.key = None;
            self.rows = Arc::new(Vec::new());
            return Arc::clone(&self.rows);
        };

        // Holding the keyed Arcs keeps their addresses from being reused.
        let fresh = match &self.key {
            Some((a, c)) => Arc::ptr_eq(a, assignments) && Arc::ptr_eq(c, courses),
            None => false,
        };
        if !fresh {
            let rows = reconcile(Some(assignments.as_slice()), Some(courses.as_slice()), placeholders);
            debug!(rows = rows.len(), "roster reconciled");
            self.rows = Arc::new(rows);
            self.key = Some((Arc::clone(assignments), Arc::clone(courses)));
        }
        Arc::clone(&self.rows)
    }

    pub fn clear(&mut self) {
        self.key = None;
        self.rows = Arc::new(Vec::new());
    }
}
