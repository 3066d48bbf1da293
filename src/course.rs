//! Assignment listing nested under a single course. There is no backend
//! read for it yet; every row is a placeholder.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::info;

use crate::model::RosterRow;
use crate::page::RosterView;
use crate::placeholder::PlaceholderSynthesizer;
use crate::schema::{base_columns, build_schema, ActionDescriptor, ColumnSchema};

#[derive(Debug, Clone)]
pub struct CourseAssignments {
    pub course_id: i64,
    pub course_name: String,
    rows: Arc<Vec<RosterRow>>,
    columns: Arc<Vec<ColumnSchema>>,
}

/// Edit/delete handlers that only log the row.
pub fn logging_actions() -> Vec<ActionDescriptor> {
    vec![
        ActionDescriptor::edit(|row: &RosterRow| {
            info!(id = row.id, name = %row.name, "edit assignment");
            Ok(())
        }),
        ActionDescriptor::delete(|row: &RosterRow| {
            info!(id = row.id, name = %row.name, "delete assignment");
            Ok(())
        }),
    ]
}

impl CourseAssignments {
    pub fn new<R: Rng + ?Sized>(
        course_id: i64,
        course_name: impl Into<String>,
        synth: &PlaceholderSynthesizer,
        rng: &mut R,
        now: DateTime<Utc>,
        actions: Vec<ActionDescriptor>,
    ) -> Self {
        let course_name = course_name.into();
        let rows = synth.course_rows(rng, now, course_id, &course_name);
        Self {
            course_id,
            course_name,
            rows: Arc::new(rows),
            columns: Arc::new(build_schema(&base_columns(), actions)),
        }
    }

    pub fn heading(&self) -> String {
        format!("Assignments for {}", self.course_name)
    }

    pub fn rows(&self) -> &[RosterRow] {
        &self.rows
    }

    /// Nested listing shows every column, identity included.
    pub fn view(&self) -> RosterView {
        let column_visibility: BTreeMap<String, bool> =
            self.columns.iter().map(|c| (c.id.clone(), true)).collect();
        RosterView {
            data: Arc::clone(&self.rows),
            columns: Arc::clone(&self.columns),
            column_visibility,
        }
    }
}
