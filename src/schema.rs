//! Column schema for the roster, including the row-actions column.
//!
//! The actions column is built from an ordered list of [`ActionDescriptor`]s
//! of any length. Each rendered [`Affordance`] calls back into its own
//! descriptor's handler with the row it was rendered for.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::sync::Arc;

use crate::model::RosterRow;

/// Column ids owned by the builder; base columns using them are dropped.
pub const RESERVED_COLUMN_IDS: [&str; 3] = ["edit", "delete", "actions"];
pub const ACTIONS_COLUMN_ID: &str = "actions";
pub const ID_COLUMN_ID: &str = "id";

pub type ActionHandler = Arc<dyn Fn(&RosterRow) -> anyhow::Result<()> + Send + Sync>;

/// A named row-level operation.
#[derive(Clone)]
pub struct ActionDescriptor {
    pub id: String,
    pub label: String,
    pub icon: String,
    pub variant: Option<String>,
    handler: ActionHandler,
}

impl fmt::Debug for ActionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionDescriptor")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("icon", &self.icon)
            .field("variant", &self.variant)
            .finish_non_exhaustive()
    }
}

impl ActionDescriptor {
    pub fn new<F>(id: impl Into<String>, label: impl Into<String>, icon: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&RosterRow) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            label: label.into(),
            icon: icon.into(),
            variant: None,
            handler: Arc::new(handler),
        }
    }

    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = Some(variant.into());
        self
    }

    pub fn edit<F>(handler: F) -> Self
    where
        F: Fn(&RosterRow) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Self::new("edit", "Edit", "pencil-fill", handler).with_variant("outline-warning")
    }

    pub fn delete<F>(handler: F) -> Self
    where
        F: Fn(&RosterRow) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Self::new("delete", "Delete", "trash-fill", handler).with_variant("outline-danger")
    }

    pub fn invoke(&self, row: &RosterRow) -> anyhow::Result<()> {
        (self.handler)(row)
    }
}

/// Intrinsic record fields that can back a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Id,
    Name,
    CourseName,
    Description,
    CreatedAt,
    UpdatedAt,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Id,
        Field::Name,
        Field::CourseName,
        Field::Description,
        Field::CreatedAt,
        Field::UpdatedAt,
    ];

    pub fn column_id(&self) -> &'static str {
        match self {
            Field::Id => ID_COLUMN_ID,
            Field::Name => "name",
            Field::CourseName => "courseName",
            Field::Description => "description",
            Field::CreatedAt => "created_at",
            Field::UpdatedAt => "updated_at",
        }
    }

    pub fn header(&self) -> &'static str {
        match self {
            Field::Id => "Id",
            Field::Name => "Name",
            Field::CourseName => "Course Name",
            Field::Description => "Description",
            Field::CreatedAt => "Creation Date",
            Field::UpdatedAt => "Updated Date",
        }
    }

    pub fn value(&self, row: &RosterRow) -> String {
        match self {
            Field::Id => row.id.to_string(),
            Field::Name => row.name.clone(),
            Field::CourseName => row.course_name.clone(),
            Field::Description => row.description.clone(),
            Field::CreatedAt => row.created_at.clone(),
            Field::UpdatedAt => row.updated_at.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum ColumnKind {
    Field(Field),
    Actions(Arc<[ActionDescriptor]>),
}

#[derive(Debug, Clone)]
pub struct ColumnSchema {
    pub id: String,
    pub header: String,
    pub kind: ColumnKind,
}

impl ColumnSchema {
    pub fn field(field: Field) -> Self {
        Self {
            id: field.column_id().to_string(),
            header: field.header().to_string(),
            kind: ColumnKind::Field(field),
        }
    }

    pub fn is_actions(&self) -> bool {
        matches!(self.kind, ColumnKind::Actions(_))
    }

    pub fn render_cell(&self, row: &RosterRow) -> Cell {
        match &self.kind {
            ColumnKind::Field(field) => Cell::Text(field.value(row)),
            ColumnKind::Actions(actions) => Cell::Actions(
                actions
                    .iter()
                    .map(|action| Affordance {
                        action: action.clone(),
                        row: row.clone(),
                    })
                    .collect(),
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Cell {
    Text(String),
    Actions(Vec<Affordance>),
}

/// One clickable control in the actions column, bound to a row.
#[derive(Debug, Clone)]
pub struct Affordance {
    action: ActionDescriptor,
    row: RosterRow,
}

impl Affordance {
    /// Accessible name / tooltip.
    pub fn label(&self) -> &str {
        &self.action.label
    }

    pub fn icon(&self) -> &str {
        &self.action.icon
    }

    pub fn variant(&self) -> Option<&str> {
        self.action.variant.as_deref()
    }

    pub fn action_id(&self) -> &str {
        &self.action.id
    }

    pub fn row(&self) -> &RosterRow {
        &self.row
    }

    /// Run the handler. Its error is returned as-is.
    pub fn activate(&self) -> anyhow::Result<()> {
        self.action.invoke(&self.row)
    }
}

/// Field columns for every intrinsic record field.
pub fn base_columns() -> Vec<ColumnSchema> {
    Field::ALL.iter().copied().map(ColumnSchema::field).collect()
}

/// Build the roster schema: the base columns minus reserved and repeated
/// ids, followed by a single actions column listing `actions` in order.
pub fn build_schema(base: &[ColumnSchema], actions: Vec<ActionDescriptor>) -> Vec<ColumnSchema> {
    let mut seen = HashSet::new();
    let mut columns: Vec<ColumnSchema> = base
        .iter()
        .filter(|c| !c.is_actions() && !RESERVED_COLUMN_IDS.contains(&c.id.as_str()))
        .filter(|c| seen.insert(c.id.clone()))
        .cloned()
        .collect();
    columns.push(ColumnSchema {
        id: ACTIONS_COLUMN_ID.to_string(),
        header: "Actions".to_string(),
        kind: ColumnKind::Actions(actions.into()),
    });
    columns
}

/// Visibility map handed to the view surface; the identity column is hidden.
pub fn column_visibility(columns: &[ColumnSchema]) -> BTreeMap<String, bool> {
    columns
        .iter()
        .map(|c| (c.id.clone(), c.id != ID_COLUMN_ID))
        .collect()
}
