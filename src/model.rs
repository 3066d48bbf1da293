use serde::{Deserialize, Serialize};

/// Display value used when an assignment's course cannot be resolved.
pub const UNKNOWN_COURSE: &str = "Unknown";

/// Assignment as returned by `GET /assignments`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssignmentRecord {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub course_id: i64,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// Course as returned by `GET /courses`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CourseRecord {
    pub id: i64,
    pub name: String,
}

/// Assignment joined with the name of its owning course.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssignmentViewModel {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub course_id: i64,
    pub created_at: String,
    pub updated_at: String,
    #[serde(rename = "courseName")]
    pub course_name: String,
}

/// Synthetic row; same shape as a real one so the roster never has to tell
/// them apart.
pub type PlaceholderViewModel = AssignmentViewModel;

/// One row of the rendered roster.
pub type RosterRow = AssignmentViewModel;

impl AssignmentViewModel {
    /// Attach a course name to a fetched record. An empty name resolves to
    /// [`UNKNOWN_COURSE`] so `course_name` is never blank.
    pub fn from_record(record: &AssignmentRecord, course_name: Option<&str>) -> Self {
        let course_name = match course_name {
            Some(name) if !name.trim().is_empty() => name.to_string(),
            _ => UNKNOWN_COURSE.to_string(),
        };
        Self {
            id: record.id,
            name: record.name.clone(),
            description: record.description.clone(),
            course_id: record.course_id,
            created_at: record.created_at.clone(),
            updated_at: record.updated_at.clone(),
            course_name,
        }
    }
}
