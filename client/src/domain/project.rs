//! Project records mirrored from the server.
//!
//! Only the fields the client reads are typed. Everything else lands in the
//! `extra` map of each record so a round trip through the store never drops
//! server data.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Entry of the project list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSummary {
    /// Server primary key.
    #[serde(default)]
    pub pk: Option<i64>,
    /// Project name.
    #[serde(default)]
    pub name: String,
    /// Id of the creating user.
    #[serde(default)]
    pub created_by: Option<i64>,
    /// Short project key, e.g. `WEB`.
    #[serde(default)]
    pub key: Option<String>,
    /// Board flavour (`kanban` or `scrum`).
    #[serde(default)]
    pub board_type: Option<String>,
    /// Server fields the client does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Paginated project list envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectPage {
    /// Total number of matching projects.
    #[serde(default)]
    pub count: Option<u64>,
    /// Link to the next page.
    #[serde(default)]
    pub next: Option<String>,
    /// Link to the previous page.
    #[serde(default)]
    pub previous: Option<String>,
    /// Projects on this page, in server order.
    #[serde(default)]
    pub results: Vec<ProjectSummary>,
}

/// Sprint attached to a scrum project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sprint {
    /// Server primary key.
    #[serde(default)]
    pub pk: Option<i64>,
    /// Sprint name.
    #[serde(default)]
    pub name: String,
    /// Whether the sprint is finished.
    #[serde(default)]
    pub is_closed: bool,
    /// Server fields the client does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Work item shown on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Server primary key.
    #[serde(default)]
    pub pk: Option<i64>,
    /// Task title.
    #[serde(default)]
    pub title: String,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Priority label (`Low`, `Medium`, `High`).
    #[serde(default)]
    pub priority: Option<String>,
    /// Task type (`BUG`, `SUBTASK`, `STORY`).
    #[serde(default)]
    pub task_type: Option<String>,
    /// Id of the assignee.
    #[serde(default)]
    pub assigned_to: Option<i64>,
    /// Server fields the client does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Board column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Server primary key.
    #[serde(default)]
    pub pk: Option<i64>,
    /// Column heading.
    #[serde(default)]
    pub title: String,
    /// Position of the column on the board.
    #[serde(default)]
    pub number_in_board: Option<u32>,
    /// Whether the board should display the column.
    #[serde(default)]
    pub should_show: Option<bool>,
    /// Tasks in the column.
    #[serde(default)]
    pub tasks: Vec<Task>,
    /// Server fields the client does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Full record of the selected project.
///
/// A detail without `columns` decodes with an empty column list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectDetail {
    /// Server primary key.
    #[serde(default)]
    pub pk: Option<i64>,
    /// Project name.
    #[serde(default)]
    pub name: Option<String>,
    /// Id of the creating user.
    #[serde(default)]
    pub created_by: Option<i64>,
    /// Short project key.
    #[serde(default)]
    pub key: Option<String>,
    /// Board flavour.
    #[serde(default)]
    pub board_type: Option<String>,
    /// Sprints of a scrum project.
    #[serde(default)]
    pub sprints: Vec<Sprint>,
    /// Board columns in display order.
    #[serde(default)]
    pub columns: Vec<Column>,
    /// Server fields the client does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Project the column titles out of a detail, keeping column order.
///
/// # Examples
/// ```
/// use kanban_client::domain::{ProjectDetail, column_titles};
/// use serde_json::json;
///
/// let detail: ProjectDetail = serde_json::from_value(json!({
///     "columns": [{ "title": "To Do", "tasks": [] }, { "title": "Done", "tasks": [] }]
/// }))
/// .unwrap();
/// assert_eq!(column_titles(&detail), ["To Do", "Done"]);
/// ```
pub fn column_titles(detail: &ProjectDetail) -> Vec<String> {
    detail
        .columns
        .iter()
        .map(|column| column.title.clone())
        .collect()
}
