//! The single mutable aggregate held by the store.

use serde::{Deserialize, Serialize};

use crate::domain::{ErrorState, ProjectDetail, ProjectSummary, Session};

/// Client state.
///
/// Only mutations write to it; getters read from it. The whole record is
/// serialisable so the persistence plugin can snapshot it after every
/// mutation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct State {
    /// Signed-in identity.
    pub session: Session,
    /// Last error payload, empty when no error is active.
    pub error_state: ErrorState,
    /// Projects of the signed-in user, in server order.
    pub project_list: Vec<ProjectSummary>,
    /// Selected project, `None` when nothing is selected.
    pub project_detail: Option<ProjectDetail>,
    /// Titles of the selected project's columns, in board order.
    pub column_titles: Vec<String>,
}
