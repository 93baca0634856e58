//! The closed set of state transitions.
//!
//! Mutations are synchronous and total: every variant carries a payload of
//! the right shape, so applying one cannot fail.

use crate::domain::{AuthPayload, ErrorState, ProjectDetail, ProjectPage, Session};

use super::State;

/// One named state transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    /// Overwrite the four session fields from an authentication answer.
    SetUser(AuthPayload),
    /// Clear the session and every piece of per-user data.
    Logout,
    /// Replace the error state wholesale.
    SetError(ErrorState),
    /// Reset the error state to empty.
    ClearErrors,
    /// Replace the project list with the page's results.
    SetProjects(ProjectPage),
    /// Replace the selected project.
    SetProjectDetail(ProjectDetail),
    /// Drop the selected project.
    ClearProjectDetail,
    /// Replace the kanban column titles.
    SetColumnTitles(Vec<String>),
}

impl Mutation {
    /// Stable name used in logs.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SetUser(_) => "setUser",
            Self::Logout => "logout",
            Self::SetError(_) => "setError",
            Self::ClearErrors => "clearErrors",
            Self::SetProjects(_) => "setProjects",
            Self::SetProjectDetail(_) => "setProjectDetail",
            Self::ClearProjectDetail => "clearProjectDetail",
            Self::SetColumnTitles(_) => "setColumnTitles",
        }
    }

    /// Apply the transition to `state`.
    pub fn apply(self, state: &mut State) {
        match self {
            Self::SetUser(payload) => state.session = Session::from_payload(payload),
            Self::Logout => {
                state.session = Session::default();
                state.project_list.clear();
                state.project_detail = None;
                state.column_titles.clear();
            }
            Self::SetError(errors) => state.error_state = errors,
            Self::ClearErrors => state.error_state = ErrorState::default(),
            Self::SetProjects(page) => state.project_list = page.results,
            Self::SetProjectDetail(detail) => state.project_detail = Some(detail),
            Self::ClearProjectDetail => state.project_detail = None,
            Self::SetColumnTitles(titles) => state.column_titles = titles,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{AuthUser, ProjectSummary};
    use rstest::{fixture, rstest};
    use serde_json::{Map, json};

    fn payload(token: &str, pk: i64, email: &str, username: &str) -> AuthPayload {
        AuthPayload {
            token: token.to_owned(),
            user: Some(AuthUser {
                pk,
                email: Some(email.to_owned()),
                username: Some(username.to_owned()),
            }),
        }
    }

    fn summary(pk: i64, name: &str) -> ProjectSummary {
        ProjectSummary {
            pk: Some(pk),
            name: name.to_owned(),
            created_by: Some(1),
            key: None,
            board_type: Some("kanban".to_owned()),
            extra: Map::new(),
        }
    }

    #[fixture]
    fn signed_in() -> State {
        let mut state = State::default();
        Mutation::SetUser(payload("test", 1, "user@mail.com", "user")).apply(&mut state);
        Mutation::SetProjects(ProjectPage {
            results: vec![summary(1, "Web")],
            ..ProjectPage::default()
        })
        .apply(&mut state);
        Mutation::SetProjectDetail(ProjectDetail::default()).apply(&mut state);
        Mutation::SetColumnTitles(vec!["To Do".to_owned()]).apply(&mut state);
        state
    }

    #[rstest]
    fn logout_clears_session_and_user_data(mut signed_in: State) {
        Mutation::Logout.apply(&mut signed_in);

        assert_eq!(signed_in.session, Session::default());
        assert!(signed_in.session.token().is_none());
        assert!(signed_in.session.user_id().is_none());
        assert!(signed_in.session.email().is_none());
        assert!(signed_in.session.username().is_none());
        assert!(signed_in.project_list.is_empty());
        assert!(signed_in.project_detail.is_none());
        assert!(signed_in.column_titles.is_empty());
    }

    #[rstest]
    fn logout_is_idempotent(mut signed_in: State) {
        Mutation::Logout.apply(&mut signed_in);
        let once = signed_in.clone();
        Mutation::Logout.apply(&mut signed_in);
        assert_eq!(signed_in, once);
    }

    #[test]
    fn set_user_then_logout_returns_to_defaults() {
        let mut state = State::default();
        Mutation::SetUser(payload("t", 3, "e@x.io", "eve")).apply(&mut state);
        Mutation::Logout.apply(&mut state);
        assert_eq!(state, State::default());
    }

    #[test]
    fn set_user_overwrites_every_session_field() {
        let mut state = State::default();
        Mutation::SetUser(payload("x", 1, "old@mail.com", "old")).apply(&mut state);

        Mutation::SetUser(payload("y", 2, "e", "u")).apply(&mut state);

        assert_eq!(state.session.token(), Some("y"));
        assert_eq!(state.session.user_id(), Some(2));
        assert_eq!(state.session.email(), Some("e"));
        assert_eq!(state.session.username(), Some("u"));
    }

    #[test]
    fn set_user_without_user_clears_stale_identity() {
        let mut state = State::default();
        Mutation::SetUser(payload("x", 1, "old@mail.com", "old")).apply(&mut state);

        Mutation::SetUser(AuthPayload {
            token: "y".to_owned(),
            user: None,
        })
        .apply(&mut state);

        assert_eq!(state.session.token(), Some("y"));
        assert!(state.session.user_id().is_none());
        assert!(state.session.username().is_none());
    }

    #[rstest]
    #[case::empty(Vec::new())]
    #[case::several(vec![summary(2, "Mobile"), summary(1, "Web")])]
    fn set_projects_replaces_the_list(#[case] results: Vec<ProjectSummary>) {
        let mut state = State::default();
        state.project_list = vec![summary(9, "Stale")];

        Mutation::SetProjects(ProjectPage {
            results: results.clone(),
            ..ProjectPage::default()
        })
        .apply(&mut state);

        assert_eq!(state.project_list, results);
    }

    #[test]
    fn set_and_clear_errors() {
        let mut state = State::default();
        let errors = ErrorState::from_body(&json!({ "password": ["bad"] }));

        Mutation::SetError(errors.clone()).apply(&mut state);
        assert_eq!(state.error_state, errors);

        Mutation::ClearErrors.apply(&mut state);
        assert!(state.error_state.is_empty());
    }

    #[rstest]
    fn clear_project_detail_drops_selection(mut signed_in: State) {
        Mutation::ClearProjectDetail.apply(&mut signed_in);
        assert!(signed_in.project_detail.is_none());
        assert_eq!(signed_in.project_list.len(), 1);
    }

    #[test]
    fn names_are_stable() {
        assert_eq!(Mutation::Logout.name(), "logout");
        assert_eq!(Mutation::SetColumnTitles(Vec::new()).name(), "setColumnTitles");
    }
}
