//! Asynchronous actions: one API call, then mutations for the outcome.
//!
//! Every failure is committed through [`Mutation::SetError`] before it is
//! returned, so callers that only watch the getters see it too.

use tracing::{debug, warn};

use crate::domain::ports::{ApiError, KanbanApi, StatePersistence};
use crate::domain::{
    Avatar, ErrorState, LoginCredentials, LoginValidationError, RegistrationForm,
    RegistrationValidationError, column_titles,
};

use super::{Mutation, Store};

/// Why an action did not complete.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ActionError {
    /// The API call failed.
    #[error(transparent)]
    Api(#[from] ApiError),
    /// Login inputs were rejected before any request was sent.
    #[error(transparent)]
    InvalidCredentials(#[from] LoginValidationError),
    /// Registration inputs were rejected before any request was sent.
    #[error(transparent)]
    InvalidRegistration(#[from] RegistrationValidationError),
    /// The action needs a signed-in user id.
    #[error("sign in before loading projects")]
    NotSignedIn,
}

impl From<&ActionError> for ErrorState {
    fn from(value: &ActionError) -> Self {
        match value {
            ActionError::Api(error) => Self::from(error),
            ActionError::InvalidCredentials(error) => Self::from(error),
            ActionError::InvalidRegistration(error) => Self::from(error),
            ActionError::NotSignedIn => Self::general(value.to_string()),
        }
    }
}

impl<A, P> Store<A, P>
where
    A: KanbanApi,
    P: StatePersistence,
{
    /// Sign in with a username and password.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError`] when the inputs are blank or the server
    /// refuses the credentials; the error is also committed to the state.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), ActionError> {
        let credentials = LoginCredentials::try_from_parts(username, password)
            .map_err(|error| self.fail(error.into()))?;

        debug!(username = credentials.username(), "logging in");
        let payload = self
            .api
            .login(&credentials)
            .await
            .map_err(|error| self.fail(error.into()))?;

        self.commit(Mutation::SetUser(payload));
        self.commit(Mutation::ClearErrors);
        Ok(())
    }

    /// Create an account and sign it in.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError`] when the inputs are blank or the server
    /// rejects the registration; the error is also committed to the state.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
        avatar: Option<Avatar>,
    ) -> Result<(), ActionError> {
        let form = RegistrationForm::try_new(username, email, password, avatar)
            .map_err(|error| self.fail(error.into()))?;

        debug!(
            username = form.username(),
            with_avatar = form.avatar().is_some(),
            "registering"
        );
        let payload = self
            .api
            .register(&form)
            .await
            .map_err(|error| self.fail(error.into()))?;

        self.commit(Mutation::SetUser(payload));
        self.commit(Mutation::ClearErrors);
        Ok(())
    }

    /// Sign out.
    ///
    /// The client-side session ends whatever the server answers: on failure
    /// the error is committed first, then the session and project data are
    /// purged.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::Api`] when the server call failed.
    pub async fn logout(&self) -> Result<(), ActionError> {
        let session = self.session();
        let outcome = match self.api.logout(&session).await {
            Ok(()) => {
                self.commit(Mutation::ClearErrors);
                Ok(())
            }
            Err(error) => Err(self.fail(error.into())),
        };
        self.commit(Mutation::Logout);
        outcome
    }

    /// Load the projects created by the signed-in user.
    ///
    /// Success clears any error left by an earlier action.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::NotSignedIn`] without a user id, or
    /// [`ActionError::Api`] when the request fails.
    pub async fn fetch_projects(&self) -> Result<(), ActionError> {
        let session = self.session();
        let Some(user_id) = session.user_id() else {
            return Err(self.fail(ActionError::NotSignedIn));
        };

        debug!(user_id, "fetching projects");
        let page = self
            .api
            .list_projects(&session, user_id)
            .await
            .map_err(|error| self.fail(error.into()))?;

        self.commit(Mutation::SetProjects(page));
        self.commit(Mutation::ClearErrors);
        Ok(())
    }

    /// Load one project and derive its column titles.
    ///
    /// Success clears any error left by an earlier action.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::Api`] when the request fails; the previous
    /// selection is left untouched in that case.
    pub async fn fetch_project_detail(&self, id: i64) -> Result<(), ActionError> {
        let session = self.session();

        debug!(project_id = id, "fetching project detail");
        let detail = self
            .api
            .project_detail(&session, id)
            .await
            .map_err(|error| self.fail(error.into()))?;

        self.commit(Mutation::SetProjectDetail(detail));
        self.derive_column_titles();
        self.commit(Mutation::ClearErrors);
        Ok(())
    }

    /// Drop the selected project and its column titles.
    ///
    /// Navigating away also clears any error left by an earlier action.
    pub fn clear_selected_project_detail(&self) {
        self.commit(Mutation::ClearProjectDetail);
        self.derive_column_titles();
        self.commit(Mutation::ClearErrors);
    }

    /// Recompute the column titles from the selected project.
    ///
    /// Without a selection the titles become empty. The titles are read and
    /// written under one lock, so they always match the detail they were
    /// derived from.
    pub fn derive_column_titles(&self) {
        let mut state = self.lock();
        let titles = state
            .project_detail
            .as_ref()
            .map(column_titles)
            .unwrap_or_default();
        self.commit_locked(&mut state, Mutation::SetColumnTitles(titles));
    }

    fn fail(&self, error: ActionError) -> ActionError {
        warn!(%error, "action failed");
        self.commit(Mutation::SetError(ErrorState::from(&error)));
        error
    }
}
