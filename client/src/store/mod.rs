//! Client state container.
//!
//! Purpose: mediate between callers and the project server. Callers run
//! actions; actions call the [`KanbanApi`] port and commit [`Mutation`]s;
//! getters derive view values from the resulting [`State`].
//!
//! The store is shared by reference. The state lock is held only while a
//! mutation is applied and persisted, never across an await, so actions on
//! one store may run concurrently and the last response to settle wins.

mod actions;
pub mod getters;
mod mutations;
mod state;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};

use crate::domain::ports::{KanbanApi, StatePersistence};
use crate::domain::{ErrorState, ProjectDetail, ProjectSummary, Session};

pub use actions::ActionError;
pub use getters::{LoginFormErrors, RegisterFormErrors};
pub use mutations::Mutation;
pub use state::State;

/// State container wired to an API port and a persistence port.
pub struct Store<A, P> {
    api: Arc<A>,
    persistence: Arc<P>,
    state: Mutex<State>,
}

impl<A, P> Store<A, P>
where
    A: KanbanApi,
    P: StatePersistence,
{
    /// Create a store with default state.
    pub fn new(api: Arc<A>, persistence: Arc<P>) -> Self {
        Self::with_state(api, persistence, State::default())
    }

    /// Create a store seeded with `state`.
    pub fn with_state(api: Arc<A>, persistence: Arc<P>, state: State) -> Self {
        Self {
            api,
            persistence,
            state: Mutex::new(state),
        }
    }

    /// Create a store from the last persisted snapshot.
    ///
    /// A missing snapshot starts from defaults. An unreadable one is logged
    /// and also starts from defaults, since a stale session is recoverable by
    /// signing in again.
    pub fn restore(api: Arc<A>, persistence: Arc<P>) -> Self {
        let state = match persistence.load() {
            Ok(Some(state)) => {
                debug!(
                    authorized = state.session.is_authenticated(),
                    "restored persisted state"
                );
                state
            }
            Ok(None) => State::default(),
            Err(error) => {
                warn!(%error, "discarding unreadable state snapshot");
                State::default()
            }
        };
        Self::with_state(api, persistence, state)
    }

    /// Apply `mutation` and persist the resulting state.
    ///
    /// A failed snapshot write is logged and does not undo the mutation.
    pub fn commit(&self, mutation: Mutation) {
        let mut state = self.lock();
        self.commit_locked(&mut state, mutation);
    }

    /// Apply and persist `mutation` against an already locked state.
    fn commit_locked(&self, state: &mut State, mutation: Mutation) {
        let name = mutation.name();
        mutation.apply(state);
        debug!(mutation = name, "committed mutation");
        if let Err(error) = self.persistence.save(state) {
            warn!(mutation = name, %error, "failed to persist state snapshot");
        }
    }

    /// Copy of the current state.
    pub fn state(&self) -> State {
        self.lock().clone()
    }

    /// Copy of the current session.
    pub fn session(&self) -> Session {
        self.lock().session.clone()
    }

    /// Current error state.
    pub fn error_state(&self) -> ErrorState {
        self.lock().error_state.clone()
    }

    /// Selected project, if any.
    pub fn project_detail(&self) -> Option<ProjectDetail> {
        self.lock().project_detail.clone()
    }

    /// Column titles of the selected project.
    pub fn column_titles(&self) -> Vec<String> {
        self.lock().column_titles.clone()
    }

    /// See [`getters::is_authorized`].
    pub fn is_authorized(&self) -> bool {
        getters::is_authorized(&self.lock())
    }

    /// See [`getters::login_form_errors`].
    pub fn login_form_errors(&self) -> LoginFormErrors {
        getters::login_form_errors(&self.lock())
    }

    /// See [`getters::register_form_errors`].
    pub fn register_form_errors(&self) -> RegisterFormErrors {
        getters::register_form_errors(&self.lock())
    }

    /// See [`getters::projects`].
    pub fn projects(&self) -> Vec<ProjectSummary> {
        getters::projects(&self.lock()).to_vec()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // Mutations cannot panic half-way, so a poisoned lock still guards a
        // consistent state.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
