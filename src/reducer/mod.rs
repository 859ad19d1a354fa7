//! Composition of descriptors into a single reducer.
//!
//! ```text
//! [ActionDesc, SimpleActionDesc, ...] ──→ dispatch table ──→ Reducer
//!                                          type → handler
//! ```
//!
//! The dispatch table is built once and only read afterwards, so one
//! [`Reducer`] can be shared and invoked from many threads.

mod builder;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::action::{Action, AnyActionDesc, Dispatch, Handler, Rejected};
use crate::config::ComposeOptions;
use crate::error::ActionError;

pub use builder::ReducerBuilder;

/// Folds `(previous state, message)` into the next state.
///
/// Owns no mutable state: equal inputs give equal outputs as long as the
/// registered transition functions are pure.
pub struct Reducer<S> {
    table: HashMap<Arc<str>, Handler<S>>,
    initial_state: S,
}

impl<S> Reducer<S> {
    /// Builds the dispatch table in order. A later descriptor with the
    /// same `type` replaces the earlier one.
    pub(crate) fn from_descs<I>(descs: I, initial_state: S) -> Self
    where
        I: IntoIterator,
        I::Item: Into<AnyActionDesc<S>>,
    {
        let mut table = HashMap::new();
        for desc in descs {
            let (action_type, handler) = desc.into().into_entry();
            if table.insert(Arc::clone(&action_type), handler).is_some() {
                tracing::debug!("Action type '{}' registered again, last one wins", action_type);
            }
        }
        tracing::debug!("Reducer composed with {} action types", table.len());

        Self {
            table,
            initial_state,
        }
    }

    /// Whether a message with this `type` reaches a transition function.
    pub fn handles(&self, action_type: &str) -> bool {
        self.table.contains_key(action_type)
    }

    /// Registered types, in no particular order.
    pub fn action_types(&self) -> impl Iterator<Item = &str> {
        self.table.keys().map(|action_type| &**action_type)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn initial_state(&self) -> &S {
        &self.initial_state
    }

    fn dispatch<'a, M: Dispatch<'a>>(&self, state: S, message: M) -> Result<S, Rejected<S>> {
        let Some(handler) = self.table.get(message.action_type()) else {
            tracing::trace!("Ignoring action '{}'", message.action_type());
            return Ok(state);
        };

        tracing::trace!("Dispatching action '{}'", message.action_type());
        match handler {
            Handler::Simple(handle) => Ok(handle(state)),
            Handler::WithPayload(handle) => handle(state, message.into_payload()),
        }
    }
}

impl<S: Clone> Reducer<S> {
    /// Computes the next state.
    ///
    /// Accepts typed messages from a descriptor's `create` (the payload is
    /// moved into the handler unchanged) as well as JSON [`Action`]s.
    ///
    /// - `prev` of `None` is replaced by the initial state.
    /// - Unknown types return the state unchanged.
    /// - A payload the matched descriptor cannot take is logged and the
    ///   state is returned unchanged.
    pub fn reduce<'a, M: Dispatch<'a>>(&self, prev: Option<S>, message: M) -> S {
        let state = prev.unwrap_or_else(|| self.initial_state.clone());
        match self.dispatch(state, message) {
            Ok(next) => next,
            Err(rejected) => {
                tracing::warn!("Action ignored: {}", rejected.error);
                rejected.state
            }
        }
    }

    /// Like [`Reducer::reduce`], but reports a payload the matched
    /// descriptor cannot take.
    pub fn try_reduce<'a, M: Dispatch<'a>>(
        &self,
        prev: Option<S>,
        message: M,
    ) -> Result<S, ActionError> {
        let state = prev.unwrap_or_else(|| self.initial_state.clone());
        self.dispatch(state, message).map_err(|rejected| rejected.error)
    }

    /// Plain `(Option<S>, &Action) -> S` closure for hosts expecting a function.
    pub fn into_fn(self) -> impl Fn(Option<S>, &Action) -> S {
        move |prev: Option<S>, action: &Action| self.reduce(prev, action)
    }
}

impl<S: fmt::Debug> fmt::Debug for Reducer<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut action_types: Vec<&str> = self.action_types().collect();
        action_types.sort_unstable();
        f.debug_struct("Reducer")
            .field("action_types", &action_types)
            .field("initial_state", &self.initial_state)
            .finish()
    }
}

/// Composes descriptors into a reducer.
///
/// Duplicate types are resolved last-write-wins and empty types are
/// accepted. Use [`try_create_reducer`] to reject them instead.
pub fn create_reducer<S, I>(descs: I, initial_state: S) -> Reducer<S>
where
    I: IntoIterator,
    I::Item: Into<AnyActionDesc<S>>,
{
    Reducer::from_descs(descs, initial_state)
}

/// Composes descriptors, enforcing `options`.
pub fn try_create_reducer<S, I>(
    descs: I,
    initial_state: S,
    options: &ComposeOptions,
) -> Result<Reducer<S>, ActionError>
where
    I: IntoIterator,
    I::Item: Into<AnyActionDesc<S>>,
{
    ReducerBuilder::new(initial_state)
        .with_options(options.clone())
        .actions(descs)
        .build()
}
