use std::collections::HashSet;

use crate::action::AnyActionDesc;
use crate::config::{ComposeOptions, DuplicatePolicy};
use crate::error::ActionError;

use super::Reducer;

/// Registers descriptors one at a time and composes them under
/// [`ComposeOptions`].
pub struct ReducerBuilder<S> {
    descs: Vec<AnyActionDesc<S>>,
    initial_state: S,
    options: ComposeOptions,
}

impl<S> ReducerBuilder<S> {
    pub fn new(initial_state: S) -> Self {
        Self {
            descs: Vec::new(),
            initial_state,
            options: ComposeOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ComposeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn action(mut self, desc: impl Into<AnyActionDesc<S>>) -> Self {
        self.descs.push(desc.into());
        self
    }

    pub fn actions<I>(mut self, descs: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<AnyActionDesc<S>>,
    {
        self.descs.extend(descs.into_iter().map(Into::into));
        self
    }

    /// Validates registrations against the options and builds the reducer.
    pub fn build(self) -> Result<Reducer<S>, ActionError> {
        self.validate()?;
        Ok(Reducer::from_descs(self.descs, self.initial_state))
    }

    fn validate(&self) -> Result<(), ActionError> {
        let mut seen = HashSet::new();
        for desc in &self.descs {
            let action_type = desc.action_type();

            if action_type.is_empty() && !self.options.allow_empty_type {
                return Err(ActionError::EmptyType);
            }

            if !seen.insert(action_type) && self.options.duplicates == DuplicatePolicy::Reject {
                return Err(ActionError::DuplicateType {
                    action_type: action_type.to_string(),
                });
            }
        }
        Ok(())
    }
}
