//! Typed action descriptors.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::message::{Action, Message, PayloadAction, SimpleAction};
use crate::error::ActionError;

pub(crate) type PayloadHandleFn<S, P> = Arc<dyn Fn(S, P) -> S + Send + Sync>;
pub(crate) type SimpleHandleFn<S> = Arc<dyn Fn(S) -> S + Send + Sync>;

/// Descriptor for a message kind that carries a payload of type `P`.
///
/// Cloning is cheap: the transition function is shared.
pub struct ActionDesc<S, P> {
    action_type: Arc<str>,
    handle: PayloadHandleFn<S, P>,
}

impl<S, P> ActionDesc<S, P> {
    pub fn new<F>(action_type: impl Into<Arc<str>>, handle: F) -> Self
    where
        F: Fn(S, P) -> S + Send + Sync + 'static,
    {
        Self {
            action_type: action_type.into(),
            handle: Arc::new(handle),
        }
    }

    pub fn action_type(&self) -> &str {
        &self.action_type
    }

    /// Run the transition function. Panics propagate to the caller.
    pub fn handle(&self, prev: S, payload: P) -> S {
        (self.handle)(prev, payload)
    }

    pub fn create(&self, payload: P) -> PayloadAction<P> {
        PayloadAction {
            action_type: self.action_type.to_string(),
            payload,
        }
    }

    pub fn is_mine(&self, message: &impl Message) -> bool {
        message.action_type() == &*self.action_type
    }

    pub(crate) fn shared_type(&self) -> Arc<str> {
        Arc::clone(&self.action_type)
    }

    pub(crate) fn shared_handle(&self) -> PayloadHandleFn<S, P> {
        Arc::clone(&self.handle)
    }
}

impl<S, P: Serialize> ActionDesc<S, P> {
    /// Build the JSON wire form of a message, e.g. for transport or logging.
    /// Dispatch `create(payload)` directly to keep the payload untouched.
    pub fn action(&self, payload: P) -> Result<Action, ActionError> {
        self.create(payload).into_action()
    }
}

impl<S, P: DeserializeOwned> ActionDesc<S, P> {
    /// Typed view of `action`, if it belongs to this descriptor and its
    /// payload decodes as `P`.
    pub fn narrow(&self, action: &Action) -> Option<PayloadAction<P>> {
        if !self.is_mine(action) {
            return None;
        }
        let payload = action.decode_payload().ok()?;
        Some(self.create(payload))
    }
}

impl<S, P> Clone for ActionDesc<S, P> {
    fn clone(&self) -> Self {
        Self {
            action_type: Arc::clone(&self.action_type),
            handle: Arc::clone(&self.handle),
        }
    }
}

impl<S, P> fmt::Debug for ActionDesc<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionDesc")
            .field("action_type", &self.action_type)
            .finish_non_exhaustive()
    }
}

/// Descriptor for a message kind without payload.
///
/// `create()` allocates a fresh message on every call; callers must not
/// rely on the identity of produced messages.
pub struct SimpleActionDesc<S> {
    action_type: Arc<str>,
    handle: SimpleHandleFn<S>,
}

impl<S> SimpleActionDesc<S> {
    pub fn new<F>(action_type: impl Into<Arc<str>>, handle: F) -> Self
    where
        F: Fn(S) -> S + Send + Sync + 'static,
    {
        Self {
            action_type: action_type.into(),
            handle: Arc::new(handle),
        }
    }

    pub fn action_type(&self) -> &str {
        &self.action_type
    }

    pub fn handle(&self, prev: S) -> S {
        (self.handle)(prev)
    }

    pub fn create(&self) -> SimpleAction {
        SimpleAction {
            action_type: self.action_type.to_string(),
        }
    }

    pub fn action(&self) -> Action {
        self.create().into()
    }

    pub fn is_mine(&self, message: &impl Message) -> bool {
        message.action_type() == &*self.action_type
    }

    pub fn narrow(&self, action: &Action) -> Option<SimpleAction> {
        self.is_mine(action).then(|| self.create())
    }

    pub(crate) fn shared_type(&self) -> Arc<str> {
        Arc::clone(&self.action_type)
    }

    pub(crate) fn shared_handle(&self) -> SimpleHandleFn<S> {
        Arc::clone(&self.handle)
    }
}

impl<S> Clone for SimpleActionDesc<S> {
    fn clone(&self) -> Self {
        Self {
            action_type: Arc::clone(&self.action_type),
            handle: Arc::clone(&self.handle),
        }
    }
}

impl<S> fmt::Debug for SimpleActionDesc<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimpleActionDesc")
            .field("action_type", &self.action_type)
            .finish_non_exhaustive()
    }
}

/// Shorthand for [`ActionDesc::new`].
pub fn create_action<S, P, F>(action_type: impl Into<Arc<str>>, handle: F) -> ActionDesc<S, P>
where
    F: Fn(S, P) -> S + Send + Sync + 'static,
{
    ActionDesc::new(action_type, handle)
}

/// Shorthand for [`SimpleActionDesc::new`].
pub fn create_simple_action<S, F>(
    action_type: impl Into<Arc<str>>,
    handle: F,
) -> SimpleActionDesc<S>
where
    F: Fn(S) -> S + Send + Sync + 'static,
{
    SimpleActionDesc::new(action_type, handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn add() -> ActionDesc<i64, i64> {
        create_action("ADD", |prev: i64, n: i64| prev + n)
    }

    #[test]
    fn handle_returns_new_state() {
        assert_eq!(add().handle(1, 2), 3);
    }

    #[test]
    fn simple_handle_needs_no_payload() {
        let inc = create_simple_action("INC", |prev: i64| prev + 1);
        assert_eq!(inc.handle(1), 2);
    }

    #[test]
    fn create_puts_data_into_payload() {
        let action = add().create(2);
        assert_eq!(action.action_type, "ADD");
        assert_eq!(action.payload, 2);
    }

    #[test]
    fn is_mine_accepts_own_messages() {
        let add = add();
        assert!(add.is_mine(&add.create(2)));
        assert!(add.is_mine(&add.action(2).unwrap()));
        assert!(!add.is_mine(&Action::new("SUB")));
    }

    #[test]
    fn simple_create_allocates_equal_messages() {
        let inc = create_simple_action("INC", |prev: i64| prev + 1);
        let first = inc.create();
        let second = inc.create();
        assert_eq!(first, second);
        assert!(inc.is_mine(&first) && inc.is_mine(&second));
    }

    #[test]
    fn narrow_decodes_matching_payload() {
        let add = add();
        let raw = Action::new("ADD").with_payload(json!(7));
        assert_eq!(add.narrow(&raw), Some(add.create(7)));
    }

    #[test]
    fn narrow_rejects_foreign_or_malformed_messages() {
        let add = add();
        assert_eq!(add.narrow(&Action::new("SUB").with_payload(json!(7))), None);
        assert_eq!(add.narrow(&Action::new("ADD").with_payload(json!("x"))), None);
    }

    #[test]
    fn clones_share_type_and_handler() {
        let add = add();
        let copy = add.clone();
        assert_eq!(copy.action_type(), add.action_type());
        assert_eq!(copy.handle(10, 5), 15);
    }
}
