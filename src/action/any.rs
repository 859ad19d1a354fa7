//! Type-erased descriptors for heterogeneous collections.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use super::desc::{ActionDesc, SimpleActionDesc, SimpleHandleFn};
use super::message::{decode_payload, downcast_payload, Payload};
use crate::error::ActionError;

/// Payload did not reach the handler; the untouched state is handed back.
pub(crate) struct Rejected<S> {
    pub(crate) state: S,
    pub(crate) error: ActionError,
}

pub(crate) type ErasedHandleFn<S> =
    Arc<dyn Fn(S, Payload<'_>) -> Result<S, Rejected<S>> + Send + Sync>;

/// Transition function as stored in a dispatch table.
pub(crate) enum Handler<S> {
    Simple(SimpleHandleFn<S>),
    WithPayload(ErasedHandleFn<S>),
}

impl<S> Clone for Handler<S> {
    fn clone(&self) -> Self {
        match self {
            Handler::Simple(handle) => Handler::Simple(Arc::clone(handle)),
            Handler::WithPayload(handle) => Handler::WithPayload(Arc::clone(handle)),
        }
    }
}

/// Which of the two descriptor flavors a descriptor is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Simple,
    WithPayload,
}

/// Any descriptor over state `S`, with its payload type erased.
///
/// Built with `From` from either [`ActionDesc`] or [`SimpleActionDesc`], or
/// with [`ActionDesc::accepting_json`].
pub struct AnyActionDesc<S> {
    action_type: Arc<str>,
    handler: Handler<S>,
}

impl<S> Clone for AnyActionDesc<S> {
    fn clone(&self) -> Self {
        Self {
            action_type: Arc::clone(&self.action_type),
            handler: self.handler.clone(),
        }
    }
}

impl<S> AnyActionDesc<S> {
    pub fn action_type(&self) -> &str {
        &self.action_type
    }

    pub fn kind(&self) -> ActionKind {
        match self.handler {
            Handler::Simple(_) => ActionKind::Simple,
            Handler::WithPayload(_) => ActionKind::WithPayload,
        }
    }

    pub(crate) fn into_entry(self) -> (Arc<str>, Handler<S>) {
        (self.action_type, self.handler)
    }
}

impl<S> std::fmt::Debug for AnyActionDesc<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnyActionDesc")
            .field("action_type", &self.action_type)
            .field("kind", &self.kind())
            .finish()
    }
}

impl<S: 'static> From<SimpleActionDesc<S>> for AnyActionDesc<S> {
    fn from(desc: SimpleActionDesc<S>) -> Self {
        Self {
            action_type: desc.shared_type(),
            handler: Handler::Simple(desc.shared_handle()),
        }
    }
}

impl<S: 'static> From<&SimpleActionDesc<S>> for AnyActionDesc<S> {
    fn from(desc: &SimpleActionDesc<S>) -> Self {
        desc.clone().into()
    }
}

/// Typed payloads only. A message whose payload is JSON or absent is
/// rejected; use [`ActionDesc::accepting_json`] to decode those.
impl<S, P> From<ActionDesc<S, P>> for AnyActionDesc<S>
where
    S: 'static,
    P: 'static,
{
    fn from(desc: ActionDesc<S, P>) -> Self {
        let action_type = desc.shared_type();
        let handle = desc.shared_handle();
        let handler_type = Arc::clone(&action_type);
        let handler: ErasedHandleFn<S> = Arc::new(move |state: S, payload: Payload<'_>| {
            let payload = match payload {
                Payload::Typed(boxed) => downcast_payload::<P>(&handler_type, boxed),
                Payload::Json(_) | Payload::Absent => Err(ActionError::PayloadType {
                    action_type: handler_type.to_string(),
                    expected: std::any::type_name::<P>(),
                }),
            };
            match payload {
                Ok(payload) => Ok(handle(state, payload)),
                Err(error) => Err(Rejected { state, error }),
            }
        });
        Self {
            action_type,
            handler: Handler::WithPayload(handler),
        }
    }
}

impl<S, P> From<&ActionDesc<S, P>> for AnyActionDesc<S>
where
    S: 'static,
    P: 'static,
{
    fn from(desc: &ActionDesc<S, P>) -> Self {
        desc.clone().into()
    }
}

impl<S, P> ActionDesc<S, P>
where
    S: 'static,
    P: DeserializeOwned + 'static,
{
    /// Erase this descriptor, also accepting messages whose payload arrives
    /// as JSON. Typed payloads are still moved into the handler as they are;
    /// JSON ones are decoded into `P`, and an absent payload decodes from
    /// `null`.
    pub fn accepting_json(&self) -> AnyActionDesc<S> {
        let action_type = self.shared_type();
        let handle = self.shared_handle();
        let handler_type = Arc::clone(&action_type);
        let handler: ErasedHandleFn<S> = Arc::new(move |state: S, payload: Payload<'_>| {
            let payload = match payload {
                Payload::Typed(boxed) => downcast_payload::<P>(&handler_type, boxed),
                Payload::Json(value) => decode_payload::<P>(&handler_type, Some(&*value)),
                Payload::Absent => decode_payload::<P>(&handler_type, None),
            };
            match payload {
                Ok(payload) => Ok(handle(state, payload)),
                Err(error) => Err(Rejected { state, error }),
            }
        });
        AnyActionDesc {
            action_type,
            handler: Handler::WithPayload(handler),
        }
    }
}
