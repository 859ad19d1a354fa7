//! Messages routed through a reducer.
//!
//! [`PayloadAction`] and [`SimpleAction`] are the typed shapes produced by
//! descriptors. They reach a reducer as they are: the payload value is moved
//! into the handler without any encoding step.
//!
//! [`Action`] is the JSON wire shape, for messages that arrive serialized.
//! Its payload only reaches descriptors composed with
//! [`ActionDesc::accepting_json`](crate::ActionDesc::accepting_json).

use std::any::{self, Any};
use std::borrow::Cow;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ActionError;

/// Anything carrying a `type` discriminant.
pub trait Message {
    fn action_type(&self) -> &str;
}

impl<M: Message + ?Sized> Message for &M {
    fn action_type(&self) -> &str {
        (**self).action_type()
    }
}

/// Payload of a message on its way to a handler.
pub enum Payload<'a> {
    Absent,
    /// Payload still in its wire form.
    Json(Cow<'a, Value>),
    /// Payload produced by a descriptor's `create`, type-erased.
    Typed(Box<dyn Any>),
}

impl fmt::Debug for Payload<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Absent => f.write_str("Absent"),
            Payload::Json(value) => f.debug_tuple("Json").field(value).finish(),
            Payload::Typed(_) => f.write_str("Typed(..)"),
        }
    }
}

/// A message a reducer can consume.
pub trait Dispatch<'a>: Message + Sized {
    fn into_payload(self) -> Payload<'a>;
}

/// Untyped message: `{ "type": ..., "payload": ... }`.
///
/// The payload is optional and kept as an opaque JSON value until a
/// descriptor decodes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type")]
    pub action_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

impl Action {
    /// Message without payload.
    pub fn new(action_type: impl Into<String>) -> Self {
        Self {
            action_type: action_type.into(),
            payload: None,
        }
    }

    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Decode the payload as `P`. A missing payload decodes from `null`.
    pub fn decode_payload<P: DeserializeOwned>(&self) -> Result<P, ActionError> {
        decode_payload(&self.action_type, self.payload.as_ref())
    }
}

impl Message for Action {
    fn action_type(&self) -> &str {
        &self.action_type
    }
}

impl Dispatch<'static> for Action {
    fn into_payload(self) -> Payload<'static> {
        match self.payload {
            Some(value) => Payload::Json(Cow::Owned(value)),
            None => Payload::Absent,
        }
    }
}

impl<'a> Dispatch<'a> for &'a Action {
    fn into_payload(self) -> Payload<'a> {
        match &self.payload {
            Some(value) => Payload::Json(Cow::Borrowed(value)),
            None => Payload::Absent,
        }
    }
}

/// Typed message carrying a payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayloadAction<P> {
    #[serde(rename = "type")]
    pub action_type: String,
    pub payload: P,
}

impl<P> Message for PayloadAction<P> {
    fn action_type(&self) -> &str {
        &self.action_type
    }
}

impl<P: 'static> Dispatch<'static> for PayloadAction<P> {
    fn into_payload(self) -> Payload<'static> {
        Payload::Typed(Box::new(self.payload))
    }
}

impl<P: Serialize> TryFrom<PayloadAction<P>> for Action {
    type Error = ActionError;

    fn try_from(action: PayloadAction<P>) -> Result<Self, Self::Error> {
        let payload =
            serde_json::to_value(&action.payload).map_err(|source| ActionError::Payload {
                action_type: action.action_type.clone(),
                source,
            })?;
        Ok(Action {
            action_type: action.action_type,
            payload: Some(payload),
        })
    }
}

impl<P: Serialize> PayloadAction<P> {
    /// Encode into the JSON wire shape.
    pub fn into_action(self) -> Result<Action, ActionError> {
        Action::try_from(self)
    }
}

/// Typed message without payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleAction {
    #[serde(rename = "type")]
    pub action_type: String,
}

impl Message for SimpleAction {
    fn action_type(&self) -> &str {
        &self.action_type
    }
}

impl Dispatch<'static> for SimpleAction {
    fn into_payload(self) -> Payload<'static> {
        Payload::Absent
    }
}

impl<'a> Dispatch<'a> for &'a SimpleAction {
    fn into_payload(self) -> Payload<'a> {
        Payload::Absent
    }
}

impl From<SimpleAction> for Action {
    fn from(action: SimpleAction) -> Self {
        Action::new(action.action_type)
    }
}

pub(crate) fn decode_payload<P: DeserializeOwned>(
    action_type: &str,
    payload: Option<&Value>,
) -> Result<P, ActionError> {
    let null = Value::Null;
    P::deserialize(payload.unwrap_or(&null)).map_err(|source| ActionError::Payload {
        action_type: action_type.to_string(),
        source,
    })
}

pub(crate) fn downcast_payload<P: 'static>(
    action_type: &str,
    payload: Box<dyn Any>,
) -> Result<P, ActionError> {
    payload
        .downcast::<P>()
        .map(|payload| *payload)
        .map_err(|_| ActionError::PayloadType {
            action_type: action_type.to_string(),
            expected: any::type_name::<P>(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn simple_action_serializes_without_payload() {
        let action: Action = SimpleAction {
            action_type: "INC".to_string(),
        }
        .into();
        assert_eq!(serde_json::to_value(&action).unwrap(), json!({ "type": "INC" }));
    }

    #[test]
    fn payload_action_serializes_type_and_payload_only() {
        let action = PayloadAction {
            action_type: "ADD".to_string(),
            payload: 2,
        }
        .into_action()
        .unwrap();
        assert_eq!(
            serde_json::to_value(&action).unwrap(),
            json!({ "type": "ADD", "payload": 2 })
        );
    }

    #[test]
    fn action_deserializes_without_payload_field() {
        let action: Action = serde_json::from_value(json!({ "type": "UNKNOWN" })).unwrap();
        assert_eq!(action, Action::new("UNKNOWN"));
    }

    #[test]
    fn missing_payload_decodes_as_null() {
        let action = Action::new("RESET");
        let payload: Option<u32> = action.decode_payload().unwrap();
        assert_eq!(payload, None);
        action.decode_payload::<()>().unwrap();
    }

    #[test]
    fn mismatched_payload_reports_action_type() {
        let action = Action::new("ADD").with_payload(json!("five"));
        let err = action.decode_payload::<i64>().unwrap_err();
        assert!(matches!(err, ActionError::Payload { ref action_type, .. } if action_type == "ADD"));
    }

    #[test]
    fn typed_payload_is_moved_not_encoded() {
        let message = PayloadAction {
            action_type: "SET".to_string(),
            payload: f64::NAN,
        };
        let Payload::Typed(boxed) = message.into_payload() else {
            panic!("expected typed payload");
        };
        assert!(downcast_payload::<f64>("SET", boxed).unwrap().is_nan());
    }

    #[test]
    fn downcast_to_wrong_type_names_expected_type() {
        let err = downcast_payload::<i64>("ADD", Box::new("five")).unwrap_err();
        assert!(matches!(err, ActionError::PayloadType { expected, .. } if expected == "i64"));
    }

    #[test]
    fn borrowed_action_lends_json_payload() {
        let action = Action::new("ADD").with_payload(json!(1));
        assert!(matches!((&action).into_payload(), Payload::Json(Cow::Borrowed(_))));
        assert!(matches!(Action::new("INC").into_payload(), Payload::Absent));
    }
}
