//! Action descriptors and the messages they produce.
//!
//! A descriptor binds a `type` discriminant to a pure transition function.
//! The flavor is chosen by the constructor:
//!
//! - [`ActionDesc`]: transition `(S, P) -> S`, messages carry a payload.
//! - [`SimpleActionDesc`]: transition `S -> S`, messages carry none.
//!
//! Both convert into [`AnyActionDesc`] so they can share one reducer.

mod any;
mod desc;
mod message;

pub use any::{ActionKind, AnyActionDesc};
pub(crate) use any::{Handler, Rejected};
pub use desc::{create_action, create_simple_action, ActionDesc, SimpleActionDesc};
pub use message::{Action, Dispatch, Message, Payload, PayloadAction, SimpleAction};
