//! Typed action descriptors composed into reducers.
//!
//! ```
//! use actiondesc::{create_action, create_reducer, Action};
//!
//! let add = create_action("ADD", |prev: i64, n: i64| prev + n);
//! let reducer = create_reducer([&add], 0_i64);
//!
//! let state = reducer.reduce(None, add.create(5));
//! assert_eq!(state, 5);
//! let state = reducer.reduce(Some(state), add.create(3));
//! assert_eq!(state, 8);
//! assert_eq!(reducer.reduce(Some(state), &Action::new("UNKNOWN")), 8);
//! ```
//!
//! Messages that arrive as JSON reach descriptors composed with
//! [`ActionDesc::accepting_json`]:
//!
//! ```
//! use actiondesc::{create_action, create_reducer, Action};
//!
//! let add = create_action("ADD", |prev: i64, n: i64| prev + n);
//! let reducer = create_reducer([add.accepting_json()], 0_i64);
//!
//! let wire: Action = serde_json::from_str(r#"{"type":"ADD","payload":5}"#).unwrap();
//! assert_eq!(reducer.reduce(None, &wire), 5);
//! ```

pub mod action;
pub mod config;
pub mod error;
pub mod reducer;

pub use action::{
    create_action, create_simple_action, Action, ActionDesc, ActionKind, AnyActionDesc, Dispatch,
    Message, Payload, PayloadAction, SimpleAction, SimpleActionDesc,
};
pub use config::{ComposeOptions, ConfigError, DuplicatePolicy};
pub use error::ActionError;
pub use reducer::{create_reducer, try_create_reducer, Reducer, ReducerBuilder};
