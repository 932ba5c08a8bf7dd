//! Concrete adapter components.
//!
//! Thin wrappers over the one recurring pattern: read from input ports,
//! reconcile stream lengths, marshal host calls onto the session thread,
//! emit downstream under backpressure. Streaming components react per
//! element; batch components drain their inputs and issue a single marshaled
//! call covering the whole buffer.

pub mod attr_name;
pub mod create;
pub mod exists;
pub mod get_value;
pub mod link;
pub mod query;
pub mod set_value;

pub use attr_name::AttrName;
pub use create::Create;
pub use exists::Exists;
pub use get_value::{FromSceneValue, GetValue};
pub use link::Link;
pub use query::Query;
pub use set_value::SetValue;
