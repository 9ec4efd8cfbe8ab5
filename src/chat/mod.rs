//! Chat state
//!
//! The conversation store, its seed data and the list projections used by
//! front ends.

pub mod seed;
pub mod store;
pub mod view;

pub use store::{is_valid_conversation_name, ChatStore};
pub use view::{Category, ChatFilter};
