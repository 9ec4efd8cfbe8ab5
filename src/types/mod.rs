//! Shared type definitions
//!
//! This module contains all shared data types used across the application.

pub mod conversation;
pub mod message;
pub mod profile;

pub use conversation::{preview_of, Conversation, DELETED_PREVIEW, PHOTO_PREVIEW};
pub use message::{DeleteMode, Message, MessageStatus};
pub use profile::{ProfileUpdate, UserProfile};
