//! In-memory directory for a small messaging service: users keyed by mobile
//! number, personal chats and named groups with a single admin, and message
//! authorship with cascading cleanup when a member is removed.

pub mod libs;

pub use crate::libs::config::DirectoryConfig;
pub use crate::libs::core::clock::{Clock, ManualClock, SystemClock};
pub use crate::libs::core::models::{Group, GroupId, GroupKind, Message, MessageId, User};
pub use crate::libs::storage::directory::Directory;
pub use crate::libs::storage::storage_traits::{
    DirectoryStore, GroupStore, MessageStore, StoreError, UserStore,
};
