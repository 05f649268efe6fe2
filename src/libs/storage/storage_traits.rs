use crate::libs::core::models::{Group, GroupId, Message, MessageId, User};
use chrono::{DateTime, Utc};
use thiserror::Error;

pub trait UserStore {
    fn create_user(&mut self, name: String, mobile: String) -> Result<User, StoreError>;
    fn is_registered(&self, mobile: &str) -> bool;
    fn user_count(&self) -> usize;
}

pub trait GroupStore {
    /// `users[0]` becomes the admin. Two users make a personal chat, more make a
    /// named group.
    fn create_group(&mut self, users: &[User]) -> Result<Group, StoreError>;

    fn change_admin(&mut self, approver: &User, user: &User, group: &Group)
        -> Result<(), StoreError>;

    /// Drops a non-admin member and every message they sent. Returns
    /// members left + messages left in their group + sent messages left overall.
    fn remove_user(&mut self, user: &User) -> Result<usize, StoreError>;

    fn is_user_present_in_group(&self, user: &User) -> Option<&Group>;
    fn members(&self, group: &Group) -> Result<&[User], StoreError>;
    fn admin_of(&self, group: &Group) -> Result<&User, StoreError>;
    fn group_count(&self) -> usize;
    fn named_group_count(&self) -> u32;
}

pub trait MessageStore {
    fn create_message(&mut self, content: String) -> MessageId;
    fn message(&self, message_id: MessageId) -> Option<&Message>;

    fn send_message(
        &mut self,
        message: &Message,
        sender: &User,
        group: &Group,
    ) -> Result<usize, StoreError>;

    fn group_messages(&self, group: &Group) -> Result<&[Message], StoreError>;
    fn sender_of(&self, message_id: MessageId) -> Option<&User>;
    fn total_sent_messages(&self) -> usize;

    /// Content of the `k`-th latest sent message strictly inside `(start, end)`.
    fn find_message(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        k: usize,
    ) -> Result<String, StoreError>;
}

pub trait DirectoryStore: UserStore + GroupStore + MessageStore {}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("User already exists: {0}")]
    DuplicateUser(String),
    #[error("Group does not exist: {0}")]
    GroupNotFound(GroupId),
    #[error("You are not allowed to send message: {0}")]
    NotAMember(String),
    #[error("Approver does not have rights: {0}")]
    NotAuthorized(String),
    #[error("User is not a participant: {0}")]
    NotAParticipant(String),
    #[error("User not found: {0}")]
    UserNotFound(String),
    #[error("Cannot remove admin: {0}")]
    CannotRemoveAdmin(String),
    #[error("K is greater than the number of messages: requested {requested}, found {available}")]
    InsufficientMessages { requested: usize, available: usize },
    #[error("Rank must be at least 1")]
    InvalidRank,
    #[error("Group needs at least 2 users, found {0}")]
    NotEnoughMembers(usize),
    #[error("User listed twice: {0}")]
    DuplicateMember(String),
    #[error("User {mobile} already belongs to group {group}")]
    AlreadyInGroup { mobile: String, group: GroupId },
    #[error("User is not registered: {0}")]
    UnregisteredUser(String),
    #[error("Message was not issued by this directory: {0}")]
    MessageNotFound(MessageId),
    #[error("Message already sent: {0}")]
    MessageAlreadySent(MessageId),
    #[error("Config Error: {0}")]
    Config(#[from] serde_json::Error),
}
