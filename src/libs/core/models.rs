use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use uuid::Uuid;

/// A registered person. Identity is the mobile number; the display name is
/// carried along for naming personal chats.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    name: String,
    mobile: String,
}

impl User {
    pub fn new(name: impl Into<String>, mobile: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mobile: mobile.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mobile(&self) -> &str {
        &self.mobile
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.mobile == other.mobile
    }
}

impl Eq for User {}

impl Hash for User {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.mobile.hash(state);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupId {
    pub uuid: Uuid,
}

impl GroupId {
    pub fn generate() -> Self {
        Self {
            uuid: Uuid::now_v7(),
        }
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.uuid)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupKind {
    /// Two members; named after the non-admin member.
    PersonalChat,
    /// More than two members; `ordinal` is the value of the named-group
    /// counter when this group was created.
    Named { ordinal: u32 },
}

/// Handle to a conversation. Equality is by `id` only, so two personal chats
/// that happen to share a display name stay distinct.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Group {
    id: GroupId,
    name: String,
    kind: GroupKind,
}

impl Group {
    pub fn new(name: impl Into<String>, kind: GroupKind) -> Self {
        Self {
            id: GroupId::generate(),
            name: name.into(),
            kind,
        }
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> GroupKind {
        self.kind
    }

    pub fn is_personal_chat(&self) -> bool {
        matches!(self.kind, GroupKind::PersonalChat)
    }
}

impl PartialEq for Group {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Group {}

impl Hash for Group {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Sequential message number. The first message created by a directory is 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MessageId(pub u64);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    id: MessageId,
    content: String,
    timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(id: MessageId, content: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            content: content.into(),
            timestamp,
        }
    }

    pub fn id(&self) -> MessageId {
        self.id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_equality_is_by_mobile() {
        let alex = User::new("Alex", "9000000001");
        let renamed = User::new("Alexander", "9000000001");
        let bob = User::new("Alex", "9000000002");

        assert_eq!(alex, renamed);
        assert_ne!(alex, bob);
    }

    #[test]
    fn test_groups_with_same_name_are_distinct() {
        let first = Group::new("Evan", GroupKind::PersonalChat);
        let second = Group::new("Evan", GroupKind::PersonalChat);

        assert_ne!(first, second);
        assert_eq!(first, first.clone());
        assert!(first.is_personal_chat());
    }

    #[test]
    fn test_models_survive_json() {
        use chrono::TimeZone;

        let group = Group::new("Group 3", GroupKind::Named { ordinal: 3 });
        let json = serde_json::to_string(&group).unwrap();
        let decoded: Group = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, group);
        assert_eq!(decoded.name(), "Group 3");
        assert_eq!(decoded.kind(), GroupKind::Named { ordinal: 3 });
        assert!(json.contains(&group.id().uuid.to_string()));

        let sent_at = Utc.with_ymd_and_hms(2024, 2, 29, 23, 59, 58).unwrap();
        let message = Message::new(MessageId(42), "leap day", sent_at);
        let json = serde_json::to_string(&message).unwrap();
        let decoded: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, message);
        assert_eq!(decoded.timestamp(), sent_at);

        let user = User::new("Alex", "9000000001");
        let decoded: User = serde_json::from_str(&serde_json::to_string(&user).unwrap()).unwrap();
        assert_eq!(decoded.name(), "Alex");
        assert_eq!(decoded.mobile(), "9000000001");
    }
}
