use crate::libs::config::DirectoryConfig;
use crate::libs::core::clock::{Clock, SystemClock};
use crate::libs::core::models::{Group, GroupId, GroupKind, Message, MessageId, User};
use crate::libs::storage::records::GroupRecord;
use crate::libs::storage::storage_traits::{
    DirectoryStore, GroupStore, MessageStore, StoreError, UserStore,
};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{debug, info, warn};

/// In-memory directory of users, groups and messages.
///
/// Invariants held between calls:
/// - every mobile in `membership` points at a group in `groups`, and that
///   group's member list contains the user
/// - `sender_index` has exactly one entry per message across all group logs
/// - a group's admin is `members[0]`
///
/// Every operation validates before it mutates, so an `Err` leaves the
/// directory as it was.
#[derive(Clone, Debug, PartialEq)]
pub struct Directory<C = SystemClock> {
    config: DirectoryConfig,
    clock: C,
    registered_mobiles: HashSet<String>,
    groups: HashMap<GroupId, GroupRecord>,
    // mobile -> the one group that user is in
    membership: HashMap<String, GroupId>,
    sender_index: HashMap<MessageId, User>,
    created_messages: BTreeMap<MessageId, Message>,
    named_group_count: u32,
    last_message_id: u64,
}

impl Directory<SystemClock> {
    pub fn new() -> Self {
        Self::with_config(DirectoryConfig::default(), SystemClock)
    }
}

impl Default for Directory<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Directory<C> {
    pub fn with_clock(clock: C) -> Self {
        Self::with_config(DirectoryConfig::default(), clock)
    }

    pub fn with_config(config: DirectoryConfig, clock: C) -> Self {
        Self {
            config,
            clock,
            registered_mobiles: HashSet::new(),
            groups: HashMap::new(),
            membership: HashMap::new(),
            sender_index: HashMap::new(),
            created_messages: BTreeMap::new(),
            named_group_count: 0,
            last_message_id: 0,
        }
    }

    pub fn config(&self) -> &DirectoryConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn record(&self, group: &Group) -> Result<&GroupRecord, StoreError> {
        self.groups
            .get(&group.id())
            .ok_or(StoreError::GroupNotFound(group.id()))
    }

    fn validate_new_members(&self, users: &[User]) -> Result<(), StoreError> {
        if users.len() < 2 {
            return Err(StoreError::NotEnoughMembers(users.len()));
        }

        let mut seen = HashSet::new();
        for user in users {
            if !seen.insert(user.mobile()) {
                return Err(StoreError::DuplicateMember(user.mobile().to_string()));
            }
            if self.config.require_registered_users && !self.is_registered(user.mobile()) {
                return Err(StoreError::UnregisteredUser(user.mobile().to_string()));
            }
            if let Some(group) = self.membership.get(user.mobile()) {
                return Err(StoreError::AlreadyInGroup {
                    mobile: user.mobile().to_string(),
                    group: *group,
                });
            }
        }
        Ok(())
    }
}

impl<C: Clock> UserStore for Directory<C> {
    fn create_user(&mut self, name: String, mobile: String) -> Result<User, StoreError> {
        if self.registered_mobiles.contains(&mobile) {
            debug!(mobile = %mobile, "rejected duplicate registration");
            return Err(StoreError::DuplicateUser(mobile));
        }

        self.registered_mobiles.insert(mobile.clone());
        info!(mobile = %mobile, "user registered");
        Ok(User::new(name, mobile))
    }

    fn is_registered(&self, mobile: &str) -> bool {
        self.registered_mobiles.contains(mobile)
    }

    fn user_count(&self) -> usize {
        self.registered_mobiles.len()
    }
}

impl<C: Clock> GroupStore for Directory<C> {
    fn create_group(&mut self, users: &[User]) -> Result<Group, StoreError> {
        self.validate_new_members(users)?;

        let group = if users.len() == 2 {
            Group::new(users[1].name(), GroupKind::PersonalChat)
        } else {
            self.named_group_count += 1;
            let ordinal = self.named_group_count;
            Group::new(
                self.config.named_group_name(ordinal),
                GroupKind::Named { ordinal },
            )
        };

        for user in users {
            self.membership.insert(user.mobile().to_string(), group.id());
        }
        self.groups
            .insert(group.id(), GroupRecord::new(group.clone(), users.to_vec()));

        info!(
            group = %group.id(),
            group_name = group.name(),
            members = users.len(),
            admin = users[0].mobile(),
            "group created"
        );
        Ok(group)
    }

    fn change_admin(
        &mut self,
        approver: &User,
        user: &User,
        group: &Group,
    ) -> Result<(), StoreError> {
        let record = self
            .groups
            .get_mut(&group.id())
            .ok_or(StoreError::GroupNotFound(group.id()))?;

        if !record.is_admin(approver) {
            warn!(group = %group.id(), approver = approver.mobile(), "admin change by non-admin");
            return Err(StoreError::NotAuthorized(approver.mobile().to_string()));
        }

        if !record.promote(user) {
            return Err(StoreError::NotAParticipant(user.mobile().to_string()));
        }

        info!(group = %group.id(), from = approver.mobile(), to = user.mobile(), "admin changed");
        Ok(())
    }

    fn remove_user(&mut self, user: &User) -> Result<usize, StoreError> {
        let group_id = *self
            .membership
            .get(user.mobile())
            .ok_or_else(|| StoreError::UserNotFound(user.mobile().to_string()))?;
        let record = self
            .groups
            .get_mut(&group_id)
            .ok_or_else(|| StoreError::UserNotFound(user.mobile().to_string()))?;

        if record.is_admin(user) {
            warn!(group = %group_id, mobile = user.mobile(), "attempt to remove admin");
            return Err(StoreError::CannotRemoveAdmin(user.mobile().to_string()));
        }

        let authored: HashSet<MessageId> = self
            .sender_index
            .iter()
            .filter(|(_, sender)| *sender == user)
            .map(|(message_id, _)| *message_id)
            .collect();

        record.members.retain(|member| member != user);
        record
            .messages
            .retain(|message| !authored.contains(&message.id()));
        self.sender_index
            .retain(|message_id, _| !authored.contains(message_id));
        self.membership.remove(user.mobile());

        let members_left = record.members.len();
        let messages_left = record.messages.len();
        let sent_left = self.sender_index.len();

        info!(
            group = %group_id,
            mobile = user.mobile(),
            messages_dropped = authored.len(),
            "user removed"
        );
        Ok(members_left + messages_left + sent_left)
    }

    fn is_user_present_in_group(&self, user: &User) -> Option<&Group> {
        self.membership
            .get(user.mobile())
            .and_then(|group_id| self.groups.get(group_id))
            .map(|record| &record.group)
    }

    fn members(&self, group: &Group) -> Result<&[User], StoreError> {
        Ok(&self.record(group)?.members)
    }

    fn admin_of(&self, group: &Group) -> Result<&User, StoreError> {
        self.record(group)?
            .admin()
            .ok_or(StoreError::GroupNotFound(group.id()))
    }

    fn group_count(&self) -> usize {
        self.groups.len()
    }

    fn named_group_count(&self) -> u32 {
        self.named_group_count
    }
}

impl<C: Clock> MessageStore for Directory<C> {
    fn create_message(&mut self, content: String) -> MessageId {
        self.last_message_id += 1;
        let message_id = MessageId(self.last_message_id);
        let message = Message::new(message_id, content, self.clock.now());

        debug!(message = %message_id, timestamp = %message.timestamp(), "message created");
        self.created_messages.insert(message_id, message);
        message_id
    }

    fn message(&self, message_id: MessageId) -> Option<&Message> {
        self.created_messages.get(&message_id)
    }

    fn send_message(
        &mut self,
        message: &Message,
        sender: &User,
        group: &Group,
    ) -> Result<usize, StoreError> {
        let record = self
            .groups
            .get_mut(&group.id())
            .ok_or(StoreError::GroupNotFound(group.id()))?;

        if !record.contains(sender) {
            return Err(StoreError::NotAMember(sender.mobile().to_string()));
        }
        // Only the exact message this directory issued under that id can be sent.
        if self.created_messages.get(&message.id()) != Some(message) {
            return Err(StoreError::MessageNotFound(message.id()));
        }
        if self.sender_index.contains_key(&message.id()) {
            return Err(StoreError::MessageAlreadySent(message.id()));
        }

        record.messages.push(message.clone());
        self.sender_index.insert(message.id(), sender.clone());

        debug!(
            message = %message.id(),
            group = %group.id(),
            sender = sender.mobile(),
            "message sent"
        );
        Ok(record.messages.len())
    }

    fn group_messages(&self, group: &Group) -> Result<&[Message], StoreError> {
        Ok(&self.record(group)?.messages)
    }

    fn sender_of(&self, message_id: MessageId) -> Option<&User> {
        self.sender_index.get(&message_id)
    }

    fn total_sent_messages(&self) -> usize {
        self.sender_index.len()
    }

    fn find_message(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        k: usize,
    ) -> Result<String, StoreError> {
        if k == 0 {
            return Err(StoreError::InvalidRank);
        }

        let mut window: Vec<&Message> = self
            .groups
            .values()
            .flat_map(|record| record.messages.iter())
            .filter(|message| message.timestamp() > start && message.timestamp() < end)
            .collect();

        let available = window.len();
        if available < k {
            return Err(StoreError::InsufficientMessages {
                requested: k,
                available,
            });
        }

        // Same-instant messages are ranked by id so none of them are lost.
        window.sort_by_key(|message| (message.timestamp(), message.id()));
        let found = window[available - k];

        debug!(%start, %end, k, available, message = %found.id(), "ranked message found");
        Ok(found.content().to_string())
    }
}

impl<C: Clock> DirectoryStore for Directory<C> {}
