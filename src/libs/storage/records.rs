use crate::libs::core::models::{Group, Message, User};

/// Everything the directory knows about one group. Membership, message log and
/// admin live together so they are created and dropped as one unit.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupRecord {
    pub group: Group,
    /// Position 0 is the admin.
    pub members: Vec<User>,
    pub messages: Vec<Message>,
}

impl GroupRecord {
    pub fn new(group: Group, members: Vec<User>) -> Self {
        Self {
            group,
            members,
            messages: Vec::new(),
        }
    }

    pub fn admin(&self) -> Option<&User> {
        self.members.first()
    }

    pub fn is_admin(&self, user: &User) -> bool {
        self.admin().is_some_and(|admin| admin.mobile() == user.mobile())
    }

    pub fn contains(&self, user: &User) -> bool {
        self.members.contains(user)
    }

    /// Moves `user` to the front. Everyone else keeps their relative order.
    /// Returns false if `user` is not a member.
    pub fn promote(&mut self, user: &User) -> bool {
        match self.members.iter().position(|member| member == user) {
            Some(position) => {
                let promoted = self.members.remove(position);
                self.members.insert(0, promoted);
                true
            }
            None => false,
        }
    }
}
