//! Test Data Builders
//!
//! Fluent builders that assemble populated ledger entities for tests
//! without repeating registration boilerplate.

use std::sync::Arc;

use domain_ledger::{Group, Notifier};
use ledger_service::LedgerService;

use core_kernel::{GroupId, UserId};

use crate::fixtures::PersonFixtures;

/// Builds a [`Group`] pre-populated with members.
pub struct GroupBuilder {
    name: String,
    members: Vec<UserId>,
}

impl GroupBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
        }
    }

    /// Adds `n` fresh members.
    pub fn with_members(mut self, n: usize) -> Self {
        self.members.extend((0..n).map(|_| UserId::new()));
        self
    }

    /// Adds a specific member.
    pub fn with_member(mut self, user_id: UserId) -> Self {
        self.members.push(user_id);
        self
    }

    /// Builds the group, returning it along with the member ids in
    /// insertion order.
    pub fn build(self) -> (Group, Vec<UserId>) {
        let mut group = Group::new(self.name);
        for &member in &self.members {
            group.add_member(member).expect("duplicate member in builder");
        }
        (group, self.members)
    }
}

impl Default for GroupBuilder {
    fn default() -> Self {
        Self::new("Test Group")
    }
}

/// A [`LedgerService`] populated by [`ServiceBuilder`].
pub struct ServiceScenario {
    pub service: LedgerService,
    pub users: Vec<UserId>,
    pub group_id: Option<GroupId>,
}

/// Builds a service with registered users and, optionally, one group
/// containing all of them.
pub struct ServiceBuilder {
    user_count: usize,
    group_name: Option<String>,
    notifier: Option<Arc<dyn Notifier>>,
}

impl ServiceBuilder {
    pub fn new() -> Self {
        Self {
            user_count: 0,
            group_name: None,
            notifier: None,
        }
    }

    /// Registers `n` users with generated identities.
    pub fn with_users(mut self, n: usize) -> Self {
        self.user_count = n;
        self
    }

    /// Creates a group with the given name and adds every user to it.
    pub fn with_group(mut self, name: impl Into<String>) -> Self {
        self.group_name = Some(name.into());
        self
    }

    /// Routes notifications through the given channel.
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn build(self) -> ServiceScenario {
        let service = match self.notifier {
            Some(notifier) => LedgerService::with_notifier(notifier),
            None => LedgerService::new(),
        };

        let users: Vec<UserId> = PersonFixtures::identities(self.user_count)
            .into_iter()
            .map(|(name, email)| service.create_user(name, email).expect("user registration"))
            .collect();

        let group_id = self.group_name.map(|name| {
            let group_id = service.create_group(name).expect("group creation");
            for &user in &users {
                service
                    .add_user_to_group(user, group_id)
                    .expect("group membership");
            }
            group_id
        });

        ServiceScenario {
            service,
            users,
            group_id,
        }
    }
}

impl Default for ServiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}
