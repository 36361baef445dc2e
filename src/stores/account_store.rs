use crate::models::user::{Role, User};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;

/// In-memory account store keyed by username
pub struct AccountStore {
    users: DashMap<String, Arc<User>>,
}

impl AccountStore {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
        }
    }

    /// Register a new account
    /// Returns false without touching the existing record if the username is taken
    pub fn register(&self, user: User) -> bool {
        match self.users.entry(user.username.clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(Arc::new(user));
                true
            }
        }
    }

    /// True iff the account exists and the password matches exactly
    pub fn authenticate(&self, username: &str, password: &str) -> bool {
        self.users
            .get(username)
            .map(|entry| entry.value().password == password)
            .unwrap_or(false)
    }

    pub fn get(&self, username: &str) -> Option<Arc<User>> {
        self.users.get(username).map(|entry| Arc::clone(entry.value()))
    }

    pub fn count_role(&self, role: Role) -> usize {
        self.users
            .iter()
            .filter(|entry| entry.value().role == role)
            .count()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl Default for AccountStore {
    fn default() -> Self {
        Self::new()
    }
}
