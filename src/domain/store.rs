//! Client-side object graph (users, servers, members) and change subscriptions.

use std::{
    cell::RefCell,
    collections::HashMap,
    sync::mpsc::{self, Receiver, Sender, TryRecvError},
};

use super::user::{MemberKey, Server, ServerId, ServerMember, User, UserId};

const STORE_WATCHER_DROPPED: &str = "STORE_WATCHER_DROPPED";

/// Read access to the client state that identity rendering depends on.
pub trait ClientStore {
    fn user(&self, id: &UserId) -> Option<&User>;
    fn member(&self, key: &MemberKey) -> Option<&ServerMember>;
    fn server(&self, id: &ServerId) -> Option<&Server>;
}

/// Entry in the store a renderer can register interest in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StoreKey {
    User(UserId),
    Member(MemberKey),
    ServerRoles(ServerId),
}

pub trait StoreObserver {
    fn subscribe(&self, keys: Vec<StoreKey>) -> Subscription;
}

/// Receiving end of a store subscription. Dropping it unregisters the watcher
/// on the next notification.
#[derive(Debug)]
pub struct Subscription {
    rx: Receiver<StoreKey>,
}

impl Subscription {
    /// Drains every pending notification without blocking.
    pub fn drain(&self) -> Vec<StoreKey> {
        let mut changed = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(key) => changed.push(key),
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
        changed
    }
}

#[derive(Debug)]
struct Watcher {
    keys: Vec<StoreKey>,
    tx: Sender<StoreKey>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    users: HashMap<UserId, User>,
    servers: HashMap<ServerId, Server>,
    members: HashMap<MemberKey, ServerMember>,
    watchers: RefCell<Vec<Watcher>>,
}

impl MemoryStore {
    pub fn insert_user(&mut self, user: User) {
        let key = StoreKey::User(user.id.clone());
        self.users.insert(user.id.clone(), user);
        self.notify(&key);
    }

    pub fn insert_server(&mut self, server: Server) {
        let key = StoreKey::ServerRoles(server.id.clone());
        self.servers.insert(server.id.clone(), server);
        self.notify(&key);
    }

    pub fn insert_member(&mut self, member: ServerMember) {
        let key = StoreKey::Member(member.key.clone());
        self.members.insert(member.key.clone(), member);
        self.notify(&key);
    }

    /// Applies `update` to an existing member and notifies its watchers.
    /// Returns false when the member is unknown.
    pub fn update_member<F>(&mut self, key: &MemberKey, update: F) -> bool
    where
        F: FnOnce(&mut ServerMember),
    {
        let Some(member) = self.members.get_mut(key) else {
            return false;
        };

        update(member);
        self.notify(&StoreKey::Member(key.clone()));
        true
    }

    /// Members of `server`, ordered by user id.
    pub fn members_of(&self, server: &ServerId) -> Vec<&ServerMember> {
        let mut members: Vec<_> = self
            .members
            .values()
            .filter(|member| &member.key.server == server)
            .collect();
        members.sort_by(|a, b| a.key.user.cmp(&b.key.user));
        members
    }

    /// All known users, ordered by id.
    pub fn users(&self) -> Vec<&User> {
        let mut users: Vec<_> = self.users.values().collect();
        users.sort_by(|a, b| a.id.cmp(&b.id));
        users
    }

    #[cfg(test)]
    pub fn watcher_count(&self) -> usize {
        self.watchers.borrow().len()
    }

    fn notify(&self, key: &StoreKey) {
        self.watchers.borrow_mut().retain(|watcher| {
            if !watcher.keys.contains(key) {
                return true;
            }

            match watcher.tx.send(key.clone()) {
                Ok(()) => true,
                Err(_) => {
                    tracing::debug!(
                        code = STORE_WATCHER_DROPPED,
                        key = ?key,
                        "store watcher receiver dropped; unregistering"
                    );
                    false
                }
            }
        });
    }
}

impl ClientStore for MemoryStore {
    fn user(&self, id: &UserId) -> Option<&User> {
        self.users.get(id)
    }

    fn member(&self, key: &MemberKey) -> Option<&ServerMember> {
        self.members.get(key)
    }

    fn server(&self, id: &ServerId) -> Option<&Server> {
        self.servers.get(id)
    }
}

impl StoreObserver for MemoryStore {
    fn subscribe(&self, keys: Vec<StoreKey>) -> Subscription {
        let (tx, rx) = mpsc::channel();
        self.watchers.borrow_mut().push(Watcher { keys, tx });
        Subscription { rx }
    }
}
