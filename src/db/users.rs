/// User directory operations, the persistence collaborator of the
/// identity core.
use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::error::{IdentityError, Result};
use crate::models::{Language, RoleName, Status, User};

/// Fields needed to provision a user record.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub language: Language,
    pub roles: Vec<RoleName>,
    pub salt: String,
    pub password_hash: String,
}

/// Search filter mirroring the directory's query surface.
#[derive(Debug, Clone)]
pub struct UserFilter {
    pub email: Option<String>,
    pub status: Option<Status>,
    pub role: Option<RoleName>,
    pub size: usize,
    pub offset: usize,
}

impl Default for UserFilter {
    fn default() -> Self {
        Self {
            email: None,
            status: None,
            role: None,
            size: 30,
            offset: 0,
        }
    }
}

/// Lookup surface the identity core depends on.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn find_by_id(&self, id: i64) -> Result<Option<User>>;
    async fn search(&self, filter: &UserFilter) -> Result<Vec<User>>;
    async fn create(&self, user: CreateUser) -> Result<User>;
    async fn update(&self, user: User) -> Result<User>;
}

/// In-process directory used by the default wiring and the test suite.
///
/// The email index is the uniqueness authority: create and update claim
/// the index entry before touching the record map, so concurrent writers
/// racing on one email serialize on that entry.
pub struct InMemoryUserDirectory {
    users: DashMap<i64, User>,
    email_index: DashMap<String, i64>,
    next_id: AtomicI64,
}

impl Default for InMemoryUserDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            email_index: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let id = match self.email_index.get(email) {
            Some(id) => *id,
            None => return Ok(None),
        };
        Ok(self.users.get(&id).map(|user| user.value().clone()))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        Ok(self.users.get(&id).map(|user| user.value().clone()))
    }

    async fn search(&self, filter: &UserFilter) -> Result<Vec<User>> {
        let mut matches: Vec<User> = self
            .users
            .iter()
            .filter(|entry| {
                let user = entry.value();
                filter.email.as_deref().map_or(true, |e| user.email == e)
                    && filter.status.map_or(true, |s| user.status == s)
                    && filter.role.map_or(true, |r| user.has_role(r))
            })
            .map(|entry| entry.value().clone())
            .collect();

        matches.sort_by_key(|user| user.id);

        Ok(matches
            .into_iter()
            .skip(filter.offset)
            .take(filter.size)
            .collect())
    }

    async fn create(&self, user: CreateUser) -> Result<User> {
        match self.email_index.entry(user.email.clone()) {
            Entry::Occupied(_) => Err(IdentityError::EmailAlreadyExists),
            Entry::Vacant(slot) => {
                let id = self.next_id.fetch_add(1, Ordering::SeqCst);
                slot.insert(id);

                let record = User {
                    id,
                    name: user.name,
                    email: user.email,
                    status: Status::Pending,
                    language: user.language,
                    salt: Some(user.salt),
                    password_hash: Some(user.password_hash),
                    roles: user.roles,
                    created_at: Utc::now(),
                };
                self.users.insert(id, record.clone());
                Ok(record)
            }
        }
    }

    async fn update(&self, user: User) -> Result<User> {
        let current_email = self
            .users
            .get(&user.id)
            .map(|existing| existing.email.clone())
            .ok_or(IdentityError::UserNotFound)?;

        if current_email != user.email {
            match self.email_index.entry(user.email.clone()) {
                Entry::Occupied(_) => return Err(IdentityError::EmailAlreadyExists),
                Entry::Vacant(slot) => {
                    slot.insert(user.id);
                }
            }
            self.email_index.remove(&current_email);
        }

        self.users.insert(user.id, user.clone());
        Ok(user)
    }
}
