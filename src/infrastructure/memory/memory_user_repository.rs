//! In-memory implementation of user repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::domain::entities::{NewUser, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

/// User repository keeping records in process memory.
///
/// `by_token` indexes token digests to user ids. Lock order is always
/// `users` before `by_token` when both are held.
#[derive(Default)]
pub struct MemoryUserRepository {
    users: DashMap<i64, User>,
    by_token: DashMap<String, i64>,
    last_id: AtomicI64,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let id = self.last_id.fetch_add(1, Ordering::SeqCst) + 1;

        match self.by_token.entry(new_user.token_hash.clone()) {
            Entry::Occupied(_) => {
                return Err(AppError::conflict(
                    "Unique constraint violation: users_token_hash_key",
                ));
            }
            Entry::Vacant(slot) => {
                slot.insert(id);
            }
        }

        let user = User {
            id,
            name: new_user.name,
            email: new_user.email,
            token_hash: new_user.token_hash,
            created_at: new_user.created_at,
            expires_at: new_user.expires_at,
        };
        self.users.insert(id, user.clone());

        Ok(user)
    }

    async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<User>, AppError> {
        let Some(id) = self.by_token.get(token_hash).map(|id| *id) else {
            return Ok(None);
        };

        Ok(self.users.get(&id).map(|user| user.clone()))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self.users.get(&id).map(|user| user.clone()))
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        let mut users: Vec<User> = self.users.iter().map(|e| e.value().clone()).collect();
        users.sort_by_key(|u| u.id);
        Ok(users)
    }

    async fn replace_token(
        &self,
        id: i64,
        current_hash: &str,
        new_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<Option<User>, AppError> {
        let Some(mut user) = self.users.get_mut(&id) else {
            return Ok(None);
        };

        if user.token_hash != current_hash {
            return Ok(None);
        }

        if new_hash != current_hash {
            match self.by_token.entry(new_hash.to_string()) {
                Entry::Occupied(_) => {
                    return Err(AppError::conflict(
                        "Unique constraint violation: users_token_hash_key",
                    ));
                }
                Entry::Vacant(slot) => {
                    slot.insert(id);
                }
            }
            self.by_token.remove(current_hash);
        }

        user.token_hash = new_hash.to_string();
        user.expires_at = expires_at;

        Ok(Some(user.clone()))
    }
}
