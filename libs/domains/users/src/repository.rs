use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, UpdateUser, User};

/// Repository trait for User persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All users in ascending id order
    async fn list_all(&self) -> UserResult<Vec<User>>;

    /// Get a user by ID
    async fn get_by_id(&self, id: u64) -> UserResult<Option<User>>;

    /// Store a new user under a fresh id.
    ///
    /// Fails with `DuplicateEmail` if any user already has the email
    /// (case-insensitive).
    async fn create(&self, input: CreateUser) -> UserResult<User>;

    /// Replace all mutable fields of an existing user.
    ///
    /// Fails with `NotFound` if absent and `DuplicateEmail` if another user
    /// has the email.
    async fn update(&self, id: u64, input: UpdateUser) -> UserResult<User>;

    /// Remove a user; `NotFound` if absent
    async fn delete(&self, id: u64) -> UserResult<()>;

    /// Case-insensitive email check, optionally ignoring one user
    async fn email_exists(&self, email: &str, exclude_id: Option<u64>) -> UserResult<bool>;
}

#[derive(Debug)]
struct Store {
    users: BTreeMap<u64, User>,
    next_id: u64,
}

impl Store {
    fn email_taken(&self, email: &str, exclude_id: Option<u64>) -> bool {
        self.users
            .values()
            .any(|u| Some(u.id) != exclude_id && u.has_email(email))
    }
}

impl Default for Store {
    fn default() -> Self {
        Self {
            users: BTreeMap::new(),
            next_id: 1,
        }
    }
}

/// In-memory implementation of UserRepository
///
/// One lock guards both the map and the id counter, so id assignment and the
/// email uniqueness check are atomic with the write they protect.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository holding the two demo users (ids 1 and 2).
    pub fn seeded() -> Self {
        let mut store = Store::default();
        let seeds = [
            ("Alice", "Smith", "alice.smith@example.com", "HR"),
            ("Bob", "Johnson", "bob.johnson@example.com", "IT"),
        ];
        for (first_name, last_name, email, department) in seeds {
            let id = store.next_id;
            store.next_id += 1;
            let input = CreateUser {
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                email: email.to_string(),
                department: Some(department.to_string()),
                is_active: true,
            };
            store.users.insert(id, User::new(id, input, Utc::now()));
        }

        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list_all(&self) -> UserResult<Vec<User>> {
        let store = self.store.read().await;
        Ok(store.users.values().cloned().collect())
    }

    async fn get_by_id(&self, id: u64) -> UserResult<Option<User>> {
        let store = self.store.read().await;
        Ok(store.users.get(&id).cloned())
    }

    async fn create(&self, input: CreateUser) -> UserResult<User> {
        let mut store = self.store.write().await;

        if store.email_taken(&input.email, None) {
            return Err(UserError::DuplicateEmail(input.email));
        }

        let id = store.next_id;
        store.next_id = id
            .checked_add(1)
            .ok_or_else(|| UserError::Internal("user id space exhausted".to_string()))?;

        let user = User::new(id, input, Utc::now());
        store.users.insert(id, user.clone());

        tracing::debug!(user_id = id, "Stored user");
        Ok(user)
    }

    async fn update(&self, id: u64, input: UpdateUser) -> UserResult<User> {
        let mut store = self.store.write().await;

        if !store.users.contains_key(&id) {
            return Err(UserError::NotFound(id));
        }
        if store.email_taken(&input.email, Some(id)) {
            return Err(UserError::DuplicateEmail(input.email));
        }

        let user = store.users.get_mut(&id).ok_or(UserError::NotFound(id))?;
        user.apply_update(input);

        tracing::debug!(user_id = id, "Replaced user fields");
        Ok(user.clone())
    }

    async fn delete(&self, id: u64) -> UserResult<()> {
        let mut store = self.store.write().await;

        match store.users.remove(&id) {
            Some(_) => {
                tracing::debug!(user_id = id, "Removed user");
                Ok(())
            }
            None => Err(UserError::NotFound(id)),
        }
    }

    async fn email_exists(&self, email: &str, exclude_id: Option<u64>) -> UserResult<bool> {
        let store = self.store.read().await;
        Ok(store.email_taken(email, exclude_id))
    }
}
