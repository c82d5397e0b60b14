use std::sync::Arc;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, UpdateUser, UserResponse};
use crate::repository::UserRepository;

/// Service layer for User business logic
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// List all users, ascending by id
    pub async fn list_users(&self) -> UserResult<Vec<UserResponse>> {
        let users = self.repository.list_all().await?;
        Ok(users.into_iter().map(Into::into).collect())
    }

    /// Get a user by ID
    pub async fn get_user(&self, id: u64) -> UserResult<UserResponse> {
        let user = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))?;

        Ok(user.into())
    }

    /// Create a new user.
    ///
    /// The early email check gives a clean conflict for the common case; the
    /// repository repeats it under its write lock.
    pub async fn create_user(&self, input: CreateUser) -> UserResult<UserResponse> {
        if self.repository.email_exists(&input.email, None).await? {
            tracing::info!("Create rejected: email already in use");
            return Err(UserError::DuplicateEmail(input.email));
        }

        let created = self.repository.create(input).await?;
        tracing::info!(user_id = created.id, "Created user");
        Ok(created.into())
    }

    /// Replace a user's mutable fields
    pub async fn update_user(&self, id: u64, input: UpdateUser) -> UserResult<()> {
        if self.repository.get_by_id(id).await?.is_none() {
            return Err(UserError::NotFound(id));
        }

        if self.repository.email_exists(&input.email, Some(id)).await? {
            tracing::info!(user_id = id, "Update rejected: email already in use");
            return Err(UserError::DuplicateEmail(input.email));
        }

        self.repository.update(id, input).await?;
        tracing::info!(user_id = id, "Updated user");
        Ok(())
    }

    /// Delete a user
    pub async fn delete_user(&self, id: u64) -> UserResult<()> {
        self.repository.delete(id).await?;
        tracing::info!(user_id = id, "Deleted user");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;
    use crate::repository::MockUserRepository;
    use chrono::Utc;
    use mockall::predicate::{always, eq};

    fn create_input(email: &str) -> CreateUser {
        CreateUser {
            first_name: "Jan".to_string(),
            last_name: "Doe".to_string(),
            email: email.to_string(),
            department: None,
            is_active: true,
        }
    }

    fn update_input(email: &str) -> UpdateUser {
        UpdateUser {
            first_name: "Jan".to_string(),
            last_name: "Doe".to_string(),
            email: email.to_string(),
            department: None,
            is_active: false,
        }
    }

    fn stored(id: u64, email: &str) -> User {
        User::new(id, create_input(email), Utc::now())
    }

    #[tokio::test]
    async fn test_create_user_conflict_skips_store_write() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_email_exists()
            .with(eq("jan@x.com"), eq(None))
            .returning(|_, _| Ok(true));
        mock_repo.expect_create().never();

        let service = UserService::new(mock_repo);
        let result = service.create_user(create_input("jan@x.com")).await;

        assert!(matches!(result, Err(UserError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn test_create_user_returns_view() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo.expect_email_exists().returning(|_, _| Ok(false));
        mock_repo
            .expect_create()
            .times(1)
            .returning(|input| Ok(User::new(3, input, Utc::now())));

        let service = UserService::new(mock_repo);
        let user = service.create_user(create_input("jan@x.com")).await.unwrap();

        assert_eq!(user.id, 3);
        assert_eq!(user.email, "jan@x.com");
    }

    #[tokio::test]
    async fn test_create_user_surfaces_race_lost_in_store() {
        let mut mock_repo = MockUserRepository::new();

        // Check passes, but another request wins the write lock first
        mock_repo.expect_email_exists().returning(|_, _| Ok(false));
        mock_repo
            .expect_create()
            .returning(|input| Err(UserError::DuplicateEmail(input.email)));

        let service = UserService::new(mock_repo);
        let result = service.create_user(create_input("jan@x.com")).await;

        assert!(matches!(result, Err(UserError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_get_by_id()
            .with(eq(99))
            .returning(|_| Ok(None));

        let service = UserService::new(mock_repo);
        assert!(matches!(
            service.get_user(99).await,
            Err(UserError::NotFound(99))
        ));
    }

    #[tokio::test]
    async fn test_update_user_missing_target_is_not_found() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_get_by_id().returning(|_| Ok(None));
        mock_repo.expect_email_exists().never();
        mock_repo.expect_update().never();

        let service = UserService::new(mock_repo);
        let result = service.update_user(8, update_input("jan@x.com")).await;

        assert!(matches!(result, Err(UserError::NotFound(8))));
    }

    #[tokio::test]
    async fn test_update_user_excludes_self_from_email_check() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_get_by_id()
            .returning(|id| Ok(Some(stored(id, "jan@x.com"))));
        mock_repo
            .expect_email_exists()
            .with(eq("jan@x.com"), eq(Some(1)))
            .returning(|_, _| Ok(false));
        mock_repo
            .expect_update()
            .with(eq(1), always())
            .times(1)
            .returning(|id, input| {
                let mut user = stored(id, "jan@x.com");
                user.apply_update(input);
                Ok(user)
            });

        let service = UserService::new(mock_repo);
        assert!(service.update_user(1, update_input("jan@x.com")).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_user_conflict() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_get_by_id()
            .returning(|id| Ok(Some(stored(id, "jan@x.com"))));
        mock_repo.expect_email_exists().returning(|_, _| Ok(true));
        mock_repo.expect_update().never();

        let service = UserService::new(mock_repo);
        let result = service.update_user(1, update_input("bob@x.com")).await;

        assert!(matches!(result, Err(UserError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn test_internal_errors_propagate() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_list_all()
            .returning(|| Err(UserError::Internal("store unavailable".to_string())));

        let service = UserService::new(mock_repo);
        assert!(matches!(
            service.list_users().await,
            Err(UserError::Internal(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_user_not_found() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_delete()
            .with(eq(99))
            .returning(|id| Err(UserError::NotFound(id)));

        let service = UserService::new(mock_repo);
        assert!(matches!(
            service.delete_user(99).await,
            Err(UserError::NotFound(99))
        ));
    }
}
