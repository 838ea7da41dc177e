//! User registration.

use std::sync::Arc;

use petpals_domain::{Email, User, UserId};

use crate::infrastructure::ports::{ClockPort, RepoError, UserRepo};

use super::ManagementError;

pub struct UserManagement {
    users: Arc<dyn UserRepo>,
    clock: Arc<dyn ClockPort>,
}

impl UserManagement {
    pub fn new(users: Arc<dyn UserRepo>, clock: Arc<dyn ClockPort>) -> Self {
        Self { users, clock }
    }

    pub async fn register(&self, email: String) -> Result<User, ManagementError> {
        let email: Email = email
            .try_into()
            .map_err(|e| ManagementError::InvalidInput(format!("Invalid email: {}", e)))?;

        if self.users.get_by_email(&email).await?.is_some() {
            return Err(ManagementError::Conflict(format!(
                "Email {} is already registered",
                email
            )));
        }

        let user = User::new(self.users.next_id().await?, email, self.clock.now());
        self.users.save(&user).await.map_err(|e| match e {
            RepoError::ConstraintViolation(msg) => ManagementError::Conflict(msg),
            other => ManagementError::Repo(other),
        })?;

        tracing::info!(user_id = %user.id(), "User registered");
        Ok(user)
    }

    pub async fn get(&self, id: UserId) -> Result<User, ManagementError> {
        self.users
            .get(id)
            .await?
            .ok_or_else(|| ManagementError::NotFound {
                entity_type: "User",
                id: id.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::MockUserRepo;
    use crate::use_cases::management::test_support::{clock, now};

    #[tokio::test]
    async fn when_email_is_new_user_is_saved() {
        let mut users = MockUserRepo::new();
        users.expect_get_by_email().returning(|_| Ok(None));
        users.expect_next_id().returning(|| Ok(UserId::new(3)));
        users
            .expect_save()
            .withf(|user: &User| user.email().as_str() == "bruce@wayne.com")
            .times(1)
            .returning(|_| Ok(()));

        let management = UserManagement::new(Arc::new(users), clock());
        let user = management
            .register("  Bruce@Wayne.com ".to_string())
            .await
            .unwrap();

        assert_eq!(user.id(), UserId::new(3));
        assert_eq!(user.created_at(), now());
    }

    #[tokio::test]
    async fn when_email_exists_returns_conflict() {
        let mut users = MockUserRepo::new();
        users.expect_get_by_email().returning(|email| {
            Ok(Some(User::new(UserId::new(1), email.clone(), now())))
        });
        users.expect_save().never();

        let management = UserManagement::new(Arc::new(users), clock());
        let result = management.register("bruce@wayne.com".to_string()).await;

        assert!(matches!(result, Err(ManagementError::Conflict(_))));
    }

    #[tokio::test]
    async fn when_email_is_malformed_returns_invalid_input() {
        let management = UserManagement::new(Arc::new(MockUserRepo::new()), clock());
        let result = management.register("not-an-email".to_string()).await;
        assert!(matches!(result, Err(ManagementError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn when_save_races_on_email_returns_conflict() {
        let mut users = MockUserRepo::new();
        users.expect_get_by_email().returning(|_| Ok(None));
        users.expect_next_id().returning(|| Ok(UserId::new(2)));
        users
            .expect_save()
            .returning(|_| Err(RepoError::constraint("email taken")));

        let management = UserManagement::new(Arc::new(users), clock());
        let result = management.register("alfred@wayne.com".to_string()).await;

        assert!(matches!(result, Err(ManagementError::Conflict(_))));
    }
}
