//! User account. Credentials live with the external authentication layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::UserId;
use crate::value_objects::Email;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    email: Email,
    created_at: DateTime<Utc>,
}

impl User {
    pub fn new(id: UserId, email: Email, now: DateTime<Utc>) -> Self {
        Self {
            id,
            email,
            created_at: now,
        }
    }

    #[inline]
    pub fn id(&self) -> UserId {
        self.id
    }

    #[inline]
    pub fn email(&self) -> &Email {
        &self.email
    }

    #[inline]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
