use crate::model::UserId;
use serde::{Deserialize, Serialize};

/// Role carried by an authenticated account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Consumer,
    Vendor,
    Admin,
}

/// Who is driving a cart engine or a review request.
///
/// Issued by the external auth service; the core only reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Identity {
    Anonymous,
    User { user_id: UserId, role: Role },
}

impl Identity {
    pub fn consumer(user_id: UserId) -> Self {
        Identity::User {
            user_id,
            role: Role::Consumer,
        }
    }

    /// The user id, if this identity belongs to an authenticated consumer.
    pub fn consumer_id(&self) -> Option<UserId> {
        match self {
            Identity::User {
                user_id,
                role: Role::Consumer,
            } => Some(*user_id),
            _ => None,
        }
    }

    pub fn is_consumer(&self) -> bool {
        self.consumer_id().is_some()
    }
}
