//! Authentication collaborator
//!
//! Token storage and login live outside this crate. The session only needs to
//! know whether someone is logged in before it talks to the stores.

use crate::models::UserId;

/// The injected view of the logged-in user
pub trait AuthSession: Send + Sync {
    fn current_user_id(&self) -> Option<UserId>;

    fn is_authenticated(&self) -> bool {
        self.current_user_id().is_some()
    }
}

/// A fixed session, for hosts that resolve the user up front and for tests
#[derive(Debug, Clone, Default)]
pub struct StaticSession {
    user: Option<UserId>,
}

impl StaticSession {
    pub fn logged_in(user: UserId) -> Self {
        Self { user: Some(user) }
    }

    pub fn anonymous() -> Self {
        Self { user: None }
    }
}

impl AuthSession for StaticSession {
    fn current_user_id(&self) -> Option<UserId> {
        self.user
    }
}
