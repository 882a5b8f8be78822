use crate::domain::event::Event;
use crate::error::{BookingError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Client,
    Admin,
}

/// Explicit request context. Every engine operation takes one; there is
/// no ambient current-user state to consult.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: u32,
    pub role: Role,
}

impl Actor {
    pub fn client(user_id: u32) -> Self {
        Self {
            user_id,
            role: Role::Client,
        }
    }

    pub fn admin(user_id: u32) -> Self {
        Self {
            user_id,
            role: Role::Admin,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn owns(&self, event: &Event) -> bool {
        event.client_id == self.user_id
    }

    /// Owner-only operations: editing, paying, deleting.
    pub fn require_owner(&self, event: &Event) -> Result<()> {
        if self.owns(event) {
            Ok(())
        } else {
            Err(BookingError::validation(
                "You do not have permission to modify this event",
            ))
        }
    }

    /// Read access: the owner or any admin.
    pub fn require_view(&self, event: &Event) -> Result<()> {
        if self.owns(event) || self.is_admin() {
            Ok(())
        } else {
            Err(BookingError::validation(
                "You do not have permission to view this event",
            ))
        }
    }

    pub fn require_admin(&self) -> Result<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(BookingError::validation("Admin access required"))
        }
    }
}
