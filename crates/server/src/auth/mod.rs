//! Bearer token authentication

mod extractor;
pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtKeys};

use crate::error::AppError;
use models::user::UserRole;
use uuid::Uuid;

/// The authenticated caller, taken from a verified access token
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentUser {
    pub id: Uuid,
    pub role: UserRole,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::forbidden())
        }
    }

    pub fn require_inventory_access(&self) -> Result<(), AppError> {
        if self.role.can_manage_inventory() {
            Ok(())
        } else {
            Err(AppError::forbidden())
        }
    }

    /// Admins may act on anything, everyone else only on what they own
    pub fn require_owner_or_admin(&self, owner: Uuid) -> Result<(), AppError> {
        if self.is_admin() || self.id == owner {
            Ok(())
        } else {
            Err(AppError::forbidden())
        }
    }
}
