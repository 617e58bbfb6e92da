use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};
use utoipa::ToSchema;

/// The role attached to an account, carried in access tokens
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum UserRole {
    Admin,
    Staff,
    #[default]
    Client,
}

impl UserRole {
    pub fn is_admin(self) -> bool {
        self == Self::Admin
    }

    /// Staff and admins can read and move stock
    pub fn can_manage_inventory(self) -> bool {
        matches!(self, Self::Admin | Self::Staff)
    }
}

#[cfg(feature = "database")]
string_column!(UserRole);
