//! Self-assignable roles.

use serenity::all::{CacheHttp, GuildId, RoleId, UserId};

use crate::error::AppError;

/// What toggling a role did to a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleChange {
    Added,
    Removed,
}

impl RoleChange {
    /// Removes the role from members who have it, gives it to everyone else.
    pub fn for_member(member_roles: &[RoleId], role_id: RoleId) -> Self {
        if member_roles.contains(&role_id) {
            Self::Removed
        } else {
            Self::Added
        }
    }

    pub fn message(&self, role_name: &str) -> String {
        match self {
            Self::Added => format!("Gave you the `{role_name}` role."),
            Self::Removed => format!("Removed your `{role_name}` role."),
        }
    }
}

/// Gives a member a role they lack, or takes away one they have.
pub async fn toggle_member_role(
    cache_http: impl CacheHttp,
    guild_id: GuildId,
    user_id: UserId,
    role_id: RoleId,
) -> Result<RoleChange, AppError> {
    let member = guild_id.member(&cache_http, user_id).await?;
    let change = RoleChange::for_member(&member.roles, role_id);

    match change {
        RoleChange::Added => member.add_role(cache_http.http(), role_id).await?,
        RoleChange::Removed => member.remove_role(cache_http.http(), role_id).await?,
    }

    Ok(change)
}
