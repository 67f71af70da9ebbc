use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::PermissionError;
use crate::permission::results::ResultType;

/// Action granted by a permission, mirroring the `system_action` SQL enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemAction {
    /// Read rows.
    Select,
    /// Create rows.
    Insert,
    /// Modify rows.
    Update,
    /// Remove rows.
    Delete,
}

impl SystemAction {
    /// SQL enum label.
    pub fn as_str(self) -> &'static str {
        match self {
            SystemAction::Select => "select",
            SystemAction::Insert => "insert",
            SystemAction::Update => "update",
            SystemAction::Delete => "delete",
        }
    }
}

impl fmt::Display for SystemAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Administrative resource, mirroring the `system_resource` SQL enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemResource {
    /// Admin accounts.
    Account,
    /// Roles.
    Role,
    /// Permissions and permission groups.
    Permission,
    /// Audit logs.
    Log,
    /// Table metadata.
    Table,
    /// Authentication users.
    AuthUser,
    /// System settings.
    System,
}

impl SystemResource {
    /// SQL enum label.
    pub fn as_str(self) -> &'static str {
        match self {
            SystemResource::Account => "account",
            SystemResource::Role => "role",
            SystemResource::Permission => "permission",
            SystemResource::Log => "log",
            SystemResource::Table => "table",
            SystemResource::AuthUser => "auth_user",
            SystemResource::System => "system",
        }
    }
}

impl fmt::Display for SystemResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One authorization predicate or scalar lookup to run inside a batch.
///
/// Every variant carries the caller's correlation `key`, which must be unique
/// within a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum PermissionCheck {
    /// Table-level right, optionally narrowed to one column.
    Data {
        /// Correlation key.
        key: String,
        /// Schema of the table.
        schema: String,
        /// Table name.
        table: String,
        /// Column to check instead of the whole table.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        column: Option<String>,
        /// Requested action.
        action: SystemAction,
    },
    /// Right over a system resource.
    Admin {
        /// Correlation key.
        key: String,
        /// Resource acted on.
        resource: SystemResource,
        /// Requested action.
        action: SystemAction,
    },
    /// Can the current actor act on this role.
    RoleAction {
        /// Correlation key.
        key: String,
        /// Target role.
        role_id: Uuid,
        /// Requested action.
        action: SystemAction,
    },
    /// Can the current actor act on this account.
    AccountAction {
        /// Correlation key.
        key: String,
        /// Target account.
        account_id: Uuid,
        /// Requested action.
        action: SystemAction,
    },
    /// Can the current actor act on this permission.
    PermissionAction {
        /// Correlation key.
        key: String,
        /// Target permission.
        permission_id: Uuid,
        /// Requested action.
        action: SystemAction,
    },
    /// Can the current actor act on this permission group.
    PermissionGroupAction {
        /// Correlation key.
        key: String,
        /// Target permission group.
        group_id: Uuid,
        /// Requested action.
        action: SystemAction,
    },
    /// Can `account_id` assign or revoke `role_id` on `target_account_id`.
    AccountRoleModify {
        /// Correlation key.
        key: String,
        /// Acting account.
        account_id: Uuid,
        /// Account whose roles change.
        target_account_id: Uuid,
        /// Role being assigned or revoked.
        role_id: Uuid,
        /// Requested action.
        action: SystemAction,
    },
    /// Highest role rank held by the current actor.
    UserMaxRoleRank {
        /// Correlation key.
        key: String,
    },
    /// Account id of the current actor.
    CurrentUserAccount {
        /// Correlation key.
        key: String,
    },
}

/// Discriminant of [`PermissionCheck`], matching its JSON `type` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PermissionCheckKind {
    /// `data`
    Data,
    /// `admin`
    Admin,
    /// `role_action`
    RoleAction,
    /// `account_action`
    AccountAction,
    /// `permission_action`
    PermissionAction,
    /// `permission_group_action`
    PermissionGroupAction,
    /// `account_role_modify`
    AccountRoleModify,
    /// `user_max_role_rank`
    UserMaxRoleRank,
    /// `current_user_account`
    CurrentUserAccount,
}

impl PermissionCheckKind {
    /// Every kind, in declaration order.
    pub const ALL: [PermissionCheckKind; 9] = [
        PermissionCheckKind::Data,
        PermissionCheckKind::Admin,
        PermissionCheckKind::RoleAction,
        PermissionCheckKind::AccountAction,
        PermissionCheckKind::PermissionAction,
        PermissionCheckKind::PermissionGroupAction,
        PermissionCheckKind::AccountRoleModify,
        PermissionCheckKind::UserMaxRoleRank,
        PermissionCheckKind::CurrentUserAccount,
    ];

    /// Parse a JSON `type` tag.
    pub fn parse(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == tag)
    }

    /// JSON `type` tag.
    pub fn as_str(self) -> &'static str {
        match self {
            PermissionCheckKind::Data => "data",
            PermissionCheckKind::Admin => "admin",
            PermissionCheckKind::RoleAction => "role_action",
            PermissionCheckKind::AccountAction => "account_action",
            PermissionCheckKind::PermissionAction => "permission_action",
            PermissionCheckKind::PermissionGroupAction => "permission_group_action",
            PermissionCheckKind::AccountRoleModify => "account_role_modify",
            PermissionCheckKind::UserMaxRoleRank => "user_max_role_rank",
            PermissionCheckKind::CurrentUserAccount => "current_user_account",
        }
    }

    /// Type tag of the result rows this kind produces.
    pub fn result_type(self) -> ResultType {
        match self {
            PermissionCheckKind::UserMaxRoleRank => ResultType::Number,
            PermissionCheckKind::CurrentUserAccount => ResultType::String,
            _ => ResultType::Boolean,
        }
    }
}

impl fmt::Display for PermissionCheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PermissionCheck {
    /// Discriminant of this check.
    pub fn kind(&self) -> PermissionCheckKind {
        match self {
            PermissionCheck::Data { .. } => PermissionCheckKind::Data,
            PermissionCheck::Admin { .. } => PermissionCheckKind::Admin,
            PermissionCheck::RoleAction { .. } => PermissionCheckKind::RoleAction,
            PermissionCheck::AccountAction { .. } => PermissionCheckKind::AccountAction,
            PermissionCheck::PermissionAction { .. } => PermissionCheckKind::PermissionAction,
            PermissionCheck::PermissionGroupAction { .. } => {
                PermissionCheckKind::PermissionGroupAction
            }
            PermissionCheck::AccountRoleModify { .. } => PermissionCheckKind::AccountRoleModify,
            PermissionCheck::UserMaxRoleRank { .. } => PermissionCheckKind::UserMaxRoleRank,
            PermissionCheck::CurrentUserAccount { .. } => PermissionCheckKind::CurrentUserAccount,
        }
    }

    /// Correlation key.
    pub fn key(&self) -> &str {
        match self {
            PermissionCheck::Data { key, .. }
            | PermissionCheck::Admin { key, .. }
            | PermissionCheck::RoleAction { key, .. }
            | PermissionCheck::AccountAction { key, .. }
            | PermissionCheck::PermissionAction { key, .. }
            | PermissionCheck::PermissionGroupAction { key, .. }
            | PermissionCheck::AccountRoleModify { key, .. }
            | PermissionCheck::UserMaxRoleRank { key }
            | PermissionCheck::CurrentUserAccount { key } => key,
        }
    }

    /// Decode one check from JSON, reporting unknown `type` tags by name.
    pub fn from_value(value: &Value) -> Result<Self, PermissionError> {
        let tag = match value.get("type") {
            Some(Value::String(tag)) => tag.as_str(),
            Some(other) => return Err(PermissionError::UnknownCheckType(other.to_string())),
            None => return Err(PermissionError::UnknownCheckType("<missing>".to_string())),
        };
        let kind = PermissionCheckKind::parse(tag)
            .ok_or_else(|| PermissionError::UnknownCheckType(tag.to_string()))?;
        serde_json::from_value(value.clone()).map_err(|e| PermissionError::InvalidCheck {
            kind: kind.as_str().to_string(),
            reason: e.to_string(),
        })
    }

    /// Decode a JSON array of checks.
    pub fn list_from_json(json: &str) -> Result<Vec<Self>, PermissionError> {
        let values: Vec<Value> = serde_json::from_str(json).map_err(|e| {
            PermissionError::InvalidCheck {
                kind: "<list>".to_string(),
                reason: e.to_string(),
            }
        })?;
        values.iter().map(Self::from_value).collect()
    }
}
