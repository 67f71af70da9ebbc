//! Factories for common groups of permission checks. No I/O.

use crate::permission::check::{PermissionCheck, SystemAction, SystemResource};

const CRUD: [SystemAction; 4] = [
    SystemAction::Select,
    SystemAction::Insert,
    SystemAction::Update,
    SystemAction::Delete,
];

/// Select/insert/update/delete checks on one table, keyed `{prefix}_{action}`.
pub fn table_crud(key_prefix: &str, schema: &str, table: &str) -> Vec<PermissionCheck> {
    CRUD.into_iter()
        .map(|action| PermissionCheck::Data {
            key: format!("{key_prefix}_{action}"),
            schema: schema.to_string(),
            table: table.to_string(),
            column: None,
            action,
        })
        .collect()
}

/// One `admin` check per `(resource, action)` pair, keyed `{resource}_{action}`.
pub fn admin_access(pairs: &[(SystemResource, SystemAction)]) -> Vec<PermissionCheck> {
    pairs
        .iter()
        .map(|&(resource, action)| PermissionCheck::Admin {
            key: format!("{resource}_{action}"),
            resource,
            action,
        })
        .collect()
}

/// Update/delete checks on a single entity.
///
/// The keys are always `canUpdate` and `canDelete`, so at most one of these
/// sets can go into a batch.
pub mod entity_access {
    use uuid::Uuid;

    use crate::permission::check::{PermissionCheck, SystemAction};

    /// Key of the update check.
    pub const CAN_UPDATE: &str = "canUpdate";
    /// Key of the delete check.
    pub const CAN_DELETE: &str = "canDelete";

    fn pair(make: impl Fn(String, SystemAction) -> PermissionCheck) -> Vec<PermissionCheck> {
        vec![
            make(CAN_UPDATE.to_string(), SystemAction::Update),
            make(CAN_DELETE.to_string(), SystemAction::Delete),
        ]
    }

    /// Checks on a role.
    pub fn role(role_id: Uuid) -> Vec<PermissionCheck> {
        pair(|key, action| PermissionCheck::RoleAction {
            key,
            role_id,
            action,
        })
    }

    /// Checks on a permission.
    pub fn permission(permission_id: Uuid) -> Vec<PermissionCheck> {
        pair(|key, action| PermissionCheck::PermissionAction {
            key,
            permission_id,
            action,
        })
    }

    /// Checks on a permission group.
    pub fn permission_group(group_id: Uuid) -> Vec<PermissionCheck> {
        pair(|key, action| PermissionCheck::PermissionGroupAction {
            key,
            group_id,
            action,
        })
    }
}
