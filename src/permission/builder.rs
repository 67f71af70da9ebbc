//! Batches permission checks into one `UNION ALL` statement.
//!
//! Each check becomes a single-row `SELECT` of `(key, type, result)`. All
//! placeholders come from one [`ParamCursor`], so `$n` numbering is global and
//! strictly increasing across the batch whatever mix of checks it holds.

use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::config::{CompilerConfig, DEFAULT_PERMISSION_SCHEMA};
use crate::error::PermissionError;
use crate::permission::check::{PermissionCheck, SystemAction};

/// SQL text with its positional parameters, `params[i]` binding `$i+1`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BulkQuery {
    /// Statement text; empty for an empty batch.
    pub query: String,
    /// Parameter values in placeholder order.
    pub params: Vec<String>,
}

/// Hands out sequential `$n` placeholders and records their values.
#[derive(Debug, Clone)]
pub struct ParamCursor {
    next: usize,
    params: Vec<String>,
}

impl ParamCursor {
    /// A cursor whose first placeholder is `$1`.
    pub fn new() -> Self {
        Self {
            next: 1,
            params: Vec::new(),
        }
    }

    /// Record `value` and return its placeholder.
    pub fn bind(&mut self, value: impl Into<String>) -> String {
        let placeholder = format!("${}", self.next);
        self.next += 1;
        self.params.push(value.into());
        placeholder
    }

    /// Number of parameters bound so far.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// True when nothing has been bound.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Consume the cursor, returning the bound values.
    pub fn into_params(self) -> Vec<String> {
        self.params
    }
}

impl Default for ParamCursor {
    fn default() -> Self {
        Self::new()
    }
}

/// Compiles permission checks against the functions of one schema.
#[derive(Debug, Clone)]
pub struct BulkPermissionBuilder {
    schema: String,
}

impl BulkPermissionBuilder {
    /// Builder targeting functions in `schema`. The name is spliced into SQL
    /// text; use [`BulkPermissionBuilder::from_config`] for validated input.
    pub fn new(schema: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
        }
    }

    /// Builder using the config's (validated) permission schema.
    pub fn from_config(config: &CompilerConfig) -> Self {
        Self::new(config.permission_schema.clone())
    }

    /// Compile `checks` into one statement.
    #[tracing::instrument(level = "debug", skip_all, fields(checks = checks.len()))]
    pub fn build_query(&self, checks: &[PermissionCheck]) -> BulkQuery {
        if checks.is_empty() {
            return BulkQuery::default();
        }

        let mut cursor = ParamCursor::new();
        let clauses: Vec<String> = checks
            .iter()
            .map(|check| self.clause(check, &mut cursor))
            .collect();

        tracing::debug!(params = cursor.len(), "built permission batch");
        BulkQuery {
            query: clauses.join("\nUNION ALL\n"),
            params: cursor.into_params(),
        }
    }

    /// Decode raw JSON checks, then compile them.
    pub fn build_query_from_json(&self, checks: &[Value]) -> Result<BulkQuery, PermissionError> {
        let checks = checks
            .iter()
            .map(PermissionCheck::from_value)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.build_query(&checks))
    }

    fn clause(&self, check: &PermissionCheck, cursor: &mut ParamCursor) -> String {
        let key = cursor.bind(check.key());
        let result_type = check.kind().result_type();
        let call = self.predicate_call(check, cursor);
        format!("SELECT {key}::text AS key, '{result_type}' AS type, to_jsonb({call}) AS result")
    }

    fn predicate_call(&self, check: &PermissionCheck, cursor: &mut ParamCursor) -> String {
        let s = &self.schema;
        let action_cast = format!("::{s}.system_action");
        match check {
            PermissionCheck::Data {
                schema,
                table,
                column,
                action,
                ..
            } => {
                let action = cursor.bind(action.as_str());
                let schema = cursor.bind(schema.as_str());
                let table = cursor.bind(table.as_str());
                match column {
                    Some(column) => {
                        let column = cursor.bind(column.as_str());
                        format!(
                            "{s}.has_data_permission({action}{action_cast}, \
                             {schema}::text, {table}::text, {column}::text)"
                        )
                    }
                    None => format!(
                        "{s}.has_data_permission({action}{action_cast}, \
                         {schema}::text, {table}::text)"
                    ),
                }
            }
            PermissionCheck::Admin {
                resource, action, ..
            } => {
                let resource = cursor.bind(resource.as_str());
                let action = cursor.bind(action.as_str());
                format!(
                    "{s}.has_admin_permission({resource}::{s}.system_resource, \
                     {action}{action_cast})"
                )
            }
            PermissionCheck::RoleAction {
                role_id: id,
                action,
                ..
            } => entity_call(s, "can_action_role", id, *action, cursor),
            PermissionCheck::AccountAction {
                account_id: id,
                action,
                ..
            } => entity_call(s, "can_action_account", id, *action, cursor),
            PermissionCheck::PermissionAction {
                permission_id: id,
                action,
                ..
            } => entity_call(s, "can_action_permission", id, *action, cursor),
            PermissionCheck::PermissionGroupAction {
                group_id: id,
                action,
                ..
            } => entity_call(s, "can_action_permission_group", id, *action, cursor),
            PermissionCheck::AccountRoleModify {
                account_id,
                target_account_id,
                role_id,
                action,
                ..
            } => {
                let account = cursor.bind(account_id.to_string());
                let target = cursor.bind(target_account_id.to_string());
                let role = cursor.bind(role_id.to_string());
                let action = cursor.bind(action.as_str());
                format!(
                    "{s}.can_modify_account_role({account}::uuid, {target}::uuid, \
                     {role}::uuid, {action}{action_cast})"
                )
            }
            PermissionCheck::UserMaxRoleRank { .. } => {
                format!("{s}.get_user_max_role_rank({s}.get_current_user_account_id())")
            }
            PermissionCheck::CurrentUserAccount { .. } => {
                format!("{s}.get_current_user_account_id()")
            }
        }
    }
}

impl Default for BulkPermissionBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_PERMISSION_SCHEMA)
    }
}

fn entity_call(
    schema: &str,
    function: &str,
    id: &Uuid,
    action: SystemAction,
    cursor: &mut ParamCursor,
) -> String {
    let id = cursor.bind(id.to_string());
    let action = cursor.bind(action.as_str());
    format!("{schema}.{function}({id}::uuid, {action}::{schema}.system_action)")
}
