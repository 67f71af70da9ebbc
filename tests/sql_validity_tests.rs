//! Generated SQL must be accepted by a PostgreSQL-dialect parser.

mod support;

use serde_json::json;
use sqlgate::filter::FilterCondition;
use sqlgate::filter::fallback::{DefaultCompiler, StandardCompiler};
use sqlgate::permission::presets::{admin_access, entity_access, table_crud};
use sqlgate::permission::{BulkPermissionBuilder, PermissionCheck, SystemAction, SystemResource};
use sqlparser::ast::{SetExpr, Statement};
use support::{fragment, parse_expr, parse_statements, sample_context};
use uuid::Uuid;

#[test]
fn handler_fragments_parse_as_expressions() {
    let fragments = [
        fragment("metadata", "keyEquals", json!("active:true")),
        fragment("metadata", "keyEquals", json!("status:it's open")),
        fragment("metadata", "containsText", json!("%draft%")),
        fragment("tags", "arrayContains", json!(["a", "b"])),
        fragment("tags", "arrayContainedBy", json!(["a"])),
        fragment("tags", "overlaps", json!(["x", "y"])),
        fragment("created_at", "eq", json!("2024-03-15")),
        fragment("updated_at", "notBetween", json!(["2024-01-01", "2024-12-31"])),
        fragment("price", "between", json!("1, 99")),
    ];
    for sql in &fragments {
        parse_expr(sql);
    }
}

#[test]
fn fallback_fragments_parse_as_expressions() {
    let ctx = sample_context();
    for (column, operator, value) in [
        ("title", "eq", json!("O'Reilly")),
        ("title", "neq", json!(null)),
        ("price", "gte", json!(10.5)),
        ("title", "in", json!(["a", "b"])),
        ("title", "notIn", json!("a")),
        ("title", "startsWith", json!("50%")),
        ("price", "between", json!([1, 2])),
    ] {
        let sql = StandardCompiler
            .compile(&FilterCondition::new(column, operator, value), &ctx)
            .expect("fallback should compile");
        parse_expr(&sql);
    }
}

#[test]
fn bulk_query_parses_as_one_union_statement() {
    let id = Uuid::from_u128(42);
    let mut checks = table_crud("posts", "public", "posts");
    checks.extend(admin_access(&[(SystemResource::System, SystemAction::Update)]));
    checks.extend(entity_access::role(id));
    checks.push(PermissionCheck::AccountRoleModify {
        key: "assign".into(),
        account_id: id,
        target_account_id: id,
        role_id: id,
        action: SystemAction::Insert,
    });
    checks.push(PermissionCheck::UserMaxRoleRank { key: "rank".into() });
    checks.push(PermissionCheck::CurrentUserAccount { key: "me".into() });

    let query = BulkPermissionBuilder::default().build_query(&checks);
    let statements = parse_statements(&query.query);
    assert_eq!(statements.len(), 1);
    let Statement::Query(q) = &statements[0] else {
        panic!("expected a query, got {:?}", statements[0]);
    };
    assert!(matches!(*q.body, SetExpr::SetOperation { .. }));
}
