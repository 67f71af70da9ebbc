/// Batched `UNION ALL` query compilation with global placeholder numbering.
pub mod builder;
/// The closed set of permission checks and the SQL enums they reference.
pub mod check;
/// Factories for common check groups (table CRUD, entity access, admin access).
pub mod presets;
/// Decoding of tagged result rows into typed values.
pub mod results;

pub use builder::{BulkPermissionBuilder, BulkQuery, ParamCursor};
pub use check::{PermissionCheck, PermissionCheckKind, SystemAction, SystemResource};
pub use results::{
    PermissionResults, PermissionRow, PermissionValue, ResultType, parse_results,
    parse_results_json,
};
