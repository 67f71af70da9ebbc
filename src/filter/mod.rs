/// Calendar helpers shared by date handling: parsing, day bounds, ISO output.
pub mod calendar;
/// Filter conditions, column metadata and the per-call filter context.
pub mod condition;
/// The `DefaultCompiler` seam and a standard operator implementation.
pub mod fallback;
/// Operator handlers and the `FilterHandler` trait they implement.
pub mod handlers;
/// Closed operator sets, one per handler domain.
pub mod operators;
/// Ordered handler dispatch.
pub mod registry;
/// Resolution of `__rel_date:` sentinels into concrete date spans.
pub mod relative_date;
/// Entry points compiling conditions into WHERE-clause fragments.
pub mod where_clause;

pub use condition::{ColumnDescriptor, FilterCondition, FilterContext, UiConfig};
pub use registry::{Compiled, HandlerRegistry};
pub use where_clause::{build_where_clause, compile_filter_condition};
