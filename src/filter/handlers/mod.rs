//! Operator handlers.
//!
//! Each handler claims a slice of (operator, column type, value shape)
//! combinations through [`FilterHandler::can_handle`] and renders a SQL boolean
//! fragment for it. The slices are disjoint, so at most one handler claims any
//! condition; anything unclaimed belongs to the fallback compiler.

use crate::error::FilterError;
use crate::filter::condition::{FilterCondition, FilterContext};

/// `arrayContains`, `arrayContainedBy`, `overlaps` on any column.
pub mod array;
/// Calendar-day equality and two-element ranges on date-like columns.
pub mod date;
/// JSON key, path and containment operators on `json`/`jsonb` columns.
pub mod json;
/// `between`/`notBetween` with a comma-encoded string value.
pub mod range;

pub use array::ArrayHandler;
pub use date::DateHandler;
pub use json::JsonHandler;
pub use range::CommaRangeHandler;

/// A unit translating one filter-condition shape into a SQL boolean expression.
pub trait FilterHandler: Send + Sync {
    /// Stable name, used in logs and to enumerate a registry.
    fn name(&self) -> &'static str;

    /// Whether this handler owns `condition`.
    fn can_handle(&self, condition: &FilterCondition, context: &FilterContext) -> bool;

    /// Render the fragment for a claimed condition.
    ///
    /// `Ok(None)` means the handler declined after all and the condition falls
    /// through to the fallback compiler.
    fn process(
        &self,
        condition: &FilterCondition,
        context: &FilterContext,
    ) -> Result<Option<String>, FilterError>;
}
