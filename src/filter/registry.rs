use crate::config::TimezoneSetting;
use crate::error::FilterError;
use crate::filter::condition::{FilterCondition, FilterContext};
use crate::filter::handlers::{
    ArrayHandler, CommaRangeHandler, DateHandler, FilterHandler, JsonHandler,
};

/// Outcome of offering a condition to the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Compiled {
    /// A handler rendered this SQL boolean fragment.
    Fragment(String),
    /// No handler produced SQL; the fallback compiler owns the condition.
    NotHandled,
}

impl Compiled {
    /// The fragment, if one was produced.
    pub fn fragment(&self) -> Option<&str> {
        match self {
            Compiled::Fragment(sql) => Some(sql),
            Compiled::NotHandled => None,
        }
    }
}

/// Ordered list of operator handlers.
///
/// The first handler whose `can_handle` accepts a condition renders it. The
/// built-in handlers claim disjoint conditions, so order only matters for
/// handlers added with [`HandlerRegistry::register`].
pub struct HandlerRegistry {
    handlers: Vec<Box<dyn FilterHandler>>,
}

impl HandlerRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// The built-in handlers, with calendar days taken in `timezone`.
    pub fn with_defaults(timezone: TimezoneSetting) -> Self {
        let mut registry = Self::new();
        registry.register(JsonHandler);
        registry.register(ArrayHandler);
        registry.register(DateHandler::new(timezone));
        registry.register(CommaRangeHandler);
        registry
    }

    /// Append a handler; it is tried after every handler already registered.
    pub fn register(&mut self, handler: impl FilterHandler + 'static) {
        self.handlers.push(Box::new(handler));
    }

    /// Names of the registered handlers, in dispatch order.
    pub fn handler_names(&self) -> Vec<&'static str> {
        self.handlers.iter().map(|h| h.name()).collect()
    }

    /// Offer `condition` to the handlers in order.
    pub fn compile(
        &self,
        condition: &FilterCondition,
        context: &FilterContext,
    ) -> Result<Compiled, FilterError> {
        let Some(handler) = self
            .handlers
            .iter()
            .find(|h| h.can_handle(condition, context))
        else {
            return Ok(Compiled::NotHandled);
        };

        match handler.process(condition, context)? {
            Some(sql) if !sql.is_empty() => {
                tracing::debug!(
                    handler = handler.name(),
                    column = %condition.column,
                    operator = %condition.operator,
                    "compiled filter condition"
                );
                Ok(Compiled::Fragment(sql))
            }
            _ => {
                tracing::debug!(
                    handler = handler.name(),
                    column = %condition.column,
                    operator = %condition.operator,
                    "handler declined condition"
                );
                Ok(Compiled::NotHandled)
            }
        }
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::with_defaults(TimezoneSetting::default())
    }
}
