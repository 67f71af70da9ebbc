use std::fmt;

/// Operators owned by the JSON handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonOperator {
    /// `"col" ? 'key'`
    HasKey,
    /// `"col" @> '{"key": "val"}'`, value given as `"key:val"`.
    KeyEquals,
    /// `"col" #> '{a,b}' IS NOT NULL`
    PathExists,
    /// `"col"::text ILIKE 'pattern'`
    ContainsText,
}

impl JsonOperator {
    /// All operators, in declaration order.
    pub const ALL: [JsonOperator; 4] = [
        JsonOperator::HasKey,
        JsonOperator::KeyEquals,
        JsonOperator::PathExists,
        JsonOperator::ContainsText,
    ];

    /// Parse an operator token.
    pub fn parse(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.token() == token)
    }

    /// Operator token as sent by clients.
    pub fn token(self) -> &'static str {
        match self {
            JsonOperator::HasKey => "hasKey",
            JsonOperator::KeyEquals => "keyEquals",
            JsonOperator::PathExists => "pathExists",
            JsonOperator::ContainsText => "containsText",
        }
    }
}

/// Operators owned by the array handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrayOperator {
    /// Left array contains every element of the right.
    ArrayContains,
    /// Left array is contained by the right.
    ArrayContainedBy,
    /// The arrays share at least one element.
    Overlaps,
}

impl ArrayOperator {
    /// All operators, in declaration order.
    pub const ALL: [ArrayOperator; 3] = [
        ArrayOperator::ArrayContains,
        ArrayOperator::ArrayContainedBy,
        ArrayOperator::Overlaps,
    ];

    /// Parse an operator token.
    pub fn parse(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.token() == token)
    }

    /// Operator token as sent by clients.
    pub fn token(self) -> &'static str {
        match self {
            ArrayOperator::ArrayContains => "arrayContains",
            ArrayOperator::ArrayContainedBy => "arrayContainedBy",
            ArrayOperator::Overlaps => "overlaps",
        }
    }

    /// `PostgreSQL` operator symbol.
    pub fn sql_operator(self) -> &'static str {
        match self {
            ArrayOperator::ArrayContains => "@>",
            ArrayOperator::ArrayContainedBy => "<@",
            ArrayOperator::Overlaps => "&&",
        }
    }
}

/// Inclusive range operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeOperator {
    /// `BETWEEN a AND b`
    Between,
    /// `NOT BETWEEN a AND b`
    NotBetween,
}

impl RangeOperator {
    /// Parse an operator token.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "between" => Some(RangeOperator::Between),
            "notBetween" => Some(RangeOperator::NotBetween),
            _ => None,
        }
    }

    /// SQL keyword(s) preceding the bounds.
    pub fn sql_keyword(self) -> &'static str {
        match self {
            RangeOperator::Between => "BETWEEN",
            RangeOperator::NotBetween => "NOT BETWEEN",
        }
    }
}

impl fmt::Display for RangeOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sql_keyword())
    }
}

/// Operators understood by [`crate::filter::fallback::StandardCompiler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardOperator {
    /// `=`, or `IS NULL` against null.
    Eq,
    /// `<>`, or `IS NOT NULL` against null.
    Neq,
    /// `<`
    Lt,
    /// `<=`
    Lte,
    /// `>`
    Gt,
    /// `>=`
    Gte,
    /// `IN (...)`
    In,
    /// `NOT IN (...)`
    NotIn,
    /// Case-insensitive substring match.
    Contains,
    /// Case-insensitive prefix match.
    StartsWith,
    /// Case-insensitive suffix match.
    EndsWith,
    /// `IS NULL`
    IsNull,
    /// `IS NOT NULL`
    NotNull,
    /// Inclusive range over a two-element list.
    Range(RangeOperator),
}

impl StandardOperator {
    /// Parse an operator token.
    pub fn parse(token: &str) -> Option<Self> {
        let op = match token {
            "eq" => StandardOperator::Eq,
            "neq" => StandardOperator::Neq,
            "lt" => StandardOperator::Lt,
            "lte" => StandardOperator::Lte,
            "gt" => StandardOperator::Gt,
            "gte" => StandardOperator::Gte,
            "in" => StandardOperator::In,
            "notIn" => StandardOperator::NotIn,
            "contains" => StandardOperator::Contains,
            "startsWith" => StandardOperator::StartsWith,
            "endsWith" => StandardOperator::EndsWith,
            "isNull" => StandardOperator::IsNull,
            "notNull" => StandardOperator::NotNull,
            other => return RangeOperator::parse(other).map(StandardOperator::Range),
        };
        Some(op)
    }
}
