/// Literal encoding of runtime values into SQL tokens.
pub mod literal;
/// Identifier quoting and type-name normalization helpers.
pub mod names;
