//! Go oracle integration: command construction and output parsing.

pub mod operation;
pub mod parser;

pub use operation::GoOracleFindDefinition;
pub use parser::parse_find_definition;
