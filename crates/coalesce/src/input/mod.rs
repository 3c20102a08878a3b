//! Input parsing and source data representation.

mod parser;
mod source;

pub use parser::{Parser, ParserConfig};
pub use source::{DataTable, SourceMetadata};
