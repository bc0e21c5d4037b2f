// Docmeta Parser Library
// Pest-based parser for doc-comment type declarations and import statements

pub mod ast;
pub mod error;
pub mod parser;

pub use ast::*;
pub use error::*;
pub use parser::*;

// Re-export parser rule for manual testing
pub use parser::Rule;


/// Parse a declaration such as `int[]|\DateTime|null` into its union members
pub fn parse_declaration(input: &str) -> Result<TypeDeclarationSyntax, ParseError> {
    parser::DocmetaParser::parse_declaration(input)
}

/// Parse an import statement such as `Vendor\Package\Name as Alias`
pub fn parse_import_statement(input: &str) -> Result<ImportStatement, ParseError> {
    parser::DocmetaParser::parse_import_statement(input)
}

// Version and metadata
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
