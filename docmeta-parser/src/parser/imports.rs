// Import statement parsing
// `Vendor\Package\Name` and `Vendor\Package\Name as Alias`

use crate::ast::*;
use crate::error::*;
use crate::parser::{DocmetaParser, Rule};
use pest::Parser;

impl DocmetaParser {
    /// Parse the body of an import statement (without `use` and `;`)
    pub fn parse_import_statement(input: &str) -> ParseResult<ImportStatement> {
        let statement = Self::parse(Rule::import_statement, input)
            .map_err(|e| ParseError::from_pest_import_error(e, input.to_string()))?
            .next()
            .ok_or_else(|| ParseError::InvalidImportStatement {
                src: input.to_string(),
                span: Span::new(0, input.len()).to_source_span(),
            })?;

        let span = Self::span_from_pair(&statement);
        let mut path = String::new();
        let mut explicit_alias = None;

        for pair in statement.into_inner() {
            match pair.as_rule() {
                Rule::import_path => {
                    let text = pair.as_str();
                    path = text
                        .strip_prefix(NAMESPACE_SEPARATOR)
                        .unwrap_or(text)
                        .to_string();
                }
                Rule::import_alias => {
                    explicit_alias = pair
                        .into_inner()
                        .find(|part| part.as_rule() == Rule::identifier)
                        .map(|identifier| identifier.as_str().to_string());
                }
                _ => {}
            }
        }

        Ok(ImportStatement {
            path,
            explicit_alias,
            span,
        })
    }
}
