// Docmeta Parser Error Handling
// Declaration and import statement errors with miette integration

use crate::parser::Rule;
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Errors raised while parsing a type declaration or an import statement
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Illegal empty data type declaration \"\". Perhaps was \"\", or invalid union type like \"int|\"?")]
    #[diagnostic(
        code(docmeta::parse::empty_alternative),
        help("Every member of a union needs a type; remove the stray `|`")
    )]
    EmptyAlternative {
        #[source_code]
        src: String,
        #[label("empty type")]
        span: SourceSpan,
    },

    #[error("Illegal array declaration \"[]\" without type.")]
    #[diagnostic(
        code(docmeta::parse::array_without_element_type),
        help("Name the element type in front of the suffix, e.g. `int[]`")
    )]
    ArrayWithoutElementType {
        #[source_code]
        src: String,
        #[label("array of what?")]
        span: SourceSpan,
    },

    #[error("Invalid data type declaration \"{src}\"")]
    #[diagnostic(
        code(docmeta::parse::invalid_syntax),
        help("{message}")
    )]
    InvalidSyntax {
        #[source_code]
        src: String,
        #[label("unexpected input")]
        span: SourceSpan,
        message: String,
    },

    #[error("Invalid import statement '{src}'")]
    #[diagnostic(
        code(docmeta::parse::invalid_import_statement),
        help("Use `Vendor\\Package\\Name` or `Vendor\\Package\\Name as Alias`")
    )]
    InvalidImportStatement {
        #[source_code]
        src: String,
        #[label("unexpected input")]
        span: SourceSpan,
    },
}

impl ParseError {
    /// Create a declaration syntax error from a Pest parsing error
    pub fn from_pest_error(error: pest::error::Error<Rule>, src: String) -> Self {
        let span = source_span_of(&error.location);

        let message = match &error.variant {
            pest::error::ErrorVariant::ParsingError { positives, .. } if !positives.is_empty() => {
                let expected: Vec<&str> = positives
                    .iter()
                    .map(rule_to_user_friendly_description)
                    .collect();
                format!("Expected {}", expected.join(" or "))
            }
            pest::error::ErrorVariant::ParsingError { .. } => {
                "Type names may only contain letters, digits, `_` and `\\`".to_string()
            }
            pest::error::ErrorVariant::CustomError { message } => message.clone(),
        };

        ParseError::InvalidSyntax { src, span, message }
    }

    /// Create an import statement error from a Pest parsing error
    pub fn from_pest_import_error(error: pest::error::Error<Rule>, src: String) -> Self {
        ParseError::InvalidImportStatement {
            span: source_span_of(&error.location),
            src,
        }
    }

    /// The input that failed to parse
    pub fn source_text(&self) -> &str {
        match self {
            ParseError::EmptyAlternative { src, .. }
            | ParseError::ArrayWithoutElementType { src, .. }
            | ParseError::InvalidSyntax { src, .. }
            | ParseError::InvalidImportStatement { src, .. } => src,
        }
    }

    /// Location of the problem within `source_text()`
    pub fn span(&self) -> SourceSpan {
        match self {
            ParseError::EmptyAlternative { span, .. }
            | ParseError::ArrayWithoutElementType { span, .. }
            | ParseError::InvalidSyntax { span, .. }
            | ParseError::InvalidImportStatement { span, .. } => *span,
        }
    }
}

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;

fn source_span_of(location: &pest::error::InputLocation) -> SourceSpan {
    match location {
        pest::error::InputLocation::Pos(pos) => SourceSpan::new((*pos).into(), 1),
        pest::error::InputLocation::Span((start, end)) => {
            SourceSpan::new((*start).into(), end - start)
        }
    }
}

fn rule_to_user_friendly_description(rule: &Rule) -> &'static str {
    match rule {
        Rule::alternative | Rule::term => "a type (like int, string[] or \\DateTime)",
        Rule::array_suffix => "the array suffix `[]`",
        Rule::name_path | Rule::identifier => "a type name",
        Rule::qualified_name | Rule::import_path => "a qualified type name",
        Rule::this_marker => "`$this`",
        Rule::import_alias | Rule::keyword_as => "`as`",
        Rule::EOI => "`|` or the end of the declaration",
        _ => "a type",
    }
}
