// Type declaration parsing
// Splits a declaration into union members and classifies each member's name

use crate::ast::*;
use crate::error::*;
use crate::parser::{DocmetaParser, Rule};
use lazy_static::lazy_static;
use pest::Parser;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy)]
enum Keyword {
    Primitive(PrimitiveKind),
    SelfType,
    Unhandled,
}

lazy_static! {
    /// Reserved words of the declaration language. Anything not listed here is a class name.
    static ref KEYWORDS: HashMap<&'static str, Keyword> = {
        let mut keywords: HashMap<&'static str, Keyword> = PrimitiveKind::ALL
            .iter()
            .map(|kind| (kind.keyword(), Keyword::Primitive(*kind)))
            .collect();

        keywords.insert("self", Keyword::SelfType);

        for unhandled in [
            "callable",
            "callback",
            "iterable",
            "number",
            "numeric",
            "static",
            "resource",
            "resource (closed)",
        ] {
            keywords.insert(unhandled, Keyword::Unhandled);
        }

        keywords
    };
}

impl DocmetaParser {
    /// Parse a raw declaration such as `int[]|\DateTime|null`
    pub fn parse_declaration(input: &str) -> ParseResult<TypeDeclarationSyntax> {
        let mut pairs = Self::parse(Rule::declaration, input)
            .map_err(|e| ParseError::from_pest_error(e, input.to_string()))?;

        let mut terms = Vec::new();

        if let Some(declaration) = pairs.next() {
            for alternative in declaration.into_inner() {
                if alternative.as_rule() != Rule::alternative {
                    continue;
                }
                terms.push(Self::parse_alternative(alternative, input)?);
            }
        }

        Ok(TypeDeclarationSyntax {
            source: input.to_string(),
            terms,
        })
    }

    fn parse_alternative(
        pair: pest::iterators::Pair<Rule>,
        input: &str,
    ) -> ParseResult<TypeTermSyntax> {
        let alternative_span = Self::span_from_pair(&pair);

        let Some(term) = pair.into_inner().next() else {
            return Err(ParseError::EmptyAlternative {
                src: input.to_string(),
                span: alternative_span.to_source_span(),
            });
        };

        let span = Self::span_from_pair(&term);

        let mut name = None;
        let mut is_array = false;

        for part in term.into_inner() {
            match part.as_rule() {
                Rule::array_suffix => is_array = true,
                _ => name = Some(Self::parse_type_name(part)),
            }
        }

        match name {
            Some(name) => Ok(TypeTermSyntax {
                name,
                is_array,
                span,
            }),
            None => Err(ParseError::ArrayWithoutElementType {
                src: input.to_string(),
                span: span.to_source_span(),
            }),
        }
    }

    fn parse_type_name(pair: pest::iterators::Pair<Rule>) -> TypeName {
        match pair.as_rule() {
            Rule::this_marker => TypeName::This,
            Rule::qualified_name => {
                let text = pair.as_str();
                TypeName::Class {
                    name: text
                        .strip_prefix(NAMESPACE_SEPARATOR)
                        .unwrap_or(text)
                        .to_string(),
                    fully_qualified: true,
                }
            }
            _ => Self::classify(pair.as_str()),
        }
    }

    fn classify(text: &str) -> TypeName {
        match KEYWORDS.get(text) {
            Some(Keyword::Primitive(kind)) => TypeName::Primitive(*kind),
            Some(Keyword::SelfType) => TypeName::SelfType,
            Some(Keyword::Unhandled) => TypeName::Unhandled(text.to_string()),
            None => TypeName::Class {
                name: text.to_string(),
                fully_qualified: false,
            },
        }
    }
}
