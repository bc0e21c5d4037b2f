// Docmeta Parser
// Pest-derived parser shared by the declaration and import statement front ends

mod declarations;
mod imports;

use crate::ast::Span;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "grammar.pest"]
pub struct DocmetaParser;

impl DocmetaParser {
    pub(crate) fn span_from_pair(pair: &pest::iterators::Pair<Rule>) -> Span {
        let span = pair.as_span();
        Span::new(span.start(), span.end())
    }
}
