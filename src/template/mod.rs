//! Template Reference Resolver.
//!
//! `references` builds the per-node set of valid `{{ … }}` expressions from
//! incoming edges; `complete` handles caret detection, ranking and
//! acceptance for the autocomplete popup.

pub mod complete;
pub mod references;

pub use complete::{Acceptance, MustacheContext, accept, context_at, insert_at, rank, suggest};
pub use references::{GLOBAL_REFERENCES, ROOT_REFERENCES, references_for};

use std::sync::LazyLock;

use regex::Regex;

pub(crate) const TRACING_TARGET: &str = "flowgraph::template";

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*([^{}]+?)\s*\}\}").expect("valid token regex"));

/// One `{{ expr }}` occurrence in a template string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Inner expression, trimmed.
    pub expr: String,
    /// Byte span of the whole token including braces.
    pub start: usize,
    pub end: usize,
}

impl Token {
    /// Identifier before the first `.` or `[`.
    pub fn root(&self) -> &str {
        root_of(&self.expr)
    }
}

pub fn root_of(expr: &str) -> &str {
    let end = expr.find(['.', '[']).unwrap_or(expr.len());
    expr[..end].trim()
}

/// All complete tokens in `text`, left to right.
pub fn tokens(text: &str) -> Vec<Token> {
    TOKEN_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let expr = caps.get(1)?;
            Some(Token {
                expr: expr.as_str().trim().to_string(),
                start: whole.start(),
                end: whole.end(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_tokens_with_whitespace() {
        let found = tokens("Q: {{ query }} / {{documents[0].text}} / {{}} / {{ a.b }}");
        let exprs: Vec<&str> = found.iter().map(|t| t.expr.as_str()).collect();
        assert_eq!(exprs, vec!["query", "documents[0].text", "a.b"]);
        assert_eq!(found[1].root(), "documents");
        assert_eq!(found[2].root(), "a");
    }

    #[test]
    fn unterminated_token_is_ignored() {
        assert!(tokens("Hello {{doc").is_empty());
    }

    #[test]
    fn token_span_covers_braces() {
        let found = tokens("ab{{x}}cd");
        assert_eq!((found[0].start, found[0].end), (2, 7));
    }
}
