//! Autocomplete inside `{{ … }}` tokens.
//!
//! Offsets are byte offsets into UTF-8 text. A caret that lands inside a
//! multi-byte character is moved back to the character's start.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::TRACING_TARGET;

/// An unterminated token around the caret.
///
/// The typed query is not stored; `query(text)` slices it from the text the
/// context was taken from. The wasm completion result carries all four
/// values together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MustacheContext {
    /// Offset of the opening `{{`.
    pub open_index: usize,
    pub replace_from: usize,
    pub replace_to: usize,
}

/// Text after accepting a suggestion, with the new caret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acceptance {
    pub text: String,
    pub caret: usize,
}

impl MustacheContext {
    /// What has been typed so far.
    pub fn query<'a>(&self, text: &'a str) -> &'a str {
        text.get(self.replace_from..self.replace_to).unwrap_or("")
    }
}

fn snap(text: &str, caret: usize) -> usize {
    let mut caret = caret.min(text.len());
    while !text.is_char_boundary(caret) {
        caret -= 1;
    }
    caret
}

/// Detect whether `caret` sits inside an open `{{` that has not been closed
/// before the caret.
pub fn context_at(text: &str, caret: usize) -> Option<MustacheContext> {
    let caret = snap(text, caret);
    let before = &text[..caret];
    let open_index = before.rfind("{{")?;
    let inner = &before[open_index + 2..];
    if inner.contains("}}") {
        return None;
    }
    let leading = inner.len() - inner.trim_start().len();
    Some(MustacheContext {
        open_index,
        replace_from: open_index + 2 + leading,
        replace_to: caret,
    })
}

/// 0 exact, 1 prefix, 2 substring (all case-insensitive); `None` excludes.
pub fn rank(candidate: &str, query: &str) -> Option<u8> {
    let candidate = candidate.to_lowercase();
    let query = query.to_lowercase();
    if candidate == query {
        Some(0)
    } else if candidate.starts_with(&query) {
        Some(1)
    } else if candidate.contains(&query) {
        Some(2)
    } else {
        None
    }
}

/// Matching candidates ordered by rank, then lexicographically. `limit` is
/// the interactive cap; `None` is the full picker.
pub fn suggest<S: AsRef<str>>(candidates: &[S], query: &str, limit: Option<usize>) -> Vec<String> {
    let mut ranked: Vec<(u8, &str)> = candidates
        .iter()
        .filter_map(|c| rank(c.as_ref(), query).map(|r| (r, c.as_ref())))
        .collect();
    ranked.sort_by(|a, b| match a.0.cmp(&b.0) {
        Ordering::Equal => a.1.cmp(b.1),
        other => other,
    });
    ranked.dedup_by(|a, b| a.1 == b.1);

    let mut out: Vec<String> = ranked.into_iter().map(|(_, c)| c.to_string()).collect();
    if let Some(limit) = limit {
        out.truncate(limit);
    }
    tracing::trace!(target: TRACING_TARGET, query, matches = out.len(), "Ranked suggestions");
    out
}

/// Replace the typed query with `candidate`, closing the token if needed.
/// The caret lands right after the candidate.
pub fn accept(text: &str, ctx: &MustacheContext, candidate: &str) -> Acceptance {
    let from = snap(text, ctx.replace_from);
    let to = snap(text, ctx.replace_to.max(from));
    let rest = &text[to..];

    let mut out = String::with_capacity(text.len() + candidate.len() + 2);
    out.push_str(&text[..from]);
    out.push_str(candidate);
    if !closes_before_next_open(rest) {
        out.push_str("}}");
    }
    out.push_str(rest);

    Acceptance {
        text: out,
        caret: from + candidate.len(),
    }
}

fn closes_before_next_open(rest: &str) -> bool {
    match (rest.find("}}"), rest.find("{{")) {
        (Some(close), Some(open)) => close < open,
        (Some(_), None) => true,
        (None, _) => false,
    }
}

/// Insert `candidate` at the caret: completes an open token when there is
/// one, otherwise inserts a whole `{{candidate}}` and puts the caret after it.
pub fn insert_at(text: &str, caret: usize, candidate: &str) -> Acceptance {
    if let Some(ctx) = context_at(text, caret) {
        return accept(text, &ctx, candidate);
    }
    let caret = snap(text, caret);
    let token = format!("{{{{{}}}}}", candidate);
    let mut out = String::with_capacity(text.len() + token.len());
    out.push_str(&text[..caret]);
    out.push_str(&token);
    out.push_str(&text[caret..]);
    Acceptance {
        text: out,
        caret: caret + token.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_after_open_braces() {
        let text = "Hello {{doc";
        let ctx = context_at(text, text.len()).unwrap();
        assert_eq!(ctx.open_index, 6);
        assert_eq!(ctx.query(text), "doc");
    }

    #[test]
    fn leading_whitespace_is_skipped() {
        let text = "{{  que";
        let ctx = context_at(text, text.len()).unwrap();
        assert_eq!(ctx.replace_from, 4);
        assert_eq!(ctx.query(text), "que");
    }

    #[test]
    fn closed_token_has_no_context() {
        assert_eq!(context_at("{{query}} and", 13), None);
        assert_eq!(context_at("plain text", 5), None);
    }

    #[test]
    fn caret_inside_multibyte_char_is_snapped() {
        let text = "{{é";
        // byte 3 is inside 'é' (bytes 2..4)
        let ctx = context_at(text, 3).unwrap();
        assert_eq!(ctx.replace_to, 2);
        assert_eq!(ctx.query(text), "");
    }

    #[test]
    fn ranking() {
        assert_eq!(rank("Query", "query"), Some(0));
        assert_eq!(rank("documents", "doc"), Some(1));
        assert_eq!(rank("data.documents", "doc"), Some(2));
        assert_eq!(rank("prompt", "doc"), None);
    }

    #[test]
    fn suggest_orders_by_rank_then_name() {
        let candidates = ["data.doc", "documents", "doc", "docs", "prompt"];
        assert_eq!(
            suggest(&candidates, "doc", None),
            vec!["doc", "docs", "documents", "data.doc"]
        );
        assert_eq!(suggest(&candidates, "doc", Some(2)), vec!["doc", "docs"]);
    }

    #[test]
    fn accept_closes_token() {
        let text = "Hello {{doc";
        let ctx = context_at(text, text.len()).unwrap();
        let done = accept(text, &ctx, "documents");
        assert_eq!(done.text, "Hello {{documents}}");
        assert_eq!(done.caret, 17);
    }

    #[test]
    fn accept_keeps_existing_close() {
        let text = "A {{que}} B";
        let ctx = context_at(text, 7).unwrap();
        let done = accept(text, &ctx, "query");
        assert_eq!(done.text, "A {{query}} B");
        assert_eq!(done.caret, 9);
    }

    #[test]
    fn close_after_a_later_open_does_not_count() {
        let text = "{{que then {{x}}";
        let ctx = context_at(text, 5).unwrap();
        let done = accept(text, &ctx, "query");
        assert_eq!(done.text, "{{query}} then {{x}}");
    }

    #[test]
    fn insert_without_context_wraps_token() {
        let done = insert_at("Say ", 4, "query");
        assert_eq!(done.text, "Say {{query}}");
        assert_eq!(done.caret, 13);
    }
}
