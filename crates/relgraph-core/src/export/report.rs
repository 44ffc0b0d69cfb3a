//! Plain-text "who is next" report.

use crate::rank::NextRelease;

/// One `name (blocking N)` line per candidate, in the order given.
///
/// With `with_urls`, each entry is followed by a tab-indented line holding
/// the source URL (or `(no url)`).
#[must_use]
pub fn ranked_report(ranked: &[NextRelease], with_urls: bool) -> String {
    let mut lines = Vec::with_capacity(ranked.len() * if with_urls { 2 } else { 1 });
    for next in ranked {
        lines.push(format!("{} (blocking {})", next.name, next.blocking_count));
        if with_urls {
            lines.push(format!("\t{}", next.url.as_deref().unwrap_or("(no url)")));
        }
    }
    lines.join("\n")
}
