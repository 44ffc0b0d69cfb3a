//! Repository checkout manifest (`.repos` file) for the ranked candidates.
//!
//! ```text
//! repositories:
//!   catkin:
//!     type: git
//!     url: https://github.com/ros/catkin.git
//!   # orphan: (no url)
//! ```
//!
//! A candidate without a URL is kept as a commented placeholder so the gap
//! is visible to whoever edits the file. Names, URLs, and versions are
//! written as YAML scalars and quoted when they would not read back as the
//! same string (`a: b`, `#tag`, `2`).

use crate::rank::NextRelease;

/// Render `candidates` as a `repositories:` manifest in the order given.
#[must_use]
pub fn manifest(candidates: &[NextRelease]) -> String {
    let mut lines = vec!["repositories:".to_string()];
    for next in candidates {
        match next.url.as_deref().filter(|url| !url.trim().is_empty()) {
            Some(url) => {
                lines.push(format!("  {}:", yaml_scalar(&next.name)));
                lines.push("    type: git".to_string());
                lines.push(format!("    url: {}", yaml_scalar(url)));
                if let Some(version) = &next.version {
                    lines.push(format!("    version: {}", yaml_scalar(version)));
                }
            }
            None => lines.push(format!("  # {}: (no url)", yaml_scalar(&next.name))),
        }
    }
    lines.join("\n")
}

/// Single-line YAML form of `text`. Block scalars (multi-line strings) fall
/// back to a double-quoted string.
fn yaml_scalar(text: &str) -> String {
    match serde_yaml::to_string(text) {
        Ok(encoded) if !encoded.trim_end().contains('\n') => encoded.trim_end().to_string(),
        _ => format!("{text:?}"),
    }
}
