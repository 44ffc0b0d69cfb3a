pub mod completions;
pub mod dot;
pub mod filter;
pub mod manifest;
pub mod next;
pub mod pipeline;
