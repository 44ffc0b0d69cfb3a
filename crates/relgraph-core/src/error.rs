//! Typed failures surfaced by catalog parsing.
//!
//! Malformed *records* never produce an error (they are defaulted and logged);
//! only a document that cannot be read as a catalog at all does.

/// Errors raised while reading or writing a catalog document.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The input is not valid YAML.
    #[error("catalog is not valid YAML: {0}")]
    Parse(#[source] serde_yaml::Error),

    /// The document root is not a mapping of package name to record.
    #[error("catalog root must be a mapping of package names, found {found}")]
    NotAMapping { found: &'static str },

    /// The catalog could not be serialized back to YAML.
    #[error("failed to serialize catalog: {0}")]
    Serialize(#[source] serde_yaml::Error),
}

impl CatalogError {
    /// Stable machine-readable identifier for CLI error output.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Parse(_) => "catalog_parse_error",
            Self::NotAMapping { .. } => "catalog_shape_error",
            Self::Serialize(_) => "catalog_serialize_error",
        }
    }

    /// Optional remediation hint for operators.
    #[must_use]
    pub const fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Parse(_) => Some("Check the catalog file for YAML syntax errors."),
            Self::NotAMapping { .. } => {
                Some("The catalog must map each package name to its record, e.g. `pkg: {released: false}`.")
            }
            Self::Serialize(_) => None,
        }
    }
}
