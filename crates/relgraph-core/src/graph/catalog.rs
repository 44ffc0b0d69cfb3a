//! The [`Catalog`]: every package in the run, keyed by name.
//!
//! # Ordering
//!
//! Iteration follows insertion order, which for a parsed document is the
//! order the packages appear in the YAML. The ranker relies on this for its
//! tie-break, so the catalog keeps packages in a `Vec` with a name index on
//! the side instead of a hash map.
//!
//! # Leniency
//!
//! Parsing only fails when the document is not YAML or its root is not a
//! mapping. Each record is read field by field: a missing field is defaulted,
//! and a field with the wrong shape is defaulted on its own and logged at
//! `warn` while the rest of the record is kept. Numbers and booleans are
//! accepted wherever a string is expected (`version: 1.2`, `blocked_by: [42]`).

use std::collections::{BTreeSet, HashMap};

use serde_yaml::{Mapping, Value};
use tracing::{debug, instrument, warn};

use crate::error::CatalogError;
use crate::graph::package::{Package, PackageRecord};

/// An ordered mapping from package name to [`Package`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    packages: Vec<Package>,
    index: HashMap<String, usize>,
}

impl Catalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a package. A package with a name already present replaces the
    /// earlier one in its original position.
    pub fn insert(&mut self, package: Package) {
        if let Some(&pos) = self.index.get(&package.name) {
            debug!(package = %package.name, "duplicate catalog entry replaces earlier one");
            self.packages[pos] = package;
        } else {
            self.index.insert(package.name.clone(), self.packages.len());
            self.packages.push(package);
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Package> {
        self.index.get(name).map(|&pos| &self.packages[pos])
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Packages in catalog order.
    pub fn iter(&self) -> std::slice::Iter<'_, Package> {
        self.packages.iter()
    }

    /// Package names in catalog order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.packages.iter().map(|pkg| pkg.name.as_str())
    }

    /// Build a new catalog holding the packages that satisfy `keep`, in the
    /// same order. `self` is left untouched.
    #[must_use]
    pub fn subset(&self, mut keep: impl FnMut(&Package) -> bool) -> Self {
        self.packages
            .iter()
            .filter(|pkg| keep(pkg))
            .cloned()
            .collect()
    }

    /// Parse a YAML mapping of package name to record.
    ///
    /// An empty document yields an empty catalog. Non-string scalar keys
    /// (numbers, booleans) are stringified; other keys are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] for invalid YAML and
    /// [`CatalogError::NotAMapping`] when the root is not a mapping.
    #[instrument(skip(input), fields(bytes = input.len()))]
    pub fn from_yaml_str(input: &str) -> Result<Self, CatalogError> {
        let doc: Value = serde_yaml::from_str(input).map_err(CatalogError::Parse)?;
        let mapping = match doc {
            Value::Mapping(mapping) => mapping,
            Value::Null => return Ok(Self::new()),
            other => {
                return Err(CatalogError::NotAMapping {
                    found: value_kind(&other),
                });
            }
        };

        let mut catalog = Self::new();
        for (key, value) in mapping {
            let Some(name) = key_name(&key) else {
                warn!(key_kind = value_kind(&key), "skipping catalog entry with non-scalar key");
                continue;
            };
            catalog.insert(Package::from_record(name.clone(), parse_record(&name, value)));
        }

        debug!(packages = catalog.len(), "catalog parsed");
        Ok(catalog)
    }

    /// Serialize back to a YAML mapping in catalog order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Serialize`] if a record cannot be encoded.
    pub fn to_yaml_string(&self) -> Result<String, CatalogError> {
        let mut mapping = Mapping::with_capacity(self.len());
        for pkg in &self.packages {
            let record =
                serde_yaml::to_value(PackageRecord::from(pkg)).map_err(CatalogError::Serialize)?;
            mapping.insert(Value::String(pkg.name.clone()), record);
        }
        serde_yaml::to_string(&mapping).map_err(CatalogError::Serialize)
    }
}

impl FromIterator<Package> for Catalog {
    fn from_iter<T: IntoIterator<Item = Package>>(iter: T) -> Self {
        let mut catalog = Self::new();
        for pkg in iter {
            catalog.insert(pkg);
        }
        catalog
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Package;
    type IntoIter = std::slice::Iter<'a, Package>;

    fn into_iter(self) -> Self::IntoIter {
        self.packages.iter()
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn parse_record(name: &str, value: Value) -> PackageRecord {
    let mut record = PackageRecord::default();
    let fields = match value {
        Value::Mapping(fields) => fields,
        Value::Null => return record,
        other => {
            warn!(
                package = %name,
                found = value_kind(&other),
                "catalog record is not a mapping, using defaults"
            );
            return record;
        }
    };

    for (key, value) in &fields {
        let Some(field) = key_name(key) else {
            continue;
        };
        match field.as_str() {
            "released" => record.released = parse_field(name, "released", value, Value::as_bool),
            "blocked_by" | "repos_blocked_by" => {
                record.blocked_by = parse_field(name, "blocked_by", value, name_set);
            }
            "blocking" | "repos_blocking" => {
                record.blocking = parse_field(name, "blocking", value, name_set);
            }
            "recursive_blocking" | "recursive_repos_blocking" => {
                record.recursive_blocking =
                    parse_field(name, "recursive_blocking", value, name_set);
            }
            "url" => record.url = parse_field(name, "url", value, scalar_string),
            "version" => record.version = parse_field(name, "version", value, scalar_string),
            _ => {}
        }
    }
    record
}

/// Convert one record field. `null` is treated as absent; a value `convert`
/// rejects is dropped with a warning naming the field.
fn parse_field<T>(
    package: &str,
    field: &'static str,
    value: &Value,
    convert: impl FnOnce(&Value) -> Option<T>,
) -> Option<T> {
    if value.is_null() {
        return None;
    }
    let parsed = convert(value);
    if parsed.is_none() {
        warn!(
            package = %package,
            field,
            found = value_kind(value),
            "malformed catalog field, using default"
        );
    }
    parsed
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn name_set(value: &Value) -> Option<BTreeSet<String>> {
    value.as_sequence()?.iter().map(scalar_string).collect()
}

fn key_name(key: &Value) -> Option<String> {
    scalar_string(key)
}

const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "
zeta:
  released: false
  blocked_by: []
  blocking: [alpha]
  url: https://github.com/ros/zeta.git
alpha:
  released: false
  blocked_by: [zeta]
mid:
  released: true
";

    #[test]
    fn preserves_document_order() {
        let catalog = Catalog::from_yaml_str(SAMPLE).expect("parse");
        let names: Vec<&str> = catalog.names().collect();
        assert_eq!(names, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn missing_fields_default() {
        let catalog = Catalog::from_yaml_str(SAMPLE).expect("parse");
        let alpha = catalog.get("alpha").expect("alpha");
        assert!(!alpha.released);
        assert!(alpha.blocking.is_none());
        assert!(alpha.url.is_none());
        let mid = catalog.get("mid").expect("mid");
        assert!(mid.released);
        assert!(mid.blocked_by.is_empty());
    }

    #[test]
    fn build_farm_aliases_are_accepted() {
        let input = "
rviz:
  released: false
  repos_blocked_by: [ogre]
  repos_blocking: [rqt]
  recursive_repos_blocking: [rqt, desktop]
";
        let catalog = Catalog::from_yaml_str(input).expect("parse");
        let rviz = catalog.get("rviz").expect("rviz");
        assert!(rviz.blocked_by.contains("ogre"));
        assert_eq!(rviz.blocking.as_ref().map(|s| s.len()), Some(1));
        assert_eq!(rviz.recursive_blocking.as_ref().map(|s| s.len()), Some(2));
    }

    #[test]
    fn malformed_fields_are_defaulted_not_fatal() {
        let input = "
good:
  released: true
bad:
  released: [not, a, bool]
  blocked_by: 7
  url: https://example.com/bad.git
empty:
scalar: 3
";
        let catalog = Catalog::from_yaml_str(input).expect("parse");
        assert_eq!(catalog.len(), 4);
        let bad = catalog.get("bad").expect("bad");
        assert!(!bad.released);
        assert!(bad.blocked_by.is_empty());
        assert_eq!(bad.url.as_deref(), Some("https://example.com/bad.git"));
        assert!(catalog.get("empty").is_some());
        assert!(catalog.get("scalar").is_some());
    }

    #[test]
    fn numeric_scalars_keep_the_rest_of_the_record() {
        let input = "
root:
  released: false
done:
  released: true
  version: 1.2
stuck:
  blocked_by: [root, 1234]
  url: https://example.com/stuck.git
  version: 2
";
        let catalog = Catalog::from_yaml_str(input).expect("parse");

        let done = catalog.get("done").expect("done");
        assert!(done.released);
        assert_eq!(done.version.as_deref(), Some("1.2"));

        let stuck = catalog.get("stuck").expect("stuck");
        assert_eq!(
            stuck.blocked_by,
            BTreeSet::from(["1234".to_string(), "root".to_string()])
        );
        assert_eq!(stuck.url.as_deref(), Some("https://example.com/stuck.git"));
        assert_eq!(stuck.version.as_deref(), Some("2"));

        let ranked: Vec<String> = crate::rank::who_is_next(&catalog, &BTreeSet::new())
            .into_iter()
            .map(|next| next.name)
            .collect();
        assert_eq!(ranked, ["root"]);
    }

    #[test]
    fn one_bad_set_entry_drops_only_that_field() {
        let input = "
pkg:
  released: true
  blocked_by: [ok, [nested]]
  blocking: [downstream]
";
        let catalog = Catalog::from_yaml_str(input).expect("parse");
        let pkg = catalog.get("pkg").expect("pkg");
        assert!(pkg.released);
        assert!(pkg.blocked_by.is_empty());
        assert_eq!(pkg.blocking, Some(BTreeSet::from(["downstream".to_string()])));
    }

    #[test]
    fn null_sets_are_absent() {
        let catalog = Catalog::from_yaml_str("a:\n  blocking: null\n  blocked_by: null\n")
            .expect("parse");
        let a = catalog.get("a").expect("a");
        assert!(a.blocking.is_none());
        assert!(a.blocked_by.is_empty());
    }

    #[test]
    fn numeric_keys_are_stringified() {
        let catalog = Catalog::from_yaml_str("1234:\n  released: false\n").expect("parse");
        assert!(catalog.contains("1234"));
    }

    #[test]
    fn empty_document_is_empty_catalog() {
        assert!(Catalog::from_yaml_str("").expect("parse").is_empty());
    }

    #[test]
    fn sequence_root_is_rejected() {
        let err = Catalog::from_yaml_str("- a\n- b\n").expect_err("should fail");
        assert!(matches!(err, CatalogError::NotAMapping { found: "sequence" }));
    }

    #[test]
    fn invalid_yaml_is_rejected() {
        let err = Catalog::from_yaml_str("a: [b").expect_err("should fail");
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn duplicate_insert_keeps_first_position() {
        let mut catalog = Catalog::new();
        catalog.insert(Package::new("a"));
        catalog.insert(Package::new("b"));
        catalog.insert(Package::new("a").released(true));
        let names: Vec<&str> = catalog.names().collect();
        assert_eq!(names, ["a", "b"]);
        assert!(catalog.get("a").expect("a").released);
    }

    #[test]
    fn subset_does_not_touch_source() {
        let catalog = Catalog::from_yaml_str(SAMPLE).expect("parse");
        let unreleased = catalog.subset(|pkg| !pkg.released);
        assert_eq!(unreleased.len(), 2);
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn yaml_output_parses_back_to_same_catalog() {
        let catalog = Catalog::from_yaml_str(SAMPLE).expect("parse");
        let text = catalog.to_yaml_string().expect("serialize");
        let again = Catalog::from_yaml_str(&text).expect("reparse");
        assert_eq!(again, catalog);
    }
}
