//! The resource registry.
//!
//! Maps a JSON:API `type` string to its [`ResourceSchema`]. Envelopes use it
//! to find their schema when a payload is decoded, and relationship
//! navigation uses it to resolve related types.
//!
//! The process-wide registry is built once, on first use, from the explicit
//! table in [`resources::SCHEMAS`](crate::rest::resources::SCHEMAS) and is
//! read-only afterwards.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::rest::resources::SCHEMAS;
use crate::rest::{ResourceError, ResourceSchema};

static GLOBAL: OnceLock<Registry> = OnceLock::new();

/// A lookup table from JSON:API `type` to schema.
///
/// # Example
///
/// ```rust
/// use appstoreconnect::rest::{Registry, ResourceSchema};
///
/// static WIDGETS: ResourceSchema = ResourceSchema::new("widgets", "/v1/widgets", &[], &[]);
///
/// let mut registry = Registry::new();
/// assert!(registry.register(&WIDGETS));
/// assert!(!registry.register(&WIDGETS));
/// assert_eq!(registry.resolve("widgets").unwrap().endpoint, "/v1/widgets");
/// assert!(registry.resolve("gadgets").is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Registry {
    schemas: HashMap<&'static str, &'static ResourceSchema>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every schema in `schemas`.
    #[must_use]
    pub fn from_schemas(schemas: &[&'static ResourceSchema]) -> Self {
        let mut registry = Self::new();
        for schema in schemas {
            registry.register(schema);
        }
        registry
    }

    /// Returns the process-wide registry of all modelled resource types.
    pub fn global() -> &'static Self {
        GLOBAL.get_or_init(|| {
            let registry = Self::from_schemas(SCHEMAS);
            tracing::debug!(types = registry.len(), "Resource registry initialized");
            registry
        })
    }

    /// Registers a schema under its type name.
    ///
    /// Registration is idempotent per type: if the type is already present
    /// the existing schema is kept and `false` is returned.
    pub fn register(&mut self, schema: &'static ResourceSchema) -> bool {
        if self.schemas.contains_key(schema.type_name) {
            return false;
        }
        self.schemas.insert(schema.type_name, schema);
        true
    }

    /// Looks up the schema for a JSON:API `type`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnknownResourceType`] if the type is not
    /// registered.
    pub fn resolve(&self, type_name: &str) -> Result<&'static ResourceSchema, ResourceError> {
        self.schemas
            .get(type_name)
            .copied()
            .ok_or_else(|| ResourceError::UnknownResourceType {
                type_name: type_name.to_string(),
            })
    }

    /// Returns the number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Returns `true` if no types are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Iterates over the registered schemas in no particular order.
    pub fn schemas(&self) -> impl Iterator<Item = &'static ResourceSchema> + '_ {
        self.schemas.values().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::Multiplicity;

    static FIRST: ResourceSchema = ResourceSchema::new("widgets", "/v1/widgets", &["a"], &[]);
    static SECOND: ResourceSchema = ResourceSchema::new("widgets", "/v2/widgets", &["b"], &[]);

    #[test]
    fn test_register_keeps_first_schema_for_a_type() {
        let mut registry = Registry::new();

        assert!(registry.register(&FIRST));
        assert!(!registry.register(&SECOND));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.resolve("widgets").unwrap().endpoint, "/v1/widgets");
    }

    #[test]
    fn test_resolve_unknown_type_fails() {
        let registry = Registry::new();
        assert!(registry.is_empty());

        let error = registry.resolve("gadgets").unwrap_err();
        assert!(matches!(
            error,
            ResourceError::UnknownResourceType { type_name } if type_name == "gadgets"
        ));
    }

    #[test]
    fn test_global_registry_holds_every_table_entry() {
        let registry = Registry::global();

        assert_eq!(registry.len(), SCHEMAS.len());
        assert_eq!(registry.resolve("apps").unwrap().endpoint, "/v1/apps");
        assert_eq!(registry.resolve("builds").unwrap().endpoint, "/v1/builds");
    }

    #[test]
    fn test_every_relationship_target_is_registered() {
        let registry = Registry::global();

        for schema in registry.schemas() {
            for relationship in schema.relationships {
                assert!(
                    registry.resolve(relationship.target).is_ok(),
                    "{}.{} points at unregistered type {}",
                    schema.type_name,
                    relationship.name,
                    relationship.target
                );
            }
        }
    }

    #[test]
    fn test_schema_table_has_no_duplicate_types() {
        let mut seen = std::collections::HashSet::new();
        for schema in SCHEMAS {
            assert!(seen.insert(schema.type_name), "duplicate {}", schema.type_name);
        }
    }

    #[test]
    fn test_app_builds_relationship_is_many() {
        let apps = Registry::global().resolve("apps").unwrap();
        assert_eq!(
            apps.relationship("builds").map(|r| r.multiplicity),
            Some(Multiplicity::Many)
        );
    }
}
