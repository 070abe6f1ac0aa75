//! Static resource schemas.
//!
//! Every resource type the client models is described by one
//! [`ResourceSchema`]: its JSON:API `type`, its collection endpoint, the
//! attributes accepted on write and its relationships. Schemas are `const`
//! values so they can live in the registry's static table.
//!
//! # Example
//!
//! ```rust
//! use appstoreconnect::rest::{Multiplicity, RelationshipDef, ResourceSchema};
//!
//! const BETA_GROUPS: ResourceSchema = ResourceSchema::new(
//!     "betaGroups",
//!     "/v1/betaGroups",
//!     &["name", "publicLinkEnabled"],
//!     &[
//!         RelationshipDef::single("app", "apps"),
//!         RelationshipDef::many("betaTesters", "betaTesters"),
//!     ],
//! );
//!
//! assert!(BETA_GROUPS.has_attribute("name"));
//! assert_eq!(
//!     BETA_GROUPS.relationship("betaTesters").map(|r| r.multiplicity),
//!     Some(Multiplicity::Many)
//! );
//! ```

/// Whether a relationship points at one resource or a collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Multiplicity {
    /// To-one: navigating fetches exactly one resource.
    Single,
    /// To-many: navigating yields a lazy cursor.
    Many,
}

/// A declared relationship of a resource type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RelationshipDef {
    /// The relationship name as it appears in the payload.
    pub name: &'static str,
    /// The JSON:API `type` of the related resources.
    pub target: &'static str,
    /// One or many.
    pub multiplicity: Multiplicity,
}

impl RelationshipDef {
    /// Declares a to-one relationship.
    #[must_use]
    pub const fn single(name: &'static str, target: &'static str) -> Self {
        Self {
            name,
            target,
            multiplicity: Multiplicity::Single,
        }
    }

    /// Declares a to-many relationship.
    #[must_use]
    pub const fn many(name: &'static str, target: &'static str) -> Self {
        Self {
            name,
            target,
            multiplicity: Multiplicity::Many,
        }
    }
}

/// The static description of one resource type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResourceSchema {
    /// The JSON:API `type` string; unique across the registry.
    pub type_name: &'static str,
    /// The collection endpoint, e.g. `/v1/apps`.
    pub endpoint: &'static str,
    /// Attribute names accepted on create and modify.
    pub attributes: &'static [&'static str],
    /// Declared relationships.
    pub relationships: &'static [RelationshipDef],
}

impl ResourceSchema {
    /// Creates a schema.
    #[must_use]
    pub const fn new(
        type_name: &'static str,
        endpoint: &'static str,
        attributes: &'static [&'static str],
        relationships: &'static [RelationshipDef],
    ) -> Self {
        Self {
            type_name,
            endpoint,
            attributes,
            relationships,
        }
    }

    /// Returns `true` if `name` is a declared attribute.
    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains(&name)
    }

    /// Looks up a declared relationship by name.
    #[must_use]
    pub fn relationship(&self, name: &str) -> Option<&'static RelationshipDef> {
        self.relationships.iter().find(|r| r.name == name)
    }

    /// Returns the path of a single resource, `<endpoint>/<id>`.
    #[must_use]
    pub fn instance_path(&self, id: &str) -> String {
        format!("{}/{id}", self.endpoint)
    }
}
