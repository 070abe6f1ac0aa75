//! Schema-driven create and modify documents.
//!
//! [`ResourceArgs`] is an ordered bag of named arguments: plain values for
//! attributes and envelope references for relationships. The functions in
//! this module filter those arguments against a [`ResourceSchema`] and build
//! the JSON:API request documents. Keys the schema does not declare are
//! ignored, so callers can pass arguments for fields the client does not
//! model yet without failing.
//!
//! # Example
//!
//! ```rust
//! use appstoreconnect::rest::{create_document, Linkage, ResourceArgs, ResourceSchema, RelationshipDef};
//! use serde_json::json;
//!
//! const BETA_GROUPS: ResourceSchema = ResourceSchema::new(
//!     "betaGroups",
//!     "/v1/betaGroups",
//!     &["name"],
//!     &[RelationshipDef::single("app", "apps")],
//! );
//!
//! let args = ResourceArgs::new()
//!     .set("name", "X")
//!     .link("app", Linkage::new("apps", "7"))
//!     .set("bogus", 1);
//!
//! assert_eq!(
//!     create_document(&BETA_GROUPS, &args).unwrap(),
//!     json!({
//!         "data": {
//!             "type": "betaGroups",
//!             "attributes": {"name": "X"},
//!             "relationships": {"app": {"data": {"type": "apps", "id": "7"}}}
//!         }
//!     })
//! );
//! ```

use serde_json::{json, Map, Value};

use crate::rest::{Linkage, Multiplicity, Resource, ResourceError, ResourceSchema};

/// One named argument.
#[derive(Clone, Debug, PartialEq)]
pub enum Argument {
    /// A plain value, used for attributes.
    Value(Value),
    /// A reference to one resource.
    One(Linkage),
    /// References to several resources.
    Many(Vec<Linkage>),
}

impl From<Value> for Argument {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<Linkage> for Argument {
    fn from(linkage: Linkage) -> Self {
        Self::One(linkage)
    }
}

impl From<Vec<Linkage>> for Argument {
    fn from(linkages: Vec<Linkage>) -> Self {
        Self::Many(linkages)
    }
}

/// Ordered arguments for create and modify.
///
/// Setting a key twice replaces the earlier argument in place.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResourceArgs {
    entries: Vec<(String, Argument)>,
}

impl ResourceArgs {
    /// Creates an empty argument set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a plain value.
    #[must_use]
    pub fn set(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with(name, Argument::Value(value.into()))
    }

    /// Sets a relationship to an explicit linkage.
    #[must_use]
    pub fn link(self, name: impl Into<String>, linkage: Linkage) -> Self {
        self.with(name, Argument::One(linkage))
    }

    /// Sets any argument.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, argument: impl Into<Argument>) -> Self {
        self.insert(name, argument);
        self
    }

    /// Sets a relationship to the resource behind an envelope.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingId`] if the resource has no id.
    pub fn relate(
        self,
        name: impl Into<String>,
        resource: impl AsRef<Resource>,
    ) -> Result<Self, ResourceError> {
        let linkage = resource.as_ref().linkage()?;
        Ok(self.with(name, Argument::One(linkage)))
    }

    /// Sets a to-many relationship to the resources behind several envelopes.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingId`] if any resource has no id.
    pub fn relate_many<R: AsRef<Resource>>(
        self,
        name: impl Into<String>,
        resources: impl IntoIterator<Item = R>,
    ) -> Result<Self, ResourceError> {
        let linkages = resources
            .into_iter()
            .map(|resource| resource.as_ref().linkage())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.with(name, Argument::Many(linkages)))
    }

    /// Adds or replaces an argument.
    pub fn insert(&mut self, name: impl Into<String>, argument: impl Into<Argument>) {
        let name = name.into();
        let argument = argument.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => entry.1 = argument,
            None => self.entries.push((name, argument)),
        }
    }

    /// Returns an argument by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Argument> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, argument)| argument)
    }

    /// Iterates over the arguments in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Argument)> {
        self.entries.iter().map(|(key, argument)| (key.as_str(), argument))
    }

    /// Returns the number of arguments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no arguments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builds the `attributes` object: declared attributes with non-null values.
///
/// # Errors
///
/// Returns [`ResourceError::InvalidArgument`] if a declared attribute is
/// given a resource reference.
pub fn filter_attributes(
    schema: &ResourceSchema,
    args: &ResourceArgs,
) -> Result<Map<String, Value>, ResourceError> {
    let mut attributes = Map::new();
    for (name, argument) in args.iter() {
        if !schema.has_attribute(name) {
            continue;
        }
        match argument {
            Argument::Value(Value::Null) => {}
            Argument::Value(value) => {
                attributes.insert(name.to_string(), value.clone());
            }
            Argument::One(_) | Argument::Many(_) => {
                return Err(invalid(name, "attributes take plain values"));
            }
        }
    }
    Ok(attributes)
}

/// Builds the `relationships` object from declared relationships present in
/// `args`.
///
/// To-many relationships are sent as an array of linkages. A to-one
/// relationship accepts a one-element list.
///
/// # Errors
///
/// Returns [`ResourceError::InvalidArgument`] if a relationship is given a
/// plain value or a list of the wrong size.
pub fn build_relationships(
    schema: &ResourceSchema,
    args: &ResourceArgs,
) -> Result<Map<String, Value>, ResourceError> {
    let mut relationships = Map::new();
    for (name, argument) in args.iter() {
        let Some(relationship) = schema.relationship(name) else {
            continue;
        };
        let data = match (relationship.multiplicity, argument) {
            (_, Argument::Value(Value::Null)) => continue,
            (_, Argument::Value(_)) => {
                return Err(invalid(name, "relationships take resource references"));
            }
            (Multiplicity::Single, Argument::One(linkage)) => json!(linkage),
            (Multiplicity::Single, Argument::Many(linkages)) => match linkages.as_slice() {
                [linkage] => json!(linkage),
                _ => return Err(invalid(name, "to-one relationship takes exactly one resource")),
            },
            (Multiplicity::Many, Argument::One(linkage)) => json!([linkage]),
            (Multiplicity::Many, Argument::Many(linkages)) => json!(linkages),
        };
        relationships.insert(name.to_string(), json!({ "data": data }));
    }
    Ok(relationships)
}

/// Builds the POST document for creating a resource.
///
/// `relationships` is omitted when no declared relationship is given.
///
/// # Errors
///
/// Returns [`ResourceError::InvalidArgument`] for mis-shaped arguments.
pub fn create_document(schema: &ResourceSchema, args: &ResourceArgs) -> Result<Value, ResourceError> {
    let attributes = filter_attributes(schema, args)?;
    let relationships = build_relationships(schema, args)?;

    let mut data = Map::new();
    data.insert("type".to_string(), json!(schema.type_name));
    data.insert("attributes".to_string(), Value::Object(attributes));
    if !relationships.is_empty() {
        data.insert("relationships".to_string(), Value::Object(relationships));
    }

    Ok(json!({ "data": data }))
}

/// Builds the PATCH document for modifying a resource.
///
/// Relationships are never sent through this path.
///
/// # Errors
///
/// Returns [`ResourceError::InvalidArgument`] for mis-shaped arguments.
pub fn modify_document(
    schema: &ResourceSchema,
    id: &str,
    args: &ResourceArgs,
) -> Result<Value, ResourceError> {
    let attributes = filter_attributes(schema, args)?;
    Ok(json!({
        "data": {
            "id": id,
            "type": schema.type_name,
            "attributes": attributes,
        }
    }))
}

fn invalid(name: &str, reason: &str) -> ResourceError {
    ResourceError::InvalidArgument {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}
