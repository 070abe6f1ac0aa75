//! The resource envelope.
//!
//! A [`Resource`] wraps one decoded JSON:API resource object together with
//! the [`ResourceSchema`] registered for its `type`. It exposes attribute
//! access and relationship navigation.
//!
//! Envelopes are immutable snapshots. They are built fresh from every
//! response and never cached; modifying a resource on the server returns a
//! new envelope. Navigation takes the client as an explicit argument, so an
//! envelope never holds on to a client and any [`Cursor`] it hands out
//! borrows the client it was given.
//!
//! # Example
//!
//! ```rust,ignore
//! use appstoreconnect::rest::{Related, Resource};
//!
//! let app: Resource = client.read(&APPS, "1234").await?;
//! println!("{app}: {}", app.attribute("name")?);
//!
//! match app.navigate(&client, "builds").await? {
//!     Related::Many(mut builds) => {
//!         while let Some(build) = builds.try_next().await? {
//!             println!("{build}");
//!         }
//!     }
//!     Related::One(resource) => println!("{resource}"),
//! }
//! ```

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::clients::AppStoreConnectClient;
use crate::rest::cursor::{Cursor, FromResource};
use crate::rest::{Multiplicity, Registry, ResourceError, ResourceSchema};

/// The links of a relationship object.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipLinks {
    /// URL of the related resource or collection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related: Option<String>,
    /// URL of the relationship itself.
    #[serde(default, rename = "self", skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
}

/// One entry of a resource object's `relationships`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RelationshipObject {
    /// Links to the related data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<RelationshipLinks>,
    /// Inlined linkage: an object, an array, or absent/`null`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// A decoded JSON:API resource object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResourceObject {
    /// The JSON:API `type`.
    #[serde(rename = "type")]
    pub type_name: String,
    /// The server-assigned id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Attribute values keyed by name.
    #[serde(default)]
    pub attributes: Map<String, Value>,
    /// Relationship objects keyed by name.
    #[serde(default)]
    pub relationships: Map<String, Value>,
    /// Resource-level links (`self`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Value>,
}

/// A `{type, id}` reference to a resource.
///
/// # Example
///
/// ```rust
/// use appstoreconnect::rest::Linkage;
///
/// let linkage = Linkage::new("apps", "7");
/// assert_eq!(
///     serde_json::to_value(&linkage).unwrap(),
///     serde_json::json!({"type": "apps", "id": "7"})
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Linkage {
    /// The JSON:API `type` of the referenced resource.
    #[serde(rename = "type")]
    pub type_name: String,
    /// The id of the referenced resource.
    pub id: String,
}

impl Linkage {
    /// Creates a linkage.
    #[must_use]
    pub fn new(type_name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            id: id.into(),
        }
    }
}

/// The result of navigating a relationship.
#[derive(Debug)]
pub enum Related<'c> {
    /// A to-one relationship, fetched eagerly.
    One(Resource),
    /// A to-many relationship, as a lazy cursor.
    Many(Cursor<'c, Resource>),
}

impl<'c> Related<'c> {
    /// Returns the single resource, if this is a to-one result.
    #[must_use]
    pub fn into_one(self) -> Option<Resource> {
        match self {
            Self::One(resource) => Some(resource),
            Self::Many(_) => None,
        }
    }

    /// Returns the cursor, if this is a to-many result.
    #[must_use]
    pub fn into_many(self) -> Option<Cursor<'c, Resource>> {
        match self {
            Self::Many(cursor) => Some(cursor),
            Self::One(_) => None,
        }
    }
}

/// One JSON:API resource and its registered schema.
///
/// If the payload's `type` is not registered the envelope is untyped: its
/// attributes are still readable, and relationships can be navigated when
/// the payload itself describes them.
#[derive(Clone, Debug, PartialEq)]
pub struct Resource {
    object: ResourceObject,
    schema: Option<&'static ResourceSchema>,
}

impl Resource {
    /// Wraps a decoded resource object, resolving its schema through the
    /// global [`Registry`].
    #[must_use]
    pub fn from_object(object: ResourceObject) -> Self {
        let schema = match Registry::global().resolve(&object.type_name) {
            Ok(schema) => Some(schema),
            Err(e) => {
                tracing::warn!("{e}; using an untyped resource");
                None
            }
        };
        Self { object, schema }
    }

    /// Decodes a JSON:API resource object.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Decode`] if the value is not a resource object.
    pub fn from_value(value: Value) -> Result<Self, ResourceError> {
        let object: ResourceObject = serde_json::from_value(value)?;
        Ok(Self::from_object(object))
    }

    /// Decodes the `data` member of a single-resource document.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Decode`] if `data` is missing, `null`, or not
    /// a resource object.
    pub fn from_document(mut document: Value) -> Result<Self, ResourceError> {
        match document.get_mut("data").map(Value::take) {
            Some(data @ Value::Object(_)) => Self::from_value(data),
            _ => Err(ResourceError::decode(
                "expected a resource object in `data`",
            )),
        }
    }

    /// Returns the server-assigned id, verbatim.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.object.id.as_deref()
    }

    /// Returns the JSON:API `type`.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.object.type_name
    }

    /// Returns the registered schema, or `None` for an untyped envelope.
    #[must_use]
    pub const fn schema(&self) -> Option<&'static ResourceSchema> {
        self.schema
    }

    /// Returns all attributes present in the payload.
    #[must_use]
    pub const fn attributes(&self) -> &Map<String, Value> {
        &self.object.attributes
    }

    /// Returns the underlying resource object.
    #[must_use]
    pub const fn object(&self) -> &ResourceObject {
        &self.object
    }

    /// Consumes the envelope and returns the resource object.
    #[must_use]
    pub fn into_object(self) -> ResourceObject {
        self.object
    }

    /// Returns an attribute value.
    ///
    /// A JSON `null` is a valid value and is returned as such.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingAttribute`] if the payload has no
    /// attribute with this name.
    pub fn attribute(&self, name: &str) -> Result<&Value, ResourceError> {
        self.object
            .attributes
            .get(name)
            .ok_or_else(|| ResourceError::MissingAttribute {
                type_name: self.object.type_name.clone(),
                attribute: name.to_string(),
            })
    }

    /// Returns an attribute decoded into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingAttribute`] if the attribute is absent
    /// and [`ResourceError::Decode`] if it does not decode into `T`.
    pub fn attribute_as<T: DeserializeOwned>(&self, name: &str) -> Result<T, ResourceError> {
        let value = self.attribute(name)?;
        T::deserialize(value).map_err(|e| ResourceError::decode(format!("{name}: {e}")))
    }

    /// Returns the `{type, id}` reference to this resource.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingId`] if the resource has no id.
    pub fn linkage(&self) -> Result<Linkage, ResourceError> {
        let id = self.require_id()?;
        Ok(Linkage::new(self.object.type_name.clone(), id))
    }

    pub(crate) fn require_id(&self) -> Result<&str, ResourceError> {
        self.id().ok_or_else(|| ResourceError::MissingId {
            type_name: self.object.type_name.clone(),
        })
    }

    /// Returns the URL used to fetch a relationship.
    ///
    /// The payload's `related` link wins. Otherwise the URL is derived as
    /// `<endpoint>/<id>/<name>` for typed envelopes, or from the resource's
    /// `self` link for untyped ones.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingId`] if a URL has to be derived and
    /// the resource has no id, and [`ResourceError::UnknownRelationship`] if
    /// an untyped envelope offers nothing to derive from.
    pub fn related_url(&self, name: &str) -> Result<String, ResourceError> {
        if let Some(related) = self.relationship_object(name).and_then(|rel| {
            rel.links
                .and_then(|links| links.related)
                .filter(|link| !link.is_empty())
        }) {
            return Ok(related);
        }

        if let Some(schema) = self.schema {
            let id = self.require_id()?;
            return Ok(format!("{}/{name}", schema.instance_path(id)));
        }

        self.object
            .links
            .as_ref()
            .and_then(|links| links.get("self"))
            .and_then(Value::as_str)
            .map(|self_link| format!("{}/{name}", self_link.trim_end_matches('/')))
            .ok_or_else(|| self.unknown_relationship(name))
    }

    /// Navigates a relationship.
    ///
    /// For typed envelopes the relationship must be declared in the schema:
    /// a to-many relationship returns a [`Cursor`] without any network call,
    /// a to-one relationship is fetched immediately. Every call fetches
    /// anew; nothing is cached on the envelope.
    ///
    /// Untyped envelopes can navigate any relationship present in the
    /// payload. Array linkage means to-many; otherwise the related link is
    /// fetched and the shape of the returned `data` decides.
    ///
    /// # Errors
    ///
    /// - [`ResourceError::UnknownRelationship`] if the relationship is not
    ///   declared (typed) or not present (untyped)
    /// - [`ResourceError::NotFound`] if a to-one fetch returns `data: null`
    /// - [`ResourceError::Http`] if the fetch fails
    pub async fn navigate<'c>(
        &self,
        client: &'c AppStoreConnectClient,
        name: &str,
    ) -> Result<Related<'c>, ResourceError> {
        if let Some(schema) = self.schema {
            let relationship = schema
                .relationship(name)
                .ok_or_else(|| self.unknown_relationship(name))?;

            return match relationship.multiplicity {
                Multiplicity::Many => Ok(Related::Many(self.related_many(client, name)?)),
                Multiplicity::Single => Ok(Related::One(self.related_one(client, name).await?)),
            };
        }

        let relationship = self
            .relationship_object(name)
            .ok_or_else(|| self.unknown_relationship(name))?;
        let url = self.related_url(name)?;

        if matches!(relationship.data, Some(Value::Array(_))) {
            return Ok(Related::Many(Cursor::new(client, url)));
        }

        tracing::debug!(%url, relationship = name, "Resolving untyped relationship");
        let document = client.get_json(&url).await?;
        match document.get("data") {
            Some(Value::Array(_)) => Ok(Related::Many(Cursor::from_document(client, document)?)),
            Some(Value::Object(_)) => Ok(Related::One(Self::from_document(document)?)),
            _ => Err(ResourceError::NotFound { url }),
        }
    }

    /// Returns a cursor over a declared to-many relationship.
    ///
    /// No request is made until the cursor is advanced.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnknownRelationship`] if the relationship is
    /// not declared as to-many.
    pub fn related_many<'c, T: FromResource>(
        &self,
        client: &'c AppStoreConnectClient,
        name: &str,
    ) -> Result<Cursor<'c, T>, ResourceError> {
        self.declared(name, Multiplicity::Many)?;
        Ok(Cursor::new(client, self.related_url(name)?))
    }

    /// Fetches the resource behind a declared to-one relationship.
    ///
    /// # Errors
    ///
    /// - [`ResourceError::UnknownRelationship`] if the relationship is not
    ///   declared as to-one
    /// - [`ResourceError::NotFound`] if the server returns `data: null`
    /// - [`ResourceError::Http`] if the fetch fails
    pub async fn related_one<T: FromResource>(
        &self,
        client: &AppStoreConnectClient,
        name: &str,
    ) -> Result<T, ResourceError> {
        self.declared(name, Multiplicity::Single)?;
        let url = self.related_url(name)?;

        tracing::debug!(%url, relationship = name, "Fetching related resource");
        let document = client.get_json(&url).await?;
        match document.get("data") {
            Some(Value::Object(_)) => T::from_resource(Self::from_document(document)?),
            Some(Value::Null) | None => Err(ResourceError::NotFound { url }),
            Some(_) => Err(ResourceError::decode(format!(
                "expected a single resource at {url}"
            ))),
        }
    }

    fn declared(&self, name: &str, multiplicity: Multiplicity) -> Result<(), ResourceError> {
        match self.schema.and_then(|schema| schema.relationship(name)) {
            Some(relationship) if relationship.multiplicity == multiplicity => Ok(()),
            _ => Err(self.unknown_relationship(name)),
        }
    }

    fn relationship_object(&self, name: &str) -> Option<RelationshipObject> {
        self.object
            .relationships
            .get(name)
            .and_then(|value| RelationshipObject::deserialize(value).ok())
    }

    fn unknown_relationship(&self, name: &str) -> ResourceError {
        ResourceError::UnknownRelationship {
            type_name: self.object.type_name.clone(),
            relationship: name.to_string(),
        }
    }
}

impl AsRef<Self> for Resource {
    fn as_ref(&self) -> &Self {
        self
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id() {
            Some(id) => write!(f, "{} id {id}", self.object.type_name),
            None => write!(f, "{} (unsaved)", self.object.type_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn app() -> Resource {
        Resource::from_value(json!({
            "type": "apps",
            "id": "1234",
            "attributes": {
                "name": "Example",
                "sku": null,
                "primaryLocale": "en-US"
            },
            "relationships": {
                "builds": {
                    "links": {
                        "self": "https://api.example.com/v1/apps/1234/relationships/builds",
                        "related": "https://api.example.com/v1/apps/1234/builds"
                    }
                },
                "betaLicenseAgreement": {}
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_known_type_resolves_schema() {
        let app = app();
        assert_eq!(app.schema().map(|s| s.endpoint), Some("/v1/apps"));
        assert_eq!(app.id(), Some("1234"));
        assert_eq!(app.type_name(), "apps");
    }

    #[test]
    fn test_unknown_type_falls_back_to_untyped() {
        let resource =
            Resource::from_value(json!({"type": "gameCenterDetails", "id": "9"})).unwrap();
        assert!(resource.schema().is_none());
        assert_eq!(resource.to_string(), "gameCenterDetails id 9");
    }

    #[test]
    fn test_attribute_null_is_a_value_and_absent_is_missing() {
        let app = app();

        assert_eq!(app.attribute("name").unwrap(), &json!("Example"));
        assert_eq!(app.attribute("sku").unwrap(), &Value::Null);
        assert!(matches!(
            app.attribute("bundleId"),
            Err(ResourceError::MissingAttribute { attribute, .. }) if attribute == "bundleId"
        ));
    }

    #[test]
    fn test_attribute_as_decodes_typed_value() {
        let app = app();
        let locale: String = app.attribute_as("primaryLocale").unwrap();
        assert_eq!(locale, "en-US");

        let sku: Option<String> = app.attribute_as("sku").unwrap();
        assert!(sku.is_none());

        assert!(matches!(
            app.attribute_as::<u32>("name"),
            Err(ResourceError::Decode { .. })
        ));
    }

    #[test]
    fn test_related_url_prefers_payload_link() {
        assert_eq!(
            app().related_url("builds").unwrap(),
            "https://api.example.com/v1/apps/1234/builds"
        );
    }

    #[test]
    fn test_related_url_is_derived_from_endpoint() {
        assert_eq!(
            app().related_url("betaLicenseAgreement").unwrap(),
            "/v1/apps/1234/betaLicenseAgreement"
        );
    }

    #[test]
    fn test_related_url_requires_id_when_derived() {
        let unsaved = Resource::from_value(json!({"type": "apps"})).unwrap();
        assert!(matches!(
            unsaved.related_url("builds"),
            Err(ResourceError::MissingId { .. })
        ));
    }

    #[test]
    fn test_untyped_related_url_uses_self_link() {
        let resource = Resource::from_value(json!({
            "type": "gameCenterDetails",
            "id": "9",
            "links": {"self": "https://api.example.com/v1/gameCenterDetails/9"}
        }))
        .unwrap();
        assert_eq!(
            resource.related_url("leaderboards").unwrap(),
            "https://api.example.com/v1/gameCenterDetails/9/leaderboards"
        );
    }

    #[test]
    fn test_linkage_and_display() {
        let app = app();
        assert_eq!(app.linkage().unwrap(), Linkage::new("apps", "1234"));
        assert_eq!(app.to_string(), "apps id 1234");

        let unsaved = Resource::from_value(json!({"type": "betaTesters"})).unwrap();
        assert!(matches!(unsaved.linkage(), Err(ResourceError::MissingId { .. })));
        assert_eq!(unsaved.to_string(), "betaTesters (unsaved)");
    }

    #[test]
    fn test_from_document_rejects_null_data() {
        assert!(Resource::from_document(json!({"data": null})).is_err());
        let resource = Resource::from_document(json!({"data": {"type": "apps", "id": "1"}}))
            .unwrap();
        assert_eq!(resource.id(), Some("1"));
    }

    #[test]
    fn test_from_value_rejects_non_objects() {
        assert!(matches!(
            Resource::from_value(json!([1, 2])),
            Err(ResourceError::Decode { .. })
        ));
    }
}
