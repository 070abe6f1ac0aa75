//! Statically typed resources.
//!
//! Each modelled resource type has an attribute struct implementing
//! [`ApiResource`]. A fetched resource is handed out as [`Typed<A>`], which
//! keeps the envelope (for its id and relationships) next to the decoded
//! attributes. `Typed<A>` implements `Deref<Target = A>`, so attribute
//! fields read directly:
//!
//! ```rust,ignore
//! use appstoreconnect::rest::resources::App;
//! use appstoreconnect::rest::{ApiResource, ListParams};
//!
//! let app = App::find(&client, "1234").await?;
//! println!("{}", app.name.as_deref().unwrap_or_default()); // Deref to App
//!
//! let mut builds = app.builds(&client)?;
//! while let Some(build) = builds.try_next().await? {
//!     println!("{} {:?}", build.id().unwrap_or_default(), build.version);
//! }
//! ```

use std::fmt;
use std::ops::Deref;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::clients::AppStoreConnectClient;
use crate::rest::cursor::{Cursor, FromResource};
use crate::rest::{ListParams, Resource, ResourceArgs, ResourceError, ResourceSchema};

/// A resource type with a static schema and a typed attribute struct.
///
/// Implementors only provide [`SCHEMA`](Self::SCHEMA); listing, lookup and
/// creation come from default methods.
#[allow(async_fn_in_trait)]
pub trait ApiResource: Serialize + DeserializeOwned + Clone + Send + Sync + Sized {
    /// The schema of this resource type.
    const SCHEMA: &'static ResourceSchema;

    /// Returns a lazy cursor over the collection endpoint.
    ///
    /// No request is made until the cursor is advanced.
    fn list<'c>(client: &'c AppStoreConnectClient, params: &ListParams) -> Cursor<'c, Typed<Self>> {
        Cursor::new(client, params.to_url(Self::SCHEMA.endpoint))
    }

    /// Fetches one resource by id.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails and
    /// [`ResourceError::TypeMismatch`] if the server answers with another
    /// type.
    async fn find(client: &AppStoreConnectClient, id: &str) -> Result<Typed<Self>, ResourceError> {
        let resource = client.read(Self::SCHEMA, id).await?;
        Typed::from_resource(resource)
    }

    /// Creates a resource from `args`.
    ///
    /// Arguments the schema does not declare are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidArgument`] for mis-shaped arguments and
    /// [`ResourceError::Http`] if the request fails.
    async fn create(
        client: &AppStoreConnectClient,
        args: &ResourceArgs,
    ) -> Result<Typed<Self>, ResourceError> {
        let resource = client.create(Self::SCHEMA, args).await?;
        Typed::from_resource(resource)
    }
}

/// A resource envelope together with its decoded attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct Typed<A> {
    resource: Resource,
    attributes: A,
}

impl<A: ApiResource> Typed<A> {
    /// Returns the server-assigned id.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.resource.id()
    }

    /// Returns the underlying envelope.
    #[must_use]
    pub const fn resource(&self) -> &Resource {
        &self.resource
    }

    /// Consumes the wrapper and returns the envelope.
    #[must_use]
    pub fn into_resource(self) -> Resource {
        self.resource
    }

    /// Consumes the wrapper and returns the attributes.
    #[must_use]
    pub fn into_attributes(self) -> A {
        self.attributes
    }

    /// Sends the given attribute changes and returns the server's view of
    /// the updated resource. `self` is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingId`] if the resource has no id and
    /// [`ResourceError::Http`] if the request fails.
    pub async fn modify(
        &self,
        client: &AppStoreConnectClient,
        args: &ResourceArgs,
    ) -> Result<Self, ResourceError> {
        let resource = client.modify(&self.resource, args).await?;
        Self::from_resource(resource)
    }

    /// Deletes the resource on the server.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingId`] if the resource has no id and
    /// [`ResourceError::Http`] if the request fails, including when the
    /// resource was already deleted.
    pub async fn delete(&self, client: &AppStoreConnectClient) -> Result<(), ResourceError> {
        client.delete(&self.resource).await
    }

    pub(crate) fn many<'c, B: ApiResource>(
        &self,
        client: &'c AppStoreConnectClient,
        name: &str,
    ) -> Result<Cursor<'c, Typed<B>>, ResourceError> {
        self.resource.related_many(client, name)
    }

    pub(crate) async fn one<B: ApiResource>(
        &self,
        client: &AppStoreConnectClient,
        name: &str,
    ) -> Result<Typed<B>, ResourceError> {
        self.resource.related_one(client, name).await
    }
}

impl<A: ApiResource> FromResource for Typed<A> {
    fn from_resource(resource: Resource) -> Result<Self, ResourceError> {
        if resource.type_name() != A::SCHEMA.type_name {
            return Err(ResourceError::TypeMismatch {
                expected: A::SCHEMA.type_name,
                received: resource.type_name().to_string(),
            });
        }
        let attributes = serde_json::from_value(Value::Object(resource.attributes().clone()))
            .map_err(|e| {
                ResourceError::decode(format!("{} attributes: {e}", A::SCHEMA.type_name))
            })?;
        Ok(Self {
            resource,
            attributes,
        })
    }
}

impl<A> Deref for Typed<A> {
    type Target = A;

    fn deref(&self) -> &Self::Target {
        &self.attributes
    }
}

impl<A> AsRef<Resource> for Typed<A> {
    fn as_ref(&self) -> &Resource {
        &self.resource
    }
}

impl<A> fmt::Display for Typed<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.resource, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::resources::{App, Build};
    use serde_json::json;

    fn app_resource() -> Resource {
        Resource::from_value(json!({
            "type": "apps",
            "id": "1",
            "attributes": {
                "name": "Example",
                "bundleId": "com.example.app",
                "sku": "EX1",
                "primaryLocale": "en-US",
                "unmodelled": true
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_typed_derefs_to_attributes() {
        let app = Typed::<App>::from_resource(app_resource()).unwrap();

        assert_eq!(app.name.as_deref(), Some("Example"));
        assert_eq!(app.bundle_id.as_deref(), Some("com.example.app"));
        assert_eq!(app.id(), Some("1"));
        assert_eq!(app.to_string(), "apps id 1");
    }

    #[test]
    fn test_missing_attributes_decode_as_none() {
        let resource = Resource::from_value(json!({"type": "apps", "id": "2"})).unwrap();
        let app = Typed::<App>::from_resource(resource).unwrap();
        assert!(app.name.is_none());
    }

    #[test]
    fn test_type_mismatch_is_rejected() {
        let error = Typed::<Build>::from_resource(app_resource()).unwrap_err();
        assert!(matches!(
            error,
            ResourceError::TypeMismatch { expected: "builds", received } if received == "apps"
        ));
    }

    #[test]
    fn test_ill_typed_attribute_is_a_decode_error() {
        let resource = Resource::from_value(json!({
            "type": "builds",
            "id": "3",
            "attributes": {"expired": "not a bool"}
        }))
        .unwrap();
        assert!(matches!(
            Typed::<Build>::from_resource(resource),
            Err(ResourceError::Decode { .. })
        ));
    }
}
