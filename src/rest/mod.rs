//! JSON:API resource layer for App Store Connect.
//!
//! This module turns JSON:API documents into navigable objects:
//!
//! - **[`ResourceSchema`]**: static description of one resource type
//! - **[`Registry`]**: process-wide lookup from `type` to schema
//! - **[`Resource`]**: an envelope around one decoded resource object, with
//!   attribute access and relationship navigation
//! - **[`Cursor`]**: a lazy, page-following iterator over a collection
//! - **[`ResourceArgs`]**: arguments for the generic create and modify
//!   operations on [`AppStoreConnectClient`](crate::AppStoreConnectClient)
//! - **[`ApiResource`] / [`Typed`]**: the statically typed layer on top, one
//!   attribute struct per resource type in [`resources`]
//! - **[`Filters`] / [`ListParams`]**: query construction
//!
//! # Example: Untyped Access
//!
//! ```rust,ignore
//! use appstoreconnect::rest::resources::APPS;
//! use appstoreconnect::rest::{Filters, ListParams};
//!
//! let params = ListParams::new().filters(Filters::new().with("bundleId", "com.example.app"));
//! let mut apps = client.list(&APPS, &params);
//! println!("{} apps", apps.len().await?);
//!
//! while let Some(app) = apps.try_next().await? {
//!     println!("{app}: {}", app.attribute("name")?);
//! }
//! ```
//!
//! # Example: Typed Access
//!
//! ```rust,ignore
//! use appstoreconnect::rest::resources::{BetaGroup, BetaTester};
//! use appstoreconnect::rest::{ApiResource, ResourceArgs};
//!
//! let group = BetaGroup::find(&client, "g-1").await?;
//! let tester = BetaTester::create(
//!     &client,
//!     &ResourceArgs::new()
//!         .set("email", "tester@example.com")
//!         .relate_many("betaGroups", [&group])?,
//! )
//! .await?;
//!
//! let renamed = tester
//!     .modify(&client, &ResourceArgs::new().set("firstName", "Grace"))
//!     .await?;
//! renamed.delete(&client).await?;
//! ```

mod crud;
mod cursor;
mod errors;
mod query;
mod registry;
mod resource;
mod schema;
mod typed;

pub mod resources;

// Public exports
pub use crud::{
    build_relationships, create_document, filter_attributes, modify_document, Argument,
    ResourceArgs,
};
pub use cursor::{Cursor, FromResource};
pub use errors::ResourceError;
pub use query::{build_url, Filters, ListParams};
pub use registry::Registry;
pub use resource::{Linkage, Related, RelationshipLinks, RelationshipObject, Resource, ResourceObject};
pub use schema::{Multiplicity, RelationshipDef, ResourceSchema};
pub use typed::{ApiResource, Typed};
