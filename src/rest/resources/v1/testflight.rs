//! TestFlight testers and groups.
//!
//! # Example
//!
//! ```rust,ignore
//! use appstoreconnect::rest::resources::{BetaGroup, BetaTester};
//! use appstoreconnect::rest::{ApiResource, ResourceArgs};
//!
//! let group = BetaGroup::find(&client, "g-1").await?;
//! let args = ResourceArgs::new()
//!     .set("email", "tester@example.com")
//!     .set("firstName", "Ada")
//!     .relate_many("betaGroups", [&group])?;
//! let tester = BetaTester::create(&client, &args).await?;
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::AppStoreConnectClient;
use crate::rest::resources::v1::apps::App;
use crate::rest::resources::v1::builds::Build;
use crate::rest::resources::v1::common::InviteType;
use crate::rest::{ApiResource, Cursor, RelationshipDef, ResourceError, ResourceSchema, Typed};

/// Schema of `betaTesters`.
pub const BETA_TESTERS: ResourceSchema = ResourceSchema::new(
    "betaTesters",
    "/v1/betaTesters",
    &["firstName", "lastName", "email", "inviteType"],
    &[
        RelationshipDef::many("apps", "apps"),
        RelationshipDef::many("betaGroups", "betaGroups"),
        RelationshipDef::many("builds", "builds"),
    ],
);

/// Schema of `betaGroups`.
pub const BETA_GROUPS: ResourceSchema = ResourceSchema::new(
    "betaGroups",
    "/v1/betaGroups",
    &[
        "name",
        "createdDate",
        "isInternalGroup",
        "publicLinkEnabled",
        "publicLinkId",
        "publicLinkLimitEnabled",
        "publicLinkLimit",
        "publicLink",
        "feedbackEnabled",
    ],
    &[
        RelationshipDef::single("app", "apps"),
        RelationshipDef::many("betaTesters", "betaTesters"),
        RelationshipDef::many("builds", "builds"),
    ],
);

/// A TestFlight tester.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct BetaTester {
    /// First name.
    pub first_name: Option<String>,
    /// Last name.
    pub last_name: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// How the tester was invited.
    pub invite_type: Option<InviteType>,
}

impl ApiResource for BetaTester {
    const SCHEMA: &'static ResourceSchema = &BETA_TESTERS;
}

impl Typed<BetaTester> {
    /// Apps the tester can test.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the relationship URL cannot be built.
    pub fn apps<'c>(
        &self,
        client: &'c AppStoreConnectClient,
    ) -> Result<Cursor<'c, Typed<App>>, ResourceError> {
        self.many(client, "apps")
    }

    /// Groups the tester belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the relationship URL cannot be built.
    pub fn beta_groups<'c>(
        &self,
        client: &'c AppStoreConnectClient,
    ) -> Result<Cursor<'c, Typed<BetaGroup>>, ResourceError> {
        self.many(client, "betaGroups")
    }

    /// Builds assigned to the tester individually.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the relationship URL cannot be built.
    pub fn builds<'c>(
        &self,
        client: &'c AppStoreConnectClient,
    ) -> Result<Cursor<'c, Typed<Build>>, ResourceError> {
        self.many(client, "builds")
    }
}

/// A group of TestFlight testers.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct BetaGroup {
    /// Group name.
    pub name: Option<String>,
    /// When the group was created.
    pub created_date: Option<DateTime<Utc>>,
    /// Whether the group holds team members rather than external testers.
    pub is_internal_group: Option<bool>,
    /// Whether anyone with the public link can join.
    pub public_link_enabled: Option<bool>,
    /// Identifier embedded in the public link.
    pub public_link_id: Option<String>,
    /// Whether the public link caps the number of testers.
    pub public_link_limit_enabled: Option<bool>,
    /// Maximum number of testers joining through the public link.
    pub public_link_limit: Option<u32>,
    /// The public link.
    pub public_link: Option<String>,
    /// Whether testers can send feedback.
    pub feedback_enabled: Option<bool>,
}

impl ApiResource for BetaGroup {
    const SCHEMA: &'static ResourceSchema = &BETA_GROUPS;
}

impl Typed<BetaGroup> {
    /// The app the group tests.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the app cannot be fetched.
    pub async fn app(&self, client: &AppStoreConnectClient) -> Result<Typed<App>, ResourceError> {
        self.one(client, "app").await
    }

    /// Testers in the group.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the relationship URL cannot be built.
    pub fn beta_testers<'c>(
        &self,
        client: &'c AppStoreConnectClient,
    ) -> Result<Cursor<'c, Typed<BetaTester>>, ResourceError> {
        self.many(client, "betaTesters")
    }

    /// Builds available to the group.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the relationship URL cannot be built.
    pub fn builds<'c>(
        &self,
        client: &'c AppStoreConnectClient,
    ) -> Result<Cursor<'c, Typed<Build>>, ResourceError> {
        self.many(client, "builds")
    }
}
