//! Team members and their invitations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::AppStoreConnectClient;
use crate::rest::resources::v1::apps::App;
use crate::rest::resources::v1::common::UserRole;
use crate::rest::{ApiResource, Cursor, RelationshipDef, ResourceError, ResourceSchema, Typed};

/// Schema of `users`.
pub const USERS: ResourceSchema = ResourceSchema::new(
    "users",
    "/v1/users",
    &[
        "username",
        "firstName",
        "lastName",
        "roles",
        "allAppsVisible",
        "provisioningAllowed",
    ],
    &[RelationshipDef::many("visibleApps", "apps")],
);

/// Schema of `userInvitations`.
pub const USER_INVITATIONS: ResourceSchema = ResourceSchema::new(
    "userInvitations",
    "/v1/userInvitations",
    &[
        "email",
        "firstName",
        "lastName",
        "expirationDate",
        "roles",
        "allAppsVisible",
        "provisioningAllowed",
    ],
    &[RelationshipDef::many("visibleApps", "apps")],
);

/// A member of the App Store Connect team.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    /// The Apple ID.
    pub username: Option<String>,
    /// First name.
    pub first_name: Option<String>,
    /// Last name.
    pub last_name: Option<String>,
    /// Assigned roles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<UserRole>>,
    /// Whether the user sees every app, including future ones.
    pub all_apps_visible: Option<bool>,
    /// Whether the user may manage provisioning.
    pub provisioning_allowed: Option<bool>,
}

impl ApiResource for User {
    const SCHEMA: &'static ResourceSchema = &USERS;
}

impl Typed<User> {
    /// Apps the user can see when `all_apps_visible` is off.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the relationship URL cannot be built.
    pub fn visible_apps<'c>(
        &self,
        client: &'c AppStoreConnectClient,
    ) -> Result<Cursor<'c, Typed<App>>, ResourceError> {
        self.many(client, "visibleApps")
    }
}

/// A pending invitation to join the team.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct UserInvitation {
    /// Address the invitation was sent to.
    pub email: Option<String>,
    /// First name.
    pub first_name: Option<String>,
    /// Last name.
    pub last_name: Option<String>,
    /// When the invitation lapses.
    pub expiration_date: Option<DateTime<Utc>>,
    /// Roles granted on acceptance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<UserRole>>,
    /// Whether the new user will see every app.
    pub all_apps_visible: Option<bool>,
    /// Whether the new user may manage provisioning.
    pub provisioning_allowed: Option<bool>,
}

impl ApiResource for UserInvitation {
    const SCHEMA: &'static ResourceSchema = &USER_INVITATIONS;
}

impl Typed<UserInvitation> {
    /// Apps the invited user will see.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the relationship URL cannot be built.
    pub fn visible_apps<'c>(
        &self,
        client: &'c AppStoreConnectClient,
    ) -> Result<Cursor<'c, Typed<App>>, ResourceError> {
        self.many(client, "visibleApps")
    }
}
