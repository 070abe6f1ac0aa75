//! Build resources.
//!
//! A [`Build`] is one uploaded binary. Its TestFlight state lives in
//! [`BuildBetaDetail`], its "what to test" notes in
//! [`BetaBuildLocalization`] and its external review in
//! [`BetaAppReviewSubmission`].
//!
//! # Example
//!
//! ```rust,ignore
//! use appstoreconnect::rest::resources::{BetaAppReviewSubmission, Build};
//! use appstoreconnect::rest::{ApiResource, ResourceArgs};
//!
//! let build = Build::find(&client, "8812").await?;
//! if !build.expired.unwrap_or(false) {
//!     let args = ResourceArgs::new().relate("build", &build)?;
//!     BetaAppReviewSubmission::create(&client, &args).await?;
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::AppStoreConnectClient;
use crate::rest::resources::v1::apps::{App, AppEncryptionDeclaration, PreReleaseVersion};
use crate::rest::resources::v1::common::{BetaBuildState, ProcessingState};
use crate::rest::resources::v1::testflight::BetaTester;
use crate::rest::{ApiResource, Cursor, RelationshipDef, ResourceError, ResourceSchema, Typed};

/// Schema of `builds`.
pub const BUILDS: ResourceSchema = ResourceSchema::new(
    "builds",
    "/v1/builds",
    &[
        "version",
        "uploadedDate",
        "expirationDate",
        "expired",
        "minOsVersion",
        "iconAssetToken",
        "processingState",
        "usesNonExemptEncryption",
    ],
    &[
        RelationshipDef::single("app", "apps"),
        RelationshipDef::single("appEncryptionDeclaration", "appEncryptionDeclarations"),
        RelationshipDef::single("betaAppReviewSubmission", "betaAppReviewSubmissions"),
        RelationshipDef::many("betaBuildLocalizations", "betaBuildLocalizations"),
        RelationshipDef::single("buildBetaDetail", "buildBetaDetails"),
        RelationshipDef::many("individualTesters", "betaTesters"),
        RelationshipDef::single("preReleaseVersion", "preReleaseVersions"),
    ],
);

/// Schema of `buildBetaDetails`.
pub const BUILD_BETA_DETAILS: ResourceSchema = ResourceSchema::new(
    "buildBetaDetails",
    "/v1/buildBetaDetails",
    &["autoNotifyEnabled", "internalBuildState", "externalBuildState"],
    &[RelationshipDef::single("build", "builds")],
);

/// Schema of `betaBuildLocalizations`.
pub const BETA_BUILD_LOCALIZATIONS: ResourceSchema = ResourceSchema::new(
    "betaBuildLocalizations",
    "/v1/betaBuildLocalizations",
    &["whatsNew", "locale"],
    &[RelationshipDef::single("build", "builds")],
);

/// Schema of `betaAppReviewSubmissions`.
pub const BETA_APP_REVIEW_SUBMISSIONS: ResourceSchema = ResourceSchema::new(
    "betaAppReviewSubmissions",
    "/v1/betaAppReviewSubmissions",
    &["betaReviewState", "submittedDate"],
    &[RelationshipDef::single("build", "builds")],
);

/// An uploaded build.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Build {
    /// The build number, e.g. `42`.
    pub version: Option<String>,
    /// When the build was uploaded.
    pub uploaded_date: Option<DateTime<Utc>>,
    /// When the build stops being available to testers.
    pub expiration_date: Option<DateTime<Utc>>,
    /// Whether the build has expired.
    pub expired: Option<bool>,
    /// Minimum OS version the build supports.
    pub min_os_version: Option<String>,
    /// Token for the build's icon, as returned by the server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_asset_token: Option<serde_json::Value>,
    /// Processing state.
    pub processing_state: Option<ProcessingState>,
    /// Whether the build uses non-exempt encryption.
    pub uses_non_exempt_encryption: Option<bool>,
}

impl ApiResource for Build {
    const SCHEMA: &'static ResourceSchema = &BUILDS;
}

impl Typed<Build> {
    /// The app the build belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the app cannot be fetched.
    pub async fn app(&self, client: &AppStoreConnectClient) -> Result<Typed<App>, ResourceError> {
        self.one(client, "app").await
    }

    /// The export compliance declaration the build uses.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if none is attached.
    pub async fn app_encryption_declaration(
        &self,
        client: &AppStoreConnectClient,
    ) -> Result<Typed<AppEncryptionDeclaration>, ResourceError> {
        self.one(client, "appEncryptionDeclaration").await
    }

    /// The build's beta review submission.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if the build was never submitted.
    pub async fn beta_app_review_submission(
        &self,
        client: &AppStoreConnectClient,
    ) -> Result<Typed<BetaAppReviewSubmission>, ResourceError> {
        self.one(client, "betaAppReviewSubmission").await
    }

    /// Localized "what to test" notes.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the relationship URL cannot be built.
    pub fn beta_build_localizations<'c>(
        &self,
        client: &'c AppStoreConnectClient,
    ) -> Result<Cursor<'c, Typed<BetaBuildLocalization>>, ResourceError> {
        self.many(client, "betaBuildLocalizations")
    }

    /// TestFlight state of the build.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the details cannot be fetched.
    pub async fn build_beta_detail(
        &self,
        client: &AppStoreConnectClient,
    ) -> Result<Typed<BuildBetaDetail>, ResourceError> {
        self.one(client, "buildBetaDetail").await
    }

    /// Testers given access to this build directly rather than through a
    /// group.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the relationship URL cannot be built.
    pub fn individual_testers<'c>(
        &self,
        client: &'c AppStoreConnectClient,
    ) -> Result<Cursor<'c, Typed<BetaTester>>, ResourceError> {
        self.many(client, "individualTesters")
    }

    /// The version this build belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the version cannot be fetched.
    pub async fn pre_release_version(
        &self,
        client: &AppStoreConnectClient,
    ) -> Result<Typed<PreReleaseVersion>, ResourceError> {
        self.one(client, "preReleaseVersion").await
    }
}

/// TestFlight details of a build.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct BuildBetaDetail {
    /// Whether testers are notified automatically when the build is ready.
    pub auto_notify_enabled: Option<bool>,
    /// State for internal testing.
    pub internal_build_state: Option<BetaBuildState>,
    /// State for external testing.
    pub external_build_state: Option<BetaBuildState>,
}

impl ApiResource for BuildBetaDetail {
    const SCHEMA: &'static ResourceSchema = &BUILD_BETA_DETAILS;
}

impl Typed<BuildBetaDetail> {
    /// The build these details describe.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the build cannot be fetched.
    pub async fn build(&self, client: &AppStoreConnectClient) -> Result<Typed<Build>, ResourceError> {
        self.one(client, "build").await
    }
}

/// "What to test" notes for one locale.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct BetaBuildLocalization {
    /// What testers should focus on.
    pub whats_new: Option<String>,
    /// The locale, e.g. `en-US`.
    pub locale: Option<String>,
}

impl ApiResource for BetaBuildLocalization {
    const SCHEMA: &'static ResourceSchema = &BETA_BUILD_LOCALIZATIONS;
}

impl Typed<BetaBuildLocalization> {
    /// The localized build.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the build cannot be fetched.
    pub async fn build(&self, client: &AppStoreConnectClient) -> Result<Typed<Build>, ResourceError> {
        self.one(client, "build").await
    }
}

/// A build submitted for external beta review.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct BetaAppReviewSubmission {
    /// Review state, e.g. `WAITING_FOR_REVIEW`.
    pub beta_review_state: Option<String>,
    /// When the build was submitted.
    pub submitted_date: Option<DateTime<Utc>>,
}

impl ApiResource for BetaAppReviewSubmission {
    const SCHEMA: &'static ResourceSchema = &BETA_APP_REVIEW_SUBMISSIONS;
}

impl Typed<BetaAppReviewSubmission> {
    /// The submitted build.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the build cannot be fetched.
    pub async fn build(&self, client: &AppStoreConnectClient) -> Result<Typed<Build>, ResourceError> {
        self.one(client, "build").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::{FromResource, Resource};
    use serde_json::json;

    #[test]
    fn test_build_decodes_states_and_dates() {
        let resource = Resource::from_value(json!({
            "type": "builds",
            "id": "b1",
            "attributes": {
                "version": "42",
                "expired": false,
                "processingState": "VALID",
                "uploadedDate": "2026-01-02T03:04:05-08:00",
                "iconAssetToken": {"templateUrl": "https://example.com/{w}x{h}.png"}
            }
        }))
        .unwrap();

        let build = Typed::<Build>::from_resource(resource).unwrap();
        assert_eq!(build.version.as_deref(), Some("42"));
        assert_eq!(build.processing_state, Some(ProcessingState::Valid));
        assert_eq!(
            build.uploaded_date.map(|d| d.to_rfc3339()),
            Some("2026-01-02T11:04:05+00:00".to_string())
        );
        assert!(build.icon_asset_token.is_some());
    }

    #[test]
    fn test_beta_detail_unknown_state() {
        let resource = Resource::from_value(json!({
            "type": "buildBetaDetails",
            "id": "d",
            "attributes": {"externalBuildState": "SOMETHING_NEW"}
        }))
        .unwrap();

        let detail = Typed::<BuildBetaDetail>::from_resource(resource).unwrap();
        assert_eq!(detail.external_build_state, Some(BetaBuildState::Unknown));
        assert!(detail.internal_build_state.is_none());
    }

    #[test]
    fn test_submission_schema_has_build_relationship() {
        let relationship = BETA_APP_REVIEW_SUBMISSIONS.relationship("build").unwrap();
        assert_eq!(relationship.target, "builds");
        assert!(BUILDS.relationship("individualTesters").is_some());
    }
}
