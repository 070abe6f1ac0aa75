//! App resources.
//!
//! An [`App`] owns its TestFlight configuration: beta localizations, the
//! beta license agreement, the beta review contact details, pre-release
//! versions and export compliance declarations.
//!
//! # Example
//!
//! ```rust,ignore
//! use appstoreconnect::rest::resources::App;
//! use appstoreconnect::rest::{ApiResource, Filters, ListParams};
//!
//! let params = ListParams::new().filters(Filters::new().with("bundleId", "com.example.app"));
//! let mut apps = App::list(&client, &params);
//!
//! if let Some(app) = apps.try_next().await? {
//!     let agreement = app.beta_license_agreement(&client).await?;
//!     println!("{:?}", agreement.agreement_text);
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::AppStoreConnectClient;
use crate::rest::resources::v1::builds::Build;
use crate::rest::resources::v1::common::Platform;
use crate::rest::resources::v1::testflight::BetaGroup;
use crate::rest::{ApiResource, Cursor, RelationshipDef, ResourceError, ResourceSchema, Typed};

/// Schema of `apps`.
pub const APPS: ResourceSchema = ResourceSchema::new(
    "apps",
    "/v1/apps",
    &[
        "bundleId",
        "name",
        "primaryLocale",
        "sku",
        "contentRightsDeclaration",
    ],
    &[
        RelationshipDef::many("betaAppLocalizations", "betaAppLocalizations"),
        RelationshipDef::single("betaAppReviewDetail", "betaAppReviewDetails"),
        RelationshipDef::many("betaGroups", "betaGroups"),
        RelationshipDef::single("betaLicenseAgreement", "betaLicenseAgreements"),
        RelationshipDef::many("builds", "builds"),
        RelationshipDef::many("preReleaseVersions", "preReleaseVersions"),
    ],
);

/// Schema of `preReleaseVersions`.
pub const PRE_RELEASE_VERSIONS: ResourceSchema = ResourceSchema::new(
    "preReleaseVersions",
    "/v1/preReleaseVersions",
    &["version", "platform"],
    &[
        RelationshipDef::single("app", "apps"),
        RelationshipDef::many("builds", "builds"),
    ],
);

/// Schema of `betaAppLocalizations`.
pub const BETA_APP_LOCALIZATIONS: ResourceSchema = ResourceSchema::new(
    "betaAppLocalizations",
    "/v1/betaAppLocalizations",
    &[
        "feedbackEmail",
        "marketingUrl",
        "privacyPolicyUrl",
        "tvOsPrivacyPolicy",
        "description",
        "locale",
    ],
    &[RelationshipDef::single("app", "apps")],
);

/// Schema of `appEncryptionDeclarations`.
pub const APP_ENCRYPTION_DECLARATIONS: ResourceSchema = ResourceSchema::new(
    "appEncryptionDeclarations",
    "/v1/appEncryptionDeclarations",
    &[
        "usesEncryption",
        "exempt",
        "containsProprietaryCryptography",
        "containsThirdPartyCryptography",
        "availableOnFrenchStore",
        "platform",
        "uploadedDate",
        "documentUrl",
        "documentName",
        "documentType",
        "appEncryptionDeclarationState",
        "codeValue",
    ],
    &[
        RelationshipDef::single("app", "apps"),
        RelationshipDef::many("builds", "builds"),
    ],
);

/// Schema of `betaLicenseAgreements`.
pub const BETA_LICENSE_AGREEMENTS: ResourceSchema = ResourceSchema::new(
    "betaLicenseAgreements",
    "/v1/betaLicenseAgreements",
    &["agreementText"],
    &[RelationshipDef::single("app", "apps")],
);

/// Schema of `betaAppReviewDetails`.
pub const BETA_APP_REVIEW_DETAILS: ResourceSchema = ResourceSchema::new(
    "betaAppReviewDetails",
    "/v1/betaAppReviewDetails",
    &[
        "contactFirstName",
        "contactLastName",
        "contactPhone",
        "contactEmail",
        "demoAccountName",
        "demoAccountPassword",
        "demoAccountRequired",
        "notes",
    ],
    &[RelationshipDef::single("app", "apps")],
);

/// An app in App Store Connect.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct App {
    /// The bundle identifier, e.g. `com.example.app`.
    pub bundle_id: Option<String>,
    /// The app's name.
    pub name: Option<String>,
    /// The primary locale, e.g. `en-US`.
    pub primary_locale: Option<String>,
    /// The SKU chosen when the app was created.
    pub sku: Option<String>,
    /// Whether the app uses third-party content.
    pub content_rights_declaration: Option<String>,
}

impl ApiResource for App {
    const SCHEMA: &'static ResourceSchema = &APPS;
}

impl Typed<App> {
    /// Beta test information localized per locale.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the relationship URL cannot be built.
    pub fn beta_app_localizations<'c>(
        &self,
        client: &'c AppStoreConnectClient,
    ) -> Result<Cursor<'c, Typed<BetaAppLocalization>>, ResourceError> {
        self.many(client, "betaAppLocalizations")
    }

    /// Contact and demo account details for beta review.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if the app has none.
    pub async fn beta_app_review_detail(
        &self,
        client: &AppStoreConnectClient,
    ) -> Result<Typed<BetaAppReviewDetail>, ResourceError> {
        self.one(client, "betaAppReviewDetail").await
    }

    /// The app's beta groups.
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

    /// The license agreement shown to beta testers.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if the app has none.
    pub async fn beta_license_agreement(
        &self,
        client: &AppStoreConnectClient,
    ) -> Result<Typed<BetaLicenseAgreement>, ResourceError> {
        self.one(client, "betaLicenseAgreement").await
    }

    /// Every build uploaded for the app.
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

    /// Versions that have builds but are not released yet.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the relationship URL cannot be built.
    pub fn pre_release_versions<'c>(
        &self,
        client: &'c AppStoreConnectClient,
    ) -> Result<Cursor<'c, Typed<PreReleaseVersion>>, ResourceError> {
        self.many(client, "preReleaseVersions")
    }
}

/// A version of an app that has builds but has not been released.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct PreReleaseVersion {
    /// The version string, e.g. `1.2`.
    pub version: Option<String>,
    /// The platform of the version.
    pub platform: Option<Platform>,
}

impl ApiResource for PreReleaseVersion {
    const SCHEMA: &'static ResourceSchema = &PRE_RELEASE_VERSIONS;
}

impl Typed<PreReleaseVersion> {
    /// The app the version belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the app cannot be fetched.
    pub async fn app(&self, client: &AppStoreConnectClient) -> Result<Typed<App>, ResourceError> {
        self.one(client, "app").await
    }

    /// Builds of this version.
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

/// Beta test information for one locale.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct BetaAppLocalization {
    /// Address testers send feedback to.
    pub feedback_email: Option<String>,
    /// Marketing page URL.
    pub marketing_url: Option<String>,
    /// Privacy policy URL.
    pub privacy_policy_url: Option<String>,
    /// Privacy policy text shown on tvOS.
    pub tv_os_privacy_policy: Option<String>,
    /// What testers should know about the app.
    pub description: Option<String>,
    /// The locale, e.g. `en-US`.
    pub locale: Option<String>,
}

impl ApiResource for BetaAppLocalization {
    const SCHEMA: &'static ResourceSchema = &BETA_APP_LOCALIZATIONS;
}

impl Typed<BetaAppLocalization> {
    /// The localized app.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the app cannot be fetched.
    pub async fn app(&self, client: &AppStoreConnectClient) -> Result<Typed<App>, ResourceError> {
        self.one(client, "app").await
    }
}

/// An export compliance declaration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct AppEncryptionDeclaration {
    /// Whether the app uses encryption.
    pub uses_encryption: Option<bool>,
    /// Whether the encryption is exempt from export regulations.
    pub exempt: Option<bool>,
    /// Whether the app implements proprietary cryptography.
    pub contains_proprietary_cryptography: Option<bool>,
    /// Whether the app uses third-party cryptography.
    pub contains_third_party_cryptography: Option<bool>,
    /// Whether the app is distributed on the French App Store.
    pub available_on_french_store: Option<bool>,
    /// The platform the declaration covers.
    pub platform: Option<Platform>,
    /// When the declaration was uploaded.
    pub uploaded_date: Option<DateTime<Utc>>,
    /// URL of the supporting document.
    pub document_url: Option<String>,
    /// File name of the supporting document.
    pub document_name: Option<String>,
    /// MIME type of the supporting document.
    pub document_type: Option<String>,
    /// Review state, e.g. `APPROVED`.
    pub app_encryption_declaration_state: Option<String>,
    /// The key builds use to reference this declaration.
    pub code_value: Option<String>,
}

impl ApiResource for AppEncryptionDeclaration {
    const SCHEMA: &'static ResourceSchema = &APP_ENCRYPTION_DECLARATIONS;
}

impl Typed<AppEncryptionDeclaration> {
    /// The app the declaration belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the app cannot be fetched.
    pub async fn app(&self, client: &AppStoreConnectClient) -> Result<Typed<App>, ResourceError> {
        self.one(client, "app").await
    }

    /// Builds that use this declaration.
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

/// The license agreement beta testers accept.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct BetaLicenseAgreement {
    /// The agreement text.
    pub agreement_text: Option<String>,
}

impl ApiResource for BetaLicenseAgreement {
    const SCHEMA: &'static ResourceSchema = &BETA_LICENSE_AGREEMENTS;
}

impl Typed<BetaLicenseAgreement> {
    /// The app the agreement belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the app cannot be fetched.
    pub async fn app(&self, client: &AppStoreConnectClient) -> Result<Typed<App>, ResourceError> {
        self.one(client, "app").await
    }
}

/// Contact and demo account details for beta app review.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct BetaAppReviewDetail {
    /// Reviewer contact first name.
    pub contact_first_name: Option<String>,
    /// Reviewer contact last name.
    pub contact_last_name: Option<String>,
    /// Reviewer contact phone number.
    pub contact_phone: Option<String>,
    /// Reviewer contact email.
    pub contact_email: Option<String>,
    /// Demo account user name.
    pub demo_account_name: Option<String>,
    /// Demo account password.
    pub demo_account_password: Option<String>,
    /// Whether review needs the demo account.
    pub demo_account_required: Option<bool>,
    /// Notes for the reviewer.
    pub notes: Option<String>,
}

impl ApiResource for BetaAppReviewDetail {
    const SCHEMA: &'static ResourceSchema = &BETA_APP_REVIEW_DETAILS;
}

impl Typed<BetaAppReviewDetail> {
    /// The app under review.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the app cannot be fetched.
    pub async fn app(&self, client: &AppStoreConnectClient) -> Result<Typed<App>, ResourceError> {
        self.one(client, "app").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::FromResource;
    use crate::rest::Resource;
    use serde_json::json;

    #[test]
    fn test_app_attributes_decode_from_camel_case() {
        let resource = Resource::from_value(json!({
            "type": "apps",
            "id": "1",
            "attributes": {
                "bundleId": "com.example.app",
                "primaryLocale": "en-GB",
                "contentRightsDeclaration": "DOES_NOT_USE_THIRD_PARTY_CONTENT"
            }
        }))
        .unwrap();

        let app = Typed::<App>::from_resource(resource).unwrap();
        assert_eq!(app.bundle_id.as_deref(), Some("com.example.app"));
        assert_eq!(app.primary_locale.as_deref(), Some("en-GB"));
        assert!(app.sku.is_none());
    }

    #[test]
    fn test_encryption_declaration_dates_and_platform() {
        let resource = Resource::from_value(json!({
            "type": "appEncryptionDeclarations",
            "id": "d1",
            "attributes": {
                "usesEncryption": true,
                "platform": "IOS",
                "uploadedDate": "2026-03-01T12:00:00Z"
            }
        }))
        .unwrap();

        let declaration = Typed::<AppEncryptionDeclaration>::from_resource(resource).unwrap();
        assert_eq!(declaration.uses_encryption, Some(true));
        assert_eq!(declaration.platform, Some(Platform::Ios));
        assert_eq!(
            declaration.uploaded_date.map(|d| d.to_rfc3339()),
            Some("2026-03-01T12:00:00+00:00".to_string())
        );
    }

    #[test]
    fn test_app_attribute_names_match_schema() {
        let value = serde_json::to_value(App {
            bundle_id: Some(String::new()),
            name: Some(String::new()),
            primary_locale: Some(String::new()),
            sku: Some(String::new()),
            content_rights_declaration: Some(String::new()),
        })
        .unwrap();

        for key in value.as_object().unwrap().keys() {
            assert!(APPS.has_attribute(key), "{key} missing from schema");
        }
    }
}
