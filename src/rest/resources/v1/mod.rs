//! Resources of the `/v1` API.
//!
//! Every schema defined here is listed in [`SCHEMAS`], the table the
//! process-wide [`Registry`](crate::rest::Registry) is built from. A schema
//! missing from the table still works through its typed API, but envelopes
//! of that type decode as untyped.

mod apps;
mod builds;
mod common;
mod testflight;
mod users;

pub use apps::{
    App, AppEncryptionDeclaration, BetaAppLocalization, BetaAppReviewDetail, BetaLicenseAgreement,
    PreReleaseVersion, APPS, APP_ENCRYPTION_DECLARATIONS, BETA_APP_LOCALIZATIONS,
    BETA_APP_REVIEW_DETAILS, BETA_LICENSE_AGREEMENTS, PRE_RELEASE_VERSIONS,
};
pub use builds::{
    BetaAppReviewSubmission, BetaBuildLocalization, Build, BuildBetaDetail,
    BETA_APP_REVIEW_SUBMISSIONS, BETA_BUILD_LOCALIZATIONS, BUILDS, BUILD_BETA_DETAILS,
};
pub use common::{BetaBuildState, InviteType, Platform, ProcessingState, UserRole};
pub use testflight::{BetaGroup, BetaTester, BETA_GROUPS, BETA_TESTERS};
pub use users::{User, UserInvitation, USERS, USER_INVITATIONS};

use crate::rest::ResourceSchema;

/// Every `/v1` resource schema.
pub static SCHEMAS: &[&ResourceSchema] = &[
    &APPS,
    &APP_ENCRYPTION_DECLARATIONS,
    &BETA_APP_LOCALIZATIONS,
    &BETA_APP_REVIEW_DETAILS,
    &BETA_APP_REVIEW_SUBMISSIONS,
    &BETA_BUILD_LOCALIZATIONS,
    &BETA_GROUPS,
    &BETA_LICENSE_AGREEMENTS,
    &BETA_TESTERS,
    &BUILDS,
    &BUILD_BETA_DETAILS,
    &PRE_RELEASE_VERSIONS,
    &USERS,
    &USER_INVITATIONS,
];
