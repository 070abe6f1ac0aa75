//! Version-specific resource definitions.
//!
//! Resources are organized by API version:
//!
//! ```text
//! resources/
//!   mod.rs           <- This file (re-exports the latest version)
//!   v1/
//!     mod.rs         <- Schemas, attribute structs and the schema table
//! ```
//!
//! The latest version is re-exported here for convenience:
//!
//! ```rust,ignore
//! use appstoreconnect::rest::resources::App;  // Uses latest version
//!
//! // Or explicitly specify a version:
//! use appstoreconnect::rest::resources::v1::App;
//! ```
//!
//! # Available Resources
//!
//! | Type                        | Struct                       | Endpoint                        |
//! |-----------------------------|------------------------------|---------------------------------|
//! | `apps`                      | [`App`]                      | `/v1/apps`                      |
//! | `builds`                    | [`Build`]                    | `/v1/builds`                    |
//! | `betaTesters`               | [`BetaTester`]               | `/v1/betaTesters`               |
//! | `betaGroups`                | [`BetaGroup`]                | `/v1/betaGroups`                |
//! | `preReleaseVersions`        | [`PreReleaseVersion`]        | `/v1/preReleaseVersions`        |
//! | `betaAppLocalizations`      | [`BetaAppLocalization`]      | `/v1/betaAppLocalizations`      |
//! | `appEncryptionDeclarations` | [`AppEncryptionDeclaration`] | `/v1/appEncryptionDeclarations` |
//! | `betaLicenseAgreements`     | [`BetaLicenseAgreement`]     | `/v1/betaLicenseAgreements`     |
//! | `buildBetaDetails`          | [`BuildBetaDetail`]          | `/v1/buildBetaDetails`          |
//! | `betaBuildLocalizations`    | [`BetaBuildLocalization`]    | `/v1/betaBuildLocalizations`    |
//! | `betaAppReviewDetails`      | [`BetaAppReviewDetail`]      | `/v1/betaAppReviewDetails`      |
//! | `betaAppReviewSubmissions`  | [`BetaAppReviewSubmission`]  | `/v1/betaAppReviewSubmissions`  |
//! | `users`                     | [`User`]                     | `/v1/users`                     |
//! | `userInvitations`           | [`UserInvitation`]           | `/v1/userInvitations`           |

pub mod v1;

// Re-export types from the latest version for convenience
pub use v1::*;
