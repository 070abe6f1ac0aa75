//! Value types shared by several resources.
//!
//! Enumerations tolerate values added by the service later: anything not
//! listed decodes as `Unknown` instead of failing the whole resource.

use serde::{Deserialize, Serialize};

/// The platform a version, build or declaration applies to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Platform {
    /// iOS and iPadOS.
    Ios,
    /// macOS.
    MacOs,
    /// tvOS.
    TvOs,
    /// visionOS.
    VisionOs,
    /// A platform this client does not know about.
    #[serde(other)]
    Unknown,
}

/// Where a build is in Apple's processing pipeline.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessingState {
    /// Still being processed.
    Processing,
    /// Processing failed.
    Failed,
    /// The build was rejected as invalid.
    Invalid,
    /// Ready for testing and submission.
    Valid,
    /// A state this client does not know about.
    #[serde(other)]
    Unknown,
}

/// How a beta tester was invited.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InviteType {
    /// Invited by email.
    Email,
    /// Joined through a public link.
    PublicLink,
    /// An invite type this client does not know about.
    #[serde(other)]
    Unknown,
}

/// A team member's role.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    /// Account holder and legal contact.
    AccountHolder,
    /// Full administrative access.
    Admin,
    /// Manages agreements, tax and banking.
    Finance,
    /// Legal agreements.
    Legal,
    /// Reads sales reports.
    Sales,
    /// Manages marketing material.
    Marketing,
    /// Manages apps and metadata.
    AppManager,
    /// Uploads builds and manages certificates.
    Developer,
    /// Manages customer reviews.
    CustomerSupport,
    /// Reads reports.
    Reports,
    /// Creates apps.
    CreateApps,
    /// Manages cloud-managed developer ID certificates.
    CloudManagedDeveloperId,
    /// Manages cloud-managed distribution certificates.
    CloudManagedAppDistribution,
    /// A role this client does not know about.
    #[serde(other)]
    Unknown,
}

/// State of an external or internal TestFlight build.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BetaBuildState {
    /// Still processing.
    Processing,
    /// Processing failed.
    ProcessingException,
    /// Export compliance information is missing.
    MissingExportCompliance,
    /// Ready for internal testing.
    ReadyForBetaTesting,
    /// Being tested internally.
    InBetaTesting,
    /// The build expired.
    Expired,
    /// Ready to be submitted for beta review.
    ReadyForBetaSubmission,
    /// Waiting for beta review.
    WaitingForBetaReview,
    /// In beta review.
    InBetaReview,
    /// Rejected in beta review.
    BetaRejected,
    /// Approved in beta review.
    BetaApproved,
    /// Export compliance documents are under review.
    InExportComplianceReview,
    /// A state this client does not know about.
    #[serde(other)]
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_platform_wire_names() {
        assert_eq!(serde_json::to_value(Platform::MacOs).unwrap(), json!("MAC_OS"));
        assert_eq!(
            serde_json::from_value::<Platform>(json!("TV_OS")).unwrap(),
            Platform::TvOs
        );
    }

    #[test]
    fn test_unlisted_values_decode_as_unknown() {
        assert_eq!(
            serde_json::from_value::<Platform>(json!("WATCH_OS")).unwrap(),
            Platform::Unknown
        );
        assert_eq!(
            serde_json::from_value::<UserRole>(json!("GAME_MASTER")).unwrap(),
            UserRole::Unknown
        );
    }

    #[test]
    fn test_multi_word_states() {
        assert_eq!(
            serde_json::from_value::<BetaBuildState>(json!("READY_FOR_BETA_SUBMISSION")).unwrap(),
            BetaBuildState::ReadyForBetaSubmission
        );
        assert_eq!(
            serde_json::from_value::<InviteType>(json!("PUBLIC_LINK")).unwrap(),
            InviteType::PublicLink
        );
    }
}
