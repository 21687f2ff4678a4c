//! Command line runs: deadline handling, outcome rendering and exit codes.

use ironcore_models::NamespacedCloudProfile;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::config::{AdmissionConfig, OutputFormat};
use crate::error::ValidationError;
use crate::field::FieldErrorList;
use crate::lookup::CloudProfileLookup;
use crate::validator::NamespacedCloudProfileValidator;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Accepted,
    Rejected(FieldErrorList),
}

impl Outcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Accepted => 0,
            Outcome::Rejected(_) => 1,
        }
    }

    /// Text is one finding per line; JSON is the findings array, empty on
    /// acceptance.
    pub fn render(
        &self,
        format: OutputFormat,
        name: &str,
    ) -> Result<String, serde_json::Error> {
        match (self, format) {
            (Outcome::Accepted, OutputFormat::Text) => {
                Ok(format!("{name} accepted"))
            }
            (Outcome::Accepted, OutputFormat::Json) => {
                serde_json::to_string_pretty(&FieldErrorList::new())
            }
            (Outcome::Rejected(errs), OutputFormat::Text) => Ok(errs
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
            (Outcome::Rejected(errs), OutputFormat::Json) => {
                serde_json::to_string_pretty(errs)
            }
        }
    }
}

/// Validates `profile` under the configured deadline. Findings become
/// [`Outcome::Rejected`]; every other failure is returned.
pub async fn run<L: CloudProfileLookup>(
    cfg: &AdmissionConfig,
    lookup: L,
    profile: &NamespacedCloudProfile,
) -> Result<Outcome, ValidationError> {
    let validator = NamespacedCloudProfileValidator::new(lookup);
    let cancel = CancellationToken::new();
    if let Some(timeout) = cfg.lookup_timeout() {
        let deadline = cancel.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep(timeout) => deadline.cancel(),
                _ = deadline.cancelled() => {}
            }
        });
    }

    let res = validator.validate(&cancel, profile, None).await;
    cancel.cancel();

    match res {
        Ok(()) => Ok(Outcome::Accepted),
        Err(ValidationError::Invalid(errs)) => {
            warn!(
                name = %profile.qualified_name(),
                findings = errs.len(),
                "profile rejected"
            );
            Ok(Outcome::Rejected(errs))
        }
        Err(e) => Err(e),
    }
}
