use ironcore_models::{
    CLOUD_PROFILE_REFERENCE_KIND, CloudProfile, CloudProfileReference,
};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::ValidationError;
use crate::field::{FieldError, FieldPath};
use crate::lookup::CloudProfileLookup;

/// Checks that the reference points at a `CloudProfile`.
pub fn validate_parent_reference(
    reference: &CloudProfileReference,
) -> Result<(), FieldError> {
    if reference.kind != CLOUD_PROFILE_REFERENCE_KIND {
        return Err(FieldError::forbidden(
            FieldPath::new("spec").child("parent").child("kind"),
            format!(
                "parent reference must be of kind {}",
                CLOUD_PROFILE_REFERENCE_KIND
            ),
        ));
    }
    Ok(())
}

/// Validates the reference and fetches the parent it names.
///
/// A wrong kind is rejected before any lookup. Lookup failures are returned
/// unchanged and never retried; `cancel` aborts a pending lookup.
pub async fn resolve_parent<L>(
    lookup: &L,
    cancel: &CancellationToken,
    reference: &CloudProfileReference,
) -> Result<CloudProfile, ValidationError>
where
    L: CloudProfileLookup + ?Sized,
{
    validate_parent_reference(reference)
        .map_err(|e| ValidationError::Invalid(e.into()))?;

    debug!(parent = %reference.name, "fetching parent CloudProfile");
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(ValidationError::Cancelled),
        res = lookup.get_cloud_profile(&reference.name) => {
            res.map_err(ValidationError::from)
        }
    }
}
