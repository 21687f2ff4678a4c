use ironcore_models::{Catalog, NamespacedCloudProfile};
use kube::ResourceExt;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::checker;
use crate::codec::ProviderConfigDecoder;
use crate::error::ValidationError;
use crate::lookup::CloudProfileLookup;
use crate::resolver::resolve_parent;

/// Admission validation for `NamespacedCloudProfile` objects.
///
/// Holds no per-request state; one instance can serve concurrent requests.
pub struct NamespacedCloudProfileValidator<L> {
    lookup: L,
    decoder: ProviderConfigDecoder,
}

impl<L: CloudProfileLookup> NamespacedCloudProfileValidator<L> {
    pub fn new(lookup: L) -> Self {
        Self {
            lookup,
            decoder: ProviderConfigDecoder::new(),
        }
    }

    /// Accepts the object or returns why not.
    ///
    /// Objects being deleted are always accepted. Parent resolution and
    /// provider config decoding stop the run on the first failure; the
    /// catalog comparison reports every finding at once. `_old` is accepted
    /// for update requests but not compared.
    pub async fn validate(
        &self,
        cancel: &CancellationToken,
        profile: &NamespacedCloudProfile,
        _old: Option<&NamespacedCloudProfile>,
    ) -> Result<(), ValidationError> {
        let name = profile.qualified_name();
        if profile.is_being_deleted() {
            debug!(%name, "object is being deleted, skipping validation");
            return Ok(());
        }

        let parent =
            resolve_parent(&self.lookup, cancel, &profile.spec.parent).await?;

        let parent_config = self
            .decoder
            .decode_catalog(parent.spec.provider_config.as_ref())
            .map_err(|e| {
                ValidationError::decode(
                    format!("CloudProfile {}", parent.name_any()),
                    e,
                )
            })?;
        let child_config = self
            .decoder
            .decode_catalog(profile.spec.provider_config.as_ref())
            .map_err(|e| {
                ValidationError::decode(
                    format!("NamespacedCloudProfile {}", name),
                    e,
                )
            })?;

        let parent_spec = Catalog::from_spec(
            &parent.spec.machine_images,
            &parent.spec.machine_types,
        );
        let child_spec = Catalog::from_spec(
            &profile.spec.machine_images,
            &profile.spec.machine_types,
        );

        let errs = checker::check(
            &parent_spec,
            &parent_config,
            &child_spec,
            &child_config,
        );
        if errs.is_empty() {
            debug!(%name, parent = %parent.name_any(), "accepted");
            return Ok(());
        }

        info!(%name, findings = errs.len(), "rejected");
        Err(ValidationError::Invalid(errs))
    }
}
