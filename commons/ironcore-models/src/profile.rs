use std::collections::BTreeMap;

use kube::{CustomResource, Resource, ResourceExt};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Kind a `NamespacedCloudProfile` must use when referencing its parent.
pub const CLOUD_PROFILE_REFERENCE_KIND: &str = "CloudProfile";

#[derive(
    CustomResource, Deserialize, Serialize, Clone, Debug, Default, JsonSchema,
)]
#[kube(
    group = "core.gardener.cloud",
    version = "v1beta1",
    kind = "CloudProfile",
    plural = "cloudprofiles"
)]
#[serde(rename_all = "camelCase")]
pub struct CloudProfileSpec {
    /// Provider type served by this profile (e.g. "ironcore")
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub provider_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub machine_images: Vec<MachineImage>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub machine_types: Vec<MachineType>,
    /// Embedded provider document, see `CloudProfileConfig`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_config: Option<serde_json::Value>,
}

#[derive(
    CustomResource, Deserialize, Serialize, Clone, Debug, Default, JsonSchema,
)]
#[kube(
    group = "core.gardener.cloud",
    version = "v1beta1",
    kind = "NamespacedCloudProfile",
    plural = "namespacedcloudprofiles",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct NamespacedCloudProfileSpec {
    pub parent: CloudProfileReference,
    /// Additional machine images; may only add versions unknown to the parent
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub machine_images: Vec<MachineImage>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub machine_types: Vec<MachineType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_config: Option<serde_json::Value>,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, JsonSchema)]
pub struct CloudProfileReference {
    pub kind: String,
    pub name: String,
}

impl CloudProfileReference {
    pub fn cloud_profile(name: impl Into<String>) -> Self {
        Self {
            kind: CLOUD_PROFILE_REFERENCE_KIND.to_string(),
            name: name.into(),
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MachineImage {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub versions: Vec<MachineImageVersion>,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MachineImageVersion {
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,
    /// preview | supported | deprecated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub architectures: Vec<String>,
}

impl MachineImageVersion {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            ..Default::default()
        }
    }
}

/// Machine type entry. Only the name is significant here; cpu, memory,
/// gpu and the rest are carried through untouched.
#[derive(Deserialize, Serialize, Clone, Debug, Default, JsonSchema)]
pub struct MachineType {
    pub name: String,
    #[serde(flatten)]
    pub attributes: BTreeMap<String, serde_json::Value>,
}

impl MachineType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: BTreeMap::new(),
        }
    }
}

impl NamespacedCloudProfile {
    /// True once the API server has set a deletion timestamp.
    pub fn is_being_deleted(&self) -> bool {
        self.meta().deletion_timestamp.is_some()
    }

    /// `namespace/name` form used in logs and error messages.
    pub fn qualified_name(&self) -> String {
        match self.namespace() {
            Some(ns) => format!("{}/{}", ns, self.name_any()),
            None => self.name_any(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn namespaced_profile_from_manifest() {
        let manifest = r#"
apiVersion: core.gardener.cloud/v1beta1
kind: NamespacedCloudProfile
metadata:
  name: profile-1
  namespace: garden-dev
spec:
  parent:
    kind: CloudProfile
    name: cloud-profile
  machineImages:
  - name: image-1
    versions:
    - version: "1.1"
      expirationDate: "2030-01-01T00:00:00Z"
  machineTypes:
  - name: type-2
    cpu: "4"
    memory: 16Gi
  providerConfig:
    apiVersion: ironcore.provider.extensions.gardener.cloud/v1alpha1
    kind: CloudProfileConfig
"#;
        let profile: NamespacedCloudProfile =
            serde_yaml::from_str(manifest).unwrap();

        assert_eq!(profile.qualified_name(), "garden-dev/profile-1");
        assert!(!profile.is_being_deleted());
        assert_eq!(profile.spec.parent.kind, CLOUD_PROFILE_REFERENCE_KIND);
        assert_eq!(profile.spec.machine_images[0].versions[0].version, "1.1");
        assert_eq!(profile.spec.machine_types[0].name, "type-2");
        assert_eq!(
            profile.spec.machine_types[0].attributes.get("memory"),
            Some(&serde_json::json!("16Gi"))
        );
        assert!(profile.spec.provider_config.is_some());
    }

    #[test]
    fn cloud_profile_without_lists() {
        let manifest = r#"
apiVersion: core.gardener.cloud/v1beta1
kind: CloudProfile
metadata:
  name: cloud-profile
spec:
  type: ironcore
"#;
        let profile: CloudProfile = serde_yaml::from_str(manifest).unwrap();

        assert_eq!(profile.spec.provider_type.as_deref(), Some("ironcore"));
        assert!(profile.spec.machine_images.is_empty());
        assert!(profile.spec.machine_types.is_empty());
        assert!(profile.spec.provider_config.is_none());
    }

    #[test]
    fn deletion_timestamp_marks_deletion() {
        let manifest = r#"
apiVersion: core.gardener.cloud/v1beta1
kind: NamespacedCloudProfile
metadata:
  name: profile-1
  namespace: garden-dev
  deletionTimestamp: "2024-05-01T10:00:00Z"
spec:
  parent:
    kind: CloudProfile
    name: cloud-profile
"#;
        let profile: NamespacedCloudProfile =
            serde_yaml::from_str(manifest).unwrap();

        assert!(profile.is_being_deleted());
    }
}
