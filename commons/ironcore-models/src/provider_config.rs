use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

pub const PROVIDER_CONFIG_API_VERSION: &str =
    "ironcore.provider.extensions.gardener.cloud/v1alpha1";
pub const PROVIDER_CONFIG_KIND: &str = "CloudProfileConfig";

/// Type header every embedded provider document carries.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TypeMeta {
    #[serde(default, deserialize_with = "null_as_default")]
    pub api_version: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub kind: String,
}

impl TypeMeta {
    pub fn is_cloud_profile_config(&self) -> bool {
        self.api_version == PROVIDER_CONFIG_API_VERSION
            && self.kind == PROVIDER_CONFIG_KIND
    }
}

/// Provider document embedded in `spec.providerConfig` of both profile kinds.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CloudProfileConfig {
    #[serde(flatten)]
    pub type_meta: TypeMeta,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub machine_images: Vec<MachineImages>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MachineImages {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub versions: Vec<MachineImageVersion>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MachineImageVersion {
    #[serde(default, deserialize_with = "null_as_default")]
    pub version: String,
    /// OCI image reference backing this version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub architecture: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub regions: Vec<RegionImage>,
}

/// Region binding of an image version. Everything besides `name` is an
/// opaque provider identifier (`ami`, `id`, ...).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RegionImage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(flatten)]
    pub identifiers: BTreeMap<String, serde_json::Value>,
}

impl CloudProfileConfig {
    pub fn new(machine_images: Vec<MachineImages>) -> Self {
        Self {
            type_meta: TypeMeta {
                api_version: PROVIDER_CONFIG_API_VERSION.to_string(),
                kind: PROVIDER_CONFIG_KIND.to_string(),
            },
            machine_images,
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
