#![allow(dead_code)]

use ironcore_admission::{
    MemoryCloudProfileLookup, NamespacedCloudProfileValidator,
};
use ironcore_models::{
    CloudProfile, CloudProfileReference, CloudProfileSpec, MachineImage,
    MachineImageVersion, MachineType, NamespacedCloudProfile,
    NamespacedCloudProfileSpec, PROVIDER_CONFIG_API_VERSION,
    PROVIDER_CONFIG_KIND,
};
use serde_json::{Value, json};

pub const NAMESPACE: &str = "garden-dev";
pub const PARENT: &str = "cloud-profile";

pub fn cloud_profile() -> CloudProfile {
    CloudProfile::new(PARENT, CloudProfileSpec::default())
}

pub fn namespaced_cloud_profile() -> NamespacedCloudProfile {
    let mut profile = NamespacedCloudProfile::new(
        "profile-1",
        NamespacedCloudProfileSpec {
            parent: CloudProfileReference::cloud_profile(PARENT),
            ..Default::default()
        },
    );
    profile.metadata.namespace = Some(NAMESPACE.to_string());
    profile
}

/// `[(image, [version])]` into spec machine images.
pub fn machine_images(images: &[(&str, &[&str])]) -> Vec<MachineImage> {
    images
        .iter()
        .map(|(name, versions)| MachineImage {
            name: name.to_string(),
            versions: versions
                .iter()
                .map(|v| MachineImageVersion::new(*v))
                .collect(),
        })
        .collect()
}

pub fn machine_types(names: &[&str]) -> Vec<MachineType> {
    names.iter().map(|n| MachineType::new(*n)).collect()
}

/// Provider document with one `eu1` region per version.
pub fn provider_config(images: &[(&str, &[&str])]) -> Value {
    let machine_images: Vec<Value> = images
        .iter()
        .map(|(name, versions)| {
            json!({
                "name": name,
                "versions": versions
                    .iter()
                    .map(|v| json!({
                        "version": v,
                        "regions": [{"name": "eu1", "ami": "ami-123"}]
                    }))
                    .collect::<Vec<_>>()
            })
        })
        .collect();
    json!({
        "apiVersion": PROVIDER_CONFIG_API_VERSION,
        "kind": PROVIDER_CONFIG_KIND,
        "machineImages": machine_images
    })
}

pub fn empty_provider_config() -> Value {
    json!({
        "apiVersion": PROVIDER_CONFIG_API_VERSION,
        "kind": PROVIDER_CONFIG_KIND
    })
}

pub fn validator_with(
    parents: impl IntoIterator<Item = CloudProfile>,
) -> NamespacedCloudProfileValidator<MemoryCloudProfileLookup> {
    NamespacedCloudProfileValidator::new(
        MemoryCloudProfileLookup::with_profiles(parents),
    )
}

pub fn validator_without_parents()
-> NamespacedCloudProfileValidator<MemoryCloudProfileLookup> {
    NamespacedCloudProfileValidator::new(MemoryCloudProfileLookup::new())
}
