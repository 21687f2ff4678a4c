pub mod catalog;
pub mod profile;
pub mod provider_config;

pub use catalog::*;
pub use profile::*;
// `provider_config::MachineImageVersion` stays qualified, it shares its name
// with `profile::MachineImageVersion`.
pub use provider_config::{
    CloudProfileConfig, MachineImages, PROVIDER_CONFIG_API_VERSION,
    PROVIDER_CONFIG_KIND, RegionImage, TypeMeta,
};
