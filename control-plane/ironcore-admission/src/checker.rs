//! Consistency rules between a `NamespacedCloudProfile` and its parent.
//!
//! A child carries its additions twice: as structured `spec.machineImages`
//! and inside the provider document under `spec.providerConfig`. Both must
//! describe the same new image versions, and neither may re-add what the
//! parent already serves. All findings are collected; nothing stops early.
//!
//! Findings are emitted in a fixed order: provider config structure, spec
//! structure, spec side (images by name, versions in appearance order),
//! provider config side (images by name, then document position), machine
//! types.

use std::collections::HashSet;

use ironcore_models::Catalog;
use tracing::trace;

use crate::field::{FieldError, FieldErrorList, FieldPath};

/// Union of the parent's spec and provider config catalogs. Historical
/// parent entries may live in either one.
#[derive(Debug, Clone, Copy)]
pub struct ParentCatalog<'a> {
    pub spec: &'a Catalog,
    pub provider_config: &'a Catalog,
}

impl ParentCatalog<'_> {
    pub fn has_image(&self, name: &str) -> bool {
        self.spec.has_image(name) || self.provider_config.has_image(name)
    }

    pub fn has_version(&self, image: &str, version: &str) -> bool {
        self.spec.has_version(image, version)
            || self.provider_config.has_version(image, version)
    }

    pub fn has_machine_type(&self, name: &str) -> bool {
        self.spec.has_machine_type(name)
            || self.provider_config.has_machine_type(name)
    }
}

pub fn check(
    parent_spec: &Catalog,
    parent_config: &Catalog,
    child_spec: &Catalog,
    child_config: &Catalog,
) -> FieldErrorList {
    let parent = ParentCatalog {
        spec: parent_spec,
        provider_config: parent_config,
    };

    let mut errs = FieldErrorList::new();
    errs.append(check_provider_config_structure(child_config));
    errs.append(check_spec_structure(child_spec));
    errs.append(check_spec_images(parent, child_spec, child_config));
    errs.append(check_provider_config_images(
        parent,
        child_spec,
        child_config,
    ));
    errs.append(check_machine_types(parent, child_spec));

    trace!(findings = errs.len(), "consistency check done");
    errs
}

fn provider_images_path() -> FieldPath {
    FieldPath::new("spec")
        .child("providerConfig")
        .child("machineImages")
}

fn image_version(name: &str, version: &str) -> String {
    format!("{name}@{version}")
}

/// Empty names and repeated entries inside the child's provider document.
pub fn check_provider_config_structure(
    child_config: &Catalog,
) -> FieldErrorList {
    let mut errs = FieldErrorList::new();
    let mut seen_images = HashSet::new();

    for image in child_config.images() {
        let idx_path = provider_images_path().index(image.position);

        if image.name.is_empty() {
            errs.push(FieldError::required(
                idx_path.child("name"),
                "machine image name must be provided",
            ));
        } else if !seen_images.insert(image.name.as_str()) {
            errs.push(FieldError::invalid(
                idx_path.child("name"),
                image.name.clone(),
                "duplicate machine image name",
            ));
        }

        if image.versions.is_empty() {
            errs.push(FieldError::required(
                idx_path.child("versions"),
                format!(
                    "must provide at least one version for machine image {:?}",
                    image.name
                ),
            ));
            continue;
        }

        let mut seen_versions = HashSet::new();
        for version in &image.versions {
            let version_path =
                idx_path.child("versions").index(version.position);
            if version.version.is_empty() {
                errs.push(FieldError::required(
                    version_path.child("version"),
                    "must provide a version",
                ));
            } else if !seen_versions.insert(version.version.as_str()) {
                errs.push(FieldError::invalid(
                    version_path.child("version"),
                    image_version(&image.name, &version.version),
                    "duplicate machine image version",
                ));
            }

            for (k, region) in version.regions.iter().enumerate() {
                if region.name.is_empty() {
                    errs.push(FieldError::required(
                        version_path.child("regions").index(k).child("name"),
                        "must provide a region name",
                    ));
                }
            }
        }
    }
    errs
}

/// Repeated names inside the child's `spec.machineImages` and
/// `spec.machineTypes`. Empty names are left to the API server schema.
pub fn check_spec_structure(child_spec: &Catalog) -> FieldErrorList {
    let mut errs = FieldErrorList::new();
    let images_path = FieldPath::new("spec").child("machineImages");

    let mut seen_images = HashSet::new();
    for image in child_spec.images() {
        let idx_path = images_path.index(image.position);
        if !seen_images.insert(image.name.as_str()) {
            errs.push(FieldError::invalid(
                idx_path.child("name"),
                image.name.clone(),
                "duplicate machine image name",
            ));
        }

        let mut seen_versions = HashSet::new();
        for version in &image.versions {
            if !seen_versions.insert(version.version.as_str()) {
                errs.push(FieldError::invalid(
                    idx_path
                        .child("versions")
                        .index(version.position)
                        .child("version"),
                    image_version(&image.name, &version.version),
                    "duplicate machine image version",
                ));
            }
        }
    }

    let mut seen_types = HashSet::new();
    for t in child_spec.machine_types() {
        if !seen_types.insert(t.name.as_str()) {
            errs.push(FieldError::invalid(
                FieldPath::new("spec")
                    .child("machineTypes")
                    .index(t.position)
                    .child("name"),
                t.name.clone(),
                "duplicate machine type name",
            ));
        }
    }
    errs
}

/// Every new version in `spec.machineImages` needs a provider config entry.
pub fn check_spec_images(
    parent: ParentCatalog<'_>,
    child_spec: &Catalog,
    child_config: &Catalog,
) -> FieldErrorList {
    let mut errs = FieldErrorList::new();

    for image in child_spec.images_by_name() {
        if !parent.has_image(&image.name)
            && !child_config.has_image(&image.name)
        {
            // image-level finding covers all of its versions
            errs.push(FieldError::required(
                provider_images_path(),
                format!(
                    "machine image {} is not defined in the NamespacedCloudProfile providerConfig",
                    image.name
                ),
            ));
            continue;
        }

        for version in &image.versions {
            // versions served by the parent are backed by its provider config
            if parent.has_version(&image.name, &version.version)
                || child_config.has_version(&image.name, &version.version)
            {
                continue;
            }
            errs.push(FieldError::required(
                provider_images_path(),
                format!(
                    "machine image version {} is not defined in the NamespacedCloudProfile providerConfig",
                    image_version(&image.name, &version.version)
                ),
            ));
        }
    }
    errs
}

/// Provider config entries must be new and mirrored in `spec.machineImages`.
pub fn check_provider_config_images(
    parent: ParentCatalog<'_>,
    child_spec: &Catalog,
    child_config: &Catalog,
) -> FieldErrorList {
    let mut errs = FieldErrorList::new();

    for image in child_config.images_by_name() {
        let idx_path = provider_images_path().index(image.position);

        for version in &image.versions {
            if parent.has_version(&image.name, &version.version) {
                errs.push(FieldError::forbidden(
                    idx_path.child("versions").index(version.position),
                    format!(
                        "machine image version {} is already defined in the parent CloudProfile",
                        image_version(&image.name, &version.version)
                    ),
                ));
            }
        }

        if !child_spec.has_image(&image.name) {
            errs.push(FieldError::required(
                idx_path,
                format!(
                    "machine image {} is not defined in the NamespacedCloudProfile .spec.machineImages",
                    image.name
                ),
            ));
            continue;
        }

        for version in &image.versions {
            if !child_spec.has_version(&image.name, &version.version) {
                errs.push(FieldError::invalid(
                    idx_path.child("versions").index(version.position),
                    image_version(&image.name, &version.version),
                    "machine image version is not defined in the NamespacedCloudProfile",
                ));
            }
        }
    }
    errs
}

/// Machine types may only be added, never redefined.
pub fn check_machine_types(
    parent: ParentCatalog<'_>,
    child_spec: &Catalog,
) -> FieldErrorList {
    child_spec
        .machine_types()
        .iter()
        .filter(|t| parent.has_machine_type(&t.name))
        .map(|t| {
            FieldError::forbidden(
                FieldPath::new("spec").child("machineTypes").index(t.position),
                format!(
                    "machine type {} is already defined in the parent CloudProfile",
                    t.name
                ),
            )
        })
        .collect()
}
