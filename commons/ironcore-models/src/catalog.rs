//! In-memory view over one source of machine images and machine types.
//!
//! A validation run builds up to four catalogs (parent spec, parent provider
//! config, child spec, child provider config) and only ever reads them.
//! Entries keep the position they had in their source document so that
//! findings can point back at them.

use std::collections::BTreeMap;

use crate::profile::{MachineImage, MachineType};
use crate::provider_config::{CloudProfileConfig, RegionImage};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    /// Structured `spec.machineImages` / `spec.machineTypes`
    Spec,
    /// Decoded `spec.providerConfig`
    ProviderConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogImage {
    pub name: String,
    /// Index in the source list
    pub position: usize,
    pub versions: Vec<CatalogVersion>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogVersion {
    pub version: String,
    pub position: usize,
    /// Only populated for provider config sources
    pub regions: Vec<RegionImage>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogMachineType {
    pub name: String,
    pub position: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    source: Source,
    images: Vec<CatalogImage>,
    machine_types: Vec<CatalogMachineType>,
    // name -> positions in `images`, duplicates included
    image_index: BTreeMap<String, Vec<usize>>,
    machine_type_index: BTreeMap<String, Vec<usize>>,
}

impl Catalog {
    pub fn empty(source: Source) -> Self {
        Self::build(source, Vec::new(), Vec::new())
    }

    pub fn from_spec(images: &[MachineImage], types: &[MachineType]) -> Self {
        let images = images
            .iter()
            .enumerate()
            .map(|(position, image)| CatalogImage {
                name: image.name.clone(),
                position,
                versions: image
                    .versions
                    .iter()
                    .enumerate()
                    .map(|(position, v)| CatalogVersion {
                        version: v.version.clone(),
                        position,
                        regions: Vec::new(),
                    })
                    .collect(),
            })
            .collect();
        let machine_types = types
            .iter()
            .enumerate()
            .map(|(position, t)| CatalogMachineType {
                name: t.name.clone(),
                position,
            })
            .collect();
        Self::build(Source::Spec, images, machine_types)
    }

    /// Provider config carries no machine types.
    pub fn from_provider_config(config: &CloudProfileConfig) -> Self {
        let images = config
            .machine_images
            .iter()
            .enumerate()
            .map(|(position, image)| CatalogImage {
                name: image.name.clone(),
                position,
                versions: image
                    .versions
                    .iter()
                    .enumerate()
                    .map(|(position, v)| CatalogVersion {
                        version: v.version.clone(),
                        position,
                        regions: v.regions.clone(),
                    })
                    .collect(),
            })
            .collect();
        Self::build(Source::ProviderConfig, images, Vec::new())
    }

    fn build(
        source: Source,
        images: Vec<CatalogImage>,
        machine_types: Vec<CatalogMachineType>,
    ) -> Self {
        let mut image_index: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for (i, image) in images.iter().enumerate() {
            image_index.entry(image.name.clone()).or_default().push(i);
        }
        let mut machine_type_index: BTreeMap<String, Vec<usize>> =
            BTreeMap::new();
        for (i, t) in machine_types.iter().enumerate() {
            machine_type_index.entry(t.name.clone()).or_default().push(i);
        }
        Self {
            source,
            images,
            machine_types,
            image_index,
            machine_type_index,
        }
    }

    pub fn source(&self) -> Source {
        self.source
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty() && self.machine_types.is_empty()
    }

    /// Images in source order.
    pub fn images(&self) -> &[CatalogImage] {
        &self.images
    }

    pub fn machine_types(&self) -> &[CatalogMachineType] {
        &self.machine_types
    }

    /// Images ordered by name; entries sharing a name keep source order.
    pub fn images_by_name(&self) -> impl Iterator<Item = &CatalogImage> {
        self.image_index
            .values()
            .flat_map(move |positions| {
                positions.iter().map(move |&i| &self.images[i])
            })
    }

    /// Every entry registered under `name`.
    pub fn images_named<'a>(
        &'a self,
        name: &str,
    ) -> impl Iterator<Item = &'a CatalogImage> {
        self.image_index
            .get(name)
            .into_iter()
            .flatten()
            .map(move |&i| &self.images[i])
    }

    pub fn has_image(&self, name: &str) -> bool {
        self.image_index.contains_key(name)
    }

    pub fn has_version(&self, image: &str, version: &str) -> bool {
        self.images_named(image)
            .any(|img| img.versions.iter().any(|v| v.version == version))
    }

    pub fn has_machine_type(&self, name: &str) -> bool {
        self.machine_type_index.contains_key(name)
    }
}
