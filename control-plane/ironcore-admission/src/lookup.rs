use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use ironcore_models::CloudProfile;
use kube::{Api, Client, ResourceExt};
use tokio::sync::RwLock;

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("CloudProfile {0} not found")]
    NotFound(String),

    #[error("kube error: {0}")]
    Kube(#[from] kube::Error),

    #[error("lookup backend error: {0}")]
    Backend(String),
}

pub type LookupResult<T> = Result<T, LookupError>;

/// Read-only access to parent `CloudProfile` objects.
#[async_trait]
pub trait CloudProfileLookup: Send + Sync {
    async fn get_cloud_profile(
        &self,
        name: &str,
    ) -> LookupResult<CloudProfile>;
}

#[async_trait]
impl<T: CloudProfileLookup + ?Sized> CloudProfileLookup for Arc<T> {
    async fn get_cloud_profile(
        &self,
        name: &str,
    ) -> LookupResult<CloudProfile> {
        (**self).get_cloud_profile(name).await
    }
}

/// Fetches parents from the API server. `CloudProfile` is cluster scoped.
#[derive(Clone)]
pub struct KubeCloudProfileLookup {
    api: Api<CloudProfile>,
}

impl KubeCloudProfileLookup {
    pub fn new(client: Client) -> Self {
        Self {
            api: Api::all(client),
        }
    }
}

#[async_trait]
impl CloudProfileLookup for KubeCloudProfileLookup {
    async fn get_cloud_profile(
        &self,
        name: &str,
    ) -> LookupResult<CloudProfile> {
        match self.api.get(name).await {
            Ok(profile) => Ok(profile),
            Err(kube::Error::Api(ae)) if ae.code == 404 => {
                Err(LookupError::NotFound(name.to_string()))
            }
            Err(e) => Err(LookupError::Kube(e)),
        }
    }
}

type MemoryStore = Arc<RwLock<HashMap<String, CloudProfile>>>;

/// In-process parent store, keyed by object name.
#[derive(Clone, Default)]
pub struct MemoryCloudProfileLookup {
    store: MemoryStore,
}

impl MemoryCloudProfileLookup {
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn with_profiles(
        profiles: impl IntoIterator<Item = CloudProfile>,
    ) -> Self {
        let store = profiles
            .into_iter()
            .map(|p| (p.name_any(), p))
            .collect::<HashMap<_, _>>();
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }

    pub async fn insert(&self, profile: CloudProfile) {
        let mut store = self.store.write().await;
        store.insert(profile.name_any(), profile);
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }
}

#[async_trait]
impl CloudProfileLookup for MemoryCloudProfileLookup {
    async fn get_cloud_profile(
        &self,
        name: &str,
    ) -> LookupResult<CloudProfile> {
        let store = self.store.read().await;
        store
            .get(name)
            .cloned()
            .ok_or_else(|| LookupError::NotFound(name.to_string()))
    }
}
