use ironcore_models::{
    Catalog, CloudProfileConfig, PROVIDER_CONFIG_API_VERSION,
    PROVIDER_CONFIG_KIND, Source, TypeMeta,
};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error(
        "unsupported providerConfig type {api_version}, Kind={kind} (expected {}, Kind={})",
        PROVIDER_CONFIG_API_VERSION,
        PROVIDER_CONFIG_KIND
    )]
    SchemaMismatch { api_version: String, kind: String },

    #[error("malformed providerConfig: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Decoder for the embedded `CloudProfileConfig` document. Decode only.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProviderConfigDecoder;

impl ProviderConfigDecoder {
    pub fn new() -> Self {
        Self
    }

    pub fn decode(
        &self,
        raw: &[u8],
    ) -> Result<CloudProfileConfig, DecodeError> {
        let value: Value = serde_json::from_slice(raw)?;
        self.decode_value(&value)
    }

    pub fn decode_value(
        &self,
        raw: &Value,
    ) -> Result<CloudProfileConfig, DecodeError> {
        if !raw.is_object() {
            return Err(DecodeError::Malformed(serde::de::Error::custom(
                format!("expected a JSON object, found {}", json_type(raw)),
            )));
        }
        // header first so a foreign document reports its type, not its shape
        let meta = TypeMeta::deserialize(raw)?;
        if !meta.is_cloud_profile_config() {
            return Err(DecodeError::SchemaMismatch {
                api_version: meta.api_version,
                kind: meta.kind,
            });
        }
        Ok(CloudProfileConfig::deserialize(raw)?)
    }

    /// Absent config is the valid "no additions" state and yields an empty
    /// catalog.
    pub fn decode_catalog(
        &self,
        raw: Option<&Value>,
    ) -> Result<Catalog, DecodeError> {
        match raw {
            None => Ok(Catalog::empty(Source::ProviderConfig)),
            Some(raw) => {
                let config = self.decode_value(raw)?;
                Ok(Catalog::from_provider_config(&config))
            }
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_expected_document() {
        let raw = br#"{
"apiVersion":"ironcore.provider.extensions.gardener.cloud/v1alpha1",
"kind":"CloudProfileConfig",
"machineImages":[{"name":"image-1","versions":[{"version":"1.0","regions":[{"name":"eu1","ami":"ami-123"}]}]}]
}"#;
        let config = ProviderConfigDecoder::new().decode(raw).unwrap();

        assert_eq!(config.machine_images.len(), 1);
        assert_eq!(config.machine_images[0].versions[0].version, "1.0");
    }

    #[test]
    fn missing_machine_images_is_empty() {
        let catalog = ProviderConfigDecoder::new()
            .decode_catalog(Some(&json!({
                "apiVersion": PROVIDER_CONFIG_API_VERSION,
                "kind": PROVIDER_CONFIG_KIND
            })))
            .unwrap();

        assert!(catalog.is_empty());
        assert_eq!(catalog.source(), Source::ProviderConfig);
    }

    #[test]
    fn absent_config_is_empty() {
        let catalog =
            ProviderConfigDecoder::new().decode_catalog(None).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn wrong_kind_is_schema_mismatch() {
        let err = ProviderConfigDecoder::new()
            .decode_value(&json!({
                "apiVersion": PROVIDER_CONFIG_API_VERSION,
                "kind": "InfrastructureConfig"
            }))
            .unwrap_err();

        match err {
            DecodeError::SchemaMismatch { api_version, kind } => {
                assert_eq!(api_version, PROVIDER_CONFIG_API_VERSION);
                assert_eq!(kind, "InfrastructureConfig");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn wrong_api_version_is_schema_mismatch() {
        let err = ProviderConfigDecoder::new()
            .decode_value(&json!({
                "apiVersion": "aws.provider.extensions.gardener.cloud/v1alpha1",
                "kind": PROVIDER_CONFIG_KIND
            }))
            .unwrap_err();

        assert!(matches!(err, DecodeError::SchemaMismatch { .. }));
        assert!(err.to_string().contains("aws.provider"));
    }

    #[test]
    fn missing_header_is_schema_mismatch() {
        let err = ProviderConfigDecoder::new()
            .decode_value(&json!({"machineImages": []}))
            .unwrap_err();

        assert!(matches!(
            err,
            DecodeError::SchemaMismatch { ref api_version, ref kind }
                if api_version.is_empty() && kind.is_empty()
        ));
    }

    #[test]
    fn non_object_is_malformed() {
        let err = ProviderConfigDecoder::new()
            .decode_value(&json!(["not", "an", "object"]))
            .unwrap_err();
        assert!(matches!(err, DecodeError::Malformed(_)));
        assert!(err.to_string().contains("found array"));

        let err =
            ProviderConfigDecoder::new().decode(b"{not json").unwrap_err();
        assert!(matches!(err, DecodeError::Malformed(_)));
    }

    #[test]
    fn wrong_field_type_is_malformed() {
        let err = ProviderConfigDecoder::new()
            .decode_value(&json!({
                "apiVersion": PROVIDER_CONFIG_API_VERSION,
                "kind": PROVIDER_CONFIG_KIND,
                "machineImages": {"name": "image-1"}
            }))
            .unwrap_err();

        assert!(matches!(err, DecodeError::Malformed(_)));
    }
}
