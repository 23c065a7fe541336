//! Decoded Kubernetes resource model
//!
//! Only the fields the relationship rules read are modelled. Everything else
//! in a manifest document is ignored during decoding.

use super::kind::ResourceKind;
use super::selector::{Selector, SelectorError};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;

/// Errors raised while turning one manifest document into a [`Resource`]
#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    #[error(transparent)]
    Structure(#[from] serde_yaml::Error),

    #[error(transparent)]
    Selector(#[from] SelectorError),
}

/// One decoded Kubernetes object
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    #[serde(default, deserialize_with = "nullable")]
    pub api_version: String,
    #[serde(default, deserialize_with = "nullable")]
    pub kind: String,
    #[serde(default, deserialize_with = "nullable")]
    pub metadata: Metadata,
    #[serde(default, deserialize_with = "nullable")]
    pub spec: ResourceSpec,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Metadata {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub namespace: String,
    #[serde(default, deserialize_with = "nullable")]
    pub labels: BTreeMap<String, String>,
}

/// Kind-specific spec fields, all empty when the kind does not carry them
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSpec {
    /// Normalised separately from the rest of the document, see
    /// [`Resource::from_document`]
    #[serde(skip)]
    pub selector: Selector,
    #[serde(default, deserialize_with = "nullable")]
    pub template: PodTemplate,
    #[serde(default, deserialize_with = "nullable")]
    pub volume_claim_templates: Vec<VolumeClaimTemplate>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PodTemplate {
    #[serde(default, deserialize_with = "nullable")]
    pub spec: PodSpec,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PodSpec {
    #[serde(default, deserialize_with = "nullable")]
    pub containers: Vec<Container>,
    #[serde(default, deserialize_with = "nullable")]
    pub volumes: Vec<Volume>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub env: Vec<EnvVar>,
    #[serde(default, deserialize_with = "nullable")]
    pub env_from: Vec<EnvFromSource>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvVar {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default)]
    pub value_from: Option<EnvVarSource>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvVarSource {
    #[serde(default)]
    pub config_map_key_ref: Option<KeyRef>,
    #[serde(default)]
    pub secret_key_ref: Option<KeyRef>,
}

/// Reference to a single key of a ConfigMap or Secret
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct KeyRef {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub key: String,
}

/// Bulk import of every key of a ConfigMap or Secret
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvFromSource {
    #[serde(default)]
    pub config_map_ref: Option<NameRef>,
    #[serde(default)]
    pub secret_ref: Option<NameRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NameRef {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default)]
    pub config_map: Option<NameRef>,
    #[serde(default)]
    pub secret: Option<SecretVolumeSource>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretVolumeSource {
    #[serde(default, deserialize_with = "nullable")]
    pub secret_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct VolumeClaimTemplate {
    #[serde(default, deserialize_with = "nullable")]
    pub metadata: Metadata,
}

/// Treat an explicit YAML null like an absent field
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn non_empty(name: &str) -> Option<&str> {
    (!name.is_empty()).then_some(name)
}

impl Resource {
    pub fn new(
        kind: impl Into<String>,
        name: impl Into<String>,
        namespace: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            metadata: Metadata {
                name: name.into(),
                namespace: namespace.into(),
                labels: BTreeMap::new(),
            },
            ..Default::default()
        }
    }

    /// Decode one manifest document from its source text.
    ///
    /// Structural errors keep the line and column of the offending node
    /// within `document`. The selector is normalised on its own so that a bad
    /// selector surfaces as [`ResourceError::Selector`] rather than as a
    /// structural failure.
    pub fn from_document(document: &str) -> Result<Self, ResourceError> {
        let mut resource: Resource = serde_yaml::from_str(document)?;
        resource.spec.selector = Selector::from_document(document)?;
        Ok(resource)
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn namespace(&self) -> &str {
        &self.metadata.namespace
    }

    pub fn labels(&self) -> &BTreeMap<String, String> {
        &self.metadata.labels
    }

    pub fn selector(&self) -> &Selector {
        &self.spec.selector
    }

    pub fn kind_of(&self) -> Option<ResourceKind> {
        ResourceKind::parse_optional(&self.kind)
    }

    /// Exact, case-sensitive kind check
    pub fn is(&self, kind: ResourceKind) -> bool {
        self.kind == kind.as_str()
    }

    pub fn containers(&self) -> &[Container] {
        &self.spec.template.spec.containers
    }

    pub fn volumes(&self) -> &[Volume] {
        &self.spec.template.spec.volumes
    }

    /// Names of the StatefulSet's volume claim templates
    pub fn claim_template_names(&self) -> impl Iterator<Item = &str> {
        self.spec
            .volume_claim_templates
            .iter()
            .map(|t| t.metadata.name.as_str())
    }

    pub fn with_labels<K, V>(mut self, labels: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.metadata.labels = labels
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    pub fn with_selector(mut self, selector: Selector) -> Self {
        self.spec.selector = selector;
        self
    }

    pub fn with_volume(mut self, volume: Volume) -> Self {
        self.spec.template.spec.volumes.push(volume);
        self
    }

    pub fn with_container(mut self, container: Container) -> Self {
        self.spec.template.spec.containers.push(container);
        self
    }

    pub fn with_claim_template(mut self, name: impl Into<String>) -> Self {
        self.spec.volume_claim_templates.push(VolumeClaimTemplate {
            metadata: Metadata {
                name: name.into(),
                ..Default::default()
            },
        });
        self
    }
}

impl Volume {
    pub fn from_config_map(name: impl Into<String>, config_map: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config_map: Some(NameRef {
                name: config_map.into(),
            }),
            secret: None,
        }
    }

    pub fn from_secret(name: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config_map: None,
            secret: Some(SecretVolumeSource {
                secret_name: secret.into(),
            }),
        }
    }

    pub fn config_map_name(&self) -> Option<&str> {
        self.config_map.as_ref().and_then(|c| non_empty(&c.name))
    }

    pub fn secret_name(&self) -> Option<&str> {
        self.secret.as_ref().and_then(|s| non_empty(&s.secret_name))
    }
}

impl Container {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_env(mut self, env: EnvVar) -> Self {
        self.env.push(env);
        self
    }

    pub fn with_env_from(mut self, env_from: EnvFromSource) -> Self {
        self.env_from.push(env_from);
        self
    }
}

impl EnvVar {
    pub fn from_config_map_key(
        name: impl Into<String>,
        config_map: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            value_from: Some(EnvVarSource {
                config_map_key_ref: Some(KeyRef {
                    name: config_map.into(),
                    key: key.into(),
                }),
                secret_key_ref: None,
            }),
        }
    }

    pub fn from_secret_key(
        name: impl Into<String>,
        secret: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            value_from: Some(EnvVarSource {
                config_map_key_ref: None,
                secret_key_ref: Some(KeyRef {
                    name: secret.into(),
                    key: key.into(),
                }),
            }),
        }
    }

    pub fn config_map_name(&self) -> Option<&str> {
        self.value_from
            .as_ref()
            .and_then(|v| v.config_map_key_ref.as_ref())
            .and_then(|r| non_empty(&r.name))
    }

    pub fn secret_name(&self) -> Option<&str> {
        self.value_from
            .as_ref()
            .and_then(|v| v.secret_key_ref.as_ref())
            .and_then(|r| non_empty(&r.name))
    }
}

impl EnvFromSource {
    pub fn from_config_map(config_map: impl Into<String>) -> Self {
        Self {
            config_map_ref: Some(NameRef {
                name: config_map.into(),
            }),
            secret_ref: None,
        }
    }

    pub fn from_secret(secret: impl Into<String>) -> Self {
        Self {
            config_map_ref: None,
            secret_ref: Some(NameRef {
                name: secret.into(),
            }),
        }
    }

    pub fn config_map_name(&self) -> Option<&str> {
        self.config_map_ref.as_ref().and_then(|r| non_empty(&r.name))
    }

    pub fn secret_name(&self) -> Option<&str> {
        self.secret_ref.as_ref().and_then(|r| non_empty(&r.name))
    }
}
