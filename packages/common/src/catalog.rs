use serde::{Deserialize, Serialize};

/// A cloud vendor option on the spin wheel.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Provider {
    #[schema(example = "aws")]
    pub id: String,
    #[schema(example = "AWS")]
    pub name: String,
    /// Wheel segment color as a `#RRGGBB` hex string.
    #[schema(example = "#FF9900")]
    pub color: String,
}

/// A candidate infrastructure task that can be assigned to a provider.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Deployment {
    #[schema(example = "basic-vm")]
    pub id: String,
    #[schema(example = "Basic VM")]
    pub name: String,
}

impl Provider {
    pub fn new(id: impl Into<String>, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: color.into(),
        }
    }

    /// Parse `color` into RGB components. Returns `None` for anything that is
    /// not a six-digit hex color.
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        let hex = self.color.strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some((channel(0)?, channel(2)?, channel(4)?))
    }
}

impl Deployment {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Providers shipped with the game. Also served when the store cannot be read.
const DEFAULT_PROVIDERS: &[(&str, &str, &str)] = &[
    ("aws", "AWS", "#FF9900"),
    ("gcp", "GCP", "#4285F4"),
    ("azure", "Azure", "#0078D4"),
    ("oracle", "Oracle", "#F80000"),
];

const DEFAULT_DEPLOYMENTS: &[(&str, &str)] = &[
    ("kubernetes-cluster", "Kubernetes Cluster"),
    ("basic-vm", "Basic VM"),
    ("static-website", "Static Website"),
    ("database", "Database"),
    ("storage-bucket", "Storage bucket"),
    ("message-queue", "Message Queue"),
    ("container-registry", "Container Registry"),
    ("argocd", "K8S: ArgoCD"),
    ("ingress-nginx", "K8S: Ingress Nginx"),
    ("eck-stack", "K8S: ECK Stack"),
    ("kube-prometheus-stack", "K8S: Kube Prometheus Stack"),
];

/// Sample attempts present in a fresh document:
/// (id, provider_id, deployment_id, is_done, created_at).
pub(crate) const DEFAULT_CHALLENGES: &[(&str, &str, &str, bool, &str)] = &[
    ("1", "aws", "basic-vm", false, "2024-01-01T00:00:00Z"),
    ("2", "gcp", "static-website", true, "2024-01-02T00:00:00Z"),
    ("3", "azure", "database", false, "2024-01-03T00:00:00Z"),
    ("4", "aws", "storage-bucket", true, "2024-01-03T00:00:00Z"),
];

pub fn default_providers() -> Vec<Provider> {
    DEFAULT_PROVIDERS
        .iter()
        .map(|&(id, name, color)| Provider::new(id, name, color))
        .collect()
}

pub fn default_deployments() -> Vec<Deployment> {
    DEFAULT_DEPLOYMENTS
        .iter()
        .map(|&(id, name)| Deployment::new(id, name))
        .collect()
}
