//! Platform-specific payloads carried by resources.
//!
//! The backend attaches a small origin-specific record to each resource
//! (`platformData` on the wire). Modelled as an internally tagged union so
//! the detail popup and the services table can match exhaustively instead
//! of digging through an untyped map.

use serde::{Deserialize, Serialize};

/// Platform payload bag: merged-origin bookkeeping plus typed detail.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlatformData {
    /// Origin platforms folded into this record by identity resolution.
    /// More than one entry marks the resource as merged.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<String>,
    /// Typed per-platform detail, tagged by `platform`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<PlatformDetail>,
}

/// Per-platform detail, tagged by origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "platform", rename_all = "lowercase")]
pub enum PlatformDetail {
    Proxmox(ProxmoxData),
    Agent(AgentData),
    Docker(DockerData),
    Pbs(PbsData),
    Pmg(PmgData),
    Kubernetes(KubernetesData),
}

impl PlatformDetail {
    /// Origin platform name as shown in badges.
    pub fn platform_name(&self) -> &'static str {
        match self {
            PlatformDetail::Proxmox(_) => "proxmox",
            PlatformDetail::Agent(_) => "agent",
            PlatformDetail::Docker(_) => "docker",
            PlatformDetail::Pbs(_) => "pbs",
            PlatformDetail::Pmg(_) => "pmg",
            PlatformDetail::Kubernetes(_) => "kubernetes",
        }
    }

    /// Software version reported by the origin, when known.
    pub fn version(&self) -> Option<&str> {
        match self {
            PlatformDetail::Proxmox(d) => d.pve_version.as_deref(),
            PlatformDetail::Agent(d) => d.agent_version.as_deref(),
            PlatformDetail::Docker(d) => d.engine_version.as_deref(),
            PlatformDetail::Pbs(d) => d.version.as_deref(),
            PlatformDetail::Pmg(d) => d.version.as_deref(),
            PlatformDetail::Kubernetes(d) => d.kubelet_version.as_deref(),
        }
    }
}

/// Proxmox VE node or guest detail.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProxmoxData {
    /// Guest VMID; absent for nodes.
    pub vmid: Option<u32>,
    /// Node a guest runs on.
    pub node: Option<String>,
    pub cluster_name: Option<String>,
    pub pve_version: Option<String>,
    /// HA manager state ("started", "ignored", ...).
    pub ha_state: Option<String>,
}

/// Standalone host monitored through the agent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AgentData {
    pub os_name: Option<String>,
    pub os_version: Option<String>,
    pub kernel_version: Option<String>,
    pub agent_version: Option<String>,
}

/// Docker host or container detail.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DockerData {
    /// Container image reference; absent for hosts.
    pub image: Option<String>,
    pub container_id: Option<String>,
    pub engine_version: Option<String>,
    pub compose_project: Option<String>,
}

/// Proxmox Backup Server summary.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PbsData {
    pub version: Option<String>,
    pub datastore_count: Option<u32>,
    pub backup_job_count: Option<u32>,
    /// Unix timestamp of the newest completed backup.
    pub last_backup_at: Option<i64>,
    /// "healthy" / "degraded" / "unreachable".
    pub connection_health: Option<String>,
}

/// Proxmox Mail Gateway summary.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PmgData {
    pub version: Option<String>,
    pub queue_active: Option<u32>,
    pub queue_deferred: Option<u32>,
    /// Spam caught in the last 24h.
    pub spam_in_24h: Option<u64>,
    /// Viruses caught in the last 24h.
    pub virus_in_24h: Option<u64>,
    pub connection_health: Option<String>,
}

/// Kubernetes cluster/node/pod detail.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KubernetesData {
    pub cluster_name: Option<String>,
    /// Pod namespace; absent for clusters and nodes.
    pub namespace: Option<String>,
    /// Node a pod is scheduled on.
    pub node_name: Option<String>,
    /// Pod phase ("Running", "Pending", ...).
    pub pod_phase: Option<String>,
    pub kubelet_version: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_is_tagged_by_platform() {
        let json = r#"{
            "sources": ["pbs"],
            "detail": {
                "platform": "pbs",
                "version": "3.2-1",
                "datastoreCount": 4,
                "backupJobCount": 12,
                "connectionHealth": "healthy"
            }
        }"#;

        let data: PlatformData = serde_json::from_str(json).unwrap();
        let Some(PlatformDetail::Pbs(pbs)) = &data.detail else {
            panic!("expected pbs detail, got {:?}", data.detail);
        };
        assert_eq!(pbs.datastore_count, Some(4));
        assert_eq!(pbs.backup_job_count, Some(12));
        assert_eq!(data.detail.as_ref().unwrap().version(), Some("3.2-1"));
        assert_eq!(data.detail.as_ref().unwrap().platform_name(), "pbs");
    }

    #[test]
    fn missing_detail_is_none() {
        let data: PlatformData = serde_json::from_str(r#"{"sources": ["agent"]}"#).unwrap();
        assert_eq!(data.detail, None);
        assert_eq!(data.sources, vec!["agent".to_string()]);
    }

    #[test]
    fn payload_fields_default_when_absent() {
        let json = r#"{"detail": {"platform": "pmg", "queueActive": 3}}"#;
        let data: PlatformData = serde_json::from_str(json).unwrap();
        let Some(PlatformDetail::Pmg(pmg)) = data.detail else {
            panic!("expected pmg detail");
        };
        assert_eq!(pmg.queue_active, Some(3));
        assert_eq!(pmg.queue_deferred, None);
        assert_eq!(pmg.spam_in_24h, None);
    }
}
