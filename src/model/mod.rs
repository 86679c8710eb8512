//! Normalized resource records and the snapshot exchange format.
//!
//! A [`FleetSnapshot`] is the unit of input for the whole viewer: a flat list
//! of [`Resource`] records produced by a backend collector (Proxmox, agents,
//! Docker, Kubernetes, PBS/PMG) and already normalized to one shape. The
//! viewer never mutates resources; every table view is re-derived from the
//! current snapshot.
//!
//! Wire format is JSON with camelCase field names, matching the backend
//! export (`infratop --snapshot fleet.json`).

mod platform;

pub use platform::{
    AgentData, DockerData, KubernetesData, PbsData, PlatformData, PlatformDetail, PmgData,
    ProxmoxData,
};

use serde::{Deserialize, Serialize};

/// Kind of monitored entity.
///
/// Kebab-case on the wire (`docker-host`, `k8s-cluster`, ...). Unknown kinds
/// deserialize as [`ResourceKind::Other`] so a newer backend export does not
/// break an older viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    /// Agent-monitored standalone host.
    Host,
    /// Virtualization cluster node (PVE).
    Node,
    /// Virtual machine.
    Vm,
    /// System container (LXC).
    Container,
    /// OCI application container on a PVE node.
    OciContainer,
    /// Docker engine host.
    DockerHost,
    /// Docker container.
    DockerContainer,
    /// Kubernetes cluster.
    K8sCluster,
    /// Kubernetes node.
    K8sNode,
    /// Kubernetes pod.
    Pod,
    /// Proxmox Backup Server instance.
    Pbs,
    /// Proxmox Mail Gateway instance.
    Pmg,
    /// TrueNAS storage appliance.
    Truenas,
    /// Unrecognized kind from a newer export.
    #[serde(other)]
    Other,
}

impl ResourceKind {
    /// Standalone infrastructure services get their own tab instead of the
    /// host table.
    pub fn is_service(self) -> bool {
        matches!(self, ResourceKind::Pbs | ResourceKind::Pmg)
    }

    /// Short label for the TYPE column.
    pub fn label(self) -> &'static str {
        match self {
            ResourceKind::Host => "host",
            ResourceKind::Node => "node",
            ResourceKind::Vm => "VM",
            ResourceKind::Container => "CT",
            ResourceKind::OciContainer => "OCI",
            ResourceKind::DockerHost => "docker",
            ResourceKind::DockerContainer => "ctr",
            ResourceKind::K8sCluster => "k8s",
            ResourceKind::K8sNode => "k8s-node",
            ResourceKind::Pod => "pod",
            ResourceKind::Pbs => "PBS",
            ResourceKind::Pmg => "PMG",
            ResourceKind::Truenas => "truenas",
            ResourceKind::Other => "other",
        }
    }
}

/// CPU utilization.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CpuMetric {
    /// Current utilization in percent of total capacity (0-100).
    pub current: f64,
}

/// Capacity-style metric (memory, disk) in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UsageMetric {
    /// Total capacity in bytes.
    pub total: f64,
    /// Bytes in use.
    pub used: f64,
    /// Bytes free.
    pub free: f64,
    /// Backend-reported usage percent; the viewer recomputes from
    /// `used`/`total` and only falls back to this for display.
    pub usage: f64,
}

impl UsageMetric {
    /// Usage percent derived from `used/total`; zero when capacity is
    /// unknown or zero.
    pub fn percent(&self) -> f64 {
        if self.total > 0.0 {
            self.used / self.total * 100.0
        } else {
            0.0
        }
    }
}

/// Network throughput. Instantaneous byte rates (bytes/sec), despite the
/// counter-sounding field names the backend export uses.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NetworkMetric {
    /// Receive rate, bytes/sec.
    pub rx_bytes: Option<f64>,
    /// Transmit rate, bytes/sec.
    pub tx_bytes: Option<f64>,
}

impl NetworkMetric {
    /// Combined rx+tx rate; absent directions count as zero.
    pub fn total(&self) -> f64 {
        self.rx_bytes.unwrap_or(0.0) + self.tx_bytes.unwrap_or(0.0)
    }
}

/// Disk I/O throughput in bytes/sec.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DiskIoMetric {
    /// Read rate, bytes/sec.
    pub read_rate: Option<f64>,
    /// Write rate, bytes/sec.
    pub write_rate: Option<f64>,
}

impl DiskIoMetric {
    /// Combined read+write rate; absent directions count as zero.
    pub fn total(&self) -> f64 {
        self.read_rate.unwrap_or(0.0) + self.write_rate.unwrap_or(0.0)
    }
}

/// One monitored entity in its normalized form.
///
/// `id` is unique within a snapshot. Every metric group is optional: a PBS
/// service has no guest CPU, a freshly discovered VM may not have reported
/// I/O yet. Consumers treat missing groups as "no data", not zero, except
/// where a contract says otherwise (I/O emphasis totals).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    /// Stable identity, e.g. `pve-cluster/prod/qemu/104`.
    pub id: String,
    /// Machine name from the origin platform.
    pub name: String,
    /// Operator-facing name override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Entity kind; decides host vs. service placement.
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    /// Free-form status string ("running", "offline", "stopped", ...).
    /// Missing status counts as online.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Cluster membership for grouping; missing means standalone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_id: Option<String>,
    /// Containing resource (VM on a node, container on a Docker host).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Origin platform instance identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu: Option<CpuMetric>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<UsageMetric>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk: Option<UsageMetric>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<NetworkMetric>,
    #[serde(rename = "diskIO", default, skip_serializing_if = "Option::is_none")]
    pub disk_io: Option<DiskIoMetric>,
    /// Degrees Celsius.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Seconds since boot/start.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uptime: Option<i64>,
    /// Origin platform class ("proxmox", "docker", "kubernetes", "agent").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_type: Option<String>,
    /// Collection mechanism ("api", "agent").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_type: Option<String>,
    /// Typed platform-specific payload plus merged-origin bookkeeping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_data: Option<PlatformData>,
}

impl Resource {
    /// Operator-facing name: the display override when set, else `name`.
    pub fn title(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }

    /// A resource is online unless its status says "offline" or "stopped"
    /// (case-insensitive). Missing status counts as online.
    pub fn is_online(&self) -> bool {
        match self.status.as_deref() {
            None => true,
            Some(s) => !s.eq_ignore_ascii_case("offline") && !s.eq_ignore_ascii_case("stopped"),
        }
    }

    /// `"{platformType}-{sourceType}"` with missing parts rendered empty.
    /// Used for the SRC column and the `source` sort key.
    pub fn source_key(&self) -> String {
        format!(
            "{}-{}",
            self.platform_type.as_deref().unwrap_or(""),
            self.source_type.as_deref().unwrap_or("")
        )
    }

    /// More than one origin platform resolved to this identity.
    pub fn is_merged(&self) -> bool {
        self.platform_data
            .as_ref()
            .is_some_and(|d| d.sources.len() > 1)
    }

    /// Combined network rate for emphasis statistics; an absent group is
    /// zero here, unlike sorting where it is a missing value.
    pub fn network_rate(&self) -> f64 {
        self.network.map(|n| n.total()).unwrap_or(0.0)
    }

    /// Combined disk I/O rate for emphasis statistics; absent group is zero.
    pub fn disk_io_rate(&self) -> f64 {
        self.disk_io.map(|d| d.total()).unwrap_or(0.0)
    }

    /// Case-insensitive substring match over the fields an operator would
    /// search by. An empty filter matches everything.
    pub fn matches_filter(&self, filter: &str) -> bool {
        if filter.is_empty() {
            return true;
        }
        let needle = filter.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self
                .display_name
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&needle))
            || self.id.to_lowercase().contains(&needle)
            || self.kind.label().to_lowercase().contains(&needle)
            || self
                .cluster_id
                .as_deref()
                .is_some_and(|c| c.to_lowercase().contains(&needle))
            || self
                .status
                .as_deref()
                .is_some_and(|s| s.to_lowercase().contains(&needle))
    }
}

/// Point-in-time capture of the whole monitored fleet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetSnapshot {
    /// Unix timestamp (seconds) when the backend generated this export.
    pub generated_at: i64,
    /// Human description of the producer ("pulse-backend 4.2", "demo").
    #[serde(default)]
    pub source: String,
    /// All monitored resources, order as exported.
    pub resources: Vec<Resource>,
}

impl FleetSnapshot {
    /// Snapshot age relative to `now` (unix seconds), floored at zero.
    pub fn age_secs(&self, now: i64) -> i64 {
        (now - self.generated_at).max(0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
