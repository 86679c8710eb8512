//! Built-in demo fleet.
//!
//! A deterministic in-process snapshot source: a couple of PVE clusters
//! with guests, a Docker host, a small Kubernetes cluster, agent hosts, a
//! TrueNAS box, and PBS/PMG services. Metrics drift with the tick counter
//! through fixed phase arithmetic, so every run looks alive but two runs
//! at the same tick are identical. `scale` controls the guest population;
//! push it past the virtualization threshold to exercise windowing.

use chrono::Utc;

use crate::model::{
    AgentData, CpuMetric, DiskIoMetric, DockerData, FleetSnapshot, KubernetesData, NetworkMetric,
    PbsData, PlatformData, PlatformDetail, PmgData, ProxmoxData, Resource, ResourceKind,
    UsageMetric,
};

use super::{FleetProvider, ProviderError};

const MIB: f64 = 1024.0 * 1024.0;
const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Guest index that carries a network spike, for the outlier column.
const SPIKE_GUEST: usize = 7;
/// Every n-th guest is powered off.
const STOPPED_EVERY: usize = 11;

/// Deterministic demo snapshot source.
pub struct DemoFleet {
    snapshot: FleetSnapshot,
    tick: u64,
    scale: usize,
}

impl DemoFleet {
    /// `scale` is the number of generated guests on top of the fixed
    /// infrastructure set.
    pub fn new(scale: usize) -> Self {
        DemoFleet {
            snapshot: build_snapshot(0, scale),
            tick: 0,
            scale,
        }
    }
}

impl FleetProvider for DemoFleet {
    fn current(&self) -> Option<&FleetSnapshot> {
        Some(&self.snapshot)
    }

    fn refresh(&mut self) -> Result<bool, ProviderError> {
        self.tick = self.tick.wrapping_add(1);
        self.snapshot = build_snapshot(self.tick, self.scale);
        Ok(true)
    }

    fn describe(&self) -> String {
        format!("demo fleet ({} resources)", self.snapshot.resources.len())
    }

    fn is_live(&self) -> bool {
        true
    }
}

fn build_snapshot(tick: u64, scale: usize) -> FleetSnapshot {
    let mut resources = Vec::with_capacity(scale + 20);

    for (i, name) in ["pve1", "pve2", "pve3"].iter().enumerate() {
        resources.push(pve_node("prod", name, i as u64, tick));
    }
    resources.push(pve_node("dev", "pve-dev1", 3, tick));

    for i in 0..scale {
        resources.push(guest(i, tick));
    }

    resources.push(docker_host(tick));
    for (i, image) in ["nginx:1.27", "postgres:16", "redis:7"].iter().enumerate() {
        resources.push(docker_container(image, i as u64, tick));
    }

    resources.push(k8s_cluster());
    for (i, name) in ["worker-1", "worker-2"].iter().enumerate() {
        resources.push(k8s_node(name, i as u64, tick));
    }
    for (i, name) in ["api-5d9f", "ingest-b21", "cache-77a"].iter().enumerate() {
        resources.push(k8s_pod(name, i as u64, tick));
    }

    resources.push(agent_host("metal1", 20, tick, false));
    resources.push(agent_host("metal2", 21, tick, true));
    resources.push(truenas(tick));
    resources.push(pbs_service(tick));
    resources.push(pmg_service(tick));

    FleetSnapshot {
        generated_at: Utc::now().timestamp(),
        source: "demo".to_string(),
        resources,
    }
}

/// Triangle wave in [-1, 1] seeded per resource; period 16 ticks.
fn wobble(tick: u64, seed: u64) -> f64 {
    let phase = (tick.wrapping_add(seed.wrapping_mul(7))) % 16;
    (phase as f64 - 8.0) / 8.0
}

fn base(id: String, name: &str, kind: ResourceKind) -> Resource {
    Resource {
        id,
        name: name.to_string(),
        display_name: None,
        kind,
        status: None,
        cluster_id: None,
        parent_id: None,
        platform_id: None,
        cpu: None,
        memory: None,
        disk: None,
        network: None,
        disk_io: None,
        temperature: None,
        uptime: None,
        platform_type: None,
        source_type: None,
        platform_data: None,
    }
}

fn usage(total: f64, frac: f64) -> UsageMetric {
    let frac = frac.clamp(0.02, 0.98);
    let used = total * frac;
    UsageMetric {
        total,
        used,
        free: total - used,
        usage: frac * 100.0,
    }
}

fn pve_node(cluster: &str, name: &str, seed: u64, tick: u64) -> Resource {
    let w = wobble(tick, seed);
    let mut r = base(format!("pve/{cluster}/node/{name}"), name, ResourceKind::Node);
    r.status = Some("online".to_string());
    r.cluster_id = Some(cluster.to_string());
    r.platform_id = Some(format!("pve-{cluster}"));
    r.cpu = Some(CpuMetric {
        current: (28.0 + 18.0 * w).clamp(0.5, 98.0),
    });
    r.memory = Some(usage(64.0 * GIB, 0.55 + 0.1 * w));
    r.disk = Some(usage(1024.0 * GIB, 0.4));
    r.network = Some(NetworkMetric {
        rx_bytes: Some(2.5 * MIB * (1.0 + 0.3 * w)),
        tx_bytes: Some(1.5 * MIB * (1.0 - 0.2 * w)),
    });
    r.disk_io = Some(DiskIoMetric {
        read_rate: Some(4.0 * MIB * (1.0 + 0.4 * w)),
        write_rate: Some(6.0 * MIB * (1.0 - 0.3 * w)),
    });
    r.temperature = Some(44.0 + 6.0 * w);
    r.uptime = Some(86400 * 40 + seed as i64 * 3600);
    r.platform_type = Some("proxmox".to_string());
    r.source_type = Some("api".to_string());
    r.platform_data = Some(PlatformData {
        sources: vec!["proxmox".to_string()],
        detail: Some(PlatformDetail::Proxmox(ProxmoxData {
            vmid: None,
            node: None,
            cluster_name: Some(cluster.to_string()),
            pve_version: Some("8.2.4".to_string()),
            ha_state: None,
        })),
    });
    r
}

fn guest(i: usize, tick: u64) -> Resource {
    let cluster = ["prod", "prod", "dev"][i % 3];
    let node = ["pve1", "pve2", "pve-dev1"][i % 3];
    let (kind, segment) = if i % 4 == 3 {
        (ResourceKind::Container, "lxc")
    } else {
        (ResourceKind::Vm, "qemu")
    };
    let vmid = 100 + i as u32;
    let name = if i == SPIKE_GUEST {
        "batch-worker".to_string()
    } else {
        format!("guest-{vmid}")
    };

    let mut r = base(format!("pve/{cluster}/{segment}/{vmid}"), &name, kind);
    r.cluster_id = Some(cluster.to_string());
    r.parent_id = Some(format!("pve/{cluster}/node/{node}"));
    r.platform_id = Some(format!("pve-{cluster}"));
    r.platform_type = Some("proxmox".to_string());
    r.source_type = Some("api".to_string());
    r.platform_data = Some(PlatformData {
        sources: vec!["proxmox".to_string()],
        detail: Some(PlatformDetail::Proxmox(ProxmoxData {
            vmid: Some(vmid),
            node: Some(node.to_string()),
            cluster_name: Some(cluster.to_string()),
            pve_version: None,
            ha_state: None,
        })),
    });

    if i % STOPPED_EVERY == STOPPED_EVERY - 1 {
        r.status = Some("stopped".to_string());
        return r;
    }

    let w = wobble(tick, i as u64);
    r.status = Some("running".to_string());
    r.cpu = Some(CpuMetric {
        current: (12.0 + 10.0 * ((i % 5) as f64) * (0.5 + 0.5 * w)).clamp(0.5, 98.0),
    });
    r.memory = Some(usage((2 + i % 4) as f64 * 4.0 * GIB, 0.45 + 0.12 * w));
    r.disk = Some(usage(64.0 * GIB, 0.3 + 0.05 * ((i % 7) as f64 / 7.0)));
    let net_base = if i == SPIKE_GUEST {
        // Deliberate outlier, far past any percentile of the rest.
        250.0 * MIB
    } else {
        0.3 * MIB * (1.0 + (i % 5) as f64)
    };
    r.network = Some(NetworkMetric {
        rx_bytes: Some(net_base * (1.0 + 0.25 * w)),
        tx_bytes: Some(net_base * 0.4 * (1.0 - 0.25 * w)),
    });
    r.disk_io = Some(DiskIoMetric {
        read_rate: Some(0.8 * MIB * (1.0 + 0.5 * w)),
        write_rate: Some(1.2 * MIB * (1.0 - 0.5 * w)),
    });
    r.uptime = Some(3600 * 24 * (2 + (i % 9) as i64));
    r
}

fn docker_host(tick: u64) -> Resource {
    let w = wobble(tick, 31);
    let mut r = base("docker/dock1".to_string(), "dock1", ResourceKind::DockerHost);
    r.status = Some("online".to_string());
    r.cpu = Some(CpuMetric {
        current: (22.0 + 12.0 * w).clamp(0.5, 98.0),
    });
    r.memory = Some(usage(32.0 * GIB, 0.6 + 0.08 * w));
    r.disk = Some(usage(512.0 * GIB, 0.55));
    r.network = Some(NetworkMetric {
        rx_bytes: Some(1.8 * MIB * (1.0 + 0.2 * w)),
        tx_bytes: Some(2.2 * MIB * (1.0 - 0.2 * w)),
    });
    r.uptime = Some(86400 * 12);
    r.platform_type = Some("docker".to_string());
    r.source_type = Some("agent".to_string());
    r.platform_data = Some(PlatformData {
        sources: vec!["docker".to_string()],
        detail: Some(PlatformDetail::Docker(DockerData {
            image: None,
            container_id: None,
            engine_version: Some("27.1.1".to_string()),
            compose_project: None,
        })),
    });
    r
}

fn docker_container(image: &str, seed: u64, tick: u64) -> Resource {
    let w = wobble(tick, 40 + seed);
    let name = image.split(':').next().unwrap_or(image);
    let mut r = base(
        format!("docker/dock1/{name}"),
        name,
        ResourceKind::DockerContainer,
    );
    r.status = Some("running".to_string());
    r.parent_id = Some("docker/dock1".to_string());
    r.cpu = Some(CpuMetric {
        current: (5.0 + 4.0 * seed as f64 + 3.0 * w).clamp(0.5, 98.0),
    });
    r.memory = Some(usage(2.0 * GIB, 0.3 + 0.1 * seed as f64));
    r.network = Some(NetworkMetric {
        rx_bytes: Some(0.2 * MIB * (1.0 + 0.3 * w)),
        tx_bytes: Some(0.1 * MIB),
    });
    r.uptime = Some(3600 * (30 + seed as i64));
    r.platform_type = Some("docker".to_string());
    r.source_type = Some("agent".to_string());
    r.platform_data = Some(PlatformData {
        sources: vec!["docker".to_string()],
        detail: Some(PlatformDetail::Docker(DockerData {
            image: Some(image.to_string()),
            container_id: Some(format!("{name}-c{seed}")),
            engine_version: None,
            compose_project: Some("edge".to_string()),
        })),
    });
    r
}

fn k8s_cluster() -> Resource {
    let mut r = base("k8s/k8s-prod".to_string(), "k8s-prod", ResourceKind::K8sCluster);
    r.status = Some("online".to_string());
    r.platform_type = Some("kubernetes".to_string());
    r.source_type = Some("api".to_string());
    r.platform_data = Some(PlatformData {
        sources: vec!["kubernetes".to_string()],
        detail: Some(PlatformDetail::Kubernetes(KubernetesData {
            cluster_name: Some("k8s-prod".to_string()),
            namespace: None,
            node_name: None,
            pod_phase: None,
            kubelet_version: Some("v1.30.3".to_string()),
        })),
    });
    r
}

fn k8s_node(name: &str, seed: u64, tick: u64) -> Resource {
    let w = wobble(tick, 50 + seed);
    let mut r = base(
        format!("k8s/k8s-prod/node/{name}"),
        name,
        ResourceKind::K8sNode,
    );
    r.status = Some("online".to_string());
    r.parent_id = Some("k8s/k8s-prod".to_string());
    r.cpu = Some(CpuMetric {
        current: (35.0 + 15.0 * w).clamp(0.5, 98.0),
    });
    r.memory = Some(usage(48.0 * GIB, 0.65 + 0.05 * w));
    r.network = Some(NetworkMetric {
        rx_bytes: Some(3.0 * MIB * (1.0 + 0.3 * w)),
        tx_bytes: Some(2.0 * MIB),
    });
    r.uptime = Some(86400 * 25);
    r.platform_type = Some("kubernetes".to_string());
    r.source_type = Some("api".to_string());
    r.platform_data = Some(PlatformData {
        sources: vec!["kubernetes".to_string()],
        detail: Some(PlatformDetail::Kubernetes(KubernetesData {
            cluster_name: Some("k8s-prod".to_string()),
            namespace: None,
            node_name: None,
            pod_phase: None,
            kubelet_version: Some("v1.30.3".to_string()),
        })),
    });
    r
}

fn k8s_pod(name: &str, seed: u64, tick: u64) -> Resource {
    let w = wobble(tick, 60 + seed);
    let mut r = base(format!("k8s/k8s-prod/pod/{name}"), name, ResourceKind::Pod);
    // One pod stays Pending so scheduling trouble is visible in the demo.
    let phase = if seed == 1 { "Pending" } else { "Running" };
    r.status = Some(phase.to_string());
    r.parent_id = Some("k8s/k8s-prod/node/worker-1".to_string());
    r.cpu = Some(CpuMetric {
        current: (8.0 + 5.0 * w).clamp(0.5, 98.0),
    });
    r.memory = Some(usage(1.0 * GIB, 0.5));
    r.platform_type = Some("kubernetes".to_string());
    r.source_type = Some("api".to_string());
    r.platform_data = Some(PlatformData {
        sources: vec!["kubernetes".to_string()],
        detail: Some(PlatformDetail::Kubernetes(KubernetesData {
            cluster_name: Some("k8s-prod".to_string()),
            namespace: Some("default".to_string()),
            node_name: Some("worker-1".to_string()),
            pod_phase: Some(phase.to_string()),
            kubelet_version: None,
        })),
    });
    r
}

fn agent_host(name: &str, seed: u64, tick: u64, merged: bool) -> Resource {
    let w = wobble(tick, seed);
    let mut r = base(format!("agent/{name}"), name, ResourceKind::Host);
    r.status = Some("online".to_string());
    r.cpu = Some(CpuMetric {
        current: (15.0 + 20.0 * w).clamp(0.5, 98.0),
    });
    r.memory = Some(usage(128.0 * GIB, 0.35 + 0.1 * w));
    r.disk = Some(usage(2048.0 * GIB, 0.5));
    r.network = Some(NetworkMetric {
        rx_bytes: Some(1.0 * MIB * (1.0 + 0.5 * w)),
        tx_bytes: Some(0.8 * MIB),
    });
    r.temperature = Some(38.0 + 4.0 * w);
    r.uptime = Some(86400 * 90);
    r.platform_type = Some("agent".to_string());
    r.source_type = Some("agent".to_string());
    let sources = if merged {
        vec!["agent".to_string(), "proxmox".to_string()]
    } else {
        vec!["agent".to_string()]
    };
    r.platform_data = Some(PlatformData {
        sources,
        detail: Some(PlatformDetail::Agent(AgentData {
            os_name: Some("Debian GNU/Linux".to_string()),
            os_version: Some("12".to_string()),
            kernel_version: Some("6.1.0-23-amd64".to_string()),
            agent_version: Some("0.9.3".to_string()),
        })),
    });
    r
}

fn truenas(tick: u64) -> Resource {
    let w = wobble(tick, 70);
    let mut r = base("truenas/nas1".to_string(), "nas1", ResourceKind::Truenas);
    r.status = Some("online".to_string());
    r.cpu = Some(CpuMetric {
        current: (10.0 + 5.0 * w).clamp(0.5, 98.0),
    });
    r.memory = Some(usage(64.0 * GIB, 0.8)); // ZFS ARC keeps it high
    r.disk = Some(usage(48.0 * 1024.0 * GIB, 0.62));
    r.disk_io = Some(DiskIoMetric {
        read_rate: Some(12.0 * MIB * (1.0 + 0.4 * w)),
        write_rate: Some(8.0 * MIB),
    });
    r.temperature = Some(35.0);
    r.uptime = Some(86400 * 200);
    r.platform_type = Some("truenas".to_string());
    r.source_type = Some("api".to_string());
    r
}

fn pbs_service(tick: u64) -> Resource {
    let mut r = base("pbs/backup1".to_string(), "backup1", ResourceKind::Pbs);
    r.status = Some("online".to_string());
    r.uptime = Some(86400 * 60);
    r.platform_type = Some("pbs".to_string());
    r.source_type = Some("api".to_string());
    r.platform_data = Some(PlatformData {
        sources: vec!["pbs".to_string()],
        detail: Some(PlatformDetail::Pbs(PbsData {
            version: Some("3.2-1".to_string()),
            datastore_count: Some(4),
            backup_job_count: Some(12),
            last_backup_at: Some(1755800000 + tick as i64 * 2),
            connection_health: Some("healthy".to_string()),
        })),
    });
    r
}

fn pmg_service(tick: u64) -> Resource {
    let mut r = base("pmg/mail1".to_string(), "mail1", ResourceKind::Pmg);
    r.status = Some("online".to_string());
    r.uptime = Some(86400 * 33);
    r.platform_type = Some("pmg".to_string());
    r.source_type = Some("api".to_string());
    r.platform_data = Some(PlatformData {
        sources: vec!["pmg".to_string()],
        detail: Some(PlatformDetail::Pmg(PmgData {
            version: Some("8.1-2".to_string()),
            queue_active: Some((tick % 7) as u32),
            queue_deferred: Some(1),
            spam_in_24h: Some(245),
            virus_in_24h: Some(3),
            connection_health: Some("healthy".to_string()),
        })),
    });
    r
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn same_tick_produces_identical_resources() {
        let a = build_snapshot(5, 30);
        let b = build_snapshot(5, 30);
        assert_eq!(a.resources, b.resources);
    }

    #[test]
    fn ids_are_unique() {
        let snap = build_snapshot(0, 120);
        let ids: HashSet<&str> = snap.resources.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids.len(), snap.resources.len());
    }

    #[test]
    fn fleet_contains_both_service_kinds() {
        let snap = build_snapshot(0, 10);
        assert!(snap.resources.iter().any(|r| r.kind == ResourceKind::Pbs));
        assert!(snap.resources.iter().any(|r| r.kind == ResourceKind::Pmg));
    }

    #[test]
    fn spike_guest_dwarfs_the_rest() {
        let snap = build_snapshot(3, 40);
        let spike = snap
            .resources
            .iter()
            .find(|r| r.name == "batch-worker")
            .unwrap();
        assert!(spike.network_rate() > 100.0 * MIB);

        let calm_max = snap
            .resources
            .iter()
            .filter(|r| r.name != "batch-worker" && r.kind == ResourceKind::Vm)
            .map(|r| r.network_rate())
            .fold(0.0, f64::max);
        assert!(calm_max < 10.0 * MIB);
    }

    #[test]
    fn some_guests_are_stopped() {
        let snap = build_snapshot(0, 40);
        let stopped = snap.resources.iter().filter(|r| !r.is_online()).count();
        assert!(stopped >= 3); // every 11th guest of 40
    }

    #[test]
    fn scale_grows_the_guest_population() {
        let small = build_snapshot(0, 10);
        let large = build_snapshot(0, 600);
        assert_eq!(large.resources.len() - small.resources.len(), 590);
        assert!(large.resources.len() > 600);
    }

    #[test]
    fn refresh_advances_the_drift() {
        let mut fleet = DemoFleet::new(20);
        let before = fleet.current().unwrap().resources.clone();
        assert!(fleet.refresh().unwrap());
        let after = &fleet.current().unwrap().resources;
        assert_eq!(before.len(), after.len());
        assert_ne!(&before, after); // wobble moved
    }
}
