//! Resource selection and aggregation.
//!
//! Pure functions over a snapshot's resource list: the host/service split,
//! column sorting with deterministic tie-breaks, and cluster grouping.
//! Nothing here mutates a [`Resource`]; callers re-run these on every input
//! change and render the result.
//!
//! Sorting contract:
//! - the default order is online resources first, then case-insensitive
//!   display name, and ignores direction;
//! - every other key extracts a per-resource value (numbers for metric
//!   columns, strings for name/source) and compares null-aware: resources
//!   without a value sort last in both directions;
//! - any tie falls through to the default order, so the full comparator
//!   never reports equality for distinct records unless names collide too.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::analysis::{IoScale, build_io_distribution};
use crate::model::Resource;

/// Sortable column of the resource table. `Default` is the unsorted state:
/// online resources first, then name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Default,
    Name,
    Uptime,
    Cpu,
    Memory,
    Disk,
    Network,
    DiskIo,
    Source,
    Temp,
}

impl SortKey {
    /// Column cycle order for the sort hotkey.
    const CYCLE: [SortKey; 10] = [
        SortKey::Default,
        SortKey::Name,
        SortKey::Uptime,
        SortKey::Cpu,
        SortKey::Memory,
        SortKey::Disk,
        SortKey::Network,
        SortKey::DiskIo,
        SortKey::Source,
        SortKey::Temp,
    ];

    /// Next column in the cycle.
    pub fn next(self) -> SortKey {
        let at = Self::CYCLE.iter().position(|k| *k == self).unwrap_or(0);
        Self::CYCLE[(at + 1) % Self::CYCLE.len()]
    }

    /// Direction a column starts in when first selected. Text columns read
    /// naturally ascending; metric columns show the biggest consumers first.
    pub fn initial_direction(self) -> SortDirection {
        match self {
            SortKey::Default | SortKey::Name | SortKey::Source => SortDirection::Ascending,
            _ => SortDirection::Descending,
        }
    }

    /// Label for the status footer.
    pub fn label(self) -> &'static str {
        match self {
            SortKey::Default => "default",
            SortKey::Name => "name",
            SortKey::Uptime => "uptime",
            SortKey::Cpu => "cpu",
            SortKey::Memory => "mem",
            SortKey::Disk => "disk",
            SortKey::Network => "net",
            SortKey::DiskIo => "io",
            SortKey::Source => "src",
            SortKey::Temp => "temp",
        }
    }
}

/// Sort direction for non-default keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> SortDirection {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Footer glyph.
    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }

    fn apply(self, ord: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    }
}

/// Grouping mode for the host table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupMode {
    /// One anonymous group, input order.
    Flat,
    /// Bucket by cluster; named clusters alphabetical, standalone last.
    Grouped,
}

impl GroupMode {
    pub fn toggled(self) -> GroupMode {
        match self {
            GroupMode::Flat => GroupMode::Grouped,
            GroupMode::Grouped => GroupMode::Flat,
        }
    }
}

/// One cluster bucket produced by [`group_resources`].
#[derive(Debug)]
pub struct ResourceGroup<'a> {
    /// Cluster label; empty marks the standalone bucket.
    pub cluster: String,
    /// Members in the order they arrived.
    pub resources: Vec<&'a Resource>,
}

// ---------------------------------------------------------------------------
// Split
// ---------------------------------------------------------------------------

/// Partitions resources into hosts and standalone services (PBS/PMG).
/// Input order is preserved within each bucket; no resource lands in both.
pub fn split_hosts_services(resources: &[Resource]) -> (Vec<&Resource>, Vec<&Resource>) {
    let mut hosts = Vec::new();
    let mut services = Vec::new();
    for r in resources {
        if r.kind.is_service() {
            services.push(r);
        } else {
            hosts.push(r);
        }
    }
    (hosts, services)
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

/// Default comparator: online before offline, then case-insensitive name.
/// Direction never applies to this ordering.
pub fn default_compare(a: &Resource, b: &Resource) -> Ordering {
    match (a.is_online(), b.is_online()) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => compare_ci(a.title(), b.title()),
    }
}

/// Sorts in place by `key`/`direction`. Stable, deterministic, idempotent:
/// equal keys keep falling through to [`default_compare`].
pub fn sort_resources(rows: &mut [&Resource], key: SortKey, direction: SortDirection) {
    if key == SortKey::Default {
        rows.sort_by(|a, b| default_compare(a, b));
        return;
    }
    rows.sort_by(|a, b| match compare_by_key(a, b, key, direction) {
        Some(ord) => ord,
        None => default_compare(a, b),
    });
}

/// Advances the per-column toggle cycle. A column not currently active
/// starts in its initial direction; a second toggle flips it; a third
/// returns to the default order.
pub fn toggle_sort(current: (SortKey, SortDirection), clicked: SortKey) -> (SortKey, SortDirection) {
    if clicked == SortKey::Default {
        return (SortKey::Default, SortDirection::Ascending);
    }
    let (key, direction) = current;
    if key != clicked {
        return (clicked, clicked.initial_direction());
    }
    if direction == clicked.initial_direction() {
        (clicked, direction.flipped())
    } else {
        (SortKey::Default, SortDirection::Ascending)
    }
}

/// Per-resource sort value. `Missing` covers absent metric groups and
/// non-finite numbers; both sort last regardless of direction.
enum SortValue {
    Number(f64),
    Text(String),
    Missing,
}

fn sort_value(r: &Resource, key: SortKey) -> SortValue {
    let number = |v: Option<f64>| match v {
        Some(n) if n.is_finite() => SortValue::Number(n),
        _ => SortValue::Missing,
    };
    match key {
        SortKey::Default => SortValue::Missing,
        SortKey::Name => SortValue::Text(r.title().to_lowercase()),
        SortKey::Source => SortValue::Text(r.source_key().to_lowercase()),
        SortKey::Uptime => number(r.uptime.map(|u| u as f64)),
        SortKey::Cpu => number(r.cpu.map(|c| c.current)),
        SortKey::Memory => number(r.memory.map(|m| m.percent())),
        SortKey::Disk => number(r.disk.map(|d| d.percent())),
        SortKey::Network => number(r.network.map(|n| n.total())),
        SortKey::DiskIo => number(r.disk_io.map(|d| d.total())),
        SortKey::Temp => number(r.temperature),
    }
}

/// Null-aware comparison for one key. Returns `None` on a tie so the caller
/// falls through to the default comparator.
fn compare_by_key(
    a: &Resource,
    b: &Resource,
    key: SortKey,
    direction: SortDirection,
) -> Option<Ordering> {
    match (sort_value(a, key), sort_value(b, key)) {
        (SortValue::Missing, SortValue::Missing) => None,
        (SortValue::Missing, _) => Some(Ordering::Greater),
        (_, SortValue::Missing) => Some(Ordering::Less),
        (SortValue::Number(x), SortValue::Number(y)) => {
            match x.partial_cmp(&y).unwrap_or(Ordering::Equal) {
                Ordering::Equal => None,
                ord => Some(direction.apply(ord)),
            }
        }
        (SortValue::Text(x), SortValue::Text(y)) => match x.cmp(&y) {
            Ordering::Equal => None,
            ord => Some(direction.apply(ord)),
        },
        // A key never yields mixed value types; treat as a tie if it ever did.
        _ => None,
    }
}

fn compare_ci(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

// ---------------------------------------------------------------------------
// Grouping
// ---------------------------------------------------------------------------

/// Buckets rows by cluster membership.
///
/// Flat mode returns one group with an empty label holding all rows in the
/// given order. Grouped mode buckets by `cluster_id` (missing = standalone),
/// orders named clusters alphabetically (case-insensitive) and appends the
/// standalone bucket last. Concatenating the groups always yields a
/// permutation of the input.
pub fn group_resources<'a>(rows: &[&'a Resource], mode: GroupMode) -> Vec<ResourceGroup<'a>> {
    if mode == GroupMode::Flat {
        return vec![ResourceGroup {
            cluster: String::new(),
            resources: rows.to_vec(),
        }];
    }

    let mut groups: Vec<ResourceGroup<'a>> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for &r in rows {
        let label = r.cluster_id.clone().unwrap_or_default();
        let at = *index.entry(label.clone()).or_insert_with(|| {
            groups.push(ResourceGroup {
                cluster: label,
                resources: Vec::new(),
            });
            groups.len() - 1
        });
        groups[at].resources.push(r);
    }

    groups.sort_by(|a, b| match (a.cluster.is_empty(), b.cluster.is_empty()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => compare_ci(&a.cluster, &b.cluster),
    });
    groups
}

// ---------------------------------------------------------------------------
// I/O scale
// ---------------------------------------------------------------------------

/// Builds the shared network and disk I/O distributions over the host
/// subset. Services are excluded; their throughput would skew the scale the
/// emphasis tiers are judged against.
pub fn compute_io_scale(hosts: &[&Resource]) -> IoScale {
    let network: Vec<f64> = hosts.iter().map(|r| r.network_rate()).collect();
    let disk_io: Vec<f64> = hosts.iter().map(|r| r.disk_io_rate()).collect();
    IoScale {
        network: build_io_distribution(&network),
        disk_io: build_io_distribution(&disk_io),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CpuMetric, NetworkMetric, ResourceKind, UsageMetric};

    fn resource(id: &str, kind: ResourceKind) -> Resource {
        Resource {
            id: id.to_string(),
            name: id.to_string(),
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

    fn host(id: &str, status: &str, net_rx: f64) -> Resource {
        let mut r = resource(id, ResourceKind::Host);
        r.status = Some(status.to_string());
        r.network = Some(NetworkMetric {
            rx_bytes: Some(net_rx),
            tx_bytes: Some(0.0),
        });
        r
    }

    fn with_cpu(id: &str, pct: f64) -> Resource {
        let mut r = resource(id, ResourceKind::Vm);
        r.cpu = Some(CpuMetric { current: pct });
        r
    }

    fn ids(rows: &[&Resource]) -> Vec<String> {
        rows.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn split_sends_pbs_pmg_to_services() {
        let list = vec![
            resource("n1", ResourceKind::Node),
            resource("backup", ResourceKind::Pbs),
            resource("vm1", ResourceKind::Vm),
            resource("mail", ResourceKind::Pmg),
            resource("nas", ResourceKind::Truenas),
        ];
        let (hosts, services) = split_hosts_services(&list);
        assert_eq!(ids(&hosts), vec!["n1", "vm1", "nas"]);
        assert_eq!(ids(&services), vec!["backup", "mail"]);
    }

    #[test]
    fn default_sort_puts_online_first_then_name() {
        // Higher I/O on the offline host must not beat online-first.
        let a = host("a", "running", 100.0);
        let b = host("b", "offline", 5000.0);
        let mut rows = vec![&b, &a];

        sort_resources(&mut rows, SortKey::Default, SortDirection::Ascending);
        assert_eq!(ids(&rows), vec!["a", "b"]);

        // Direction does not apply to the default order.
        sort_resources(&mut rows, SortKey::Default, SortDirection::Descending);
        assert_eq!(ids(&rows), vec!["a", "b"]);
    }

    #[test]
    fn network_descending_overrides_online_first() {
        let a = host("a", "running", 100.0);
        let b = host("b", "offline", 5000.0);
        let mut rows = vec![&a, &b];
        sort_resources(&mut rows, SortKey::Network, SortDirection::Descending);
        assert_eq!(ids(&rows), vec!["b", "a"]);
    }

    #[test]
    fn sorting_is_idempotent() {
        let rows_src = vec![
            with_cpu("c", 80.0),
            with_cpu("a", 10.0),
            with_cpu("b", 80.0),
            resource("d", ResourceKind::Vm), // no cpu at all
        ];
        let mut rows: Vec<&Resource> = rows_src.iter().collect();
        sort_resources(&mut rows, SortKey::Cpu, SortDirection::Descending);
        let first = ids(&rows);
        sort_resources(&mut rows, SortKey::Cpu, SortDirection::Descending);
        assert_eq!(ids(&rows), first);
    }

    #[test]
    fn missing_values_sort_last_in_both_directions() {
        let with = with_cpu("with", 5.0);
        let without = resource("without", ResourceKind::Vm);

        let mut rows = vec![&without, &with];
        sort_resources(&mut rows, SortKey::Cpu, SortDirection::Ascending);
        assert_eq!(ids(&rows), vec!["with", "without"]);

        let mut rows = vec![&without, &with];
        sort_resources(&mut rows, SortKey::Cpu, SortDirection::Descending);
        assert_eq!(ids(&rows), vec!["with", "without"]);
    }

    #[test]
    fn nan_counts_as_missing() {
        let broken = with_cpu("broken", f64::NAN);
        let fine = with_cpu("fine", 1.0);
        let mut rows = vec![&broken, &fine];
        sort_resources(&mut rows, SortKey::Cpu, SortDirection::Descending);
        assert_eq!(ids(&rows), vec!["fine", "broken"]);
    }

    #[test]
    fn equal_keys_fall_back_to_default_order() {
        let mut on = with_cpu("zeta", 50.0);
        on.status = Some("running".to_string());
        let mut off = with_cpu("alpha", 50.0);
        off.status = Some("stopped".to_string());
        let mut on2 = with_cpu("Alpha2", 50.0);
        on2.status = Some("running".to_string());

        let mut rows = vec![&off, &on, &on2];
        sort_resources(&mut rows, SortKey::Cpu, SortDirection::Descending);
        // All cpu-equal: online first (Alpha2, zeta case-insensitive), stopped last.
        assert_eq!(ids(&rows), vec!["Alpha2", "zeta", "alpha"]);
    }

    #[test]
    fn memory_sorts_by_used_over_total() {
        let mut small = resource("small", ResourceKind::Vm);
        small.memory = Some(UsageMetric {
            total: 1000.0,
            used: 250.0,
            free: 750.0,
            usage: 0.0,
        });
        let mut full = resource("full", ResourceKind::Vm);
        full.memory = Some(UsageMetric {
            total: 1000.0,
            used: 900.0,
            free: 100.0,
            usage: 0.0,
        });
        // Zero capacity counts as 0%, not as missing.
        let mut unknown = resource("unknown", ResourceKind::Vm);
        unknown.memory = Some(UsageMetric {
            total: 0.0,
            used: 5000.0,
            free: 0.0,
            usage: 90.0,
        });

        let mut rows = vec![&small, &unknown, &full];
        sort_resources(&mut rows, SortKey::Memory, SortDirection::Descending);
        assert_eq!(ids(&rows), vec!["full", "small", "unknown"]);
    }

    #[test]
    fn source_key_sorts_ascending_as_text() {
        let mut agent = resource("h1", ResourceKind::Host);
        agent.platform_type = Some("agent".to_string());
        agent.source_type = Some("agent".to_string());
        let mut pve = resource("h2", ResourceKind::Node);
        pve.platform_type = Some("proxmox".to_string());
        pve.source_type = Some("api".to_string());

        let mut rows = vec![&pve, &agent];
        sort_resources(&mut rows, SortKey::Source, SortDirection::Ascending);
        assert_eq!(ids(&rows), vec!["h1", "h2"]);
    }

    #[test]
    fn toggle_cycle_for_metric_columns_starts_descending() {
        let start = (SortKey::Default, SortDirection::Ascending);
        let first = toggle_sort(start, SortKey::Cpu);
        assert_eq!(first, (SortKey::Cpu, SortDirection::Descending));
        let second = toggle_sort(first, SortKey::Cpu);
        assert_eq!(second, (SortKey::Cpu, SortDirection::Ascending));
        let third = toggle_sort(second, SortKey::Cpu);
        assert_eq!(third, (SortKey::Default, SortDirection::Ascending));
    }

    #[test]
    fn toggle_cycle_for_name_starts_ascending() {
        let start = (SortKey::Default, SortDirection::Ascending);
        let first = toggle_sort(start, SortKey::Name);
        assert_eq!(first, (SortKey::Name, SortDirection::Ascending));
        let second = toggle_sort(first, SortKey::Name);
        assert_eq!(second, (SortKey::Name, SortDirection::Descending));
        let third = toggle_sort(second, SortKey::Name);
        assert_eq!(third, (SortKey::Default, SortDirection::Ascending));
    }

    #[test]
    fn toggling_a_different_column_resets_to_its_initial_direction() {
        let current = (SortKey::Cpu, SortDirection::Ascending);
        assert_eq!(
            toggle_sort(current, SortKey::Source),
            (SortKey::Source, SortDirection::Ascending)
        );
        assert_eq!(
            toggle_sort(current, SortKey::Network),
            (SortKey::Network, SortDirection::Descending)
        );
    }

    #[test]
    fn flat_grouping_is_one_anonymous_group() {
        let a = resource("a", ResourceKind::Vm);
        let b = resource("b", ResourceKind::Vm);
        let rows: Vec<&Resource> = vec![&a, &b];
        let groups = group_resources(&rows, GroupMode::Flat);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].cluster, "");
        assert_eq!(ids(&groups[0].resources), vec!["a", "b"]);
    }

    #[test]
    fn grouped_mode_sorts_named_clusters_and_appends_standalone() {
        let mut r1 = resource("r1", ResourceKind::Node);
        r1.cluster_id = Some("prod".to_string());
        let r2 = resource("r2", ResourceKind::Host); // standalone
        let mut r3 = resource("r3", ResourceKind::Node);
        r3.cluster_id = Some("Dev".to_string());
        let mut r4 = resource("r4", ResourceKind::Vm);
        r4.cluster_id = Some("prod".to_string());

        let rows: Vec<&Resource> = vec![&r1, &r2, &r3, &r4];
        let groups = group_resources(&rows, GroupMode::Grouped);

        let labels: Vec<&str> = groups.iter().map(|g| g.cluster.as_str()).collect();
        assert_eq!(labels, vec!["Dev", "prod", ""]); // case-insensitive order, standalone last
        assert_eq!(ids(&groups[1].resources), vec!["r1", "r4"]); // input order kept

        // Concatenation is a permutation of the input.
        let mut all: Vec<String> = groups
            .iter()
            .flat_map(|g| g.resources.iter().map(|r| r.id.clone()))
            .collect();
        assert_eq!(all.len(), rows.len());
        all.sort();
        assert_eq!(all, vec!["r1", "r2", "r3", "r4"]);
    }

    #[test]
    fn io_scale_covers_hosts_only_by_construction() {
        let a = host("a", "running", 100.0);
        let b = host("b", "running", 300.0);
        let rows: Vec<&Resource> = vec![&a, &b];
        let scale = compute_io_scale(&rows);
        assert_eq!(scale.network.count, 2);
        assert_eq!(scale.network.max, 300.0);
        // Hosts without a disk_io group still contribute a zero sample.
        assert_eq!(scale.disk_io.count, 2);
        assert_eq!(scale.disk_io.max, 0.0);
    }
}
