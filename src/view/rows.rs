//! Logical row list and table builders.
//!
//! [`build_row_items`] turns grouped resources into the flat renderable
//! list the windowing engine counts: group header pseudo-rows followed by
//! their members. The table builders then materialize styled cells for the
//! mounted window only, which is where the per-render cost lives.

use crate::aggregate::{GroupMode, ResourceGroup, SortDirection, SortKey};
use crate::analysis::{EmphasisTier, IoDistribution, IoScale, classify_io};
use crate::fmt::{FmtStyle, format_age, format_bytes_rate, format_percent, format_temp};
use crate::model::{PlatformDetail, Resource};
use crate::view::common::{RowStyleClass, TableViewModel, ViewCell, ViewRow};

/// Marker appended to an I/O cell the outlier detector flagged.
const OUTLIER_MARK: &str = "*";
/// Marker appended to names of merged identities.
const MERGED_MARK: &str = "⧉";

/// One entry of the renderable row list.
#[derive(Debug, Clone, Copy)]
pub enum RowItem<'a> {
    /// Cluster header pseudo-row; the empty label is the standalone bucket.
    Header(&'a str),
    Resource(&'a Resource),
}

impl<'a> RowItem<'a> {
    pub fn is_header(&self) -> bool {
        matches!(self, RowItem::Header(_))
    }

    pub fn resource(&self) -> Option<&'a Resource> {
        match self {
            RowItem::Header(_) => None,
            RowItem::Resource(r) => Some(r),
        }
    }
}

/// Flattens groups into the logical row list. Grouped mode injects one
/// header per group; flat mode yields the resources alone.
pub fn build_row_items<'a>(
    groups: &'a [ResourceGroup<'a>],
    mode: GroupMode,
) -> Vec<RowItem<'a>> {
    let mut items = Vec::new();
    for group in groups {
        if mode == GroupMode::Grouped {
            items.push(RowItem::Header(group.cluster.as_str()));
        }
        for &r in &group.resources {
            items.push(RowItem::Resource(r));
        }
    }
    items
}

/// Host table column order; sort keys map onto these indices.
const HOST_HEADERS: [&str; 11] = [
    "NAME", "TYPE", "STATUS", "CPU", "MEM", "DISK", "NET", "IO", "TEMP", "UPTIME", "SRC",
];
const HOST_WIDTHS: [u16; 11] = [0, 8, 9, 6, 6, 6, 12, 12, 5, 7, 14];

/// Builds the host table for the mounted window `[start, end)` of `items`.
/// I/O cells are classified against the shared `scale` built over the whole
/// visible host set, not just the window.
pub fn build_host_table(
    items: &[RowItem<'_>],
    scale: &IoScale,
    range: (usize, usize),
    sort: (SortKey, SortDirection),
) -> TableViewModel<Option<String>> {
    let (start, end) = range;
    let end = end.min(items.len());
    let start = start.min(end);

    let mut rows = Vec::with_capacity(end - start);
    for item in &items[start..end] {
        rows.push(match item {
            RowItem::Header(label) => header_row(label, HOST_HEADERS.len()),
            RowItem::Resource(r) => host_row(r, scale),
        });
    }

    let resource_count = items.iter().filter(|i| !i.is_header()).count();
    TableViewModel {
        title: format!("hosts ({resource_count})"),
        headers: HOST_HEADERS.iter().map(|h| h.to_string()).collect(),
        widths: HOST_WIDTHS.to_vec(),
        rows,
        sort_column: host_sort_column(sort.0),
        sort_ascending: sort.1 == SortDirection::Ascending,
    }
}

fn host_sort_column(key: SortKey) -> Option<usize> {
    match key {
        SortKey::Default => None,
        SortKey::Name => Some(0),
        SortKey::Cpu => Some(3),
        SortKey::Memory => Some(4),
        SortKey::Disk => Some(5),
        SortKey::Network => Some(6),
        SortKey::DiskIo => Some(7),
        SortKey::Temp => Some(8),
        SortKey::Uptime => Some(9),
        SortKey::Source => Some(10),
    }
}

fn header_row(label: &str, columns: usize) -> ViewRow<Option<String>> {
    let name = if label.is_empty() { "standalone" } else { label };
    let mut cells = vec![ViewCell::plain(format!("▾ {name}"))];
    cells.resize(columns, ViewCell::plain(""));
    ViewRow {
        id: None,
        cells,
        style: RowStyleClass::Accent,
    }
}

fn host_row(r: &Resource, scale: &IoScale) -> ViewRow<Option<String>> {
    let name = if r.is_merged() {
        format!("{} {MERGED_MARK}", r.title())
    } else {
        r.title().to_string()
    };

    let cells = vec![
        ViewCell::plain(name),
        ViewCell::plain(r.kind.label()),
        status_cell(r),
        metric_cell(r.cpu.map(|c| format_percent(c.current))),
        metric_cell(r.memory.map(|m| format_percent(m.percent()))),
        metric_cell(r.disk.map(|d| format_percent(d.percent()))),
        io_cell(r.network_rate(), &scale.network),
        io_cell(r.disk_io_rate(), &scale.disk_io),
        metric_cell(r.temperature.map(format_temp)),
        metric_cell(r.uptime.map(format_age)),
        ViewCell::plain(r.source_key()),
    ];

    ViewRow {
        id: Some(r.id.clone()),
        cells,
        style: if r.is_online() {
            RowStyleClass::Normal
        } else {
            RowStyleClass::Dimmed
        },
    }
}

fn status_cell(r: &Resource) -> ViewCell {
    match r.status.as_deref() {
        None => ViewCell::plain("-"),
        Some(s) if r.is_online() => ViewCell::styled(s, RowStyleClass::Active),
        Some(s) => ViewCell::styled(s, RowStyleClass::Critical),
    }
}

fn metric_cell(text: Option<String>) -> ViewCell {
    match text {
        Some(t) => ViewCell::plain(t),
        None => ViewCell::styled("-", RowStyleClass::Dimmed),
    }
}

/// Formats an I/O rate and attaches its emphasis classification.
fn io_cell(rate: f64, stats: &IoDistribution) -> ViewCell {
    let emphasis = classify_io(rate, stats);
    let mut text = format_bytes_rate(rate, FmtStyle::Compact);
    if emphasis.outlier_hint {
        text.push_str(OUTLIER_MARK);
    }
    match emphasis_class(emphasis.tier) {
        Some(class) => ViewCell::styled(text, class),
        None => ViewCell::plain(text),
    }
}

/// Emphasis tier to style class; `Normal` inherits the row style.
fn emphasis_class(tier: EmphasisTier) -> Option<RowStyleClass> {
    match tier {
        EmphasisTier::Faint => Some(RowStyleClass::Dimmed),
        EmphasisTier::Normal => None,
        EmphasisTier::Elevated => Some(RowStyleClass::Warning),
        EmphasisTier::Hot => Some(RowStyleClass::CriticalBold),
    }
}

// ---------------------------------------------------------------------------
// Services table
// ---------------------------------------------------------------------------

const SERVICE_HEADERS: [&str; 6] = ["NAME", "TYPE", "STATUS", "VERSION", "HEALTH", "DETAILS"];
const SERVICE_WIDTHS: [u16; 6] = [0, 5, 9, 10, 11, 30];

/// Builds the services table (PBS/PMG) for the mounted window.
pub fn build_service_table(
    services: &[&Resource],
    range: (usize, usize),
) -> TableViewModel<Option<String>> {
    let (start, end) = range;
    let end = end.min(services.len());
    let start = start.min(end);

    let rows = services[start..end].iter().map(|r| service_row(r)).collect();
    TableViewModel {
        title: format!("services ({})", services.len()),
        headers: SERVICE_HEADERS.iter().map(|h| h.to_string()).collect(),
        widths: SERVICE_WIDTHS.to_vec(),
        rows,
        sort_column: None,
        sort_ascending: true,
    }
}

fn service_row(r: &Resource) -> ViewRow<Option<String>> {
    let detail = r.platform_data.as_ref().and_then(|d| d.detail.as_ref());
    let version = detail
        .and_then(|d| d.version())
        .unwrap_or("-")
        .to_string();

    let cells = vec![
        ViewCell::plain(r.title()),
        ViewCell::plain(r.kind.label()),
        status_cell(r),
        ViewCell::plain(version),
        health_cell(detail),
        ViewCell::plain(detail.map(service_details).unwrap_or_default()),
    ];

    ViewRow {
        id: Some(r.id.clone()),
        cells,
        style: if r.is_online() {
            RowStyleClass::Normal
        } else {
            RowStyleClass::Dimmed
        },
    }
}

fn health_cell(detail: Option<&PlatformDetail>) -> ViewCell {
    let health = match detail {
        Some(PlatformDetail::Pbs(d)) => d.connection_health.as_deref(),
        Some(PlatformDetail::Pmg(d)) => d.connection_health.as_deref(),
        _ => None,
    };
    match health {
        None => ViewCell::styled("-", RowStyleClass::Dimmed),
        Some(h) if h.eq_ignore_ascii_case("healthy") => ViewCell::styled(h, RowStyleClass::Active),
        Some(h) => ViewCell::styled(h, RowStyleClass::Warning),
    }
}

/// One-line service summary from the platform payload.
fn service_details(detail: &PlatformDetail) -> String {
    match detail {
        PlatformDetail::Pbs(d) => {
            let stores = d.datastore_count.unwrap_or(0);
            let jobs = d.backup_job_count.unwrap_or(0);
            match d.last_backup_at {
                Some(_) => format!("{stores} datastores, {jobs} jobs"),
                None => format!("{stores} datastores, {jobs} jobs, no backups"),
            }
        }
        PlatformDetail::Pmg(d) => {
            format!(
                "queue {}/{}, spam {}/24h",
                d.queue_active.unwrap_or(0),
                d.queue_deferred.unwrap_or(0),
                d.spam_in_24h.unwrap_or(0)
            )
        }
        _ => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Fleet summary
// ---------------------------------------------------------------------------

/// Counts shown in the summary header, gathered in one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FleetSummary {
    pub total: usize,
    pub online: usize,
    pub offline: usize,
    pub hosts: usize,
    pub services: usize,
    pub clusters: usize,
    pub merged: usize,
}

impl FleetSummary {
    pub fn collect(resources: &[Resource]) -> FleetSummary {
        let mut summary = FleetSummary {
            total: resources.len(),
            ..FleetSummary::default()
        };
        let mut clusters: Vec<&str> = Vec::new();
        for r in resources {
            if r.is_online() {
                summary.online += 1;
            } else {
                summary.offline += 1;
            }
            if r.kind.is_service() {
                summary.services += 1;
            } else {
                summary.hosts += 1;
            }
            if r.is_merged() {
                summary.merged += 1;
            }
            if let Some(c) = r.cluster_id.as_deref()
                && !c.is_empty()
                && !clusters.contains(&c)
            {
                clusters.push(c);
            }
        }
        summary.clusters = clusters.len();
        summary
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{GroupMode, group_resources};
    use crate::analysis::IoScale;
    use crate::model::{NetworkMetric, PbsData, PlatformData, ResourceKind};

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

    fn net_host(id: &str, rate: f64) -> Resource {
        let mut r = resource(id, ResourceKind::Host);
        r.status = Some("running".to_string());
        r.network = Some(NetworkMetric {
            rx_bytes: Some(rate),
            tx_bytes: Some(0.0),
        });
        r
    }

    #[test]
    fn flat_mode_emits_no_headers() {
        let a = resource("a", ResourceKind::Vm);
        let b = resource("b", ResourceKind::Vm);
        let rows: Vec<&Resource> = vec![&a, &b];
        let groups = group_resources(&rows, GroupMode::Flat);
        let items = build_row_items(&groups, GroupMode::Flat);
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|i| !i.is_header()));
    }

    #[test]
    fn grouped_mode_injects_headers_in_group_order() {
        let mut n1 = resource("n1", ResourceKind::Node);
        n1.cluster_id = Some("prod".to_string());
        let solo = resource("solo", ResourceKind::Host);
        let rows: Vec<&Resource> = vec![&n1, &solo];
        let groups = group_resources(&rows, GroupMode::Grouped);
        let items = build_row_items(&groups, GroupMode::Grouped);

        assert_eq!(items.len(), 4); // prod header, n1, standalone header, solo
        assert!(items[0].is_header());
        assert_eq!(items[1].resource().map(|r| r.id.as_str()), Some("n1"));
        assert!(items[2].is_header());
        assert_eq!(items[3].resource().map(|r| r.id.as_str()), Some("solo"));
    }

    #[test]
    fn header_rows_render_standalone_label() {
        let table = build_host_table(
            &[RowItem::Header("")],
            &IoScale::default(),
            (0, 1),
            (SortKey::Default, SortDirection::Ascending),
        );
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].id, None);
        assert_eq!(table.rows[0].cells[0].text, "▾ standalone");
        assert_eq!(table.rows[0].style, RowStyleClass::Accent);
        assert_eq!(table.rows[0].cells.len(), table.headers.len());
    }

    #[test]
    fn host_table_builds_only_the_window() {
        let hosts: Vec<Resource> = (0..10).map(|i| net_host(&format!("h{i}"), 10.0)).collect();
        let refs: Vec<&Resource> = hosts.iter().collect();
        let groups = group_resources(&refs, GroupMode::Flat);
        let items = build_row_items(&groups, GroupMode::Flat);

        let table = build_host_table(
            &items,
            &IoScale::default(),
            (2, 5),
            (SortKey::Default, SortDirection::Ascending),
        );
        let ids: Vec<_> = table.rows.iter().map(|r| r.id.clone()).collect();
        assert_eq!(
            ids,
            vec![
                Some("h2".to_string()),
                Some("h3".to_string()),
                Some("h4".to_string())
            ]
        );
        assert_eq!(table.title, "hosts (10)");
    }

    #[test]
    fn outlier_cell_gets_hot_style_and_marker() {
        let mut hosts: Vec<Resource> = (0..9).map(|i| net_host(&format!("h{i}"), 10.0)).collect();
        hosts.push(net_host("spike", 1000.0));
        let refs: Vec<&Resource> = hosts.iter().collect();

        let scale = crate::aggregate::compute_io_scale(&refs);
        let groups = group_resources(&refs, GroupMode::Flat);
        let items = build_row_items(&groups, GroupMode::Flat);
        let table = build_host_table(
            &items,
            &scale,
            (0, items.len()),
            (SortKey::Default, SortDirection::Ascending),
        );

        let spike = table
            .rows
            .iter()
            .find(|r| r.id.as_deref() == Some("spike"))
            .unwrap();
        let net = &spike.cells[6];
        assert!(net.text.ends_with(OUTLIER_MARK), "text = {:?}", net.text);
        assert_eq!(net.style, Some(RowStyleClass::CriticalBold));

        let calm = table
            .rows
            .iter()
            .find(|r| r.id.as_deref() == Some("h0"))
            .unwrap();
        assert!(!calm.cells[6].text.ends_with(OUTLIER_MARK));
        assert_eq!(calm.cells[6].style, None);
    }

    #[test]
    fn offline_rows_are_dimmed_with_critical_status() {
        let mut down = net_host("down", 0.0);
        down.status = Some("offline".to_string());
        let refs: Vec<&Resource> = vec![&down];
        let groups = group_resources(&refs, GroupMode::Flat);
        let items = build_row_items(&groups, GroupMode::Flat);
        let table = build_host_table(
            &items,
            &IoScale::default(),
            (0, 1),
            (SortKey::Default, SortDirection::Ascending),
        );

        assert_eq!(table.rows[0].style, RowStyleClass::Dimmed);
        assert_eq!(table.rows[0].cells[2].style, Some(RowStyleClass::Critical));
    }

    #[test]
    fn missing_metrics_render_dashes() {
        let bare = resource("bare", ResourceKind::Host);
        let refs: Vec<&Resource> = vec![&bare];
        let groups = group_resources(&refs, GroupMode::Flat);
        let items = build_row_items(&groups, GroupMode::Flat);
        let table = build_host_table(
            &items,
            &IoScale::default(),
            (0, 1),
            (SortKey::Default, SortDirection::Ascending),
        );

        let row = &table.rows[0];
        assert_eq!(row.cells[3].text, "-"); // cpu
        assert_eq!(row.cells[8].text, "-"); // temp
        assert_eq!(row.cells[9].text, "-"); // uptime
        assert_eq!(row.cells[6].text, "0"); // net rate absent -> idle zero
    }

    #[test]
    fn merged_names_carry_the_marker() {
        let mut r = net_host("h", 10.0);
        r.platform_data = Some(PlatformData {
            sources: vec!["agent".to_string(), "proxmox".to_string()],
            detail: None,
        });
        let refs: Vec<&Resource> = vec![&r];
        let groups = group_resources(&refs, GroupMode::Flat);
        let items = build_row_items(&groups, GroupMode::Flat);
        let table = build_host_table(
            &items,
            &IoScale::default(),
            (0, 1),
            (SortKey::Default, SortDirection::Ascending),
        );
        assert!(table.rows[0].cells[0].text.ends_with(MERGED_MARK));
    }

    #[test]
    fn sort_key_maps_to_column_index() {
        let table = build_host_table(
            &[],
            &IoScale::default(),
            (0, 0),
            (SortKey::Network, SortDirection::Descending),
        );
        assert_eq!(table.sort_column, Some(6));
        assert!(!table.sort_ascending);
    }

    #[test]
    fn service_rows_summarize_pbs_payload() {
        let mut pbs = resource("backup", ResourceKind::Pbs);
        pbs.status = Some("online".to_string());
        pbs.platform_data = Some(PlatformData {
            sources: vec!["pbs".to_string()],
            detail: Some(PlatformDetail::Pbs(PbsData {
                version: Some("3.2-1".to_string()),
                datastore_count: Some(4),
                backup_job_count: Some(12),
                last_backup_at: Some(1755900000),
                connection_health: Some("healthy".to_string()),
            })),
        });

        let refs: Vec<&Resource> = vec![&pbs];
        let table = build_service_table(&refs, (0, 1));
        let row = &table.rows[0];
        assert_eq!(row.cells[3].text, "3.2-1");
        assert_eq!(row.cells[4].style, Some(RowStyleClass::Active));
        assert_eq!(row.cells[5].text, "4 datastores, 12 jobs");
    }

    #[test]
    fn fleet_summary_counts_in_one_pass() {
        let mut n1 = resource("n1", ResourceKind::Node);
        n1.cluster_id = Some("prod".to_string());
        let mut n2 = resource("n2", ResourceKind::Node);
        n2.cluster_id = Some("prod".to_string());
        let mut down = resource("down", ResourceKind::Vm);
        down.status = Some("stopped".to_string());
        let pbs = resource("backup", ResourceKind::Pbs);
        let mut merged = resource("m", ResourceKind::Host);
        merged.platform_data = Some(PlatformData {
            sources: vec!["agent".to_string(), "proxmox".to_string()],
            detail: None,
        });

        let summary = FleetSummary::collect(&[n1, n2, down, pbs, merged]);
        assert_eq!(summary.total, 5);
        assert_eq!(summary.online, 4);
        assert_eq!(summary.offline, 1);
        assert_eq!(summary.services, 1);
        assert_eq!(summary.hosts, 4);
        assert_eq!(summary.clusters, 1);
        assert_eq!(summary.merged, 1);
    }
}
