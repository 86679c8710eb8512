//! Resource detail popup.
//!
//! Locked to a resource id when opened, so the content follows the same
//! resource across refreshes even while the table re-sorts underneath.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;

use crate::fmt::{FmtStyle, format_age, format_bytes, format_bytes_rate, format_percent, format_temp};
use crate::model::{PlatformDetail, Resource};
use crate::tui::state::{AppState, PopupState};
use crate::tui::style::Styles;

use super::popup::{kv, kv_styled, render_popup_frame, section};

/// Renders the detail popup for the resource in `state.detail_id`.
pub fn render_detail(frame: &mut Frame, area: Rect, state: &mut AppState) {
    let PopupState::Detail { scroll } = &mut state.popup else {
        return;
    };

    let resource = state.detail_id.as_deref().and_then(|id| {
        state
            .snapshot
            .as_ref()
            .and_then(|s| s.resources.iter().find(|r| r.id == id))
    });

    let Some(r) = resource else {
        let content = vec![Line::from("Resource is no longer present in the snapshot.")];
        render_popup_frame(frame, area, "detail", content, scroll);
        return;
    };

    let generated_at = state.snapshot.as_ref().map(|s| s.generated_at).unwrap_or(0);
    let title = format!("{} · {}", r.kind.label(), r.title());
    let content = build_content(r, generated_at);
    render_popup_frame(frame, area, &title, content, scroll);
}

fn build_content(r: &Resource, generated_at: i64) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    lines.push(section("identity"));
    lines.push(kv("id", &r.id));
    lines.push(kv("name", &r.name));
    if let Some(display) = &r.display_name {
        lines.push(kv("display name", display));
    }
    lines.push(kv("type", r.kind.label()));
    let status = r.status.as_deref().unwrap_or("unknown");
    let status_style = if r.is_online() {
        Styles::online()
    } else {
        Styles::critical()
    };
    lines.push(kv_styled("status", status, status_style));
    if let Some(cluster) = &r.cluster_id {
        lines.push(kv("cluster", cluster));
    }
    if let Some(parent) = &r.parent_id {
        lines.push(kv("parent", parent));
    }
    lines.push(kv("source", &r.source_key()));
    if let Some(data) = &r.platform_data
        && !data.sources.is_empty()
    {
        let mark = if r.is_merged() { " ⧉" } else { "" };
        lines.push(kv("origins", &format!("{}{}", data.sources.join(", "), mark)));
    }

    lines.push(Line::from(""));
    lines.push(section("metrics"));
    if let Some(cpu) = &r.cpu {
        lines.push(kv("cpu", &format_percent(cpu.current)));
    }
    if let Some(mem) = &r.memory {
        lines.push(kv(
            "memory",
            &format!(
                "{} / {} ({})",
                format_bytes(mem.used, FmtStyle::Detail),
                format_bytes(mem.total, FmtStyle::Detail),
                format_percent(mem.percent())
            ),
        ));
    }
    if let Some(disk) = &r.disk {
        lines.push(kv(
            "disk",
            &format!(
                "{} / {} ({})",
                format_bytes(disk.used, FmtStyle::Detail),
                format_bytes(disk.total, FmtStyle::Detail),
                format_percent(disk.percent())
            ),
        ));
    }
    if let Some(net) = &r.network {
        lines.push(kv(
            "network",
            &format!(
                "rx {}  tx {}",
                format_bytes_rate(net.rx_bytes.unwrap_or(0.0), FmtStyle::Detail),
                format_bytes_rate(net.tx_bytes.unwrap_or(0.0), FmtStyle::Detail)
            ),
        ));
    }
    if let Some(io) = &r.disk_io {
        lines.push(kv(
            "disk i/o",
            &format!(
                "read {}  write {}",
                format_bytes_rate(io.read_rate.unwrap_or(0.0), FmtStyle::Detail),
                format_bytes_rate(io.write_rate.unwrap_or(0.0), FmtStyle::Detail)
            ),
        ));
    }
    if let Some(temp) = r.temperature {
        lines.push(kv("temperature", &format_temp(temp)));
    }
    if let Some(uptime) = r.uptime {
        lines.push(kv("uptime", &format_age(uptime)));
    }

    if let Some(detail) = r.platform_data.as_ref().and_then(|d| d.detail.as_ref()) {
        lines.push(Line::from(""));
        lines.push(section(detail.platform_name()));
        push_platform_lines(&mut lines, detail, generated_at);
    }

    lines
}

fn push_platform_lines(lines: &mut Vec<Line<'static>>, detail: &PlatformDetail, generated_at: i64) {
    match detail {
        PlatformDetail::Proxmox(d) => {
            if let Some(vmid) = d.vmid {
                lines.push(kv("vmid", &vmid.to_string()));
            }
            if let Some(node) = &d.node {
                lines.push(kv("node", node));
            }
            if let Some(cluster) = &d.cluster_name {
                lines.push(kv("cluster name", cluster));
            }
            if let Some(version) = &d.pve_version {
                lines.push(kv("pve version", version));
            }
            if let Some(ha) = &d.ha_state {
                lines.push(kv("ha state", ha));
            }
        }
        PlatformDetail::Agent(d) => {
            let os = match (&d.os_name, &d.os_version) {
                (Some(name), Some(version)) => Some(format!("{name} {version}")),
                (Some(name), None) => Some(name.clone()),
                _ => None,
            };
            if let Some(os) = os {
                lines.push(kv("os", &os));
            }
            if let Some(kernel) = &d.kernel_version {
                lines.push(kv("kernel", kernel));
            }
            if let Some(version) = &d.agent_version {
                lines.push(kv("agent", version));
            }
        }
        PlatformDetail::Docker(d) => {
            if let Some(image) = &d.image {
                lines.push(kv("image", image));
            }
            if let Some(id) = &d.container_id {
                lines.push(kv("container id", id));
            }
            if let Some(version) = &d.engine_version {
                lines.push(kv("engine", version));
            }
            if let Some(project) = &d.compose_project {
                lines.push(kv("compose project", project));
            }
        }
        PlatformDetail::Pbs(d) => {
            if let Some(version) = &d.version {
                lines.push(kv("version", version));
            }
            if let Some(count) = d.datastore_count {
                lines.push(kv("datastores", &count.to_string()));
            }
            if let Some(count) = d.backup_job_count {
                lines.push(kv("backup jobs", &count.to_string()));
            }
            if let Some(ts) = d.last_backup_at {
                let age = format_age(generated_at.saturating_sub(ts));
                lines.push(kv("last backup", &format!("{age} ago")));
            }
            if let Some(health) = &d.connection_health {
                lines.push(kv_styled("health", health, health_style(health)));
            }
        }
        PlatformDetail::Pmg(d) => {
            if let Some(version) = &d.version {
                lines.push(kv("version", version));
            }
            if let Some(active) = d.queue_active {
                lines.push(kv("queue active", &active.to_string()));
            }
            if let Some(deferred) = d.queue_deferred {
                lines.push(kv("queue deferred", &deferred.to_string()));
            }
            if let Some(spam) = d.spam_in_24h {
                lines.push(kv("spam (24h)", &spam.to_string()));
            }
            if let Some(virus) = d.virus_in_24h {
                lines.push(kv("virus (24h)", &virus.to_string()));
            }
            if let Some(health) = &d.connection_health {
                lines.push(kv_styled("health", health, health_style(health)));
            }
        }
        PlatformDetail::Kubernetes(d) => {
            if let Some(cluster) = &d.cluster_name {
                lines.push(kv("cluster name", cluster));
            }
            if let Some(namespace) = &d.namespace {
                lines.push(kv("namespace", namespace));
            }
            if let Some(node) = &d.node_name {
                lines.push(kv("node", node));
            }
            if let Some(phase) = &d.pod_phase {
                lines.push(kv("pod phase", phase));
            }
            if let Some(version) = &d.kubelet_version {
                lines.push(kv("kubelet", version));
            }
        }
    }
}

fn health_style(health: &str) -> Style {
    if health.eq_ignore_ascii_case("healthy") {
        Styles::online()
    } else if health.eq_ignore_ascii_case("degraded") {
        Styles::warning()
    } else {
        Styles::critical()
    }
}
