use serde::Serialize;
use std::fmt::Write as _;
use turf_graph::{BuildStats, Route};
use turf_zones::{Diagnostic, EnrichReport, Provenance, ZoneSet};

#[derive(Debug, Serialize)]
pub struct ConnectionOut {
    pub from: String,
    pub to: String,
    pub distance: f64,
}

#[derive(Debug, Serialize)]
pub struct ZoneOut {
    pub name: String,
    pub takeover_points: Option<u32>,
    pub points_per_hour: Option<u32>,
    pub connections: Vec<ConnectionOut>,
}

#[derive(Debug, Serialize)]
pub struct BuildOutput {
    pub provenance: Provenance,
    pub stats: BuildStats,
    pub nodes: usize,
    pub edges: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrichment: Option<EnrichReport>,
    pub zones: Vec<ZoneOut>,
}

impl BuildOutput {
    pub fn new(
        zone_set: &ZoneSet,
        stats: BuildStats,
        nodes: usize,
        edges: usize,
        enrichment: Option<EnrichReport>,
    ) -> Self {
        let zones = zone_set
            .iter()
            .map(|zone| ZoneOut {
                name: zone.name().to_string(),
                takeover_points: zone.points().map(|p| p.takeover),
                points_per_hour: zone.points().map(|p| p.per_hour),
                connections: zone
                    .connections()
                    .iter()
                    .map(|c| ConnectionOut {
                        from: c.parent().to_string(),
                        to: c.neighbor().to_string(),
                        distance: c.distance(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            provenance: zone_set.provenance(),
            stats,
            nodes,
            edges,
            enrichment,
            zones,
        }
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{} zones, {} connections from {} lines ({} duplicates, {} self-loops skipped)",
            self.nodes, self.edges, self.stats.lines, self.stats.duplicates, self.stats.self_loops
        );
        if let Some(report) = &self.enrichment {
            render_diagnostics(&mut out, &report.diagnostics);
        }

        for zone in &self.zones {
            match zone.takeover_points {
                Some(points) => {
                    let _ = writeln!(
                        out,
                        "{} ({} tp, {} pph)",
                        zone.name,
                        points,
                        zone.points_per_hour.unwrap_or_default()
                    );
                }
                None => {
                    let _ = writeln!(out, "{}", zone.name);
                }
            }
            for c in &zone.connections {
                let _ = writeln!(out, "  {} -> {} ({:.0} m)", c.from, c.to, c.distance);
            }
        }
        out
    }
}

#[derive(Debug, Serialize)]
pub struct RouteOutput {
    pub from: String,
    pub to: String,
    pub route: Option<Route>,
}

impl RouteOutput {
    pub fn render_text(&self) -> String {
        match &self.route {
            Some(route) => format!("{} ({:.0} m)\n", route.zones.join(" -> "), route.distance),
            None => format!("No route from {} to {}\n", self.from, self.to),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CheckOutput {
    pub zones: usize,
    pub report: EnrichReport,
}

impl CheckOutput {
    pub fn render_text(&self) -> String {
        let mut out = format!(
            "All {} zones exist ({} records returned)\n",
            self.zones, self.report.returned
        );
        render_diagnostics(&mut out, &self.report.diagnostics);
        out
    }
}

fn render_diagnostics(out: &mut String, diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        let _ = writeln!(out, "warning: {}", diagnostic);
    }
}
