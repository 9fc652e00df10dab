use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use turf_zones::{Coords, Line, Zone, ZoneSet};

#[derive(Debug, Deserialize)]
struct ZoneInput {
    name: String,
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct LineInput {
    a: Coords,
    b: Coords,

    /// Meters; the great-circle distance between `a` and `b` when omitted
    distance: Option<f64>,
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid {}", path.display()))
}

/// Load one zone file per path and merge them into a single set
pub fn load_zones(paths: &[PathBuf]) -> Result<ZoneSet> {
    let mut merged = ZoneSet::new(Vec::new())?;

    for path in paths {
        let inputs: Vec<ZoneInput> = read_json(path)?;
        let zones = ZoneSet::new(
            inputs
                .into_iter()
                .map(|z| Zone::new(z.name, Coords::new(z.lat, z.lon))),
        )
        .with_context(|| format!("Invalid zones in {}", path.display()))?;

        log::debug!("Loaded {} zones from {}", zones.len(), path.display());
        merged = ZoneSet::union(&merged, &zones)?;
    }

    log::info!("Loaded {} zones", merged.len());
    Ok(merged)
}

pub fn load_lines(path: &Path) -> Result<Vec<Line>> {
    let inputs: Vec<LineInput> = read_json(path)?;
    let mut lines = Vec::with_capacity(inputs.len());

    for (i, input) in inputs.into_iter().enumerate() {
        let line = match input.distance {
            Some(distance) if distance >= 0.0 => Line::new(input.a, input.b, distance),
            Some(distance) => anyhow::bail!(
                "Line {} in {} has negative distance {}",
                i,
                path.display(),
                distance
            ),
            None => Line::between(input.a, input.b),
        };
        lines.push(line);
    }

    log::info!("Loaded {} lines from {}", lines.len(), path.display());
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_zones_merges_files() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("first.json");
        let second = dir.path().join("second.json");
        fs::write(&first, r#"[{"name":"a","lat":59.0,"lon":18.0},{"name":"b","lat":59.1,"lon":18.0}]"#).unwrap();
        fs::write(&second, r#"[{"name":"B","lat":59.1,"lon":18.0},{"name":"c","lat":59.2,"lon":18.0}]"#).unwrap();

        let zones = load_zones(&[first, second]).unwrap();
        assert_eq!(zones.len(), 3);
        assert!(zones.contains("c"));
    }

    #[test]
    fn test_load_zones_rejects_duplicates_in_one_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("zones.json");
        fs::write(&path, r#"[{"name":"a","lat":0.0,"lon":0.0},{"name":"A","lat":1.0,"lon":1.0}]"#).unwrap();

        let err = load_zones(&[path]).unwrap_err();
        assert!(format!("{err:#}").contains("Duplicate zone name"));
    }

    #[test]
    fn test_load_lines_fills_missing_distance() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lines.json");
        fs::write(
            &path,
            r#"[
                {"a":{"lat":10.0,"lon":20.0},"b":{"lat":11.0,"lon":20.0}},
                {"a":{"lat":10.0,"lon":20.0},"b":{"lat":11.0,"lon":20.0},"distance":42.0}
            ]"#,
        )
        .unwrap();

        let lines = load_lines(&path).unwrap();
        assert!((lines[0].distance - 111_195.0).abs() < 50.0);
        assert_eq!(lines[1].distance, 42.0);
    }

    #[test]
    fn test_load_lines_rejects_negative_distance() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lines.json");
        fs::write(&path, r#"[{"a":{"lat":0.0,"lon":0.0},"b":{"lat":0.0,"lon":1.0},"distance":-1.0}]"#).unwrap();

        assert!(load_lines(&path).is_err());
    }
}
