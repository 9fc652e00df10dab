use crate::zone::Points;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One entry of a bulk zone request: `{"name": "<zone>"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneQuery {
    pub name: String,
}

/// Zone information returned by the zone API.
///
/// Only the fields needed for enrichment are decoded; the API sends more.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneRecord {
    pub name: String,
    pub takeover_points: u32,
    pub points_per_hour: u32,
}

impl ZoneRecord {
    pub fn points(&self) -> Points {
        Points {
            takeover: self.takeover_points,
            per_hour: self.points_per_hour,
        }
    }
}

/// Bulk metadata source.
///
/// One call is one outbound request. Names the source does not know are
/// dropped from the answer rather than reported, so callers must compare
/// what came back with what they asked for.
#[async_trait]
pub trait MetadataFetcher: Send + Sync {
    async fn fetch(&self, request: &[ZoneQuery]) -> anyhow::Result<Vec<ZoneRecord>>;
}

/// In-memory fetcher answering from a fixed record list.
///
/// Behaves like the live API: unknown names are silently dropped and the
/// spelling of the stored record is returned.
#[derive(Debug, Clone, Default)]
pub struct StaticFetcher {
    records: HashMap<String, ZoneRecord>,
}

impl StaticFetcher {
    pub fn new(records: impl IntoIterator<Item = ZoneRecord>) -> Self {
        let records = records
            .into_iter()
            .map(|record| (record.name.to_lowercase(), record))
            .collect();
        Self { records }
    }
}

#[async_trait]
impl MetadataFetcher for StaticFetcher {
    async fn fetch(&self, request: &[ZoneQuery]) -> anyhow::Result<Vec<ZoneRecord>> {
        Ok(request
            .iter()
            .filter_map(|query| self.records.get(&query.name.to_lowercase()).cloned())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_decodes_api_shape() {
        let body = r#"[{"name":"Slottsbacken","id":123,"takeoverPoints":185,"pointsPerHour":2,"region":{"id":141}}]"#;
        let records: Vec<ZoneRecord> = serde_json::from_str(body).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].points(), Points { takeover: 185, per_hour: 2 });
    }

    #[test]
    fn test_query_encodes_name_objects() {
        let request = vec![
            ZoneQuery { name: "a".to_string() },
            ZoneQuery { name: "b".to_string() },
        ];
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"[{"name":"a"},{"name":"b"}]"#
        );
    }

    #[tokio::test]
    async fn test_static_fetcher_drops_unknown_names() {
        let fetcher = StaticFetcher::new(vec![ZoneRecord {
            name: "Known".to_string(),
            takeover_points: 50,
            points_per_hour: 1,
        }]);
        let request = vec![
            ZoneQuery { name: "known".to_string() },
            ZoneQuery { name: "missing".to_string() },
        ];

        let records = fetcher.fetch(&request).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Known");
    }
}
