//! Project records: the raw API shapes and the normalized summary document.

use crate::imagery::ImageryCategory;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// Timestamp format of `SummaryDocument::generated`
pub const GENERATED_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// One page of the project listing endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingPage {
    #[serde(default)]
    pub results: Vec<ListingEntry>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingEntry {
    pub project_id: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default)]
    pub has_next: Option<bool>,
}

impl ListingPage {
    /// Whether the server says there is nothing after this page
    pub fn is_last(&self) -> bool {
        self.results.is_empty()
            || self
                .pagination
                .as_ref()
                .and_then(|p| p.has_next)
                .is_some_and(|has_next| !has_next)
    }
}

/// Detail response for a single project.
///
/// Only the fields the summary needs are decoded and all of them may be
/// missing or null.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProjectRecord {
    #[serde(default)]
    pub project_id: Option<u64>,
    #[serde(default)]
    pub project_info: Option<ProjectInfo>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub imagery: Option<String>,
    #[serde(default)]
    pub country_tag: Option<Vec<String>>,
    #[serde(default)]
    pub organisation_name: Option<String>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub mapping_types: Option<Vec<String>>,
    #[serde(default)]
    pub area_of_interest: Option<Value>,
    #[serde(default)]
    pub percent_mapped: Option<Number>,
    #[serde(default)]
    pub percent_validated: Option<Number>,
    #[serde(default)]
    pub difficulty: Option<Value>,
    #[serde(default)]
    pub project_priority: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectInfo {
    #[serde(default)]
    pub name: Option<String>,
}

/// Normalized view of one project, as written for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRecord {
    pub id: u64,
    pub name: String,
    pub status: Option<String>,
    pub imagery: ImageryCategory,
    pub imagery_raw: String,
    pub country: Vec<String>,
    pub org: String,
    /// Creation date, `YYYY-MM-DD`
    pub created: String,
    pub mapping_types: Vec<String>,
    pub area_sq_km: Option<f64>,
    /// `[longitude, latitude]`
    pub centroid: Option<[f64; 2]>,
    pub pct_mapped: Option<Number>,
    pub pct_validated: Option<Number>,
    pub difficulty: Option<Value>,
    pub priority: Option<Value>,
}

/// The file-level container written once per run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryDocument {
    pub generated: String,
    pub total_projects: usize,
    pub projects: Vec<SummaryRecord>,
}

impl SummaryDocument {
    /// Wrap the records, stamping them with `generated_at`
    pub fn new(projects: Vec<SummaryRecord>, generated_at: DateTime<Utc>) -> Self {
        Self {
            generated: generated_at.format(GENERATED_FORMAT).to_string(),
            total_projects: projects.len(),
            projects,
        }
    }

    /// Number of projects per imagery category, in `ImageryCategory::ALL` order
    pub fn imagery_breakdown(&self) -> Vec<(ImageryCategory, usize)> {
        ImageryCategory::ALL
            .iter()
            .map(|category| {
                let count = self
                    .projects
                    .iter()
                    .filter(|p| p.imagery == *category)
                    .count();
                (*category, count)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn raw_record_tolerates_missing_and_null_fields() {
        let raw: RawProjectRecord = serde_json::from_str(
            r#"{"projectId": 7, "imagery": null, "countryTag": null, "projectInfo": {}}"#,
        )
        .unwrap();
        assert_eq!(raw.project_id, Some(7));
        assert!(raw.imagery.is_none());
        assert!(raw.country_tag.is_none());
        assert!(raw.project_info.unwrap().name.is_none());
        assert!(raw.area_of_interest.is_none());

        let empty: RawProjectRecord = serde_json::from_str("{}").unwrap();
        assert!(empty.status.is_none());
    }

    #[test]
    fn raw_record_keeps_enum_like_fields_verbatim() {
        let raw: RawProjectRecord = serde_json::from_str(
            r#"{"difficulty": "MODERATE", "projectPriority": 2, "percentMapped": 45, "percentValidated": 12.5}"#,
        )
        .unwrap();
        assert_eq!(raw.difficulty, Some(Value::from("MODERATE")));
        assert_eq!(raw.project_priority, Some(Value::from(2)));
        assert_eq!(raw.percent_mapped.unwrap().to_string(), "45");
        assert_eq!(raw.percent_validated.unwrap().as_f64(), Some(12.5));
    }

    #[test]
    fn listing_page_detects_last_page() {
        let page: ListingPage = serde_json::from_str(
            r#"{"results": [{"projectId": 1}], "pagination": {"hasNext": false, "page": 3}}"#,
        )
        .unwrap();
        assert!(page.is_last());

        let page: ListingPage = serde_json::from_str(
            r#"{"results": [{"projectId": 1, "name": "x"}], "pagination": {"hasNext": true}}"#,
        )
        .unwrap();
        assert!(!page.is_last());

        let page: ListingPage = serde_json::from_str(r#"{"results": [{"projectId": 1}]}"#).unwrap();
        assert!(!page.is_last());

        let page: ListingPage = serde_json::from_str("{}").unwrap();
        assert!(page.is_last());
    }

    #[test]
    fn document_uses_dashboard_field_names() {
        let record = SummaryRecord {
            id: 42,
            name: "Flood response".into(),
            status: Some("PUBLISHED".into()),
            imagery: ImageryCategory::NotSpecified,
            imagery_raw: String::new(),
            country: vec!["Kenya".into()],
            org: "HOT".into(),
            created: "2024-05-01".into(),
            mapping_types: vec!["BUILDINGS".into()],
            area_sq_km: Some(12.34),
            centroid: Some([36.8219, -1.2921]),
            pct_mapped: Some(Number::from(80)),
            pct_validated: None,
            difficulty: Some(Value::from("EASY")),
            priority: Some(Value::from("HIGH")),
        };
        let generated = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        let doc = SummaryDocument::new(vec![record], generated);

        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["generated"], "2025-01-02T03:04:05Z");
        assert_eq!(json["totalProjects"], 1);
        let project = &json["projects"][0];
        assert_eq!(project["imagery"], "Not specified");
        assert_eq!(project["imageryRaw"], "");
        assert_eq!(project["areaSqKm"], 12.34);
        assert_eq!(project["centroid"], serde_json::json!([36.8219, -1.2921]));
        assert_eq!(project["pctMapped"], 80);
        assert!(project["pctValidated"].is_null());
        assert_eq!(project["mappingTypes"][0], "BUILDINGS");
        assert_eq!(project["priority"], "HIGH");
    }

    #[test]
    fn breakdown_covers_every_category() {
        let generated = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let doc = SummaryDocument::new(Vec::new(), generated);
        let breakdown = doc.imagery_breakdown();
        assert_eq!(breakdown.len(), ImageryCategory::ALL.len());
        assert!(breakdown.iter().all(|(_, count)| *count == 0));
        assert_eq!(doc.total_projects, 0);
    }
}
