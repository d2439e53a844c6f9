//! Raw project → summary record mapping.

use crate::geometry::summarize_geometry;
use crate::imagery::classify_imagery;
use crate::record::{RawProjectRecord, SummaryRecord};

/// Length of a `YYYY-MM-DD` date prefix
const DATE_LEN: usize = 10;

/// Build the summary record for the project listed under `id`.
///
/// Pure: the same input always yields the same record.
pub fn summarize_project(id: u64, raw: &RawProjectRecord) -> SummaryRecord {
    let geometry = summarize_geometry(raw.area_of_interest.as_ref());

    // Missing and null are treated alike: text fields become "", lists [].
    SummaryRecord {
        id,
        name: raw
            .project_info
            .as_ref()
            .and_then(|info| info.name.clone())
            .unwrap_or_default(),
        status: raw.status.clone(),
        imagery: classify_imagery(raw.imagery.as_deref()),
        imagery_raw: raw.imagery.clone().unwrap_or_default(),
        country: raw.country_tag.clone().unwrap_or_default(),
        org: raw.organisation_name.clone().unwrap_or_default(),
        created: raw
            .created
            .as_deref()
            .map(|created| created.chars().take(DATE_LEN).collect())
            .unwrap_or_default(),
        mapping_types: raw.mapping_types.clone().unwrap_or_default(),
        area_sq_km: geometry.area_sq_km,
        centroid: geometry.centroid,
        pct_mapped: raw.percent_mapped.clone(),
        pct_validated: raw.percent_validated.clone(),
        difficulty: raw.difficulty.clone(),
        priority: raw.project_priority.clone(),
    }
}
