//! Summary document output.
//!
//! The document is written to a temporary file next to the destination and
//! then renamed over it, so readers never see a half-written file.

use crate::record::SummaryDocument;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("failed to replace output file: {0}")]
    PersistError(#[from] tempfile::PersistError),
}

/// Write `document` as pretty-printed JSON, replacing any existing file
pub fn write_document(path: &Path, document: &SummaryDocument) -> Result<(), OutputError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut file = NamedTempFile::new_in(dir)?;
    serde_json::to_writer_pretty(&mut file, document)?;
    file.flush()?;
    file.as_file().sync_all()?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))?;
    }

    file.persist(path)?;
    Ok(())
}

/// Read a previously written summary document
pub fn read_document(path: &Path) -> Result<SummaryDocument, OutputError> {
    let content = std::fs::read(path)?;
    Ok(serde_json::from_slice(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imagery::ImageryCategory;
    use crate::record::SummaryRecord;
    use chrono::{TimeZone, Utc};

    fn sample_document(names: &[&str]) -> SummaryDocument {
        let projects = names
            .iter()
            .enumerate()
            .map(|(i, name)| SummaryRecord {
                id: i as u64 + 1,
                name: name.to_string(),
                status: Some("ARCHIVED".into()),
                imagery: ImageryCategory::Bing,
                imagery_raw: "Bing".into(),
                country: Vec::new(),
                org: String::new(),
                created: "2021-06-30".into(),
                mapping_types: Vec::new(),
                area_sq_km: None,
                centroid: None,
                pct_mapped: None,
                pct_validated: None,
                difficulty: None,
                priority: None,
            })
            .collect();
        SummaryDocument::new(projects, Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap())
    }

    #[test]
    fn creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docs").join("projects_summary.json");

        let document = sample_document(&["a", "b"]);
        write_document(&path, &document).unwrap();

        assert_eq!(read_document(&path).unwrap(), document);
    }

    #[test]
    fn overwrites_previous_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projects_summary.json");

        write_document(&path, &sample_document(&["a", "b", "c"])).unwrap();
        write_document(&path, &sample_document(&["only"])).unwrap();

        let written = read_document(&path).unwrap();
        assert_eq!(written.total_projects, 1);
        assert_eq!(written.projects[0].name, "only");

        let leftovers = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn output_is_indented_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");
        write_document(&path, &sample_document(&[])).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("{\n  \"generated\": \"2025-06-01T12:00:00Z\""));
        assert!(text.contains("\"totalProjects\": 0"));
    }
}
