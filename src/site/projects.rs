//! Project data module
//!
//! The project list is the only persisted data in the system: a JSON
//! array loaded once at startup and read-only for the process lifetime.

use serde::{Deserialize, Serialize};

use crate::error::SetupError;

/// A single portfolio entry
///
/// Entries have no identity beyond their position in the list.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Project {
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub link: String,
}

/// Load the project list from a JSON file
pub fn load_projects(path: &str) -> Result<Vec<Project>, SetupError> {
    let raw = std::fs::read(path).map_err(|source| SetupError::ProjectData {
        path: path.to_string(),
        source,
    })?;

    serde_json::from_slice(&raw).map_err(|source| SetupError::ProjectParse {
        path: path.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_project_list() {
        let json = r#"[
            {
                "name": "Sample",
                "description": "A sample project",
                "technologies": ["Rust", "Tokio"],
                "link": "https://example.com/sample"
            }
        ]"#;

        let projects: Vec<Project> = serde_json::from_str(json).expect("valid project JSON");
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].name, "Sample");
        assert_eq!(projects[0].technologies, vec!["Rust", "Tokio"]);
    }

    #[test]
    fn test_load_projects_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            r#"[{{"name":"A","description":"d","technologies":[],"link":"l"}}]"#
        )
        .expect("write temp file");

        let projects =
            load_projects(file.path().to_str().expect("utf-8 path")).expect("load succeeds");
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].name, "A");
    }

    #[test]
    fn test_load_projects_missing_file() {
        let err = load_projects("no/such/file.json").expect_err("missing file should fail");
        assert!(matches!(err, SetupError::ProjectData { .. }));
    }

    #[test]
    fn test_load_projects_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "not json").expect("write temp file");

        let err = load_projects(file.path().to_str().expect("utf-8 path"))
            .expect_err("invalid JSON should fail");
        assert!(matches!(err, SetupError::ProjectParse { .. }));
    }

    #[test]
    fn test_shipped_data_file_parses() {
        let projects = load_projects("data/projects.json").expect("shipped data should parse");
        assert!(!projects.is_empty());
    }
}
