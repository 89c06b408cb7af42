// Application state module
// Immutable process-wide state shared by every request handler

use tera::Tera;

use super::types::Config;
use crate::error::SetupError;
use crate::site::projects::{self, Project};

/// Application state
///
/// Built once at startup and shared behind an `Arc`. Nothing in here is
/// mutated after construction, so handlers read it without locking.
pub struct AppState {
    pub config: Config,
    pub templates: Tera,
    pub projects: Vec<Project>,
}

impl AppState {
    /// Load templates and project data, failing fast on either.
    pub fn new(config: Config) -> Result<Self, SetupError> {
        let templates = Tera::new(&config.site.templates)?;
        let projects = projects::load_projects(&config.site.projects_file)?;

        Ok(Self {
            config,
            templates,
            projects,
        })
    }
}
