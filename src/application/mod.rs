//! Application layer - Use cases and orchestration

pub mod init;
pub mod list_templates;
pub mod manage_config;
pub mod new_project;

pub use init::InitService;
pub use list_templates::ListTemplatesService;
pub use manage_config::ConfigService;
pub use new_project::{NewProjectOptions, NewProjectOutcome, NewProjectService};
