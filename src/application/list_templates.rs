//! List installed templates use case

use crate::error::Result;
use crate::infrastructure::FileSystemRepository;

/// Service for listing templates
pub struct ListTemplatesService {
    repository: FileSystemRepository,
}

impl ListTemplatesService {
    pub fn new(repository: FileSystemRepository) -> Self {
        ListTemplatesService { repository }
    }

    pub fn execute(&self) -> Result<Vec<String>> {
        self.repository.list_templates()
    }
}
