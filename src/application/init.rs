//! Initialize configuration directory use case

use crate::error::Result;
use crate::infrastructure::{ConfigRepository, FileSystemRepository};

/// Service for creating the configuration directory
pub struct InitService;

impl InitService {
    /// Create the configuration directory, or restore it when `reset` is set
    pub fn execute(repository: &FileSystemRepository, reset: bool) -> Result<()> {
        if reset {
            repository.reset()
        } else {
            repository.initialize()
        }
    }
}
