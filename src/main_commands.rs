//! Entry points shared by the `nimbus` binary.

use crate::configuration::Configuration;
use crate::publisher::Publisher;
use crate::tag_registry::TagRegistry;
use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct MainCommands {
    pub config: Arc<Configuration>,
}

impl MainCommands {
    pub fn new(config: Configuration) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Run the publishing daemon until the process is stopped.
    pub async fn run_daemon(&self) -> Result<()> {
        Publisher::new(self.config.clone())?.run().await
    }

    /// Render one template against the current state and print or write it.
    pub async fn render_once(&self, template: &Path, output: Option<&Path>) -> Result<()> {
        let publisher = Publisher::new(self.config.clone())?;
        let text = publisher.render_to_string(template).await?;
        match output {
            Some(path) => std::fs::write(path, text)?,
            None => print!("{text}"),
        }
        Ok(())
    }

    /// Print every registered webtag name, one per line.
    pub fn list_tags() {
        let registry = TagRegistry::new();
        for name in registry.names() {
            println!("{name}");
        }
    }
}
