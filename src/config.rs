//! Stage configuration module.
//!
//! Handles loading and validating `docweave.toml`. The file is sparse —
//! every option has a stock default, so a missing file is valid and an
//! override need only name the values it changes. Unknown keys are rejected
//! to catch typos early.
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! # Output folder template for a component's own page.
//! # May reference {component.id} and {component.name} only.
//! component_output_folder = "components/{component.id}"
//!
//! # Folder template for a document or demo, joined under
//! # component_output_folder. May also reference {doc.id} (demos),
//! # {doc.name}, and {doc.doc-type} (classified docs).
//! doc_sub_folder = "{doc.name}"
//!
//! [source]
//! # repository = "https://github.com/acme/widgets"
//! # project_path = "src/components"
//! ```
//!
//! Path templates are parsed and scope-checked here, at load time, so a
//! misspelled placeholder aborts before any records are read.

use crate::paths::{PathError, PathTemplate};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
    #[error("Path template error: {0}")]
    Template(#[from] PathError),
}

/// Aggregation stage configuration loaded from `docweave.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StageConfig {
    /// Output folder template for a component's own page.
    pub component_output_folder: String,
    /// Folder template for a document/demo, joined under
    /// `component_output_folder`.
    pub doc_sub_folder: String,
    /// Source repository info, passed through to reporting only.
    pub source: SourceConfig,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            component_output_folder: "components/{component.id}".to_string(),
            doc_sub_folder: "{doc.name}".to_string(),
            source: SourceConfig::default(),
        }
    }
}

/// Where the documented components live. Informational only — the core
/// never reads it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceConfig {
    /// Repository URL.
    pub repository: Option<String>,
    /// Project path within the repository.
    pub project_path: Option<String>,
}

/// Parsed, validated path templates ready for the aggregation pass.
#[derive(Debug, Clone)]
pub struct AggregateOptions {
    /// Folder for a component's own page; component scope only.
    pub component_output_folder: PathTemplate,
    /// Folder for a document or demo:
    /// `component_output_folder` / `doc_sub_folder`.
    pub doc_output_folder: PathTemplate,
}

impl StageConfig {
    /// Validate templates without resolving them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.resolve().map(|_| ())
    }

    /// Parse and scope-check both templates.
    pub fn resolve(&self) -> Result<AggregateOptions, ConfigError> {
        if self.component_output_folder.is_empty() {
            return Err(ConfigError::Validation(
                "component_output_folder must not be empty".into(),
            ));
        }
        if self.doc_sub_folder.is_empty() {
            return Err(ConfigError::Validation(
                "doc_sub_folder must not be empty".into(),
            ));
        }

        let component_output_folder = PathTemplate::parse(&self.component_output_folder)?;
        if component_output_folder.references_doc() {
            return Err(ConfigError::Validation(format!(
                "component_output_folder \"{}\" may only reference {{component.*}} placeholders",
                self.component_output_folder
            )));
        }
        let doc_sub_folder = PathTemplate::parse(&self.doc_sub_folder)?;

        Ok(AggregateOptions {
            doc_output_folder: component_output_folder.join(&doc_sub_folder),
            component_output_folder,
        })
    }
}

/// Load config from `path`, falling back to stock defaults when the file
/// does not exist.
pub fn load(path: &Path) -> Result<StageConfig, ConfigError> {
    if !path.exists() {
        let config = StageConfig::default();
        config.validate()?;
        return Ok(config);
    }

    let content = fs::read_to_string(path)?;
    let config: StageConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Stock `docweave.toml` with every option documented, for `gen-config`.
pub fn stock_config_toml() -> String {
    let defaults = StageConfig::default();
    format!(
        r#"# docweave configuration
# All options are optional - defaults shown below.

# Output folder template for a component's own page.
# May reference {{component.id}} and {{component.name}} only.
component_output_folder = "{}"

# Folder template for a document or demo, joined under
# component_output_folder. May also reference {{doc.id}} (demos),
# {{doc.name}}, and {{doc.doc-type}} (classified docs).
doc_sub_folder = "{}"

# Where the documented components live. Informational only.
[source]
# repository = "https://github.com/acme/widgets"
# project_path = "src/components"
"#,
        defaults.component_output_folder, defaults.doc_sub_folder
    )
}
