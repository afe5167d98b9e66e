//! Shared input types for the aggregation stage.
//!
//! Documentation records arrive as a JSON array produced by the upstream
//! extractor. The wire form is camelCase; any extra fields the extractor
//! attaches (source locations, parser state) are ignored here so this stage
//! never grows a dependency on extraction internals.

use serde::{Deserialize, Serialize};

/// Kind tag on a raw documentation record.
///
/// The set is closed. Anything else on the wire collapses into
/// [`DocType::Unknown`] and is dropped during dispatch, which is also how
/// future kinds degrade: silently, never as an error. `module` records carry
/// no renderable content and are stripped before classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocType {
    Module,
    Readme,
    Directive,
    Service,
    Object,
    Demo,
    #[serde(other)]
    Unknown,
}

impl DocType {
    /// Wire label, usable in path-template contexts and CLI output.
    pub fn as_str(self) -> &'static str {
        match self {
            DocType::Module => "module",
            DocType::Readme => "readme",
            DocType::Directive => "directive",
            DocType::Service => "service",
            DocType::Object => "object",
            DocType::Demo => "demo",
            DocType::Unknown => "unknown",
        }
    }
}

/// One extracted documentation record.
///
/// Only `componentId`, `componentName`, and `docType` are guaranteed; the
/// rest are kind-specific. Demo records carry `id` (the demo grouping key),
/// `basePath`, and `fileType`; prose kinds carry `name`, `description`,
/// `content`, and the directive metadata fields. `params` and `usage` are
/// passed through opaquely for the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    pub component_id: String,
    pub component_name: String,
    pub doc_type: DocType,
    /// Demo grouping key (demo records only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Path of a demo file relative to its demo's output folder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,
    /// Asset kind of a demo file (`"js"`, `"css"`, `"html"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restrict: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<serde_json::Value>,
}
