//! Shared test utilities for the docweave test suite.
//!
//! Provides record builders and manifest lookup helpers used across the
//! unit-test modules. Builders produce the minimal record for each kind;
//! tests set extra fields directly on the returned value.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let records = vec![
//!     demo_file("btn", "basic", "index.html", Some("html")),
//!     named_doc("btn", "Button", DocType::Readme, "overview"),
//! ];
//! let entries = aggregate(records, &default_options()).unwrap();
//! let component = find_component(&entries, "btn");
//! ```

use crate::aggregate::{Component, RenderManifestEntry};
use crate::config::{AggregateOptions, StageConfig};
use crate::types::{DocType, DocumentRecord};

// =========================================================================
// Record builders
// =========================================================================

/// A bare record with only the guaranteed fields set.
pub fn record(component_id: &str, component_name: &str, doc_type: DocType) -> DocumentRecord {
    DocumentRecord {
        component_id: component_id.to_string(),
        component_name: component_name.to_string(),
        doc_type,
        id: None,
        name: None,
        base_path: None,
        file_type: None,
        content: None,
        description: None,
        params: None,
        restrict: None,
        element: None,
        priority: None,
        usage: None,
    }
}

/// A prose record (`readme`, `directive`, `service`, `object`) with a name.
pub fn named_doc(
    component_id: &str,
    component_name: &str,
    doc_type: DocType,
    name: &str,
) -> DocumentRecord {
    let mut doc = record(component_id, component_name, doc_type);
    doc.name = Some(name.to_string());
    doc
}

/// A demo file record. The demo is named after its id, and the component
/// name is the title-cased id — enough identity for path assertions.
pub fn demo_file(
    component_id: &str,
    demo_id: &str,
    base_path: &str,
    file_type: Option<&str>,
) -> DocumentRecord {
    let mut component_name: String = component_id.to_string();
    if let Some(first) = component_name.get_mut(..1) {
        first.make_ascii_uppercase();
    }
    let mut doc = record(component_id, &component_name, DocType::Demo);
    doc.id = Some(demo_id.to_string());
    doc.name = Some(demo_id.to_string());
    doc.base_path = Some(base_path.to_string());
    doc.file_type = file_type.map(str::to_string);
    doc
}

// =========================================================================
// Options
// =========================================================================

/// Stock configuration resolved into aggregation options.
pub fn default_options() -> AggregateOptions {
    StageConfig::default().resolve().unwrap()
}

// =========================================================================
// Manifest lookups — panic with a clear message on miss
// =========================================================================

/// Find a component by id in the trailing components-data entry.
/// Panics if not found.
pub fn find_component<'a>(entries: &'a [RenderManifestEntry], id: &str) -> &'a Component {
    let components = match entries.last() {
        Some(RenderManifestEntry::ComponentsData(data)) => &data.components,
        other => panic!("manifest does not end in components-data, last entry: {other:?}"),
    };
    components.iter().find(|c| c.id == id).unwrap_or_else(|| {
        let ids: Vec<&str> = components.iter().map(|c| c.id.as_str()).collect();
        panic!("component '{id}' not found. Available: {ids:?}")
    })
}

/// All entry output paths in manifest order.
pub fn entry_paths(entries: &[RenderManifestEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.output_path()).collect()
}
