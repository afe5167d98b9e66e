//! CLI output formatting for the aggregation stage.
//!
//! Output is information-centric: the primary display for every component is
//! its name and position, with output paths shown as `→` destinations. Each
//! stage summary follows a two-level pattern — a header line per component,
//! indented context lines for its docs and demos.
//!
//! ```text
//! Components
//! 001 Button → components/btn/index.html
//!     001 Overview → components/btn/overview/index.html
//!     demo basic (2 files) → components/btn/basic/index.html
//!
//! Aggregated 1 component, 1 doc, 1 demo into 5 manifest entries
//! ```
//!
//! Format functions are pure (return `Vec<String>`, no I/O) so they can be
//! asserted in tests; `print_*` wrappers write to stdout.

use crate::aggregate::{Component, RenderManifestEntry};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{pos:0>3}")
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// Components carried by the manifest's trailing components-data entry.
fn components_of(entries: &[RenderManifestEntry]) -> &[Component] {
    match entries.last() {
        Some(RenderManifestEntry::ComponentsData(data)) => &data.components,
        _ => &[],
    }
}

/// Format the aggregation summary for a finished manifest.
pub fn format_aggregate_output(entries: &[RenderManifestEntry]) -> Vec<String> {
    let components = components_of(entries);
    let mut lines = Vec::new();

    lines.push("Components".to_string());
    for (i, component) in components.iter().enumerate() {
        lines.push(format!(
            "{} {} → {}",
            format_index(i + 1),
            component.name,
            component.output_path
        ));
        for (j, doc) in component.docs.iter().enumerate() {
            lines.push(format!(
                "    {} {} → {}",
                format_index(j + 1),
                doc.human_name,
                doc.output_path
            ));
        }
        for demo in &component.demos {
            lines.push(format!(
                "    demo {} ({}) → {}",
                demo.name,
                plural(demo.files.len() + 1, "file"),
                demo.index_file.output_path
            ));
        }
    }

    let doc_count: usize = components.iter().map(|c| c.docs.len()).sum();
    let demo_count: usize = components.iter().map(|c| c.demos.len()).sum();
    let entry_noun = if entries.len() == 1 {
        "manifest entry"
    } else {
        "manifest entries"
    };
    lines.push(String::new());
    lines.push(format!(
        "Aggregated {}, {}, {} into {} {}",
        plural(components.len(), "component"),
        plural(doc_count, "doc"),
        plural(demo_count, "demo"),
        entries.len(),
        entry_noun
    ));
    lines
}

/// Print the aggregation summary to stdout.
pub fn print_aggregate_output(entries: &[RenderManifestEntry]) {
    for line in format_aggregate_output(entries) {
        println!("{line}");
    }
}
