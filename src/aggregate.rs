//! The aggregation pass: flat records in, render manifest out.
//!
//! This is the stage's core and its only entry point is [`aggregate`]. The
//! pass is single-threaded, synchronous, and deterministic: records are
//! grouped by component, each group is dispatched by document kind to the
//! classifier or the demo builder, and the results are assembled into one
//! ordered entry list. Running it twice on the same input yields the same
//! manifest, field for field.
//!
//! ## Ordering invariants
//!
//! All observable orders derive from first appearance in the input:
//! components in the order their ids first occur, demos in the order their
//! ids first occur within a component, and doc partitions in the order
//! their kinds first occur. The only reordering is the readme-first stable
//! sort of each component's docs.
//!
//! ## Accumulation
//!
//! Handlers return their results; a `ManifestBuilder` owned by the pass is
//! the single place emitted entries land. Nothing is published until the
//! whole pass succeeds — a malformed demo aborts with no partial manifest.

use crate::classify::{ComponentDoc, classify_doc};
use crate::config::AggregateOptions;
use crate::demo::{Demo, DemoError, FileRecord, build_demos};
use crate::paths::{ComponentContext, PathError, join_path};
use crate::types::{DocType, DocumentRecord};
use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;

/// Template identifier for a component's own page.
pub const COMPONENT_TEMPLATE: &str = "component.template.html";
/// Template identifier for the generated components-data artifact.
pub const COMPONENTS_DATA_TEMPLATE: &str = "components-data.template.js";
/// Fixed output path of the components-data artifact.
pub const COMPONENTS_DATA_PATH: &str = "js/components-data.js";

#[derive(Error, Debug)]
pub enum AggregateError {
    #[error("component \"{component}\": {source}")]
    Demo {
        component: String,
        source: DemoError,
    },
    #[error("Path template error: {0}")]
    Path(#[from] PathError),
}

/// A documented component: id, display name, classified docs, and demos.
///
/// Doubles as its own index-page manifest entry, so it carries a template
/// and an output path like every other entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub id: String,
    pub name: String,
    pub docs: Vec<ComponentDoc>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub demos: Vec<Demo>,
    pub template: String,
    pub output_path: String,
}

/// Trailing manifest entry carrying the full ordered components list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentsData {
    pub template: String,
    pub output_path: String,
    pub components: Vec<Component>,
}

/// One unit of the final output list.
///
/// Serializes untagged: each entry is just its payload object, which always
/// carries `template` and `outputPath` for the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RenderManifestEntry {
    Doc(ComponentDoc),
    DemoFile(FileRecord),
    ComponentPage(Component),
    ComponentsData(ComponentsData),
}

impl RenderManifestEntry {
    /// Template identifier consumed by the rendering stage.
    pub fn template(&self) -> &str {
        match self {
            RenderManifestEntry::Doc(doc) => &doc.template,
            RenderManifestEntry::DemoFile(file) => &file.template,
            RenderManifestEntry::ComponentPage(component) => &component.template,
            RenderManifestEntry::ComponentsData(data) => &data.template,
        }
    }

    /// Destination path, forward-slash separated.
    pub fn output_path(&self) -> &str {
        match self {
            RenderManifestEntry::Doc(doc) => &doc.output_path,
            RenderManifestEntry::DemoFile(file) => &file.output_path,
            RenderManifestEntry::ComponentPage(component) => &component.output_path,
            RenderManifestEntry::ComponentsData(data) => &data.output_path,
        }
    }
}

/// Accumulator for the pass. Entries append in emission order and are only
/// handed out when the whole pass has succeeded.
#[derive(Debug, Default)]
struct ManifestBuilder {
    entries: Vec<RenderManifestEntry>,
}

impl ManifestBuilder {
    fn push(&mut self, entry: RenderManifestEntry) {
        self.entries.push(entry);
    }
}

/// Run the aggregation pass over the concatenated input records.
///
/// Returns the ordered manifest entry list; the last entry is always the
/// components-data manifest carrying every emitted component.
pub fn aggregate(
    records: Vec<DocumentRecord>,
    options: &AggregateOptions,
) -> Result<Vec<RenderManifestEntry>, AggregateError> {
    let mut builder = ManifestBuilder::default();
    let mut components: Vec<Component> = Vec::new();

    for (component_id, group) in group_by_component(records) {
        // Components are only materialized when they have a live demo.
        if !group.iter().any(|r| r.doc_type == DocType::Demo) {
            continue;
        }
        let component = build_component(component_id, group, options, &mut builder)?;
        builder.push(RenderManifestEntry::ComponentPage(component.clone()));
        components.push(component);
    }

    builder.push(RenderManifestEntry::ComponentsData(ComponentsData {
        template: COMPONENTS_DATA_TEMPLATE.to_string(),
        output_path: COMPONENTS_DATA_PATH.to_string(),
        components,
    }));

    Ok(builder.entries)
}

/// Partition records by component id, preserving first-seen id order.
fn group_by_component(records: Vec<DocumentRecord>) -> Vec<(String, Vec<DocumentRecord>)> {
    let mut groups: Vec<(String, Vec<DocumentRecord>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for record in records {
        match index.get(&record.component_id) {
            Some(&i) => groups[i].1.push(record),
            None => {
                index.insert(record.component_id.clone(), groups.len());
                groups.push((record.component_id.clone(), vec![record]));
            }
        }
    }
    groups
}

/// Partition one component's records by kind, preserving the order in which
/// distinct kinds first appear.
fn partition_by_doc_type(records: Vec<DocumentRecord>) -> Vec<(DocType, Vec<DocumentRecord>)> {
    let mut partitions: Vec<(DocType, Vec<DocumentRecord>)> = Vec::new();
    for record in records {
        match partitions.iter_mut().find(|(t, _)| *t == record.doc_type) {
            Some((_, partition)) => partition.push(record),
            None => partitions.push((record.doc_type, vec![record])),
        }
    }
    partitions
}

/// Dispatch one component's records and assemble the component.
fn build_component(
    component_id: String,
    group: Vec<DocumentRecord>,
    options: &AggregateOptions,
    builder: &mut ManifestBuilder,
) -> Result<Component, AggregateError> {
    let component_name = group[0].component_name.clone();
    let context = ComponentContext {
        id: &component_id,
        name: &component_name,
    };

    let mut docs: Vec<ComponentDoc> = Vec::new();
    let mut demos: Vec<Demo> = Vec::new();

    let renderable = group
        .into_iter()
        .filter(|r| r.doc_type != DocType::Module);

    for (doc_type, partition) in partition_by_doc_type(renderable.collect()) {
        match doc_type {
            DocType::Demo => {
                demos = build_demos(&partition, context, &options.doc_output_folder).map_err(
                    |source| AggregateError::Demo {
                        component: component_id.clone(),
                        source,
                    },
                )?;
                for demo in &demos {
                    builder.push(RenderManifestEntry::DemoFile(demo.index_file.clone()));
                    for file in &demo.files {
                        builder.push(RenderManifestEntry::DemoFile(file.clone()));
                    }
                }
            }
            DocType::Readme | DocType::Directive | DocType::Service | DocType::Object => {
                for record in &partition {
                    let doc = classify_doc(record, context, &options.doc_output_folder)?;
                    builder.push(RenderManifestEntry::Doc(doc.clone()));
                    docs.push(doc);
                }
            }
            // Modules were stripped above; unrecognized kinds are dropped
            // without error.
            DocType::Module | DocType::Unknown => {}
        }
    }

    // Stable sort: the readme leads, everything else keeps dispatch order.
    docs.sort_by_key(|doc| doc.doc_type != DocType::Readme);

    let folder = options.component_output_folder.expand(context, None)?;
    Ok(Component {
        id: component_id,
        name: component_name,
        docs,
        demos,
        template: COMPONENT_TEMPLATE.to_string(),
        output_path: join_path(&folder, "index.html"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{default_options, demo_file, entry_paths, find_component, named_doc};

    fn run(records: Vec<DocumentRecord>) -> Vec<RenderManifestEntry> {
        aggregate(records, &default_options()).unwrap()
    }

    fn basic_button() -> Vec<DocumentRecord> {
        vec![
            demo_file("btn", "basic", "index.html", Some("html")),
            demo_file("btn", "basic", "script.js", Some("js")),
            named_doc("btn", "Button", DocType::Readme, "overview"),
        ]
    }

    #[test]
    fn end_to_end_button_scenario() {
        let entries = run(basic_button());

        let templates: Vec<&str> = entries.iter().map(|e| e.template()).collect();
        assert_eq!(
            templates,
            vec![
                crate::demo::DEMO_INDEX_TEMPLATE,
                crate::demo::DEMO_FILE_TEMPLATE,
                crate::classify::DOC_TEMPLATE,
                COMPONENT_TEMPLATE,
                COMPONENTS_DATA_TEMPLATE,
            ]
        );
        assert_eq!(
            entry_paths(&entries),
            vec![
                "components/btn/basic/index.html",
                "components/btn/basic/script.js",
                "components/btn/overview/index.html",
                "components/btn/index.html",
                "js/components-data.js",
            ]
        );

        let component = find_component(&entries, "btn");
        assert_eq!(component.name, "Button");
        assert_eq!(component.docs.len(), 1);
        assert_eq!(component.docs[0].doc_type, DocType::Readme);
        assert_eq!(component.demos.len(), 1);

        let demo = &component.demos[0];
        assert_eq!(demo.id, "basic");
        assert_eq!(demo.files.len(), 1);
        assert_eq!(demo.js.len(), 1);
        assert!(demo.css.is_empty());
    }

    #[test]
    fn component_without_demo_produces_nothing() {
        let records = vec![named_doc("btn", "Button", DocType::Readme, "overview")];
        let entries = run(records);
        // Only the trailing components-data entry, carrying no components.
        assert_eq!(entries.len(), 1);
        match &entries[0] {
            RenderManifestEntry::ComponentsData(data) => assert!(data.components.is_empty()),
            other => panic!("expected components-data, got {other:?}"),
        }
    }

    #[test]
    fn module_records_are_stripped() {
        let mut records = basic_button();
        records.push(named_doc("btn", "Button", DocType::Module, "btnModule"));
        let entries = run(records);
        let component = find_component(&entries, "btn");
        assert_eq!(component.docs.len(), 1);
        assert_eq!(entries.len(), 5);
    }

    #[test]
    fn unknown_doc_types_are_dropped_silently() {
        let mut records = basic_button();
        records.push(named_doc("btn", "Button", DocType::Unknown, "mystery"));
        let entries = run(records);
        assert_eq!(entries.len(), 5);
    }

    #[test]
    fn grouping_assigns_every_doc_to_its_component() {
        let records = vec![
            demo_file("btn", "basic", "index.html", Some("html")),
            demo_file("input", "basic", "index.html", Some("html")),
            named_doc("input", "Input", DocType::Readme, "overview"),
            named_doc("btn", "Button", DocType::Readme, "overview"),
        ];
        let entries = run(records);

        let btn = find_component(&entries, "btn");
        let input = find_component(&entries, "input");
        assert!(btn.docs.iter().all(|d| d.component_id == "btn"));
        assert!(input.docs.iter().all(|d| d.component_id == "input"));
    }

    #[test]
    fn components_keep_first_seen_order() {
        let records = vec![
            demo_file("zeta", "a", "index.html", Some("html")),
            demo_file("alpha", "a", "index.html", Some("html")),
            demo_file("zeta", "a", "script.js", Some("js")),
        ];
        let entries = run(records);
        match entries.last().unwrap() {
            RenderManifestEntry::ComponentsData(data) => {
                let ids: Vec<&str> = data.components.iter().map(|c| c.id.as_str()).collect();
                assert_eq!(ids, vec!["zeta", "alpha"]);
            }
            other => panic!("expected components-data, got {other:?}"),
        }
    }

    #[test]
    fn readme_sorts_first_others_keep_order() {
        let records = vec![
            demo_file("btn", "basic", "index.html", Some("html")),
            named_doc("btn", "Button", DocType::Service, "ButtonService"),
            named_doc("btn", "Button", DocType::Directive, "myButton"),
            named_doc("btn", "Button", DocType::Readme, "overview"),
            named_doc("btn", "Button", DocType::Object, "ButtonConfig"),
        ];
        let entries = run(records);
        let component = find_component(&entries, "btn");
        let kinds: Vec<DocType> = component.docs.iter().map(|d| d.doc_type).collect();
        assert_eq!(
            kinds,
            vec![
                DocType::Readme,
                DocType::Service,
                DocType::Directive,
                DocType::Object,
            ]
        );
    }

    #[test]
    fn component_page_entry_matches_components_data() {
        let entries = run(basic_button());
        let page = entries
            .iter()
            .find_map(|e| match e {
                RenderManifestEntry::ComponentPage(c) => Some(c),
                _ => None,
            })
            .unwrap();
        assert_eq!(page.output_path, "components/btn/index.html");
        assert_eq!(page, find_component(&entries, "btn"));
    }

    #[test]
    fn components_data_is_always_last() {
        let entries = run(basic_button());
        let last = entries.last().unwrap();
        assert_eq!(last.template(), COMPONENTS_DATA_TEMPLATE);
        assert_eq!(last.output_path(), COMPONENTS_DATA_PATH);
    }

    #[test]
    fn page_entries_end_in_index_html() {
        let entries = run(basic_button());
        for entry in &entries {
            match entry {
                RenderManifestEntry::Doc(_) | RenderManifestEntry::ComponentPage(_) => {
                    assert!(entry.output_path().ends_with("index.html"));
                }
                _ => {}
            }
        }
    }

    #[test]
    fn malformed_demo_names_component_and_demo() {
        let records = vec![demo_file("btn", "broken", "script.js", Some("js"))];
        let err = aggregate(records, &default_options()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("btn"));
        assert!(message.contains("broken"));
    }

    #[test]
    fn concatenated_lists_aggregate_like_one() {
        let mut first = vec![
            demo_file("btn", "basic", "index.html", Some("html")),
            named_doc("btn", "Button", DocType::Readme, "overview"),
        ];
        let second = vec![demo_file("btn", "basic", "script.js", Some("js"))];

        let mut concatenated = first.clone();
        concatenated.extend(second.clone());
        first.extend(second);

        assert_eq!(run(concatenated), run(first));
    }

    #[test]
    fn aggregation_is_idempotent() {
        let records = basic_button();
        assert_eq!(run(records.clone()), run(records));
    }

    #[test]
    fn demo_entries_precede_doc_entries_when_demos_come_first() {
        // Partition order follows first appearance of each kind.
        let entries = run(basic_button());
        assert_eq!(entries[0].template(), crate::demo::DEMO_INDEX_TEMPLATE);
        assert_eq!(entries[2].template(), crate::classify::DOC_TEMPLATE);
    }

    #[test]
    fn untagged_serialization_exposes_template_and_output_path() {
        let entries = run(basic_button());
        let json = serde_json::to_value(&entries).unwrap();
        let array = json.as_array().unwrap();
        assert_eq!(array.len(), entries.len());
        for value in array {
            assert!(value.get("template").is_some());
            assert!(value.get("outputPath").is_some());
        }
    }
}
