//! Demo bundle construction.
//!
//! A demo is a runnable example for a component: one `index.html` page plus
//! any number of asset files. The extractor emits one record per file, all
//! tagged `docType = demo` and sharing the demo's `id`; this module
//! partitions those records per demo, designates the index file, assigns
//! output paths, and derives the js/css asset views the renderer links from
//! the index page.
//!
//! A demo with zero or multiple `index.html` records is malformed and fails
//! the run — picking one arbitrarily would silently render the wrong page.

use crate::paths::{ComponentContext, DocContext, PathError, PathTemplate, join_path};
use crate::types::DocumentRecord;
use serde::Serialize;
use thiserror::Error;

/// Template identifier for a demo's index page.
pub const DEMO_INDEX_TEMPLATE: &str = "demo/template.index.html";
/// Template identifier for a generic demo asset file.
pub const DEMO_FILE_TEMPLATE: &str = "demo/template.file";

/// The one file name that makes a record the demo's index.
const INDEX_BASE_PATH: &str = "index.html";

#[derive(Error, Debug)]
pub enum DemoError {
    #[error("demo \"{demo_id}\" must have exactly one index.html file, found {found}")]
    MalformedDemo { demo_id: String, found: usize },
    #[error(transparent)]
    Path(#[from] PathError),
}

/// A demo file with its rendering template and output path assigned.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    #[serde(flatten)]
    pub record: DocumentRecord,
    pub template: String,
    pub output_path: String,
}

/// A component demo: index page plus asset files.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Demo {
    pub id: String,
    pub name: String,
    pub index_file: FileRecord,
    pub files: Vec<FileRecord>,
    /// Script assets, filtered from `files` by `fileType`.
    pub js: Vec<FileRecord>,
    /// Style assets, filtered from `files` by `fileType`.
    pub css: Vec<FileRecord>,
}

/// Build all demos for one component from its demo-typed records.
///
/// Records are partitioned by demo id in first-seen order. Records without
/// an id share one unnamed group.
pub fn build_demos(
    records: &[DocumentRecord],
    component: ComponentContext<'_>,
    doc_output_folder: &PathTemplate,
) -> Result<Vec<Demo>, DemoError> {
    group_by_demo_id(records)
        .into_iter()
        .map(|(demo_id, group)| build_demo(demo_id, &group, component, doc_output_folder))
        .collect()
}

fn group_by_demo_id(records: &[DocumentRecord]) -> Vec<(String, Vec<&DocumentRecord>)> {
    let mut groups: Vec<(String, Vec<&DocumentRecord>)> = Vec::new();
    for record in records {
        let demo_id = record.id.as_deref().unwrap_or_default();
        match groups.iter_mut().find(|(id, _)| id == demo_id) {
            Some((_, group)) => group.push(record),
            None => groups.push((demo_id.to_string(), vec![record])),
        }
    }
    groups
}

fn build_demo(
    demo_id: String,
    group: &[&DocumentRecord],
    component: ComponentContext<'_>,
    doc_output_folder: &PathTemplate,
) -> Result<Demo, DemoError> {
    let name = group
        .first()
        .and_then(|record| record.name.clone())
        .unwrap_or_default();

    let demo_context = DocContext::for_demo(&demo_id, &name);
    let folder = doc_output_folder.expand(component, Some(demo_context))?;

    let (index_records, file_records): (Vec<&DocumentRecord>, Vec<&DocumentRecord>) = group
        .iter()
        .copied()
        .partition(|record| record.base_path.as_deref() == Some(INDEX_BASE_PATH));

    if index_records.len() != 1 {
        return Err(DemoError::MalformedDemo {
            demo_id,
            found: index_records.len(),
        });
    }
    let index_record = index_records[0];

    let make_file = |record: &DocumentRecord, template: &str| FileRecord {
        record: record.clone(),
        template: template.to_string(),
        output_path: join_path(&folder, record.base_path.as_deref().unwrap_or_default()),
    };

    let index_file = make_file(index_record, DEMO_INDEX_TEMPLATE);
    let files: Vec<FileRecord> = file_records
        .into_iter()
        .map(|record| make_file(record, DEMO_FILE_TEMPLATE))
        .collect();

    let by_type = |file_type: &str| -> Vec<FileRecord> {
        files
            .iter()
            .filter(|f| f.record.file_type.as_deref() == Some(file_type))
            .cloned()
            .collect()
    };
    let js = by_type("js");
    let css = by_type("css");

    Ok(Demo {
        id: demo_id,
        name,
        index_file,
        files,
        js,
        css,
    })
}
