//! Classification of prose documentation records.
//!
//! A classified doc is the renderable projection of a `readme`, `directive`,
//! `service`, or `object` record: extraction-only metadata is dropped, a
//! human-readable label is computed, and the output path is assigned. Demo
//! records never pass through here — they have their own builder in
//! [`crate::demo`].

use crate::paths::{ComponentContext, DocContext, PathError, PathTemplate, join_path};
use crate::types::{DocType, DocumentRecord};
use serde::Serialize;

/// Template identifier for classified doc pages.
pub const DOC_TEMPLATE: &str = "doc.template.html";

/// A documentation page belonging to a component.
///
/// The field set is the fixed renderable subset of [`DocumentRecord`] plus
/// the computed `humanName`, `outputPath`, and `template`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDoc {
    pub component_id: String,
    pub component_name: String,
    pub doc_type: DocType,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restrict: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<serde_json::Value>,
    pub human_name: String,
    pub template: String,
    pub output_path: String,
}

/// Classify one prose record: project, label, and assign its output path.
pub fn classify_doc(
    record: &DocumentRecord,
    component: ComponentContext<'_>,
    doc_output_folder: &PathTemplate,
) -> Result<ComponentDoc, PathError> {
    let name = record.name.clone().unwrap_or_default();

    let human_name = match record.doc_type {
        // dash-case for directives: myFancyWidget → my-fancy-widget
        DocType::Directive => dash_case(&name),
        DocType::Readme => "Overview".to_string(),
        _ => name.clone(),
    };

    let doc_context = DocContext::for_doc(&name, record.doc_type.as_str());
    let folder = doc_output_folder.expand(component, Some(doc_context))?;

    Ok(ComponentDoc {
        component_id: record.component_id.clone(),
        component_name: record.component_name.clone(),
        doc_type: record.doc_type,
        name,
        description: record.description.clone(),
        content: record.content.clone(),
        params: record.params.clone(),
        restrict: record.restrict.clone(),
        element: record.element.clone(),
        priority: record.priority,
        usage: record.usage.clone(),
        human_name,
        template: DOC_TEMPLATE.to_string(),
        output_path: join_path(&folder, "index.html"),
    })
}

/// Insert a dash before each ASCII uppercase letter and lowercase it.
fn dash_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{default_options, named_doc};

    fn button() -> ComponentContext<'static> {
        ComponentContext {
            id: "btn",
            name: "Button",
        }
    }

    #[test]
    fn directive_name_is_dash_cased() {
        let record = named_doc("btn", "Button", DocType::Directive, "myFancyWidget");
        let doc = classify_doc(&record, button(), &default_options().doc_output_folder).unwrap();
        assert_eq!(doc.human_name, "my-fancy-widget");
    }

    #[test]
    fn leading_capital_gets_leading_dash() {
        // Matches the extractor convention: names are medial-capital, so a
        // leading capital is treated like any other capital.
        assert_eq!(dash_case("MyWidget"), "-my-widget");
    }

    #[test]
    fn already_lowercase_name_unchanged() {
        assert_eq!(dash_case("widget"), "widget");
    }

    #[test]
    fn readme_label_is_overview() {
        let record = named_doc("btn", "Button", DocType::Readme, "readme");
        let doc = classify_doc(&record, button(), &default_options().doc_output_folder).unwrap();
        assert_eq!(doc.human_name, "Overview");
        assert_eq!(doc.name, "readme");
    }

    #[test]
    fn service_label_is_name_unchanged() {
        let record = named_doc("btn", "Button", DocType::Service, "ButtonService");
        let doc = classify_doc(&record, button(), &default_options().doc_output_folder).unwrap();
        assert_eq!(doc.human_name, "ButtonService");
    }

    #[test]
    fn output_path_ends_in_index_html() {
        let record = named_doc("btn", "Button", DocType::Readme, "overview");
        let doc = classify_doc(&record, button(), &default_options().doc_output_folder).unwrap();
        assert_eq!(doc.output_path, "components/btn/overview/index.html");
        assert_eq!(doc.template, DOC_TEMPLATE);
    }

    #[test]
    fn doc_type_placeholder_expands_from_record_kind() {
        let folder = PathTemplate::parse("components/{component.id}/{doc.doc-type}").unwrap();
        let record = named_doc("btn", "Button", DocType::Directive, "myBtn");
        let doc = classify_doc(&record, button(), &folder).unwrap();
        assert_eq!(doc.output_path, "components/btn/directive/index.html");
    }

    #[test]
    fn doc_id_placeholder_is_a_hard_error_for_prose_docs() {
        let folder = PathTemplate::parse("components/{doc.id}").unwrap();
        let record = named_doc("btn", "Button", DocType::Readme, "overview");
        let err = classify_doc(&record, button(), &folder).unwrap_err();
        assert!(matches!(err, PathError::Unbound { .. }));
    }

    #[test]
    fn projection_keeps_renderable_fields() {
        let mut record = named_doc("btn", "Button", DocType::Directive, "myBtn");
        record.description = Some("A button.".to_string());
        record.restrict = Some("E".to_string());
        record.priority = Some(1);
        let doc = classify_doc(&record, button(), &default_options().doc_output_folder).unwrap();
        assert_eq!(doc.description.as_deref(), Some("A button."));
        assert_eq!(doc.restrict.as_deref(), Some("E"));
        assert_eq!(doc.priority, Some(1));
    }
}
