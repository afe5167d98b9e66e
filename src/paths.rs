//! Output-path templates for the aggregation stage.
//!
//! Configured folders like `components/{component.id}` are parsed once into
//! an explicit segment list — literal text and `{scope.field}` placeholders —
//! rather than fed to a general template engine. That keeps the failure modes
//! small and checkable: a misspelled placeholder is rejected when the config
//! is loaded, and a placeholder the expansion context cannot satisfy is a
//! hard error, never an empty substitution.
//!
//! ## Placeholders
//!
//! | placeholder | bound to |
//! |---|---|
//! | `{component.id}` | owning component's id |
//! | `{component.name}` | owning component's display name |
//! | `{doc.id}` | demo id (demos only) |
//! | `{doc.name}` | document or demo name |
//! | `{doc.doc-type}` | document kind label (classified docs only) |
//!
//! All produced paths are forward-slash strings; nothing here touches the
//! filesystem.

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum PathError {
    #[error("unclosed '{{' in path template \"{template}\"")]
    UnclosedBrace { template: String },
    #[error("unknown placeholder \"{{{placeholder}}}\" in path template \"{template}\"")]
    UnknownPlaceholder {
        template: String,
        placeholder: String,
    },
    #[error(
        "placeholder \"{{{placeholder}}}\" has no value in this context (template \"{template}\")"
    )]
    Unbound {
        template: String,
        placeholder: String,
    },
}

/// Scope a placeholder reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Component,
    Doc,
}

/// Field a placeholder reads within its scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Id,
    Name,
    DocType,
}

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Literal(String),
    Placeholder { scope: Scope, field: Field },
}

impl Segment {
    fn placeholder_label(scope: Scope, field: Field) -> String {
        let scope = match scope {
            Scope::Component => "component",
            Scope::Doc => "doc",
        };
        let field = match field {
            Field::Id => "id",
            Field::Name => "name",
            Field::DocType => "doc-type",
        };
        format!("{scope}.{field}")
    }
}

/// Component-side expansion context.
#[derive(Debug, Clone, Copy)]
pub struct ComponentContext<'a> {
    pub id: &'a str,
    pub name: &'a str,
}

/// Document-side expansion context.
///
/// Classified docs bind `name` and `doc_type`; demos bind `id` and `name`.
/// Absent fields make the corresponding placeholder unbound.
#[derive(Debug, Clone, Copy)]
pub struct DocContext<'a> {
    pub id: Option<&'a str>,
    pub name: &'a str,
    pub doc_type: Option<&'a str>,
}

impl<'a> DocContext<'a> {
    /// Context for a classified (non-demo) document.
    pub fn for_doc(name: &'a str, doc_type: &'a str) -> Self {
        DocContext {
            id: None,
            name,
            doc_type: Some(doc_type),
        }
    }

    /// Context for a demo.
    pub fn for_demo(id: &'a str, name: &'a str) -> Self {
        DocContext {
            id: Some(id),
            name,
            doc_type: None,
        }
    }
}

/// A parsed output-path template.
#[derive(Debug, Clone, PartialEq)]
pub struct PathTemplate {
    raw: String,
    segments: Vec<Segment>,
}

impl PathTemplate {
    /// Parse a template string, validating every placeholder.
    pub fn parse(template: &str) -> Result<PathTemplate, PathError> {
        let mut segments = Vec::new();
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            if !rest[..open].is_empty() {
                segments.push(Segment::Literal(rest[..open].to_string()));
            }
            let after_open = &rest[open + 1..];
            let close = after_open
                .find('}')
                .ok_or_else(|| PathError::UnclosedBrace {
                    template: template.to_string(),
                })?;
            let placeholder = &after_open[..close];
            segments.push(parse_placeholder(template, placeholder)?);
            rest = &after_open[close + 1..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        Ok(PathTemplate {
            raw: template.to_string(),
            segments,
        })
    }

    /// The original template string.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Whether any placeholder reads from the `doc` scope.
    ///
    /// The component-page folder is expanded with no document bound, so a
    /// `doc` placeholder there is a configuration mistake worth rejecting
    /// at load time.
    pub fn references_doc(&self) -> bool {
        self.segments.iter().any(|s| {
            matches!(
                s,
                Segment::Placeholder {
                    scope: Scope::Doc,
                    ..
                }
            )
        })
    }

    /// Append another template under this one, separated by `/`.
    pub fn join(&self, tail: &PathTemplate) -> PathTemplate {
        let mut segments = self.segments.clone();
        if !segments.is_empty() && !tail.segments.is_empty() {
            segments.push(Segment::Literal("/".to_string()));
        }
        segments.extend(tail.segments.iter().cloned());
        PathTemplate {
            raw: format!("{}/{}", self.raw, tail.raw),
            segments,
        }
    }

    /// Expand against a context, substituting every placeholder.
    pub fn expand(
        &self,
        component: ComponentContext<'_>,
        doc: Option<DocContext<'_>>,
    ) -> Result<String, PathError> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder { scope, field } => {
                    let value = match scope {
                        Scope::Component => match field {
                            Field::Id => Some(component.id),
                            Field::Name => Some(component.name),
                            Field::DocType => None,
                        },
                        Scope::Doc => match doc {
                            None => None,
                            Some(doc) => match field {
                                Field::Id => doc.id,
                                Field::Name => Some(doc.name),
                                Field::DocType => doc.doc_type,
                            },
                        },
                    };
                    let value = value.ok_or_else(|| PathError::Unbound {
                        template: self.raw.clone(),
                        placeholder: Segment::placeholder_label(*scope, *field),
                    })?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }
}

fn parse_placeholder(template: &str, placeholder: &str) -> Result<Segment, PathError> {
    let unknown = || PathError::UnknownPlaceholder {
        template: template.to_string(),
        placeholder: placeholder.to_string(),
    };
    let (scope, field) = placeholder.split_once('.').ok_or_else(unknown)?;
    let scope = match scope {
        "component" => Scope::Component,
        "doc" => Scope::Doc,
        _ => return Err(unknown()),
    };
    let field = match (scope, field) {
        (_, "id") => Field::Id,
        (_, "name") => Field::Name,
        // doc-type only exists on the document side
        (Scope::Doc, "doc-type") => Field::DocType,
        _ => return Err(unknown()),
    };
    Ok(Segment::Placeholder { scope, field })
}

/// Join two path fragments with exactly one `/` between non-empty parts.
pub fn join_path(base: &str, tail: &str) -> String {
    let base = base.trim_end_matches('/');
    let tail = tail.trim_start_matches('/');
    match (base.is_empty(), tail.is_empty()) {
        (true, _) => tail.to_string(),
        (_, true) => base.to_string(),
        _ => format!("{base}/{tail}"),
    }
}
