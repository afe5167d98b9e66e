//! # docweave
//!
//! Aggregates extracted component documentation records into a
//! render-ready site manifest. Components (a UI widget, say) arrive as a
//! flat list of records — overviews, directive docs, services, demo files —
//! and leave as an ordered manifest of `(template, outputPath, data)`
//! entries for the rendering stage.
//!
//! # Architecture: One Stage of a Three-Stage Pipeline
//!
//! docweave is the middle stage of a documentation pipeline whose stages
//! exchange JSON manifests:
//!
//! ```text
//! 1. Extract    sources       →  records.json   (upstream, external)
//! 2. Aggregate  records.json  →  manifest.json  (docweave)
//! 3. Render     manifest.json →  site files     (downstream, external)
//! ```
//!
//! This separation exists for three reasons:
//!
//! - **Debuggability**: both hand-off files are human-readable JSON you can
//!   inspect.
//! - **Substitutability**: extractors and renderers come and go; the
//!   manifest contract stays put.
//! - **Testability**: the aggregation core is a pure function from record
//!   list to entry list, so tests never touch the filesystem.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`aggregate`] | The pass — grouping, dispatch, assembly, the manifest entry types |
//! | [`classify`] | Prose record classification: projection, labels, output paths |
//! | [`demo`] | Demo bundles: index designation, asset views, file paths |
//! | [`paths`] | Output-path templates: `{component.id}`-style placeholders |
//! | [`config`] | `docweave.toml` loading, validation, template resolution |
//! | [`types`] | Input record types shared with the extractor (`DocumentRecord`) |
//! | [`output`] | CLI output formatting — summary display of a finished manifest |
//!
//! # Design Decisions
//!
//! ## Parsed Path Templates Over a Template Engine
//!
//! Output folders are configured as strings like `components/{component.id}`
//! but evaluated as parsed segment lists, not by a general template engine.
//! The placeholder vocabulary is closed, so a typo fails at config load and
//! an unbound placeholder fails the run — nothing ever interpolates to an
//! empty path component.
//!
//! ## Closed Kind Enum
//!
//! Record kinds are a fixed enum dispatched with an exhaustive `match`.
//! Unknown kinds on the wire collapse into one `Unknown` variant that is
//! dropped silently — that tolerance is the compatibility story for future
//! extractors, while misrouting a *known* kind is a compile error here.
//!
//! ## Fail On Malformed Demos
//!
//! A demo must have exactly one `index.html` file. Zero or several means
//! the extraction went wrong, and the run aborts with the component and
//! demo named — no partial manifest, no arbitrary index choice.
//!
//! ## First-Seen Ordering
//!
//! Every observable order (components, demos, doc partitions) derives from
//! first appearance in the input, implemented with order-preserving
//! grouping. The manifest is therefore deterministic for a given record
//! list, which keeps diffs of generated sites reviewable.

pub mod aggregate;
pub mod classify;
pub mod config;
pub mod demo;
pub mod output;
pub mod paths;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
