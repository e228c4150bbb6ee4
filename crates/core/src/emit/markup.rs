//! Presentation-layer markup rendering
//!
//! Payloads store structured records; markup is derived from them here and
//! nowhere else. `RenderMarkup` is the seam a viewer swaps to change the
//! presentation without touching extraction or index construction.

use crate::error::Result;
use crate::model::{GenericParam, ImplementorRecord, TraitIndex};
use indexmap::IndexMap;

pub trait RenderMarkup {
    /// Render one record into a hyperlinked signature string.
    fn render_record(&self, record: &ImplementorRecord) -> String;
}

/// Renders the escaped signature shape the documentation generator emits,
/// e.g. `impl&lt;'a&gt; <a class="trait" ...>Clone</a> for <a ...>ContextRef</a>&lt;'a&gt;`.
pub struct HtmlRenderer;

impl RenderMarkup for HtmlRenderer {
    fn render_record(&self, record: &ImplementorRecord) -> String {
        let mut out = String::from("impl");
        out.push_str(&render_params(&record.generics));

        out.push_str(&format!(
            " <a class=\"trait\" href=\"{}\" title=\"trait {}\">{}</a>",
            record.trait_ref.href,
            record.trait_ref.full_path(),
            escape(&record.trait_ref.name),
        ));

        out.push_str(" for ");
        out.push_str(&format!(
            "<a class=\"{}\" href=\"{}\" title=\"{} {}\">{}</a>",
            record.implementor.kind.as_str(),
            record.implementor.href,
            record.implementor.kind.as_str(),
            record.implementor.full_path(),
            escape(&record.implementor.name),
        ));

        out.push_str(&render_args(&record.generics));

        if !record.predicates.is_empty() {
            let clauses: Vec<String> = record
                .predicates
                .iter()
                .map(|p| escape(&format!("{}: {}", p.target, p.bounds.join(" + "))))
                .collect();
            out.push_str(&format!(
                "<span class=\"where fmt-newline\">where\n    {}</span>",
                clauses.join(",\n    ")
            ));
        }

        out
    }
}

/// Parameter list after `impl`, bounds included.
fn render_params(generics: &[GenericParam]) -> String {
    if generics.is_empty() {
        return String::new();
    }
    let params: Vec<String> = generics
        .iter()
        .map(|p| {
            if p.bounds.is_empty() {
                p.name.clone()
            } else {
                format!("{}: {}", p.name, p.bounds.join(" + "))
            }
        })
        .collect();
    escape(&format!("<{}>", params.join(", ")))
}

/// Argument list after the type name, names only.
fn render_args(generics: &[GenericParam]) -> String {
    if generics.is_empty() {
        return String::new();
    }
    let names: Vec<&str> = generics.iter().map(|p| p.name.as_str()).collect();
    escape(&format!("<{}>", names.join(", ")))
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders a self-registering loader script: the implementors object plus
/// the load-time registration call, one file per trait. Exists for viewers
/// that consume script registration rather than structured payloads.
pub struct JsLoader;

impl JsLoader {
    pub fn render(&self, index: &TraitIndex) -> Result<String> {
        let renderer = HtmlRenderer;
        let mut implementors: IndexMap<&str, Vec<String>> = IndexMap::new();
        for (library, records) in &index.libraries {
            implementors.insert(
                library,
                records.iter().map(|r| renderer.render_record(r)).collect(),
            );
        }
        let object = serde_json::to_string(&implementors)?;
        Ok(format!(
            "(function() {{var implementors = {object};if (window.register_implementors) {{window.register_implementors(implementors);}} else {{window.pending_implementors = implementors;}}}})()"
        ))
    }
}
