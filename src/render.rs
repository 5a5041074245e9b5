//! Rendering a schema document through a compiled template

use std::io::Write;

use tera::Context;
use tracing::debug;

use crate::error::{GenError, Result};
use crate::schema::SchemaDocument;
use crate::template::CompiledTemplate;

/// Build the template context for a document.
///
/// Top-level document fields become top-level template variables
/// (`namespace`, `constants`, `enums`, ...).
pub fn context_for(document: &SchemaDocument) -> Result<Context> {
    Context::from_serialize(document).map_err(|e| GenError::render(&e))
}

/// Execute `template` against `document`, streaming into `sink`.
///
/// On failure the sink may already hold part of the output.
pub fn render<W: Write>(
    template: &CompiledTemplate<'_>,
    document: &SchemaDocument,
    sink: W,
) -> Result<()> {
    let context = context_for(document)?;
    template
        .tera
        .render_to(template.name(), &context, sink)
        .map_err(|e| GenError::render(&e))?;
    debug!(template = template.name(), "rendered template");
    Ok(())
}

/// Render into an in-memory string
pub fn render_to_string(
    template: &CompiledTemplate<'_>,
    document: &SchemaDocument,
) -> Result<String> {
    let mut buf = Vec::new();
    render(template, document, &mut buf)?;
    String::from_utf8(buf).map_err(|e| GenError::render(&e))
}
