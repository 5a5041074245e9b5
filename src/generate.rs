//! The generation pipeline
//!
//! One linear pass per run: load templates, decode the schema, look up the
//! fixed template, open the sink, render, flush. Every file handle is owned by
//! this function's scope and closed on return, including error returns.

use std::fs::File;
use std::io::{self, BufWriter, Write};

use tracing::info;

use crate::cli::Options;
use crate::error::{GenError, Result};
use crate::render::render;
use crate::schema::SchemaDocument;
use crate::template::TemplateSet;

/// Print the resolved run parameters
pub fn debug_echo<W: Write>(options: &Options, mut out: W) -> io::Result<()> {
    writeln!(out, "input file:    {}", options.input.display())?;
    writeln!(out, "output file:   {}", options.output_display())?;
    writeln!(out, "templates dir: {}", options.template_dir.display())?;
    writeln!(out, "template name: {}", options.template_name)?;
    Ok(())
}

/// Run the whole pipeline for one set of options
pub fn run(options: &Options) -> Result<()> {
    if options.debug {
        // Informational only; a closed stdout must not abort the run
        let _ = debug_echo(options, io::stdout().lock());
    }

    let templates = TemplateSet::load(&options.template_dir)?;
    let document = SchemaDocument::from_path(&options.input)?;

    let template = templates
        .lookup(options.template_name)
        .ok_or_else(|| GenError::TemplateNotFound(options.template_name.to_string()))?;

    match &options.output {
        Some(path) => {
            let file = File::create(path).map_err(|source| GenError::OutputCreate {
                path: path.clone(),
                source,
            })?;
            let mut sink = BufWriter::new(file);
            render(&template, &document, &mut sink)?;
            sink.flush().map_err(|e| GenError::render(&e))?;
            info!(output = %path.display(), "wrote generated file");
        }
        None => {
            let mut sink = io::stdout().lock();
            render(&template, &document, &mut sink)?;
            sink.flush().map_err(|e| GenError::render(&e))?;
        }
    }

    Ok(())
}
