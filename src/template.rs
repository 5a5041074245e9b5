//! Template Loading
//!
//! Scans one directory for `*.tmpl` files and compiles them together into a
//! [`TemplateSet`]. Each template is registered under its logical name, the
//! file name without the suffix, so `cpp_file.tmpl` is looked up as
//! `cpp_file` and other templates can `include` it by that name.

use std::fs;
use std::path::{Path, PathBuf};

use tera::Tera;
use tracing::debug;
use walkdir::WalkDir;

use crate::error::{GenError, Result};
use crate::filters;

/// Suffix identifying template files
pub const TEMPLATE_SUFFIX: &str = ".tmpl";

/// All templates of one directory, compiled
pub struct TemplateSet {
    tera: Tera,
    dir: PathBuf,
}

/// A template found in a [`TemplateSet`]
#[derive(Clone, Copy)]
pub struct CompiledTemplate<'a> {
    pub(crate) tera: &'a Tera,
    name: &'a str,
}

impl<'a> CompiledTemplate<'a> {
    /// Logical name of the template
    pub fn name(&self) -> &'a str {
        self.name
    }
}

impl std::fmt::Debug for CompiledTemplate<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledTemplate").field("name", &self.name).finish()
    }
}

impl TemplateSet {
    /// Load and compile every template file directly inside `dir`.
    ///
    /// Either every file compiles or nothing is returned.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let sources = collect_sources(dir)?;

        if sources.is_empty() {
            return Err(GenError::TemplateLoad {
                dir: dir.to_path_buf(),
                reason: format!("no files matching *{}", TEMPLATE_SUFFIX),
            });
        }

        let mut tera = Tera::default();
        filters::register(&mut tera);
        tera.add_raw_templates(sources)
            .map_err(|e| GenError::template_load(dir, &e))?;

        let set = Self {
            tera,
            dir: dir.to_path_buf(),
        };
        debug!(dir = %dir.display(), templates = ?set.names(), "loaded template set");
        Ok(set)
    }

    /// Find a template by logical name
    pub fn lookup(&self, name: &str) -> Option<CompiledTemplate<'_>> {
        self.tera
            .get_template_names()
            .find(|n| *n == name)
            .map(|name| CompiledTemplate {
                tera: &self.tera,
                name,
            })
    }

    /// Logical names of all loaded templates, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tera.get_template_names().collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.tera.get_template_names().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Directory the set was loaded from
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// Read `(logical name, source)` pairs for every template file in `dir`
fn collect_sources(dir: &Path) -> Result<Vec<(String, String)>> {
    let mut sources = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| GenError::template_load(dir, &e))?;
        let path = entry.path();
        if !entry.file_type().is_file() {
            continue;
        }

        let Some(name) = logical_name(path) else {
            continue;
        };

        let content = fs::read_to_string(path).map_err(|e| GenError::TemplateLoad {
            dir: dir.to_path_buf(),
            reason: format!("reading {}: {}", path.display(), e),
        })?;

        debug!(template = %name, path = %path.display(), "found template");
        sources.push((name, content));
    }

    Ok(sources)
}

/// `cpp_file.tmpl` -> `cpp_file`; `None` for files without the suffix
fn logical_name(path: &Path) -> Option<String> {
    let file_name = path.file_name()?.to_str()?;
    file_name
        .strip_suffix(TEMPLATE_SUFFIX)
        .filter(|stem| !stem.is_empty())
        .map(str::to_string)
}
