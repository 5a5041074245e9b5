//! Command-line parsing
//!
//! Accepts both the Go-style single-dash spelling used by existing build
//! scripts (`-output x`, `-templatedir=x`, `-d=false`) and the usual
//! `--output x`. As with Go's `flag` package, option parsing stops at the
//! first positional argument.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::builder::BoolishValueParser;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

use crate::config::{GeneratorConfig, TEMPLATE_NAME};
use crate::error::{GenError, Result};

/// Long flags that may be spelled with a single dash
const LONG_FLAGS: &[&str] = &["output", "templatedir", "config"];

#[derive(Parser, Debug)]
#[command(name = "cppgen")]
#[command(about = "Render C++ definitions from a JSON schema through a template")]
#[command(override_usage = "cppgen [-d] [-h] [-output <filename>] [-templatedir <path>] <filename>")]
#[command(args_override_self = true)]
pub struct CliArgs {
    /// Print debug information (`-d`, `-d=true`, `-d=false`)
    #[arg(
        long,
        value_name = "bool",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    pub debug: Option<bool>,

    /// Output filename (default: standard output)
    #[arg(long, value_name = "filename", allow_hyphen_values = true)]
    pub output: Option<PathBuf>,

    /// Path to templates (default: template)
    #[arg(long, value_name = "path", allow_hyphen_values = true)]
    pub templatedir: Option<PathBuf>,

    /// Extra configuration file
    #[arg(long, value_name = "file", allow_hyphen_values = true)]
    pub config: Option<PathBuf>,

    /// Input JSON schema
    #[arg(value_name = "filename")]
    pub inputs: Vec<PathBuf>,
}

/// Everything one run needs, resolved once at startup
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub input: PathBuf,
    /// `None` writes to standard output
    pub output: Option<PathBuf>,
    pub template_dir: PathBuf,
    pub template_name: &'static str,
    pub debug: bool,
}

impl Options {
    /// Options for `input` with every other setting at its default
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self::resolve(input.into(), GeneratorConfig::default())
    }

    fn resolve(input: PathBuf, config: GeneratorConfig) -> Self {
        Self {
            input,
            output: config.output,
            template_dir: config.template_dir,
            template_name: TEMPLATE_NAME,
            debug: config.debug,
        }
    }

    /// Output path as shown by the debug echo
    pub fn output_display(&self) -> String {
        match &self.output {
            Some(path) => path.display().to_string(),
            None => "/dev/stdout".to_string(),
        }
    }
}

impl CliArgs {
    /// The single positional argument
    pub fn input(&self) -> Result<&PathBuf> {
        match self.inputs.as_slice() {
            [input] => Ok(input),
            [] => Err(usage_error(
                ErrorKind::MissingRequiredArgument,
                "missing <filename> argument",
            )),
            _ => Err(usage_error(ErrorKind::TooManyValues, "too many arguments")),
        }
    }

    /// Merge flags over file/env configuration
    pub fn into_options(self, config: GeneratorConfig) -> Result<Options> {
        let input = self.input()?.clone();
        let mut config = config;
        if let Some(output) = self.output {
            config.output = Some(output);
        }
        if let Some(dir) = self.templatedir {
            config.template_dir = dir;
        }
        if let Some(debug) = self.debug {
            config.debug = debug;
        }
        Ok(Options::resolve(input, config))
    }
}

/// A usage error rendered the way clap renders its own, usage line included
fn usage_error(kind: ErrorKind, message: &str) -> GenError {
    let err = CliArgs::command().error(kind, message);
    GenError::Usage(err.render().to_string())
}

/// Parse a full argv (program name first).
///
/// Help requests and malformed invocations come back as `GenError::Usage`
/// carrying the full text to print.
pub fn parse_args<I, T>(args: I) -> Result<CliArgs>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args = normalize_args(args.into_iter().map(Into::into));
    let cli =
        CliArgs::try_parse_from(args).map_err(|e| GenError::Usage(e.render().to_string()))?;
    cli.input()?;
    Ok(cli)
}

/// Rewrite Go-style flags to the spelling clap expects.
///
/// `-output`/`-output=x` become `--output`/`--output=x` and `-d=v` becomes
/// `--debug=v`. The first argument that is not a flag or a flag's value ends
/// option parsing: a `--` is inserted before it so clap treats it and
/// everything after it as positional. A bare `--` is kept and ends option
/// parsing the same way.
fn normalize_args(mut args: impl Iterator<Item = OsString>) -> Vec<OsString> {
    let mut out: Vec<OsString> = args.next().into_iter().collect();
    let mut flag_value_pending = false;

    while let Some(arg) = args.next() {
        if flag_value_pending {
            flag_value_pending = false;
            out.push(arg);
            continue;
        }

        let flag = arg
            .to_str()
            .filter(|s| s.len() > 1 && s.starts_with('-'))
            .map(|s| s.strip_prefix("--").unwrap_or(&s[1..]));
        let Some(body) = flag else {
            out.push(OsString::from("--"));
            out.push(arg);
            break;
        };
        if body.is_empty() {
            out.push(arg);
            break;
        }

        let (name, value) = match body.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (body, None),
        };
        if name == "d" {
            out.push(match value {
                Some(value) => format!("--debug={}", value).into(),
                None => "--debug".into(),
            });
        } else if LONG_FLAGS.contains(&name) {
            flag_value_pending = value.is_none();
            out.push(format!("--{}", body).into());
        } else {
            out.push(arg);
        }
    }

    out.extend(args);
    out
}
