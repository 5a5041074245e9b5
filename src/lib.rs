//! cppgen
//!
//! Generates C++ constants, enumerations and packed struct layouts from a JSON
//! description, rendered through user-supplied templates.
//!
//! ## Pipeline
//!
//! ```text
//! flags ──► Options
//!              │
//! template/*.tmpl ──► TemplateSet ──► lookup("cpp_file")
//!                                          │
//! schema.json ──► SchemaDocument ─────► render ──► output file / stdout
//! ```
//!
//! ## Input
//!
//! ```json
//! {
//!   "namespace": "itch",
//!   "inline_namespace": "v50",
//!   "constants": [{"definitions": [{"name": "MaxPrice", "datatype": "int", "value": "10"}]}],
//!   "enums": [{"identifier": "side", "datatype": "char",
//!              "enumerator_list": [{"name": "buy", "comment": "B"}]}],
//!   "structs": [{"identifier": "add_order", "packed": true,
//!                "members": [{"name": "shares", "datatype": "std::uint32_t", "size": 4}]}]
//! }
//! ```
//!
//! Templates use Tera syntax and see the document's fields under the same
//! names, e.g. `{{ namespace }}` or `{% for s in structs %}`.

pub mod cli;
pub mod config;
pub mod error;
pub mod filters;
pub mod generate;
pub mod render;
pub mod schema;
pub mod template;

pub use cli::{parse_args, CliArgs, Options};
pub use config::{GeneratorConfig, TEMPLATE_NAME};
pub use error::{GenError, Result};
pub use generate::run;
pub use render::render;
pub use schema::{
    ConstantDef, ConstantGroup, EnumDef, EnumeratorDef, MemberDef, SchemaDocument, StructDef,
};
pub use template::{CompiledTemplate, TemplateSet};
