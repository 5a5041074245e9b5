//! Schema document types
//!
//! The decoded form of the JSON input: namespaces, constant groups, enums and
//! struct layouts. Field names double as the names templates use, so the
//! serialized shape is kept identical to the accepted input shape.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::error::{GenError, Result};

/// Top-level schema document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDocument {
    /// Enclosing namespace for everything generated
    pub namespace: String,
    /// Optional inline namespace nested inside `namespace`
    #[serde(default, deserialize_with = "null_as_default")]
    pub inline_namespace: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub constants: Vec<ConstantGroup>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub enums: Vec<EnumDef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub structs: Vec<StructDef>,
}

/// A block of related constant definitions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstantGroup {
    #[serde(default, deserialize_with = "null_as_default")]
    pub definitions: Vec<ConstantDef>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstantDef {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Type name, emitted verbatim
    #[serde(default, deserialize_with = "null_as_default")]
    pub datatype: String,
    /// Literal value, emitted verbatim
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumDef {
    #[serde(default, deserialize_with = "null_as_default")]
    pub identifier: String,
    /// Underlying integer type
    #[serde(default, deserialize_with = "null_as_default")]
    pub datatype: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub enumerator_list: Vec<EnumeratorDef>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumeratorDef {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub comment: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructDef {
    #[serde(default, deserialize_with = "null_as_default")]
    pub identifier: String,
    /// Whether the layout is declared without padding
    #[serde(default, deserialize_with = "null_as_default")]
    pub packed: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub members: Vec<MemberDef>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDef {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub datatype: String,
    /// Size as written in the schema; units are up to the template
    #[serde(default, deserialize_with = "null_as_default")]
    pub size: i64,
}

/// `null` decodes like an absent field
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl SchemaDocument {
    /// Decode a document from a JSON byte stream
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let doc: SchemaDocument = serde_json::from_reader(reader)?;
        debug!(
            namespace = %doc.namespace,
            constants = doc.constant_count(),
            enums = doc.enum_count(),
            structs = doc.struct_count(),
            "decoded schema document"
        );
        Ok(doc)
    }

    /// Decode a document from JSON bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Self::from_reader(bytes)
    }

    /// Open and decode a schema file
    ///
    /// The file handle is dropped before returning, on success and on error.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| GenError::InputOpen {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }

    /// Compact JSON form
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string(self).map_err(GenError::Encode)
    }

    /// Indented JSON form
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(GenError::Encode)
    }

    /// Total constant definitions across all groups
    pub fn constant_count(&self) -> usize {
        self.constants.iter().map(|g| g.definitions.len()).sum()
    }

    pub fn enum_count(&self) -> usize {
        self.enums.len()
    }

    pub fn struct_count(&self) -> usize {
        self.structs.len()
    }
}
