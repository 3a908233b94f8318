//! Fixed-schema property tables and the schema-driven mapper.
//!
//! `docProps/app.xml` and `docProps/core.xml` have known shapes, so their
//! mapping is table-driven: each entry names an output key, the source path
//! into the decoded tree, and the value kind to coerce to. The tables are
//! process-wide immutable configuration, shared across concurrent
//! extractions without locking.

use crate::properties::{Properties, PropertyValue};
use crate::xml::XmlNode;

/// Output value kind of a fixed-schema property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Textual output; empty values are dropped entirely
    String,
    /// Numeric output; unparseable text stores the NaN sentinel
    Number,
}

/// One fixed-schema property: output key, source path, value kind.
///
/// The output key may be dotted to indicate nested placement in the result
/// mapping. The source path addresses the decoded tree from the root
/// element down, prefixes as written in the document.
#[derive(Debug, Clone, Copy)]
pub struct SchemaEntry {
    /// Output key in the result mapping
    pub name: &'static str,
    /// Source path into the decoded tree
    pub path: &'static str,
    /// Coercion applied to the located text
    pub kind: ValueKind,
}

/// Properties extracted from `docProps/app.xml` (extended application
/// properties).
pub static APP_PROPERTIES: &[SchemaEntry] = &[
    SchemaEntry { name: "application", path: "Properties.Application", kind: ValueKind::String },
    SchemaEntry { name: "appVersion", path: "Properties.AppVersion", kind: ValueKind::String },
    SchemaEntry { name: "characters", path: "Properties.Characters", kind: ValueKind::Number },
    SchemaEntry {
        name: "charactersWithSpaces",
        path: "Properties.CharactersWithSpaces",
        kind: ValueKind::Number,
    },
    SchemaEntry { name: "company", path: "Properties.Company", kind: ValueKind::String },
    SchemaEntry { name: "hiddenSlides", path: "Properties.HiddenSlides", kind: ValueKind::Number },
    SchemaEntry { name: "lines", path: "Properties.Lines", kind: ValueKind::Number },
    SchemaEntry { name: "manager", path: "Properties.Manager", kind: ValueKind::String },
    SchemaEntry { name: "notes", path: "Properties.Notes", kind: ValueKind::Number },
    SchemaEntry { name: "pages", path: "Properties.Pages", kind: ValueKind::Number },
    SchemaEntry { name: "paragraphs", path: "Properties.Paragraphs", kind: ValueKind::Number },
    SchemaEntry {
        name: "presentationFormat",
        path: "Properties.PresentationFormat",
        kind: ValueKind::String,
    },
    SchemaEntry { name: "slides", path: "Properties.Slides", kind: ValueKind::Number },
    SchemaEntry { name: "template", path: "Properties.Template", kind: ValueKind::String },
    SchemaEntry { name: "totalTime", path: "Properties.TotalTime", kind: ValueKind::Number },
    SchemaEntry { name: "words", path: "Properties.Words", kind: ValueKind::Number },
];

/// Properties extracted from `docProps/core.xml` (Dublin Core metadata and
/// OPC extensions). Timestamps stay in their W3CDTF textual form.
pub static CORE_PROPERTIES: &[SchemaEntry] = &[
    SchemaEntry { name: "category", path: "cp:coreProperties.cp:category", kind: ValueKind::String },
    SchemaEntry {
        name: "contentStatus",
        path: "cp:coreProperties.cp:contentStatus",
        kind: ValueKind::String,
    },
    SchemaEntry {
        name: "created",
        path: "cp:coreProperties.dcterms:created",
        kind: ValueKind::String,
    },
    SchemaEntry { name: "creator", path: "cp:coreProperties.dc:creator", kind: ValueKind::String },
    SchemaEntry {
        name: "description",
        path: "cp:coreProperties.dc:description",
        kind: ValueKind::String,
    },
    SchemaEntry { name: "keywords", path: "cp:coreProperties.cp:keywords", kind: ValueKind::String },
    SchemaEntry { name: "language", path: "cp:coreProperties.dc:language", kind: ValueKind::String },
    SchemaEntry {
        name: "lastModifiedBy",
        path: "cp:coreProperties.cp:lastModifiedBy",
        kind: ValueKind::String,
    },
    SchemaEntry {
        name: "lastPrinted",
        path: "cp:coreProperties.cp:lastPrinted",
        kind: ValueKind::String,
    },
    SchemaEntry {
        name: "modified",
        path: "cp:coreProperties.dcterms:modified",
        kind: ValueKind::String,
    },
    SchemaEntry { name: "revision", path: "cp:coreProperties.cp:revision", kind: ValueKind::String },
    SchemaEntry { name: "subject", path: "cp:coreProperties.dc:subject", kind: ValueKind::String },
    SchemaEntry { name: "title", path: "cp:coreProperties.dc:title", kind: ValueKind::String },
    SchemaEntry { name: "version", path: "cp:coreProperties.cp:version", kind: ValueKind::String },
];

/// Map a decoded docProps tree through a fixed-schema table.
///
/// A missing source path silently skips that entry; this layer raises no
/// validation errors. Numeric coercion stores NaN for non-numeric text;
/// string coercion drops entries whose value is empty.
pub fn map_properties(doc: &XmlNode, schema: &[SchemaEntry]) -> Properties {
    let mut mapped = Properties::new();

    for entry in schema {
        let Some(node) = doc.lookup(entry.path) else {
            continue;
        };
        let text = node.text();

        match entry.kind {
            ValueKind::Number => {
                let value = fast_float2::parse(text).unwrap_or(f64::NAN);
                mapped.insert_path(entry.name, PropertyValue::Number(value));
            },
            ValueKind::String => {
                if !text.is_empty() {
                    mapped.insert_path(entry.name, PropertyValue::Text(text.to_string()));
                }
            },
        }
    }

    mapped
}
