//! docprops - extract document metadata from Office Open XML packages
//!
//! Office Open XML documents (.docx, .xlsx, .pptx) are ZIP archives that
//! carry their metadata in XML parts at fixed internal paths:
//! `docProps/app.xml` (application statistics), `docProps/core.xml`
//! (Dublin Core metadata), and `docProps/custom.xml` (user-defined
//! properties). This crate scans a package for those three parts and
//! returns a single flat, key-sorted mapping of property names to typed
//! values.
//!
//! Fixed-schema parts are mapped through static tables; custom properties
//! are discovered at runtime, their values typed by the `vt:*` tag they
//! were stored under and their names normalized to camel-case keys.
//! Everything else in the archive is skipped without being decompressed.
//!
//! # Example - from a file
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let props = docprops::from_path("report.docx")?;
//!
//! if let Some(title) = props.get("title") {
//!     println!("Title: {:?}", title);
//! }
//! for (name, value) in props.iter() {
//!     println!("{}: {:?}", name, value);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Example - from an in-memory buffer
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let buffer = std::fs::read("report.xlsx")?;
//! let props = docprops::from_buffer(&buffer)?;
//!
//! println!("pages: {:?}", props.get("pages"));
//! println!("creator: {:?}", props.get("creator"));
//! # Ok(())
//! # }
//! ```

/// User-defined custom properties: runtime type discovery and key
/// normalization.
pub mod custom;

/// Error types for property extraction.
pub mod error;

/// Package orchestration and the extraction entry points.
pub mod package;

/// Property values and the extraction result mapping.
pub mod properties;

/// Fixed-schema property tables for app.xml and core.xml.
pub mod schema;

/// Generic XML tree decoding and path lookup.
pub mod xml;

// Re-export the extraction entry points
pub use package::{from_buffer, from_path, from_reader};

// Re-export the result types
pub use properties::{Properties, PropertyValue};

// Re-export error types
pub use error::{DocPropsError, Result};
