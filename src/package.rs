//! Package orchestration: open an OOXML archive, scan its entries, and
//! assemble the extracted properties.
//!
//! An OOXML package is a ZIP archive; document metadata lives in up to
//! three parts at fixed internal paths. Enumeration is strictly sequential
//! and index-ordered, with at most one entry's stream open at any instant:
//! unrecognized entries are matched by name only and never decompressed,
//! which bounds resident memory regardless of how many irrelevant members
//! the archive carries.
//!
//! Any failure while opening the archive, reading a recognized entry, or
//! decoding its XML is terminal for the whole extraction; success and
//! failure are mutually exclusive outcomes.

use crate::custom;
use crate::error::{DocPropsError, Result};
use crate::properties::Properties;
use crate::schema;
use crate::xml::XmlNode;
use std::fs::File;
use std::io::{Cursor, Read, Seek};
use std::path::Path;
use zip::ZipArchive;

/// Archive member holding extended application properties.
pub const APP_PART: &str = "docProps/app.xml";
/// Archive member holding Dublin Core metadata.
pub const CORE_PART: &str = "docProps/core.xml";
/// Archive member holding user-defined custom properties.
pub const CUSTOM_PART: &str = "docProps/custom.xml";

/// The three recognized docProps parts. Member names are case-sensitive
/// and fixed; every other entry is skipped unopened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PartKind {
    App,
    Core,
    Custom,
}

impl PartKind {
    fn from_member_name(name: &str) -> Option<Self> {
        match name {
            APP_PART => Some(PartKind::App),
            CORE_PART => Some(PartKind::Core),
            CUSTOM_PART => Some(PartKind::Custom),
            _ => None,
        }
    }
}

/// Extract document properties from an in-memory OOXML package.
///
/// # Arguments
///
/// * `buffer` - The complete package bytes (.docx, .xlsx, .pptx, ...)
///
/// # Errors
///
/// Returns an error if the buffer is not a readable ZIP archive or if a
/// recognized entry fails to read or decode. No partial mapping is ever
/// returned alongside an error.
///
/// # Example
///
/// ```rust,no_run
/// let buffer = std::fs::read("report.docx")?;
/// let props = docprops::from_buffer(&buffer)?;
///
/// for (name, value) in props.iter() {
///     println!("{}: {:?}", name, value);
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn from_buffer(buffer: impl AsRef<[u8]>) -> Result<Properties> {
    let mut archive = ZipArchive::new(Cursor::new(buffer.as_ref()))?;
    extract(&mut archive)
}

/// Extract document properties from a reader yielding a complete OOXML
/// package.
///
/// The reader is drained to memory first; ZIP archives are indexed from
/// the end and cannot be decoded from a forward-only stream.
pub fn from_reader<R: Read>(mut reader: R) -> Result<Properties> {
    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;
    from_buffer(buffer)
}

/// Extract document properties from an OOXML package on disk.
///
/// # Arguments
///
/// * `path` - Path to the package file
///
/// # Errors
///
/// Returns [`DocPropsError::PackageNotFound`] if the path does not exist,
/// before any archive work; otherwise as [`from_buffer`].
///
/// # Example
///
/// ```rust,no_run
/// let props = docprops::from_path("report.docx")?;
/// println!("title: {:?}", props.get("title"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Properties> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(DocPropsError::PackageNotFound(path.display().to_string()));
    }

    let file = File::open(path)?;
    let mut archive = ZipArchive::new(file)?;
    extract(&mut archive)
}

/// Drive entry enumeration and dispatch, merging mapper output into one
/// accumulator.
///
/// Entries are visited in archive member order, so a key produced by a
/// later part overwrites an earlier one; the accumulator's representation
/// keeps the final mapping key-sorted without a separate finalize step.
fn extract<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<Properties> {
    let mut accumulator = Properties::new();

    for index in 0..archive.len() {
        let Some(kind) = archive
            .name_for_index(index)
            .and_then(PartKind::from_member_name)
        else {
            continue;
        };

        let mut entry = archive.by_index(index)?;
        let mut content = Vec::new();
        entry.read_to_end(&mut content)?;
        drop(entry);

        let doc = XmlNode::decode(&content)?;
        let mapped = match kind {
            PartKind::App => schema::map_properties(&doc, schema::APP_PROPERTIES),
            PartKind::Core => schema::map_properties(&doc, schema::CORE_PROPERTIES),
            PartKind::Custom => custom::map_custom_properties(&doc),
        };
        accumulator.merge(mapped);
    }

    Ok(accumulator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::PropertyValue;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    const APP_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties">
    <Application>Microsoft Office Word</Application>
    <Pages>42</Pages>
    <Words>1417</Words>
</Properties>"#;

    const CORE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties"
                   xmlns:dc="http://purl.org/dc/elements/1.1/"
                   xmlns:dcterms="http://purl.org/dc/terms/">
    <dc:title>Annual Review</dc:title>
    <dc:subject/>
    <dc:creator>Jane Doe</dc:creator>
</cp:coreProperties>"#;

    const CUSTOM_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/custom-properties"
            xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">
    <property fmtid="{D5CDD505-2E9C-101B-9397-08002B2CF9AE}" pid="2" name="Project Code">
        <vt:lpwstr>PX-12</vt:lpwstr>
    </property>
</Properties>"#;

    fn build_archive(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        for (name, content) in entries {
            writer.start_file(*name, options).expect("start zip entry");
            writer
                .write_all(content.as_bytes())
                .expect("write zip entry");
        }

        writer.finish().expect("finish zip").into_inner()
    }

    #[test]
    fn test_core_title_is_extracted() {
        let archive = build_archive(&[(CORE_PART, CORE_XML)]);
        let props = from_buffer(&archive).expect("extract");

        assert_eq!(
            props.get("title").and_then(PropertyValue::as_text),
            Some("Annual Review")
        );
        // The empty <dc:subject/> contributes nothing.
        assert!(props.get("subject").is_none());
    }

    #[test]
    fn test_app_counts_are_numeric() {
        let archive = build_archive(&[(APP_PART, APP_XML)]);
        let props = from_buffer(&archive).expect("extract");

        assert_eq!(
            props.get("pages").and_then(PropertyValue::as_number),
            Some(42.0)
        );
        assert_eq!(
            props.get("words").and_then(PropertyValue::as_number),
            Some(1417.0)
        );
    }

    #[test]
    fn test_fixed_and_custom_properties_merge() {
        let archive = build_archive(&[(CORE_PART, CORE_XML), (CUSTOM_PART, CUSTOM_XML)]);
        let props = from_buffer(&archive).expect("extract");

        assert_eq!(
            props.get("creator").and_then(PropertyValue::as_text),
            Some("Jane Doe")
        );
        assert_eq!(
            props.get("projectCode").and_then(PropertyValue::as_text),
            Some("PX-12")
        );
        let keys: Vec<_> = props.keys().collect();
        assert_eq!(keys, ["creator", "projectCode", "title"]);
    }

    #[test]
    fn test_result_is_independent_of_member_order() {
        let forward = build_archive(&[
            (APP_PART, APP_XML),
            (CORE_PART, CORE_XML),
            (CUSTOM_PART, CUSTOM_XML),
        ]);
        let backward = build_archive(&[
            (CUSTOM_PART, CUSTOM_XML),
            (CORE_PART, CORE_XML),
            (APP_PART, APP_XML),
        ]);

        let first = from_buffer(&forward).expect("extract forward");
        let second = from_buffer(&backward).expect("extract backward");
        assert_eq!(first, second);

        let keys: Vec<_> = first.keys().collect();
        let mut sorted = keys.clone();
        sorted.sort_unstable();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let archive = build_archive(&[(CORE_PART, CORE_XML), (APP_PART, APP_XML)]);

        let first = from_buffer(&archive).expect("first extract");
        let second = from_buffer(&archive).expect("second extract");
        assert_eq!(first, second);
    }

    #[test]
    fn test_colliding_keys_follow_member_order() {
        let shadowing_custom = r#"<Properties>
    <property pid="2" name="Creator"><vt:lpwstr>Custom Author</vt:lpwstr></property>
</Properties>"#;

        let archive = build_archive(&[(CORE_PART, CORE_XML), (CUSTOM_PART, shadowing_custom)]);
        let props = from_buffer(&archive).expect("extract");
        assert_eq!(
            props.get("creator").and_then(PropertyValue::as_text),
            Some("Custom Author")
        );

        let archive = build_archive(&[(CUSTOM_PART, shadowing_custom), (CORE_PART, CORE_XML)]);
        let props = from_buffer(&archive).expect("extract");
        assert_eq!(
            props.get("creator").and_then(PropertyValue::as_text),
            Some("Jane Doe")
        );
    }

    #[test]
    fn test_archive_without_recognized_entries_is_empty() {
        let archive = build_archive(&[
            ("word/document.xml", "<w:document/>"),
            ("[Content_Types].xml", "<Types/>"),
        ]);

        let props = from_buffer(&archive).expect("extract");
        assert!(props.is_empty());
    }

    #[test]
    fn test_unrecognized_entries_are_never_decoded() {
        // The irrelevant member is not even valid XML; extraction must
        // succeed because its stream is never opened.
        let archive = build_archive(&[
            ("word/document.xml", "<<<< not xml at all"),
            (CORE_PART, CORE_XML),
        ]);

        let props = from_buffer(&archive).expect("extract");
        assert_eq!(
            props.get("title").and_then(PropertyValue::as_text),
            Some("Annual Review")
        );
    }

    #[test]
    fn test_malformed_recognized_entry_aborts_the_extraction() {
        let archive = build_archive(&[
            (CORE_PART, "<cp:coreProperties><dc:title>Broken</cp:coreProperties>"),
            (APP_PART, APP_XML),
        ]);

        assert!(matches!(
            from_buffer(&archive),
            Err(DocPropsError::Xml(_))
        ));
    }

    #[test]
    fn test_corrupt_buffer_is_a_zip_error() {
        assert!(matches!(
            from_buffer(b"this is not a zip archive"),
            Err(DocPropsError::Zip(_))
        ));
    }

    #[test]
    fn test_from_reader_matches_from_buffer() {
        let archive = build_archive(&[(CORE_PART, CORE_XML)]);

        let via_reader = from_reader(&archive[..]).expect("extract via reader");
        let via_buffer = from_buffer(&archive).expect("extract via buffer");
        assert_eq!(via_reader, via_buffer);
    }

    #[test]
    fn test_from_path_round_trip() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("document.docx");
        std::fs::write(&path, build_archive(&[(CORE_PART, CORE_XML)])).expect("write package");

        let props = from_path(&path).expect("extract from path");
        assert_eq!(
            props.get("title").and_then(PropertyValue::as_text),
            Some("Annual Review")
        );
    }

    #[test]
    fn test_from_path_missing_file_is_package_not_found() {
        let result = from_path("no/such/package.docx");
        assert!(matches!(result, Err(DocPropsError::PackageNotFound(_))));
    }
}
