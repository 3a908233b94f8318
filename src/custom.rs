//! User-defined custom document properties.
//!
//! Custom properties live in the `docProps/custom.xml` part and carry
//! arbitrary names and runtime-typed values: each `property` element
//! declares its name in an attribute and its value in a single `vt:*`
//! child whose element name is the type tag. The mapper resolves that tag
//! into a typed [`PropertyValue`] once, at decode time, and normalizes the
//! declared name into a canonical camel-case key.

use crate::properties::{Properties, PropertyValue};
use crate::xml::XmlNode;
use chrono::{DateTime, Utc};

/// Map a decoded `docProps/custom.xml` tree into properties.
///
/// An absent or empty `property` collection is normal and yields an empty
/// mapping, not an error. Properties without a `name` attribute or whose
/// name normalizes to nothing are skipped; duplicate normalized names
/// resolve last-write-wins in document order.
pub fn map_custom_properties(doc: &XmlNode) -> Properties {
    let mut mapped = Properties::new();

    let Some(root) = doc.lookup("Properties").and_then(XmlNode::as_element) else {
        return mapped;
    };
    let Some(entries) = root.child_seq("property") else {
        return mapped;
    };

    for node in entries {
        let Some(property) = node.as_element() else {
            continue;
        };
        let Some(name) = property.attribute("name") else {
            continue;
        };
        let key = camel_key(name);
        if key.is_empty() {
            continue;
        }

        // The one child that is not the attribute sub-mapping names the
        // runtime value type; its first sequence entry is the literal.
        let Some((tag, value)) = property.first_child() else {
            continue;
        };
        let type_tag = tag.split_once(':').map_or(tag, |(_, local)| local);
        mapped.insert(key, decode_value(type_tag, value.text()));
    }

    mapped
}

/// Decode a custom property literal according to its runtime type tag.
///
/// Unknown tags and literals that fail to parse degrade to `Text` of the
/// raw literal; a malformed value never fails the extraction.
fn decode_value(type_tag: &str, literal: &str) -> PropertyValue {
    match type_tag {
        "lpwstr" | "lpstr" | "bstr" => PropertyValue::Text(literal.to_string()),
        "i1" | "i2" | "i4" | "i8" | "ui1" | "ui2" | "ui4" | "ui8" | "int" | "uint" => literal
            .parse::<i64>()
            .map(|value| PropertyValue::Number(value as f64))
            .unwrap_or_else(|_| PropertyValue::Text(literal.to_string())),
        "r4" | "r8" | "decimal" => fast_float2::parse(literal)
            .map(PropertyValue::Number)
            .unwrap_or_else(|_| PropertyValue::Text(literal.to_string())),
        "bool" => match literal.to_ascii_lowercase().as_str() {
            "true" | "1" => PropertyValue::Bool(true),
            "false" | "0" => PropertyValue::Bool(false),
            _ => PropertyValue::Text(literal.to_string()),
        },
        "filetime" | "date" => parse_datetime(literal)
            .map(PropertyValue::Date)
            .unwrap_or_else(|| PropertyValue::Text(literal.to_string())),
        _ => PropertyValue::Text(literal.to_string()),
    }
}

/// Parse a W3CDTF/ISO 8601 datetime string.
///
/// Supports formats like:
/// - 2023-10-10T14:30:00Z
/// - 2023-10-10T14:30:00.1234567Z
/// - 2023-10-10T14:30:00
fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.fZ") {
        return Some(DateTime::from_naive_utc_and_offset(dt, Utc));
    }

    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(DateTime::from_naive_utc_and_offset(dt, Utc));
    }

    None
}

/// Normalize a declared property name into a canonical camel-case key.
///
/// Words are maximal runs of ASCII alphanumerics, split further where an
/// uppercase letter follows a lowercase letter or digit. Separators are
/// removed; the first word is lowercased entirely and every later word is
/// emitted first-char-uppercase, rest lowercase.
///
/// ```rust
/// use docprops::custom::camel_key;
///
/// assert_eq!(camel_key("Document Owner"), "documentOwner");
/// assert_eq!(camel_key("invoice_ID"), "invoiceId");
/// ```
pub fn camel_key(name: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if ch.is_ascii_uppercase()
                && current.ends_with(|prev: char| prev.is_ascii_lowercase() || prev.is_ascii_digit())
            {
                words.push(std::mem::take(&mut current));
            }
            current.push(ch);
        } else if !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        words.push(current);
    }

    let mut key = String::with_capacity(name.len());
    for (index, word) in words.iter().enumerate() {
        if index == 0 {
            key.push_str(&word.to_ascii_lowercase());
        } else if let Some(first) = word.chars().next() {
            key.push(first.to_ascii_uppercase());
            key.push_str(&word[first.len_utf8()..].to_ascii_lowercase());
        }
    }

    key
}
