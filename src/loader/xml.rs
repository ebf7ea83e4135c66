//! Streaming UCD XML source
//!
//! Wraps a namespace-aware quick-xml reader and yields only the start-tag
//! events the loader consumes: `group`, `char`, and `name-alias` in the UCD
//! namespace. Both open tags and self-closing empty tags count as starts
//! (the export self-closes childless elements). The internal buffer is
//! cleared on every event, so memory use is bounded by the largest single
//! tag, not the document.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;

use crate::Result;

/// Namespace of the Unicode Character Database XML schema
pub const UCD_NAMESPACE: &str = "http://www.unicode.org/ns/2003/ucd/1.0";

/// A start-tag event the loader acts on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UcdEvent {
    /// `<group blk=".." na="..">`
    Group {
        block: Option<String>,
        name: Option<String>,
    },
    /// `<char cp=".." na1="..">`
    Char {
        codepoint: Option<String>,
        name: Option<String>,
    },
    /// `<name-alias alias="..">`
    NameAlias { alias: Option<String> },
}

/// Forward-only reader over a UCD document
pub struct UcdReader<R: BufRead> {
    inner: NsReader<R>,
    buf: Vec<u8>,
}

impl UcdReader<BufReader<File>> {
    /// Open a UCD XML file for streaming
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self {
            inner: NsReader::from_file(path)?,
            buf: Vec::new(),
        })
    }
}

impl<R: BufRead> UcdReader<R> {
    /// Stream from any buffered reader (used by tests with in-memory XML)
    pub fn from_reader(reader: R) -> Self {
        Self {
            inner: NsReader::from_reader(reader),
            buf: Vec::new(),
        }
    }

    /// Next relevant start-tag event, or `None` at end of document.
    ///
    /// Elements outside the UCD namespace and UCD elements other than the
    /// three the loader handles are skipped.
    pub fn next_event(&mut self) -> Result<Option<UcdEvent>> {
        loop {
            self.buf.clear();
            let (ns, event) = self.inner.read_resolved_event_into(&mut self.buf)?;
            let start = match event {
                Event::Start(ref e) | Event::Empty(ref e) => e,
                Event::Eof => return Ok(None),
                _ => continue,
            };

            let in_ucd_ns =
                matches!(ns, ResolveResult::Bound(Namespace(n)) if n == UCD_NAMESPACE.as_bytes());
            if !in_ucd_ns {
                continue;
            }

            match start.local_name().as_ref() {
                b"group" => {
                    return Ok(Some(UcdEvent::Group {
                        block: attribute(start, "blk")?,
                        name: attribute(start, "na")?,
                    }));
                }
                b"char" => {
                    return Ok(Some(UcdEvent::Char {
                        codepoint: attribute(start, "cp")?,
                        name: attribute(start, "na1")?,
                    }));
                }
                b"name-alias" => {
                    return Ok(Some(UcdEvent::NameAlias {
                        alias: attribute(start, "alias")?,
                    }));
                }
                _ => continue,
            }
        }
    }
}

/// Read an attribute value by name, unescaping entities
fn attribute(start: &BytesStart, name: &str) -> Result<Option<String>> {
    match start.try_get_attribute(name)? {
        Some(attr) => {
            let value = attr.unescape_value().map_err(quick_xml::Error::from)?;
            Ok(Some(value.into_owned()))
        }
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_all(xml: &str) -> Vec<UcdEvent> {
        let mut reader = UcdReader::from_reader(xml.as_bytes());
        let mut events = Vec::new();
        while let Some(event) = reader.next_event().unwrap() {
            events.push(event);
        }
        events
    }

    #[test]
    fn test_group_and_char_events() {
        let xml = r#"
            <ucd xmlns="http://www.unicode.org/ns/2003/ucd/1.0">
              <repertoire>
                <group blk="Basic Latin">
                  <char cp="0041" na1="LATIN CAPITAL LETTER A"/>
                </group>
              </repertoire>
            </ucd>
        "#;

        let events = read_all(xml);
        assert_eq!(
            events,
            vec![
                UcdEvent::Group {
                    block: Some("Basic Latin".to_string()),
                    name: None,
                },
                UcdEvent::Char {
                    codepoint: Some("0041".to_string()),
                    name: Some("LATIN CAPITAL LETTER A".to_string()),
                },
            ]
        );
    }

    #[test]
    fn test_self_closing_name_alias() {
        let xml = r#"
            <ucd xmlns="http://www.unicode.org/ns/2003/ucd/1.0">
              <char cp="0042"><name-alias alias="B-ALIAS"/></char>
            </ucd>
        "#;

        let events = read_all(xml);
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[1],
            UcdEvent::NameAlias {
                alias: Some("B-ALIAS".to_string()),
            }
        );
    }

    #[test]
    fn test_foreign_namespace_ignored() {
        let xml = r#"
            <doc xmlns:x="http://example.com/not-ucd">
              <x:group blk="Nope"/>
              <x:char cp="0041"/>
            </doc>
        "#;

        assert!(read_all(xml).is_empty());
    }

    #[test]
    fn test_missing_attributes_are_none() {
        let xml = r#"
            <ucd xmlns="http://www.unicode.org/ns/2003/ucd/1.0">
              <group na="Noncharacter"/>
              <char/>
              <name-alias/>
            </ucd>
        "#;

        let events = read_all(xml);
        assert_eq!(
            events,
            vec![
                UcdEvent::Group {
                    block: None,
                    name: Some("Noncharacter".to_string()),
                },
                UcdEvent::Char {
                    codepoint: None,
                    name: None,
                },
                UcdEvent::NameAlias { alias: None },
            ]
        );
    }

    #[test]
    fn test_entities_unescaped() {
        let xml = r#"
            <ucd xmlns="http://www.unicode.org/ns/2003/ucd/1.0">
              <group blk="A &amp; B"/>
            </ucd>
        "#;

        let events = read_all(xml);
        assert_eq!(
            events,
            vec![UcdEvent::Group {
                block: Some("A & B".to_string()),
                name: None,
            }]
        );
    }
}
