//! TS document parser.
//!
//! Reads the XML tree with `xmltree` and converts it into the ordered
//! [`Catalogue`] model. The conversion is strict about the parts the lookup
//! depends on (`TS` root, context names, message sources, translation
//! statuses, numerus grouping) and lenient about tool metadata it does not
//! use (`defaultcodec`, `dependencies`, `userdata`, `extra-*` elements).

use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};
use xml::reader::{ParserConfig, XmlEvent};
use xmltree::{Element, XMLNode};

use crate::i18n::error::CatalogueError;
use crate::i18n::model::{Catalogue, Context, Location, Message, Status, TranslationText};

/// Parse a TS document.
///
/// # Errors
/// * [`CatalogueError::Parse`] when the text is not well-formed XML
/// * [`CatalogueError::Schema`] when the tree does not follow the TS layout
pub fn load(document: &str) -> Result<Catalogue, CatalogueError> {
    let root = parse_tree(document)?;

    if root.name != "TS" {
        return Err(CatalogueError::schema(
            "TS",
            format!("expected <TS> root element, found <{}>", root.name),
        ));
    }

    let mut catalogue = Catalogue {
        version: attr(&root, "version"),
        language: attr(&root, "language"),
        sourcelanguage: attr(&root, "sourcelanguage"),
        contexts: Vec::new(),
    };

    for child in elements(&root) {
        match child.name.as_str() {
            "context" => catalogue.contexts.push(parse_context(child)?),
            other => debug!("Skipping <{}> under <TS>", other),
        }
    }

    Ok(catalogue)
}

/// Read and parse a TS file from disk.
pub fn load_path(path: impl AsRef<Path>) -> Result<Catalogue, CatalogueError> {
    let path = path.as_ref();
    let document = fs::read_to_string(path).map_err(|source| CatalogueError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let catalogue = load(&document)?;
    info!(
        "Loaded catalogue {} ({} contexts, {} messages)",
        path.display(),
        catalogue.contexts.len(),
        catalogue.message_count()
    );
    Ok(catalogue)
}

/// Parse a TS document, falling back to an empty catalogue on failure.
///
/// An empty catalogue makes every lookup return its source string, which is
/// the right degraded behavior for a UI: untranslated rather than broken.
pub fn load_or_empty(document: &str) -> Catalogue {
    match load(document) {
        Ok(catalogue) => catalogue,
        Err(e) => {
            warn!("Failed to load catalogue, using source strings: {}", e);
            Catalogue::empty()
        }
    }
}

/// Build the element tree, keeping whitespace-only character data.
///
/// `Element::parse` drops whitespace events, which would turn a translation
/// of `" "` into an empty one.
fn parse_tree(document: &str) -> Result<Element, CatalogueError> {
    let mut reader = ParserConfig::new()
        .whitespace_to_characters(true)
        .create_reader(document.as_bytes());
    let mut stack: Vec<Element> = Vec::new();
    let mut root = None;

    loop {
        match reader
            .next()
            .map_err(|e| CatalogueError::Parse(e.to_string()))?
        {
            XmlEvent::StartElement {
                name, attributes, ..
            } => {
                let mut element = Element::new(&name.local_name);
                for attribute in attributes {
                    element
                        .attributes
                        .insert(attribute.name.local_name, attribute.value);
                }
                stack.push(element);
            }
            XmlEvent::EndElement { .. } => {
                if let Some(element) = stack.pop() {
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(XMLNode::Element(element)),
                        None => root = Some(element),
                    }
                }
            }
            XmlEvent::Characters(text) | XmlEvent::CData(text) | XmlEvent::Whitespace(text) => {
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(XMLNode::Text(text));
                }
            }
            XmlEvent::EndDocument => break,
            _ => {}
        }
    }

    root.ok_or_else(|| CatalogueError::Parse("document has no root element".to_string()))
}

fn parse_context(el: &Element) -> Result<Context, CatalogueError> {
    let mut name = None;
    let mut messages = Vec::new();

    for child in elements(el) {
        match child.name.as_str() {
            "name" => name = Some(text_content(child, "name")?),
            "message" => messages.push(parse_message(child)?),
            other => debug!("Skipping <{}> under <context>", other),
        }
    }

    let name = name.ok_or_else(|| CatalogueError::schema("context", "missing <name>"))?;
    Ok(Context { name, messages })
}

fn parse_message(el: &Element) -> Result<Message, CatalogueError> {
    let numerus = match el.attributes.get("numerus").map(String::as_str) {
        None | Some("no") | Some("false") => false,
        Some("yes") | Some("true") => true,
        Some(other) => {
            return Err(CatalogueError::schema(
                "message",
                format!("invalid numerus value '{}'", other),
            ))
        }
    };

    let mut message = Message {
        id: attr(el, "id"),
        numerus,
        ..Default::default()
    };
    let mut source = None;
    let mut translation = None;

    for child in elements(el) {
        match child.name.as_str() {
            "location" => message.locations.push(Location {
                filename: attr(child, "filename"),
                line: attr(child, "line"),
            }),
            "source" => source = Some(text_content(child, "source")?),
            "oldsource" => message.oldsource = Some(text_content(child, "oldsource")?),
            "comment" => message.comment = Some(text_content(child, "comment")?),
            "oldcomment" => message.oldcomment = Some(text_content(child, "oldcomment")?),
            "extracomment" => message.extracomment = Some(text_content(child, "extracomment")?),
            "translatorcomment" => {
                message.translatorcomment = Some(text_content(child, "translatorcomment")?)
            }
            "translation" => translation = Some(parse_translation(child, numerus)?),
            "userdata" => {}
            name if name.starts_with("extra-") => {}
            other => {
                return Err(CatalogueError::schema(
                    "message",
                    format!("unexpected child <{}>", other),
                ))
            }
        }
    }

    message.source = source.ok_or_else(|| CatalogueError::schema("message", "missing <source>"))?;

    // A message without <translation> has nothing approved yet.
    let (text, status) = translation.unwrap_or_else(|| {
        let empty = if numerus {
            TranslationText::Numerus(Vec::new())
        } else {
            TranslationText::default()
        };
        (empty, Status::Unfinished)
    });
    message.translation = text;
    message.status = status;

    Ok(message)
}

fn parse_translation(
    el: &Element,
    numerus: bool,
) -> Result<(TranslationText, Status), CatalogueError> {
    let status = match el.attributes.get("type") {
        None => Status::Finished,
        Some(value) => Status::from_type_attr(value).ok_or_else(|| {
            CatalogueError::schema("translation", format!("unknown type '{}'", value))
        })?,
    };

    let mut text = String::new();
    let mut forms = Vec::new();

    for node in &el.children {
        match node {
            XMLNode::Text(s) | XMLNode::CData(s) => text.push_str(s),
            XMLNode::Element(child) if child.name == "numerusform" => {
                forms.push(text_content(child, "numerusform")?)
            }
            XMLNode::Element(child) if child.name == "byte" => text.push_str(&decode_byte(child)?),
            XMLNode::Element(child) => {
                return Err(CatalogueError::schema(
                    "translation",
                    format!("unexpected child <{}>", child.name),
                ))
            }
            _ => {}
        }
    }

    let body = if numerus {
        if !text.trim().is_empty() {
            return Err(CatalogueError::schema(
                "translation",
                "numerus message must group its text in <numerusform> elements",
            ));
        }
        TranslationText::Numerus(forms)
    } else {
        if !forms.is_empty() {
            return Err(CatalogueError::schema(
                "translation",
                "<numerusform> in a message without numerus=\"yes\"",
            ));
        }
        TranslationText::Single(text)
    };

    Ok((body, status))
}

/// Concatenate the character data of an element, decoding `<byte>` escapes.
fn text_content(el: &Element, tag: &'static str) -> Result<String, CatalogueError> {
    let mut text = String::new();
    for node in &el.children {
        match node {
            XMLNode::Text(s) | XMLNode::CData(s) => text.push_str(s),
            XMLNode::Element(child) if child.name == "byte" => text.push_str(&decode_byte(child)?),
            XMLNode::Element(child) => {
                return Err(CatalogueError::schema(
                    tag,
                    format!("unexpected child <{}>", child.name),
                ))
            }
            _ => {}
        }
    }
    Ok(text)
}

/// Decode `<byte value="x9"/>` (hex) or `<byte value="9"/>` (decimal).
///
/// TS files use these for characters XML 1.0 cannot carry literally.
fn decode_byte(el: &Element) -> Result<String, CatalogueError> {
    let value = el
        .attributes
        .get("value")
        .ok_or_else(|| CatalogueError::schema("byte", "missing value attribute"))?;

    let (digits, radix) = match value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix('x'))
    {
        Some(hex) => (hex, 16),
        None => (value.as_str(), 10),
    };

    let code = u32::from_str_radix(digits, radix)
        .map_err(|_| CatalogueError::schema("byte", format!("invalid value '{}'", value)))?;
    if code == 0 {
        return Ok(String::new());
    }

    char::from_u32(code)
        .map(String::from)
        .ok_or_else(|| CatalogueError::schema("byte", format!("invalid code point '{}'", value)))
}

fn attr(el: &Element, key: &str) -> Option<String> {
    el.attributes.get(key).cloned()
}

fn elements(el: &Element) -> impl Iterator<Item = &Element> {
    el.children.iter().filter_map(XMLNode::as_element)
}
