//! TS document writer.
//!
//! Builds an `xmltree` element tree from a [`Catalogue`] and emits it with
//! four-space indentation, the layout translation tools produce. Contexts,
//! messages and numerus forms are written in stored order, so loading the
//! output yields an equal catalogue.

use xmltree::{Element, EmitterConfig, XMLNode};

use crate::i18n::error::CatalogueError;
use crate::i18n::model::{Catalogue, Context, Location, Message, TranslationText};

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>";
const DOCTYPE: &str = "<!DOCTYPE TS>";

/// Serialize a catalogue as a TS document.
pub fn to_ts_string(catalogue: &Catalogue) -> Result<String, CatalogueError> {
    let root = catalogue_element(catalogue);

    let config = EmitterConfig::new()
        .perform_indent(true)
        .indent_string("    ")
        .write_document_declaration(false)
        .normalize_empty_elements(false);

    let mut body = Vec::new();
    root.write_with_config(&mut body, config)
        .map_err(|e| CatalogueError::Write(e.to_string()))?;
    let body = String::from_utf8(body).map_err(|e| CatalogueError::Write(e.to_string()))?;

    Ok(format!("{}\n{}\n{}\n", XML_DECLARATION, DOCTYPE, body))
}

impl Catalogue {
    /// Serialize as a TS document. See [`to_ts_string`].
    pub fn to_ts_string(&self) -> Result<String, CatalogueError> {
        to_ts_string(self)
    }
}

struct ElementBuilder(Element);

impl ElementBuilder {
    fn new(tag: &str) -> Self {
        Self(Element::new(tag))
    }

    fn build(self) -> Element {
        self.0
    }

    fn attr(mut self, key: &str, value: &str) -> Self {
        self.0.attributes.insert(key.to_owned(), value.to_owned());
        self
    }

    fn attr_opt(self, key: &str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.attr(key, value),
            None => self,
        }
    }

    fn child(mut self, child: Element) -> Self {
        self.0.children.push(XMLNode::Element(child));
        self
    }

    fn children<I: IntoIterator<Item = Element>>(mut self, iter: I) -> Self {
        self.0
            .children
            .extend(iter.into_iter().map(XMLNode::Element));
        self
    }

    fn text_child(self, tag: &str, text: &str) -> Self {
        self.child(ElementBuilder::new(tag).text(text).build())
    }

    fn text_child_opt(self, tag: &str, text: Option<&str>) -> Self {
        match text {
            Some(text) => self.text_child(tag, text),
            None => self,
        }
    }

    /// Append character data, moving characters XML 1.0 cannot carry into
    /// `<byte>` elements.
    ///
    /// Every `<byte>` sits between two text nodes, empty ones included: the
    /// indenting emitter only leaves an element's content alone once text
    /// has been written into it.
    fn text(mut self, text: &str) -> Self {
        let mut run = String::new();
        for ch in text.chars() {
            if is_xml_char(ch) {
                run.push(ch);
                continue;
            }
            self.0.children.push(XMLNode::Text(std::mem::take(&mut run)));
            let byte = ElementBuilder::new("byte")
                .attr("value", &format!("x{:x}", ch as u32))
                .build();
            self.0.children.push(XMLNode::Element(byte));
        }
        self.0.children.push(XMLNode::Text(run));
        self
    }
}

fn is_xml_char(ch: char) -> bool {
    matches!(ch, '\t' | '\n' | '\r') || ch >= ' '
}

fn catalogue_element(catalogue: &Catalogue) -> Element {
    ElementBuilder::new("TS")
        .attr_opt("version", catalogue.version.as_deref())
        .attr_opt("language", catalogue.language.as_deref())
        .attr_opt("sourcelanguage", catalogue.sourcelanguage.as_deref())
        .children(catalogue.contexts.iter().map(context_element))
        .build()
}

fn context_element(context: &Context) -> Element {
    ElementBuilder::new("context")
        .text_child("name", &context.name)
        .children(context.messages.iter().map(message_element))
        .build()
}

fn message_element(message: &Message) -> Element {
    ElementBuilder::new("message")
        .attr_opt("id", message.id.as_deref())
        .attr_opt("numerus", message.numerus.then_some("yes"))
        .children(message.locations.iter().map(location_element))
        .text_child("source", &message.source)
        .text_child_opt("oldsource", message.oldsource.as_deref())
        .text_child_opt("comment", message.comment.as_deref())
        .text_child_opt("oldcomment", message.oldcomment.as_deref())
        .text_child_opt("extracomment", message.extracomment.as_deref())
        .text_child_opt("translatorcomment", message.translatorcomment.as_deref())
        .child(translation_element(message))
        .build()
}

fn location_element(location: &Location) -> Element {
    ElementBuilder::new("location")
        .attr_opt("filename", location.filename.as_deref())
        .attr_opt("line", location.line.as_deref())
        .build()
}

fn translation_element(message: &Message) -> Element {
    let builder =
        ElementBuilder::new("translation").attr_opt("type", message.status.type_attr());

    match &message.translation {
        TranslationText::Single(text) => builder.text(text),
        TranslationText::Numerus(forms) => builder.children(
            forms
                .iter()
                .map(|form| ElementBuilder::new("numerusform").text(form).build()),
        ),
    }
    .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::model::Status;
    use crate::i18n::parser::load;

    fn sample() -> Catalogue {
        let mut plural = Message::plural(
            "%n bookmarks indexed.",
            ["%n Lesezeichen indexiert.", "%n Lesezeichen indexiert."],
        )
        .with_status(Status::Vanished);
        plural.locations.push(Location {
            filename: Some("../src/plugin.cpp".into()),
            line: Some("105".into()),
        });

        Catalogue::new("de_DE")
            .with_context(
                Context::new("BookmarkItem")
                    .with_message(Message::new("Open URL", "URL öffnen"))
                    .with_message(Message::new("Copy <URL> & \"more\"", "Kopieren")),
            )
            .with_context(
                Context::new("Plugin")
                    .with_message(plural)
                    .with_message(
                        Message::new("Show favicons", "").with_status(Status::Unfinished),
                    )
                    .with_message(Message::new("Select", "Wähle").with_comment("dialog title")),
            )
    }

    #[test]
    fn test_reload_preserves_catalogue() {
        let catalogue = sample();
        let written = catalogue.to_ts_string().unwrap();
        let reloaded = load(&written).unwrap();
        assert_eq!(reloaded, catalogue);
    }

    #[test]
    fn test_output_header() {
        let written = sample().to_ts_string().unwrap();
        assert!(written.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<!DOCTYPE TS>\n<TS"));
        assert!(written.contains("version=\"2.1\""));
        assert!(written.contains("language=\"de_DE\""));
    }

    #[test]
    fn test_output_statuses_and_numerus() {
        let written = sample().to_ts_string().unwrap();
        assert!(written.contains("<message numerus=\"yes\">"));
        assert!(written.contains("type=\"vanished\""));
        assert!(written.contains("type=\"unfinished\""));
        assert!(written.contains("<numerusform>%n Lesezeichen indexiert.</numerusform>"));
    }

    #[test]
    fn test_output_escapes_markup() {
        let written = sample().to_ts_string().unwrap();
        assert!(written.contains("Copy &lt;URL> &amp;") || written.contains("Copy &lt;URL&gt; &amp;"));
    }

    #[test]
    fn test_control_characters_use_byte_elements() {
        let catalogue = Catalogue::new("de").with_context(
            Context::new("X").with_message(Message::new("bell", "ding\u{7}dong")),
        );
        let written = catalogue.to_ts_string().unwrap();
        assert!(written.contains("<byte value=\"x7\""));

        let reloaded = load(&written).unwrap();
        assert_eq!(reloaded, catalogue);
    }

    #[test]
    fn test_leading_and_adjacent_byte_elements_round_trip() {
        let catalogue = Catalogue::new("de").with_context(
            Context::new("X")
                .with_message(Message::new("start", "\u{1}\u{2}mid\u{3}"))
                .with_message(Message::new("only", "\u{7}")),
        );
        let written = catalogue.to_ts_string().unwrap();
        assert!(written.contains("<translation><byte value=\"x1\">"));

        let reloaded = load(&written).unwrap();
        assert_eq!(reloaded, catalogue);
    }

    #[test]
    fn test_whitespace_only_text_round_trip() {
        let catalogue = Catalogue::new("de").with_context(
            Context::new("X")
                .with_message(Message::new("  ", " "))
                .with_message(Message::new("Tab", "\t"))
                .with_message(Message::plural("%n", [" ", "%n "])),
        );
        let written = catalogue.to_ts_string().unwrap();
        let reloaded = load(&written).unwrap();
        assert_eq!(reloaded, catalogue);
    }

    #[test]
    fn test_empty_catalogue_round_trip() {
        let catalogue = Catalogue::empty();
        let reloaded = load(&catalogue.to_ts_string().unwrap()).unwrap();
        assert_eq!(reloaded, catalogue);
    }
}
