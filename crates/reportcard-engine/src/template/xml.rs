//! Minimal owned XML tree over `quick-xml` events.
//!
//! Parsing keeps every event (declaration, comments, whitespace) so that a
//! document serializes back to the same bytes when nothing was changed.

use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesStart, BytesText, Event};

#[derive(Debug, Clone)]
pub(crate) enum Node {
    Element(Element),
    Text(TextNode),
    /// Declarations, comments, CDATA, processing instructions, doctype.
    Other(Event<'static>),
}

#[derive(Debug, Clone)]
pub(crate) struct TextNode {
    raw: BytesText<'static>,
    decoded: String,
}

impl TextNode {
    pub(crate) fn new(text: &str) -> Self {
        Self {
            raw: BytesText::new(text).into_owned(),
            decoded: text.to_string(),
        }
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.decoded
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Element {
    start: BytesStart<'static>,
    pub(crate) children: Vec<Node>,
    self_closing: bool,
}

impl Element {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            start: BytesStart::new(name.to_string()),
            children: Vec::new(),
            self_closing: true,
        }
    }

    pub(crate) fn with_attribute(mut self, key: &str, value: &str) -> Self {
        self.start.push_attribute((key, value));
        self
    }

    pub(crate) fn push(&mut self, node: Node) {
        self.children.push(node);
    }

    /// Qualified name, e.g. `b"w:p"`.
    pub(crate) fn name(&self) -> &[u8] {
        self.start.name().into_inner()
    }

    pub(crate) fn is(&self, name: &[u8]) -> bool {
        self.name() == name
    }

    pub(crate) fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            _ => None,
        })
    }

    pub(crate) fn child_elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            _ => None,
        })
    }

    pub(crate) fn first_child(&self, name: &[u8]) -> Option<&Element> {
        self.child_elements().find(|child| child.is(name))
    }

    /// Concatenated decoded text of the direct text children.
    pub(crate) fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct XmlDocument {
    pub(crate) nodes: Vec<Node>,
}

impl XmlDocument {
    pub(crate) fn parse(xml: &[u8]) -> Result<Self, String> {
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(false);

        let mut buf = Vec::new();
        let mut stack: Vec<Element> = Vec::new();
        let mut nodes: Vec<Node> = Vec::new();

        loop {
            let event = reader
                .read_event_into(&mut buf)
                .map_err(|e| format!("{e} at byte {}", reader.buffer_position()))?;

            let node = match event {
                Event::Start(start) => {
                    stack.push(Element {
                        start: start.into_owned(),
                        children: Vec::new(),
                        self_closing: false,
                    });
                    buf.clear();
                    continue;
                }
                Event::End(_) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| "unexpected closing tag".to_string())?;
                    Node::Element(element)
                }
                Event::Empty(start) => Node::Element(Element {
                    start: start.into_owned(),
                    children: Vec::new(),
                    self_closing: true,
                }),
                Event::Text(text) => {
                    let decoded = text.unescape().map_err(|e| e.to_string())?.into_owned();
                    Node::Text(TextNode {
                        raw: text.into_owned(),
                        decoded,
                    })
                }
                Event::Eof => break,
                other => Node::Other(other.into_owned()),
            };

            match stack.last_mut() {
                Some(parent) => parent.children.push(node),
                None => nodes.push(node),
            }
            buf.clear();
        }

        if let Some(open) = stack.last() {
            return Err(format!(
                "unclosed element <{}>",
                String::from_utf8_lossy(open.name())
            ));
        }

        Ok(Self { nodes })
    }

    /// The root element, e.g. `w:document`.
    pub(crate) fn root_mut(&mut self) -> Option<&mut Element> {
        self.nodes.iter_mut().find_map(|node| match node {
            Node::Element(element) => Some(element),
            _ => None,
        })
    }

    pub(crate) fn root(&self) -> Option<&Element> {
        self.nodes.iter().find_map(|node| match node {
            Node::Element(element) => Some(element),
            _ => None,
        })
    }

    pub(crate) fn to_bytes(&self) -> Result<Vec<u8>, String> {
        let mut writer = Writer::new(Vec::new());
        for node in &self.nodes {
            write_node(&mut writer, node)?;
        }
        Ok(writer.into_inner())
    }
}

fn write_node(writer: &mut Writer<Vec<u8>>, node: &Node) -> Result<(), String> {
    match node {
        Node::Element(element) => {
            if element.self_closing && element.children.is_empty() {
                return write_event(writer, Event::Empty(element.start.clone()));
            }
            write_event(writer, Event::Start(element.start.clone()))?;
            for child in &element.children {
                write_node(writer, child)?;
            }
            write_event(writer, Event::End(element.start.to_end()))
        }
        Node::Text(text) => write_event(writer, Event::Text(text.raw.clone())),
        Node::Other(event) => write_event(writer, event.clone()),
    }
}

fn write_event(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), String> {
    writer.write_event(event).map_err(|e| e.to_string())
}
