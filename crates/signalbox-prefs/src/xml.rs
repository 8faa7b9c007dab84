// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Minimal element tree for the namespaced XML fragments the registry persists.
//!
//! Only what the preference document needs is modelled: element names, a
//! default namespace (`xmlns`), ordered attributes, child elements and a
//! single text node. Leaf text is kept byte for byte; whitespace-only text
//! between child elements (indentation) is dropped on read, as are comments
//! and processing instructions.

use crate::config::PrefsError;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

/// Root element name of the configuration document that holds fragments.
pub const DOCUMENT_ROOT: &str = "auxiliary-configuration";
/// Namespace of the configuration document root.
pub const DOCUMENT_NAMESPACE: &str = "http://www.netbeans.org/ns/auxiliary-configuration/1";

/// One XML element with attributes, children and optional text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    name: String,
    namespace: Option<String>,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
    text: Option<String>,
}

impl Element {
    /// Create an element without a namespace.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Create an element declaring `namespace` as its default namespace.
    pub fn with_namespace(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: Some(namespace.into()),
            ..Self::default()
        }
    }

    /// Element name as written (prefix included, if any).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared default namespace, if any.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// True when name and declared namespace both match.
    pub fn is(&self, name: &str, namespace: &str) -> bool {
        self.name == name && self.namespace.as_deref() == Some(namespace)
    }

    /// Attribute value by key.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set (or replace) an attribute.
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((key, value)),
        }
    }

    /// Builder form of [`Element::set_attribute`].
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(key, value);
        self
    }

    /// Trimmed text content, if any.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Builder that sets the text content.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Append a child element.
    pub fn push(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Builder form of [`Element::push`].
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// All child elements in document order.
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Children with the given name.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// First child with the given name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// True when the element has at least one child element.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Parse a document and return its root element.
    pub fn parse(xml: &str) -> Result<Self, PrefsError> {
        let mut reader = Reader::from_str(xml);

        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;
        loop {
            match reader.read_event()? {
                Event::Start(start) => stack.push(Self::from_start(&start)?),
                Event::Empty(start) => {
                    let element = Self::from_start(&start)?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::End(_) => {
                    let mut element = stack
                        .pop()
                        .ok_or_else(|| PrefsError::Malformed("unbalanced end tag".into()))?;
                    element.drop_layout_text();
                    attach(&mut stack, &mut root, element)?;
                }
                Event::Text(text) => {
                    let text = text.unescape()?;
                    append_text(&mut stack, &text);
                }
                Event::CData(data) => {
                    let bytes = data.into_inner();
                    append_text(&mut stack, utf8(&bytes)?);
                }
                Event::Eof => break,
                _ => {}
            }
        }
        if !stack.is_empty() {
            return Err(PrefsError::Malformed("unclosed element".into()));
        }
        root.ok_or_else(|| PrefsError::Malformed("document has no root element".into()))
    }

    /// Serialize this element as a standalone, indented document.
    pub fn to_xml(&self) -> Result<String, PrefsError> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        self.write_into(&mut writer)?;
        String::from_utf8(writer.into_inner()).map_err(|err| PrefsError::Malformed(err.to_string()))
    }

    fn from_start(start: &BytesStart<'_>) -> Result<Self, PrefsError> {
        let mut element = Self::new(utf8(start.name().as_ref())?);
        for attr in start.attributes() {
            let attr = attr.map_err(quick_xml::Error::from)?;
            let key = utf8(attr.key.as_ref())?.to_owned();
            let value = attr.unescape_value()?.into_owned();
            if key == "xmlns" {
                element.namespace = Some(value);
            } else {
                element.attributes.push((key, value));
            }
        }
        Ok(element)
    }

    /// Text gathered while parsing an element that has children is
    /// indentation unless it carries something other than whitespace.
    fn drop_layout_text(&mut self) {
        let has_children = !self.children.is_empty();
        let layout = self
            .text
            .as_deref()
            .is_some_and(|text| text.is_empty() || (has_children && text.trim().is_empty()));
        if layout {
            self.text = None;
        }
    }

    fn write_into(&self, writer: &mut Writer<Vec<u8>>) -> Result<(), PrefsError> {
        let mut start = BytesStart::new(self.name.as_str());
        if let Some(namespace) = &self.namespace {
            start.push_attribute(("xmlns", namespace.as_str()));
        }
        for (key, value) in &self.attributes {
            start.push_attribute((key.as_str(), value.as_str()));
        }
        if self.children.is_empty() && self.text.as_deref().is_none_or(str::is_empty) {
            writer.write_event(Event::Empty(start))?;
            return Ok(());
        }
        writer.write_event(Event::Start(start))?;
        if let Some(text) = self.text.as_deref().filter(|t| !t.is_empty()) {
            writer.write_event(Event::Text(BytesText::new(text)))?;
        }
        for child in &self.children {
            child.write_into(writer)?;
        }
        writer.write_event(Event::End(BytesEnd::new(self.name.as_str())))?;
        Ok(())
    }
}

fn utf8(bytes: &[u8]) -> Result<&str, PrefsError> {
    std::str::from_utf8(bytes).map_err(|err| PrefsError::Malformed(err.to_string()))
}

fn append_text(stack: &mut [Element], text: &str) {
    if let Some(top) = stack.last_mut() {
        match &mut top.text {
            Some(existing) => existing.push_str(text),
            None => top.text = Some(text.to_owned()),
        }
    }
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), PrefsError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(PrefsError::Malformed("multiple root elements".into()));
    }
    *root = Some(element);
    Ok(())
}

/// Configuration document: a root element holding one fragment per
/// `(name, namespace)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root: Element,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Empty document with the standard root.
    pub fn new() -> Self {
        Self {
            root: Element::with_namespace(DOCUMENT_ROOT, DOCUMENT_NAMESPACE),
        }
    }

    /// Parse a document. Any root element is accepted; its children are the fragments.
    pub fn parse(xml: &str) -> Result<Self, PrefsError> {
        Ok(Self {
            root: Element::parse(xml)?,
        })
    }

    /// Fragment stored under `name` and `namespace`.
    pub fn fragment(&self, name: &str, namespace: &str) -> Option<&Element> {
        self.root.children.iter().find(|c| c.is(name, namespace))
    }

    /// Insert a fragment, replacing any fragment with the same name and namespace in place.
    pub fn put_fragment(&mut self, fragment: Element) {
        let slot = self.root.children.iter_mut().find(|c| {
            c.name == fragment.name && c.namespace == fragment.namespace
        });
        match slot {
            Some(existing) => *existing = fragment,
            None => self.root.children.push(fragment),
        }
    }

    /// All fragments in document order.
    pub fn fragments(&self) -> &[Element] {
        &self.root.children
    }

    /// Serialize the whole document.
    pub fn to_xml(&self) -> Result<String, PrefsError> {
        self.root.to_xml()
    }
}
