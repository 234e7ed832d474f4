//! Generic decoding of the service's Atom-style XML feeds.
//!
//! [`FeedDocument::parse`] turns raw XML into a small element tree using
//! `quick-xml` events. [`FeedDocument::entries`] then yields one [`FeedEntry`]
//! per `<entry>`. Each entry reads named values out of elements shaped like
//! `<dxp:property name="ga:accountId" value="42"/>`, and the element and
//! attribute names to read come from a [`FieldSource`]. Every feed-specific
//! decoder in this crate is built on these two types.

use chrono::{DateTime, FixedOffset, NaiveDate};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::ClientError;

/// Which elements carry named values, and in which attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSource {
    pub tag: &'static str,
    pub name_attr: &'static str,
    pub value_attr: &'static str,
}

/// `<dxp:property name=".." value=".."/>` in management feeds.
pub const PROPERTY: FieldSource = FieldSource {
    tag: "dxp:property",
    name_attr: "name",
    value_attr: "value",
};

/// `<dxp:dimension name=".." value=".."/>` in data feeds.
pub const DIMENSION: FieldSource = FieldSource {
    tag: "dxp:dimension",
    name_attr: "name",
    value_attr: "value",
};

/// `<dxp:metric name=".." value=".."/>` in data feeds.
pub const METRIC: FieldSource = FieldSource {
    tag: "dxp:metric",
    name_attr: "name",
    value_attr: "value",
};

/// One XML element with its qualified name (`dxp:property`), attributes in
/// document order, children, and concatenated text content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
    text: String,
}

impl Element {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn text(&self) -> &str {
        self.text.trim()
    }

    #[must_use]
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// All descendants named `name`, depth-first in document order.
    pub fn descendants<'a, 'n>(&'a self, name: &'n str) -> Descendants<'a, 'n> {
        Descendants {
            stack: self.children.iter().rev().collect(),
            name,
        }
    }

    /// First descendant named `name`.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Element> {
        self.descendants(name).next()
    }

    /// First descendant named `name` whose `attr` equals `value`.
    #[must_use]
    pub fn find_where(&self, name: &str, attr: &str, value: &str) -> Option<&Element> {
        self.descendants(name).find(|e| e.attr(attr) == Some(value))
    }
}

/// Lazy depth-first walk returned by [`Element::descendants`].
pub struct Descendants<'a, 'n> {
    stack: Vec<&'a Element>,
    name: &'n str,
}

impl<'a> Iterator for Descendants<'a, '_> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(element) = self.stack.pop() {
            self.stack.extend(element.children.iter().rev());
            if element.name == self.name {
                return Some(element);
            }
        }
        None
    }
}

/// A parsed feed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedDocument {
    root: Element,
}

impl FeedDocument {
    /// Parses `xml` into an element tree.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Xml`] for malformed XML and
    /// [`ClientError::Decode`] when the document has no root element or an
    /// attribute or text node cannot be unescaped.
    pub fn parse(xml: &str) -> Result<Self, ClientError> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        // Open elements; the last one is the innermost.
        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            match reader.read_event()? {
                Event::Start(e) => stack.push(open_element(&e)?),
                Event::Empty(e) => {
                    let element = open_element(&e)?;
                    close_element(element, &mut stack, &mut root);
                }
                Event::End(_) => {
                    if let Some(element) = stack.pop() {
                        close_element(element, &mut stack, &mut root);
                    }
                }
                Event::Text(e) => {
                    if let Some(current) = stack.last_mut() {
                        let text = e
                            .unescape()
                            .map_err(|err| ClientError::decode("feed text", err.to_string()))?;
                        current.text.push_str(&text);
                    }
                }
                Event::CData(e) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        root.map(|root| Self { root })
            .ok_or_else(|| ClientError::decode("feed", "document has no root element"))
    }

    #[must_use]
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Every `<entry>` in the document, in order.
    pub fn entries(&self) -> impl Iterator<Item = FeedEntry<'_>> {
        self.root
            .descendants("entry")
            .map(|element| FeedEntry { element })
    }

    /// All elements named `tag` anywhere in the document.
    pub fn elements<'a, 'n>(&'a self, tag: &'n str) -> Descendants<'a, 'n> {
        self.root.descendants(tag)
    }

    /// Trimmed text of the first element named `tag`, or a decode error.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Decode`] when no such element exists.
    pub fn require_text(&self, tag: &str) -> Result<&str, ClientError> {
        if self.root.name == tag {
            return Ok(self.root.text());
        }
        self.root
            .find(tag)
            .map(Element::text)
            .ok_or_else(|| ClientError::decode("feed", format!("missing <{tag}>")))
    }
}

/// One `<entry>` of a feed.
#[derive(Debug, Clone, Copy)]
pub struct FeedEntry<'a> {
    element: &'a Element,
}

impl<'a> FeedEntry<'a> {
    #[must_use]
    pub fn element(&self) -> &'a Element {
        self.element
    }

    /// Text of the entry's `<id>`, empty when absent.
    #[must_use]
    pub fn id(&self) -> &'a str {
        self.child_text("id")
    }

    /// Text of the entry's `<title>`, empty when absent.
    #[must_use]
    pub fn title(&self) -> &'a str {
        self.child_text("title")
    }

    /// Text of the entry's `<updated>`, empty when absent.
    #[must_use]
    pub fn updated(&self) -> &'a str {
        self.child_text("updated")
    }

    /// `href` of the entry's `<link rel="self">`.
    #[must_use]
    pub fn self_link(&self) -> Option<&'a str> {
        self.element
            .find_where("link", "rel", "self")
            .and_then(|link| link.attr("href"))
    }

    /// First sub-element named `tag`.
    #[must_use]
    pub fn child(&self, tag: &str) -> Option<&'a Element> {
        self.element.find(tag)
    }

    /// `(local name, value)` pairs read from `source`, in document order.
    ///
    /// The name is the part after the last `:`, so `ga:accountId` becomes
    /// `accountId`.
    pub fn fields(&self, source: FieldSource) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.element.descendants(source.tag).filter_map(move |e| {
            let name = e.attr(source.name_attr)?;
            let value = e.attr(source.value_attr)?;
            Some((local_name(name), value))
        })
    }

    /// Value of the field whose local name is `name`.
    #[must_use]
    pub fn field(&self, source: FieldSource, name: &str) -> Option<&'a str> {
        self.fields(source)
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value)
    }

    /// Like [`FeedEntry::field`] but missing fields are a decode error.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Decode`] naming `context` and the field.
    pub fn require_field(
        &self,
        source: FieldSource,
        name: &str,
        context: &str,
    ) -> Result<&'a str, ClientError> {
        self.field(source, name).ok_or_else(|| {
            ClientError::decode(
                context,
                format!("entry {} has no {} named {name}", self.id(), source.tag),
            )
        })
    }

    fn child_text(&self, tag: &str) -> &'a str {
        self.element
            .children
            .iter()
            .find(|c| c.name == tag)
            .map_or("", Element::text)
    }
}

/// Segment after the last `:` of a qualified name.
#[must_use]
pub fn local_name(qualified: &str) -> &str {
    qualified.rsplit(':').next().unwrap_or(qualified)
}

pub(crate) fn parse_timestamp(
    raw: &str,
    context: &str,
) -> Result<DateTime<FixedOffset>, ClientError> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map_err(|e| ClientError::decode(context, format!("invalid timestamp \"{raw}\": {e}")))
}

pub(crate) fn parse_date(raw: &str, context: &str) -> Result<NaiveDate, ClientError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|e| ClientError::decode(context, format!("invalid date \"{raw}\": {e}")))
}

pub(crate) fn parse_number<T>(raw: &str, context: &str) -> Result<T, ClientError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ClientError::decode(context, format!("invalid number \"{raw}\": {e}")))
}

fn open_element(start: &BytesStart<'_>) -> Result<Element, ClientError> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| ClientError::decode("feed attribute", e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| ClientError::decode("feed attribute", e.to_string()))?
            .into_owned();
        attributes.push((key, value));
    }
    Ok(Element {
        name,
        attributes,
        ..Element::default()
    })
}

/// Attaches a finished element to its parent, or makes it the root.
fn close_element(element: Element, stack: &mut [Element], root: &mut Option<Element>) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => {
            if root.is_none() {
                *root = Some(element);
            }
        }
    }
}
