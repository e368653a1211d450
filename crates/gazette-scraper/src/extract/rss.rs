//! RSS 2.0 item extraction with `content:encoded` and `dc:creator` support.

use quick_xml::events::{BytesText, Event};
use quick_xml::Reader;

use super::{accept_title, non_empty, Draft};
use crate::error::ScraperError;
use crate::normalize::decode_entities;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Link,
    Encoded,
    Description,
    PubDate,
    Creator,
    Category,
}

impl Field {
    fn from_name(name: &[u8]) -> Option<Self> {
        match name {
            b"title" => Some(Self::Title),
            b"link" => Some(Self::Link),
            b"content:encoded" => Some(Self::Encoded),
            b"description" => Some(Self::Description),
            b"pubDate" => Some(Self::PubDate),
            b"dc:creator" | b"author" => Some(Self::Creator),
            b"category" => Some(Self::Category),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
struct ItemBuffer {
    title: String,
    link: String,
    encoded: String,
    description: String,
    pub_date: String,
    creator: String,
    category: String,
    categories: Vec<String>,
}

impl ItemBuffer {
    fn push_text(&mut self, field: Field, text: &str) {
        let target = match field {
            Field::Title => &mut self.title,
            Field::Link => &mut self.link,
            Field::Encoded => &mut self.encoded,
            Field::Description => &mut self.description,
            Field::PubDate => &mut self.pub_date,
            Field::Creator => &mut self.creator,
            Field::Category => &mut self.category,
        };
        target.push_str(text);
    }

    fn close_category(&mut self) {
        let label = std::mem::take(&mut self.category);
        if let Some(label) = non_empty(&decode_entities(&label)) {
            self.categories.push(label);
        }
    }

    /// Full content wins over the summary; the first non-empty one is kept.
    fn into_draft(self) -> Option<Draft> {
        let title = accept_title(&decode_entities(&self.title))?;
        let body = non_empty(&self.encoded)
            .or_else(|| non_empty(&self.description))
            .unwrap_or_default();
        Some(Draft {
            title,
            link: non_empty(&self.link),
            body,
            published: non_empty(&self.pub_date),
            author: non_empty(&decode_entities(&self.creator)),
            categories: self.categories,
            image_url: None,
        })
    }
}

/// Parses an RSS document into at most `limit` drafts.
///
/// Items without a title longer than ten characters are skipped. Text and
/// CDATA sections are both honored and may be mixed within one element.
///
/// # Errors
///
/// Returns [`ScraperError::Xml`] if the document is not well-formed XML.
pub fn parse_feed(xml: &str, limit: usize) -> Result<Vec<Draft>, ScraperError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut drafts = Vec::new();
    let mut item: Option<ItemBuffer> = None;
    let mut current: Option<Field> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = e.name();
                if name.as_ref() == b"item" {
                    item = Some(ItemBuffer::default());
                    current = None;
                } else if item.is_some() {
                    if let Some(field) = Field::from_name(name.as_ref()) {
                        current = Some(field);
                    }
                }
            }
            Ok(Event::End(e)) => {
                let name = e.name();
                if name.as_ref() == b"item" {
                    current = None;
                    if let Some(draft) = item.take().and_then(ItemBuffer::into_draft) {
                        drafts.push(draft);
                        if drafts.len() >= limit {
                            break;
                        }
                    } else {
                        tracing::debug!("skipping feed item without a usable title");
                    }
                } else if current.is_some() && Field::from_name(name.as_ref()) == current {
                    if current == Some(Field::Category) {
                        if let Some(buffer) = item.as_mut() {
                            buffer.close_category();
                        }
                    }
                    current = None;
                }
            }
            Ok(Event::Text(e)) => {
                if let (Some(buffer), Some(field)) = (item.as_mut(), current) {
                    buffer.push_text(field, &unescape_lossy(&e));
                }
            }
            Ok(Event::CData(e)) => {
                if let (Some(buffer), Some(field)) = (item.as_mut(), current) {
                    buffer.push_text(field, &String::from_utf8_lossy(&e));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ScraperError::Xml(e)),
            _ => {}
        }
    }

    tracing::debug!(count = drafts.len(), "parsed feed items");
    Ok(drafts)
}

/// Unescapes XML text, keeping the raw bytes when it references entities
/// XML does not define (e.g. `&nbsp;`); those are decoded later.
fn unescape_lossy(text: &BytesText<'_>) -> String {
    text.unescape()
        .map_or_else(|_| String::from_utf8_lossy(text).into_owned(), |s| s.into_owned())
}
