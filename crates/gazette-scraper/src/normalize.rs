//! Turns raw article bodies (feed HTML, page fragments, or flat text) into
//! paragraph-structured display content plus a bounded plain-text excerpt.
//!
//! Extraction is pattern based. Output keeps paragraphs separated by a blank
//! line and only the `<strong>`, `<em>`, `<blockquote>`, `<ul>`, `<ol>` and
//! `<li>` tags, all without attributes.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Maximum excerpt length in characters before `...` is appended.
pub const EXCERPT_MAX_CHARS: usize = 200;

/// Maximum title length used for a placeholder excerpt.
pub const PLACEHOLDER_MAX_CHARS: usize = 150;

const SENTENCES_PER_PARAGRAPH: usize = 3;

static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z]{2,8});").expect("valid regex")
});
static SCRIPT_STYLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>|<!--.*?-->")
        .expect("valid regex")
});
static PARAGRAPH_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<p[\s/>]").expect("valid regex"));
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<(/?)([a-zA-Z][a-zA-Z0-9]*)\b[^>]*>").expect("valid regex"));
static ANY_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?[a-zA-Z][^>]*>").expect("valid regex"));
static CANONICAL_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(/?)(?:strong|em|blockquote|ul|ol|li)>").expect("valid regex")
});
static BLANK_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[ \t]*\n").expect("valid regex"));
static HORIZONTAL_WS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t\u{a0}]+").expect("valid regex"));
static LINE_EDGE_WS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" ?\n ?").expect("valid regex"));
static EXCESS_NEWLINES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid regex"));
static ANY_WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Display-ready body of an article.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NormalizedContent {
    pub content: String,
    pub excerpt: String,
}

/// Normalizes a raw body into paragraph-structured content and an excerpt.
///
/// Empty or whitespace-only input yields empty `content` and `excerpt`.
/// The function is pure: the same input always produces the same output.
#[must_use]
pub fn normalize_content(raw: &str) -> NormalizedContent {
    if raw.trim().is_empty() {
        return NormalizedContent::default();
    }

    let decoded = decode_entities(&raw.replace("\r\n", "\n"));
    let without_scripts = SCRIPT_STYLE_RE.replace_all(&decoded, "");
    let has_paragraph_markers = PARAGRAPH_MARKER_RE.is_match(&without_scripts);

    let simplified = TAG_RE.replace_all(&without_scripts, |caps: &Captures<'_>| {
        simplify_tag(&caps[1], &caps[2], has_paragraph_markers)
    });

    let mut content = collapse_whitespace(&simplified);
    if !content.is_empty() && !content.contains("\n\n") {
        content = rebuild_paragraphs(&content);
    }

    let excerpt = make_excerpt(&content);
    NormalizedContent { content, excerpt }
}

/// Placeholder body for records that carry no body text: the title, cut to
/// [`PLACEHOLDER_MAX_CHARS`], serves as both excerpt and content.
#[must_use]
pub fn placeholder_content(title: &str) -> NormalizedContent {
    let text = truncate_with_ellipsis(title.trim(), PLACEHOLDER_MAX_CHARS);
    NormalizedContent {
        content: text.clone(),
        excerpt: text,
    }
}

/// Builds a plain-text excerpt from normalized content.
///
/// Tags are removed and all whitespace (newlines included) collapses to a
/// single space. Longer results are cut to [`EXCERPT_MAX_CHARS`] characters
/// and suffixed with `...`.
#[must_use]
pub fn make_excerpt(content: &str) -> String {
    let text = strip_tags(content);
    let flat = ANY_WS_RE.replace_all(&text, " ");
    truncate_with_ellipsis(flat.trim(), EXCERPT_MAX_CHARS)
}

/// Removes every tag, keeping the text between them.
#[must_use]
pub fn strip_tags(html: &str) -> String {
    ANY_TAG_RE.replace_all(html, "").into_owned()
}

/// Decodes the fixed entity table in a single pass, then folds curly quotes.
///
/// Unknown entities are left untouched, and decoded output is never decoded
/// again, so `&amp;lt;` becomes `&lt;`. Literal curly quotes end up the same
/// as their entity forms, so text an XML parser already unescaped matches
/// text that arrived escaped.
#[must_use]
pub fn decode_entities(text: &str) -> String {
    let decoded = ENTITY_RE.replace_all(text, |caps: &Captures<'_>| {
        lookup_entity(&caps[1]).map_or_else(|| caps[0].to_string(), str::to_owned)
    });
    fold_curly_quotes(&decoded)
}

/// Replaces typographic single and double quotes with their ASCII forms.
#[must_use]
pub fn fold_curly_quotes(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            other => other,
        })
        .collect()
}

fn lookup_entity(name: &str) -> Option<&'static str> {
    let decoded = match name {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" | "ldquo" | "rdquo" => "\"",
        "apos" | "lsquo" | "rsquo" => "'",
        "ndash" => "\u{2013}",
        "mdash" => "\u{2014}",
        "nbsp" => " ",
        "hellip" => "\u{2026}",
        _ => {
            let code = parse_numeric_entity(name)?;
            return match code {
                38 => Some("&"),
                60 => Some("<"),
                62 => Some(">"),
                34 | 0x201C | 0x201D => Some("\""),
                39 | 0x2018 | 0x2019 => Some("'"),
                0x2013 => Some("\u{2013}"),
                0x2014 => Some("\u{2014}"),
                160 => Some(" "),
                0x2026 => Some("\u{2026}"),
                _ => None,
            };
        }
    };
    Some(decoded)
}

fn parse_numeric_entity(name: &str) -> Option<u32> {
    let digits = name.strip_prefix('#')?;
    if let Some(hex) = digits.strip_prefix(['x', 'X']) {
        u32::from_str_radix(hex, 16).ok()
    } else {
        digits.parse::<u32>().ok()
    }
}

fn simplify_tag(closing: &str, name: &str, paragraph_mode: bool) -> String {
    let name = name.to_ascii_lowercase();
    let canonical = match name.as_str() {
        "b" | "strong" => "strong",
        "i" | "em" => "em",
        "blockquote" | "ul" | "ol" | "li" => name.as_str(),
        "br" => return "\n".to_string(),
        "p" if paragraph_mode => return "\n\n".to_string(),
        "div" | "section" | "article" | "header" | "footer" | "figure" | "figcaption" | "h1"
        | "h2" | "h3" | "h4" | "h5" | "h6" | "tr" | "table" => return "\n".to_string(),
        _ => return String::new(),
    };
    format!("<{closing}{canonical}>")
}

fn collapse_whitespace(text: &str) -> String {
    let text = BLANK_LINE_RE.replace_all(text, "\n\n");
    let text = HORIZONTAL_WS_RE.replace_all(&text, " ");
    let text = LINE_EDGE_WS_RE.replace_all(&text, "\n");
    let text = EXCESS_NEWLINES_RE.replace_all(&text, "\n\n");
    text.trim().to_string()
}

/// Regroups flat text into paragraphs of at most three sentences. A sentence
/// containing a quotation mark closes its paragraph immediately. Breaks are
/// deferred until every canonical element opened so far has been closed.
fn rebuild_paragraphs(text: &str) -> String {
    let flat = ANY_WS_RE.replace_all(text, " ");
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current: Vec<String> = Vec::new();

    let mut open_depth: isize = 0;

    for sentence in split_sentences(&flat) {
        let quoted = sentence.contains('"');
        open_depth += canonical_depth_delta(&sentence);
        current.push(sentence);
        // never break inside an open <li>, <blockquote>, <strong>, ...
        if open_depth <= 0 && (quoted || current.len() >= SENTENCES_PER_PARAGRAPH) {
            open_depth = 0;
            paragraphs.push(current.join(" "));
            current.clear();
        }
    }
    if !current.is_empty() {
        paragraphs.push(current.join(" "));
    }

    paragraphs.join("\n\n")
}

/// Net number of canonical elements opened by `sentence`.
fn canonical_depth_delta(sentence: &str) -> isize {
    CANONICAL_TAG_RE
        .captures_iter(sentence)
        .map(|caps| if caps[1].is_empty() { 1 } else { -1 })
        .sum()
}

/// Splits after `.`, `!` or `?` (optionally followed by a closing quote or
/// parenthesis) when the next character is whitespace.
fn split_sentences(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut sentences = Vec::new();
    let mut start = 0;

    for (i, &c) in chars.iter().enumerate() {
        let terminal = match c {
            '.' | '!' | '?' => true,
            '"' | '\'' | ')' | '\u{201D}' | '\u{2019}' => {
                i > 0 && matches!(chars[i - 1], '.' | '!' | '?')
            }
            _ => false,
        };
        let before_space = chars.get(i + 1).is_some_and(|n| n.is_whitespace());
        if terminal && before_space {
            push_sentence(&mut sentences, &chars[start..=i]);
            start = i + 1;
        }
    }
    if start < chars.len() {
        push_sentence(&mut sentences, &chars[start..]);
    }

    sentences
}

fn push_sentence(sentences: &mut Vec<String>, chars: &[char]) {
    let sentence: String = chars.iter().collect();
    let sentence = sentence.trim();
    if !sentence.is_empty() {
        sentences.push(sentence.to_string());
    }
}

fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", text[..cut].trim_end()),
        None => text.to_string(),
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
