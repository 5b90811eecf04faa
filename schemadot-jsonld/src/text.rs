//! Sanitizing of formatted text.
//!
//! Markup is parsed with an HTML5 parser and written back out element by
//! element, so what survives is always well-formed and never depends on
//! how the input was split across tags.

use crate::TextFormatRule;
use scraper::{ElementRef, Html, Node};
use url::Url;

/// Elements dropped together with their content under every rule.
const REMOVED_WITH_CONTENT: &[&str] = &[
    "script", "style", "iframe", "frame", "object", "embed", "template", "noscript",
];

const URL_ATTRIBUTES: &[&str] = &[
    "href", "src", "cite", "action", "formaction", "poster", "background", "longdesc",
];

const SAFE_SCHEMES: &[&str] = &["http", "https", "mailto", "tel"];

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "hr", "img", "input", "link", "meta", "source", "track", "wbr",
];

/// Applies a text format rule to markup.
///
/// Executable elements (`<script>`, `<style>`, frames and plugins) and
/// comments are always removed. Other tags survive only if the rule keeps
/// all markup or allows the tag; stripped tags keep their text. Event
/// handler attributes and URLs with unsafe schemes never survive. When no
/// markup survives, entities are decoded and the result is plain text.
/// Whitespace runs collapse to a single space.
pub fn sanitize(value: &str, rule: &TextFormatRule) -> String {
    let fragment = Html::parse_fragment(value);
    let mut sanitizer = Sanitizer {
        rule,
        markup: rule.keep_markup || !rule.allowed_tags.is_empty(),
        out: String::with_capacity(value.len()),
    };
    sanitizer.children(fragment.root_element());
    sanitizer.out.split_whitespace().collect::<Vec<_>>().join(" ")
}

struct Sanitizer<'a> {
    rule: &'a TextFormatRule,
    /// Output is markup, so text must be escaped.
    markup: bool,
    out: String,
}

impl Sanitizer<'_> {
    fn children(&mut self, element: ElementRef<'_>) {
        for child in element.children() {
            match child.value() {
                Node::Text(text) => self.text(text),
                Node::Element(_) => {
                    if let Some(child) = ElementRef::wrap(child) {
                        self.element(child);
                    }
                }
                _ => {}
            }
        }
    }

    fn element(&mut self, element: ElementRef<'_>) {
        let name = element.value().name();
        if REMOVED_WITH_CONTENT.contains(&name) {
            return;
        }
        if !self.keeps_tag(name) {
            let block = is_block(name);
            if block {
                self.out.push(' ');
            }
            self.children(element);
            if block {
                self.out.push(' ');
            }
            return;
        }

        self.out.push('<');
        self.out.push_str(name);
        let mut attributes: Vec<(&str, &str)> = element
            .value()
            .attrs()
            .filter(|(attribute, value)| self.keeps_attribute(attribute, value))
            .collect();
        attributes.sort_unstable_by_key(|(attribute, _)| *attribute);
        for (attribute, value) in attributes {
            self.out.push(' ');
            self.out.push_str(attribute);
            self.out.push_str("=\"");
            escape_into(&mut self.out, value, true);
            self.out.push('"');
        }
        self.out.push('>');
        if VOID_ELEMENTS.contains(&name) {
            return;
        }
        self.children(element);
        self.out.push_str("</");
        self.out.push_str(name);
        self.out.push('>');
    }

    fn text(&mut self, text: &str) {
        if self.markup {
            escape_into(&mut self.out, text, false);
        } else {
            self.out.push_str(text);
        }
    }

    fn keeps_tag(&self, name: &str) -> bool {
        is_plain_name(name)
            && (self.rule.keep_markup || self.rule.allowed_tags.iter().any(|t| t.eq_ignore_ascii_case(name)))
    }

    fn keeps_attribute(&self, name: &str, value: &str) -> bool {
        if !is_attribute_name(name) || name.starts_with("on") || name == "srcdoc" {
            return false;
        }
        if !self.rule.keep_markup && !self.rule.allowed_attributes.iter().any(|a| a.eq_ignore_ascii_case(name)) {
            return false;
        }
        !URL_ATTRIBUTES.contains(&name) || is_safe_url(value)
    }
}

/// Relative URLs and the web, mail and phone schemes.
fn is_safe_url(value: &str) -> bool {
    match Url::parse(value.trim()) {
        Ok(url) => SAFE_SCHEMES.contains(&url.scheme()),
        Err(url::ParseError::RelativeUrlWithoutBase) => true,
        Err(_) => false,
    }
}

fn is_plain_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic()) && chars.all(|c| c.is_ascii_alphanumeric())
}

fn is_attribute_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn escape_into(out: &mut String, value: &str, attribute: bool) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
}

/// Block-level tags become a space when stripped so words don't run together.
fn is_block(tag: &str) -> bool {
    matches!(
        tag,
        "p" | "br" | "div" | "li" | "ul" | "ol" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6"
            | "blockquote" | "tr" | "td" | "th" | "table" | "section" | "article"
    )
}
