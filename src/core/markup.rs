//! Thin read-only view over parsed HTML.
//!
//! The extractors only need four things from a document: find every element
//! of a tag, find the first element carrying an attribute value, read text,
//! and read an attribute. Everything `scraper`-specific stays in this file.

use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

static TABLE: LazyLock<Selector> = LazyLock::new(|| selector("table"));
static ROW: LazyLock<Selector> = LazyLock::new(|| selector("tr"));
static CELL: LazyLock<Selector> = LazyLock::new(|| selector("td"));
static LINK: LazyLock<Selector> = LazyLock::new(|| selector("a"));

fn selector(tag: &str) -> Selector {
    Selector::parse(tag).expect("static tag selector")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Table,
    Row,
    Cell,
    Link,
}

impl Tag {
    fn selector(self) -> &'static Selector {
        match self {
            Tag::Table => &TABLE,
            Tag::Row => &ROW,
            Tag::Cell => &CELL,
            Tag::Link => &LINK,
        }
    }
}

pub struct Document {
    html: Html,
}

impl Document {
    pub fn parse(markup: &str) -> Self {
        Self {
            html: Html::parse_document(markup),
        }
    }

    /// All elements of `tag` in document order, nested ones included.
    pub fn find_all(&self, tag: Tag) -> Vec<Node<'_>> {
        self.html.select(tag.selector()).map(Node).collect()
    }

    pub fn find_first_by_attr(&self, tag: Tag, attr: &str, value: &str) -> Option<Node<'_>> {
        self.html
            .select(tag.selector())
            .map(Node)
            .find(|node| node.attr(attr) == Some(value))
    }

    /// Elements of `tag` whose class list contains `class`.
    pub fn find_all_by_class(&self, tag: Tag, class: &str) -> Vec<Node<'_>> {
        self.html
            .select(tag.selector())
            .filter(|el| el.value().classes().any(|c| c == class))
            .map(Node)
            .collect()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Node<'a>(ElementRef<'a>);

impl<'a> Node<'a> {
    pub fn find_all(&self, tag: Tag) -> Vec<Node<'a>> {
        self.0.select(tag.selector()).map(Node).collect()
    }

    pub fn find_first(&self, tag: Tag) -> Option<Node<'a>> {
        self.0.select(tag.selector()).next().map(Node)
    }

    /// All descendant text, trimmed.
    pub fn text(&self) -> String {
        self.0.text().collect::<String>().trim().to_string()
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.0.value().attr(name)
    }
}

/// Trims and drops non-breaking spaces (used as thousands separators on the source pages).
pub fn clean_number(text: &str) -> String {
    text.trim().replace('\u{a0}', "")
}

/// True for a non-empty run of ASCII digits.
pub fn is_numeric(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_digit())
}
