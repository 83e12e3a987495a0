//! HTML querying for harvested pages
//!
//! Element lookups are expressed as a tag name plus an attribute mapping
//! ([`ElementQuery`]) and answered in document order. A query that matches
//! nothing yields an empty vector; deciding whether that is an error is left
//! to the caller.

use crate::{HarvestError, Result};
use scraper::{ElementRef, Html, Selector};
use std::fmt;

/// A tag plus attribute constraints, e.g. `div` with `class = nav_menu`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementQuery {
    tag: String,
    attributes: Vec<(String, String)>,
}

impl ElementQuery {
    /// Matches every element with the given tag name
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attributes: Vec::new(),
        }
    }

    /// Requires an attribute value
    ///
    /// `class` matches when every whitespace-separated token is present in the
    /// element's class list; any other attribute must match exactly.
    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.push((name.to_string(), value.to_string()));
        self
    }

    /// Shorthand for `attr("class", value)`
    pub fn class(self, value: &str) -> Self {
        self.attr("class", value)
    }

    /// Shorthand for `attr("id", value)`
    pub fn id(self, value: &str) -> Self {
        self.attr("id", value)
    }

    /// Renders the query as a CSS selector
    ///
    /// # Examples
    ///
    /// ```
    /// use shop_harvest::crawler::ElementQuery;
    ///
    /// let query = ElementQuery::new("span").id("price");
    /// assert_eq!(query.to_css(), r#"span[id="price"]"#);
    /// ```
    pub fn to_css(&self) -> String {
        let mut css = self.tag.clone();

        for (name, value) in &self.attributes {
            if name == "class" {
                for token in value.split_whitespace() {
                    css.push_str(&format!("[class~=\"{}\"]", escape(token)));
                }
            } else {
                css.push_str(&format!("[{}=\"{}\"]", name, escape(value)));
            }
        }

        css
    }

    fn selector(&self) -> Result<Selector> {
        let css = self.to_css();
        Selector::parse(&css).map_err(|e| HarvestError::Selector {
            reason: format!("{:?}", e),
            selector: css.clone(),
        })
    }
}

impl fmt::Display for ElementQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// A parsed HTML page
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses page text; malformed markup is repaired, never rejected
    pub fn parse(text: &str) -> Self {
        Self {
            html: Html::parse_document(text),
        }
    }

    /// The whole document as a query scope
    pub fn root(&self) -> Scope<'_> {
        Scope {
            element: self.html.root_element(),
        }
    }

    /// Text content of every element matching `query`, in document order
    ///
    /// # Example
    ///
    /// ```
    /// use shop_harvest::crawler::{Document, ElementQuery};
    ///
    /// let doc = Document::parse(r#"<ul><li class="x">a</li><li class="x"> b </li></ul>"#);
    /// let texts = doc.query(&ElementQuery::new("li").class("x")).unwrap();
    /// assert_eq!(texts, vec!["a", "b"]);
    /// ```
    pub fn query(&self, query: &ElementQuery) -> Result<Vec<String>> {
        self.root().texts(query)
    }

    /// Value of `attribute` on every element matching `query` that carries it
    pub fn query_attr(&self, query: &ElementQuery, attribute: &str) -> Result<Vec<String>> {
        self.root().attrs(query, attribute)
    }
}

/// One element of a [`Document`] that further queries are confined to
#[derive(Clone, Copy)]
pub struct Scope<'a> {
    element: ElementRef<'a>,
}

impl<'a> Scope<'a> {
    /// Descendant elements matching `query`, as scopes of their own
    pub fn scopes(&self, query: &ElementQuery) -> Result<Vec<Scope<'a>>> {
        let selector = query.selector()?;
        Ok(self
            .element
            .select(&selector)
            .map(|element| Scope { element })
            .collect())
    }

    /// The first descendant matching `query`
    pub fn first(&self, query: &ElementQuery) -> Result<Option<Scope<'a>>> {
        Ok(self.scopes(query)?.into_iter().next())
    }

    /// Trimmed text content of every descendant matching `query`
    pub fn texts(&self, query: &ElementQuery) -> Result<Vec<String>> {
        Ok(self.scopes(query)?.iter().map(Scope::text).collect())
    }

    /// Value of `attribute` on every descendant matching `query` that carries it
    pub fn attrs(&self, query: &ElementQuery, attribute: &str) -> Result<Vec<String>> {
        Ok(self
            .scopes(query)?
            .iter()
            .filter_map(|scope| scope.attr(attribute))
            .collect())
    }

    /// Trimmed text content of this element
    pub fn text(&self) -> String {
        self.element.text().collect::<String>().trim().to_string()
    }

    /// Value of one attribute of this element
    pub fn attr(&self, attribute: &str) -> Option<String> {
        self.element.value().attr(attribute).map(str::to_string)
    }
}
