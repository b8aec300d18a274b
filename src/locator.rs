use std::fmt;

use regex::Regex;
use scraper::ElementRef;

use crate::{ScrapeError, text_manipulators::extract_text};

/// How a single attribute has to look for an element to match.
#[derive(Debug, Clone)]
pub enum AttrMatch {
    /// The whole attribute value. For `class` a single class name is
    /// accepted as well.
    Exact(String),
    Pattern(Regex),
}

impl AttrMatch {
    fn matches(&self, name: &str, value: &str) -> bool {
        match self {
            AttrMatch::Exact(expected) => {
                value == expected.as_str()
                    || (name == "class"
                        && value
                            .split_whitespace()
                            .any(|class| class == expected.as_str()))
            }
            AttrMatch::Pattern(pattern) => pattern.is_match(value),
        }
    }
}

/// A typed "find the element that looks like this" constraint: a tag name,
/// any number of attribute constraints and optionally the element's label.
#[derive(Debug, Clone)]
pub struct Locator {
    tag: String,
    attrs: Vec<(String, AttrMatch)>,
    label: Option<String>,
}

impl Locator {
    pub fn tag(name: &str) -> Self {
        Self {
            tag: name.to_string(),
            attrs: vec![],
            label: None,
        }
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs
            .push((name.to_string(), AttrMatch::Exact(value.to_string())));
        self
    }

    pub fn attr_pattern(mut self, name: &str, pattern: Regex) -> Self {
        self.attrs.push((name.to_string(), AttrMatch::Pattern(pattern)));
        self
    }

    /// Requires the element's visible text to be `label`, ignoring
    /// surrounding whitespace and a trailing colon (`Status:` matches `Status`).
    pub fn label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    pub fn matches(&self, element: ElementRef) -> bool {
        let value = element.value();
        if value.name() != self.tag {
            return false;
        }
        let attrs_match = self.attrs.iter().all(|(name, constraint)| {
            value
                .attr(name)
                .is_some_and(|actual| constraint.matches(name, actual))
        });
        if !attrs_match {
            return false;
        }
        match &self.label {
            Some(label) => {
                extract_text(element).trim().trim_end_matches(':').trim() == label.as_str()
            }
            None => true,
        }
    }

    /// Every matching element below `root`, in document order. `root` itself
    /// is never a candidate.
    pub fn find_all<'a>(&self, root: ElementRef<'a>) -> Vec<ElementRef<'a>> {
        root.descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .filter(|element| self.matches(*element))
            .collect()
    }

    /// The first matching element below `root`. Missing markup is a
    /// [`ScrapeError::MissingElement`]; there is nothing sensible to fall back to.
    pub fn find<'a>(&self, root: ElementRef<'a>) -> Result<ElementRef<'a>, ScrapeError> {
        root.descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .find(|element| self.matches(*element))
            .ok_or_else(|| ScrapeError::MissingElement {
                locator: self.to_string(),
                context: format!("<{}>", root.value().name()),
            })
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.tag)?;
        for (name, constraint) in &self.attrs {
            match constraint {
                AttrMatch::Exact(value) => write!(f, " {name}=\"{value}\"")?,
                AttrMatch::Pattern(pattern) => write!(f, " {name}=/{pattern}/")?,
            }
        }
        write!(f, ">")?;
        if let Some(label) = &self.label {
            write!(f, "{label}")?;
        }
        Ok(())
    }
}

/// Reads a required attribute, e.g. an anchor's `href`.
pub fn required_attr<'a>(element: ElementRef<'a>, attr: &str) -> Result<&'a str, ScrapeError> {
    element
        .value()
        .attr(attr)
        .ok_or_else(|| ScrapeError::MissingAttribute {
            tag: element.value().name().to_string(),
            attr: attr.to_string(),
        })
}
