//! Path expressions evaluated against an [`Element`] subtree.
//!
//! The grammar covers what HMC documents need and nothing more:
//!
//! ```text
//! path     := segment ("/" segment)*
//! segment  := (name | "*") predicate?
//! predicate:= "[@" attr "=" quoted "]"
//! ```
//!
//! A `/` inside a predicate belongs to the predicate, so
//! `link[@href='https://h/x/1']` is a single segment.
//!
//! Names and attributes compare by local name. Evaluation is first-match,
//! depth-first in document order, backtracking across siblings when a later
//! segment fails to match.

use std::fmt;
use std::str::FromStr;

use crate::{Element, XmlError};

/// One step of a [`Path`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Required local name, `None` for the single-level wildcard.
    pub name: Option<String>,
    /// Optional `(attribute, value)` equality predicate.
    pub predicate: Option<(String, String)>,
}

impl Segment {
    fn matches(&self, element: &Element) -> bool {
        if let Some(name) = &self.name {
            if element.local_name() != name {
                return false;
            }
        }
        match &self.predicate {
            Some((attr, value)) => element.attribute(attr) == Some(value.as_str()),
            None => true,
        }
    }

    fn parse(raw: &str, expr: &str) -> Result<Self, XmlError> {
        let (head, predicate) = match raw.find('[') {
            Some(open) => {
                let inner = raw[open + 1..]
                    .strip_suffix(']')
                    .ok_or_else(|| XmlError::Path(format!("unterminated predicate in '{expr}'")))?;
                (&raw[..open], Some(parse_predicate(inner, expr)?))
            }
            None => (raw, None),
        };
        let name = match head {
            "*" => None,
            "" => return Err(XmlError::Path(format!("empty segment in '{expr}'"))),
            name if name.chars().any(|c| c.is_whitespace() || c == ']') => {
                return Err(XmlError::Path(format!("invalid name '{name}' in '{expr}'")));
            }
            name => Some(name.to_string()),
        };
        Ok(Segment { name, predicate })
    }
}

fn parse_predicate(inner: &str, expr: &str) -> Result<(String, String), XmlError> {
    let body = inner
        .strip_prefix('@')
        .ok_or_else(|| XmlError::Path(format!("predicate must test an attribute in '{expr}'")))?;
    let (attr, value) = body
        .split_once('=')
        .ok_or_else(|| XmlError::Path(format!("predicate needs '=' in '{expr}'")))?;
    let attr = attr.trim();
    let value = value.trim();
    let unquoted = value
        .strip_prefix('\'')
        .and_then(|v| v.strip_suffix('\''))
        .or_else(|| value.strip_prefix('"').and_then(|v| v.strip_suffix('"')))
        .ok_or_else(|| XmlError::Path(format!("predicate value must be quoted in '{expr}'")))?;
    if attr.is_empty() {
        return Err(XmlError::Path(format!("empty attribute name in '{expr}'")));
    }
    Ok((attr.to_string(), unquoted.to_string()))
}

/// Split `expr` on `/` separators that sit outside predicates and quotes.
fn split_segments(expr: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;
    for (pos, c) in expr.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"') if depth > 0 => quote = Some(c),
            (None, '[') => depth += 1,
            (None, ']') => depth = depth.saturating_sub(1),
            (None, '/') if depth == 0 => {
                parts.push(&expr[start..pos]);
                start = pos + 1;
            }
            _ => {}
        }
    }
    parts.push(&expr[start..]);
    parts
}

/// A parsed path expression. An empty expression (or `.`) selects the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    source: String,
    segments: Vec<Segment>,
}

impl Path {
    pub fn parse(expr: &str) -> Result<Self, XmlError> {
        let trimmed = expr.trim();
        let mut segments = Vec::new();
        if !trimmed.is_empty() && trimmed != "." {
            for raw in split_segments(trimmed) {
                if raw == "." {
                    continue;
                }
                segments.push(Segment::parse(raw, expr)?);
            }
        }
        Ok(Path {
            source: trimmed.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// First element reached by the full segment chain.
    pub fn find<'a>(&self, root: &'a Element) -> Option<&'a Element> {
        descend(root, &self.segments)
    }

    /// Mutable access to the element [`Path::find`] would return.
    pub fn find_mut<'a>(&self, root: &'a mut Element) -> Option<&'a mut Element> {
        let mut trail = Vec::with_capacity(self.segments.len());
        if !locate(root, &self.segments, &mut trail) {
            return None;
        }
        let mut node = root;
        for index in trail {
            node = node.children.get_mut(index)?;
        }
        Some(node)
    }

    /// Every element reached by the full segment chain, in document order.
    pub fn find_all<'a>(&self, root: &'a Element) -> Vec<&'a Element> {
        let mut out = Vec::new();
        collect(root, &self.segments, &mut out);
        out
    }

    /// Trimmed text of the first match; empty text counts as absent.
    pub fn text(&self, root: &Element) -> Option<String> {
        self.find(root)
            .map(|node| node.text().trim())
            .filter(|text| !text.is_empty())
            .map(str::to_string)
    }

    /// Attribute value on the first match.
    pub fn attribute(&self, root: &Element, name: &str) -> Option<String> {
        self.find(root)
            .and_then(|node| node.attribute(name))
            .map(str::to_string)
    }
}

impl FromStr for Path {
    type Err = XmlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Path::parse(s)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn descend<'a>(node: &'a Element, segments: &[Segment]) -> Option<&'a Element> {
    let Some((first, rest)) = segments.split_first() else {
        return Some(node);
    };
    node.children
        .iter()
        .filter(|child| first.matches(child))
        .find_map(|child| descend(child, rest))
}

fn locate(node: &Element, segments: &[Segment], trail: &mut Vec<usize>) -> bool {
    let Some((first, rest)) = segments.split_first() else {
        return true;
    };
    for (index, child) in node.children.iter().enumerate() {
        if !first.matches(child) {
            continue;
        }
        trail.push(index);
        if locate(child, rest, trail) {
            return true;
        }
        trail.pop();
    }
    false
}

fn collect<'a>(node: &'a Element, segments: &[Segment], out: &mut Vec<&'a Element>) {
    let Some((first, rest)) = segments.split_first() else {
        out.push(node);
        return;
    };
    for child in node.children.iter().filter(|child| first.matches(child)) {
        collect(child, rest, out);
    }
}

/// Evaluate `path` against `root`, returning the first matching element.
pub fn find<'a>(root: &'a Element, path: &Path) -> Option<&'a Element> {
    path.find(root)
}

/// Every element `path` reaches from `root`, in document order.
pub fn find_all<'a>(root: &'a Element, path: &Path) -> Vec<&'a Element> {
    path.find_all(root)
}

/// Trimmed text of the first element `path` reaches from `root`.
pub fn text(root: &Element, path: &Path) -> Option<String> {
    path.text(root)
}

/// Attribute `name` of the first element `path` reaches from `root`.
pub fn attribute(root: &Element, path: &Path, name: &str) -> Option<String> {
    path.attribute(root, name)
}
