use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// Root token every display path starts from.
pub const ROOT_TOKEN: &str = "x";

/// One step into the document: object member or array element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// A display path into the original JSON document, e.g. `x.items[2].name`.
///
/// Built incrementally during rendering: a child path is its parent path
/// plus one segment. Keys are not escaped, so a key containing `.` or `[`
/// yields an ambiguous but deterministic string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct PathExpression {
    segments: Vec<PathSegment>,
}

impl PathExpression {
    /// The document root, rendered as the bare root token.
    pub fn root() -> Self {
        Self { segments: Vec::new() }
    }

    /// Child path for an object member: `{parent}.{key}`.
    pub fn key(&self, key: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Key(key.to_string()));
        Self { segments }
    }

    /// Child path for an array element: `{parent}[{index}]`.
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Parse a rendered display string back into segments, interpreting
    /// `.key` and `[index]` left-to-right from the root token.
    pub fn parse(text: &str) -> Option<Self> {
        let mut rest = text.strip_prefix(ROOT_TOKEN)?;
        let mut segments = Vec::new();
        while !rest.is_empty() {
            if let Some(tail) = rest.strip_prefix('.') {
                let end = tail.find(&['.', '['][..]).unwrap_or(tail.len());
                if end == 0 {
                    return None;
                }
                segments.push(PathSegment::Key(tail[..end].to_string()));
                rest = &tail[end..];
            } else if let Some(tail) = rest.strip_prefix('[') {
                let end = tail.find(']')?;
                let index = tail[..end].parse().ok()?;
                segments.push(PathSegment::Index(index));
                rest = &tail[end + 1..];
            } else {
                return None;
            }
        }
        Some(Self { segments })
    }

    /// Walk the segments down from `root`, if every step exists.
    pub fn resolve<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        let mut current = root;
        for segment in &self.segments {
            current = match segment {
                PathSegment::Key(key) => current.get(key.as_str())?,
                PathSegment::Index(index) => current.get(*index)?,
            };
        }
        Some(current)
    }
}

impl fmt::Display for PathExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(ROOT_TOKEN)?;
        for segment in &self.segments {
            match segment {
                PathSegment::Key(key) => write!(f, ".{key}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builds_and_formats_incrementally() {
        let path = PathExpression::root().key("items").index(2).key("name");
        assert_eq!(path.to_string(), "x.items[2].name");
        assert_eq!(PathExpression::root().to_string(), "x");
    }

    #[test]
    fn parse_round_trips_display() {
        for text in ["x", "x.a", "x[0]", "x.items[2].name", "x[1][0].deep"] {
            let parsed = PathExpression::parse(text).unwrap();
            assert_eq!(parsed.to_string(), text);
        }
        assert!(PathExpression::parse("y.a").is_none());
        assert!(PathExpression::parse("x[oops]").is_none());
    }

    #[test]
    fn resolves_against_document() {
        let doc = json!({"items": [{"name": "a"}, {"name": "b"}]});
        let path = PathExpression::parse("x.items[1].name").unwrap();
        assert_eq!(path.resolve(&doc), Some(&json!("b")));
        assert!(PathExpression::parse("x.items[5]").unwrap().resolve(&doc).is_none());
    }
}
