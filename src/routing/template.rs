//! URL template compilation and per-template matching.
//!
//! # Responsibilities
//! - Parse templates like `/api/admin/:object/:id/reports` or `/resources/*`
//! - Match split request paths segment by segment, capturing parameters
//! - Compute the shape (parameter names erased) used for duplicate detection
//! - Rank templates by specificity
//!
//! # Design Decisions
//! - Captured values are raw path text; no decoding, no format checks
//! - A parameter never matches an empty segment
//! - `*` is only legal as the last segment and may capture nothing

use std::cmp::Ordering;
use std::fmt;

/// Template compilation failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("template `{0}` must start with `/`")]
    MissingLeadingSlash(String),
    #[error("template `{0}` contains an empty segment")]
    EmptySegment(String),
    #[error("template `{0}` has a parameter without a name")]
    EmptyParamName(String),
    #[error("template `{0}` has a wildcard before its last segment")]
    WildcardNotLast(String),
    #[error("template `{template}` declares parameter `{name}` twice")]
    DuplicateParam { template: String, name: String },
}

/// One compiled template segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Param(String),
    Wildcard,
}

impl Segment {
    fn rank(&self) -> u8 {
        match self {
            Segment::Literal(_) => 3,
            Segment::Param(_) => 2,
            Segment::Wildcard => 1,
        }
    }
}

/// Template abstracted to its segment kinds. Two templates differing only
/// in parameter names have equal shapes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape(Vec<ShapeSegment>);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum ShapeSegment {
    Literal(String),
    Param,
    Wildcard,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.0 {
            match segment {
                ShapeSegment::Literal(text) => write!(f, "/{}", text)?,
                ShapeSegment::Param => f.write_str("/:")?,
                ShapeSegment::Wildcard => f.write_str("/*")?,
            }
        }
        Ok(())
    }
}

/// Values captured while matching one template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Captures {
    pub params: Vec<(String, String)>,
    pub wildcard: Option<String>,
}

/// A compiled URL template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    raw: String,
    segments: Vec<Segment>,
}

impl PathTemplate {
    /// Compile a template string.
    pub fn parse(raw: &str) -> Result<Self, TemplateError> {
        let rest = raw
            .strip_prefix('/')
            .ok_or_else(|| TemplateError::MissingLeadingSlash(raw.to_string()))?;

        let mut segments = Vec::new();
        if !rest.is_empty() {
            let parts: Vec<&str> = rest.split('/').collect();
            let last = parts.len() - 1;
            for (i, part) in parts.into_iter().enumerate() {
                let segment = if part.is_empty() {
                    return Err(TemplateError::EmptySegment(raw.to_string()));
                } else if part == "*" {
                    if i != last {
                        return Err(TemplateError::WildcardNotLast(raw.to_string()));
                    }
                    Segment::Wildcard
                } else if let Some(name) = part.strip_prefix(':') {
                    if name.is_empty() {
                        return Err(TemplateError::EmptyParamName(raw.to_string()));
                    }
                    let taken = segments
                        .iter()
                        .any(|s| matches!(s, Segment::Param(n) if n == name));
                    if taken {
                        return Err(TemplateError::DuplicateParam {
                            template: raw.to_string(),
                            name: name.to_string(),
                        });
                    }
                    Segment::Param(name.to_string())
                } else {
                    Segment::Literal(part.to_string())
                };
                segments.push(segment);
            }
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn has_wildcard(&self) -> bool {
        matches!(self.segments.last(), Some(Segment::Wildcard))
    }

    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            _ => None,
        })
    }

    pub fn shape(&self) -> Shape {
        Shape(
            self.segments
                .iter()
                .map(|s| match s {
                    Segment::Literal(text) => ShapeSegment::Literal(text.clone()),
                    Segment::Param(_) => ShapeSegment::Param,
                    Segment::Wildcard => ShapeSegment::Wildcard,
                })
                .collect(),
        )
    }

    /// Number of literal segments.
    pub fn literal_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Literal(_)))
            .count()
    }

    /// Match already-split path segments against this template.
    pub fn matches(&self, path: &[&str]) -> Option<Captures> {
        let mut captures = Captures::default();
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Wildcard => {
                    let rest = path.get(i..).unwrap_or_default();
                    captures.wildcard = Some(rest.join("/"));
                    return Some(captures);
                }
                Segment::Literal(text) => {
                    if path.get(i) != Some(&text.as_str()) {
                        return None;
                    }
                }
                Segment::Param(name) => match path.get(i) {
                    Some(value) if !value.is_empty() => {
                        captures.params.push((name.clone(), (*value).to_string()));
                    }
                    _ => return None,
                },
            }
        }
        (path.len() == self.segments.len()).then_some(captures)
    }

    /// Ordering by specificity: `Greater` means `self` is more specific.
    ///
    /// Segments are compared pairwise (literal > parameter > wildcard). When
    /// one template is a prefix of the other, the shorter one ranks higher:
    /// for two templates that can match the same path the longer one ends
    /// in a wildcard that captured nothing.
    pub fn cmp_specificity(&self, other: &PathTemplate) -> Ordering {
        for (a, b) in self.segments.iter().zip(other.segments.iter()) {
            match a.rank().cmp(&b.rank()) {
                Ordering::Equal => continue,
                unequal => return unequal,
            }
        }
        other.segments.len().cmp(&self.segments.len())
    }

    /// A concrete path this template matches, with `0` for every parameter
    /// and nothing for the wildcard.
    pub fn sample_path(&self) -> String {
        let mut path = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => {
                    path.push('/');
                    path.push_str(text);
                }
                Segment::Param(_) => path.push_str("/0"),
                Segment::Wildcard => {}
            }
        }
        if path.is_empty() {
            path.push('/');
        }
        path
    }

    /// [`sample_path`](Self::sample_path), plus, for a wildcard template,
    /// renderings whose wildcard absorbs extra `0` segments until the path
    /// is `max_segments` long.
    pub fn sample_paths(&self, max_segments: usize) -> Vec<String> {
        let base = self.sample_path();
        let mut samples = vec![base.clone()];
        if self.has_wildcard() {
            let fixed = self.segments.len() - 1;
            let mut path = base.trim_end_matches('/').to_string();
            for _ in fixed..max_segments {
                path.push_str("/0");
                samples.push(path.clone());
            }
        }
        samples
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Split a request path into segments. `/` yields no segments; a trailing
/// slash yields a final empty segment.
pub fn split_path(path: &str) -> Vec<&str> {
    let rest = path.strip_prefix('/').unwrap_or(path);
    if rest.is_empty() {
        Vec::new()
    } else {
        rest.split('/').collect()
    }
}
