//! Route path patterns.
//!
//! # Responsibilities
//! - Parse `/blogs/:blog_id/articles/:id` notation into segments
//! - Format a pattern with concrete parameter values
//! - Match a concrete path against a pattern, extracting parameters
//!
//! # Design Decisions
//! - Segments are either literals or named parameters, nothing else
//! - Formatting never fails: a missing parameter renders as an empty segment
//!   and the result is separator-normalised
//! - Parameter values are percent-encoded on format and decoded on match, so
//!   a value can never span more than its own segment
//! - Literal matching is case-sensitive, like the path matcher it replaces

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use std::collections::BTreeMap;
use std::fmt;

/// Bytes escaped inside a path parameter value.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// A single path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Fixed text, matched literally.
    Literal(String),
    /// Named placeholder (`:id`).
    Param(String),
}

/// An ordered sequence of path segments.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RoutePattern {
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Parse a pattern such as `/blogs/:blog_id/articles/:id`.
    ///
    /// Empty segments are ignored, so `/`, `` and `//` all parse to the root
    /// pattern.
    pub fn parse(pattern: &str) -> Self {
        let segments = pattern
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| match s.strip_prefix(':') {
                Some(name) => Segment::Param(name.to_string()),
                None => Segment::Literal(s.to_string()),
            })
            .collect();

        Self { segments }
    }

    /// Build a pattern from already-split segments.
    pub fn from_segments(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Return a new pattern with `other`'s segments appended.
    pub fn join(&self, other: &RoutePattern) -> RoutePattern {
        let mut segments = self.segments.clone();
        segments.extend(other.segments.iter().cloned());
        RoutePattern { segments }
    }

    /// Names of all placeholders, in order.
    pub fn required_params(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Format the pattern with the given parameter values.
    pub fn format(&self, params: &BTreeMap<String, String>) -> String {
        let mut path = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) if !text.is_empty() => {
                    path.push('/');
                    path.push_str(text);
                }
                Segment::Param(name) => {
                    if let Some(value) = params.get(name).filter(|v| !v.is_empty()) {
                        path.push('/');
                        path.extend(utf8_percent_encode(value, SEGMENT));
                    }
                }
                Segment::Literal(_) => {}
            }
        }

        if path.is_empty() {
            path.push('/');
        }
        path
    }

    /// Format the pattern substituting only the `id` placeholder.
    pub fn format_id(&self, id: &str) -> String {
        let mut params = BTreeMap::new();
        params.insert("id".to_string(), id.to_string());
        self.format(&params)
    }

    /// Match a concrete path, returning extracted parameters on success.
    pub fn match_path(&self, path: &str) -> Option<BTreeMap<String, String>> {
        let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = BTreeMap::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(text) if text == part => {}
                Segment::Literal(_) => return None,
                Segment::Param(name) => {
                    let value = percent_decode_str(part).decode_utf8_lossy();
                    params.insert(name.clone(), value.into_owned());
                }
            }
        }

        Some(params)
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "/");
        }
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => write!(f, "/{}", text)?,
                Segment::Param(name) => write!(f, "/:{}", name)?,
            }
        }
        Ok(())
    }
}
