//! # Schema Map
//!
//! A flat, ordered index of the schema's leaves, rebuilt on every call.
//!
//! Entries whose path contains a repeat placeholder are templates. Object
//! leaves under array positions are recorded against the templates they
//! run through, then every template is replaced in place by one concrete
//! entry per index combination, `0..=max` for each placeholder. `max` is
//! the greatest index the data holds at that repeat position, whichever
//! field of the element the data sits in, and 0 when it holds none. So an
//! element that carries only a sibling field, or nothing at all (`{}`),
//! still has every field of the branch checked.

use std::collections::HashSet;
use std::fmt;

use vmod_core::{Leaf, ObjectPath, PathSegment};

use crate::meta::{render, SchemaLeaf};
use crate::schema::{SchemaNode, PLACEHOLDER};

/// One segment of a schema path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum TemplateSegment<'s> {
    Key(&'s str),
    /// An unresolved repeat position.
    Placeholder,
    /// A resolved repeat position.
    Index(usize),
}

impl fmt::Display for TemplateSegment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Placeholder => f.write_str(PLACEHOLDER),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct MapEntry<'s> {
    pub segments: Vec<TemplateSegment<'s>>,
    pub node: &'s SchemaNode,
    /// True for concrete entries produced by expanding a template.
    pub expanded: bool,
    /// Object paths recorded against a template.
    matches: Vec<ObjectPath>,
}

impl<'s> MapEntry<'s> {
    pub fn is_template(&self) -> bool {
        self.segments.contains(&TemplateSegment::Placeholder)
    }

    /// Key segments only.
    pub fn stripped(&self) -> Vec<&'s str> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                TemplateSegment::Key(key) => Some(*key),
                _ => None,
            })
            .collect()
    }

    /// The innermost key, if the path has one.
    pub fn field_name(&self) -> Option<&'s str> {
        self.segments.iter().rev().find_map(|s| match s {
            TemplateSegment::Key(key) => Some(*key),
            _ => None,
        })
    }

    pub fn schema_path(&self) -> String {
        render(&self.segments)
    }

    /// The object position this entry checks. Only meaningful once the
    /// entry is concrete.
    pub fn object_path(&self) -> ObjectPath {
        self.segments
            .iter()
            .filter_map(|s| match s {
                TemplateSegment::Key(key) => Some(PathSegment::Key((*key).to_string())),
                TemplateSegment::Index(index) => Some(PathSegment::Index(*index)),
                TemplateSegment::Placeholder => None,
            })
            .collect()
    }

    /// True if `path` runs through this template's first repeat position:
    /// same keys up to it, and an array index at it.
    fn accepts(&self, path: &ObjectPath) -> bool {
        self.segments
            .iter()
            .position(|s| *s == TemplateSegment::Placeholder)
            .is_some_and(|first| self.aligns(path, first))
    }

    /// True if `path` follows the template through position `upto`.
    fn aligns(&self, path: &ObjectPath, upto: usize) -> bool {
        let segments = path.segments();
        segments.len() > upto
            && self.segments[..=upto]
                .iter()
                .zip(segments)
                .all(|pair| match pair {
                    (TemplateSegment::Key(a), PathSegment::Key(b)) => *a == b.as_str(),
                    (TemplateSegment::Placeholder, PathSegment::Index(_)) => true,
                    _ => false,
                })
    }

    /// Greatest index observed at each placeholder position, counting only
    /// recorded paths that follow the template up to that position.
    fn maxima(&self) -> Vec<(usize, usize)> {
        self.segments
            .iter()
            .enumerate()
            .filter(|(_, s)| **s == TemplateSegment::Placeholder)
            .map(|(position, _)| {
                let max = self
                    .matches
                    .iter()
                    .filter(|path| self.aligns(path, position))
                    .filter_map(|path| path.segments()[position].as_index())
                    .max()
                    .unwrap_or(0);
                (position, max)
            })
            .collect()
    }

    /// Every concrete entry this template stands for, in index order.
    fn expand(&self) -> Vec<MapEntry<'s>> {
        let maxima = self.maxima();
        let mut combination = vec![0usize; maxima.len()];
        let mut out = Vec::new();

        loop {
            let mut segments = self.segments.clone();
            for ((position, _), index) in maxima.iter().zip(&combination) {
                segments[*position] = TemplateSegment::Index(*index);
            }
            out.push(MapEntry {
                segments,
                node: self.node,
                expanded: true,
                matches: Vec::new(),
            });

            // Odometer step: the last placeholder varies fastest.
            let mut digit = maxima.len();
            loop {
                if digit == 0 {
                    return out;
                }
                digit -= 1;
                if combination[digit] < maxima[digit].1 {
                    combination[digit] += 1;
                    break;
                }
                combination[digit] = 0;
            }
        }
    }
}

/// The per-call schema index.
#[derive(Debug, Clone)]
pub(crate) struct SchemaMap<'s> {
    entries: Vec<MapEntry<'s>>,
}

impl<'s> SchemaMap<'s> {
    pub fn build(leaves: Vec<SchemaLeaf<'s>>) -> Self {
        let entries = leaves
            .into_iter()
            .map(|leaf| MapEntry {
                segments: leaf.segments,
                node: leaf.node,
                expanded: false,
                matches: Vec::new(),
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[MapEntry<'s>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn template_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_template()).count()
    }

    /// Record object leaves under array positions against templates.
    pub fn record(&mut self, leaves: &[Leaf<'_>]) {
        for leaf in leaves.iter().filter(|l| l.path.has_index()) {
            for entry in self.entries.iter_mut().filter(|e| e.is_template()) {
                if entry.accepts(&leaf.path) {
                    entry.matches.push(leaf.path.clone());
                }
            }
        }
    }

    /// Replace every template with its concrete expansion, in place.
    pub fn expand(&mut self) {
        let mut expanded = Vec::with_capacity(self.entries.len());
        for entry in self.entries.drain(..) {
            if entry.is_template() {
                expanded.extend(entry.expand());
            } else {
                expanded.push(entry);
            }
        }
        self.entries = expanded;
    }

    /// Concrete object paths of every entry.
    pub fn object_paths(&self) -> HashSet<ObjectPath> {
        self.entries.iter().map(MapEntry::object_path).collect()
    }

    /// Every key name that appears in some entry's stripped path.
    pub fn key_names(&self) -> HashSet<&'s str> {
        self.entries.iter().flat_map(MapEntry::stripped).collect()
    }
}
