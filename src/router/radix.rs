//! Radix tree implementation for HTTP route matching
//!
//! Static text is stored compressed: `/cup/{id}` and `/cupcake/{id}` share a
//! single `/cup` node whose children are `/{id}`'s `/` and `cake/`. Placeholders
//! and wildcards live in their own child groups, so every node has four ordered
//! groups of children:
//!
//! - **static** children, at most one per leading byte
//! - **regex** children (`{name:regex}`), in insertion order
//! - **param** children (`{name}`), in insertion order
//! - a single **wildcard** child (`*`)
//!
//! Lookup tries the groups in that order and backtracks across sibling
//! placeholders when a deeper match fails, so `/cupcake/{id}` and
//! `/cupcake/{name:[a-z]+}` can coexist at the same position.

use regex::Regex;
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

use super::endpoint::{Endpoint, EndpointTable};
use super::error::LookupError;
use super::method::Method;
use super::segment::{NodeKind, Segment, SLASH};

/// Captures kept inline before spilling to the heap.
/// Most routes have at most a handful of placeholders.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Byte range `(start, end)` of one captured value within the request path.
pub(crate) type Span = (usize, usize);

pub(crate) type SpanVec = SmallVec<[Span; MAX_INLINE_PARAMS]>;

/// Child groups of a node, keyed by [`NodeKind`].
#[derive(Debug, Clone)]
struct Children<H> {
    statics: Vec<RadixNode<H>>,
    regexes: Vec<RadixNode<H>>,
    params: Vec<RadixNode<H>>,
    wildcard: Vec<RadixNode<H>>,
}

impl<H> Default for Children<H> {
    fn default() -> Self {
        Self {
            statics: Vec::new(),
            regexes: Vec::new(),
            params: Vec::new(),
            wildcard: Vec::new(),
        }
    }
}

impl<H> Children<H> {
    fn group(&self, kind: NodeKind) -> &[RadixNode<H>] {
        match kind {
            NodeKind::Static => &self.statics,
            NodeKind::Regex => &self.regexes,
            NodeKind::Param => &self.params,
            NodeKind::Wildcard => &self.wildcard,
        }
    }

    fn group_mut(&mut self, kind: NodeKind) -> &mut Vec<RadixNode<H>> {
        match kind {
            NodeKind::Static => &mut self.statics,
            NodeKind::Regex => &mut self.regexes,
            NodeKind::Param => &mut self.params,
            NodeKind::Wildcard => &mut self.wildcard,
        }
    }

    /// All children, groups in lookup precedence order.
    fn iter(&self) -> impl Iterator<Item = &RadixNode<H>> {
        NodeKind::PRECEDENCE
            .into_iter()
            .flat_map(move |kind| self.group(kind).iter())
    }
}

/// Node in the radix tree.
#[derive(Debug, Clone)]
pub(crate) struct RadixNode<H> {
    kind: NodeKind,
    /// Literal bytes for static nodes; the placeholder name otherwise.
    prefix: Vec<u8>,
    /// First byte of `prefix`, used to pick a static child.
    head: u8,
    /// Byte that ends a capture for regex and param nodes.
    tail: u8,
    /// Anchored constraint for regex nodes.
    pattern: Option<Regex>,
    children: Children<H>,
    endpoints: EndpointTable<H>,
}

impl<H> RadixNode<H> {
    /// The empty static root.
    pub(crate) fn root() -> Self {
        Self::new_static(Vec::new())
    }

    fn new_static(prefix: Vec<u8>) -> Self {
        Self {
            kind: NodeKind::Static,
            head: prefix.first().copied().unwrap_or_default(),
            prefix,
            tail: SLASH,
            pattern: None,
            children: Children::default(),
            endpoints: EndpointTable::default(),
        }
    }

    fn new_capture(kind: NodeKind, name: &str, pattern: Option<Regex>, tail: u8) -> Self {
        let prefix = name.as_bytes().to_vec();
        Self {
            kind,
            head: prefix.first().copied().unwrap_or_default(),
            prefix,
            tail,
            pattern,
            children: Children::default(),
            endpoints: EndpointTable::default(),
        }
    }

    /// Insert an already validated pattern.
    ///
    /// Returns the endpoint that was previously registered for `method` on the
    /// final node, if any.
    pub(crate) fn insert(
        &mut self,
        segments: Vec<Segment<'_>>,
        method: Method,
        handler: H,
    ) -> Option<Endpoint<H>> {
        let mut param_keys: Vec<Arc<str>> = Vec::new();
        let mut node = self;

        for segment in segments {
            let kind = segment.kind();
            node = match segment {
                Segment::Static(literal) => node.descend_static(literal.as_bytes()),
                Segment::Param { name } => {
                    param_keys.push(Arc::from(name));
                    node.descend_capture(kind, name, None, SLASH)
                }
                Segment::Regex {
                    name,
                    pattern,
                    tail,
                } => {
                    param_keys.push(Arc::from(name));
                    node.descend_capture(kind, name, Some(pattern), tail)
                }
                Segment::Wildcard => node.descend_wildcard(),
            };
        }

        node.endpoints.set(
            method,
            Endpoint {
                param_keys: param_keys.into(),
                handler,
            },
        )
    }

    /// Walk (and extend) the static chain spelling out `literal`.
    fn descend_static(&mut self, literal: &[u8]) -> &mut Self {
        let Some(&head) = literal.first() else {
            return self;
        };

        let statics = &mut self.children.statics;
        let index = match statics.iter().position(|child| child.head == head) {
            Some(index) => index,
            None => {
                let index = statics.len();
                statics.push(RadixNode::new_static(literal.to_vec()));
                return &mut statics[index];
            }
        };

        let child = &mut statics[index];
        let common = common_prefix_len(literal, &child.prefix);
        if common < child.prefix.len() {
            child.split(common);
        }
        child.descend_static(&literal[common..])
    }

    /// Keep the first `at` bytes on this node and push the rest, together with
    /// the whole subtree and endpoints, down into a new static child.
    fn split(&mut self, at: usize) {
        let suffix = self.prefix.split_off(at);
        let mut lower = RadixNode::new_static(suffix);
        lower.kind = self.kind;
        lower.children = std::mem::take(&mut self.children);
        lower.endpoints = std::mem::take(&mut self.endpoints);
        self.children.statics.push(lower);
    }

    /// Reuse a sibling placeholder of identical shape or append a new one.
    fn descend_capture(
        &mut self,
        kind: NodeKind,
        name: &str,
        pattern: Option<Regex>,
        tail: u8,
    ) -> &mut Self {
        let group = self.children.group_mut(kind);
        let source = pattern.as_ref().map(Regex::as_str);
        let existing = group.iter().position(|child| {
            child.prefix == name.as_bytes()
                && child.tail == tail
                && child.pattern.as_ref().map(Regex::as_str) == source
        });
        let index = match existing {
            Some(index) => index,
            None => {
                group.push(RadixNode::new_capture(kind, name, pattern, tail));
                group.len() - 1
            }
        };
        &mut group[index]
    }

    fn descend_wildcard(&mut self) -> &mut Self {
        let group = self.children.group_mut(NodeKind::Wildcard);
        if group.is_empty() {
            group.push(RadixNode::new_capture(NodeKind::Wildcard, "*", None, SLASH));
        }
        &mut group[0]
    }

    /// Resolve `path` for `method`, starting at this node.
    pub(crate) fn lookup<'t>(
        &'t self,
        path: &str,
        method: Method,
    ) -> Result<Lookup<'t, H>, LookupError> {
        let mut walk = Walk {
            path,
            method,
            captures: SpanVec::new(),
            wildcard: None,
            method_mismatch: false,
        };

        match self.find(0, &mut walk) {
            Some(endpoint) => Ok(Lookup {
                endpoint,
                captures: walk.captures,
                wildcard: walk.wildcard,
            }),
            None if walk.method_mismatch => Err(LookupError::MethodNotAllowed),
            None => Err(LookupError::NotFound),
        }
    }

    /// Match `walk.path[pos..]` against this node's subtree.
    fn find<'t>(&'t self, pos: usize, walk: &mut Walk<'_>) -> Option<&'t Endpoint<H>> {
        if pos == walk.path.len() {
            if let Some(endpoint) = self.accept(walk) {
                return Some(endpoint);
            }
            // A trailing wildcard also matches an empty remainder.
            return self.find_wildcard(pos, walk);
        }

        for kind in NodeKind::PRECEDENCE {
            let found = match kind {
                NodeKind::Static => self.find_static(pos, walk),
                NodeKind::Regex | NodeKind::Param => self.find_capture(kind, pos, walk),
                NodeKind::Wildcard => self.find_wildcard(pos, walk),
            };
            if found.is_some() {
                return found;
            }
        }
        None
    }

    /// The path ends at this node: take its endpoint for the method, or note
    /// that the path exists under another method.
    fn accept(&self, walk: &mut Walk<'_>) -> Option<&Endpoint<H>> {
        let endpoint = self.endpoints.get(walk.method);
        if endpoint.is_none() && !self.endpoints.is_empty() {
            walk.method_mismatch = true;
        }
        endpoint
    }

    fn find_static<'t>(&'t self, pos: usize, walk: &mut Walk<'_>) -> Option<&'t Endpoint<H>> {
        let rest = &walk.path.as_bytes()[pos..];
        let head = *rest.first()?;
        let child = self.children.statics.iter().find(|c| c.head == head)?;
        if !rest.starts_with(&child.prefix) {
            return None;
        }
        child.find(pos + child.prefix.len(), walk)
    }

    fn find_capture<'t>(
        &'t self,
        kind: NodeKind,
        pos: usize,
        walk: &mut Walk<'_>,
    ) -> Option<&'t Endpoint<H>> {
        for child in self.children.group(kind) {
            let Some(end) = child.capture_end(walk.path, pos) else {
                continue;
            };
            walk.captures.push((pos, end));
            if let Some(endpoint) = child.find(end, walk) {
                return Some(endpoint);
            }
            walk.captures.pop();
        }
        None
    }

    fn find_wildcard<'t>(&'t self, pos: usize, walk: &mut Walk<'_>) -> Option<&'t Endpoint<H>> {
        let child = self.children.wildcard.first()?;
        let endpoint = child.accept(walk)?;
        walk.wildcard = Some(pos);
        Some(endpoint)
    }

    /// End of the value this placeholder would capture at `pos`, if it accepts one.
    ///
    /// A capture never spans a `/`. Only regex placeholders refuse an empty value.
    fn capture_end(&self, path: &str, pos: usize) -> Option<usize> {
        let rest = &path.as_bytes()[pos..];
        let len = match rest.iter().position(|&b| b == self.tail) {
            Some(len) => len,
            None if self.tail == SLASH => rest.len(),
            None => return None,
        };
        if (len == 0 && self.pattern.is_some()) || rest[..len].contains(&SLASH) {
            return None;
        }
        let span = path.get(pos..pos + len)?;
        if let Some(pattern) = &self.pattern {
            if !pattern.is_match(span) {
                return None;
            }
        }
        Some(pos + len)
    }

    /// Number of nodes in this subtree, including this one.
    pub(crate) fn node_count(&self) -> usize {
        1 + self.children.iter().map(RadixNode::node_count).sum::<usize>()
    }

    /// Write an indented description of this subtree, one node per line.
    pub(crate) fn write_tree<W: fmt::Write>(&self, out: &mut W, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);
        write!(out, "{indent}{} [{}]", self.label(), self.kind.as_str())?;
        if matches!(self.kind, NodeKind::Regex) && self.tail != SLASH {
            write!(out, " tail={:?}", char::from(self.tail))?;
        }
        if !self.endpoints.is_empty() {
            let methods: Vec<&str> = self
                .endpoints
                .methods()
                .into_iter()
                .map(Method::as_str)
                .collect();
            write!(out, " -> {}", methods.join(","))?;
        }
        writeln!(out)?;
        for child in self.children.iter() {
            child.write_tree(out, depth + 1)?;
        }
        Ok(())
    }

    fn label(&self) -> String {
        let text = String::from_utf8_lossy(&self.prefix);
        match self.kind {
            NodeKind::Static if text.is_empty() => "<root>".to_string(),
            NodeKind::Static => format!("{text:?}"),
            NodeKind::Param => format!("{{{text}}}"),
            NodeKind::Regex => {
                let anchored = self.pattern.as_ref().map(Regex::as_str).unwrap_or_default();
                let source = anchored
                    .strip_prefix("^(?:")
                    .and_then(|s| s.strip_suffix(")$"))
                    .unwrap_or(anchored);
                format!("{{{text}:{source}}}")
            }
            NodeKind::Wildcard => "*".to_string(),
        }
    }
}

/// Mutable state threaded through one lookup.
struct Walk<'p> {
    path: &'p str,
    method: Method,
    captures: SpanVec,
    wildcard: Option<usize>,
    method_mismatch: bool,
}

/// A successful lookup, before captures are paired with their names.
#[derive(Debug)]
pub(crate) struct Lookup<'t, H> {
    pub endpoint: &'t Endpoint<H>,
    pub captures: SpanVec,
    /// Start of the wildcard capture, which runs to the end of the path.
    pub wildcard: Option<usize>,
}

fn common_prefix_len(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}
