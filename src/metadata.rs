//! # Metadata tree
//!
//! Decoded hierarchical metadata of one ODIM_H5 file: groups, datasets and
//! attribute leaves under an unnamed root.
//!
//! ```text
//! /
//! ├── what/{object, date, time, source}
//! ├── where/{lon, lat, height}
//! └── dataset1/
//!     ├── what/{product, quantity}
//!     └── where/{elangle, nbins}
//! ```
//!
//! Nodes live in one arena owned by [`Metadata`]; a node's parent is an index
//! into that arena, so the tree holds no reference cycles. A node is reached
//! through a [`NodeRef`] borrowed from the tree.
//!
//! ```
//! use bdb_expr::metadata::Metadata;
//!
//! let mut meta = Metadata::new();
//! meta.add_group("/", "what").unwrap();
//! meta.add_attribute("/what/object", "PVOL").unwrap();
//!
//! assert_eq!(meta.what_object(), Some("PVOL"));
//! assert_eq!(meta.get_node("/what/object").unwrap().path(), "/what/object");
//! ```
pub mod attribute;
pub mod node;
pub mod source;

pub use attribute::{AttributeValue, DATE_FORMAT, TIME_FORMAT};
pub use node::{Node, NodeId, NodeKind, NodeRef};
pub use source::{Source, SourceError};

use std::collections::VecDeque;

use chrono::{NaiveDate, NaiveTime};

use node::Slot;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MetadataError {
    #[error("parent node not found: {0}")]
    ParentNotFound(String),

    #[error("cannot add children to attribute {0}")]
    NotAContainer(String),

    #[error("invalid node name '{0}'")]
    InvalidName(String),
}

const ROOT: NodeId = NodeId(0);

/// Arena-backed metadata tree of one file.
#[derive(Debug, Clone)]
pub struct Metadata {
    slots: Vec<Slot>,
}

impl Default for Metadata {
    fn default() -> Self {
        Self::new()
    }
}

impl Metadata {
    pub fn new() -> Self {
        Metadata {
            slots: vec![Slot {
                name: String::new(),
                kind: NodeKind::Root,
                parent: None,
                children: vec![],
            }],
        }
    }

    pub(crate) fn slot(&self, id: NodeId) -> &Slot {
        &self.slots[id.0]
    }

    pub fn root(&self) -> NodeRef<'_> {
        NodeRef::new(self, ROOT)
    }

    /// Looks a node up by handle. Orphaned nodes are still addressable.
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_>> {
        (id.0 < self.slots.len()).then(|| NodeRef::new(self, id))
    }

    /// Walks `path` from the root by exact child name.
    ///
    /// Empty segments are ignored, so `/what/date`, `what/date` and
    /// `/what//date` name the same node. Returns `None` as soon as a segment
    /// is missing.
    pub fn get_node(&self, path: &str) -> Option<NodeRef<'_>> {
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .try_fold(self.root(), |node, segment| node.child(segment))
    }

    /// Attaches `node` under the node at `parent_path`.
    ///
    /// A sibling with the same name is replaced in place and detached from
    /// the tree; its handle stays valid but it is no longer reachable.
    pub fn add_node(&mut self, parent_path: &str, node: Node) -> Result<NodeId, MetadataError> {
        if node.name.is_empty() || node.name.contains('/') {
            return Err(MetadataError::InvalidName(node.name));
        }

        let parent = self
            .get_node(parent_path)
            .ok_or_else(|| MetadataError::ParentNotFound(parent_path.to_string()))?;
        if !parent.kind().is_container() {
            return Err(MetadataError::NotAContainer(parent.path()));
        }
        let parent_id = parent.id();
        let existing = parent.child(&node.name).map(|child| child.id());

        let id = NodeId(self.slots.len());
        self.slots.push(Slot {
            name: node.name,
            kind: node.kind,
            parent: Some(parent_id),
            children: vec![],
        });

        let siblings = &mut self.slots[parent_id.0].children;
        match existing {
            Some(old) => {
                if let Some(position) = siblings.iter().position(|&child| child == old) {
                    siblings[position] = id;
                }
                self.slots[old.0].parent = None;
            }
            None => siblings.push(id),
        }

        Ok(id)
    }

    pub fn add_group(&mut self, parent_path: &str, name: &str) -> Result<NodeId, MetadataError> {
        self.add_node(parent_path, Node::group(name))
    }

    pub fn add_dataset(&mut self, parent_path: &str, name: &str) -> Result<NodeId, MetadataError> {
        self.add_node(parent_path, Node::dataset(name))
    }

    /// Adds an attribute given its full path, e.g. `/what/date`.
    pub fn add_attribute(
        &mut self,
        path: &str,
        value: impl Into<AttributeValue>,
    ) -> Result<NodeId, MetadataError> {
        let trimmed = path.trim_end_matches('/');
        let (parent_path, name) = trimmed.rsplit_once('/').unwrap_or(("", trimmed));
        self.add_node(parent_path, Node::attribute(name, value))
    }

    /// Breadth-first traversal from the root, children in insertion order.
    ///
    /// Each call starts a fresh traversal.
    pub fn iter(&self) -> LevelOrder<'_> {
        LevelOrder {
            metadata: self,
            queue: VecDeque::from([ROOT]),
        }
    }

    /// Attribute leaves in level order.
    pub fn attributes(&self) -> impl Iterator<Item = NodeRef<'_>> {
        self.iter().filter(|node| node.is_attribute())
    }

    pub fn attribute_value(&self, path: &str) -> Option<&AttributeValue> {
        self.get_node(path).and_then(|node| node.value())
    }

    fn text_attribute(&self, path: &str) -> Option<&str> {
        self.attribute_value(path).and_then(AttributeValue::as_text)
    }

    pub fn what_object(&self) -> Option<&str> {
        self.text_attribute("/what/object")
    }

    pub fn what_date(&self) -> Option<NaiveDate> {
        self.attribute_value("/what/date")?.as_date()
    }

    pub fn what_time(&self) -> Option<NaiveTime> {
        self.attribute_value("/what/time")?.as_time()
    }

    pub fn what_source(&self) -> Option<&str> {
        self.text_attribute("/what/source")
    }

    pub fn bdb_source_name(&self) -> Option<&str> {
        self.text_attribute("/_bdb/source_name")
    }

    pub fn bdb_file_uuid(&self) -> Option<&str> {
        self.text_attribute("/_bdb/uuid")
    }

    pub fn bdb_metadata_hash(&self) -> Option<&str> {
        self.text_attribute("/_bdb/metadata_hash")
    }

    pub fn bdb_file_size(&self) -> Option<i64> {
        self.attribute_value("/_bdb/file_size")?.as_long()
    }

    /// Parsed `/what/source`, named after `/_bdb/source_name` when present.
    pub fn source(&self) -> Result<Option<Source>, SourceError> {
        let Some(text) = self.what_source() else {
            return Ok(None);
        };
        let mut source: Source = text.parse()?;
        if let Some(name) = self.bdb_source_name() {
            source.set_name(name);
        }
        Ok(Some(source))
    }
}

impl<'a> IntoIterator for &'a Metadata {
    type Item = NodeRef<'a>;
    type IntoIter = LevelOrder<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Level-order cursor over a [`Metadata`] tree.
pub struct LevelOrder<'a> {
    metadata: &'a Metadata,
    queue: VecDeque<NodeId>,
}

impl<'a> Iterator for LevelOrder<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.queue.pop_front()?;
        self.queue
            .extend(self.metadata.slot(id).children.iter().copied());
        Some(NodeRef::new(self.metadata, id))
    }
}
