use crate::metadata::{AttributeValue, Metadata};

/// Stable index of a node inside one [`Metadata`] arena.
///
/// Handles are only meaningful for the tree that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// The unnamed root of every tree
    Root,

    /// Plain container (`what`, `where`, `how`)
    Group,

    /// Container holding data (`dataset1`, `data1`)
    Dataset,

    /// Leaf holding one scalar
    Attribute(AttributeValue),
}

impl NodeKind {
    pub fn is_container(&self) -> bool {
        !matches!(self, NodeKind::Attribute(_))
    }
}

/// A detached node, ready to be attached with [`Metadata::add_node`].
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub name: String,
    pub kind: NodeKind,
}

impl Node {
    pub fn group(name: impl Into<String>) -> Self {
        Node {
            name: name.into(),
            kind: NodeKind::Group,
        }
    }

    pub fn dataset(name: impl Into<String>) -> Self {
        Node {
            name: name.into(),
            kind: NodeKind::Dataset,
        }
    }

    pub fn attribute(name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        Node {
            name: name.into(),
            kind: NodeKind::Attribute(value.into()),
        }
    }
}

/// Arena slot. `parent` never owns; `children` keeps insertion order.
#[derive(Debug, Clone)]
pub(crate) struct Slot {
    pub(crate) name: String,
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

/// Borrowed view of one node of a [`Metadata`] tree.
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    metadata: &'a Metadata,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub(crate) fn new(metadata: &'a Metadata, id: NodeId) -> Self {
        NodeRef { metadata, id }
    }

    fn slot(&self) -> &'a Slot {
        self.metadata.slot(self.id)
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &'a str {
        &self.slot().name
    }

    pub fn kind(&self) -> &'a NodeKind {
        &self.slot().kind
    }

    pub fn is_attribute(&self) -> bool {
        matches!(self.slot().kind, NodeKind::Attribute(_))
    }

    /// The attribute's value, `None` for containers.
    pub fn value(&self) -> Option<&'a AttributeValue> {
        match &self.slot().kind {
            NodeKind::Attribute(value) => Some(value),
            _ => None,
        }
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.slot()
            .parent
            .map(|id| NodeRef::new(self.metadata, id))
    }

    pub fn children(self) -> impl Iterator<Item = NodeRef<'a>> {
        let metadata = self.metadata;
        metadata
            .slot(self.id)
            .children
            .iter()
            .map(move |&id| NodeRef::new(metadata, id))
    }

    pub fn child(&self, name: &str) -> Option<NodeRef<'a>> {
        self.children().find(|child| child.name() == name)
    }

    pub fn has_children(&self) -> bool {
        !self.slot().children.is_empty()
    }

    /// Names from just below the root down to this node.
    pub fn segments(&self) -> Vec<&'a str> {
        let mut segments = vec![];
        let mut current = Some(*self);
        while let Some(node) = current {
            if !matches!(node.kind(), NodeKind::Root) {
                segments.push(node.name());
            }
            current = node.parent();
        }
        segments.reverse();
        segments
    }

    /// Absolute path, `/` for the root.
    pub fn path(&self) -> String {
        format!("/{}", self.segments().join("/"))
    }
}
