//! Network topology model: nodes, domain membership, interface nodes and connections.
//!
//! A [`Topology`] is built once per generation pass and refined in place by the
//! pipeline stages in [`domain`], [`interface`] and [`connection`].
use glam::Vec2;

pub mod connection;
pub mod domain;
pub mod interface;

use connection::{ConnectionKind, ConnectionSet};

/// Domain identifier. `0` means the node belongs to no domain.
pub type DomainId = u32;

/// Domain id of nodes outside every domain region.
pub const UNASSIGNED: DomainId = 0;

/// Index of a node inside its [`Topology`].
///
/// Two nodes are distinct even when they share coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// A sampled network element.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Position in canvas pixels.
    pub position: Vec2,
    /// Owning domain, or [`UNASSIGNED`].
    pub domain_id: DomainId,
    /// Whether the node may take part in remote connections.
    pub is_interface: bool,
}

impl Node {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            domain_id: UNASSIGNED,
            is_interface: false,
        }
    }

    /// Whether the node belongs to a domain. Only assigned nodes are connected and rendered.
    #[inline]
    pub fn is_assigned(&self) -> bool {
        self.domain_id != UNASSIGNED
    }
}

/// Counts describing a generated topology.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TopologySummary {
    pub nodes: usize,
    pub assigned_nodes: usize,
    pub populated_domains: usize,
    pub interface_nodes: usize,
    pub remote_connections: usize,
    pub local_connections: usize,
}

/// Nodes with their domain membership, interface selection and connections.
#[derive(Debug, Clone, Default)]
pub struct Topology {
    pub(crate) nodes: Vec<Node>,
    /// Membership per domain id; index 0 is always empty.
    pub(crate) domains: Vec<Vec<NodeId>>,
    /// Interface selection per domain id, parallel to `domains`.
    pub(crate) interfaces: Vec<Vec<NodeId>>,
    pub(crate) connections: ConnectionSet,
}

impl Topology {
    /// Creates an unassigned topology with one node per position.
    pub fn from_positions(positions: impl IntoIterator<Item = Vec2>) -> Self {
        Self {
            nodes: positions.into_iter().map(Node::new).collect(),
            ..Default::default()
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of domain ids in use, excluding [`UNASSIGNED`].
    pub fn domain_count(&self) -> usize {
        self.domains.len().saturating_sub(1)
    }

    /// Every node that fell inside the region of `domain`, in node order.
    ///
    /// A node inside several regions is listed under each of them, even though its
    /// `domain_id` names the last one.
    pub fn domain_members(&self, domain: DomainId) -> &[NodeId] {
        self.domains
            .get(domain as usize)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Interface nodes selected from the members of `domain`.
    pub fn domain_interfaces(&self, domain: DomainId) -> &[NodeId] {
        self.interfaces
            .get(domain as usize)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Interface selections of all domains, concatenated in domain order.
    ///
    /// A node selected by two domains appears twice.
    pub fn interface_pool(&self) -> Vec<NodeId> {
        self.interfaces.iter().flatten().copied().collect()
    }

    pub fn assigned_nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.iter().filter(|(_, n)| n.is_assigned())
    }

    pub fn interface_nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.iter().filter(|(_, n)| n.is_interface)
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    pub fn connections(&self) -> &ConnectionSet {
        &self.connections
    }

    pub fn summary(&self) -> TopologySummary {
        TopologySummary {
            nodes: self.nodes.len(),
            assigned_nodes: self.assigned_nodes().count(),
            populated_domains: self.domains.iter().filter(|m| !m.is_empty()).count(),
            interface_nodes: self.interface_nodes().count(),
            remote_connections: self.connections.count_kind(ConnectionKind::Remote),
            local_connections: self.connections.count_kind(ConnectionKind::Local),
        }
    }
}
