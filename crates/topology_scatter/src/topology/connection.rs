//! Connection graph construction.
//!
//! Two kinds of undirected connections are drawn by rejection sampling:
//! - [`ConnectionKind::Remote`]: between interface nodes of different domains.
//! - [`ConnectionKind::Local`]: between any two nodes of the same domain.
//!
//! Pairs are deduplicated regardless of orientation and self-loops are never stored.
//! Every connection takes at most `max_attempts` candidate pairs; exceeding that
//! fails with [`Error::UnsatisfiableConstraint`] instead of sampling forever.
use std::collections::HashSet;
use std::fmt;

use rand::Rng as RngCore;
use tracing::debug;

use crate::error::{Error, Result};
use crate::sampling::rand_index;
use crate::topology::{Node, NodeId, Topology};

/// Domain relationship a connection was generated under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConnectionKind {
    /// Inter-domain connection between interface nodes.
    Remote,
    /// Intra-domain connection.
    Local,
}

impl ConnectionKind {
    /// Whether `a` and `b` satisfy the domain policy of this kind.
    pub fn admits(self, a: &Node, b: &Node) -> bool {
        if !a.is_assigned() || !b.is_assigned() {
            return false;
        }
        match self {
            ConnectionKind::Remote => a.domain_id != b.domain_id,
            ConnectionKind::Local => a.domain_id == b.domain_id,
        }
    }
}

impl fmt::Display for ConnectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionKind::Remote => f.write_str("remote"),
            ConnectionKind::Local => f.write_str("local"),
        }
    }
}

/// Undirected edge; `from` and `to` keep the orientation it was drawn with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Connection {
    pub from: NodeId,
    pub to: NodeId,
    pub kind: ConnectionKind,
}

impl Connection {
    fn key(&self) -> (NodeId, NodeId) {
        unordered(self.from, self.to)
    }
}

#[inline]
fn unordered(a: NodeId, b: NodeId) -> (NodeId, NodeId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Insertion-ordered set of undirected connections.
#[derive(Debug, Clone, Default)]
pub struct ConnectionSet {
    edges: Vec<Connection>,
    keys: HashSet<(NodeId, NodeId)>,
}

impl ConnectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the connection unless it is a self-loop or the pair exists in either
    /// orientation. Returns whether it was inserted.
    pub fn insert(&mut self, from: NodeId, to: NodeId, kind: ConnectionKind) -> bool {
        if from == to {
            return false;
        }
        let connection = Connection { from, to, kind };
        if !self.keys.insert(connection.key()) {
            return false;
        }
        self.edges.push(connection);
        true
    }

    pub fn contains(&self, a: NodeId, b: NodeId) -> bool {
        self.keys.contains(&unordered(a, b))
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Connections in insertion order, which is also the draw order.
    pub fn iter(&self) -> std::slice::Iter<'_, Connection> {
        self.edges.iter()
    }

    pub fn of_kind(&self, kind: ConnectionKind) -> impl Iterator<Item = &Connection> + '_ {
        self.edges.iter().filter(move |c| c.kind == kind)
    }

    pub fn count_kind(&self, kind: ConnectionKind) -> usize {
        self.of_kind(kind).count()
    }
}

impl<'a> IntoIterator for &'a ConnectionSet {
    type Item = &'a Connection;
    type IntoIter = std::slice::Iter<'a, Connection>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Connection counts and attempt cap for [`build_connections`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionTargets {
    /// Remote connections to build.
    pub remote: usize,
    /// Local connections to build.
    pub local: usize,
    /// Candidate pairs allowed per connection.
    pub max_attempts: usize,
}

/// Builds remote connections over the interface pool, then local connections over
/// all nodes, into `topology`'s connection set.
pub fn build_connections(
    topology: &mut Topology,
    targets: ConnectionTargets,
    rng: &mut dyn RngCore,
) -> Result<()> {
    let interface_pool = topology.interface_pool();
    let all_nodes: Vec<NodeId> = (0..topology.nodes.len()).map(NodeId).collect();

    let mut connections = std::mem::take(&mut topology.connections);
    let result = sample_connections(
        &topology.nodes,
        &interface_pool,
        ConnectionKind::Remote,
        targets.remote,
        targets.max_attempts,
        &mut connections,
        rng,
    )
    .and_then(|_| {
        sample_connections(
            &topology.nodes,
            &all_nodes,
            ConnectionKind::Local,
            targets.local,
            targets.max_attempts,
            &mut connections,
            rng,
        )
    });
    topology.connections = connections;
    result?;

    debug!(
        "Built {} remote and {} local connections.",
        topology.connections.count_kind(ConnectionKind::Remote),
        topology.connections.count_kind(ConnectionKind::Local)
    );

    Ok(())
}

fn sample_connections(
    nodes: &[Node],
    pool: &[NodeId],
    kind: ConnectionKind,
    count: usize,
    max_attempts: usize,
    connections: &mut ConnectionSet,
    rng: &mut dyn RngCore,
) -> Result<()> {
    for placed in 0..count {
        let unsatisfiable = |attempts| Error::UnsatisfiableConstraint {
            kind,
            placed,
            target: count,
            attempts,
        };

        if pool.len() < 2 {
            return Err(unsatisfiable(0));
        }

        let mut attempts = 0;
        loop {
            if attempts >= max_attempts {
                return Err(unsatisfiable(attempts));
            }
            attempts += 1;

            let from = pool[rand_index(rng, pool.len())];
            let to = pool[rand_index(rng, pool.len())];
            if from == to || !kind.admits(&nodes[from.0], &nodes[to.0]) {
                continue;
            }
            if connections.insert(from, to, kind) {
                break;
            }
        }
    }

    Ok(())
}
