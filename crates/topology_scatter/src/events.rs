//! Event types and sinks for observing generation passes.
//!
//! This module defines [`GenerationEvent`] and a set of sinks to emit, collect or
//! forward events while running a [`crate::generator::TopologyGenerator`].
use crate::config::TopologyConfig;
use crate::topology::domain::DomainRegion;
use crate::topology::TopologySummary;

/// Describes events emitted by a generation pass, in pipeline order.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum GenerationEvent {
    /// Emitted when a pass starts.
    RunStarted {
        /// The configuration used.
        config: TopologyConfig,
    },

    /// Emitted after node sampling.
    NodesPlaced {
        /// Number of placed nodes.
        count: usize,
        /// Enforced minimum distance.
        min_distance: f32,
    },

    /// Emitted after domain assignment.
    DomainsAssigned {
        /// Regions in id order.
        regions: Vec<DomainRegion>,
        /// Nodes that ended up in some domain.
        assigned_nodes: usize,
    },

    /// Emitted after interface selection.
    InterfacesSelected {
        /// Distinct interface nodes.
        interface_nodes: usize,
        /// Domains that contributed at least one interface node.
        populated_domains: usize,
    },

    /// Emitted after connection building.
    ConnectionsBuilt {
        /// Remote (inter-domain) connections.
        remote: usize,
        /// Local (intra-domain) connections.
        local: usize,
    },

    /// Emitted after rasterization.
    Rendered {
        /// Pixel dimensions (width, height).
        size_px: (u32, u32),
    },

    /// Emitted when the pass finishes successfully.
    RunFinished {
        /// Counts for the generated topology.
        summary: TopologySummary,
    },

    /// Non-fatal warning generated during a pass.
    Warning {
        /// Pipeline stage the warning belongs to.
        context: String,
        /// Human-readable message.
        message: String,
    },
}

/// A generic event sink that accepts [`GenerationEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: GenerationEvent);

    fn send_many<I>(&mut self, events: I)
    where
        Self: Sized,
        I: IntoIterator<Item = GenerationEvent>,
    {
        for e in events {
            self.send(e);
        }
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: GenerationEvent) {}
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(GenerationEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(GenerationEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(GenerationEvent),
{
    #[inline]
    fn send(&mut self, event: GenerationEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects all events in a `Vec`.
#[derive(Default)]
pub struct VecSink {
    events: Vec<GenerationEvent>,
}

impl VecSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn into_inner(self) -> Vec<GenerationEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[GenerationEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: GenerationEvent) {
        self.events.push(event);
    }
}
