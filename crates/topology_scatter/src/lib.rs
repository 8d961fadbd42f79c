#![forbid(unsafe_code)]
//! topology_scatter: procedural network-topology images.
//!
//! Modules:
//! - sampling: minimum-distance rejection sampling of node positions
//! - topology: nodes, domain assignment, interface selection, connection building
//! - raster: canvas, anti-aliased lines and node discs, PNG encoding
//! - generator: runner chaining the stages, with events
//!
//! All randomness comes from a caller-provided RNG, so a seeded generator reproduces
//! a pass pixel for pixel.
pub mod color;
pub mod config;
pub mod error;
pub mod events;
pub mod generator;
pub mod raster;
pub mod sampling;
pub mod topology;

/// Convenient re-exports for common types. Import with `use topology_scatter::prelude::*;`.
pub mod prelude {
    pub use crate::color::Color;
    pub use crate::config::TopologyConfig;
    pub use crate::error::{Error, Result};
    pub use crate::events::{EventSink, FnSink, GenerationEvent, VecSink};
    pub use crate::generator::{generate, Generation, TopologyGenerator};
    pub use crate::raster::{render_topology, Canvas, CircleMask, RenderConfig};
    pub use crate::sampling::MinDistanceSampling;
    pub use crate::topology::connection::{
        build_connections, Connection, ConnectionKind, ConnectionSet, ConnectionTargets,
    };
    pub use crate::topology::domain::{assign_domains, DomainRegion};
    pub use crate::topology::interface::{interface_count, select_interfaces};
    pub use crate::topology::{
        DomainId, Node, NodeId, Topology, TopologySummary, UNASSIGNED,
    };
}
