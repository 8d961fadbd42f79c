//! High-level runner chaining the generation pipeline.
//!
//! Sampler → domain assigner → interface selector → connection builder → rasterizer,
//! each stage consuming the previous one's output, all drawing from one RNG.
use rand::Rng as RngCore;
use tracing::{info, warn};

use crate::config::TopologyConfig;
use crate::error::Result;
use crate::events::{EventSink, GenerationEvent};
use crate::raster::{render_topology, Canvas, RenderConfig};
use crate::sampling::MinDistanceSampling;
use crate::topology::connection::{build_connections, ConnectionKind};
use crate::topology::domain::{assign_domains, DomainRegion};
use crate::topology::interface::select_interfaces;
use crate::topology::Topology;

/// Output of a complete generation pass.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct Generation {
    /// The generated topology.
    pub topology: Topology,
    /// Domain regions used during assignment, in id order.
    pub regions: Vec<DomainRegion>,
    /// The rendered image.
    pub canvas: Canvas,
}

pub struct TopologyGenerator {
    /// Configuration applied to every pass.
    pub config: TopologyConfig,
}

impl TopologyGenerator {
    pub fn try_new(config: TopologyConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Runs the whole pipeline, returning topology and image.
    pub fn run(&self, rng: &mut impl RngCore) -> Result<Generation> {
        generate(&self.config, rng, &mut ())
    }

    pub fn run_with_events(
        &self,
        rng: &mut impl RngCore,
        sink: &mut dyn EventSink,
    ) -> Result<Generation> {
        generate(&self.config, rng, sink)
    }

    /// Runs every stage except rasterization.
    pub fn build_topology(&self, rng: &mut impl RngCore) -> Result<(Topology, Vec<DomainRegion>)> {
        build_topology(&self.config, rng, &mut ())
    }
}

/// Runs the pipeline with `config`, reporting each stage to `sink`.
pub fn generate(
    config: &TopologyConfig,
    rng: &mut dyn RngCore,
    sink: &mut dyn EventSink,
) -> Result<Generation> {
    config.validate()?;
    sink.send(GenerationEvent::RunStarted {
        config: config.clone(),
    });

    let (topology, regions) = build_topology(config, rng, sink)?;

    let canvas = render_topology(&topology, &RenderConfig::from(config), rng);
    sink.send(GenerationEvent::Rendered {
        size_px: canvas.size(),
    });

    let summary = topology.summary();
    info!(
        "Generated {} nodes ({} in domains, {} interface) with {} remote and {} local connections on {}x{}.",
        summary.nodes,
        summary.assigned_nodes,
        summary.interface_nodes,
        summary.remote_connections,
        summary.local_connections,
        config.width,
        config.height
    );
    sink.send(GenerationEvent::RunFinished { summary });

    Ok(Generation {
        topology,
        regions,
        canvas,
    })
}

fn build_topology(
    config: &TopologyConfig,
    rng: &mut dyn RngCore,
    sink: &mut dyn EventSink,
) -> Result<(Topology, Vec<DomainRegion>)> {
    let locality = config.effective_locality();
    if locality != config.locality {
        warn!(
            "Locality {} is outside [0, 1]; using {}.",
            config.locality, locality
        );
        sink.send(GenerationEvent::Warning {
            context: "config".into(),
            message: format!("locality {} clamped to {locality}", config.locality),
        });
    }

    let positions = MinDistanceSampling::new(config.nodes_count, config.node_min_distance)
        .with_max_attempts(config.max_placement_attempts)
        .generate(config.extent(), rng)?;
    let mut topology = Topology::from_positions(positions);
    sink.send(GenerationEvent::NodesPlaced {
        count: topology.len(),
        min_distance: config.node_min_distance,
    });

    let regions = assign_domains(&mut topology, config.domain_count, config.extent(), rng);
    let assigned_nodes = topology.assigned_nodes().count();
    sink.send(GenerationEvent::DomainsAssigned {
        regions: regions.clone(),
        assigned_nodes,
    });

    select_interfaces(&mut topology, locality, rng)?;
    let populated_domains = topology
        .interfaces
        .iter()
        .filter(|s| !s.is_empty())
        .count();
    sink.send(GenerationEvent::InterfacesSelected {
        interface_nodes: topology.interface_nodes().count(),
        populated_domains,
    });
    let targets = config.connection_targets();
    if populated_domains < 2 && targets.remote > 0 {
        warn!(
            "Only {} domain(s) hold nodes; remote connections cannot be satisfied.",
            populated_domains
        );
        sink.send(GenerationEvent::Warning {
            context: "interfaces".into(),
            message: format!("{populated_domains} populated domain(s); remote connections need 2"),
        });
    }

    build_connections(&mut topology, targets, rng)?;
    sink.send(GenerationEvent::ConnectionsBuilt {
        remote: topology.connections().count_kind(ConnectionKind::Remote),
        local: topology.connections().count_kind(ConnectionKind::Local),
    });

    Ok((topology, regions))
}
