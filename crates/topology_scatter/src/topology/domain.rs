//! Domain assignment by proximity to randomly placed circular regions.
use glam::Vec2;
use rand::Rng as RngCore;
use tracing::debug;

use crate::sampling::rand_coord;
use crate::topology::{DomainId, NodeId, Topology};

/// Circular region of one domain. Only used while assigning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomainRegion {
    pub id: DomainId,
    pub center: Vec2,
    pub radius: f32,
}

impl DomainRegion {
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        self.center.distance(p) <= self.radius
    }
}

/// Scatters `domain_count` regions of radius `sqrt(w * h / domain_count)` over `extent`
/// and assigns every node inside a region to it.
///
/// Regions are visited in id order `1..=domain_count`; a node inside several regions
/// ends up with the highest id. Nodes outside every region stay unassigned.
/// Returns the regions in id order.
pub fn assign_domains(
    topology: &mut Topology,
    domain_count: u32,
    extent: Vec2,
    rng: &mut dyn RngCore,
) -> Vec<DomainRegion> {
    let radius = domain_radius(extent, domain_count);
    topology.domains = vec![Vec::new(); domain_count as usize + 1];
    topology.interfaces = vec![Vec::new(); domain_count as usize + 1];

    let mut regions = Vec::with_capacity(domain_count as usize);
    for id in 1..=domain_count {
        let center = Vec2::new(rand_coord(rng, extent.x), rand_coord(rng, extent.y));
        let region = DomainRegion { id, center, radius };

        for (index, node) in topology.nodes.iter_mut().enumerate() {
            if region.contains(node.position) {
                node.domain_id = id;
                topology.domains[id as usize].push(NodeId(index));
            }
        }
        regions.push(region);
    }

    debug!(
        "Assigned {} of {} nodes to {} domains (radius {:.2}).",
        topology.nodes.iter().filter(|n| n.is_assigned()).count(),
        topology.nodes.len(),
        domain_count,
        radius
    );

    regions
}

/// Radius shared by all domains so that their total area matches the canvas area.
pub fn domain_radius(extent: Vec2, domain_count: u32) -> f32 {
    ((extent.x as f64 * extent.y as f64) / domain_count as f64).sqrt() as f32
}
