//! Interface node selection.
use rand::Rng as RngCore;
use tracing::debug;

use crate::error::{Error, Result};
use crate::sampling::permutation;
use crate::topology::Topology;

/// Number of interface nodes for a domain with `members` nodes:
/// `max(1, floor(members * (1 - locality)))`.
pub fn interface_count(members: usize, locality: f64) -> usize {
    let locality = locality.clamp(0.0, 1.0);
    ((members as f64 * (1.0 - locality)).floor() as usize).max(1)
}

/// Marks a random subset of every domain's members as interface nodes.
///
/// Domains without members are skipped. Fails with [`Error::NoInterfaceNodes`] when no
/// domain selected anything, which happens only if every domain is empty.
pub fn select_interfaces(
    topology: &mut Topology,
    locality: f64,
    rng: &mut dyn RngCore,
) -> Result<()> {
    topology.interfaces = vec![Vec::new(); topology.domains.len()];

    for (domain, members) in topology.domains.iter().enumerate() {
        if members.is_empty() {
            continue;
        }

        let count = interface_count(members.len(), locality);
        let order = permutation(rng, members.len());
        let selected = &mut topology.interfaces[domain];
        for &idx in order.iter().take(count) {
            let id = members[idx];
            topology.nodes[id.0].is_interface = true;
            selected.push(id);
        }
    }

    let selected: usize = topology.interfaces.iter().map(Vec::len).sum();
    if selected == 0 {
        return Err(Error::NoInterfaceNodes);
    }

    debug!(
        "Selected {} interface nodes across {} domains (locality {}).",
        selected,
        topology.interfaces.iter().filter(|s| !s.is_empty()).count(),
        locality
    );

    Ok(())
}
