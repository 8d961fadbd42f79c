//! Generation parameters.
//!
//! [`TopologyConfig`] carries every knob of a generation pass: canvas size, node
//! density and spacing, domain layout, locality, connection density and the
//! colors used by the rasterizer. Defaults reproduce the classic 2020×1180 poster.
use glam::Vec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{Error, Result};
use crate::topology::connection::ConnectionTargets;
use crate::topology::domain::domain_radius;

pub const DEFAULT_MAX_PLACEMENT_ATTEMPTS: usize = 1000;
pub const DEFAULT_MAX_CONNECTION_ATTEMPTS: usize = 100_000;
/// Largest accepted node diameter; the node mask holds `size²` bytes.
pub const MAX_NODE_SIZE: f32 = 4096.0;
/// Largest accepted domain count; each domain keeps its own member lists.
pub const MAX_DOMAIN_COUNT: u32 = 1 << 16;

/// Configuration for a single generation pass.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct TopologyConfig {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Target node count; the sampler places `nodes_count + 1` nodes.
    pub nodes_count: usize,
    /// Node circle diameter in pixels.
    pub node_size: f32,
    /// Minimum distance between any two placed nodes.
    pub node_min_distance: f32,
    /// Fill color of rendered nodes.
    pub node_color: Color,
    /// Initial canvas color.
    pub background_color: Color,
    /// Scales both the local and the remote connection targets.
    pub average_connections_per_node: u32,
    /// Number of circular domain regions.
    pub domain_count: u32,
    /// Thickness of rendered connections in pixels.
    pub connection_width: f32,
    /// Share of local connections in [0, 1]; out of range values are clamped on use.
    pub locality: f64,
    /// Attempts per node before placement gives up.
    pub max_placement_attempts: usize,
    /// Attempts per connection before connection building gives up.
    pub max_connection_attempts: usize,
}

impl Default for TopologyConfig {
    fn default() -> Self {
        Self {
            width: 2020,
            height: 1180,
            nodes_count: 200,
            node_size: 10.0,
            node_min_distance: 15.0,
            node_color: Color::rgba(0x00, 0xFF, 0x00, 0xFF),
            background_color: Color::TRANSPARENT,
            average_connections_per_node: 5,
            domain_count: 20,
            connection_width: 4.0,
            locality: 0.5,
            max_placement_attempts: DEFAULT_MAX_PLACEMENT_ATTEMPTS,
            max_connection_attempts: DEFAULT_MAX_CONNECTION_ATTEMPTS,
        }
    }
}

impl TopologyConfig {
    /// Creates a default configuration for a canvas of `width` × `height` pixels.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn with_nodes_count(mut self, nodes_count: usize) -> Self {
        self.nodes_count = nodes_count;
        self
    }

    pub fn with_node_size(mut self, node_size: f32) -> Self {
        self.node_size = node_size;
        self
    }

    pub fn with_node_min_distance(mut self, node_min_distance: f32) -> Self {
        self.node_min_distance = node_min_distance;
        self
    }

    pub fn with_node_color(mut self, color: Color) -> Self {
        self.node_color = color;
        self
    }

    pub fn with_background_color(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    pub fn with_average_connections_per_node(mut self, average: u32) -> Self {
        self.average_connections_per_node = average;
        self
    }

    pub fn with_domain_count(mut self, domain_count: u32) -> Self {
        self.domain_count = domain_count;
        self
    }

    pub fn with_connection_width(mut self, connection_width: f32) -> Self {
        self.connection_width = connection_width;
        self
    }

    /// Sets the locality, clamped into [0, 1].
    pub fn with_locality(mut self, locality: f64) -> Self {
        self.locality = clamp_locality(locality);
        self
    }

    pub fn with_max_placement_attempts(mut self, attempts: usize) -> Self {
        self.max_placement_attempts = attempts;
        self
    }

    pub fn with_max_connection_attempts(mut self, attempts: usize) -> Self {
        self.max_connection_attempts = attempts;
        self
    }

    /// Locality clamped into [0, 1].
    pub fn effective_locality(&self) -> f64 {
        clamp_locality(self.locality)
    }

    /// Canvas extent as a vector.
    pub fn extent(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    /// Radius shared by every domain circle: `sqrt(area / domain_count)`.
    pub fn domain_radius(&self) -> f32 {
        domain_radius(self.extent(), self.domain_count)
    }

    /// Local connection target, `floor(nodes * average * locality)`.
    pub fn local_connection_target(&self) -> usize {
        (self.connection_budget() * self.effective_locality()).floor() as usize
    }

    /// Remote connection target, `floor(nodes * average * (1 - locality))`.
    pub fn remote_connection_target(&self) -> usize {
        (self.connection_budget() * (1.0 - self.effective_locality())).floor() as usize
    }

    /// Connections to build per kind.
    ///
    /// Each kind builds `target + 1` connections, except that a kind with a zero
    /// share (remote at locality 1, local at locality 0) builds none.
    pub fn connection_targets(&self) -> ConnectionTargets {
        let locality = self.effective_locality();
        let count = |target: usize, share: f64| if share > 0.0 { target + 1 } else { 0 };
        ConnectionTargets {
            remote: count(self.remote_connection_target(), 1.0 - locality),
            local: count(self.local_connection_target(), locality),
            max_attempts: self.max_connection_attempts,
        }
    }

    fn connection_budget(&self) -> f64 {
        self.nodes_count as f64 * self.average_connections_per_node as f64
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidConfig(
                "width and height must be > 0".into(),
            ));
        }
        if !self.node_size.is_finite() || self.node_size < 0.0 {
            return Err(Error::InvalidConfig(
                "node_size must be finite and >= 0".into(),
            ));
        }
        if self.node_size > MAX_NODE_SIZE {
            return Err(Error::InvalidConfig(format!(
                "node_size must be <= {MAX_NODE_SIZE}"
            )));
        }
        if self.domain_count > MAX_DOMAIN_COUNT {
            return Err(Error::InvalidConfig(format!(
                "domain_count must be <= {MAX_DOMAIN_COUNT}"
            )));
        }
        if !self.node_min_distance.is_finite() || self.node_min_distance < 0.0 {
            return Err(Error::InvalidConfig(
                "node_min_distance must be finite and >= 0".into(),
            ));
        }
        if !self.connection_width.is_finite() || self.connection_width < 0.0 {
            return Err(Error::InvalidConfig(
                "connection_width must be finite and >= 0".into(),
            ));
        }
        if self.locality.is_nan() {
            return Err(Error::InvalidConfig("locality must be a number".into()));
        }
        if self.max_placement_attempts == 0 {
            return Err(Error::InvalidConfig(
                "max_placement_attempts must be > 0".into(),
            ));
        }
        if self.max_connection_attempts == 0 {
            return Err(Error::InvalidConfig(
                "max_connection_attempts must be > 0".into(),
            ));
        }

        Ok(())
    }
}

fn clamp_locality(locality: f64) -> f64 {
    if locality.is_nan() {
        locality
    } else {
        locality.clamp(0.0, 1.0)
    }
}
