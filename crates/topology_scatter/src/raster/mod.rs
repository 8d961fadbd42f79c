//! Rasterization of a [`Topology`] into a [`Canvas`].
//!
//! Draw order is fixed: every connection first, in insertion order, each with its
//! own random opaque color; then every assigned node as an anti-aliased disc in the
//! node color. Later elements composite over earlier ones.
use rand::Rng as RngCore;
use tracing::debug;

use crate::color::Color;
use crate::config::TopologyConfig;
use crate::sampling::rand_index;
use crate::topology::Topology;

pub mod canvas;
pub mod line;
pub mod mask;

pub use canvas::Canvas;
pub use line::draw_line;
pub use mask::CircleMask;

/// Styling and output size used by [`render_topology`].
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Output size in pixels `(width, height)`.
    pub image_size: (u32, u32),
    /// Initial canvas color.
    pub background: Color,
    /// Node fill color.
    pub node_color: Color,
    /// Node disc diameter in pixels.
    pub node_size: f32,
    /// Connection thickness in pixels.
    pub connection_width: f32,
}

impl RenderConfig {
    pub fn new(image_size: (u32, u32)) -> Self {
        let defaults = TopologyConfig::default();
        Self {
            image_size,
            background: defaults.background_color,
            node_color: defaults.node_color,
            node_size: defaults.node_size,
            connection_width: defaults.connection_width,
        }
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn with_node_color(mut self, node_color: Color) -> Self {
        self.node_color = node_color;
        self
    }

    pub fn with_node_size(mut self, node_size: f32) -> Self {
        self.node_size = node_size;
        self
    }

    pub fn with_connection_width(mut self, connection_width: f32) -> Self {
        self.connection_width = connection_width;
        self
    }
}

impl From<&TopologyConfig> for RenderConfig {
    fn from(config: &TopologyConfig) -> Self {
        Self {
            image_size: (config.width, config.height),
            background: config.background_color,
            node_color: config.node_color,
            node_size: config.node_size,
            connection_width: config.connection_width,
        }
    }
}

/// Uniformly random opaque color.
pub fn random_opaque_color(rng: &mut dyn RngCore) -> Color {
    let r = rand_index(rng, 256) as u8;
    let g = rand_index(rng, 256) as u8;
    let b = rand_index(rng, 256) as u8;
    Color::rgb(r, g, b)
}

/// Render connections, then assigned nodes, onto a fresh canvas.
pub fn render_topology(
    topology: &Topology,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Canvas {
    let (width, height) = config.image_size;
    let mut canvas = Canvas::new(width, height, config.background);

    for connection in topology.connections() {
        let color = random_opaque_color(rng);
        draw_line(
            &mut canvas,
            topology.node(connection.from).position,
            topology.node(connection.to).position,
            config.connection_width,
            color,
        );
    }

    let mask = CircleMask::new(config.node_size);
    let mut stamped = 0usize;
    for (_, node) in topology.assigned_nodes() {
        mask.stamp(&mut canvas, node.position, config.node_size, config.node_color);
        stamped += 1;
    }

    debug!(
        "Rendered {} connections and {} nodes onto {}x{}.",
        topology.connections().len(),
        stamped,
        width,
        height
    );

    canvas
}
