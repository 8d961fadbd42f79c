#![forbid(unsafe_code)]

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng as RngCore, SeedableRng};
use tracing::info;
use tracing_subscriber::EnvFilter;

use topology_scatter::config::{DEFAULT_MAX_CONNECTION_ATTEMPTS, DEFAULT_MAX_PLACEMENT_ATTEMPTS};
use topology_scatter::prelude::*;

/// Generates a random network topology and writes it as a PNG image.
///
/// The image goes to stdout unless `--output` is given; logs go to stderr.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Image width in pixels
    #[arg(long, default_value_t = 2020)]
    width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 1180)]
    height: u32,

    /// Target node count
    #[arg(long, default_value_t = 200)]
    nodes_count: usize,

    /// Node circle diameter in pixels
    #[arg(long, default_value_t = 10.0)]
    node_size: f32,

    /// Minimum spacing between node centers
    #[arg(long, default_value_t = 15.0)]
    node_min_distance: f32,

    /// Node fill color as RRGGBBAA hex
    #[arg(long, default_value = "00FF00FF")]
    color_node: String,

    /// Canvas background color as RRGGBBAA hex
    #[arg(long, default_value = "00000000")]
    color_background: String,

    /// Scales the local and remote connection counts
    #[arg(long, default_value_t = 5)]
    average_connections_per_node: u32,

    /// Number of circular domains
    #[arg(long, default_value_t = 20)]
    domain_count: u32,

    /// Connection line thickness in pixels
    #[arg(long, default_value_t = 4.0)]
    connection_width: f32,

    /// Share of local connections in [0, 1]
    #[arg(long, default_value_t = 0.5)]
    locality: f64,

    /// RNG seed; a random one is drawn and logged when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Write the PNG to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Attempts per node before placement gives up
    #[arg(long, default_value_t = DEFAULT_MAX_PLACEMENT_ATTEMPTS)]
    max_placement_attempts: usize,

    /// Attempts per connection before connection building gives up
    #[arg(long, default_value_t = DEFAULT_MAX_CONNECTION_ATTEMPTS)]
    max_connection_attempts: usize,
}

impl Args {
    fn to_config(&self) -> anyhow::Result<TopologyConfig> {
        let node_color = Color::parse_hex(&self.color_node)
            .with_context(|| format!("invalid --color-node {:?}", self.color_node))?;
        let background_color = Color::parse_hex(&self.color_background)
            .with_context(|| format!("invalid --color-background {:?}", self.color_background))?;

        Ok(TopologyConfig::new(self.width, self.height)
            .with_nodes_count(self.nodes_count)
            .with_node_size(self.node_size)
            .with_node_min_distance(self.node_min_distance)
            .with_node_color(node_color)
            .with_background_color(background_color)
            .with_average_connections_per_node(self.average_connections_per_node)
            .with_domain_count(self.domain_count)
            .with_connection_width(self.connection_width)
            .with_locality(self.locality)
            .with_max_placement_attempts(self.max_placement_attempts)
            .with_max_connection_attempts(self.max_connection_attempts))
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing();

    if !(0.0..=1.0).contains(&args.locality) {
        tracing::warn!("--locality {} is outside [0, 1] and will be clamped.", args.locality);
    }
    let config = args.to_config()?;
    let generator =
        TopologyGenerator::try_new(config).context("invalid generation parameters")?;

    let seed = args.seed.unwrap_or_else(|| rand::rng().next_u64());
    info!("Using seed {seed}.");
    let mut rng = StdRng::seed_from_u64(seed);

    let generation = generator
        .run(&mut rng)
        .with_context(|| format!("generation failed for seed {seed}"))?;

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let mut out = BufWriter::new(file);
            generation.canvas.write_png(&mut out)?;
            out.flush()?;
            info!("Wrote {}.", path.display());
        }
        None => {
            let mut out = BufWriter::new(io::stdout().lock());
            generation.canvas.write_png(&mut out)?;
            out.flush().context("failed to write image to stdout")?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_library_defaults() {
        let args = Args::parse_from(["topology-scatter"]);
        assert_eq!(args.to_config().unwrap(), TopologyConfig::default());
        assert!(args.seed.is_none());
        assert!(args.output.is_none());
    }

    #[test]
    fn long_flags_map_onto_config() {
        let args = Args::parse_from([
            "topology-scatter",
            "--width",
            "100",
            "--height",
            "80",
            "--nodes-count",
            "10",
            "--domain-count",
            "2",
            "--locality",
            "0.25",
            "--color-node",
            "FF0000FF",
            "--color-background",
            "#000000",
            "--seed",
            "7",
        ]);
        let config = args.to_config().unwrap();
        assert_eq!((config.width, config.height), (100, 80));
        assert_eq!(config.nodes_count, 10);
        assert_eq!(config.domain_count, 2);
        assert_eq!(config.locality, 0.25);
        assert_eq!(config.node_color, Color::rgba(255, 0, 0, 255));
        assert_eq!(config.background_color, Color::rgb(0, 0, 0));
        assert_eq!(args.seed, Some(7));
    }

    #[test]
    fn decimal_locality_keeps_exact_targets() {
        let args = Args::parse_from([
            "topology-scatter",
            "--nodes-count",
            "10",
            "--average-connections-per-node",
            "1",
            "--locality",
            "0.3",
        ]);
        let config = args.to_config().unwrap();
        assert_eq!(config.local_connection_target(), 3);
        assert_eq!(config.remote_connection_target(), 7);
    }

    #[test]
    fn bad_color_is_reported() {
        let args = Args::parse_from(["topology-scatter", "--color-node", "GG0000FF"]);
        let err = args.to_config().unwrap_err();
        assert!(format!("{err:#}").contains("--color-node"));
    }

    #[test]
    fn command_is_well_formed() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
