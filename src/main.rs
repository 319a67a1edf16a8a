use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use aloft_geom::Vec3;
use aloft_runtime::{StreamerConfig, TerrainStreamer};
use aloft_world::{
    DEFAULT_TABLE_COUNT, DecorationTable, TerrainParams, WorldSeed, load_params_from_path,
};

mod flight;

use flight::Flier;

/// Headless fly-through over the infinite terrain streamer: spawns a world,
/// flies a scripted plane across it, and streams chunks the whole way.
#[derive(Parser, Debug)]
#[command(name = "aloft")]
struct Args {
    /// World seed; the only state needed to reproduce a world.
    #[arg(long, default_value_t = 42)]
    seed: u32,
    /// Rings of chunks kept resident around the plane, per LOD.
    #[arg(long, default_value_t = 4)]
    range: i32,
    /// LOD levels; each level doubles chunk world size.
    #[arg(long, default_value_t = 5)]
    lods: u32,
    /// Extra rings a chunk may drift before eviction.
    #[arg(long, default_value_t = 1)]
    margin: i32,
    /// Simulation steps, at 60 per simulated second.
    #[arg(long, default_value_t = 600)]
    steps: u32,
    /// Flight speed in world units per second.
    #[arg(long, default_value_t = 48.0)]
    speed: f32,
    /// Generation jobs submitted per update.
    #[arg(long, default_value_t = 32)]
    budget: usize,
    /// Worker threads (0 = pick from available parallelism).
    #[arg(long, default_value_t = 0)]
    workers: usize,
    /// Terrain parameter TOML; built-in defaults when omitted.
    #[arg(long)]
    worldgen: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let params = match &args.worldgen {
        Some(path) => match load_params_from_path(path) {
            Ok(p) => p,
            Err(e) => {
                log::error!("failed to load {}: {e}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => TerrainParams::default(),
    };

    let seed = WorldSeed::generate(args.seed, DEFAULT_TABLE_COUNT);
    let config = StreamerConfig {
        lod_levels: args.lods,
        range: args.range,
        margin: args.margin,
        max_chunks_per_update: args.budget,
        workers: args.workers,
    };
    let mut streamer = match TerrainStreamer::new(seed, params, &config) {
        Ok(s) => s,
        Err(e) => {
            log::error!("bad configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    let spawn = Vec3::new(0.0, streamer.params().height.amplitude * 1.5, 0.0);
    let init = streamer.generate_chunks(spawn);
    log::info!(
        "initial world: {} resident chunks across {} LODs ({} built)",
        streamer.resident_total(),
        args.lods,
        init.generated
    );

    let mut decorations = DecorationTable::new(
        streamer.params().decorations.radius,
        streamer.params().chunk.size,
    );
    decorations.gen_decorations(streamer.seed(), streamer.params());
    log::info!(
        "{} decorations over {} chunks",
        decorations.instance_count(),
        decorations.chunk_count()
    );

    let mut flier = Flier::new(spawn, args.speed, args.seed);
    let dt = 1.0 / 60.0;
    let mut generated = 0usize;
    let mut evicted = 0usize;
    for step in 0..args.steps {
        flier.advance(dt, streamer.seed(), streamer.params());
        let stats = streamer.generate_new_chunks(flier.position());
        generated += stats.generated;
        evicted += stats.evicted;
        if flier.crashed() {
            let p = flier.position();
            log::warn!(
                "terrain strike at step {step}, position ({:.0}, {:.0}, {:.0})",
                p.x,
                p.y,
                p.z
            );
            break;
        }
        if step % 60 == 0 {
            let p = flier.position();
            log::info!(
                "t={:>4.0}s pos=({:>7.0}, {:>5.0}, {:>7.0}) resident={} pending={}",
                step as f32 * dt,
                p.x,
                p.y,
                p.z,
                streamer.resident_total(),
                stats.pending
            );
        }
    }

    // Let outstanding generation land so the summary is complete.
    let tail = streamer.update_blocking(flier.position());
    generated += tail.generated;
    evicted += tail.evicted;

    println!(
        "flew {} steps at {} u/s: {} chunks generated, {} evicted, {} resident, {} decorations",
        args.steps,
        args.speed,
        generated,
        evicted,
        streamer.resident_total(),
        decorations.instance_count()
    );
    ExitCode::SUCCESS
}
