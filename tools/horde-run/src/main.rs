//! horde-run: headless driver for the horde simulation.
//!
//! Scripted players circle the arena center and swing at whatever is in
//! front of them, standing in for the networking and input layers.
//!
//! Usage:
//!   horde-run [--config horde.json] [--seed 42] [--ticks 3600] [--players 2]
//!             [--attack-every 20] [--snapshot final.json]

use std::f32::consts::TAU;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use glam::Vec3;

use horde_core::commands::AttackQuery;
use horde_core::config::HordeConfig;
use horde_core::constants::{DT, TICK_RATE};
use horde_core::events::SimEvent;
use horde_core::players::PlayerSnapshot;
use horde_sim::{HordeEngine, SimConfig};

/// Radius of the scripted players' orbit.
const ORBIT_RADIUS: f32 = 6.0;
/// Angular speed of the orbit, radians per second.
const ORBIT_SPEED: f32 = 0.4;

struct Options {
    config: Option<PathBuf>,
    seed: u64,
    ticks: u64,
    players: u32,
    attack_every: u64,
    snapshot: Option<PathBuf>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            config: None,
            seed: 42,
            ticks: 60 * u64::from(TICK_RATE),
            players: 2,
            attack_every: 20,
            snapshot: None,
        }
    }
}

fn main() -> Result<()> {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "help" || a == "--help" || a == "-h") {
        print_usage();
        return Ok(());
    }
    let options = parse_args(&args)?;

    let horde = match &options.config {
        Some(path) => HordeConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => HordeConfig::default(),
    };

    let mut engine = HordeEngine::new(SimConfig {
        seed: options.seed,
        horde,
    })
    .context("invalid configuration")?;

    engine.update_players(player_positions(options.players, 0.0));
    engine.populate_initial();

    tracing::info!(
        seed = options.seed,
        ticks = options.ticks,
        players = options.players,
        "simulation started"
    );

    let mut last = None;
    for tick in 0..options.ticks {
        let elapsed = tick as f32 * DT;
        let players = player_positions(options.players, elapsed);

        if options.attack_every > 0 && tick % options.attack_every == 0 {
            for (id, position) in players.iter() {
                let facing = orbit_tangent(position);
                let query = AttackQuery::with_config(position, facing, &engine.config().combat);
                let hits = engine.attack(&query);
                if !hits.is_empty() {
                    tracing::debug!(player = id, hits = hits.len(), "swing connected");
                }
            }
        }

        engine.update_players(players);
        let snapshot = engine.tick(DT);
        for event in &snapshot.events {
            log_event(event);
        }
        last = Some(snapshot);
    }

    if let Some(snapshot) = last {
        tracing::info!(
            kills = snapshot.score.kills,
            alive = snapshot.score.alive,
            dying = snapshot.score.dying,
            reinforcements = snapshot.score.reinforcements_spawned,
            elapsed_secs = snapshot.time.elapsed_secs,
            "simulation finished"
        );

        if let Some(path) = &options.snapshot {
            let json = serde_json::to_string_pretty(&snapshot)?;
            std::fs::write(path, json)
                .with_context(|| format!("writing snapshot {}", path.display()))?;
            tracing::info!(path = %path.display(), "final snapshot written");
        }
    }

    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn print_usage() {
    eprintln!(
        "horde-run: headless horde simulation driver\n\
         \n\
           --config <path>      JSON configuration (partial documents allowed)\n\
           --seed <N>           RNG seed (default: 42)\n\
           --ticks <N>          Ticks to run at 60 Hz (default: 3600)\n\
           --players <N>        Scripted players (default: 2)\n\
           --attack-every <N>   Ticks between swings, 0 disables (default: 20)\n\
           --snapshot <path>    Write the final snapshot as JSON\n"
    );
}

fn parse_args(args: &[String]) -> Result<Options> {
    let mut options = Options::default();
    let mut iter = args.iter();
    while let Some(flag) = iter.next() {
        let Some(value) = iter.next() else {
            bail!("missing value for {flag}");
        };
        match flag.as_str() {
            "--config" => options.config = Some(PathBuf::from(value)),
            "--seed" => options.seed = value.parse().context("--seed")?,
            "--ticks" => options.ticks = value.parse().context("--ticks")?,
            "--players" => options.players = value.parse().context("--players")?,
            "--attack-every" => options.attack_every = value.parse().context("--attack-every")?,
            "--snapshot" => options.snapshot = Some(PathBuf::from(value)),
            other => bail!("unknown option: {other}"),
        }
    }
    Ok(options)
}

/// Players evenly spaced on a circle that rotates over time.
fn player_positions(count: u32, elapsed: f32) -> PlayerSnapshot {
    (0..count)
        .map(|i| {
            let angle = elapsed * ORBIT_SPEED + TAU * i as f32 / count as f32;
            (i, Vec3::new(angle.sin() * ORBIT_RADIUS, 0.0, angle.cos() * ORBIT_RADIUS))
        })
        .collect()
}

/// Direction of travel along the orbit.
fn orbit_tangent(position: Vec3) -> Vec3 {
    Vec3::new(position.z, 0.0, -position.x).normalize_or_zero()
}

fn log_event(event: &SimEvent) {
    match event {
        SimEvent::Killed { entity_id } => tracing::info!(entity_id, "killed"),
        SimEvent::Removed { entity_id } => tracing::debug!(entity_id, "removed"),
        SimEvent::PopulationChanged { delta } => tracing::info!(delta, "population changed"),
    }
}
