use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use waygate_core::RoomKey;
use waygate_server::broadcast::Broadcast;
use waygate_server::config::Config;
use waygate_server::import::load_world_dir;
use waygate_server::models::player::Player;
use waygate_server::net::output::init_session_for_writer;
use waygate_server::services::{DoorService, NavigatorService};
use waygate_server::{CmdCtx, Flow, Registry, process_command, start_world_worker};

#[derive(Debug, Parser)]
#[command(name = "waygate", version, about = "Walk a world of rooms, exits and doors from the console")]
struct Args {
    /// TOML config file (defaults to the environment / .env)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Directory with room YAML files
    #[arg(long)]
    world: Option<PathBuf>,

    /// Room to start in
    #[arg(long)]
    start: Option<String>,

    /// Player name
    #[arg(long)]
    name: Option<String>,

    /// Fixed seed for narration variants
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut cfg = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::from_env()?,
    };
    if let Some(world) = args.world { cfg.world_dir = world; }
    if let Some(start) = args.start { cfg.start_room = start; }
    if let Some(name) = args.name { cfg.player_name = name; }
    if args.seed.is_some() { cfg.narration_seed = args.seed; }

    init_tracing(cfg.log_filter.as_deref());

    let world = load_world_dir(&cfg.world_dir)
        .with_context(|| format!("loading world from {}", cfg.world_dir.display()))?;
    let start = RoomKey::parse(&cfg.start_room)
        .filter(|k| world.contains(k))
        .with_context(|| format!("start room '{}' is not part of the world", cfg.start_room))?;

    let registry = Arc::new(Registry::new());
    let broadcast = Arc::new(match cfg.narration_seed {
        Some(seed) => Broadcast::seeded(seed),
        None => Broadcast::new(),
    });
    let messages = Arc::new(cfg.messages.clone());

    let world = start_world_worker(
        world,
        registry.clone(),
        DoorService::new(broadcast.clone(), messages.clone()),
        NavigatorService::new(broadcast, messages.clone()),
        cfg.job_queue_depth,
    );

    let (output, pump) = init_session_for_writer(tokio::io::stdout());
    let player = cfg
        .starting_items
        .iter()
        .fold(Player::new(cfg.player_name.clone(), start.clone(), output.clone()), |p, item| p.with_item(item.to_item()));
    let player_id = player.id;
    registry.insert(player);
    tracing::info!(player=%cfg.player_name, room=%start, "player entered the world");

    let ctx = Arc::new(CmdCtx { registry: registry.clone(), world, player_id, output: output.clone(), messages });
    process_command("look", ctx.clone()).await?;
    output.prompt("> ");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match process_command(&line, ctx.clone()).await {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {}
            Err(e) => {
                tracing::error!(error=%e, "command failed");
                output.system("Something went wrong.");
            }
        }
        output.prompt("> ");
    }

    // Let the output pump drain before exiting
    registry.remove(player_id);
    drop(ctx);
    drop(output);
    let _ = pump.await;

    Ok(())
}

fn init_tracing(filter_override: Option<&str>) {
    use tracing_subscriber::{prelude::*, EnvFilter};

    let default_filter = filter_override.unwrap_or("info,waygate_server=debug");
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr);
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
