use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use waygate_server::capabilities::RoomLookup;
use waygate_server::import::load_world_dir;
use waygate_server::services::locks;
use waygate_core::RoomKey;

#[derive(Debug, Parser)]
#[command(name = "check-world", version, about = "Validate a directory of room YAML files")]
struct Args {
    /// Directory with room YAML files
    dir: PathBuf,

    /// Also require this room to exist (ie: the start room)
    #[arg(long)]
    start: Option<String>,

    /// Print every room with its exits
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let world = load_world_dir(&args.dir).with_context(|| format!("checking {}", args.dir.display()))?;

    if let Some(start) = &args.start {
        let key = RoomKey::parse(start).with_context(|| format!("invalid start room '{start}'"))?;
        world.get_at(&key).with_context(|| format!("start room '{start}' not found"))?;
    }

    let mut rooms: Vec<_> = world.rooms().collect();
    rooms.sort_by(|a, b| a.key.cmp(&b.key));

    let mut doors = 0;
    let mut one_way = 0;
    for room in &rooms {
        if args.verbose {
            println!("{} - {}", room.key, room.title());
        }
        for exit in room.exits() {
            if locks::is_door(exit) {
                doors += 1;
            }
            let has_way_back = world
                .get_at(&exit.to_room)
                .is_some_and(|dest| dest.exits().iter().any(|e| e.to_room == room.key));
            if !has_way_back {
                one_way += 1;
                tracing::debug!(room=%room.key, dir=%exit.direction, "one-way exit");
            }
            if args.verbose {
                let state = match (locks::is_door(exit), locks::is_open(exit), locks::is_locked(exit)) {
                    (false, _, _) => "passage",
                    (true, true, _) => "open door",
                    (true, false, true) => "locked door",
                    (true, false, false) => "closed door",
                };
                println!("  {:<10} -> {:<16} {state}", exit.direction.as_str(), exit.to_room.as_str());
            }
        }
    }

    println!("ok: {} rooms, {} doors, {} one-way exits", rooms.len(), doors, one_way);
    Ok(())
}
