use crate::models::door::Door;
use crate::models::room::{Exit, Room};
use crate::models::types::Direction;
use crate::world::World;
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use waygate_core::{Keyword, RoomKey};

const MAX_FILE_BYTES: usize = 256 * 1024;
const MAX_FILES_PER_IMPORT: usize = 2_000;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoomYaml {
    pub key: String,             // "entry_hall"
    pub title: String,           // "Entry Hall"
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub exits: Vec<ExitYaml>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExitYaml {
    pub dir: String,             // "north", "out", "gate"
    pub to: String,              // "hallway_1"
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub door: Option<DoorYaml>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DoorYaml {
    #[serde(default)]
    pub open: bool,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub mob_locked: bool,
    #[serde(default)]
    pub key: Option<String>,
}

/// Loads every `*.yml` / `*.yaml` file in `dir` as one room and checks the result as a whole.
pub fn load_world_dir(dir: &Path) -> Result<World> {
    let files = list_yaml_files(dir)?;
    if files.is_empty() {
        bail!("no room files in {}", dir.display());
    }

    let mut world = World::new();
    for path in files {
        let text = fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
        let room = parse_room_yaml(&text).with_context(|| format!("loading {}", path.display()))?;

        let key = room.key.clone();
        if world.insert(room).is_some() {
            bail!("duplicate room key '{}' in {}", key, path.display());
        }
    }

    validate_world(&world)?;
    tracing::info!(rooms = world.len(), dir = %dir.display(), "world loaded");
    Ok(world)
}

/// Parses and validates a single room file.
pub fn parse_room_yaml(text: &str) -> Result<Room> {
    let room: RoomYaml = serde_yaml::from_str(text).context("parsing YAML")?;
    validate_room_semantics(&room).with_context(|| format!("validation failed for room '{}'", room.key))?;
    room_from_yaml(room)
}

pub fn validate_room_semantics(room: &RoomYaml) -> Result<()> {
    if room.key.trim().is_empty() { bail!("room key empty"); }
    if RoomKey::parse(&room.key).is_none() { bail!("invalid room key '{}'", room.key); }
    if room.title.trim().is_empty() { bail!("room title empty"); }
    if room.key.len() > 64 { bail!("room key too long"); }
    if room.title.len() > 128 { bail!("room title too long"); }

    let mut dirs = HashSet::new();
    for ex in &room.exits {
        let Some(dir) = Direction::from_token(&ex.dir) else {
            bail!("exit with empty dir");
        };
        if !dirs.insert(dir.clone()) {
            bail!("duplicate exit dir '{}'", dir);
        }
        if RoomKey::parse(&ex.to).is_none() {
            bail!("invalid exit target '{}'", ex.to);
        }
        if let Some(door) = &ex.door {
            if door.open && door.locked {
                bail!("door '{}' is both open and locked", dir);
            }
            if door.key.as_deref().is_some_and(|k| Keyword::parse(k).is_none()) {
                bail!("door '{}' has an empty key", dir);
            }
        }
    }

    Ok(())
}

fn room_from_yaml(r: RoomYaml) -> Result<Room> {
    let key = RoomKey::parse(&r.key).with_context(|| format!("invalid room key '{}'", r.key))?;

    let mut room = Room::new(key, r.title.trim());
    room.description = r.description.filter(|d| !d.trim().is_empty());

    for ex in r.exits {
        let dir = Direction::from_token(&ex.dir).with_context(|| format!("invalid exit dir '{}'", ex.dir))?;
        let to = RoomKey::parse(&ex.to).with_context(|| format!("invalid exit target '{}'", ex.to))?;

        let mut exit = Exit::new(dir, to);
        exit.description = ex.description;
        exit.door = ex.door.map(|d| Door {
            open: d.open,
            locked: d.locked,
            mob_locked: d.mob_locked,
            key: d.key.as_deref().and_then(Keyword::parse),
        });
        room.add_exit(exit);
    }

    Ok(room)
}

/// Checks that need all rooms: every exit must lead somewhere.
fn validate_world(world: &World) -> Result<()> {
    for room in world.rooms() {
        for exit in room.exits() {
            if !world.contains(&exit.to_room) {
                bail!("room '{}': exit '{}' leads to unknown room '{}'", room.key, exit.direction, exit.to_room);
            }
        }
    }
    Ok(())
}

fn list_yaml_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for e in fs::read_dir(dir).with_context(|| format!("read_dir {}", dir.display()))? {
        let p = e?.path();
        if !p.is_file() { continue; }
        let name = p.file_name().and_then(|s| s.to_str()).unwrap_or("");
        if !(name.ends_with(".yml") || name.ends_with(".yaml")) { continue; }

        let len = fs::metadata(&p)?.len() as usize;
        if len > MAX_FILE_BYTES { bail!("file too large: {} ({} bytes)", p.display(), len); }

        files.push(p);
        if files.len() > MAX_FILES_PER_IMPORT { bail!("too many files (> {})", MAX_FILES_PER_IMPORT); }
    }
    files.sort();
    Ok(files)
}
