use crate::ansi;
use crate::commands::{CmdCtx, CommandResult};
use crate::error::DomainError;
use crate::models::room::{Exit, Room};
use crate::services::locks;
use std::sync::Arc;
use waygate_core::RoomKey;

pub async fn look(ctx: Arc<CmdCtx>) -> CommandResult {
    let here = ctx.player()?.location;
    show_room(&ctx, &here).await
}

pub async fn exits(ctx: Arc<CmdCtx>) -> CommandResult {
    let here = ctx.player()?.location;
    let room = ctx.world.look(&here).await?.ok_or(DomainError::NoCurrentRoom)?;
    ctx.output.line(render_exit_list(&room));
    Ok(())
}

pub(crate) async fn show_room(ctx: &CmdCtx, key: &RoomKey) -> CommandResult {
    let room = ctx.world.look(key).await?.ok_or(DomainError::NoCurrentRoom)?;
    let me = ctx.player()?.name;
    let others: Vec<String> = ctx.registry.names_in(key).into_iter().filter(|n| *n != me).collect();

    ctx.output.line(render_room(&room, &others));
    Ok(())
}

fn exit_state(exit: &Exit) -> Option<&'static str> {
    if !locks::is_door(exit) {
        None
    } else if locks::is_open(exit) {
        Some("open")
    } else {
        Some("closed")
    }
}

pub fn render_room(room: &Room, others: &[String]) -> String {
    let mut out = format!("{}{}{}{}", ansi::BOLD, ansi::FG_CYAN, room.title(), ansi::RESET);
    if let Some(desc) = room.description.as_deref().filter(|d| !d.trim().is_empty()) {
        out.push('\n');
        out.push_str(desc.trim_end());
    }

    let exits: Vec<String> = room
        .exits()
        .iter()
        .map(|e| match exit_state(e) {
            Some("closed") => format!("{} (closed)", e.direction),
            _ => e.direction.to_string(),
        })
        .collect();
    out.push('\n');
    if exits.is_empty() {
        out.push_str("There are no obvious exits.");
    } else {
        out.push_str(&format!("{}Exits:{} {}", ansi::FG_GREEN, ansi::RESET, exits.join(", ")));
    }

    if !others.is_empty() {
        out.push_str(&format!("\nAlso here: {}", others.join(", ")));
    }
    out
}

pub fn render_exit_list(room: &Room) -> String {
    if room.exits().is_empty() {
        return "There are no obvious exits.".to_string();
    }

    let width = room.exits().iter().map(|e| e.direction.as_str().len()).max().unwrap_or(0);
    let mut lines = vec!["Obvious exits:".to_string()];
    for e in room.exits() {
        let what = match exit_state(e) {
            None => "passage",
            Some(state) => state,
        };
        let mut line = format!("  {:<width$}  {what}", e.direction.as_str());
        if let Some(desc) = &e.description {
            line.push_str(&format!(" - {desc}"));
        }
        lines.push(line);
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::door::Door;
    use crate::models::types::Direction;

    fn mk_room() -> Room {
        let mut room = Room::new("fake", "Fake Room")
            .with_exit(Exit::new(Direction::Out, "hallway").with_door(Door::closed()).with_description("an oak door"))
            .with_exit(Exit::new(Direction::North, "yard"))
            .with_exit(Exit::new(Direction::Custom("gate".into()), "garden").with_door(Door::opened()));
        room.description = Some("A room that does not exist.\n".into());
        room
    }

    #[test]
    fn room_lists_exits_and_others() {
        let text = render_room(&mk_room(), &["Bob".to_string()]);
        assert!(text.contains("Fake Room"));
        assert!(text.contains("A room that does not exist."));
        assert!(text.contains("out (closed), north, gate"));
        assert!(text.ends_with("Also here: Bob"));
    }

    #[test]
    fn room_without_exits() {
        let text = render_room(&Room::new("cell", "Cell"), &[]);
        assert!(text.ends_with("There are no obvious exits."));
        assert!(!text.contains("Also here"));
    }

    #[test]
    fn exit_list_shows_door_state() {
        let text = render_exit_list(&mk_room());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Obvious exits:");
        assert_eq!(lines[1], "  out    closed - an oak door");
        assert_eq!(lines[2], "  north  passage");
        assert_eq!(lines[3], "  gate   open");
    }
}
