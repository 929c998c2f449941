use crate::ansi;
use crate::error::{AppResult, DomainError};
use crate::input::parser::{Verb, parse_command};
use crate::models::player::Player;
use crate::models::types::PlayerId;
use crate::narration::DoorMessages;
use crate::net::output::OutputHandle;
use crate::services::DoorAction;
use crate::state::registry::Registry;
use crate::world::worker::WorldHandle;
use std::sync::Arc;
use thiserror::Error;

mod debug_cmd;
mod doors;
mod go;
mod look;
mod who;

pub type CommandResult<T = ()> = Result<T, CommandError>;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("usage: {0}")]
    Usage(String),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// What the input loop should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Command context passed to command handlers
pub struct CmdCtx {
    /// Everybody online
    pub registry: Arc<Registry>,
    /// Front of the world worker
    pub world: WorldHandle,
    /// Player issuing the commands
    pub player_id: PlayerId,
    /// Player output
    pub output: OutputHandle,
    pub messages: Arc<DoorMessages>,
}

impl CmdCtx {
    /// Snapshot of the player issuing the command
    pub fn player(&self) -> AppResult<Player> {
        self.registry.snapshot(self.player_id).ok_or(DomainError::NotFound)
    }

    /// Fighting players can't operate doors or walk away. Tells them so and returns true.
    fn vetoed_by_combat(&self) -> AppResult<bool> {
        if self.player()?.in_combat {
            self.output.line(self.messages.denials.in_combat.as_str());
            return Ok(true);
        }
        Ok(false)
    }
}

pub async fn process_command(raw: &str, ctx: Arc<CmdCtx>) -> CommandResult<Flow> {
    let intent = parse_command(raw);
    if intent.original.is_empty() {
        return Ok(Flow::Continue);
    }
    tracing::debug!(verb = intent.verb.as_str(), input = %intent.original, "command");

    let res = match intent.verb {
        Verb::Open => doors::door(ctx.clone(), intent, DoorAction::Open).await,
        Verb::Close => doors::door(ctx.clone(), intent, DoorAction::Close).await,
        Verb::Lock => doors::door(ctx.clone(), intent, DoorAction::Lock).await,
        Verb::Unlock => doors::door(ctx.clone(), intent, DoorAction::Unlock).await,
        Verb::Go => go::go(ctx.clone(), intent).await,
        Verb::Look => look::look(ctx.clone()).await,
        Verb::Exits => look::exits(ctx.clone()).await,
        Verb::Who => who::who(ctx.clone()).await,
        Verb::Debug => debug_cmd::debug_cmd(ctx.clone(), intent).await,
        Verb::Help => {
            ctx.output.system(help_text());
            Ok(())
        }
        Verb::Quit => {
            ctx.output.system("Goodbye!");
            return Ok(Flow::Quit);
        }
        Verb::Unknown => {
            ctx.output.line("Unknown command. Try `help`.");
            Ok(())
        }
    };

    match res {
        Err(CommandError::Domain(e)) => report_world_error(&ctx, e)?,
        Err(CommandError::Usage(u)) => ctx.output.system(format!("Usage: {u}")),
        other => other?,
    }
    Ok(Flow::Continue)
}

/// Broken world data is logged for ops; the player gets a short notice instead.
fn report_world_error(ctx: &CmdCtx, e: DomainError) -> CommandResult {
    match e {
        DomainError::NoCurrentRoom => {
            tracing::error!(player=%ctx.player_id, "player is not in any known room");
            ctx.output.line("You are nowhere.");
            Ok(())
        }
        DomainError::UnknownRoom(key) => {
            tracing::error!(player=%ctx.player_id, room=%key, "exit leads to an unknown room");
            ctx.output.line("You try to move, but something goes wrong.");
            Ok(())
        }
        other => Err(other.into()),
    }
}

pub fn help_text() -> String {
    format!(
    r#"
{bold}{fg_cyan}Available commands{reset}
------------------
  {fg_yellow}help{reset}                         Show this help
  {fg_yellow}look{reset}                         Look around your current room
  {fg_yellow}exits{reset}                        List the exits and their doors
  {fg_yellow}go <dir>{reset}                     Move (e.g., go north, or just `n`)
  {fg_yellow}open <dir>{reset}                   Open the door in that direction
  {fg_yellow}close <dir>{reset}                  Close the door in that direction
  {fg_yellow}unlock <dir>{reset}                 Unlock a door, if you carry its key
  {fg_yellow}lock <dir>{reset}                   Lock a closed door, if you carry its key
  {fg_yellow}who{reset}                          List online players
  {fg_yellow}quit{reset}                         Leave

{bold}{fg_cyan}Special:{reset}
  {fg_green}@debug where{reset}                 Show where you are
  {fg_green}@debug exit <dir>{reset}            Dump an exit as JSON
  {fg_green}@debug npc <dir>{reset}             Could an NPC pass this way?"#,
    bold = ansi::BOLD,
    fg_cyan = ansi::FG_CYAN,
    fg_yellow = ansi::FG_YELLOW,
    fg_green = ansi::FG_GREEN,
    reset = ansi::RESET,
    )
}
