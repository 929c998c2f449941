pub mod ansi;
pub mod broadcast;
pub mod capabilities;
pub mod commands;
pub mod config;
pub mod error;
pub mod import;
pub mod input;
pub mod models;
pub mod narration;
pub mod net;
pub mod services;
pub mod state;
pub mod world;

// Convenient re-exports (so call sites can do `waygate_server::Registry`, etc.)
pub use commands::{CmdCtx, Flow, process_command};
pub use state::registry::Registry;
pub use world::World;
pub use world::worker::{WorldHandle, start_world_worker};
