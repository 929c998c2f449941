pub mod doors;
pub mod exits;
pub mod locks;
pub mod navigator;
pub mod outcome;

pub use doors::DoorService;
pub use navigator::NavigatorService;
pub use outcome::{Denial, DoorAction, DoorOutcome, MoveOutcome};
