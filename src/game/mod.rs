pub mod achievements;
pub mod event;
pub mod machine;
pub mod state;
pub mod summary;

pub use self::achievements::{Achievement, Rarity};
pub use self::event::{parse_script, GameEvent, Outcome};
pub use self::machine::{GameStateMachine, Placement, Transition};
pub use self::state::{GameState, Phase};
pub use self::summary::GameSummary;
