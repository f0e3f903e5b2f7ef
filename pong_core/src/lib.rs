pub mod components;
pub mod config;
pub mod error;
pub mod game;
pub mod menu;
pub mod modes;
pub mod params;
pub mod platform;
pub mod registry;
pub mod resources;
pub mod settings;
pub mod systems;

pub use components::*;
pub use config::Config;
pub use error::PongError;
pub use game::{MatchMode, MatchPhase};
pub use menu::{MenuMode, MenuModel, MenuScreen};
pub use modes::{run, Mode, ModeController, ModeKind};
pub use params::*;
pub use platform::*;
pub use registry::Registry;
pub use resources::*;
pub use settings::*;
