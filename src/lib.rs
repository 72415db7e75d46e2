pub mod config;
pub mod error;
pub mod headless;
pub mod playback;
pub mod script;
pub mod ui;
pub mod util;

pub use config::Config;
pub use error::AdvisorError;
pub use playback::{Controller, ControlState, NodeId, Pacing, PlayerMessage, Renderer};
pub use script::{Illustration, Message, Presentation, Role, Script, Step};
pub use ui::{App, Page};
