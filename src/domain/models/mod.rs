mod action;
mod backend;
mod cards;
mod depth;
mod error;
mod event;
mod intent;
mod loading;
mod session;
mod textarea;
mod verb;

pub use action::*;
pub use backend::*;
pub use cards::*;
pub use depth::*;
pub use error::*;
pub use event::*;
pub use intent::*;
pub use loading::*;
pub use session::*;
pub use textarea::*;
pub use verb::*;
