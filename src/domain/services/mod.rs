pub mod actions;
mod app_state;
pub mod events;
mod screen;
mod scroll;
mod view_model;

pub use app_state::*;
pub use screen::*;
pub use scroll::*;
pub use view_model::*;
