pub mod client;
pub mod screen;
pub mod tag;

pub use client::{Client, ClientId, ClientList};
pub use screen::{LayoutRegistry, Screen, ScreenId};
pub use tag::{Tag, TagRegistry};
