mod builder;
#[allow(clippy::module_inception)]
mod watcher;

pub use builder::*;
pub use watcher::*;
