//! Stateless building blocks of the watch cycle: the listener registry,
//! script extraction, unique-set comparison and the periodic scheduler.
mod comparer;
mod emitter;
mod event;
mod extractor;
mod scheduler;

pub use comparer::*;
pub use emitter::*;
pub use event::*;
pub use extractor::*;
pub use scheduler::*;

#[cfg(test)]
mod comparer_test;
