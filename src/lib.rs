#[macro_use]
extern crate tracing;

pub mod collect;
pub mod error;
pub mod report;
pub mod resources;
