pub mod error;
pub mod logging;

pub mod emit;
pub mod extract;
pub mod index;
pub mod model;
pub mod pipeline;
pub mod registry;

pub use error::Result;
