pub mod analysis;
pub mod config;
pub mod error;
pub mod extraction;
pub mod ids;

pub use analysis::*;
pub use config::Config;
pub use error::*;
pub use extraction::*;
pub use ids::{IdGenerator, SequentialIdGenerator, UuidGenerator};
