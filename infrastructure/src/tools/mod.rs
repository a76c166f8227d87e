//! Tool implementations backed by the host
//!
//! - [`SystemToolFinder`]: resolves names to executables (`PATH`, search
//!   paths, aliases)
//! - [`ExternalTool`]: runs one executable and copies its output
//! - [`StepFinder`]: config-defined composite steps in front of another
//!   finder

mod external;
mod steps;
mod system;

pub use external::ExternalTool;
pub use steps::{ConfigStep, StepFinder};
pub use system::SystemToolFinder;
