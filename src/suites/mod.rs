//! Built-in test units.
//!
//! - `sample` - the default unit run when no name is given
//! - `broken` - a unit whose constructor always fails

pub mod broken;
pub mod sample;

pub use broken::UnconstructibleSuite;
pub use sample::SampleSuite;
