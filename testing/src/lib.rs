#[cfg(feature = "ac")]
pub mod ac;
#[cfg(feature = "chrono")]
pub mod chrono;
#[cfg(feature = "core")]
pub mod core;
#[cfg(feature = "model")]
pub mod model;
#[cfg(feature = "rand")]
pub mod rand;

mod utils;
pub use utils::*;
