pub mod gate;
pub mod generator;
pub mod pipeline;
pub mod publisher;
pub mod sources;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;
pub mod traits;
