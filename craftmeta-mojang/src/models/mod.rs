mod player;
mod version;

pub use player::*;
pub use version::*;

#[cfg(test)]
#[path = "../tests/models_tests.rs"]
mod tests;
