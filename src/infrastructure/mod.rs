pub mod gateway;
pub mod hooks;
pub mod plugins;
pub mod session_cache;
pub mod whatsapp;

#[cfg(test)]
pub mod test_utils;

pub use gateway::*;
pub use hooks::*;
pub use plugins::*;
pub use session_cache::*;
