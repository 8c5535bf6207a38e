pub mod error;
pub mod format;
pub mod main;
pub mod spawner;
pub mod task;
