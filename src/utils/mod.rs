pub mod command;
pub mod fastx;
pub mod file;
pub mod logging;
pub mod system;
