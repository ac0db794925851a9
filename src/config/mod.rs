pub mod catalog;
pub mod defs;
pub mod paths;
