pub mod assembly;
pub mod preflight;
