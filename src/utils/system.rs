// src/utils/system.rs: System functions

use log::debug;
use sysinfo::System;

/// Number of physical cores on this machine, falling back to 1 when it cannot be read.
pub fn detect_physical_cores() -> usize {
    System::physical_core_count().unwrap_or(1).max(1)
}


/// Resolves the thread count handed to biokanga.
///
/// # Arguments
///
/// * `requested` - Threads asked for on the command line; 0 means use every physical core.
///
/// # Returns
///
/// usize thread count, never 0
pub fn resolve_threads(requested: usize) -> usize {
    if requested > 0 {
        return requested;
    }
    let cores = detect_physical_cores();
    debug!("Detected {} physical cores", cores);
    cores
}
