pub mod args;

use clap::Parser;

pub use args::{Arguments, FailurePolicy};

pub fn parse() -> Arguments {
    Arguments::parse()
}
