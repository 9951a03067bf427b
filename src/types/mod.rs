// Domain types shared by the GitHub layer and the CLI.
// Neither layer depends on the other; both import from this module.

pub mod input;
pub mod project;

pub use input::*;
pub use project::*;
