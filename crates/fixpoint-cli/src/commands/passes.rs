//! Implementation of the `fixpoint passes` command.

use fixpoint_ir::optimizer::{AVAILABLE_PASSES, DEFAULT_PIPELINE};

/// Lists the registered passes in default pipeline order.
pub fn execute() {
    println!("Passes in the '{DEFAULT_PIPELINE}' pipeline, in order:");
    for name in AVAILABLE_PASSES {
        println!("  {name}");
    }
}
