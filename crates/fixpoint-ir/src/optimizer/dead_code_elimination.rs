//! Dead code elimination pass.
//!
//! Removes:
//! - Unreachable statements after the first return
//! - `let` bindings that nothing reads before they are shadowed or the
//!   function ends
//!
//! Liveness is computed once per run against the body as it was when the run
//! started, so `let a = 1; let b = a;` loses `b` on the first run and `a` on
//! the next.

use fixpoint_core::Result;
use fixpoint_pass::Pass;

use crate::{Function, Module, Statement};

/// Dead code elimination pass
#[derive(Debug, Default, Clone, Copy)]
pub struct DeadCodeElimination;

impl Pass<Module> for DeadCodeElimination {
    fn name(&self) -> &str {
        "dead-code-elimination"
    }

    fn run(&mut self, module: &mut Module) -> Result<bool> {
        let mut changed = false;

        for function in &mut module.functions {
            if eliminate_dead_code(function) {
                tracing::trace!(function = %function.name, "removed dead statements");
                changed = true;
            }
        }

        Ok(changed)
    }
}

/// Eliminates dead code in a function
fn eliminate_dead_code(function: &mut Function) -> bool {
    let mut changed = remove_unreachable_code(&mut function.body);

    let dead: Vec<bool> = (0..function.body.len())
        .map(|index| is_dead_binding(&function.body, index))
        .collect();

    if dead.iter().any(|is_dead| *is_dead) {
        let mut flags = dead.into_iter();
        function
            .body
            .retain(|_| !flags.next().unwrap_or(false));
        changed = true;
    }

    changed
}

/// Removes statements after the first return statement
fn remove_unreachable_code(statements: &mut Vec<Statement>) -> bool {
    match statements.iter().position(Statement::is_return) {
        Some(index) if index + 1 < statements.len() => {
            statements.truncate(index + 1);
            true
        }
        _ => false,
    }
}

/// Returns true if the statement at `index` is a `let` that is never read
fn is_dead_binding(statements: &[Statement], index: usize) -> bool {
    let Some(name) = statements[index].binding() else {
        return false;
    };

    for later in &statements[index + 1..] {
        if later.reads(name) {
            return false;
        }
        if later.binding() == Some(name) {
            return true;
        }
    }

    true
}
