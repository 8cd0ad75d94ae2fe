//! Tests for pass pipelines.

use std::cell::RefCell;
use std::rc::Rc;

use fixpoint_core::{Error, Result};
use fixpoint_pass::{FixedPoint, Pass, PassPipeline, PassRun, pass_fn};

type Log = Rc<RefCell<Vec<&'static str>>>;

/// Records its name in a shared log, then applies `func`.
fn logged<F>(name: &'static str, log: &Log, mut func: F) -> impl Pass<Vec<i32>> + 'static
where
    F: FnMut(&mut Vec<i32>) -> Result<bool> + 'static,
{
    let log = Rc::clone(log);
    pass_fn(name, move |module: &mut Vec<i32>| {
        log.borrow_mut().push(name);
        func(module)
    })
}

fn drop_negatives(module: &mut Vec<i32>) -> Result<bool> {
    let before = module.len();
    module.retain(|n| *n >= 0);
    Ok(module.len() != before)
}

/// Halves the first even number greater than one.
fn halve_first_even(module: &mut Vec<i32>) -> Result<bool> {
    match module.iter_mut().find(|n| **n > 1 && **n % 2 == 0) {
        Some(n) => {
            *n /= 2;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Subtracts three from the first number greater than one.
fn decrement_first(module: &mut Vec<i32>) -> Result<bool> {
    match module.iter_mut().find(|n| **n > 1) {
        Some(n) => {
            *n -= 3;
            Ok(true)
        }
        None => Ok(false),
    }
}

#[test]
fn test_passes_run_once_in_order() {
    let log = Log::default();
    let mut pipeline = PassPipeline::new("ordered");
    pipeline
        .add_pass(logged("drop-negatives", &log, drop_negatives))
        .add_pass(logged("halve-first-even", &log, halve_first_even));

    let mut module = vec![-1, 8, 3];
    assert!(pipeline.run(&mut module).unwrap());

    assert_eq!(module, vec![4, 3]);
    assert_eq!(*log.borrow(), vec!["drop-negatives", "halve-first-even"]);
    assert_eq!(
        pipeline.report().runs,
        vec![
            PassRun {
                pass: "drop-negatives".to_string(),
                changed: true,
            },
            PassRun {
                pass: "halve-first-even".to_string(),
                changed: true,
            },
        ]
    );
}

#[test]
fn test_unchanged_pipeline_reports_false() {
    let mut pipeline = PassPipeline::new("quiet");
    pipeline.add_pass(pass_fn("drop-negatives", drop_negatives));

    let mut module = vec![1, 3];
    assert!(!pipeline.run(&mut module).unwrap());
    assert!(!pipeline.report().changed());
}

#[test]
fn test_failure_stops_pipeline() {
    let log = Log::default();
    let mut pipeline = PassPipeline::new("failing");
    pipeline
        .add_pass(logged("drop-negatives", &log, drop_negatives))
        .add_pass(logged("reject", &log, |_| Err(Error::pass("reject", "bad input"))))
        .add_pass(logged("halve-first-even", &log, halve_first_even));

    let mut module = vec![-2, 4];
    let err = pipeline.run(&mut module).unwrap_err();

    assert!(matches!(err, Error::Pass { ref message, .. } if message == "bad input"));
    assert_eq!(*log.borrow(), vec!["drop-negatives", "reject"]);
    // The rewrite made before the failure is not rolled back.
    assert_eq!(module, vec![4]);

    let report = pipeline.report();
    assert_eq!(report.failed.as_deref(), Some("reject"));
    assert_eq!(report.runs.len(), 1);
}

#[test]
fn test_fixed_point_pass_inside_pipeline() {
    let mut pipeline = PassPipeline::new("inner-fixpoint");
    pipeline.add_fixed_point(pass_fn("halve-first-even", halve_first_even));

    let mut module = vec![16, 12];
    assert!(pipeline.run(&mut module).unwrap());
    assert_eq!(module, vec![1, 3]);
}

#[test]
fn test_pipeline_to_fixed_point() {
    // Each pass exposes work for the other: decrementing can create evens and
    // negatives, halving can create numbers the decrement pass picks up.
    let mut pipeline = PassPipeline::new("rounds");
    pipeline
        .add_pass(pass_fn("decrement-first", decrement_first))
        .add_pass(pass_fn("drop-negatives", drop_negatives))
        .add_pass(pass_fn("halve-first-even", halve_first_even));

    let mut module = vec![9, 1];
    let mut driver = FixedPoint::with_max_iterations(pipeline, 32);

    assert!(driver.run(&mut module).unwrap());
    assert_eq!(driver.name(), "rounds");
    assert!(module.iter().all(|n| *n >= 0 && *n <= 1));

    // The last round of a converged pipeline changed nothing.
    assert!(!driver.inner().report().changed());
}

#[test]
fn test_nested_pipelines() {
    let log = Log::default();

    let mut cleanup = PassPipeline::new("cleanup");
    cleanup.add_pass(logged("drop-negatives", &log, drop_negatives));

    let mut outer = PassPipeline::new("outer");
    outer
        .add_pass(logged("halve-first-even", &log, halve_first_even))
        .add_pass(cleanup);

    assert_eq!(outer.pass_names(), vec!["halve-first-even", "cleanup"]);

    let mut module = vec![-5, 6];
    assert!(outer.run(&mut module).unwrap());
    assert_eq!(module, vec![3]);
    assert_eq!(*log.borrow(), vec!["halve-first-even", "drop-negatives"]);
}

#[test]
fn test_report_lists_changed_passes() {
    let mut pipeline = PassPipeline::new("mixed");
    pipeline
        .add_pass(pass_fn("drop-negatives", drop_negatives))
        .add_pass(pass_fn("halve-first-even", halve_first_even))
        .add_pass(pass_fn("decrement-first", decrement_first));

    // Nothing to drop, 3 is odd, and 3 - 3 = 0.
    let mut module = vec![3];
    assert!(pipeline.run(&mut module).unwrap());

    assert_eq!(module, vec![0]);
    let changed: Vec<&str> = pipeline.report().changed_passes().collect();
    assert_eq!(changed, vec!["decrement-first"]);
}

#[test]
fn test_passes_added_after_wrapping() {
    let mut driver = FixedPoint::new(PassPipeline::<Vec<i32>>::new("late"));
    driver
        .inner_mut()
        .add_pass(pass_fn("halve-first-even", halve_first_even));

    let mut module = vec![8];
    assert!(driver.run(&mut module).unwrap());

    assert_eq!(module, vec![1]);
    assert_eq!(driver.last_iterations(), 4);
    assert_eq!(driver.inner().pass_names(), vec!["halve-first-even"]);
}
