//! Pass abstraction and fixed-point driver.
//!
//! A [`Pass`] rewrites a module in place and reports whether it changed
//! anything. [`FixedPoint`] reruns a pass until it stops reporting changes,
//! and [`PassPipeline`] runs a sequence of passes in order. All three share
//! the same interface, so they nest freely.
//!
//! The module type is a type parameter: this crate never looks inside it.
//!
//! # Example
//!
//! ```rust
//! use fixpoint_pass::{FixedPoint, Pass, pass_fn};
//!
//! // Halves every even number once per run.
//! let halve = pass_fn("halve-evens", |numbers: &mut Vec<u32>| {
//!     let mut changed = false;
//!     for n in numbers.iter_mut() {
//!         if *n != 0 && *n % 2 == 0 {
//!             *n /= 2;
//!             changed = true;
//!         }
//!     }
//!     Ok(changed)
//! });
//!
//! let mut numbers = vec![8, 3, 12];
//! let mut driver = FixedPoint::new(halve);
//!
//! assert_eq!(driver.name(), "halve-evens");
//! assert!(driver.run(&mut numbers).unwrap());
//! assert_eq!(numbers, vec![1, 3, 3]);
//! ```

mod fixed_point;
mod pass;
mod pipeline;

pub use fixed_point::FixedPoint;
pub use pass::{FnPass, Pass, PassExt, pass_fn};
pub use pipeline::{PassPipeline, PassRun, PipelineReport};
