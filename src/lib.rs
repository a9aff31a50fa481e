//! Read integers from a text file, filter them, and report the matches.
//!
//! A run flows through three pluggable pieces:
//!
//! - a [`NumberSource`] that loads whitespace-separated integers,
//! - a [`Predicate`] resolved from a filter expression (`EVEN`, `ODD`,
//!   `GT<n>`, or any kind added to a [`PredicateRegistry`]),
//! - one or more [`ResultSink`]s notified of every match, then of the end of
//!   input.
//!
//! # Example
//!
//! ```no_run
//! use number_filter::{CountingSink, Pipeline, PredicateRegistry, PrintingSink};
//!
//! let registry = PredicateRegistry::new();
//! let mut printer = PrintingSink::stdout();
//! let mut counter = CountingSink::stdout();
//!
//! let outcome = Pipeline::builder()
//!     .filter(&registry, "GT25")?
//!     .sink(&mut printer)
//!     .sink(&mut counter)
//!     .build()?
//!     .run("numbers.txt")?;
//!
//! println!("{} matched", counter.count());
//! # let _ = outcome;
//! # Ok::<(), number_filter::PipelineError>(())
//! ```

pub mod error;
pub mod metrics;
pub mod pipeline;
pub mod predicate;
pub mod registry;
pub mod sink;
pub mod source;

// Re-exports for convenience
pub use error::{FilterError, PipelineError, Result, SourceError};
pub use metrics::{RunMetrics, RunStats};
pub use pipeline::{Pipeline, PipelineBuilder, RunOutcome, SkipReason};
pub use predicate::{Even, FnPredicate, GreaterThan, Odd, Predicate};
pub use registry::PredicateRegistry;
pub use sink::{CollectingSink, CountingSink, PrintingSink, ResultSink};
pub use source::{parse_numbers, FileNumberSource, NumberSource, StaticNumberSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
