use crate::error::{PipelineError, Result, SourceError};
use crate::metrics::{RunMetrics, RunStats};
use crate::predicate::Predicate;
use crate::registry::PredicateRegistry;
use crate::sink::ResultSink;
use crate::source::{FileNumberSource, NumberSource};
use std::fmt;
use std::io;
use std::path::Path;
use tracing::{debug, info, trace};

/// Builder for constructing pipelines
///
/// Sinks are borrowed for `'a`: they outlive the pipeline, so the caller can
/// inspect them once the run is over.
pub struct PipelineBuilder<'a> {
    source: Option<Box<dyn NumberSource + 'a>>,
    predicate: Option<Box<dyn Predicate + 'a>>,
    sinks: Vec<&'a mut dyn ResultSink>,
}

impl<'a> PipelineBuilder<'a> {
    /// Create a new pipeline builder
    pub fn new() -> Self {
        Self {
            source: None,
            predicate: None,
            sinks: Vec::new(),
        }
    }

    /// Set where numbers come from (defaults to [`FileNumberSource`])
    pub fn source(mut self, source: impl NumberSource + 'a) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Set the predicate directly
    pub fn predicate(mut self, predicate: Box<dyn Predicate + 'a>) -> Self {
        self.predicate = Some(predicate);
        self
    }

    /// Resolve `expression` through `registry` and use it as the predicate
    pub fn filter(self, registry: &PredicateRegistry, expression: &str) -> Result<Self> {
        let predicate = registry.create(expression)?;
        Ok(self.predicate(predicate))
    }

    /// Add a sink; sinks are notified in the order they were added
    pub fn sink(mut self, sink: &'a mut dyn ResultSink) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Build the pipeline
    pub fn build(self) -> Result<Pipeline<'a>> {
        let predicate = self.predicate.ok_or(PipelineError::MissingPredicate)?;
        if self.sinks.is_empty() {
            return Err(PipelineError::NoSinks);
        }

        Ok(Pipeline {
            source: self
                .source
                .unwrap_or_else(|| Box::new(FileNumberSource)),
            predicate,
            sinks: self.sinks,
        })
    }
}

impl Default for PipelineBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// Why a run ended without touching any sink
#[derive(Debug)]
pub enum SkipReason {
    /// The source location could not be read
    SourceUnavailable(SourceError),
    /// The source was readable but held no leading integers
    EmptySource,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::SourceUnavailable(err) => write!(f, "{err}"),
            SkipReason::EmptySource => write!(f, "No valid integers found"),
        }
    }
}

/// Result of a pipeline run that did not fail
#[derive(Debug)]
pub enum RunOutcome {
    /// Every number was evaluated and every sink was finished
    Completed(RunStats),
    /// Nothing to do; no sink was notified
    Skipped(SkipReason),
}

impl RunOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, RunOutcome::Completed(_))
    }

    /// Stats of a completed run
    pub fn stats(&self) -> Option<&RunStats> {
        match self {
            RunOutcome::Completed(stats) => Some(stats),
            RunOutcome::Skipped(_) => None,
        }
    }
}

/// Source → predicate → sinks, run once, sequentially
pub struct Pipeline<'a> {
    source: Box<dyn NumberSource + 'a>,
    predicate: Box<dyn Predicate + 'a>,
    sinks: Vec<&'a mut dyn ResultSink>,
}

impl<'a> Pipeline<'a> {
    /// Shorthand for [`PipelineBuilder::new`]
    pub fn builder() -> PipelineBuilder<'a> {
        PipelineBuilder::new()
    }

    /// Read every number at `location` and feed the matches to the sinks.
    ///
    /// An unreadable or empty source short-circuits: neither `on_number`
    /// nor `on_finished` is called. The pipeline is consumed because sinks
    /// cannot be reset between runs.
    pub fn run(mut self, location: impl AsRef<Path>) -> Result<RunOutcome> {
        let location = location.as_ref();
        debug!(
            source = self.source.name(),
            location = %location.display(),
            predicate = self.predicate.name(),
            sinks = self.sinks.len(),
            "starting run"
        );

        let numbers = match self.source.read_numbers(location) {
            Ok(numbers) => numbers,
            Err(err) => {
                info!(error = %err, "source unavailable, skipping run");
                return Ok(RunOutcome::Skipped(SkipReason::SourceUnavailable(err)));
            }
        };

        if numbers.is_empty() {
            info!(location = %location.display(), "source holds no integers, skipping run");
            return Ok(RunOutcome::Skipped(SkipReason::EmptySource));
        }

        let mut metrics = RunMetrics::new();
        metrics.record_read(numbers.len());

        for n in numbers {
            if !self.predicate.keep(n) {
                metrics.record_rejected();
                continue;
            }

            metrics.record_matched();
            trace!(n, "match");
            for sink in self.sinks.iter_mut() {
                sink.on_number(n).map_err(|err| sink_error(&**sink, err))?;
            }
        }

        for sink in self.sinks.iter_mut() {
            sink.on_finished().map_err(|err| sink_error(&**sink, err))?;
        }

        let stats = metrics.snapshot();
        debug!("run finished: {}", stats.format());
        Ok(RunOutcome::Completed(stats))
    }
}

fn sink_error(sink: &dyn ResultSink, source: io::Error) -> PipelineError {
    PipelineError::Sink {
        sink: sink.name().to_string(),
        source,
    }
}
