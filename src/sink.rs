use std::io::{self, Stdout, Write};

/// Observer notified of every integer that passed the predicate
pub trait ResultSink {
    /// Called once per matching integer, in source order
    fn on_number(&mut self, n: i64) -> io::Result<()>;

    /// Called once after the whole input has been consumed
    fn on_finished(&mut self) -> io::Result<()> {
        Ok(())
    }

    /// Get a human-readable name for this sink
    fn name(&self) -> &str {
        "sink"
    }
}

/// Writes each match on its own line
#[derive(Debug)]
pub struct PrintingSink<W: Write = Stdout> {
    out: W,
}

impl PrintingSink<Stdout> {
    /// Create a sink printing to standard output
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> PrintingSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Recover the underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ResultSink for PrintingSink<W> {
    fn on_number(&mut self, n: i64) -> io::Result<()> {
        writeln!(self.out, "{n}")
    }

    fn on_finished(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    fn name(&self) -> &str {
        "printer"
    }
}

/// Counts matches and reports the total when the input is exhausted
#[derive(Debug)]
pub struct CountingSink<W: Write = Stdout> {
    count: u64,
    out: W,
}

impl CountingSink<Stdout> {
    /// Create a sink reporting to standard output
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> CountingSink<W> {
    pub fn new(out: W) -> Self {
        Self { count: 0, out }
    }

    /// Number of matches seen so far
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Recover the underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ResultSink for CountingSink<W> {
    fn on_number(&mut self, _n: i64) -> io::Result<()> {
        self.count += 1;
        Ok(())
    }

    fn on_finished(&mut self) -> io::Result<()> {
        writeln!(self.out, "Total numbers passed filter: {}", self.count)?;
        if self.count == 0 {
            writeln!(self.out, "No numbers passed the filter.")?;
        }
        self.out.flush()
    }

    fn name(&self) -> &str {
        "counter"
    }
}

/// Keeps every match in memory
#[derive(Debug, Default, Clone)]
pub struct CollectingSink {
    values: Vec<i64>,
    finished: bool,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Matches collected so far, in arrival order
    pub fn values(&self) -> &[i64] {
        &self.values
    }

    /// Whether `on_finished` has been called
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn into_values(self) -> Vec<i64> {
        self.values
    }
}

impl ResultSink for CollectingSink {
    fn on_number(&mut self, n: i64) -> io::Result<()> {
        self.values.push(n);
        Ok(())
    }

    fn on_finished(&mut self) -> io::Result<()> {
        self.finished = true;
        Ok(())
    }

    fn name(&self) -> &str {
        "collector"
    }
}
