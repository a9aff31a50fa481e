/// A pure boolean test over a single integer
pub trait Predicate {
    /// Return `true` if `n` should be passed on to the sinks
    fn keep(&self, n: i64) -> bool;

    /// Get a human-readable name for this predicate
    fn name(&self) -> &str {
        "predicate"
    }
}

/// Keeps even numbers
#[derive(Debug, Clone, Copy, Default)]
pub struct Even;

impl Predicate for Even {
    fn keep(&self, n: i64) -> bool {
        n % 2 == 0
    }

    fn name(&self) -> &str {
        "EVEN"
    }
}

/// Keeps odd numbers, negative ones included
#[derive(Debug, Clone, Copy, Default)]
pub struct Odd;

impl Predicate for Odd {
    fn keep(&self, n: i64) -> bool {
        n % 2 != 0
    }

    fn name(&self) -> &str {
        "ODD"
    }
}

/// Keeps numbers strictly greater than a threshold
#[derive(Debug, Clone, Copy)]
pub struct GreaterThan {
    threshold: i64,
}

impl GreaterThan {
    /// Create a new greater-than predicate
    pub fn new(threshold: i64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> i64 {
        self.threshold
    }
}

impl Predicate for GreaterThan {
    fn keep(&self, n: i64) -> bool {
        n > self.threshold
    }

    fn name(&self) -> &str {
        "GT"
    }
}

/// A predicate backed by a closure
#[derive(Debug)]
pub struct FnPredicate<F>
where
    F: Fn(i64) -> bool,
{
    name: String,
    test: F,
}

impl<F> FnPredicate<F>
where
    F: Fn(i64) -> bool,
{
    /// Create a new closure predicate
    pub fn new(name: impl Into<String>, test: F) -> Self {
        Self {
            name: name.into(),
            test,
        }
    }
}

impl<F> Predicate for FnPredicate<F>
where
    F: Fn(i64) -> bool,
{
    fn keep(&self, n: i64) -> bool {
        (self.test)(n)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_even_and_odd() {
        for n in [-4, -1, 0, 1, 2, 7, i64::MIN, i64::MAX] {
            assert_ne!(Even.keep(n), Odd.keep(n), "n = {n}");
        }
        assert!(Even.keep(0));
        assert!(Even.keep(-4));
        assert!(Odd.keep(-3));
        assert!(Odd.keep(i64::MAX));
    }

    #[test]
    fn test_greater_than_is_strict() {
        let gt = GreaterThan::new(5);
        assert!(!gt.keep(5));
        assert!(gt.keep(6));
        assert!(!gt.keep(-10));
        assert_eq!(gt.threshold(), 5);

        let gt_negative = GreaterThan::new(-3);
        assert!(gt_negative.keep(-2));
        assert!(!gt_negative.keep(-3));
    }

    #[test]
    fn test_fn_predicate() {
        let positive = FnPredicate::new("POSITIVE", |n| n > 0);
        assert!(positive.keep(1));
        assert!(!positive.keep(0));
        assert_eq!(positive.name(), "POSITIVE");
    }
}
