//! Name-to-constructor registry for filter expressions.
//!
//! A filter expression is `<NAME>` or `<NAME><param>`, where `NAME` is the
//! longest leading run of ASCII letters. Names are matched case-sensitively
//! against canonical uppercase constants (`EVEN`, `ODD`, `GT`); callers that
//! want case-insensitive filters normalise the expression before calling
//! [`PredicateRegistry::create`].

use crate::error::FilterError;
use crate::predicate::{Even, GreaterThan, Odd, Predicate};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// Builds a predicate that takes no parameter
pub type PredicateConstructor = Box<dyn Fn() -> Box<dyn Predicate>>;

/// Builds a predicate from its parsed integer parameter
pub type ParametricConstructor = Box<dyn Fn(i64) -> Box<dyn Predicate>>;

pub const EVEN: &str = "EVEN";
pub const ODD: &str = "ODD";
pub const GREATER_THAN: &str = "GT";

/// Registry mapping filter names to predicate constructors.
///
/// Registering a name that already exists replaces the previous entry,
/// whichever table it was in.
pub struct PredicateRegistry {
    constructors: HashMap<String, PredicateConstructor>,
    parametric: HashMap<String, ParametricConstructor>,
}

impl PredicateRegistry {
    /// Create a registry holding the built-in kinds
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register_builtins();
        registry
    }

    /// Create a registry with no kinds at all
    pub fn empty() -> Self {
        Self {
            constructors: HashMap::new(),
            parametric: HashMap::new(),
        }
    }

    /// Register a zero-parameter kind
    pub fn register<F>(&mut self, name: impl Into<String>, constructor: F)
    where
        F: Fn() -> Box<dyn Predicate> + 'static,
    {
        let name = name.into();
        self.parametric.remove(&name);
        self.constructors.insert(name, Box::new(constructor));
    }

    /// Register a kind that requires an integer parameter, like `GT5`
    pub fn register_parametric<F>(&mut self, name: impl Into<String>, constructor: F)
    where
        F: Fn(i64) -> Box<dyn Predicate> + 'static,
    {
        let name = name.into();
        self.constructors.remove(&name);
        self.parametric.insert(name, Box::new(constructor));
    }

    /// Check whether a kind is registered under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name) || self.parametric.contains_key(name)
    }

    /// Sorted list of accepted filter forms, e.g. `["EVEN", "GT<n>", "ODD"]`
    pub fn kinds(&self) -> Vec<String> {
        let mut kinds: Vec<String> = self
            .constructors
            .keys()
            .cloned()
            .chain(self.parametric.keys().map(|name| format!("{name}<n>")))
            .collect();
        kinds.sort();
        kinds
    }

    /// Build the predicate described by `expression`
    pub fn create(&self, expression: &str) -> Result<Box<dyn Predicate>, FilterError> {
        let (name, param) = split_expression(expression);
        debug!(expression, name, param, "resolving filter");

        if let Some(constructor) = self.parametric.get(name) {
            if param.is_empty() {
                return Err(FilterError::MissingParameter(name.to_string()));
            }
            let value = param
                .parse::<i64>()
                .map_err(|_| FilterError::InvalidParameter {
                    kind: name.to_string(),
                    param: param.to_string(),
                })?;
            return Ok(constructor(value));
        }

        // Zero-parameter kinds ignore any suffix
        let constructor = self
            .constructors
            .get(name)
            .ok_or_else(|| FilterError::UnknownFilter(name.to_string()))?;
        Ok(constructor())
    }

    fn register_builtins(&mut self) {
        self.register(EVEN, || Box::new(Even));
        self.register(ODD, || Box::new(Odd));
        self.register_parametric(GREATER_THAN, |threshold| {
            Box::new(GreaterThan::new(threshold))
        });
    }
}

impl Default for PredicateRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PredicateRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PredicateRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}

/// Split into the leading alphabetic name and the remaining parameter
pub fn split_expression(expression: &str) -> (&str, &str) {
    let end = expression
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(expression.len());
    expression.split_at(end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::FnPredicate;

    #[test]
    fn test_split_expression() {
        assert_eq!(split_expression("EVEN"), ("EVEN", ""));
        assert_eq!(split_expression("GT25"), ("GT", "25"));
        assert_eq!(split_expression("GT-5"), ("GT", "-5"));
        assert_eq!(split_expression("GTabc"), ("GTabc", ""));
        assert_eq!(split_expression("42"), ("", "42"));
        assert_eq!(split_expression(""), ("", ""));
    }

    #[test]
    fn test_builtins_never_fail() {
        let registry = PredicateRegistry::new();
        assert!(registry.create("EVEN").unwrap().keep(4));
        assert!(registry.create("ODD").unwrap().keep(3));
    }

    #[test]
    fn test_greater_than() {
        let registry = PredicateRegistry::new();
        let gt = registry.create("GT5").unwrap();
        assert!(!gt.keep(5));
        assert!(gt.keep(6));

        let gt = registry.create("GT-2").unwrap();
        assert!(gt.keep(-1));
        assert!(!gt.keep(-2));

        assert!(registry.create("GT+3").unwrap().keep(4));
    }

    #[test]
    fn test_greater_than_missing_parameter() {
        let registry = PredicateRegistry::new();
        let err = registry.create("GT").err().unwrap();
        assert_eq!(err, FilterError::MissingParameter("GT".into()));
    }

    #[test]
    fn test_greater_than_bad_parameter() {
        let registry = PredicateRegistry::new();
        for expr in ["GT5x", "GT 5", "GT-", "GT1.5", "GT99999999999999999999"] {
            assert!(
                matches!(
                    registry.create(expr),
                    Err(FilterError::InvalidParameter { .. })
                ),
                "{expr} should be rejected"
            );
        }
    }

    #[test]
    fn test_gtabc_is_unknown_name() {
        // The whole alphabetic run is the name
        let registry = PredicateRegistry::new();
        let err = registry.create("GTabc").err().unwrap();
        assert_eq!(err, FilterError::UnknownFilter("GTabc".into()));
    }

    #[test]
    fn test_unknown_filter() {
        let registry = PredicateRegistry::new();
        assert_eq!(
            registry.create("XYZ").err().unwrap(),
            FilterError::UnknownFilter("XYZ".into())
        );
        assert!(registry.create("").is_err());
        assert!(registry.create("7").is_err());
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let registry = PredicateRegistry::new();
        assert!(registry.create("even").is_err());
        assert!(registry.create("gt5").is_err());
    }

    #[test]
    fn test_zero_parameter_kind_ignores_suffix() {
        let registry = PredicateRegistry::new();
        let even = registry.create("EVEN5").unwrap();
        for n in [-3, 0, 4, 5, 7] {
            assert_eq!(even.keep(n), n % 2 == 0, "n = {n}");
        }
        assert_eq!(even.name(), "EVEN");
        assert!(registry.create("ODD-1").unwrap().keep(3));
    }

    #[test]
    fn test_register_custom_kind() {
        let mut registry = PredicateRegistry::new();
        registry.register("POSITIVE", || Box::new(FnPredicate::new("POSITIVE", |n| n > 0)));

        let positive = registry.create("POSITIVE").unwrap();
        assert!(positive.keep(1));
        assert!(!positive.keep(-1));
        assert_eq!(positive.name(), "POSITIVE");
    }

    #[test]
    fn test_last_registration_wins() {
        let mut registry = PredicateRegistry::new();
        registry.register("EVEN", || Box::new(FnPredicate::new("NEVER", |_| false)));
        assert!(!registry.create("EVEN").unwrap().keep(2));

        registry.register("GT", || Box::new(FnPredicate::new("ALWAYS", |_| true)));
        assert!(registry.create("GT").unwrap().keep(i64::MIN));
        assert!(registry.create("GT5").unwrap().keep(i64::MIN));
    }

    #[test]
    fn test_register_parametric_kind() {
        let mut registry = PredicateRegistry::new();
        registry.register_parametric("MOD", |m| {
            Box::new(FnPredicate::new("MOD", move |n| m != 0 && n % m == 0))
        });
        let mod3 = registry.create("MOD3").unwrap();
        assert!(mod3.keep(9));
        assert!(!mod3.keep(10));
        assert!(matches!(
            registry.create("MOD"),
            Err(FilterError::MissingParameter(_))
        ));
    }

    #[test]
    fn test_registries_are_independent() {
        let mut custom = PredicateRegistry::new();
        custom.register("ZERO", || Box::new(FnPredicate::new("ZERO", |n| n == 0)));
        let stock = PredicateRegistry::new();

        assert!(custom.contains("ZERO"));
        assert!(!stock.contains("ZERO"));
        assert!(stock.create("ZERO").is_err());
    }

    #[test]
    fn test_empty_registry_and_kinds() {
        let registry = PredicateRegistry::empty();
        assert!(registry.kinds().is_empty());
        assert!(registry.create("EVEN").is_err());

        assert_eq!(PredicateRegistry::new().kinds(), vec!["EVEN", "GT<n>", "ODD"]);
    }
}
