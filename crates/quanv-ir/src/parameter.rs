//! Symbolic parameters for variational circuits.
//!
//! Rotation angles in an ansatz are not known at construction time. They
//! are allocated as named placeholders, threaded through the circuit, and
//! bound to concrete values by the caller once an optimizer has produced
//! them.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::f64::consts::PI;
use std::fmt;
use std::ops::Index;

/// A symbolic or concrete angle expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParameterExpression {
    /// A concrete numeric value.
    Constant(f64),
    /// A named placeholder with no bound value.
    Symbol(String),
    /// The constant π.
    Pi,
    /// Negation.
    Neg(Box<ParameterExpression>),
    /// Addition.
    Add(Box<ParameterExpression>, Box<ParameterExpression>),
    /// Subtraction.
    Sub(Box<ParameterExpression>, Box<ParameterExpression>),
    /// Multiplication.
    Mul(Box<ParameterExpression>, Box<ParameterExpression>),
}

impl ParameterExpression {
    /// Create a concrete value.
    pub fn constant(value: f64) -> Self {
        ParameterExpression::Constant(value)
    }

    /// Create a named placeholder.
    pub fn symbol(name: impl Into<String>) -> Self {
        ParameterExpression::Symbol(name.into())
    }

    /// The constant π.
    pub fn pi() -> Self {
        ParameterExpression::Pi
    }

    /// Whether any unbound symbol remains in this expression.
    pub fn is_symbolic(&self) -> bool {
        match self {
            ParameterExpression::Symbol(_) => true,
            ParameterExpression::Constant(_) | ParameterExpression::Pi => false,
            ParameterExpression::Neg(e) => e.is_symbolic(),
            ParameterExpression::Add(a, b)
            | ParameterExpression::Sub(a, b)
            | ParameterExpression::Mul(a, b) => a.is_symbolic() || b.is_symbolic(),
        }
    }

    /// Evaluate to a concrete value, if no symbol remains.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParameterExpression::Constant(v) => Some(*v),
            ParameterExpression::Symbol(_) => None,
            ParameterExpression::Pi => Some(PI),
            ParameterExpression::Neg(e) => e.as_f64().map(|v| -v),
            ParameterExpression::Add(a, b) => Some(a.as_f64()? + b.as_f64()?),
            ParameterExpression::Sub(a, b) => Some(a.as_f64()? - b.as_f64()?),
            ParameterExpression::Mul(a, b) => Some(a.as_f64()? * b.as_f64()?),
        }
    }

    /// All symbol names appearing in this expression.
    pub fn symbols(&self) -> HashSet<String> {
        let mut set = HashSet::new();
        self.collect_symbols(&mut set);
        set
    }

    /// Visit every symbol occurrence in expression order, left to right.
    pub fn visit_symbols<F: FnMut(&str)>(&self, visit: &mut F) {
        match self {
            ParameterExpression::Constant(_) | ParameterExpression::Pi => {}
            ParameterExpression::Symbol(name) => visit(name),
            ParameterExpression::Neg(e) => e.visit_symbols(visit),
            ParameterExpression::Add(a, b)
            | ParameterExpression::Sub(a, b)
            | ParameterExpression::Mul(a, b) => {
                a.visit_symbols(visit);
                b.visit_symbols(visit);
            }
        }
    }

    fn collect_symbols(&self, set: &mut HashSet<String>) {
        match self {
            ParameterExpression::Constant(_) | ParameterExpression::Pi => {}
            ParameterExpression::Symbol(name) => {
                set.insert(name.clone());
            }
            ParameterExpression::Neg(e) => e.collect_symbols(set),
            ParameterExpression::Add(a, b)
            | ParameterExpression::Sub(a, b)
            | ParameterExpression::Mul(a, b) => {
                a.collect_symbols(set);
                b.collect_symbols(set);
            }
        }
    }

    /// Bind one symbol to a value, returning a new expression.
    ///
    /// Symbols with a different name are left in place.
    pub fn bind(&self, name: &str, value: f64) -> Self {
        match self {
            ParameterExpression::Symbol(n) if n == name => ParameterExpression::Constant(value),
            ParameterExpression::Constant(_)
            | ParameterExpression::Pi
            | ParameterExpression::Symbol(_) => self.clone(),
            ParameterExpression::Neg(e) => ParameterExpression::Neg(Box::new(e.bind(name, value))),
            ParameterExpression::Add(a, b) => ParameterExpression::Add(
                Box::new(a.bind(name, value)),
                Box::new(b.bind(name, value)),
            ),
            ParameterExpression::Sub(a, b) => ParameterExpression::Sub(
                Box::new(a.bind(name, value)),
                Box::new(b.bind(name, value)),
            ),
            ParameterExpression::Mul(a, b) => ParameterExpression::Mul(
                Box::new(a.bind(name, value)),
                Box::new(b.bind(name, value)),
            ),
        }
    }

    /// Bind every symbol found in `values`, returning a new expression.
    ///
    /// Symbols absent from the map are left symbolic; use
    /// [`is_symbolic`](Self::is_symbolic) afterwards to check for a
    /// complete assignment.
    pub fn bind_all(&self, values: &FxHashMap<String, f64>) -> Self {
        match self {
            ParameterExpression::Symbol(n) => match values.get(n) {
                Some(v) => ParameterExpression::Constant(*v),
                None => self.clone(),
            },
            ParameterExpression::Constant(_) | ParameterExpression::Pi => self.clone(),
            ParameterExpression::Neg(e) => ParameterExpression::Neg(Box::new(e.bind_all(values))),
            ParameterExpression::Add(a, b) => ParameterExpression::Add(
                Box::new(a.bind_all(values)),
                Box::new(b.bind_all(values)),
            ),
            ParameterExpression::Sub(a, b) => ParameterExpression::Sub(
                Box::new(a.bind_all(values)),
                Box::new(b.bind_all(values)),
            ),
            ParameterExpression::Mul(a, b) => ParameterExpression::Mul(
                Box::new(a.bind_all(values)),
                Box::new(b.bind_all(values)),
            ),
        }
    }

    /// Fold constant subexpressions.
    pub fn simplify(&self) -> Self {
        if let Some(v) = self.as_f64() {
            return ParameterExpression::Constant(v);
        }
        match self {
            ParameterExpression::Neg(e) => ParameterExpression::Neg(Box::new(e.simplify())),
            ParameterExpression::Add(a, b) => {
                ParameterExpression::Add(Box::new(a.simplify()), Box::new(b.simplify()))
            }
            ParameterExpression::Sub(a, b) => {
                ParameterExpression::Sub(Box::new(a.simplify()), Box::new(b.simplify()))
            }
            ParameterExpression::Mul(a, b) => {
                ParameterExpression::Mul(Box::new(a.simplify()), Box::new(b.simplify()))
            }
            _ => self.clone(),
        }
    }
}

impl fmt::Display for ParameterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterExpression::Constant(v) => write!(f, "{v}"),
            ParameterExpression::Symbol(name) => write!(f, "{name}"),
            ParameterExpression::Pi => write!(f, "π"),
            ParameterExpression::Neg(e) => write!(f, "-({e})"),
            ParameterExpression::Add(a, b) => write!(f, "({a} + {b})"),
            ParameterExpression::Sub(a, b) => write!(f, "({a} - {b})"),
            ParameterExpression::Mul(a, b) => write!(f, "({a} * {b})"),
        }
    }
}

impl From<f64> for ParameterExpression {
    fn from(value: f64) -> Self {
        ParameterExpression::Constant(value)
    }
}

impl From<i32> for ParameterExpression {
    fn from(value: i32) -> Self {
        ParameterExpression::Constant(f64::from(value))
    }
}

impl std::ops::Add for ParameterExpression {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        ParameterExpression::Add(Box::new(self), Box::new(rhs))
    }
}

impl std::ops::Sub for ParameterExpression {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        ParameterExpression::Sub(Box::new(self), Box::new(rhs))
    }
}

impl std::ops::Mul for ParameterExpression {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        ParameterExpression::Mul(Box::new(self), Box::new(rhs))
    }
}

impl std::ops::Neg for ParameterExpression {
    type Output = Self;

    fn neg(self) -> Self::Output {
        ParameterExpression::Neg(Box::new(self))
    }
}

/// An ordered allocation of symbolic placeholders sharing a stem name.
///
/// Element `i` is the symbol `"{stem}[{i}]"`, so a vector named `theta`
/// of length 3 holds `theta[0]`, `theta[1]`, `theta[2]`. Ansatz builders
/// allocate one vector per circuit and consume its elements in order;
/// the caller binds values against the same names later via
/// [`Circuit::bind`](crate::Circuit::bind).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterVector {
    name: String,
    params: Vec<ParameterExpression>,
}

impl ParameterVector {
    /// Allocate `len` placeholders under the stem `name`.
    pub fn new(name: impl Into<String>, len: usize) -> Self {
        let name = name.into();
        let params = (0..len)
            .map(|i| ParameterExpression::symbol(format!("{name}[{i}]")))
            .collect();
        Self { name, params }
    }

    /// The stem name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of placeholders.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Whether the vector is empty.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// The `i`-th placeholder, if in range.
    pub fn get(&self, i: usize) -> Option<&ParameterExpression> {
        self.params.get(i)
    }

    /// Iterate over the placeholders in order.
    pub fn iter(&self) -> impl Iterator<Item = &ParameterExpression> {
        self.params.iter()
    }

    /// The symbol names, in order.
    pub fn names(&self) -> Vec<String> {
        (0..self.params.len())
            .map(|i| format!("{}[{i}]", self.name))
            .collect()
    }

    /// Pair the names with the given values, for [`Circuit::bind`](crate::Circuit::bind).
    ///
    /// # Panics
    ///
    /// Panics if `values.len()` differs from the vector length.
    pub fn bindings(&self, values: &[f64]) -> FxHashMap<String, f64> {
        assert_eq!(
            values.len(),
            self.params.len(),
            "expected {} values for parameter vector '{}', got {}",
            self.params.len(),
            self.name,
            values.len(),
        );
        self.names().into_iter().zip(values.iter().copied()).collect()
    }
}

impl Index<usize> for ParameterVector {
    type Output = ParameterExpression;

    fn index(&self, i: usize) -> &Self::Output {
        &self.params[i]
    }
}

impl<'a> IntoIterator for &'a ParameterVector {
    type Item = &'a ParameterExpression;
    type IntoIter = std::slice::Iter<'a, ParameterExpression>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant() {
        let p = ParameterExpression::constant(0.25);
        assert!(!p.is_symbolic());
        assert_eq!(p.as_f64(), Some(0.25));
    }

    #[test]
    fn test_symbol() {
        let p = ParameterExpression::symbol("alpha");
        assert!(p.is_symbolic());
        assert_eq!(p.as_f64(), None);
        assert!(p.symbols().contains("alpha"));
    }

    #[test]
    fn test_pi() {
        assert_eq!(ParameterExpression::pi().as_f64(), Some(PI));
    }

    #[test]
    fn test_bind_single() {
        let p = ParameterExpression::symbol("alpha");
        let bound = p.bind("alpha", PI / 2.0);
        assert!(!bound.is_symbolic());
        assert!((bound.as_f64().unwrap() - PI / 2.0).abs() < 1e-12);

        // Unrelated names are untouched.
        assert!(p.bind("beta", 1.0).is_symbolic());
    }

    #[test]
    fn test_bind_all_partial() {
        let expr = ParameterExpression::symbol("a") + ParameterExpression::symbol("b");
        let mut values = FxHashMap::default();
        values.insert("a".to_string(), 1.0);

        let partial = expr.bind_all(&values);
        assert!(partial.is_symbolic());

        values.insert("b".to_string(), 2.0);
        let full = expr.bind_all(&values);
        assert_eq!(full.as_f64(), Some(3.0));
    }

    #[test]
    fn test_arithmetic_and_simplify() {
        let a = ParameterExpression::constant(2.0);
        let b = ParameterExpression::constant(3.0);
        let sum = (a.clone() + b.clone()).simplify();
        assert_eq!(sum, ParameterExpression::Constant(5.0));

        let prod = (a * b).simplify();
        assert_eq!(prod.as_f64(), Some(6.0));

        let neg = (-ParameterExpression::pi()).simplify();
        assert_eq!(neg.as_f64(), Some(-PI));
    }

    #[test]
    fn test_vector_naming() {
        let theta = ParameterVector::new("theta", 3);
        assert_eq!(theta.len(), 3);
        assert_eq!(theta[0], ParameterExpression::symbol("theta[0]"));
        assert_eq!(theta.names(), vec!["theta[0]", "theta[1]", "theta[2]"]);
    }

    #[test]
    fn test_vector_names_unique() {
        let v = ParameterVector::new("p", 16);
        let names = v.names();
        let set: HashSet<_> = names.iter().collect();
        assert_eq!(set.len(), names.len());
    }

    #[test]
    fn test_vector_bindings() {
        let v = ParameterVector::new("w", 2);
        let map = v.bindings(&[0.5, 1.5]);
        assert_eq!(map.get("w[0]"), Some(&0.5));
        assert_eq!(map.get("w[1]"), Some(&1.5));
    }

    #[test]
    #[should_panic(expected = "expected 2 values")]
    fn test_vector_bindings_length_mismatch() {
        let v = ParameterVector::new("w", 2);
        let _ = v.bindings(&[0.5]);
    }

    #[test]
    fn test_empty_vector() {
        let v = ParameterVector::new("t", 0);
        assert!(v.is_empty());
        assert!(v.get(0).is_none());
    }
}
