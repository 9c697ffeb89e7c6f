// vim: tw=80
//! Per-argument matchers used by [`Expectation::with`](crate::Expectation).
//!
//! A matcher is a predicate over a single actual [`Value`].  Literals and
//! regex literals convert into matchers directly; anything fancier comes from
//! the factory functions or, for arbitrary logic, from any
//! [`Predicate<Value>`](predicates::Predicate) via [`satisfying`].

use std::fmt::{self, Display};

use predicates::prelude::*;
use regex::Regex;

use crate::value::{Kind, Value};

/// Matches one actual argument of a call.
pub enum ArgMatcher {
    /// Structural equality with a literal value.
    Literal(Value),
    /// The argument's runtime [`Kind`] must be exactly this kind; there is
    /// no coercion, so a `Float` never satisfies a `Str` kind matcher.
    OfKind(Kind),
    /// The pattern must match the argument's textual form.  Non-string
    /// values are rendered to text first, so `/1/` matches `319`.
    Pattern(Regex),
    /// An arbitrary predicate over the argument.
    Where(Box<dyn Predicate<Value>>),
    /// Matches anything.
    Any,
}

impl ArgMatcher {
    pub fn matches(&self, v: &Value) -> bool {
        match self {
            ArgMatcher::Literal(l) => l == v,
            ArgMatcher::OfKind(k) => v.kind() == *k,
            ArgMatcher::Pattern(re) => re.is_match(&v.text()),
            ArgMatcher::Where(p) => p.eval(v),
            ArgMatcher::Any => true,
        }
    }
}

impl Display for ArgMatcher {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ArgMatcher::Literal(v) => write!(f, "{v}"),
            ArgMatcher::OfKind(k) => write!(f, "{k}"),
            ArgMatcher::Pattern(re) => write!(f, "/{}/", re.as_str()),
            ArgMatcher::Where(p) => write!(f, "{p}"),
            ArgMatcher::Any => write!(f, "any"),
        }
    }
}

/// Matches any single argument.
pub fn any() -> ArgMatcher {
    ArgMatcher::Any
}

/// Matches an argument structurally equal to `v`.
pub fn eq<V: Into<Value>>(v: V) -> ArgMatcher {
    ArgMatcher::Literal(v.into())
}

/// Matches an argument whose runtime kind is exactly `k`.
pub fn of_kind(k: Kind) -> ArgMatcher {
    ArgMatcher::OfKind(k)
}

/// Matches an argument for which `f` returns true.
pub fn matching<F>(f: F) -> ArgMatcher
where
    F: Fn(&Value) -> bool + 'static,
{
    ArgMatcher::Where(Box::new(predicates::function::function(f)))
}

/// Matches an argument satisfying any [`Predicate<Value>`].
pub fn satisfying<P>(p: P) -> ArgMatcher
where
    P: Predicate<Value> + 'static,
{
    ArgMatcher::Where(Box::new(p))
}

impl From<Value> for ArgMatcher {
    fn from(v: Value) -> Self {
        ArgMatcher::Literal(v)
    }
}

impl From<Kind> for ArgMatcher {
    fn from(k: Kind) -> Self {
        ArgMatcher::OfKind(k)
    }
}

impl From<Regex> for ArgMatcher {
    fn from(re: Regex) -> Self {
        ArgMatcher::Pattern(re)
    }
}

macro_rules! literal_matcher_from {
    ($($t:ty),+) => {
        $(
            impl From<$t> for ArgMatcher {
                fn from(v: $t) -> Self {
                    ArgMatcher::Literal(Value::from(v))
                }
            }
        )+
    }
}
literal_matcher_from!{(), bool, i32, i64, u32, f64, &str, String}

/// Build a `Vec<ArgMatcher>` from a mixed list of literals, regexes, and
/// matcher expressions.
///
/// ```
/// # use standin::{args, any, Value};
/// let ms = args![1, "two", any()];
/// assert!(ms[0].matches(&Value::Int(1)));
/// assert!(ms[2].matches(&Value::Nil));
/// ```
#[macro_export]
macro_rules! args {
    () => { ::std::vec::Vec::<$crate::ArgMatcher>::new() };
    ($($m:expr),+ $(,)?) => {
        <[_]>::into_vec(::std::boxed::Box::new([
            $($crate::ArgMatcher::from($m)),+
        ]))
    };
}

#[cfg(test)]
mod t {
    use super::*;

    #[test]
    fn kind_matching_never_coerces() {
        let m = of_kind(Kind::Str);
        assert!(m.matches(&Value::Str("hi".into())));
        assert!(!m.matches(&Value::Float(1.0)));
        assert!(!m.matches(&Value::Int(1)));
    }

    #[test]
    fn pattern_matches_textual_form() {
        let m = ArgMatcher::from(Regex::new("1").unwrap());
        assert!(m.matches(&Value::Int(319)));
        assert!(!m.matches(&Value::Int(2)));
    }

    #[test]
    fn predicate_matchers() {
        let m = matching(|v| matches!(v, Value::Int(i) if i % 2 == 0));
        assert!(m.matches(&Value::Int(4)));
        assert!(!m.matches(&Value::Int(3)));
    }

    #[test]
    fn display_forms() {
        assert_eq!("1", eq(1).to_string());
        assert_eq!("\"two\"", eq("two").to_string());
        assert_eq!("/^3$/",
            ArgMatcher::from(Regex::new("^3$").unwrap()).to_string());
        assert_eq!("any", any().to_string());
        assert_eq!("Str", of_kind(Kind::Str).to_string());
    }
}
