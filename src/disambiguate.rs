//! Resolve abbreviated names against a fixed vocabulary.
//!
//! An input selects a name when exactly one name starts with it. Ambiguous
//! and unknown inputs are passed through, normalized, so the caller can
//! decide how to report them.

/// Prefix resolver over a fixed set of names.
///
/// The names are collected at construction, so a resolver built from a
/// one-shot iterator can still be called any number of times.
#[derive(Debug, Clone)]
pub struct Disambiguator<F> {
    names: Vec<String>,
    normalize: F,
}

impl<F> Disambiguator<F>
where
    F: Fn(&str) -> String,
{
    pub fn new<I, S>(names: I, normalize: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            normalize,
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Resolve `input` to the single name it is a prefix of.
    ///
    /// An exact match is not special: if `input` names one candidate and is
    /// also a prefix of another, the input is ambiguous and comes back
    /// unchanged (normalized).
    pub fn resolve(&self, input: &str) -> String {
        let value = (self.normalize)(input);
        let mut candidates = self
            .names
            .iter()
            .filter(|name| (self.normalize)(name.as_str()).starts_with(value.as_str()));
        match (candidates.next(), candidates.next()) {
            (Some(only), None) => only.clone(),
            _ => value,
        }
    }
}

/// Build a function that disambiguates a string between `names`.
///
/// # Example
/// ```
/// use logfilter::disambiguate::disambiguate;
///
/// let level = disambiguate(["ERR", "WARNING", "NOTICE"], |s| s.to_uppercase());
/// assert_eq!(level("warn"), "WARNING");
/// assert_eq!(level("bogus"), "BOGUS");
/// ```
pub fn disambiguate<I, S, F>(names: I, normalize: F) -> impl Fn(&str) -> String
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
    F: Fn(&str) -> String,
{
    let resolver = Disambiguator::new(names, normalize);
    move |input: &str| resolver.resolve(input)
}
