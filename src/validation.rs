//! Declarative field validation
//!
//! Shared by the checkout form steps and quantity-edit UIs. Schemas pair
//! each constraint with the human-readable message surfaced inline when it
//! fails. Validation is pure: it reads submitted values and reports, it
//! never mutates cart or checkout state.

use std::{collections::BTreeMap, fmt};

/// Submitted form values, keyed by field name. Missing fields read as
/// empty strings.
#[derive(Debug, Clone, Default)]
pub struct FieldValues(BTreeMap<String, String>);

impl FieldValues {
    /// Create an empty value set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a value set from name/value pairs.
    #[must_use]
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        FieldValues(
            pairs
                .iter()
                .map(|(name, value)| ((*name).to_string(), (*value).to_string()))
                .collect(),
        )
    }

    /// Set a field value, replacing any prior one.
    #[must_use]
    pub fn set(mut self, name: &str, value: &str) -> Self {
        self.0.insert(name.to_string(), value.to_string());
        self
    }

    /// Read a field value; absent fields are empty.
    #[must_use]
    pub fn get(&self, name: &str) -> &str {
        self.0.get(name).map_or("", String::as_str)
    }
}

/// Field-level rejection reasons, keyed by field name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    /// Check whether any field was rejected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of rejected fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The message for a rejected field, if any.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Iterate over (field, message) pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(field, message)| (field.as_str(), message.as_str()))
    }

    fn insert(&mut self, field: &str, message: &str) {
        self.0.insert(field.to_string(), message.to_string());
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;

        for (field, message) in self.iter() {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }

        Ok(())
    }
}

/// A single declarative constraint.
#[derive(Debug, Clone)]
enum Rule {
    Required,
    MinLength(usize),
    MaxLength(usize),
    Email,
    DigitsBetween(usize, usize),
    IntegerBetween(i64, i64),
    Matches(&'static str),
}

/// Constraints for one named field, each with its rejection message.
#[derive(Debug, Clone)]
pub struct FieldRules {
    name: &'static str,
    rules: Vec<(Rule, String)>,
}

impl FieldRules {
    /// Start a rule set for the named field.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        FieldRules {
            name,
            rules: Vec::new(),
        }
    }

    fn rule(mut self, rule: Rule, message: &str) -> Self {
        self.rules.push((rule, message.to_string()));
        self
    }

    /// The value must be non-empty after trimming.
    #[must_use]
    pub fn required(self, message: &str) -> Self {
        self.rule(Rule::Required, message)
    }

    /// The value must be at least `len` characters long.
    #[must_use]
    pub fn min_length(self, len: usize, message: &str) -> Self {
        self.rule(Rule::MinLength(len), message)
    }

    /// The value must be at most `len` characters long.
    #[must_use]
    pub fn max_length(self, len: usize, message: &str) -> Self {
        self.rule(Rule::MaxLength(len), message)
    }

    /// The value must look like an email address.
    #[must_use]
    pub fn email(self, message: &str) -> Self {
        self.rule(Rule::Email, message)
    }

    /// The value must be all digits, with a length in `min..=max`; used for
    /// card numbers and CVVs.
    #[must_use]
    pub fn digits_between(self, min: usize, max: usize, message: &str) -> Self {
        self.rule(Rule::DigitsBetween(min, max), message)
    }

    /// The value must parse as an integer in `min..=max`; used for
    /// quantity edits.
    #[must_use]
    pub fn integer_between(self, min: i64, max: i64, message: &str) -> Self {
        self.rule(Rule::IntegerBetween(min, max), message)
    }

    /// The value must equal the value of another field (cross-field
    /// equality, e.g. a password confirmation).
    #[must_use]
    pub fn matches(self, other: &'static str, message: &str) -> Self {
        self.rule(Rule::Matches(other), message)
    }
}

/// A named set of field constraints for one form or form step.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<FieldRules>,
}

impl Schema {
    /// Start an empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field's rules to the schema.
    #[must_use]
    pub fn field(mut self, field: FieldRules) -> Self {
        self.fields.push(field);
        self
    }

    /// Check values against the schema, reporting the first failing rule
    /// per field.
    ///
    /// # Errors
    ///
    /// Returns [`FieldErrors`] mapping each rejected field to its message.
    pub fn validate(&self, values: &FieldValues) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();

        for field in &self.fields {
            let value = values.get(field.name);

            for (rule, message) in &field.rules {
                if !check(rule, value, values) {
                    errors.insert(field.name, message);
                    break;
                }
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

fn check(rule: &Rule, value: &str, values: &FieldValues) -> bool {
    match rule {
        Rule::Required => !value.trim().is_empty(),
        Rule::MinLength(len) => value.chars().count() >= *len,
        Rule::MaxLength(len) => value.chars().count() <= *len,
        Rule::Email => is_email(value),
        Rule::DigitsBetween(min, max) => {
            let len = value.chars().count();

            !value.is_empty()
                && value.chars().all(|c| c.is_ascii_digit())
                && len >= *min
                && len <= *max
        }
        Rule::IntegerBetween(min, max) => value
            .trim()
            .parse::<i64>()
            .is_ok_and(|n| n >= *min && n <= *max),
        Rule::Matches(other) => value == values.get(other),
    }
}

fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

/// Bounds for cart quantity edits.
#[must_use]
pub fn quantity_schema() -> Schema {
    Schema::new().field(FieldRules::new("quantity").integer_between(
        1,
        1000,
        "Quantity must be between 1 and 1000",
    ))
}
