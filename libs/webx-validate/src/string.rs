//! Chainable validation rules for string values.
//!
//! Rules inspect already-bound values and accumulate structured
//! diagnostics; they never reject at the type level. Except for
//! `required`, every rule passes an empty value, so optional inputs
//! validate cleanly.

use regex::Regex;

use crate::messages;
use crate::state::{Detail, ErrorState};

const EMAIL_PATTERN: &str = "^[a-z0-9._%+\\-]+@[a-z0-9.\\-]+\\.[a-z]{2,4}$";

type Rule = Box<dyn Fn(&mut ErrorState, &str) -> bool + Send + Sync>;

/// Start a rule chain for the input at `location` (e.g. a field name).
pub fn string(location: impl Into<String>) -> StringRules {
    StringRules {
        location: location.into(),
        rules: Vec::new(),
    }
}

/// Builder accumulating validation rules in declaration order.
pub struct StringRules {
    location: String,
    rules: Vec<Rule>,
}

impl StringRules {
    pub fn required(self) -> Self {
        self.rule("required", messages::REQUIRED_FIELD.to_string(), |value| {
            !value.is_empty()
        })
    }

    /// Minimum byte length; empty values pass.
    pub fn min(self, min: usize) -> Self {
        self.rule("min length", messages::min_length(min), move |value| {
            value.is_empty() || value.len() >= min
        })
    }

    /// Maximum byte length.
    pub fn max(self, max: usize) -> Self {
        self.rule("max length", messages::max_length(max), move |value| {
            value.len() <= max
        })
    }

    /// Exact byte length; empty values pass.
    pub fn exactly(self, expected: usize) -> Self {
        self.rule("exactly", messages::exact_length(expected), move |value| {
            value.is_empty() || value.len() == expected
        })
    }

    /// Full-match against `pattern`; empty values pass.
    ///
    /// The pattern is a programmer constant; an invalid one is a bug, not
    /// an input error.
    pub fn pattern(self, pattern: &str, message: impl Into<String>) -> Self {
        let re = Regex::new(pattern).expect("valid validation pattern");
        self.rule("pattern", message.into(), move |value| {
            value.is_empty() || re.is_match(value)
        })
    }

    pub fn email(self) -> Self {
        self.pattern(EMAIL_PATTERN, messages::EMAIL)
    }

    pub fn uuid(self) -> Self {
        self.rule("pattern", messages::UUID.to_string(), |value| {
            value.is_empty() || uuid::Uuid::parse_str(value).is_ok()
        })
    }

    pub fn build(self) -> StringValidator {
        StringValidator { rules: self.rules }
    }

    fn rule(
        mut self,
        reason: &'static str,
        message: String,
        accept: impl Fn(&str) -> bool + Send + Sync + 'static,
    ) -> Self {
        let location = self.location.clone();
        self.rules.push(Box::new(move |state, value| {
            if accept(value) {
                return true;
            }
            let domain = state.domain.clone();
            state.add(Detail {
                domain,
                kind: "field".to_string(),
                location: location.clone(),
                reason: reason.to_string(),
                message: message.clone(),
            });
            false
        }));
        self
    }
}

/// Compiled validator.
pub struct StringValidator {
    rules: Vec<Rule>,
}

impl StringValidator {
    /// Run the rules in declaration order against `value`, adding a
    /// diagnostic for the first failing rule. Returns whether `value`
    /// passed every rule.
    pub fn validate(&self, state: &mut ErrorState, value: &str) -> bool {
        for rule in &self.rules {
            if !rule(state, value) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> ErrorState {
        ErrorState::new("test")
    }

    #[test]
    fn required_rejects_only_empty() {
        let v = string("name").required().build();

        let mut e = state();
        assert!(!v.validate(&mut e, ""));
        assert_eq!(e.details[0].reason, "required");
        assert_eq!(e.details[0].location, "name");

        let mut e = state();
        assert!(v.validate(&mut e, " "));
        assert!(e.is_empty());
    }

    #[test]
    fn min_passes_empty_values() {
        let v = string("name").min(3).build();

        let mut e = state();
        assert!(v.validate(&mut e, ""));
        assert!(v.validate(&mut e, "abc"));
        assert!(!v.validate(&mut e, "ab"));
    }

    #[test]
    fn max_applies_to_any_value() {
        let v = string("name").max(3).build();

        let mut e = state();
        assert!(v.validate(&mut e, ""));
        assert!(v.validate(&mut e, "abc"));
        assert!(!v.validate(&mut e, "abcd"));
    }

    #[test]
    fn exactly_passes_empty_values() {
        let v = string("code").exactly(4).build();

        let mut e = state();
        assert!(v.validate(&mut e, ""));
        assert!(v.validate(&mut e, "1234"));
        assert!(!v.validate(&mut e, "123"));
    }

    #[test]
    fn email_matches_lowercase_addresses() {
        let v = string("email").email().build();

        let mut e = state();
        assert!(v.validate(&mut e, "user@example.com"));
        assert!(!v.validate(&mut e, "user@example"));
        assert!(!v.validate(&mut e, "not an email"));
    }

    #[test]
    fn uuid_accepts_canonical_form() {
        let v = string("id").uuid().build();

        let mut e = state();
        assert!(v.validate(&mut e, "67e55044-10b1-426f-9247-bb680e5fe0c8"));
        assert!(v.validate(&mut e, ""));
        assert!(!v.validate(&mut e, "67e55044"));
        assert_eq!(e.details[0].message, "Required to be a valid UUID.");
    }

    #[test]
    fn rules_run_in_order_and_stop_at_first_failure() {
        let v = string("name").required().min(3).max(5).build();

        let mut e = state();
        assert!(!v.validate(&mut e, ""));
        assert_eq!(e.details.len(), 1);
        assert_eq!(e.details[0].reason, "required");

        let mut e = state();
        assert!(!v.validate(&mut e, "ab"));
        assert_eq!(e.details[0].reason, "min length");

        let mut e = state();
        assert!(v.validate(&mut e, "abcd"));
        assert!(e.is_empty());
    }

    #[test]
    fn details_carry_the_state_domain() {
        let v = string("name").required().build();

        let mut e = ErrorState::new("membership");
        v.validate(&mut e, "");
        assert_eq!(e.details[0].domain, "membership");
    }
}
