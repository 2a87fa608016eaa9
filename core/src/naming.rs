//! RFC 1123 naming rules for resource names.
//!
//! Each check maps a candidate name to the list of rules it breaks; an empty
//! list means the name is acceptable. The shape matches what
//! [`from_rule_check`](crate::from_rule_check) adapts into an argument
//! validator.

use std::sync::LazyLock;

use regex::Regex;

/// Maximum length of a DNS-1123 label.
pub const DNS1123_LABEL_MAX_LENGTH: usize = 63;

/// Maximum length of a DNS-1123 subdomain.
pub const DNS1123_SUBDOMAIN_MAX_LENGTH: usize = 253;

const DNS1123_LABEL_FMT: &str = "[a-z0-9]([-a-z0-9]*[a-z0-9])?";

static DNS1123_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^{DNS1123_LABEL_FMT}$")).expect("static regex must compile")
});

static DNS1123_SUBDOMAIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^{DNS1123_LABEL_FMT}(\.{DNS1123_LABEL_FMT})*$"))
        .expect("static regex must compile")
});

/// Checks that `value` is a lowercase RFC 1123 subdomain: dot-separated
/// labels of lowercase alphanumerics and `-`, each starting and ending with
/// an alphanumeric, at most 63 characters per label and 253 overall.
///
/// # Examples
///
/// ```
/// use command_guard_core::naming::is_dns1123_subdomain;
///
/// assert!(is_dns1123_subdomain("my-service.example").is_empty());
/// assert_eq!(is_dns1123_subdomain("My_Service").len(), 1);
/// ```
pub fn is_dns1123_subdomain(value: &str) -> Vec<String> {
    let mut errors = Vec::new();
    if value.len() > DNS1123_SUBDOMAIN_MAX_LENGTH {
        errors.push(max_len_error(DNS1123_SUBDOMAIN_MAX_LENGTH));
    }
    if value
        .split('.')
        .any(|label| label.len() > DNS1123_LABEL_MAX_LENGTH)
    {
        errors.push(format!(
            "each label must be no more than {DNS1123_LABEL_MAX_LENGTH} characters"
        ));
    }
    if !DNS1123_SUBDOMAIN_RE.is_match(value) {
        errors.push(regex_error(
            "a lowercase RFC 1123 subdomain must consist of lower case alphanumeric \
             characters, '-' or '.', and must start and end with an alphanumeric character",
            &DNS1123_SUBDOMAIN_RE,
            &["example.com"],
        ));
    }
    errors
}

/// Checks that `value` is a single lowercase RFC 1123 label (no dots, at most
/// 63 characters).
pub fn is_dns1123_label(value: &str) -> Vec<String> {
    let mut errors = Vec::new();
    if value.len() > DNS1123_LABEL_MAX_LENGTH {
        errors.push(max_len_error(DNS1123_LABEL_MAX_LENGTH));
    }
    if !DNS1123_LABEL_RE.is_match(value) {
        errors.push(regex_error(
            "a lowercase RFC 1123 label must consist of lower case alphanumeric \
             characters or '-', and must start and end with an alphanumeric character",
            &DNS1123_LABEL_RE,
            &["my-name", "123-abc"],
        ));
    }
    errors
}

fn max_len_error(length: usize) -> String {
    format!("must be no more than {length} characters")
}

fn regex_error(message: &str, re: &Regex, examples: &[&str]) -> String {
    let pattern = re.as_str().trim_start_matches('^').trim_end_matches('$');
    let examples = examples
        .iter()
        .map(|e| format!("'{e}'"))
        .collect::<Vec<_>>()
        .join(" or ");
    format!("{message} (e.g. {examples}, regex used for validation is '{pattern}')")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subdomain_accepts_valid_names() {
        for name in ["my-service", "my-service.example", "a", "0abc.d-e.f9"] {
            assert!(is_dns1123_subdomain(name).is_empty(), "{name} should pass");
        }
    }

    #[test]
    fn test_subdomain_rejects_uppercase_and_underscore() {
        let errors = is_dns1123_subdomain("My_Service");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("a lowercase RFC 1123 subdomain"));
        assert!(errors[0].contains("'example.com'"));
    }

    #[test]
    fn test_subdomain_rejects_bad_label_edges() {
        for name in ["-leading", "trailing-", "dot..dot", ".start", "end.", ""] {
            assert!(!is_dns1123_subdomain(name).is_empty(), "{name:?} should fail");
        }
    }

    #[test]
    fn test_subdomain_rejects_overlong_name() {
        let name = "a".repeat(254);
        let errors = is_dns1123_subdomain(&name);
        assert_eq!(
            errors,
            vec![
                "must be no more than 253 characters".to_string(),
                "each label must be no more than 63 characters".to_string(),
            ]
        );
    }

    #[test]
    fn test_subdomain_rejects_overlong_label_within_limit() {
        let name = format!("{}.example", "a".repeat(64));
        let errors = is_dns1123_subdomain(&name);
        assert_eq!(
            errors,
            vec!["each label must be no more than 63 characters".to_string()]
        );
    }

    #[test]
    fn test_label_rejects_dots() {
        assert!(is_dns1123_label("my-name").is_empty());
        let errors = is_dns1123_label("my.name");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("'my-name' or '123-abc'"));
    }
}
