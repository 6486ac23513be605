//! Validation rules for variable names and values.
//!
//! Names are held to the strictest peer's rules so that a variable accepted
//! here is accepted everywhere: POSIX tolerates characters like `%` in names,
//! but they cause trouble in practice, so only alphanumerics and `_` pass.
//! Values are checked against the strictest peer's control-character rules;
//! a value that fails is still delivered to the peers without that
//! restriction.

/// Whether a variable name may be propagated at all.
///
/// The first character must be a letter or `_`; every subsequent character
/// must be alphanumeric or `_`. Empty names are rejected.
///
/// # Examples
///
/// ```rust
/// use envsync::is_valid_name;
///
/// assert!(is_valid_name("XDG_RUNTIME_DIR"));
/// assert!(is_valid_name("_private"));
/// assert!(!is_valid_name("1BAD"));
/// assert!(!is_valid_name("MY-VAR"));
/// assert!(!is_valid_name(""));
/// ```
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// Whether a value is safe for the peer with control-character restrictions.
///
/// The check runs over the value's bytes, not its code points: any byte in
/// 1–31 other than tab (9) and newline (10), or the DEL byte (127), rejects
/// the value. Byte 0 passes.
///
/// # Examples
///
/// ```rust
/// use envsync::is_sanitized_value;
///
/// assert!(is_sanitized_value("plain text"));
/// assert!(is_sanitized_value("tabs\tand\nnewlines"));
/// assert!(!is_sanitized_value("bell\u{7}"));
/// assert!(!is_sanitized_value("del\u{7f}"));
/// ```
pub fn is_sanitized_value(value: &str) -> bool {
    value
        .bytes()
        .all(|b| !matches!(b, 1..=8 | 11..=31 | 127))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn name_must_not_start_with_digit() {
        assert!(!is_valid_name("1BAD"));
        assert!(!is_valid_name("9"));
        assert!(is_valid_name("BAD1"));
    }

    #[test]
    fn name_rejects_punctuation() {
        for name in ["MY-VAR", "MY.VAR", "MY%VAR", "MY VAR", "MY=VAR"] {
            assert!(!is_valid_name(name), "{name:?} should be rejected");
        }
    }

    #[test]
    fn name_accepts_underscores_and_letters() {
        assert!(is_valid_name("_"));
        assert!(is_valid_name("___"));
        assert!(is_valid_name("PATH"));
        assert!(is_valid_name("_XDG_SESSION"));
    }

    #[test]
    fn empty_name_is_invalid() {
        assert!(!is_valid_name(""));
    }

    #[test]
    fn value_allows_tab_newline_and_nul() {
        assert!(is_sanitized_value("a\tb"));
        assert!(is_sanitized_value("a\nb"));
        assert!(is_sanitized_value("a\0b"));
        assert!(is_sanitized_value(""));
    }

    #[test]
    fn value_rejects_bel_and_del() {
        assert!(!is_sanitized_value("\u{7}"));
        assert!(!is_sanitized_value("ok\u{7}ok"));
        assert!(!is_sanitized_value("\u{7f}"));
        assert!(!is_sanitized_value("\u{1b}[0m"));
    }

    proptest! {
        // Any value built from printable bytes plus tab/newline passes.
        #[test]
        fn printable_values_are_sanitized(value in "[ -~\t\n]*") {
            prop_assert!(is_sanitized_value(&value));
        }

        // Inserting BEL anywhere into a printable value rejects it.
        #[test]
        fn bel_anywhere_rejects(prefix in "[ -~]*", suffix in "[ -~]*") {
            let value = format!("{prefix}\u{7}{suffix}");
            prop_assert!(!is_sanitized_value(&value));
        }

        // Names of letters/underscore then alphanumerics/underscore pass.
        #[test]
        fn well_formed_names_are_valid(name in "[A-Za-z_][A-Za-z0-9_]*") {
            prop_assert!(is_valid_name(&name));
        }

        // A leading digit always rejects, whatever follows.
        #[test]
        fn leading_digit_rejects(digit in 0u8..10, rest in "[A-Za-z0-9_]*") {
            let name = format!("{digit}{rest}");
            prop_assert!(!is_valid_name(&name));
        }
    }
}
