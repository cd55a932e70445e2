//! Input rules that gate wizard transitions

/// True when the value has at least one non-whitespace character
pub fn is_non_blank(value: &str) -> bool {
    !value.trim().is_empty()
}

/// True when the value contains an `@`.
///
/// This is the only email rule the matching service expects from the form.
pub fn is_plausible_email(value: &str) -> bool {
    value.contains('@')
}

/// Guard for leaving the identity step
pub fn identity_ready(name: &str, email: &str) -> bool {
    is_non_blank(name) && is_plausible_email(email)
}

/// Guard for submitting from the sections step
pub fn sections_ready(current_section: &str, desired_section: &str) -> bool {
    is_non_blank(current_section) && is_non_blank(desired_section)
}
