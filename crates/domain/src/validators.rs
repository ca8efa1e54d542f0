pub const MAX_NAME_LEN: usize = 253;
pub const MAX_LABEL_LEN: usize = 63;

/// Checks that `name` is a syntactically valid hostname-style DNS name.
///
/// A single trailing dot is accepted.
pub fn validate_domain_name(name: &str) -> Result<(), String> {
    let trimmed = name.strip_suffix('.').unwrap_or(name);

    if trimmed.is_empty() {
        return Err("Domain name cannot be empty".to_string());
    }
    if trimmed.len() > MAX_NAME_LEN {
        return Err(format!(
            "Domain name '{}' exceeds {} octets",
            trimmed, MAX_NAME_LEN
        ));
    }

    for label in trimmed.split('.') {
        if label.is_empty() {
            return Err(format!("Domain name '{}' contains an empty label", trimmed));
        }
        if label.len() > MAX_LABEL_LEN {
            return Err(format!(
                "Label '{}' exceeds {} octets",
                label, MAX_LABEL_LEN
            ));
        }
        if !label
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-')
        {
            return Err(format!("Label '{}' contains invalid characters", label));
        }
        if label.starts_with('-') || label.ends_with('-') {
            return Err(format!("Label '{}' cannot start or end with '-'", label));
        }
    }

    Ok(())
}
