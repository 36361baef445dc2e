/// Check the admin key guarding the monitoring and export endpoints.
///
/// Compares every byte regardless of where the first mismatch is. An empty
/// configured key never matches, so a blank config cannot open the endpoints.
pub fn admin_key_matches(provided: &str, configured: &str) -> bool {
    let provided = provided.as_bytes();
    let configured = configured.as_bytes();

    if configured.is_empty() || provided.len() != configured.len() {
        return false;
    }

    let diff = provided
        .iter()
        .zip(configured)
        .fold(0u8, |acc, (a, b)| acc | (a ^ b));

    diff == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_key() {
        assert!(admin_key_matches("dispatch-admin", "dispatch-admin"));
    }

    #[test]
    fn test_wrong_key() {
        assert!(!admin_key_matches("dispatch-admiN", "dispatch-admin"));
        assert!(!admin_key_matches("short", "dispatch-admin"));
        assert!(!admin_key_matches("", "dispatch-admin"));
    }

    #[test]
    fn test_empty_configured_key_never_matches() {
        assert!(!admin_key_matches("", ""));
        assert!(!admin_key_matches("anything", ""));
    }
}
