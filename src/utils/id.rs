use uuid::Uuid;

/// Generates a prefixed record id, e.g. `job-6f9c…`.
pub fn prefixed(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_carry_their_prefix() {
        let id = prefixed("note");
        assert!(id.starts_with("note-"));
        assert!(id.len() > "note-".len());
    }

    #[test]
    fn ids_are_unique() {
        assert_ne!(prefixed("job"), prefixed("job"));
    }
}
