use uuid::Uuid;

const PREFIX: &str = "DV-";
const CODE_LEN: usize = 10;

/// Generates a human-shareable tracking code such as `DV-3F9A0C12B7`.
/// Uniqueness is enforced by the database; a collision surfaces as a
/// unique-constraint violation and is practically unreachable at this
/// keyspace (16^10).
pub fn generate_tracking_number() -> String {
    let hex = Uuid::new_v4().simple().to_string().to_uppercase();
    format!("{PREFIX}{}", &hex[..CODE_LEN])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracking_number_has_prefix_and_fixed_length() {
        let code = generate_tracking_number();
        assert!(code.starts_with("DV-"));
        assert_eq!(code.len(), PREFIX.len() + CODE_LEN);
        assert!(
            code[PREFIX.len()..]
                .chars()
                .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase())
        );
    }

    #[test]
    fn tracking_numbers_do_not_repeat() {
        let a = generate_tracking_number();
        let b = generate_tracking_number();
        assert_ne!(a, b);
    }
}
