use serde::de::DeserializeOwned;

/// Parse a snake_case enum value using serde-deserialization.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.replace('-', "_");
    let json = format!("\"{normalized}\"");
    serde_json::from_str(&json).map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

#[cfg(test)]
mod tests {
    use nahda_config::PassOrder;
    use nahda_core::enums::TaskPriority;

    use super::parse_enum;

    #[test]
    fn parses_snake_case_enum() {
        let priority: TaskPriority = parse_enum("high", "priority").expect("priority should parse");
        assert_eq!(priority, TaskPriority::High);
    }

    #[test]
    fn parses_hyphenated_alias() {
        let order: PassOrder =
            parse_enum("input-order", "pass order").expect("pass order should parse");
        assert_eq!(order, PassOrder::InputOrder);
    }

    #[test]
    fn errors_on_invalid_enum() {
        let err = parse_enum::<TaskPriority>("urgent", "priority").expect_err("should fail");
        assert!(err.to_string().contains("invalid priority 'urgent'"));
    }
}
