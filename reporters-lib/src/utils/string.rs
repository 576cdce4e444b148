/// Render an allowed-value list as `{A, B, C}`, keeping declaration order
pub fn format_value_set(values: &[&str]) -> String {
    format!("{{{}}}", values.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value_set_keeps_order() {
        assert_eq!(format_value_set(&["Mac", "Windows", "Linux"]), "{Mac, Windows, Linux}");
    }

    #[test]
    fn test_format_empty_value_set() {
        assert_eq!(format_value_set(&[]), "{}");
    }
}
