use crate::error::ValidationError;

pub fn parse_id(input: &str) -> Result<u64, ValidationError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ValidationError::MissingField("ID"));
    }
    input
        .parse::<u64>()
        .map_err(|_| ValidationError::InvalidId(input.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_success() {
        assert_eq!(parse_id(" 42 "), Ok(42));
    }

    #[test]
    fn test_parse_id_empty() {
        assert_eq!(parse_id("   "), Err(ValidationError::MissingField("ID")));
    }

    #[test]
    fn test_parse_id_not_numeric() {
        assert_eq!(
            parse_id("abc-123"),
            Err(ValidationError::InvalidId("abc-123".to_string()))
        );
    }
}
