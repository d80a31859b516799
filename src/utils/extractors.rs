use crate::{
    error::{AppError, Result},
    utils::jwt::Claims,
};

pub fn extract_user_id(claims: &Claims) -> Result<i32> {
    claims
        .sub
        .parse::<i32>()
        .map_err(|_| AppError::Unauthorized("Unauthorized".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_subject_parses() {
        let claims = Claims {
            sub: "17".to_string(),
            exp: 0,
        };

        assert_eq!(extract_user_id(&claims).unwrap(), 17);
    }

    #[test]
    fn non_numeric_subject_is_unauthorized() {
        let claims = Claims {
            sub: "abc".to_string(),
            exp: 0,
        };

        assert!(matches!(
            extract_user_id(&claims),
            Err(AppError::Unauthorized(_))
        ));
    }
}
