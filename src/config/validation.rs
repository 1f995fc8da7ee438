use thiserror::Error;

/// 配置驗證錯誤
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required setting: {0}")]
    MissingField(String),

    #[error("{field} = {value:?} is not one of {allowed:?}")]
    InvalidValue {
        field: String,
        value: String,
        allowed: Vec<String>,
    },
}

/// 配置驗證器trait
pub trait Validator {
    /// 驗證配置
    fn validate(&self) -> Result<(), ValidationError>;
}

/// 驗證工具函數
pub struct ValidationUtils;

impl ValidationUtils {
    /// 驗證一個選項是否為某些值中的一個（不分大小寫）
    pub fn one_of(value: &str, options: &[&str], field_name: &str) -> Result<(), ValidationError> {
        if !options.iter().any(|option| option.eq_ignore_ascii_case(value)) {
            return Err(ValidationError::InvalidValue {
                field: field_name.to_string(),
                value: value.to_string(),
                allowed: options.iter().map(ToString::to_string).collect(),
            });
        }
        Ok(())
    }

    /// 檢查必要的字串欄位是否有值
    pub fn not_empty(value: &str, field_name: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::MissingField(field_name.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_of() {
        assert!(ValidationUtils::one_of("json", &["pretty", "json"], "log.format").is_ok());
        assert!(ValidationUtils::one_of("JSON", &["pretty", "json"], "log.format").is_ok());

        let err = ValidationUtils::one_of("xml", &["pretty", "json"], "log.format").unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidValue {
                field: "log.format".to_string(),
                value: "xml".to_string(),
                allowed: vec!["pretty".to_string(), "json".to_string()],
            }
        );
    }

    #[test]
    fn test_not_empty() {
        assert!(ValidationUtils::not_empty("migrations", "migrations_dir").is_ok());

        assert_eq!(
            ValidationUtils::not_empty("   ", "migrations_dir"),
            Err(ValidationError::MissingField("migrations_dir".to_string()))
        );
    }
}
