use crate::shared::errors::AppResult;
use crate::shared::utils::{validate_min_length, validate_required_field};
use serde::{Deserialize, Serialize};

/// カテゴリーデータモデル
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(alias = "userId", default)]
    pub user_id: String,
}

/// カテゴリー作成用DTO
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct CreateCategoryDto {
    pub name: String,
    /// 未入力の場合は空文字列を送信する
    pub description: String,
    pub user_id: String,
}

/// カテゴリー更新用DTO
#[derive(Debug, Serialize, Clone, Default, PartialEq)]
pub struct UpdateCategoryDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// カテゴリー追加フォームの入力値
#[derive(Debug, Clone, Default)]
pub struct CategoryForm {
    pub name: String,
    pub description: String,
}

impl CategoryForm {
    pub fn new<N: Into<String>, D: Into<String>>(name: N, description: D) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    /// 入力値を検証して作成用DTOに変換する
    ///
    /// カテゴリー名は前後の空白を除いて2文字以上が必要。
    pub fn to_dto(&self, user_id: &str) -> AppResult<CreateCategoryDto> {
        validate_required_field(&self.name, "カテゴリー名")?;
        validate_min_length(&self.name, 2, "カテゴリー名")?;

        Ok(CreateCategoryDto {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            user_id: user_id.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::errors::AppError;

    #[test]
    fn test_category_deserialization() {
        let json = r#"{"_id":"c1","name":"อาหาร","description":"","user_id":"u1","__v":0}"#;
        let category: Category = serde_json::from_str(json).unwrap();
        assert_eq!(category.id, "c1");
        assert_eq!(category.name, "อาหาร");
        assert_eq!(category.user_id, "u1");

        let camel: Category =
            serde_json::from_str(r#"{"_id":"c2","name":"Travel","userId":"u2"}"#).unwrap();
        assert_eq!(camel.user_id, "u2");
        assert_eq!(camel.description, None);
    }

    #[test]
    fn test_create_dto_serialization() {
        let dto = CategoryForm::new(" Food ", "").to_dto("u1").unwrap();
        let json = serde_json::to_string(&dto).unwrap();
        assert_eq!(json, r#"{"name":"Food","description":"","user_id":"u1"}"#);
    }

    #[test]
    fn test_form_validation() {
        let blank = CategoryForm::new("   ", "desc").to_dto("u1").unwrap_err();
        assert_eq!(blank.user_message(), "カテゴリー名は必須項目です");

        let short = CategoryForm::new(" a ", "").to_dto("u1").unwrap_err();
        assert!(matches!(short, AppError::Validation(_)));

        assert!(CategoryForm::new("食費", "").to_dto("u1").is_ok());
    }

    #[test]
    fn test_update_dto_only_name() {
        let dto = UpdateCategoryDto {
            name: Some("Dining".to_string()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_string(&dto).unwrap(), r#"{"name":"Dining"}"#);
    }
}
