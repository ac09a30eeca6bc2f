use serde::{Deserialize, Serialize};

/// ユーザーデータモデル
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// ユーザー更新用DTO
#[derive(Debug, Serialize, Clone, Default)]
pub struct UpdateUserDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_deserialization_ignores_password_hash() {
        let user: User = serde_json::from_str(
            r#"{"_id":"u1","email":"a@example.com","name":"A","password":"$2b$10$hash"}"#,
        )
        .unwrap();
        assert_eq!(user.id, "u1");
        assert_eq!(user.name.as_deref(), Some("A"));
    }
}
