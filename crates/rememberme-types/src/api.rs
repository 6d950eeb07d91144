use serde::{Deserialize, Serialize};

use crate::models::{Memory, User};

// Request bodies are deliberately lenient: every field may be missing and
// unknown fields are ignored. Missing values are stored as absent.

// -- Auth --

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SignupRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

// -- Profile --

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
    pub profile_pic: Option<String>,
}

/// `{ "user": ... }`; `user` is null when a profile update matched nothing.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub user: Option<User>,
}

// -- Memories --

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateMemoryRequest {
    pub user_id: Option<String>,
    pub title: Option<String>,
    pub photos: Option<Vec<String>>,
    pub date: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateMemoryRequest {
    pub title: Option<String>,
    pub photos: Option<Vec<String>>,
    pub date: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MemoryResponse {
    pub memory: Option<Memory>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MemoryListResponse {
    pub memories: Vec<Memory>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
}

// -- Errors --

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn memory_serializes_with_camel_case_keys() {
        let memory = Memory {
            id: "m1".into(),
            user_id: Some("U1".into()),
            title: Some("Trip".into()),
            photos: vec!["p1.jpg".into()],
            date: Some("2024-01-01".into()),
            notes: Some("fun".into()),
            created_at: chrono::Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
        };

        let value = serde_json::to_value(MemoryResponse { memory: Some(memory) }).unwrap();
        assert_eq!(value["memory"]["userId"], json!("U1"));
        assert_eq!(value["memory"]["photos"], json!(["p1.jpg"]));
        assert!(value["memory"]["createdAt"].is_string());
        assert!(value["memory"].get("user_id").is_none());
    }

    #[test]
    fn missing_user_serializes_as_null() {
        let value = serde_json::to_value(UserResponse { user: None }).unwrap();
        assert_eq!(value, json!({ "user": null }));
    }

    #[test]
    fn request_fields_default_when_absent() {
        let req: CreateMemoryRequest = serde_json::from_value(json!({ "title": "Trip" })).unwrap();
        assert_eq!(req.title.as_deref(), Some("Trip"));
        assert!(req.user_id.is_none());
        assert!(req.photos.is_none());

        let req: UpdateProfileRequest =
            serde_json::from_value(json!({ "profilePic": "me.png", "extra": 1 })).unwrap();
        assert_eq!(req.profile_pic.as_deref(), Some("me.png"));
        assert!(req.name.is_none());
    }
}
