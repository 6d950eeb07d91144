use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered account as seen by clients.
///
/// The password hash stays in the database layer and never appears here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
    pub profile_pic: Option<String>,
}

/// A journal entry. `user_id` is a soft reference: nothing checks that the
/// owning user exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Memory {
    pub id: String,
    pub user_id: Option<String>,
    pub title: Option<String>,
    pub photos: Vec<String>,
    pub date: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}
