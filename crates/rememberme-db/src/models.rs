/// Database row types: these map directly to SQLite rows.
/// Distinct from rememberme-types API models to keep the DB layer independent.

pub struct UserRow {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
    /// Argon2 PHC string, `None` for accounts created without a password.
    pub password: Option<String>,
    pub profile_pic: Option<String>,
}

pub struct MemoryRow {
    pub id: String,
    pub user_id: Option<String>,
    pub title: Option<String>,
    pub photos: Vec<String>,
    pub date: Option<String>,
    pub notes: Option<String>,
    pub created_at: String,
}

pub struct NewUser<'a> {
    pub id: &'a str,
    pub name: Option<&'a str>,
    pub email: Option<&'a str>,
    pub username: Option<&'a str>,
    pub password_hash: Option<&'a str>,
}

/// Replacement values for a profile update. Every field is written, so a
/// `None` clears the stored value.
pub struct ProfileUpdate<'a> {
    pub name: Option<&'a str>,
    pub email: Option<&'a str>,
    pub username: Option<&'a str>,
    pub profile_pic: Option<&'a str>,
}

/// Replacement values for the editable part of a memory.
pub struct MemoryContent<'a> {
    pub title: Option<&'a str>,
    pub photos: &'a [String],
    pub date: Option<&'a str>,
    pub notes: Option<&'a str>,
}
