use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

/// Account role. Embedded in session tokens and stored on the user row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

/// User record. `password_hash` never leaves the process as JSON.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub phone: String,
    pub blood_type: String,
    pub date_of_birth: Date,
    pub gender: String,
    pub address: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

const USER_COLUMNS: &str = "id, name, email, password_hash, role, phone, blood_type, \
     date_of_birth, gender, address, created_at";

pub struct NewUser<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub phone: &'a str,
    pub blood_type: &'a str,
    pub date_of_birth: Date,
    pub gender: &'a str,
    pub address: Option<&'a str>,
}

pub async fn find_by_email(db: &PgPool, email: &str) -> sqlx::Result<Option<User>> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
    ))
    .bind(email)
    .fetch_optional(db)
    .await
}

pub async fn find_by_id(db: &PgPool, id: Uuid) -> sqlx::Result<Option<User>> {
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
        .bind(id)
        .fetch_optional(db)
        .await
}

/// Insert a new account. Role is always `user`; promotion is a separate
/// admin operation.
pub async fn create(db: &PgPool, new: NewUser<'_>) -> sqlx::Result<User> {
    sqlx::query_as::<_, User>(&format!(
        "INSERT INTO users (name, email, password_hash, role, phone, blood_type, \
         date_of_birth, gender, address) \
         VALUES ($1, $2, $3, 'user', $4, $5, $6, $7, $8) \
         RETURNING {USER_COLUMNS}"
    ))
    .bind(new.name)
    .bind(new.email)
    .bind(new.password_hash)
    .bind(new.phone)
    .bind(new.blood_type)
    .bind(new.date_of_birth)
    .bind(new.gender)
    .bind(new.address)
    .fetch_one(db)
    .await
}

pub async fn list_all(db: &PgPool) -> sqlx::Result<Vec<User>> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC"
    ))
    .fetch_all(db)
    .await
}

pub async fn count_all(db: &PgPool) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
        .fetch_one(db)
        .await
}

pub async fn set_role(db: &PgPool, id: Uuid, role: Role) -> sqlx::Result<Option<User>> {
    sqlx::query_as::<_, User>(&format!(
        "UPDATE users SET role = $2 WHERE id = $1 RETURNING {USER_COLUMNS}"
    ))
    .bind(id)
    .bind(role)
    .fetch_optional(db)
    .await
}

pub async fn set_password_hash(db: &PgPool, id: Uuid, hash: &str) -> sqlx::Result<bool> {
    let result = sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
        .bind(id)
        .bind(hash)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn delete(db: &PgPool, id: Uuid) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub struct ProfilePatch<'a> {
    pub blood_type: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub date_of_birth: Option<Date>,
    pub gender: Option<&'a str>,
    pub address: Option<&'a str>,
}

impl ProfilePatch<'_> {
    pub fn is_empty(&self) -> bool {
        self.blood_type.is_none()
            && self.phone.is_none()
            && self.date_of_birth.is_none()
            && self.gender.is_none()
            && self.address.is_none()
    }
}

/// Merge-patch: only fields present in the patch overwrite stored values.
pub async fn update_profile(
    db: &PgPool,
    id: Uuid,
    patch: ProfilePatch<'_>,
) -> sqlx::Result<Option<User>> {
    sqlx::query_as::<_, User>(&format!(
        "UPDATE users SET \
           blood_type = COALESCE($2, blood_type), \
           phone = COALESCE($3, phone), \
           date_of_birth = COALESCE($4, date_of_birth), \
           gender = COALESCE($5, gender), \
           address = COALESCE($6, address) \
         WHERE id = $1 RETURNING {USER_COLUMNS}"
    ))
    .bind(id)
    .bind(patch.blood_type)
    .bind(patch.phone)
    .bind(patch.date_of_birth)
    .bind(patch.gender)
    .bind(patch.address)
    .fetch_optional(db)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_is_never_serialized() {
        let user = User {
            id: Uuid::new_v4(),
            name: "Ann".into(),
            email: "ann@x.com".into(),
            password_hash: "$argon2id$secret".into(),
            role: Role::User,
            phone: "555".into(),
            blood_type: "O+".into(),
            date_of_birth: Date::from_calendar_date(1990, time::Month::January, 1).unwrap(),
            gender: "female".into(),
            address: None,
            created_at: OffsetDateTime::now_utc(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2"));
        assert!(!json.contains("password"));
        assert!(json.contains("\"bloodType\":\"O+\""));
        assert!(json.contains("\"role\":\"user\""));
    }

    #[test]
    fn empty_patch_is_detected() {
        let patch = ProfilePatch {
            blood_type: None,
            phone: None,
            date_of_birth: None,
            gender: None,
            address: None,
        };
        assert!(patch.is_empty());

        let patch = ProfilePatch {
            phone: Some("555"),
            ..patch
        };
        assert!(!patch.is_empty());
    }
}
