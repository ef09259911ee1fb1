use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row};
use tracing::{debug, info};

use super::ContentStore;
use crate::error::{StoreError, StoreResult};
use crate::models::{Role, UpsertUser, User};

const COLUMNS: &str =
    "id, open_id, name, email, login_method, role, created_at, updated_at, last_signed_in";

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    let role: String = row.get("role")?;
    Ok(User {
        id: row.get("id")?,
        open_id: row.get("open_id")?,
        name: row.get("name")?,
        email: row.get("email")?,
        login_method: row.get("login_method")?,
        role: Role::parse(&role).unwrap_or_default(),
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
        last_signed_in: row.get("last_signed_in")?,
    })
}

impl ContentStore {
    fn is_owner(&self, open_id: &str) -> bool {
        self.owner_open_id
            .as_deref()
            .map(|owner| owner == open_id)
            .unwrap_or(false)
    }

    /// Insert a user or refresh the provided fields of an existing one.
    pub fn upsert_user(&self, user: UpsertUser) -> StoreResult<User> {
        if user.open_id.trim().is_empty() {
            return Err(StoreError::Invalid(
                "User openId is required for upsert".to_string(),
            ));
        }

        let now = Utc::now();
        let role = user
            .role
            .or_else(|| self.is_owner(&user.open_id).then_some(Role::Admin));
        let last_signed_in = user.last_signed_in.unwrap_or(now);

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO users (open_id, name, email, login_method, role, created_at, updated_at, last_signed_in)
             VALUES (?1, ?2, ?3, ?4, COALESCE(?5, 'user'), ?6, ?6, ?7)
             ON CONFLICT(open_id) DO UPDATE SET
                 name = COALESCE(?2, name),
                 email = COALESCE(?3, email),
                 login_method = COALESCE(?4, login_method),
                 role = COALESCE(?5, role),
                 updated_at = ?6,
                 last_signed_in = ?7",
            params![
                user.open_id,
                user.name,
                user.email,
                user.login_method,
                role.map(|r| r.as_str()),
                now,
                last_signed_in,
            ],
        )?;

        let stored = conn.query_row(
            &format!("SELECT {} FROM users WHERE open_id = ?1", COLUMNS),
            params![user.open_id],
            user_from_row,
        )?;
        debug!("Upserted user {} (role {})", stored.open_id, stored.role);
        Ok(stored)
    }

    pub fn get_user_by_open_id(&self, open_id: &str) -> StoreResult<Option<User>> {
        let conn = self.conn()?;
        Ok(conn
            .query_row(
                &format!("SELECT {} FROM users WHERE open_id = ?1", COLUMNS),
                params![open_id],
                user_from_row,
            )
            .optional()?)
    }

    pub fn set_user_role(&self, open_id: &str, role: Role) -> StoreResult<User> {
        {
            let conn = self.conn()?;
            let changed = conn.execute(
                "UPDATE users SET role = ?1, updated_at = ?2 WHERE open_id = ?3",
                params![role.as_str(), Utc::now(), open_id],
            )?;
            if changed == 0 {
                return Err(StoreError::not_found("user", open_id));
            }
        }
        info!("Set role of {} to {}", open_id, role);
        self.get_user_by_open_id(open_id)?
            .ok_or_else(|| StoreError::not_found("user", open_id))
    }
}
