use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row};
use tracing::info;
use validator::Validate;

use super::ContentStore;
use crate::error::{StoreError, StoreResult};
use crate::models::{ContactSubmission, NewContactSubmission, SubmissionStatus};

const COLUMNS: &str = "id, name, email, phone, company, message, type, status, admin_notes, \
                       created_at, updated_at";

fn submission_from_row(row: &Row<'_>) -> rusqlite::Result<ContactSubmission> {
    let status: String = row.get("status")?;
    Ok(ContactSubmission {
        id: row.get("id")?,
        name: row.get("name")?,
        email: row.get("email")?,
        phone: row.get("phone")?,
        company: row.get("company")?,
        message: row.get("message")?,
        kind: row.get("type")?,
        status: SubmissionStatus::parse(&status).unwrap_or_default(),
        admin_notes: row.get("admin_notes")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

impl ContentStore {
    /// Record a public enquiry. Every submission starts out as `new`.
    pub fn create_submission(&self, input: NewContactSubmission) -> StoreResult<ContactSubmission> {
        let input = input.normalized();
        input.validate()?;

        let id = {
            let conn = self.conn()?;
            conn.execute(
                "INSERT INTO contact_submissions
                 (name, email, phone, company, message, type, status, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)",
                params![
                    input.name,
                    input.email,
                    input.phone,
                    input.company,
                    input.message,
                    input.kind,
                    SubmissionStatus::New.as_str(),
                    Utc::now(),
                ],
            )?;
            conn.last_insert_rowid()
        };
        info!("Recorded {} submission {}", input.kind, id);
        self.get_submission(id)?
            .ok_or_else(|| StoreError::Invalid("Failed to record submission".to_string()))
    }

    pub fn get_submission(&self, id: i64) -> StoreResult<Option<ContactSubmission>> {
        let conn = self.conn()?;
        Ok(conn
            .query_row(
                &format!("SELECT {} FROM contact_submissions WHERE id = ?1", COLUMNS),
                params![id],
                submission_from_row,
            )
            .optional()?)
    }

    /// Newest first, optionally narrowed to one status.
    pub fn list_submissions(
        &self,
        status: Option<SubmissionStatus>,
    ) -> StoreResult<Vec<ContactSubmission>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM contact_submissions
             WHERE ?1 IS NULL OR status = ?1
             ORDER BY created_at DESC, id DESC",
            COLUMNS
        ))?;
        let rows = stmt.query_map(params![status.map(|s| s.as_str())], submission_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Move a submission through its lifecycle. Notes are replaced only when
    /// provided.
    pub fn update_submission_status(
        &self,
        id: i64,
        status: SubmissionStatus,
        admin_notes: Option<String>,
    ) -> StoreResult<ContactSubmission> {
        {
            let conn = self.conn()?;
            let changed = conn.execute(
                "UPDATE contact_submissions
                 SET status = ?1, admin_notes = COALESCE(?2, admin_notes), updated_at = ?3
                 WHERE id = ?4",
                params![status.as_str(), admin_notes, Utc::now(), id],
            )?;
            if changed == 0 {
                return Err(StoreError::not_found("submission", id));
            }
        }
        info!("Submission {} marked {}", id, status);
        self.get_submission(id)?
            .ok_or_else(|| StoreError::not_found("submission", id))
    }
}
