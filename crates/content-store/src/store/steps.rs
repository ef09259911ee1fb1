use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::info;
use validator::Validate;

use super::{active_clause, json_list, ContentStore};
use crate::error::{StoreError, StoreResult};
use crate::models::{NewProcessStep, ProcessStep, ProcessStepPatch, Visibility};

const COLUMNS: &str = "id, step_number, title, description, duration, details, gradient_from, \
                       gradient_to, is_active, updated_by, created_at, updated_at";

fn step_from_row(row: &Row<'_>) -> rusqlite::Result<ProcessStep> {
    Ok(ProcessStep {
        id: row.get("id")?,
        step_number: row.get("step_number")?,
        title: row.get("title")?,
        description: row.get("description")?,
        duration: row.get("duration")?,
        details: json_list(row.get("details")?, 5)?,
        gradient_from: row.get("gradient_from")?,
        gradient_to: row.get("gradient_to")?,
        is_active: row.get("is_active")?,
        updated_by: row.get("updated_by")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

pub(crate) fn insert_process_step(
    conn: &Connection,
    new: &NewProcessStep,
    user_id: Option<i64>,
) -> StoreResult<i64> {
    new.validate()?;
    let details = serde_json::to_string(&new.details)?;
    conn.execute(
        "INSERT INTO process_steps
         (step_number, title, description, duration, details, gradient_from, gradient_to,
          is_active, updated_by, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10)",
        params![
            new.step_number,
            new.title,
            new.description,
            new.duration,
            details,
            new.gradient_from,
            new.gradient_to,
            new.is_active,
            user_id,
            Utc::now(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

impl ContentStore {
    pub fn list_process_steps(&self, vis: Visibility) -> StoreResult<Vec<ProcessStep>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM process_steps {} ORDER BY step_number, id",
            COLUMNS,
            active_clause(vis)
        ))?;
        let rows = stmt.query_map([], step_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn get_process_step(&self, id: i64) -> StoreResult<Option<ProcessStep>> {
        let conn = self.conn()?;
        Ok(conn
            .query_row(
                &format!("SELECT {} FROM process_steps WHERE id = ?1", COLUMNS),
                params![id],
                step_from_row,
            )
            .optional()?)
    }

    pub fn create_process_step(
        &self,
        new: NewProcessStep,
        user_id: Option<i64>,
    ) -> StoreResult<ProcessStep> {
        let id = insert_process_step(&*self.conn()?, &new, user_id)?;
        info!("Created process step {} (#{})", id, new.step_number);
        self.get_process_step(id)?
            .ok_or_else(|| StoreError::Invalid("Failed to create process step".to_string()))
    }

    pub fn update_process_step(
        &self,
        id: i64,
        patch: ProcessStepPatch,
        user_id: Option<i64>,
    ) -> StoreResult<ProcessStep> {
        patch.validate()?;
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        let mut row = tx
            .query_row(
                &format!("SELECT {} FROM process_steps WHERE id = ?1", COLUMNS),
                params![id],
                step_from_row,
            )
            .optional()?
            .ok_or_else(|| StoreError::not_found("process step", id))?;

        patch.apply(&mut row);
        row.updated_by = user_id.or(row.updated_by);
        row.updated_at = Utc::now();
        let details = serde_json::to_string(&row.details)?;

        tx.execute(
            "UPDATE process_steps
             SET step_number = ?1, title = ?2, description = ?3, duration = ?4, details = ?5,
                 gradient_from = ?6, gradient_to = ?7, is_active = ?8, updated_by = ?9, updated_at = ?10
             WHERE id = ?11",
            params![
                row.step_number,
                row.title,
                row.description,
                row.duration,
                details,
                row.gradient_from,
                row.gradient_to,
                row.is_active,
                row.updated_by,
                row.updated_at,
                row.id,
            ],
        )?;
        tx.commit()?;
        Ok(row)
    }
}
