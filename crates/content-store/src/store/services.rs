use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::info;
use validator::Validate;

use super::{active_clause, ContentStore};
use crate::error::{StoreError, StoreResult};
use crate::models::{NewService, Service, ServicePatch, Visibility};

const COLUMNS: &str = "id, name, description, icon, gradient_from, gradient_to, display_order, \
                       is_active, updated_by, created_at, updated_at";

fn service_from_row(row: &Row<'_>) -> rusqlite::Result<Service> {
    Ok(Service {
        id: row.get("id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        icon: row.get("icon")?,
        gradient_from: row.get("gradient_from")?,
        gradient_to: row.get("gradient_to")?,
        display_order: row.get("display_order")?,
        is_active: row.get("is_active")?,
        updated_by: row.get("updated_by")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

pub(crate) fn insert_service(
    conn: &Connection,
    new: &NewService,
    user_id: Option<i64>,
) -> StoreResult<i64> {
    new.validate()?;
    conn.execute(
        "INSERT INTO services
         (name, description, icon, gradient_from, gradient_to, display_order, is_active, updated_by, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)",
        params![
            new.name,
            new.description,
            new.icon,
            new.gradient_from,
            new.gradient_to,
            new.display_order,
            new.is_active,
            user_id,
            Utc::now(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

impl ContentStore {
    pub fn list_services(&self, vis: Visibility) -> StoreResult<Vec<Service>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM services {} ORDER BY display_order, id",
            COLUMNS,
            active_clause(vis)
        ))?;
        let rows = stmt.query_map([], service_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn get_service(&self, id: i64) -> StoreResult<Option<Service>> {
        let conn = self.conn()?;
        Ok(conn
            .query_row(
                &format!("SELECT {} FROM services WHERE id = ?1", COLUMNS),
                params![id],
                service_from_row,
            )
            .optional()?)
    }

    pub fn create_service(&self, new: NewService, user_id: Option<i64>) -> StoreResult<Service> {
        let id = insert_service(&*self.conn()?, &new, user_id)?;
        info!("Created service {}", id);
        self.get_service(id)?
            .ok_or_else(|| StoreError::Invalid("Failed to create service".to_string()))
    }

    pub fn update_service(
        &self,
        id: i64,
        patch: ServicePatch,
        user_id: Option<i64>,
    ) -> StoreResult<Service> {
        patch.validate()?;
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        let mut row = tx
            .query_row(
                &format!("SELECT {} FROM services WHERE id = ?1", COLUMNS),
                params![id],
                service_from_row,
            )
            .optional()?
            .ok_or_else(|| StoreError::not_found("service", id))?;

        patch.apply(&mut row);
        row.updated_by = user_id.or(row.updated_by);
        row.updated_at = Utc::now();

        tx.execute(
            "UPDATE services
             SET name = ?1, description = ?2, icon = ?3, gradient_from = ?4, gradient_to = ?5,
                 display_order = ?6, is_active = ?7, updated_by = ?8, updated_at = ?9
             WHERE id = ?10",
            params![
                row.name,
                row.description,
                row.icon,
                row.gradient_from,
                row.gradient_to,
                row.display_order,
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
