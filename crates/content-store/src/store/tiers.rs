use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::info;
use validator::Validate;

use super::{active_clause, json_list, ContentStore};
use crate::error::{StoreError, StoreResult};
use crate::models::{NewSolutionTier, SolutionTier, SolutionTierPatch, Visibility};

const COLUMNS: &str = "id, tier_id, badge, name, description, price, cta_text, gradient_from, \
                       gradient_to, features, display_order, is_active, updated_by, created_at, updated_at";

fn tier_from_row(row: &Row<'_>) -> rusqlite::Result<SolutionTier> {
    Ok(SolutionTier {
        id: row.get("id")?,
        tier_id: row.get("tier_id")?,
        badge: row.get("badge")?,
        name: row.get("name")?,
        description: row.get("description")?,
        price: row.get("price")?,
        cta_text: row.get("cta_text")?,
        gradient_from: row.get("gradient_from")?,
        gradient_to: row.get("gradient_to")?,
        features: json_list(row.get("features")?, 9)?,
        display_order: row.get("display_order")?,
        is_active: row.get("is_active")?,
        updated_by: row.get("updated_by")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

pub(crate) fn insert_solution_tier(
    conn: &Connection,
    new: &NewSolutionTier,
    user_id: Option<i64>,
) -> StoreResult<i64> {
    new.validate()?;
    let features = serde_json::to_string(&new.features)?;
    conn.execute(
        "INSERT INTO solution_tiers
         (tier_id, badge, name, description, price, cta_text, gradient_from, gradient_to,
          features, display_order, is_active, updated_by, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?13)",
        params![
            new.tier_id.trim(),
            new.badge,
            new.name,
            new.description,
            new.price,
            new.cta_text,
            new.gradient_from,
            new.gradient_to,
            features,
            new.display_order,
            new.is_active,
            user_id,
            Utc::now(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

impl ContentStore {
    pub fn list_solution_tiers(&self, vis: Visibility) -> StoreResult<Vec<SolutionTier>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM solution_tiers {} ORDER BY display_order, id",
            COLUMNS,
            active_clause(vis)
        ))?;
        let rows = stmt.query_map([], tier_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn get_solution_tier(&self, id: i64) -> StoreResult<Option<SolutionTier>> {
        let conn = self.conn()?;
        Ok(conn
            .query_row(
                &format!("SELECT {} FROM solution_tiers WHERE id = ?1", COLUMNS),
                params![id],
                tier_from_row,
            )
            .optional()?)
    }

    pub fn create_solution_tier(
        &self,
        new: NewSolutionTier,
        user_id: Option<i64>,
    ) -> StoreResult<SolutionTier> {
        let id = insert_solution_tier(&*self.conn()?, &new, user_id)?;
        info!("Created solution tier {} ({})", id, new.tier_id);
        self.get_solution_tier(id)?
            .ok_or_else(|| StoreError::Invalid("Failed to create solution tier".to_string()))
    }

    pub fn update_solution_tier(
        &self,
        id: i64,
        patch: SolutionTierPatch,
        user_id: Option<i64>,
    ) -> StoreResult<SolutionTier> {
        patch.validate()?;
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        let mut row = tx
            .query_row(
                &format!("SELECT {} FROM solution_tiers WHERE id = ?1", COLUMNS),
                params![id],
                tier_from_row,
            )
            .optional()?
            .ok_or_else(|| StoreError::not_found("solution tier", id))?;

        patch.apply(&mut row);
        row.updated_by = user_id.or(row.updated_by);
        row.updated_at = Utc::now();
        let features = serde_json::to_string(&row.features)?;

        tx.execute(
            "UPDATE solution_tiers
             SET badge = ?1, name = ?2, description = ?3, price = ?4, cta_text = ?5,
                 gradient_from = ?6, gradient_to = ?7, features = ?8, display_order = ?9,
                 is_active = ?10, updated_by = ?11, updated_at = ?12
             WHERE id = ?13",
            params![
                row.badge,
                row.name,
                row.description,
                row.price,
                row.cta_text,
                row.gradient_from,
                row.gradient_to,
                features,
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
