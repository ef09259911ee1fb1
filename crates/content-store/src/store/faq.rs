use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::info;
use validator::Validate;

use super::{active_clause, ContentStore};
use crate::error::{StoreError, StoreResult};
use crate::models::{FaqItem, FaqItemPatch, NewFaqItem, Visibility};

const COLUMNS: &str =
    "id, category, question, answer, display_order, is_active, updated_by, created_at, updated_at";

fn faq_from_row(row: &Row<'_>) -> rusqlite::Result<FaqItem> {
    Ok(FaqItem {
        id: row.get("id")?,
        category: row.get("category")?,
        question: row.get("question")?,
        answer: row.get("answer")?,
        display_order: row.get("display_order")?,
        is_active: row.get("is_active")?,
        updated_by: row.get("updated_by")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

pub(crate) fn insert_faq_item(
    conn: &Connection,
    new: &NewFaqItem,
    user_id: Option<i64>,
) -> StoreResult<i64> {
    new.validate()?;
    conn.execute(
        "INSERT INTO faq_items
         (category, question, answer, display_order, is_active, updated_by, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
        params![
            new.category.trim(),
            new.question,
            new.answer,
            new.display_order,
            new.is_active,
            user_id,
            Utc::now(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

impl ContentStore {
    /// FAQ items grouped by category, then by their order inside it.
    pub fn list_faq_items(&self, vis: Visibility) -> StoreResult<Vec<FaqItem>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM faq_items {} ORDER BY category, display_order, id",
            COLUMNS,
            active_clause(vis)
        ))?;
        let rows = stmt.query_map([], faq_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn get_faq_item(&self, id: i64) -> StoreResult<Option<FaqItem>> {
        let conn = self.conn()?;
        Ok(conn
            .query_row(
                &format!("SELECT {} FROM faq_items WHERE id = ?1", COLUMNS),
                params![id],
                faq_from_row,
            )
            .optional()?)
    }

    pub fn create_faq_item(&self, new: NewFaqItem, user_id: Option<i64>) -> StoreResult<FaqItem> {
        let id = insert_faq_item(&*self.conn()?, &new, user_id)?;
        info!("Created FAQ item {}", id);
        self.get_faq_item(id)?
            .ok_or_else(|| StoreError::Invalid("Failed to create FAQ item".to_string()))
    }

    pub fn update_faq_item(
        &self,
        id: i64,
        patch: FaqItemPatch,
        user_id: Option<i64>,
    ) -> StoreResult<FaqItem> {
        patch.validate()?;
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        let mut row = tx
            .query_row(
                &format!("SELECT {} FROM faq_items WHERE id = ?1", COLUMNS),
                params![id],
                faq_from_row,
            )
            .optional()?
            .ok_or_else(|| StoreError::not_found("FAQ item", id))?;

        patch.apply(&mut row);
        row.updated_by = user_id.or(row.updated_by);
        row.updated_at = Utc::now();

        tx.execute(
            "UPDATE faq_items
             SET category = ?1, question = ?2, answer = ?3, display_order = ?4, is_active = ?5,
                 updated_by = ?6, updated_at = ?7
             WHERE id = ?8",
            params![
                row.category,
                row.question,
                row.answer,
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

    pub fn delete_faq_item(&self, id: i64) -> StoreResult<()> {
        let conn = self.conn()?;
        let removed = conn.execute("DELETE FROM faq_items WHERE id = ?1", params![id])?;
        if removed == 0 {
            return Err(StoreError::not_found("FAQ item", id));
        }
        info!("Deleted FAQ item {}", id);
        Ok(())
    }
}
