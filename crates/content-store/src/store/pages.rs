use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::info;
use validator::Validate;

use super::ContentStore;
use crate::error::{StoreError, StoreResult};
use crate::models::{PageContent, PageContentPatch};

const COLUMNS: &str = "id, section, title, subtitle, content, cta_text, cta_link, metadata, \
                       updated_by, created_at, updated_at";

fn page_from_row(row: &Row<'_>) -> rusqlite::Result<PageContent> {
    Ok(PageContent {
        id: row.get("id")?,
        section: row.get("section")?,
        title: row.get("title")?,
        subtitle: row.get("subtitle")?,
        content: row.get("content")?,
        cta_text: row.get("cta_text")?,
        cta_link: row.get("cta_link")?,
        metadata: row.get("metadata")?,
        updated_by: row.get("updated_by")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

/// Insert a new section. The patch must carry a title.
pub(crate) fn insert_page_content(
    conn: &Connection,
    section: &str,
    patch: &PageContentPatch,
    user_id: Option<i64>,
) -> StoreResult<()> {
    patch.validate()?;
    let title = patch
        .title
        .as_deref()
        .ok_or_else(|| StoreError::not_found("page content", section))?;
    conn.execute(
        "INSERT INTO page_content
         (section, title, subtitle, content, cta_text, cta_link, metadata, updated_by, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)",
        params![
            section,
            title,
            patch.subtitle,
            patch.content,
            patch.cta_text,
            patch.cta_link,
            patch.metadata,
            user_id,
            Utc::now(),
        ],
    )?;
    Ok(())
}

impl ContentStore {
    pub fn list_page_content(&self) -> StoreResult<Vec<PageContent>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM page_content ORDER BY section",
            COLUMNS
        ))?;
        let rows = stmt.query_map([], page_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn get_page_content(&self, section: &str) -> StoreResult<Option<PageContent>> {
        let conn = self.conn()?;
        Ok(conn
            .query_row(
                &format!("SELECT {} FROM page_content WHERE section = ?1", COLUMNS),
                params![section],
                page_from_row,
            )
            .optional()?)
    }

    /// Merge `patch` into a section. A missing section is created when the
    /// patch carries a title, and reported as not found otherwise.
    pub fn update_page_content(
        &self,
        section: &str,
        patch: PageContentPatch,
        user_id: Option<i64>,
    ) -> StoreResult<PageContent> {
        patch.validate()?;
        if section.trim().is_empty() {
            return Err(StoreError::Invalid("section must not be empty".to_string()));
        }

        let now = Utc::now();
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let existing = tx
            .query_row(
                &format!("SELECT {} FROM page_content WHERE section = ?1", COLUMNS),
                params![section],
                page_from_row,
            )
            .optional()?;

        match existing {
            Some(mut row) => {
                patch.apply(&mut row);
                tx.execute(
                    "UPDATE page_content
                     SET title = ?1, subtitle = ?2, content = ?3, cta_text = ?4, cta_link = ?5,
                         metadata = ?6, updated_by = ?7, updated_at = ?8
                     WHERE id = ?9",
                    params![
                        row.title,
                        row.subtitle,
                        row.content,
                        row.cta_text,
                        row.cta_link,
                        row.metadata,
                        user_id.or(row.updated_by),
                        now,
                        row.id,
                    ],
                )?;
            }
            None => {
                insert_page_content(&tx, section, &patch, user_id)?;
                info!("Created page section {}", section);
            }
        }

        let stored = tx.query_row(
            &format!("SELECT {} FROM page_content WHERE section = ?1", COLUMNS),
            params![section],
            page_from_row,
        )?;
        tx.commit()?;
        Ok(stored)
    }
}
