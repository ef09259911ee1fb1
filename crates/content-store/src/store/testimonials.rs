use chrono::Utc;
use rusqlite::{params, Row};
use validator::Validate;

use super::{active_clause, ContentStore};
use crate::error::{StoreError, StoreResult};
use crate::models::{NewTestimonial, Testimonial, Visibility};

const COLUMNS: &str = "id, name, company, role, content, image_url, rating, display_order, \
                       is_active, updated_by, created_at, updated_at";

fn testimonial_from_row(row: &Row<'_>) -> rusqlite::Result<Testimonial> {
    Ok(Testimonial {
        id: row.get("id")?,
        name: row.get("name")?,
        company: row.get("company")?,
        role: row.get("role")?,
        content: row.get("content")?,
        image_url: row.get("image_url")?,
        rating: row.get("rating")?,
        display_order: row.get("display_order")?,
        is_active: row.get("is_active")?,
        updated_by: row.get("updated_by")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

impl ContentStore {
    pub fn list_testimonials(&self, vis: Visibility) -> StoreResult<Vec<Testimonial>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM testimonials {} ORDER BY display_order, id",
            COLUMNS,
            active_clause(vis)
        ))?;
        let rows = stmt.query_map([], testimonial_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn create_testimonial(
        &self,
        new: NewTestimonial,
        user_id: Option<i64>,
    ) -> StoreResult<Testimonial> {
        new.validate()?;
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO testimonials
             (name, company, role, content, image_url, rating, display_order, is_active, updated_by, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10)",
            params![
                new.name,
                new.company,
                new.role,
                new.content,
                new.image_url,
                new.rating,
                new.display_order,
                new.is_active,
                user_id,
                Utc::now(),
            ],
        )?;
        let id = conn.last_insert_rowid();
        conn.query_row(
            &format!("SELECT {} FROM testimonials WHERE id = ?1", COLUMNS),
            params![id],
            testimonial_from_row,
        )
        .map_err(StoreError::from)
    }
}
