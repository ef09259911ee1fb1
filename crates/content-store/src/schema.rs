//! Table definitions. Applied on every open; every statement is idempotent.

use rusqlite::Connection;

use crate::error::StoreResult;

pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    open_id         TEXT NOT NULL UNIQUE,
    name            TEXT,
    email           TEXT,
    login_method    TEXT,
    role            TEXT NOT NULL DEFAULT 'user' CHECK (role IN ('user', 'admin')),
    created_at      TEXT NOT NULL,
    updated_at      TEXT NOT NULL,
    last_signed_in  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS page_content (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    section     TEXT NOT NULL UNIQUE,
    title       TEXT NOT NULL,
    subtitle    TEXT,
    content     TEXT,
    cta_text    TEXT,
    cta_link    TEXT,
    metadata    TEXT,
    updated_by  INTEGER REFERENCES users(id) ON DELETE SET NULL,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS services (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    name           TEXT NOT NULL,
    description    TEXT NOT NULL,
    icon           TEXT,
    gradient_from  TEXT,
    gradient_to    TEXT,
    display_order  INTEGER NOT NULL DEFAULT 0,
    is_active      INTEGER NOT NULL DEFAULT 1,
    updated_by     INTEGER REFERENCES users(id) ON DELETE SET NULL,
    created_at     TEXT NOT NULL,
    updated_at     TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS solution_tiers (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    tier_id        TEXT NOT NULL UNIQUE,
    badge          TEXT NOT NULL,
    name           TEXT NOT NULL,
    description    TEXT NOT NULL,
    price          TEXT NOT NULL,
    cta_text       TEXT NOT NULL,
    gradient_from  TEXT NOT NULL,
    gradient_to    TEXT NOT NULL,
    features       TEXT NOT NULL DEFAULT '[]',
    display_order  INTEGER NOT NULL DEFAULT 0,
    is_active      INTEGER NOT NULL DEFAULT 1,
    updated_by     INTEGER REFERENCES users(id) ON DELETE SET NULL,
    created_at     TEXT NOT NULL,
    updated_at     TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS process_steps (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    step_number    INTEGER NOT NULL,
    title          TEXT NOT NULL,
    description    TEXT NOT NULL,
    duration       TEXT NOT NULL,
    details        TEXT NOT NULL DEFAULT '[]',
    gradient_from  TEXT NOT NULL,
    gradient_to    TEXT NOT NULL,
    is_active      INTEGER NOT NULL DEFAULT 1,
    updated_by     INTEGER REFERENCES users(id) ON DELETE SET NULL,
    created_at     TEXT NOT NULL,
    updated_at     TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS faq_items (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    category       TEXT NOT NULL,
    question       TEXT NOT NULL,
    answer         TEXT NOT NULL,
    display_order  INTEGER NOT NULL DEFAULT 0,
    is_active      INTEGER NOT NULL DEFAULT 1,
    updated_by     INTEGER REFERENCES users(id) ON DELETE SET NULL,
    created_at     TEXT NOT NULL,
    updated_at     TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS testimonials (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    name           TEXT NOT NULL,
    company        TEXT,
    role           TEXT,
    content        TEXT NOT NULL,
    image_url      TEXT,
    rating         INTEGER NOT NULL DEFAULT 5 CHECK (rating BETWEEN 1 AND 5),
    display_order  INTEGER NOT NULL DEFAULT 0,
    is_active      INTEGER NOT NULL DEFAULT 1,
    updated_by     INTEGER REFERENCES users(id) ON DELETE SET NULL,
    created_at     TEXT NOT NULL,
    updated_at     TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS contact_submissions (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    name         TEXT NOT NULL,
    email        TEXT NOT NULL,
    phone        TEXT,
    company      TEXT,
    message      TEXT NOT NULL,
    type         TEXT NOT NULL DEFAULT 'inquiry',
    status       TEXT NOT NULL DEFAULT 'new' CHECK (status IN ('new', 'contacted', 'resolved')),
    admin_notes  TEXT,
    created_at   TEXT NOT NULL,
    updated_at   TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_faq_items_order ON faq_items(category, display_order);
CREATE INDEX IF NOT EXISTS idx_contact_submissions_created ON contact_submissions(created_at);
"#;

pub fn apply(conn: &Connection) -> StoreResult<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}
