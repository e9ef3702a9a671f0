use sqlx::{PgPool, SqlitePool};

const PG_SCHEMA: [&str; 2] = [
    r#"
    CREATE TABLE IF NOT EXISTS todos (
        id BIGSERIAL PRIMARY KEY,
        text TEXT NOT NULL,
        date DATE NOT NULL,
        completed BOOLEAN NOT NULL DEFAULT FALSE,
        completion_percentage INTEGER NOT NULL DEFAULT 0
            CHECK (completion_percentage BETWEEN 0 AND 100),
        reason TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        completed_at TIMESTAMPTZ NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_todos_date ON todos (date)",
];

// AUTOINCREMENT keeps SQLite from handing out the id of a deleted row again.
const SQLITE_SCHEMA: [&str; 2] = [
    r#"
    CREATE TABLE IF NOT EXISTS todos (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        text TEXT NOT NULL,
        date TEXT NOT NULL,
        completed BOOLEAN NOT NULL DEFAULT 0,
        completion_percentage INTEGER NOT NULL DEFAULT 0
            CHECK (completion_percentage BETWEEN 0 AND 100),
        reason TEXT,
        created_at TEXT NOT NULL,
        completed_at TEXT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_todos_date ON todos (date)",
];

/// Idempotent; safe to run on every start.
pub async fn ensure_pg_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    for statement in PG_SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}

/// Idempotent; safe to run on every start.
pub async fn ensure_sqlite_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for statement in SQLITE_SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}
