use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use std::{
    env,
    path::{Path, PathBuf},
};
use tracing::info;

pub fn resolve_db_path() -> PathBuf {
    if let Ok(path) = env::var("APP_DB_PATH") {
        return PathBuf::from(path);
    }

    PathBuf::from("data/gasconnect.db")
}

pub async fn connect(path: &Path) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);

    SqlitePoolOptions::new().connect_with(options).await
}

pub async fn init_schema(db: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            firstname TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            companyname TEXT NOT NULL
        )",
    )
    .execute(db)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS orders (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL REFERENCES users(id),
            cylinder_type TEXT NOT NULL,
            total_price REAL NOT NULL,
            order_status TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
    )
    .execute(db)
    .await?;

    Ok(())
}

/// Installs demo accounts and orders when the store is empty. Registration
/// and order placement live outside this service, so a fresh database has no
/// other way to get data in.
pub async fn seed_demo_data(db: &SqlitePool) -> Result<(), sqlx::Error> {
    let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(db)
        .await?;
    if users > 0 {
        return Ok(());
    }

    info!("empty store, installing demo accounts and orders");

    sqlx::query(
        "INSERT INTO users (id, firstname, email, companyname) VALUES
            (1, 'Amina', 'amina@kibocatering.co.ke', 'Kibo Catering'),
            (2, 'Brian', 'brian@lakesidegrill.co.ke', 'Lakeside Grill'),
            (3, 'Wanjiru', 'wanjiru@newtonhotels.co.ke', 'Newton Hotels')",
    )
    .execute(db)
    .await?;

    sqlx::query(
        "INSERT INTO orders (id, user_id, cylinder_type, total_price, order_status, created_at) VALUES
            (1, 1, 'lpg', 100.0, 'delivered', '2026-07-02 09:15:00'),
            (2, 1, 'cng', 30.0, 'confirmed', '2026-07-19 16:40:00'),
            (3, 1, 'lpg', 50.0, 'on the way', '2026-07-28 11:05:00'),
            (4, 2, 'lpg', 75.0, 'pending', '2026-07-30 08:30:00')",
    )
    .execute(db)
    .await?;

    Ok(())
}
