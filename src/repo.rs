use crate::models::{Order, SpendRow, User};
use sqlx::SqlitePool;

/// Highest-id order owned by the user, if any.
pub async fn find_most_recent_order(
    db: &SqlitePool,
    user_id: i64,
) -> Result<Option<i64>, sqlx::Error> {
    sqlx::query_scalar("SELECT id FROM orders WHERE user_id = ? ORDER BY id DESC LIMIT 1")
        .bind(user_id)
        .fetch_optional(db)
        .await
}

/// Fetches an order only if it belongs to `user_id`. A foreign order id
/// behaves exactly like a missing one.
pub async fn find_order(
    db: &SqlitePool,
    order_id: i64,
    user_id: i64,
) -> Result<Option<Order>, sqlx::Error> {
    sqlx::query_as::<_, Order>(
        "SELECT id, user_id, cylinder_type, total_price, order_status, created_at
         FROM orders
         WHERE id = ? AND user_id = ?",
    )
    .bind(order_id)
    .bind(user_id)
    .fetch_optional(db)
    .await
}

/// Total spend per cylinder type. Grouping and summing stay in the store.
pub async fn sum_spend_by_cylinder_type(
    db: &SqlitePool,
    user_id: i64,
) -> Result<Vec<SpendRow>, sqlx::Error> {
    sqlx::query_as::<_, SpendRow>(
        "SELECT cylinder_type, SUM(total_price) AS total
         FROM orders
         WHERE user_id = ?
         GROUP BY cylinder_type
         ORDER BY cylinder_type",
    )
    .bind(user_id)
    .fetch_all(db)
    .await
}

pub async fn find_user_by_email(db: &SqlitePool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT id, firstname, email, companyname FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(db)
        .await
}
