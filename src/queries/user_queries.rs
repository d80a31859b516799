use sqlx::PgPool;

use crate::{
    error::{AppError, Result},
    models::{CustomerSummary, User},
};

pub async fn create_user(
    pool: &PgPool,
    fullname: &str,
    email: &str,
    password_hash: &str,
) -> Result<User> {
    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (fullname, email, password) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(fullname)
    .bind(email)
    .bind(password_hash)
    .fetch_one(pool)
    .await
    .map_err(|e| match e {
        // The unique index on email is authoritative; a lost race with a
        // concurrent signup is a conflict, not a storage failure.
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::Conflict("Email already in use".to_string())
        }
        other => AppError::DatabaseError(other),
    })?;

    Ok(user)
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

pub async fn list_customers(pool: &PgPool) -> Result<Vec<CustomerSummary>> {
    let customers = sqlx::query_as::<_, CustomerSummary>(
        "SELECT fullname, email FROM users ORDER BY id ASC",
    )
    .fetch_all(pool)
    .await?;

    Ok(customers)
}

pub async fn delete_user(pool: &PgPool, id: i32) -> Result<u64> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
