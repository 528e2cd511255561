/// Errors raised by the connection layer itself
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("SQL error: {0}")]
    Sql(#[from] sea_orm::DbErr),

    /// `SELECT 1` did not come back
    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;
