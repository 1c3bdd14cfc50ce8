//! Shared `PostgreSQL` plumbing for the Diesel adapters.
//!
//! Diesel is synchronous, so every repository call hops onto the blocking
//! thread pool. Connection checkout failures and dropped or serialisation-
//! conflicted transactions are treated as transient; everything else is a
//! permanent persistence failure.

use diesel::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError, PooledConnection};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by every adapter.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Pooled connection type for internal use.
pub(crate) type PooledConn = PooledConnection<ConnectionManager<PgConnection>>;

/// Runs `f` with a pooled connection on the blocking thread pool.
///
/// `on_pool` maps checkout failures, `on_join` maps a panicked or cancelled
/// blocking task into the caller's error type.
pub(crate) async fn run_blocking_with<F, T, E, P, J>(
    pool: &PgPool,
    f: F,
    on_pool: P,
    on_join: J,
) -> Result<T, E>
where
    F: FnOnce(&mut PooledConn) -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
    P: FnOnce(PoolError) -> E + Send + 'static,
    J: FnOnce(tokio::task::JoinError) -> E,
{
    let shared_pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut connection = shared_pool.get().map_err(on_pool)?;
        f(&mut connection)
    })
    .await
    .map_err(on_join)?
}

/// Returns `true` for Diesel errors that may clear on a retry.
pub(crate) fn is_transient(err: &DieselError) -> bool {
    matches!(
        err,
        DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection | DatabaseErrorKind::SerializationFailure,
            _
        )
    )
}
