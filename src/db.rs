use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};

pub type DbPool = Pool<ConnectionManager<PgConnection>>;

/// Upper bound on concurrent connections per pool. Waiters queue until a
/// connection frees up; the queue itself is unbounded.
pub const POOL_MAX_CONNECTIONS: u32 = 10;

/// Build an r2d2 pool for one of the two deployment databases (checkout or
/// clinical). Each store owns exactly one pool; connections are checked out
/// per operation and returned on drop.
pub fn create_pool(database_url: &str) -> DbPool {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder()
        .max_size(POOL_MAX_CONNECTIONS)
        .build(manager)
        .expect("Failed to create database connection pool")
}
