use crate::{Connection, Error, Result, CONFIG};
use diesel::r2d2::{
    ConnectionManager, CustomizeConnection, Error as ConnError, Pool, PooledConnection,
};
#[cfg(all(feature = "sqlite", not(feature = "postgres")))]
use diesel::{
    connection::SimpleConnection, result::ConnectionError, sql_query, RunQueryDsl,
};
use std::ops::Deref;

pub type DbPool = Pool<ConnectionManager<Connection>>;

/// A connection taken from the pool.
pub struct DbConn(pub PooledConnection<ConnectionManager<Connection>>);

impl DbConn {
    pub fn from_pool(pool: &DbPool) -> Result<DbConn> {
        pool.get().map(DbConn).map_err(Error::from)
    }
}

// For the convenience of using an &DbConn as an &Connection.
impl Deref for DbConn {
    type Target = Connection;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// SQLite ignores `ON DELETE CASCADE` unless foreign keys are enabled,
/// and the setting is per connection.
#[derive(Debug)]
pub struct PragmaForeignKey;

impl CustomizeConnection<Connection, ConnError> for PragmaForeignKey {
    #[cfg(all(feature = "sqlite", not(feature = "postgres")))] // empty for postgres
    fn on_acquire(&self, conn: &mut Connection) -> std::result::Result<(), ConnError> {
        sql_query("PRAGMA foreign_keys = on;")
            .execute(conn)
            .map(|_| ())
            .map_err(|_| {
                ConnError::ConnectionError(ConnectionError::BadConnection(String::from(
                    "PRAGMA foreign_keys = on failed",
                )))
            })
    }
}

/// Same as `PragmaForeignKey`, for connections opened outside of the pool.
#[cfg(all(feature = "sqlite", not(feature = "postgres")))]
pub fn configure(conn: &Connection) -> Result<()> {
    conn.batch_execute("PRAGMA foreign_keys = on;")
        .map_err(Error::from)
}

#[cfg(feature = "postgres")]
pub fn configure(_conn: &Connection) -> Result<()> {
    Ok(())
}

pub fn init_pool() -> Result<DbPool> {
    let manager = ConnectionManager::<Connection>::new(CONFIG.database_url.as_str());
    let mut builder = DbPool::builder()
        .connection_customizer(Box::new(PragmaForeignKey))
        .min_idle(CONFIG.db_min_idle);
    if let Some(max_size) = CONFIG.db_max_size {
        builder = builder.max_size(max_size);
    };
    builder.build(manager).map_err(Error::from)
}
