use crate::{Connection, Error, Result};
use diesel::connection::{Connection as Conn, SimpleConnection};
use migrations_internals::{setup_database, MigrationConnection};
use tracing::info;

/// One `up.sql`/`down.sql` pair, embedded at compile time.
pub struct EmbeddedMigration {
    name: &'static str,
    up: &'static str,
    down: &'static str,
}

impl EmbeddedMigration {
    pub fn name(&self) -> &'static str {
        self.name
    }

    fn run(&self, conn: &Connection) -> Result<()> {
        info!("Running migration {}", self.name);
        conn.batch_execute(self.up).map_err(Error::from)
    }

    fn revert(&self, conn: &Connection) -> Result<()> {
        info!("Reverting migration {}", self.name);
        conn.batch_execute(self.down).map_err(Error::from)
    }
}

/// Migrations sorted by name, which is also the order they are run in.
pub struct EmbeddedMigrations(&'static [EmbeddedMigration]);

impl EmbeddedMigrations {
    fn setup(&self, conn: &Connection) -> Result<()> {
        use diesel::dsl::sql;
        use diesel::sql_types::Bool;
        use diesel::{select, RunQueryDsl};
        #[cfg(feature = "postgres")]
        let schema_exists: bool = select(sql::<Bool>(
            "EXISTS \
             (SELECT 1 \
             FROM information_schema.tables \
             WHERE table_name = '__diesel_schema_migrations')",
        ))
        .get_result(conn)?;
        #[cfg(all(feature = "sqlite", not(feature = "postgres")))]
        let schema_exists: bool = select(sql::<Bool>(
            "EXISTS \
             (SELECT 1 \
             FROM sqlite_master \
             WHERE type = 'table' \
             AND name = '__diesel_schema_migrations')",
        ))
        .get_result(conn)?;

        if !schema_exists {
            setup_database(conn)?;
        }
        Ok(())
    }

    /// Index of the first migration that has not been run yet.
    fn first_pending(&self, conn: &Connection) -> Result<usize> {
        match conn.latest_run_migration_version()? {
            Some(latest) => self
                .0
                .binary_search_by_key(&latest.as_str(), |mig| mig.name)
                .map(|id| id + 1)
                .map_err(|_| Error::NotFound),
            None => Ok(0),
        }
    }

    pub fn all(&self) -> &'static [EmbeddedMigration] {
        self.0
    }

    pub fn pending(&self, conn: &Connection) -> Result<&'static [EmbeddedMigration]> {
        self.setup(conn)?;
        let first = self.first_pending(conn)?;
        Ok(&self.0[first..])
    }

    pub fn run_pending_migrations(&self, conn: &Connection) -> Result<()> {
        for migration in self.pending(conn)? {
            conn.transaction(|| {
                migration.run(conn)?;
                conn.insert_new_migration(migration.name)
                    .map_err(Error::from)
            })?;
        }
        Ok(())
    }

    pub fn is_pending(&self, conn: &Connection) -> Result<bool> {
        self.pending(conn).map(|pending| !pending.is_empty())
    }

    pub fn rerun_last_migration(&self, conn: &Connection) -> Result<()> {
        let latest = conn
            .latest_run_migration_version()?
            .ok_or(Error::NotFound)?;
        let id = self
            .0
            .binary_search_by_key(&latest.as_str(), |m| m.name)
            .map_err(|_| Error::NotFound)?;
        let migration = &self.0[id];
        conn.transaction(|| {
            migration.revert(conn)?;
            migration.run(conn)
        })
    }
}

pub const IMPORTED_MIGRATIONS: EmbeddedMigrations = {
    import_migrations! {}
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::db;

    #[test]
    fn names_are_sorted() {
        let names = IMPORTED_MIGRATIONS
            .all()
            .iter()
            .map(EmbeddedMigration::name)
            .collect::<Vec<_>>();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
        assert!(names.iter().all(|name| name.len() == 14));
    }

    #[test]
    fn nothing_pending_after_run() {
        let conn = db();
        assert!(!IMPORTED_MIGRATIONS.is_pending(&conn).unwrap());
        IMPORTED_MIGRATIONS.run_pending_migrations(&conn).unwrap();
        assert_eq!(
            conn.latest_run_migration_version().unwrap().as_deref(),
            IMPORTED_MIGRATIONS.all().last().map(EmbeddedMigration::name)
        );
    }

    #[cfg(feature = "postgres")]
    const INDEX_EXISTS: &str =
        "EXISTS (SELECT 1 FROM pg_indexes WHERE indexname = 'comments_created')";
    #[cfg(all(feature = "sqlite", not(feature = "postgres")))]
    const INDEX_EXISTS: &str = "EXISTS (SELECT 1 FROM sqlite_master \
         WHERE type = 'index' AND name = 'comments_created')";

    #[test]
    fn comments_are_indexed_by_date() {
        use diesel::{dsl::sql, select, sql_types::Bool, RunQueryDsl};
        let conn = db();
        let exists: bool = select(sql::<Bool>(INDEX_EXISTS)).get_result(&conn).unwrap();
        assert!(exists);
    }

    // Reverting drops tables, only safe on a private database.
    #[cfg(all(feature = "sqlite", not(feature = "postgres")))]
    #[test]
    fn rerun_last() {
        let conn = db();
        IMPORTED_MIGRATIONS.rerun_last_migration(&conn).unwrap();
        assert!(!IMPORTED_MIGRATIONS.is_pending(&conn).unwrap());
    }
}
