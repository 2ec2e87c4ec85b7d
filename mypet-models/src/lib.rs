#[macro_use]
extern crate diesel;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate mypet_macro;
#[macro_use]
extern crate serde_derive;

use diesel::result::DatabaseErrorKind;
use std::fmt;
use validator::ValidationErrors;

#[cfg(not(any(feature = "postgres", feature = "sqlite")))]
compile_error!("Either feature \"sqlite\" or \"postgres\" must be enabled for this crate.");

#[cfg(feature = "postgres")]
pub type Connection = diesel::PgConnection;

#[cfg(all(feature = "sqlite", not(feature = "postgres")))]
pub type Connection = diesel::SqliteConnection;

/// All the possible errors that can be encoutered in this crate
#[derive(Debug)]
pub enum Error {
    AlreadyExists,
    Db(diesel::result::Error),
    DbPool,
    NotFound,
    Validation(ValidationErrors),
}

impl From<diesel::result::Error> for Error {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Error::NotFound,
            diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                Error::AlreadyExists
            }
            err => Error::Db(err),
        }
    }
}

impl From<diesel::r2d2::PoolError> for Error {
    fn from(_: diesel::r2d2::PoolError) -> Self {
        Error::DbPool
    }
}

impl From<ValidationErrors> for Error {
    fn from(errs: ValidationErrors) -> Self {
        Error::Validation(errs)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::AlreadyExists => write!(f, "this entry already exists"),
            Error::Db(err) => write!(f, "database error: {}", err),
            Error::DbPool => write!(f, "couldn't get a database connection"),
            Error::NotFound => write!(f, "not found"),
            Error::Validation(errs) => write!(f, "invalid input: {}", errs),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;

/// Adds a function to a model, that returns the first
/// matching row for a given list of fields.
///
/// Usage:
///
/// ```ignore
/// impl Model {
///     find_by!(model_table, name_of_the_function, field1 as String, field2 as i32);
/// }
///
/// // Get the Model with field1 == "", and field2 == 0
/// Model::name_of_the_function(connection, String::new(), 0);
/// ```
macro_rules! find_by {
    ($table:ident, $fn:ident, $($col:ident as $type:ty),+) => {
        /// Try to find a $table with a given $col
        pub fn $fn(conn: &crate::Connection, $($col: $type),+) -> Result<Self> {
            $table::table
                $(.filter($table::$col.eq($col)))+
                .first(conn)
                .map_err(Error::from)
        }
    };
}

/// List all rows of a model, with field-based filtering.
///
/// Usage:
///
/// ```ignore
/// impl Model {
///     list_by!(model_table, name_of_the_function, field1 as String);
/// }
///
/// // To get all Models with field1 == ""
/// Model::name_of_the_function(connection, String::new());
/// ```
macro_rules! list_by {
    ($table:ident, $fn:ident, $($col:ident as $type:ty),+) => {
        /// Try to find a $table with a given $col
        pub fn $fn(conn: &crate::Connection, $($col: $type),+) -> Result<Vec<Self>> {
            $table::table
                $(.filter($table::$col.eq($col)))+
                .load::<Self>(conn)
                .map_err(Error::from)
        }
    };
}

/// Adds a function to a model to retrieve a row by ID
///
/// # Usage
///
/// ```ignore
/// impl Model {
///     get!(model_table);
/// }
///
/// // Get the Model with ID 1
/// Model::get(connection, 1);
/// ```
macro_rules! get {
    ($table:ident) => {
        pub fn get(conn: &crate::Connection, id: i32) -> Result<Self> {
            $table::table
                .filter($table::id.eq(id))
                .first(conn)
                .map_err(Error::from)
        }
    };
}

/// Adds a function to a model to insert a new row.
///
/// SQLite can't return the inserted row, so it is read back with `last`.
///
/// # Usage
///
/// ```ignore
/// impl Model {
///     insert!(model_table, NewModelType);
/// }
///
/// // Insert a new row
/// Model::insert(connection, NewModelType::new());
/// ```
macro_rules! insert {
    ($table:ident, $from:ty) => {
        insert!($table, $from, |x, _conn| Ok(x));
    };
    ($table:ident, $from:ty, |$val:ident, $conn:ident | $( $after:tt )+) => {
        last!($table);

        pub fn insert(conn: &crate::Connection, new: $from) -> Result<Self> {
            diesel::insert_into($table::table)
                .values(new)
                .execute(conn)?;
            #[allow(unused_mut)]
            let mut $val = Self::last(conn)?;
            let $conn = conn;
            $( $after )+
        }
    };
}

/// Returns the last row of a table.
///
/// # Usage
///
/// ```ignore
/// impl Model {
///     last!(model_table);
/// }
///
/// // Get the last Model
/// Model::last(connection)
/// ```
macro_rules! last {
    ($table:ident) => {
        #[allow(dead_code)]
        pub fn last(conn: &crate::Connection) -> Result<Self> {
            $table::table
                .order_by($table::id.desc())
                .first(conn)
                .map_err(Error::from)
        }
    };
}

pub use config::CONFIG;
pub use labels::Verbose;

#[cfg(test)]
#[macro_use]
mod test_macros {
    /// Asserts that a `Result` failed with the given `Error` variant.
    macro_rules! assert_err {
        ($res:expr, $pat:pat) => {
            match $res {
                Err($pat) => {}
                Err(other) => panic!("unexpected error: {:?}", other),
                Ok(_) => panic!("expected an error, got Ok"),
            }
        };
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use crate::{db_conn, migrations::IMPORTED_MIGRATIONS, Connection as Conn, CONFIG};
    use diesel::Connection;

    pub(crate) fn db() -> Conn {
        let conn = Conn::establish(CONFIG.database_url.as_str())
            .expect("Couldn't connect to the database");
        db_conn::configure(&conn).expect("Couldn't configure the connection");
        IMPORTED_MIGRATIONS
            .run_pending_migrations(&conn)
            .expect("Couldn't run migrations");
        conn
    }
}

pub mod comments;
pub mod config;
pub mod db_conn;
pub mod labels;
pub mod migrations;
pub mod my_pets;
pub mod owner_follows;
pub mod pet_breeds;
pub mod pet_follows;
pub mod pet_tags;
pub mod pet_types;
pub mod schema;
pub mod tags;
pub mod uploads;
pub mod users;
