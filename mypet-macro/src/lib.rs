#![recursion_limit = "128"]

#[macro_use]
extern crate quote;

use proc_macro::TokenStream;
use std::fs::{read_dir, read_to_string};
use std::path::{Path, PathBuf};

/// Name of a migration: the first 14 digits of its directory name,
/// e.g. `2026-10-19-100000_create_users` becomes `20261019100000`.
fn migration_name(dir: &Path) -> String {
    dir.file_name()
        .and_then(|name| name.to_str())
        .expect("migration directory name is not valid UTF-8")
        .chars()
        .filter(char::is_ascii_digit)
        .take(14)
        .collect()
}

fn migration_dir() -> PathBuf {
    let backend = if cfg!(feature = "postgres") {
        "migrations/postgres"
    } else if cfg!(feature = "sqlite") {
        "migrations/sqlite"
    } else {
        "migrations"
    };
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .find(|path| path.join(backend).is_dir())
        .expect("migrations dir not found")
        .join(backend)
}

/// Drops `--` comment lines, they would only be noise in the embedded SQL.
fn strip_comments(sql: &str) -> String {
    sql.lines()
        .filter(|line| !line.trim_start().starts_with("--"))
        .fold(String::new(), |mut acc, line| {
            acc.push_str(line);
            acc.push('\n');
            acc
        })
}

fn read_sql(dir: &Path, file: &str) -> String {
    let path = dir.join(file);
    let sql = read_to_string(&path)
        .unwrap_or_else(|e| panic!("couldn't read {}: {}", path.display(), e));
    strip_comments(&sql)
}

/// Embeds every `migrations/<backend>/<name>/{up,down}.sql` pair, sorted by
/// name, as an `EmbeddedMigrations` constant expression.
#[proc_macro]
pub fn import_migrations(input: TokenStream) -> TokenStream {
    assert!(input.is_empty(), "import_migrations! takes no argument");

    let mut dirs = read_dir(migration_dir())
        .expect("couldn't list migrations")
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .map(|entry| entry.path())
        .collect::<Vec<_>>();
    dirs.sort_unstable();

    let names = dirs.iter().map(|dir| migration_name(dir)).collect::<Vec<_>>();
    let ups = dirs.iter().map(|dir| read_sql(dir, "up.sql")).collect::<Vec<_>>();
    let downs = dirs
        .iter()
        .map(|dir| read_sql(dir, "down.sql"))
        .collect::<Vec<_>>();

    quote!(
        EmbeddedMigrations(
            &[#(EmbeddedMigration { name: #names, up: #ups, down: #downs }),*]
        )
    )
    .into()
}
