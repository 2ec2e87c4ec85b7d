use clap::{App, ArgMatches, SubCommand};

use mypet_models::{migrations::IMPORTED_MIGRATIONS, Connection, Result};

pub fn command<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("migration")
        .about("Manage migrations")
        .subcommand(SubCommand::with_name("run").about("Run pending migrations"))
        .subcommand(SubCommand::with_name("redo").about("Rerun latest migration"))
        .subcommand(SubCommand::with_name("status").about("List pending migrations"))
}

pub fn run<'a>(args: &ArgMatches<'a>, conn: &Connection) -> Result<()> {
    match args.subcommand() {
        ("run", Some(_)) => IMPORTED_MIGRATIONS.run_pending_migrations(conn),
        ("redo", Some(_)) => IMPORTED_MIGRATIONS.rerun_last_migration(conn),
        ("status", Some(_)) => status(conn),
        ("", None) => {
            command().print_help().ok();
            Ok(())
        }
        _ => {
            println!("Unknown subcommand");
            Ok(())
        }
    }
}

fn status(conn: &Connection) -> Result<()> {
    let pending = IMPORTED_MIGRATIONS.pending(conn)?;
    if pending.is_empty() {
        println!("Database is up to date");
    }
    for migration in pending {
        println!("pending: {}", migration.name());
    }
    Ok(())
}
