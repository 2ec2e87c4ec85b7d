use clap::App;
use mypet_models::{
    db_conn::{self, DbConn},
    Result,
};
use std::process;
use tracing::error;
use tracing_subscriber::EnvFilter;

mod lookups;
mod migration;
mod users;

fn main() {
    let mut app = App::new("MyPet CLI")
        .bin_name("mypet")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Collection of tools to manage a MyPet database.")
        .subcommand(migration::command())
        .subcommand(users::command())
        .subcommands(lookups::commands());
    let matches = app.clone().get_matches();

    match dotenv::dotenv() {
        Ok(path) => println!("Configuration read from {}", path.display()),
        Err(ref e) if e.not_found() => eprintln!("no .env was found"),
        Err(e) => {
            eprintln!("Couldn't read .env: {}", e);
            process::exit(1);
        }
    }
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let res = match matches.subcommand() {
        ("", None) => app.print_help().map_err(|e| {
            eprintln!("Couldn't print help: {}", e);
        }),
        (name, Some(args)) => connect()
            .and_then(|conn| match name {
                "migration" => migration::run(args, &conn),
                "users" => users::run(args, &conn),
                _ => lookups::run(name, args, &conn),
            })
            .map_err(|e| {
                error!("{}", e);
            }),
        _ => Ok(()),
    };
    if res.is_err() {
        process::exit(1);
    }
}

fn connect() -> Result<DbConn> {
    let pool = db_conn::init_pool()?;
    DbConn::from_pool(&pool)
}
