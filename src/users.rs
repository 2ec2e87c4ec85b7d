use clap::{App, Arg, ArgMatches, SubCommand};

use mypet_models::{
    users::{NewUser, User},
    Connection, Result,
};

pub fn command<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("users")
        .about("Manage users")
        .subcommand(
            SubCommand::with_name("new")
                .arg(
                    Arg::with_name("name")
                        .short("n")
                        .long("name")
                        .alias("username")
                        .takes_value(true)
                        .required(true)
                        .help("The username of the new user"),
                )
                .arg(
                    Arg::with_name("email")
                        .short("e")
                        .long("email")
                        .takes_value(true)
                        .help("Email address of the new user"),
                )
                .about("Create a new user"),
        )
        .subcommand(
            SubCommand::with_name("delete")
                .arg(
                    Arg::with_name("name")
                        .short("n")
                        .long("name")
                        .alias("username")
                        .takes_value(true)
                        .required(true)
                        .help("The username of the user to delete"),
                )
                .about("Delete a user along with their pets, comments, likes and follows"),
        )
        .subcommand(SubCommand::with_name("list").about("List all users"))
}

pub fn run<'a>(args: &ArgMatches<'a>, conn: &Connection) -> Result<()> {
    match args.subcommand() {
        ("new", Some(x)) => new(x, conn),
        ("delete", Some(x)) => delete(x, conn),
        ("list", Some(_)) => list(conn),
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

fn new<'a>(args: &ArgMatches<'a>, conn: &Connection) -> Result<()> {
    let user = User::create(
        conn,
        NewUser {
            username: args.value_of("name").unwrap_or_default().to_owned(),
            email: args.value_of("email").unwrap_or_default().to_owned(),
        },
    )?;
    println!("Created user {} (#{})", user, user.id);
    Ok(())
}

fn delete<'a>(args: &ArgMatches<'a>, conn: &Connection) -> Result<()> {
    let username = args.value_of("name").unwrap_or_default();
    User::find_by_username(conn, username)?.delete(conn)
}

fn list(conn: &Connection) -> Result<()> {
    for user in User::list(conn)? {
        println!("{}\t{}\t{}", user.id, user.username, user.email);
    }
    Ok(())
}
