use clap::{App, Arg, ArgMatches, SubCommand};

use mypet_models::{
    pet_breeds::{NewPetBreed, PetBreed},
    pet_types::{NewPetType, PetType},
    tags::{NewTag, Tag},
    Connection, Result,
};

/// `types`, `breeds` and `tags` share the same `add`/`list` shape.
pub fn commands<'a, 'b>() -> Vec<App<'a, 'b>> {
    vec![
        command("types", "Manage pet types"),
        command("breeds", "Manage pet breeds"),
        command("tags", "Manage hashtags"),
    ]
}

fn command<'a, 'b>(name: &'static str, about: &'static str) -> App<'a, 'b> {
    SubCommand::with_name(name)
        .about(about)
        .subcommand(
            SubCommand::with_name("add")
                .arg(
                    Arg::with_name("name")
                        .takes_value(true)
                        .required(true)
                        .help("Name of the new entry"),
                )
                .about("Add an entry"),
        )
        .subcommand(SubCommand::with_name("list").about("List all entries"))
}

/// The lookup tables reachable from the command line.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Lookup {
    Types,
    Breeds,
    Tags,
}

impl Lookup {
    fn from_command(name: &str) -> Option<Lookup> {
        match name {
            "types" => Some(Lookup::Types),
            "breeds" => Some(Lookup::Breeds),
            "tags" => Some(Lookup::Tags),
            _ => None,
        }
    }
}

pub fn run<'a>(name: &str, args: &ArgMatches<'a>, conn: &Connection) -> Result<()> {
    match (Lookup::from_command(name), args.subcommand()) {
        (Some(kind), ("add", Some(x))) => add(kind, x.value_of("name").unwrap_or_default(), conn),
        (Some(kind), ("list", Some(_))) => list(kind, conn),
        _ => {
            println!("Unknown subcommand");
            Ok(())
        }
    }
}

fn add(kind: Lookup, name: &str, conn: &Connection) -> Result<()> {
    let name = name.to_owned();
    let (id, name) = match kind {
        Lookup::Types => {
            let t = PetType::create(conn, NewPetType { name })?;
            (t.id, t.name)
        }
        Lookup::Breeds => {
            let b = PetBreed::create(conn, NewPetBreed { name })?;
            (b.id, b.name)
        }
        Lookup::Tags => {
            let t = Tag::create(conn, NewTag { name })?;
            (t.id, t.name)
        }
    };
    println!("Added {} (#{})", name, id);
    Ok(())
}

fn list(kind: Lookup, conn: &Connection) -> Result<()> {
    let rows = match kind {
        Lookup::Types => PetType::list(conn)?
            .into_iter()
            .map(|t| (t.id, t.name))
            .collect::<Vec<_>>(),
        Lookup::Breeds => PetBreed::list(conn)?
            .into_iter()
            .map(|b| (b.id, b.name))
            .collect(),
        Lookup::Tags => Tag::list(conn)?.into_iter().map(|t| (t.id, t.name)).collect(),
    };
    for (id, name) in rows {
        println!("{}\t{}", id, name);
    }
    Ok(())
}
