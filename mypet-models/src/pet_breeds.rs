use crate::{
    labels::{plural, Verbose},
    schema::pet_breeds,
    Connection, Error, Result,
};
use diesel::{self, ExpressionMethods, QueryDsl, RunQueryDsl};
use std::fmt;
use validator::Validate;

/// Breed of an animal, unique by name.
#[derive(Clone, Debug, Identifiable, PartialEq, Serialize, Queryable)]
pub struct PetBreed {
    pub id: i32,
    pub name: String,
}

#[derive(Insertable, Validate)]
#[table_name = "pet_breeds"]
pub struct NewPetBreed {
    #[validate(length(min = 1, max = 50, message = "Breeds should be 1 to 50 characters long"))]
    pub name: String,
}

impl PetBreed {
    insert!(pet_breeds, NewPetBreed);
    get!(pet_breeds);
    find_by!(pet_breeds, find_by_name, name as &str);

    pub fn create(conn: &Connection, new: NewPetBreed) -> Result<PetBreed> {
        new.validate()?;
        PetBreed::insert(conn, new)
    }

    /// All the types, ordered by name.
    pub fn list(conn: &Connection) -> Result<Vec<PetBreed>> {
        pet_breeds::table
            .order(pet_breeds::name.asc())
            .load::<PetBreed>(conn)
            .map_err(Error::from)
    }

    pub fn delete(&self, conn: &Connection) -> Result<()> {
        diesel::delete(self)
            .execute(conn)
            .map(|_| ())
            .map_err(Error::from)
    }
}

impl fmt::Display for PetBreed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl Verbose for PetBreed {
    fn verbose_name_plural() -> &'static str {
        plural::PET_BREEDS
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::{tests::db, Connection as Conn};
    use diesel::Connection;

    pub(crate) fn fill_database(conn: &Conn) -> Vec<PetBreed> {
        ["siamese", "beagle", "maine coon"]
            .iter()
            .map(|name| {
                PetBreed::insert(
                    conn,
                    NewPetBreed {
                        name: (*name).to_owned(),
                    },
                )
                .unwrap()
            })
            .collect()
    }

    #[test]
    fn list_is_ordered_by_name() {
        let conn = db();
        conn.test_transaction::<_, Error, _>(|| {
            fill_database(&conn);
            let names = PetBreed::list(&conn)?
                .into_iter()
                .map(|t| t.to_string())
                .collect::<Vec<_>>();
            assert_eq!(names, vec!["beagle", "maine coon", "siamese"]);
            Ok(())
        });
    }

    #[test]
    fn breed_names_are_unique() {
        let conn = db();
        conn.test_transaction::<_, Error, _>(|| {
            fill_database(&conn);
            assert_err!(
                PetBreed::create(&conn, NewPetBreed { name: "beagle".to_owned() }),
                Error::AlreadyExists
            );
            Ok(())
        });
    }

    #[test]
    fn create_validates() {
        let conn = db();
        conn.test_transaction::<_, Error, _>(|| {
            assert_err!(
                PetBreed::create(&conn, NewPetBreed { name: "x".repeat(51) }),
                Error::Validation(_)
            );
            let corgi = PetBreed::create(&conn, NewPetBreed { name: "corgi".to_owned() })?;
            assert_eq!(PetBreed::find_by_name(&conn, "corgi")?, corgi);
            assert_eq!(PetBreed::verbose_name_plural(), "Порода животного");
            Ok(())
        });
    }
}
