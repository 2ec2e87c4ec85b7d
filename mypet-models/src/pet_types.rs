use crate::{
    labels::{plural, Verbose},
    schema::pet_types,
    Connection, Error, Result,
};
use diesel::{self, ExpressionMethods, QueryDsl, RunQueryDsl};
use std::fmt;
use validator::Validate;

/// Kind of animal ("cat", "dog"...), unique by name.
#[derive(Clone, Debug, Identifiable, PartialEq, Serialize, Queryable)]
pub struct PetType {
    pub id: i32,
    pub name: String,
}

#[derive(Insertable, Validate)]
#[table_name = "pet_types"]
pub struct NewPetType {
    #[validate(length(min = 1, max = 50, message = "Pet types should be 1 to 50 characters long"))]
    pub name: String,
}

impl PetType {
    insert!(pet_types, NewPetType);
    get!(pet_types);
    find_by!(pet_types, find_by_name, name as &str);

    pub fn create(conn: &Connection, new: NewPetType) -> Result<PetType> {
        new.validate()?;
        PetType::insert(conn, new)
    }

    /// All the types, ordered by name.
    pub fn list(conn: &Connection) -> Result<Vec<PetType>> {
        pet_types::table
            .order(pet_types::name.asc())
            .load::<PetType>(conn)
            .map_err(Error::from)
    }

    pub fn delete(&self, conn: &Connection) -> Result<()> {
        diesel::delete(self)
            .execute(conn)
            .map(|_| ())
            .map_err(Error::from)
    }
}

impl fmt::Display for PetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl Verbose for PetType {
    fn verbose_name_plural() -> &'static str {
        plural::PET_TYPES
    }
}
