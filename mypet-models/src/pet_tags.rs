use crate::{
    labels::{plural, Verbose},
    my_pets::MyPet,
    schema::{pet_tag_tags, pet_tags, tags},
    tags::Tag,
    Connection, Error, Result,
};
use diesel::{self, connection::Connection as Conn, ExpressionMethods, QueryDsl, RunQueryDsl};
use tracing::debug;

/// Links a set of tags to a pet.
#[derive(Queryable, Identifiable, Clone, Debug, PartialEq, Serialize)]
pub struct PetTag {
    pub id: i32,
    pub pet_id: i32,
}

#[derive(Insertable)]
#[table_name = "pet_tags"]
pub struct NewPetTag {
    pub pet_id: i32,
}

#[derive(Insertable)]
#[table_name = "pet_tag_tags"]
struct NewPetTagTag {
    pet_tag_id: i32,
    tag_id: i32,
}

impl PetTag {
    insert!(pet_tags, NewPetTag);
    get!(pet_tags);
    list_by!(pet_tags, list_for_pet, pet_id as i32);

    /// Creates the link and attaches all the given tags to it.
    pub fn tag_pet(conn: &Connection, pet: &MyPet, tags: &[Tag]) -> Result<PetTag> {
        conn.transaction(|| {
            let pet_tag = PetTag::insert(conn, NewPetTag { pet_id: pet.id })?;
            for tag in tags {
                pet_tag.add_tag(conn, tag)?;
            }
            Ok(pet_tag)
        })
    }

    pub fn get_pet(&self, conn: &Connection) -> Result<MyPet> {
        MyPet::get(conn, self.pet_id)
    }

    pub fn tags(&self, conn: &Connection) -> Result<Vec<Tag>> {
        tags::table
            .inner_join(pet_tag_tags::table)
            .filter(pet_tag_tags::pet_tag_id.eq(self.id))
            .select(tags::all_columns)
            .order(pet_tag_tags::id.asc())
            .load::<Tag>(conn)
            .map_err(Error::from)
    }

    pub fn add_tag(&self, conn: &Connection, tag: &Tag) -> Result<()> {
        debug!("Tagging pet {} with {}", self.pet_id, tag);
        diesel::insert_into(pet_tag_tags::table)
            .values(NewPetTagTag {
                pet_tag_id: self.id,
                tag_id: tag.id,
            })
            .execute(conn)
            .map(|_| ())
            .map_err(Error::from)
    }

    pub fn remove_tag(&self, conn: &Connection, tag: &Tag) -> Result<()> {
        diesel::delete(
            pet_tag_tags::table
                .filter(pet_tag_tags::pet_tag_id.eq(self.id))
                .filter(pet_tag_tags::tag_id.eq(tag.id)),
        )
        .execute(conn)
        .map(|_| ())
        .map_err(Error::from)
    }

    /// `"<tags>, <pet>"`, tags separated by spaces.
    pub fn describe(&self, conn: &Connection) -> Result<String> {
        let tags = self
            .tags(conn)?
            .iter()
            .map(|tag| tag.name.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        Ok(format!("{}, {}", tags, self.get_pet(conn)?))
    }

    pub fn delete(&self, conn: &Connection) -> Result<()> {
        diesel::delete(self)
            .execute(conn)
            .map(|_| ())
            .map_err(Error::from)
    }
}

impl Verbose for PetTag {
    fn verbose_name_plural() -> &'static str {
        plural::PET_TAGS
    }
}
