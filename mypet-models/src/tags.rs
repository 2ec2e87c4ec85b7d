use crate::{
    labels::{plural, Verbose},
    schema::tags,
    Connection, Error, Result,
};
use diesel::{self, ExpressionMethods, QueryDsl, RunQueryDsl};
use std::fmt;
use validator::Validate;

/// A hashtag. Names are not unique, the same word may be stored twice.
#[derive(Clone, Debug, Identifiable, PartialEq, Serialize, Queryable)]
pub struct Tag {
    pub id: i32,
    pub name: String,
}

#[derive(Insertable, Validate)]
#[table_name = "tags"]
pub struct NewTag {
    #[validate(length(min = 1, max = 30, message = "Tags should be 1 to 30 characters long"))]
    pub name: String,
}

impl Tag {
    insert!(tags, NewTag);
    get!(tags);
    find_by!(tags, find_by_name, name as &str);
    list_by!(tags, list_by_name, name as &str);

    pub fn create(conn: &Connection, new: NewTag) -> Result<Tag> {
        new.validate()?;
        Tag::insert(conn, new)
    }

    pub fn list(conn: &Connection) -> Result<Vec<Tag>> {
        tags::table
            .order((tags::name.asc(), tags::id.asc()))
            .load::<Tag>(conn)
            .map_err(Error::from)
    }

    pub fn delete(&self, conn: &Connection) -> Result<()> {
        diesel::delete(self)
            .execute(conn)
            .map(|_| ())
            .map_err(Error::from)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl Verbose for Tag {
    fn verbose_name_plural() -> &'static str {
        plural::TAGS
    }
}
