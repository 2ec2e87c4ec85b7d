use crate::{
    comments::Comment,
    labels::{plural, Verbose},
    my_pets::MyPet,
    schema::{comments, my_pets, users},
    Connection, Error, Result,
};
use chrono::NaiveDateTime;
use diesel::{self, ExpressionMethods, QueryDsl, RunQueryDsl};
use std::fmt;
use tracing::info;
use validator::Validate;

/// An account, as provided by the authentication layer.
#[derive(Queryable, Identifiable, Clone, Debug, PartialEq, Serialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub date_joined: NaiveDateTime,
}

#[derive(Insertable, Validate, Default)]
#[table_name = "users"]
pub struct NewUser {
    #[validate(length(min = 1, max = 150, message = "Username should be 1 to 150 characters long"))]
    pub username: String,
    #[validate(length(max = 254))]
    pub email: String,
}

impl User {
    insert!(users, NewUser);
    get!(users);
    find_by!(users, find_by_username, username as &str);

    pub fn create(conn: &Connection, new: NewUser) -> Result<User> {
        new.validate()?;
        User::insert(conn, new)
    }

    pub fn list(conn: &Connection) -> Result<Vec<User>> {
        users::table
            .order(users::username.asc())
            .load::<User>(conn)
            .map_err(Error::from)
    }

    pub fn pets(&self, conn: &Connection) -> Result<Vec<MyPet>> {
        my_pets::table
            .filter(my_pets::owner_id.eq(self.id))
            .order(my_pets::pub_date.desc())
            .load::<MyPet>(conn)
            .map_err(Error::from)
    }

    pub fn comments(&self, conn: &Connection) -> Result<Vec<Comment>> {
        comments::table
            .filter(comments::author_id.eq(self.id))
            .order(comments::created.desc())
            .load::<Comment>(conn)
            .map_err(Error::from)
    }

    /// Everything the user owns, authored, liked or follows goes with them.
    pub fn delete(&self, conn: &Connection) -> Result<()> {
        info!("Deleting user {} and everything they own", self.username);
        diesel::delete(self)
            .execute(conn)
            .map(|_| ())
            .map_err(Error::from)
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.username)
    }
}

impl Verbose for User {
    fn verbose_name_plural() -> &'static str {
        plural::USERS
    }
}
