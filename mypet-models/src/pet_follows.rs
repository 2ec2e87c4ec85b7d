use crate::{
    labels::{field, plural, Verbose},
    schema::{pet_follows, users},
    users::User,
    Connection, Error, Result,
};
use diesel::{self, ExpressionMethods, QueryDsl, RunQueryDsl};
use tracing::debug;

/// `user` follows a pet. The target is the account the pet belongs to,
/// `pet_following` refers to `users`.
#[derive(Clone, Debug, PartialEq, Queryable, Identifiable, Serialize)]
pub struct PetFollow {
    pub id: i32,
    pub user_id: i32,
    pub pet_following_id: i32,
}

#[derive(Insertable)]
#[table_name = "pet_follows"]
pub struct NewPetFollow {
    pub user_id: i32,
    pub pet_following_id: i32,
}

impl PetFollow {
    insert!(pet_follows, NewPetFollow);
    get!(pet_follows);
    find_by!(
        pet_follows,
        find,
        user_id as i32,
        pet_following_id as i32
    );

    /// Fails with `Error::AlreadyExists` if `user` already follows `pet`.
    pub fn follow(conn: &Connection, user: &User, pet: &User) -> Result<PetFollow> {
        debug!("{} follows pet account {}", user, pet);
        PetFollow::insert(
            conn,
            NewPetFollow {
                user_id: user.id,
                pet_following_id: pet.id,
            },
        )
    }

    pub fn unfollow(conn: &Connection, user: &User, pet: &User) -> Result<()> {
        PetFollow::find(conn, user.id, pet.id)?.delete(conn)
    }

    /// Users following `pet`.
    pub fn followers(conn: &Connection, pet: &User) -> Result<Vec<User>> {
        let follower_ids = pet_follows::table
            .filter(pet_follows::pet_following_id.eq(pet.id))
            .select(pet_follows::user_id);
        users::table
            .filter(users::id.eq_any(follower_ids))
            .order(users::username.asc())
            .load::<User>(conn)
            .map_err(Error::from)
    }

    /// Pet accounts `user` is following.
    pub fn following(conn: &Connection, user: &User) -> Result<Vec<User>> {
        let following_ids = pet_follows::table
            .filter(pet_follows::user_id.eq(user.id))
            .select(pet_follows::pet_following_id);
        users::table
            .filter(users::id.eq_any(following_ids))
            .order(users::username.asc())
            .load::<User>(conn)
            .map_err(Error::from)
    }

    pub fn count_followers(conn: &Connection, pet: &User) -> Result<i64> {
        pet_follows::table
            .filter(pet_follows::pet_following_id.eq(pet.id))
            .count()
            .get_result(conn)
            .map_err(Error::from)
    }

    /// `"<user>, <pet_following>"`
    pub fn describe(&self, conn: &Connection) -> Result<String> {
        Ok(format!(
            "{}, {}",
            User::get(conn, self.user_id)?,
            User::get(conn, self.pet_following_id)?
        ))
    }

    pub fn delete(&self, conn: &Connection) -> Result<()> {
        diesel::delete(self)
            .execute(conn)
            .map(|_| ())
            .map_err(Error::from)
    }
}

impl Verbose for PetFollow {
    fn verbose_name_plural() -> &'static str {
        plural::PET_FOLLOWS
    }

    fn field_label(name: &str) -> Option<&'static str> {
        match name {
            "user" => Some(field::PET_FOLLOWER),
            "pet_following" => Some(field::PET_FOLLOWING),
            _ => None,
        }
    }
}
