use crate::{
    labels::{field, plural, Verbose},
    schema::{owner_follows, users},
    users::User,
    Connection, Error, Result,
};
use diesel::{self, ExpressionMethods, QueryDsl, RunQueryDsl};
use tracing::debug;

/// `user` follows the publications of `owner_following`.
#[derive(Clone, Debug, PartialEq, Queryable, Identifiable, Serialize)]
pub struct OwnerFollow {
    pub id: i32,
    pub user_id: i32,
    pub owner_following_id: i32,
}

#[derive(Insertable)]
#[table_name = "owner_follows"]
pub struct NewOwnerFollow {
    pub user_id: i32,
    pub owner_following_id: i32,
}

impl OwnerFollow {
    insert!(owner_follows, NewOwnerFollow);
    get!(owner_follows);
    find_by!(
        owner_follows,
        find,
        user_id as i32,
        owner_following_id as i32
    );

    /// Fails with `Error::AlreadyExists` if `user` already follows `owner`.
    pub fn follow(conn: &Connection, user: &User, owner: &User) -> Result<OwnerFollow> {
        debug!("{} follows {}", user, owner);
        OwnerFollow::insert(
            conn,
            NewOwnerFollow {
                user_id: user.id,
                owner_following_id: owner.id,
            },
        )
    }

    pub fn unfollow(conn: &Connection, user: &User, owner: &User) -> Result<()> {
        OwnerFollow::find(conn, user.id, owner.id)?.delete(conn)
    }

    /// Users following `owner`.
    pub fn followers(conn: &Connection, owner: &User) -> Result<Vec<User>> {
        let follower_ids = owner_follows::table
            .filter(owner_follows::owner_following_id.eq(owner.id))
            .select(owner_follows::user_id);
        users::table
            .filter(users::id.eq_any(follower_ids))
            .order(users::username.asc())
            .load::<User>(conn)
            .map_err(Error::from)
    }

    /// Owners `user` is following.
    pub fn following(conn: &Connection, user: &User) -> Result<Vec<User>> {
        let following_ids = owner_follows::table
            .filter(owner_follows::user_id.eq(user.id))
            .select(owner_follows::owner_following_id);
        users::table
            .filter(users::id.eq_any(following_ids))
            .order(users::username.asc())
            .load::<User>(conn)
            .map_err(Error::from)
    }

    pub fn count_followers(conn: &Connection, owner: &User) -> Result<i64> {
        owner_follows::table
            .filter(owner_follows::owner_following_id.eq(owner.id))
            .count()
            .get_result(conn)
            .map_err(Error::from)
    }

    /// `"<user>, <owner_following>"`
    pub fn describe(&self, conn: &Connection) -> Result<String> {
        Ok(format!(
            "{}, {}",
            User::get(conn, self.user_id)?,
            User::get(conn, self.owner_following_id)?
        ))
    }

    pub fn delete(&self, conn: &Connection) -> Result<()> {
        diesel::delete(self)
            .execute(conn)
            .map(|_| ())
            .map_err(Error::from)
    }
}

impl Verbose for OwnerFollow {
    fn verbose_name_plural() -> &'static str {
        plural::OWNER_FOLLOWS
    }

    fn field_label(name: &str) -> Option<&'static str> {
        match name {
            "user" => Some(field::OWNER_FOLLOWER),
            "owner_following" => Some(field::OWNER_FOLLOWING),
            _ => None,
        }
    }
}
