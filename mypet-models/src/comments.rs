use crate::{
    labels::{field, plural, Verbose},
    my_pets::MyPet,
    schema::{comment_likes, comments, users},
    users::User,
    Connection, Error, Result,
};
use chrono::NaiveDateTime;
use diesel::{self, ExpressionMethods, QueryDsl, RunQueryDsl};
use std::fmt;
use tracing::debug;
use validator::Validate;

#[derive(Queryable, Identifiable, Clone, Debug, PartialEq, Serialize)]
pub struct Comment {
    pub id: i32,
    pub author_id: i32,
    pub pet_id: i32,
    pub text: String,
    pub created: NaiveDateTime,
}

#[derive(Insertable, Validate)]
#[table_name = "comments"]
pub struct NewComment {
    pub author_id: i32,
    pub pet_id: i32,
    #[validate(length(min = 1, message = "The comment can't be empty"))]
    pub text: String,
}

#[derive(Insertable)]
#[table_name = "comment_likes"]
struct NewCommentLike {
    comment_id: i32,
    user_id: i32,
}

impl Comment {
    insert!(comments, NewComment);
    get!(comments);

    pub fn create(conn: &Connection, new: NewComment) -> Result<Comment> {
        new.validate()?;
        Comment::insert(conn, new)
    }

    /// Oldest first.
    pub fn list_for_pet(conn: &Connection, pet_id: i32) -> Result<Vec<Comment>> {
        comments::table
            .filter(comments::pet_id.eq(pet_id))
            .order((comments::created.asc(), comments::id.asc()))
            .load::<Comment>(conn)
            .map_err(Error::from)
    }

    pub fn get_author(&self, conn: &Connection) -> Result<User> {
        User::get(conn, self.author_id)
    }

    pub fn get_pet(&self, conn: &Connection) -> Result<MyPet> {
        MyPet::get(conn, self.pet_id)
    }

    pub fn like(&self, conn: &Connection, user: &User) -> Result<()> {
        debug!("{} likes comment {}", user, self.id);
        diesel::insert_into(comment_likes::table)
            .values(NewCommentLike {
                comment_id: self.id,
                user_id: user.id,
            })
            .execute(conn)
            .map(|_| ())
            .map_err(Error::from)
    }

    pub fn unlike(&self, conn: &Connection, user: &User) -> Result<()> {
        diesel::delete(
            comment_likes::table
                .filter(comment_likes::comment_id.eq(self.id))
                .filter(comment_likes::user_id.eq(user.id)),
        )
        .execute(conn)
        .map(|_| ())
        .map_err(Error::from)
    }

    pub fn likers(&self, conn: &Connection) -> Result<Vec<User>> {
        users::table
            .inner_join(comment_likes::table)
            .filter(comment_likes::comment_id.eq(self.id))
            .select(users::all_columns)
            .order(users::username.asc())
            .load::<User>(conn)
            .map_err(Error::from)
    }

    pub fn count_likes(&self, conn: &Connection) -> Result<i64> {
        comment_likes::table
            .filter(comment_likes::comment_id.eq(self.id))
            .count()
            .get_result(conn)
            .map_err(Error::from)
    }

    pub fn delete(&self, conn: &Connection) -> Result<()> {
        diesel::delete(self)
            .execute(conn)
            .map(|_| ())
            .map_err(Error::from)
    }
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl Verbose for Comment {
    fn verbose_name_plural() -> &'static str {
        plural::COMMENTS
    }

    fn field_label(name: &str) -> Option<&'static str> {
        match name {
            "created" => Some(field::CREATED),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{my_pets::tests as pet_tests, tests::db};
    use diesel::Connection;

    #[test]
    fn comment_on_pet() {
        let conn = db();
        conn.test_transaction::<_, Error, _>(|| {
            let (users, pets) = pet_tests::fill_database(&conn);
            let first = Comment::create(
                &conn,
                NewComment {
                    author_id: users[1].id,
                    pet_id: pets[0].id,
                    text: "Good boy".to_owned(),
                },
            )?;
            let second = Comment::create(
                &conn,
                NewComment {
                    author_id: users[2].id,
                    pet_id: pets[0].id,
                    text: "So cute".to_owned(),
                },
            )?;

            assert_eq!(pets[0].comments(&conn)?, vec![first.clone(), second]);
            assert!(pets[1].comments(&conn)?.is_empty());
            assert_eq!(first.get_author(&conn)?, users[1]);
            assert_eq!(first.get_pet(&conn)?, pets[0]);
            assert_eq!(first.to_string(), "Good boy");
            assert_eq!(users[1].comments(&conn)?, vec![first]);
            Ok(())
        });
    }

    #[test]
    fn empty_comment() {
        let conn = db();
        conn.test_transaction::<_, Error, _>(|| {
            let (users, pets) = pet_tests::fill_database(&conn);
            let empty = Comment::create(
                &conn,
                NewComment {
                    author_id: users[0].id,
                    pet_id: pets[0].id,
                    text: String::new(),
                },
            );
            assert_err!(empty, Error::Validation(_));
            Ok(())
        });
    }

    #[test]
    fn likes() {
        let conn = db();
        conn.test_transaction::<_, Error, _>(|| {
            let (users, pets) = pet_tests::fill_database(&conn);
            let comment = Comment::insert(
                &conn,
                NewComment {
                    author_id: users[0].id,
                    pet_id: pets[1].id,
                    text: "Nice nap".to_owned(),
                },
            )?;
            comment.like(&conn, &users[1])?;
            comment.like(&conn, &users[0])?;
            assert_eq!(comment.count_likes(&conn)?, 2);
            assert_eq!(
                comment.likers(&conn)?,
                vec![users[0].clone(), users[1].clone()]
            );
            comment.unlike(&conn, &users[0])?;
            assert_eq!(comment.likers(&conn)?, vec![users[1].clone()]);

            // liking the pet and liking one of its comments are different things
            assert_eq!(pets[1].count_likes(&conn)?, 0);

            comment.delete(&conn)?;
            assert_err!(Comment::get(&conn, comment.id), Error::NotFound);
            Ok(())
        });
    }

    #[test]
    fn labels() {
        assert_eq!(Comment::verbose_name_plural(), "Комментарии к публикациям");
        assert_eq!(Comment::field_label("created"), Some("Дата добавления"));
    }
}
