use crate::{
    comments::Comment,
    labels::{field, plural, Verbose},
    pet_breeds::PetBreed,
    pet_tags::PetTag,
    pet_types::PetType,
    schema::{my_pet_breeds, my_pet_likes, my_pet_types, my_pets, pet_breeds, pet_types, users},
    uploads::{
        validate_upload_name, validate_video_file, UploadedFile, IMAGE_UPLOAD_DIRECTORY,
        VIDEO_UPLOAD_DIRECTORY,
    },
    users::User,
    Connection, Error, Result,
};
use chrono::NaiveDateTime;
use diesel::{self, connection::Connection as Conn, ExpressionMethods, QueryDsl, RunQueryDsl};
use std::fmt;
use tracing::{debug, info};
use validator::Validate;

/// A publication about a pet: some text, maybe a picture or a video.
#[derive(Queryable, Identifiable, Clone, Debug, PartialEq, Serialize)]
pub struct MyPet {
    pub id: i32,
    pub owner_id: i32,
    pub image: Option<UploadedFile>,
    pub video: Option<UploadedFile>,
    pub text: String,
    pub pub_date: NaiveDateTime,
}

#[derive(Insertable)]
#[table_name = "my_pets"]
pub struct NewMyPet {
    pub owner_id: i32,
    pub image: Option<UploadedFile>,
    pub video: Option<UploadedFile>,
    pub text: String,
}

#[derive(Insertable)]
#[table_name = "my_pet_types"]
struct NewMyPetType {
    my_pet_id: i32,
    pet_type_id: i32,
}

#[derive(Insertable)]
#[table_name = "my_pet_breeds"]
struct NewMyPetBreed {
    my_pet_id: i32,
    pet_breed_id: i32,
}

#[derive(Insertable)]
#[table_name = "my_pet_likes"]
struct NewMyPetLike {
    my_pet_id: i32,
    user_id: i32,
}

/// What a user submits to publish a pet.
///
/// Types and breeds can be empty in the database, but not here.
#[derive(Default, Deserialize, Validate)]
pub struct MyPetForm {
    pub owner_id: i32,
    #[validate(length(min = 1, message = "Pick at least one pet type"))]
    pub pet_type_ids: Vec<i32>,
    #[validate(length(min = 1, message = "Pick at least one breed"))]
    pub pet_breed_ids: Vec<i32>,
    /// Name of the uploaded picture
    #[validate(custom = "validate_upload_name")]
    pub image: Option<String>,
    /// Name of the uploaded video
    #[validate(custom = "validate_video_file")]
    pub video: Option<String>,
    #[validate(length(min = 1, message = "The text can't be empty"))]
    pub text: String,
}

impl MyPet {
    insert!(my_pets, NewMyPet);
    get!(my_pets);
    list_by!(my_pets, list_by_owner, owner_id as i32);

    /// Validates the form, then stores the pet with its types and breeds.
    pub fn create(conn: &Connection, form: &MyPetForm) -> Result<MyPet> {
        form.validate()?;
        conn.transaction(|| {
            let pet = MyPet::insert(
                conn,
                NewMyPet {
                    owner_id: form.owner_id,
                    image: form
                        .image
                        .as_deref()
                        .map(|name| UploadedFile::uploaded(IMAGE_UPLOAD_DIRECTORY, name)),
                    video: form
                        .video
                        .as_deref()
                        .map(|name| UploadedFile::uploaded(VIDEO_UPLOAD_DIRECTORY, name)),
                    text: form.text.clone(),
                },
            )?;
            for id in &form.pet_type_ids {
                pet.add_type(conn, &PetType::get(conn, *id)?)?;
            }
            for id in &form.pet_breed_ids {
                pet.add_breed(conn, &PetBreed::get(conn, *id)?)?;
            }
            Ok(pet)
        })
    }

    /// Latest publications first.
    pub fn list_recent(conn: &Connection) -> Result<Vec<MyPet>> {
        my_pets::table
            .order((my_pets::pub_date.desc(), my_pets::id.desc()))
            .load::<MyPet>(conn)
            .map_err(Error::from)
    }

    pub fn get_owner(&self, conn: &Connection) -> Result<User> {
        User::get(conn, self.owner_id)
    }

    pub fn types(&self, conn: &Connection) -> Result<Vec<PetType>> {
        pet_types::table
            .inner_join(my_pet_types::table)
            .filter(my_pet_types::my_pet_id.eq(self.id))
            .select(pet_types::all_columns)
            .order(pet_types::name.asc())
            .load::<PetType>(conn)
            .map_err(Error::from)
    }

    pub fn add_type(&self, conn: &Connection, pet_type: &PetType) -> Result<()> {
        debug!("Pet {} is a {}", self.id, pet_type);
        diesel::insert_into(my_pet_types::table)
            .values(NewMyPetType {
                my_pet_id: self.id,
                pet_type_id: pet_type.id,
            })
            .execute(conn)
            .map(|_| ())
            .map_err(Error::from)
    }

    pub fn remove_type(&self, conn: &Connection, pet_type: &PetType) -> Result<()> {
        diesel::delete(
            my_pet_types::table
                .filter(my_pet_types::my_pet_id.eq(self.id))
                .filter(my_pet_types::pet_type_id.eq(pet_type.id)),
        )
        .execute(conn)
        .map(|_| ())
        .map_err(Error::from)
    }

    pub fn breeds(&self, conn: &Connection) -> Result<Vec<PetBreed>> {
        pet_breeds::table
            .inner_join(my_pet_breeds::table)
            .filter(my_pet_breeds::my_pet_id.eq(self.id))
            .select(pet_breeds::all_columns)
            .order(pet_breeds::name.asc())
            .load::<PetBreed>(conn)
            .map_err(Error::from)
    }

    pub fn add_breed(&self, conn: &Connection, breed: &PetBreed) -> Result<()> {
        debug!("Pet {} is a {}", self.id, breed);
        diesel::insert_into(my_pet_breeds::table)
            .values(NewMyPetBreed {
                my_pet_id: self.id,
                pet_breed_id: breed.id,
            })
            .execute(conn)
            .map(|_| ())
            .map_err(Error::from)
    }

    pub fn remove_breed(&self, conn: &Connection, breed: &PetBreed) -> Result<()> {
        diesel::delete(
            my_pet_breeds::table
                .filter(my_pet_breeds::my_pet_id.eq(self.id))
                .filter(my_pet_breeds::pet_breed_id.eq(breed.id)),
        )
        .execute(conn)
        .map(|_| ())
        .map_err(Error::from)
    }

    pub fn like(&self, conn: &Connection, user: &User) -> Result<()> {
        debug!("{} likes pet {}", user, self.id);
        diesel::insert_into(my_pet_likes::table)
            .values(NewMyPetLike {
                my_pet_id: self.id,
                user_id: user.id,
            })
            .execute(conn)
            .map(|_| ())
            .map_err(Error::from)
    }

    pub fn unlike(&self, conn: &Connection, user: &User) -> Result<()> {
        diesel::delete(
            my_pet_likes::table
                .filter(my_pet_likes::my_pet_id.eq(self.id))
                .filter(my_pet_likes::user_id.eq(user.id)),
        )
        .execute(conn)
        .map(|_| ())
        .map_err(Error::from)
    }

    pub fn likers(&self, conn: &Connection) -> Result<Vec<User>> {
        users::table
            .inner_join(my_pet_likes::table)
            .filter(my_pet_likes::my_pet_id.eq(self.id))
            .select(users::all_columns)
            .order(users::username.asc())
            .load::<User>(conn)
            .map_err(Error::from)
    }

    pub fn count_likes(&self, conn: &Connection) -> Result<i64> {
        my_pet_likes::table
            .filter(my_pet_likes::my_pet_id.eq(self.id))
            .count()
            .get_result(conn)
            .map_err(Error::from)
    }

    pub fn is_liked_by(&self, conn: &Connection, user: &User) -> Result<bool> {
        my_pet_likes::table
            .filter(my_pet_likes::my_pet_id.eq(self.id))
            .filter(my_pet_likes::user_id.eq(user.id))
            .count()
            .get_result::<i64>(conn)
            .map(|count| count > 0)
            .map_err(Error::from)
    }

    pub fn comments(&self, conn: &Connection) -> Result<Vec<Comment>> {
        Comment::list_for_pet(conn, self.id)
    }

    pub fn pet_tags(&self, conn: &Connection) -> Result<Vec<PetTag>> {
        PetTag::list_for_pet(conn, self.id)
    }

    /// Comments, tags, likes and type/breed memberships go with the pet.
    pub fn delete(&self, conn: &Connection) -> Result<()> {
        info!("Deleting pet {}", self.id);
        diesel::delete(self)
            .execute(conn)
            .map(|_| ())
            .map_err(Error::from)
    }
}

impl fmt::Display for MyPet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl Verbose for MyPet {
    fn verbose_name_plural() -> &'static str {
        plural::MY_PETS
    }

    fn field_label(name: &str) -> Option<&'static str> {
        match name {
            "pub_date" => Some(field::PUB_DATE),
            _ => None,
        }
    }
}
