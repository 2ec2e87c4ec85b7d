use diesel::Connection;
use mypet_models::{
    comments::{Comment, NewComment},
    db_conn,
    migrations::IMPORTED_MIGRATIONS,
    my_pets::{MyPet, MyPetForm},
    owner_follows::OwnerFollow,
    pet_breeds::{NewPetBreed, PetBreed},
    pet_follows::PetFollow,
    pet_tags::PetTag,
    pet_types::{NewPetType, PetType},
    tags::{NewTag, Tag},
    users::{NewUser, User},
    Connection as Conn, Error,
};

#[cfg(all(feature = "sqlite", not(feature = "postgres")))]
fn database_url() -> String {
    ":memory:".to_owned()
}

#[cfg(feature = "postgres")]
fn database_url() -> String {
    mypet_models::CONFIG.database_url.clone()
}

fn db() -> Conn {
    let conn = Conn::establish(&database_url()).expect("Couldn't connect to the database");
    db_conn::configure(&conn).expect("Couldn't configure the connection");
    IMPORTED_MIGRATIONS
        .run_pending_migrations(&conn)
        .expect("Couldn't run migrations");
    conn
}

struct Fixture {
    alice: User,
    bob: User,
    dog: PetType,
    beagle: PetBreed,
}

fn fixture(conn: &Conn) -> Fixture {
    let user = |name: &str| {
        User::create(
            conn,
            NewUser {
                username: name.to_owned(),
                email: format!("{}@example.com", name),
            },
        )
        .unwrap()
    };
    Fixture {
        alice: user("alice"),
        bob: user("bob"),
        dog: PetType::create(
            conn,
            NewPetType {
                name: "dog".to_owned(),
            },
        )
        .unwrap(),
        beagle: PetBreed::create(
            conn,
            NewPetBreed {
                name: "beagle".to_owned(),
            },
        )
        .unwrap(),
    }
}

fn post(conn: &Conn, f: &Fixture, owner: &User, text: &str) -> MyPet {
    MyPet::create(
        conn,
        &MyPetForm {
            owner_id: owner.id,
            pet_type_ids: vec![f.dog.id],
            pet_breed_ids: vec![f.beagle.id],
            image: Some("snoopy.jpg".to_owned()),
            text: text.to_owned(),
            ..MyPetForm::default()
        },
    )
    .unwrap()
}

#[test]
fn deleting_a_user_removes_everything_they_own() {
    let conn = db();
    conn.test_transaction::<_, Error, _>(|| {
        let f = fixture(&conn);
        let alices_pet = post(&conn, &f, &f.alice, "Snoopy");
        let bobs_pet = post(&conn, &f, &f.bob, "Odie");

        let alices_comment = Comment::create(
            &conn,
            NewComment {
                author_id: f.alice.id,
                pet_id: bobs_pet.id,
                text: "Hi Odie".to_owned(),
            },
        )?;
        let bobs_comment = Comment::create(
            &conn,
            NewComment {
                author_id: f.bob.id,
                pet_id: bobs_pet.id,
                text: "Thanks".to_owned(),
            },
        )?;
        bobs_pet.like(&conn, &f.alice)?;
        bobs_comment.like(&conn, &f.alice)?;
        OwnerFollow::follow(&conn, &f.alice, &f.bob)?;
        OwnerFollow::follow(&conn, &f.bob, &f.alice)?;
        PetFollow::follow(&conn, &f.alice, &f.bob)?;
        PetFollow::follow(&conn, &f.bob, &f.alice)?;

        f.alice.delete(&conn)?;

        assert!(matches!(MyPet::get(&conn, alices_pet.id), Err(Error::NotFound)));
        assert!(matches!(
            Comment::get(&conn, alices_comment.id),
            Err(Error::NotFound)
        ));
        assert_eq!(bobs_pet.comments(&conn)?, vec![bobs_comment.clone()]);
        assert_eq!(bobs_pet.count_likes(&conn)?, 0);
        assert_eq!(bobs_comment.count_likes(&conn)?, 0);
        assert!(OwnerFollow::followers(&conn, &f.bob)?.is_empty());
        assert!(OwnerFollow::following(&conn, &f.bob)?.is_empty());
        assert!(PetFollow::followers(&conn, &f.bob)?.is_empty());
        assert!(PetFollow::following(&conn, &f.bob)?.is_empty());

        // lookups are shared and survive
        assert_eq!(PetType::list(&conn)?, vec![f.dog.clone()]);
        assert_eq!(bobs_pet.types(&conn)?, vec![f.dog.clone()]);
        Ok(())
    });
}

#[test]
fn deleting_a_pet_removes_comments_and_tags() {
    let conn = db();
    conn.test_transaction::<_, Error, _>(|| {
        let f = fixture(&conn);
        let pet = post(&conn, &f, &f.alice, "Snoopy on the roof");
        let comment = Comment::create(
            &conn,
            NewComment {
                author_id: f.bob.id,
                pet_id: pet.id,
                text: "Careful!".to_owned(),
            },
        )?;
        comment.like(&conn, &f.alice)?;
        let roof = Tag::create(
            &conn,
            NewTag {
                name: "roof".to_owned(),
            },
        )?;
        let pet_tag = PetTag::tag_pet(&conn, &pet, &[roof.clone()])?;
        pet.like(&conn, &f.bob)?;

        pet.delete(&conn)?;

        assert!(matches!(Comment::get(&conn, comment.id), Err(Error::NotFound)));
        assert!(matches!(PetTag::get(&conn, pet_tag.id), Err(Error::NotFound)));
        assert!(f.alice.pets(&conn)?.is_empty());
        assert!(f.bob.comments(&conn)?.is_empty());
        assert_eq!(Tag::get(&conn, roof.id)?, roof);
        assert_eq!(PetBreed::get(&conn, f.beagle.id)?, f.beagle);
        Ok(())
    });
}

#[test]
fn owner_follow_is_unique() {
    let conn = db();
    conn.test_transaction::<_, Error, _>(|| {
        let f = fixture(&conn);
        OwnerFollow::follow(&conn, &f.alice, &f.bob)?;
        assert!(matches!(
            OwnerFollow::follow(&conn, &f.alice, &f.bob),
            Err(Error::AlreadyExists)
        ));
        Ok(())
    });
}

#[test]
fn pet_follow_is_unique() {
    let conn = db();
    conn.test_transaction::<_, Error, _>(|| {
        let f = fixture(&conn);
        PetFollow::follow(&conn, &f.bob, &f.alice)?;
        assert!(matches!(
            PetFollow::follow(&conn, &f.bob, &f.alice),
            Err(Error::AlreadyExists)
        ));
        Ok(())
    });
}

#[test]
fn pet_type_names_are_unique() {
    let conn = db();
    conn.test_transaction::<_, Error, _>(|| {
        let f = fixture(&conn);
        let dup = PetType::create(
            &conn,
            NewPetType {
                name: f.dog.name.clone(),
            },
        );
        assert!(matches!(dup, Err(Error::AlreadyExists)));
        Ok(())
    });
}

#[test]
fn pet_breed_names_are_unique() {
    let conn = db();
    conn.test_transaction::<_, Error, _>(|| {
        let f = fixture(&conn);
        let dup = PetBreed::create(
            &conn,
            NewPetBreed {
                name: f.beagle.name.clone(),
            },
        );
        assert!(matches!(dup, Err(Error::AlreadyExists)));
        Ok(())
    });
}
