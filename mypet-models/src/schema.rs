table! {
    comment_likes (id) {
        id -> Int4,
        comment_id -> Int4,
        user_id -> Int4,
    }
}

table! {
    comments (id) {
        id -> Int4,
        author_id -> Int4,
        pet_id -> Int4,
        text -> Text,
        created -> Timestamp,
    }
}

table! {
    my_pet_breeds (id) {
        id -> Int4,
        my_pet_id -> Int4,
        pet_breed_id -> Int4,
    }
}

table! {
    my_pet_likes (id) {
        id -> Int4,
        my_pet_id -> Int4,
        user_id -> Int4,
    }
}

table! {
    my_pet_types (id) {
        id -> Int4,
        my_pet_id -> Int4,
        pet_type_id -> Int4,
    }
}

table! {
    my_pets (id) {
        id -> Int4,
        owner_id -> Int4,
        image -> Nullable<Text>,
        video -> Nullable<Text>,
        text -> Text,
        pub_date -> Timestamp,
    }
}

table! {
    owner_follows (id) {
        id -> Int4,
        user_id -> Int4,
        owner_following_id -> Int4,
    }
}

table! {
    pet_breeds (id) {
        id -> Int4,
        name -> Varchar,
    }
}

table! {
    pet_follows (id) {
        id -> Int4,
        user_id -> Int4,
        pet_following_id -> Int4,
    }
}

table! {
    pet_tag_tags (id) {
        id -> Int4,
        pet_tag_id -> Int4,
        tag_id -> Int4,
    }
}

table! {
    pet_tags (id) {
        id -> Int4,
        pet_id -> Int4,
    }
}

table! {
    pet_types (id) {
        id -> Int4,
        name -> Varchar,
    }
}

table! {
    tags (id) {
        id -> Int4,
        name -> Varchar,
    }
}

table! {
    users (id) {
        id -> Int4,
        username -> Varchar,
        email -> Varchar,
        date_joined -> Timestamp,
    }
}

joinable!(comment_likes -> comments (comment_id));
joinable!(comment_likes -> users (user_id));
joinable!(comments -> my_pets (pet_id));
joinable!(comments -> users (author_id));
joinable!(my_pet_breeds -> my_pets (my_pet_id));
joinable!(my_pet_breeds -> pet_breeds (pet_breed_id));
joinable!(my_pet_likes -> my_pets (my_pet_id));
joinable!(my_pet_likes -> users (user_id));
joinable!(my_pet_types -> my_pets (my_pet_id));
joinable!(my_pet_types -> pet_types (pet_type_id));
joinable!(my_pets -> users (owner_id));
joinable!(pet_tag_tags -> pet_tags (pet_tag_id));
joinable!(pet_tag_tags -> tags (tag_id));
joinable!(pet_tags -> my_pets (pet_id));

allow_tables_to_appear_in_same_query!(
    comment_likes,
    comments,
    my_pet_breeds,
    my_pet_likes,
    my_pet_types,
    my_pets,
    owner_follows,
    pet_breeds,
    pet_follows,
    pet_tag_tags,
    pet_tags,
    pet_types,
    tags,
    users,
);
