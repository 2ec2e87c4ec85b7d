/// Human readable names of a model and of its fields, as shown to users.
///
/// Models without an explicit plural name get their type name, spaced out
/// and pluralized ("owner follows").
pub trait Verbose {
    fn verbose_name_plural() -> &'static str;

    fn field_label(_field: &str) -> Option<&'static str> {
        None
    }
}

pub mod plural {
    pub const TAGS: &str = "Хэштеги к публикациям";
    pub const PET_TYPES: &str = "Вид животного";
    pub const PET_BREEDS: &str = "Порода животного";
    pub const MY_PETS: &str = "Публикации животных";
    pub const COMMENTS: &str = "Комментарии к публикациям";
    pub const PET_TAGS: &str = "pet tags";
    pub const OWNER_FOLLOWS: &str = "owner follows";
    pub const PET_FOLLOWS: &str = "pet follows";
    pub const USERS: &str = "users";
}

pub mod field {
    pub const PUB_DATE: &str = "Дата публикации";
    pub const CREATED: &str = "Дата добавления";
    pub const OWNER_FOLLOWER: &str = "Подписывающийся пользователь";
    pub const OWNER_FOLLOWING: &str = "Пользователь на которого подписываются";
    pub const PET_FOLLOWER: &str = "Подписчик животного";
    pub const PET_FOLLOWING: &str = "Животное на которое подписываются";
}
