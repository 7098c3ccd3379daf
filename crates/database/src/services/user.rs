use crate::{
    entities::users,
    error::{ServiceError, ServiceResult},
};
use log::info;
use models::{
    password::{hash_password, verify_password},
    requests::{NewUser, UserUpdate},
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter,
};

pub struct UserService;

impl UserService {
    /// Create an account, storing the password hashed
    pub async fn create_user<C: ConnectionTrait>(
        db: &C,
        new_user: NewUser,
    ) -> ServiceResult<users::Model> {
        Self::ensure_username_free(db, &new_user.username, None).await?;

        let user = users::ActiveModel {
            username: Set(new_user.username),
            password: Set(hash_password(&new_user.password)?),
            email: Set(new_user.email.unwrap_or_default()),
            first_name: Set(new_user.first_name.unwrap_or_default()),
            last_name: Set(new_user.last_name.unwrap_or_default()),
            ..Default::default()
        }
        .insert(db)
        .await?;

        info!("Created user {} ({})", user.id, user.username);
        Ok(user)
    }

    pub async fn get_user<C: ConnectionTrait>(
        db: &C,
        user_id: i32,
    ) -> ServiceResult<users::Model> {
        users::Entity::find_by_id(user_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("user", user_id))
    }

    pub async fn get_user_by_username<C: ConnectionTrait>(
        db: &C,
        username: &str,
    ) -> ServiceResult<users::Model> {
        users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("user", username))
    }

    /// Apply the provided fields only; a new password is re-hashed
    ///
    /// An empty username is rejected rather than stored.
    pub async fn update_user<C: ConnectionTrait>(
        db: &C,
        user_id: i32,
        update: UserUpdate,
    ) -> ServiceResult<users::Model> {
        let user = Self::get_user(db, user_id).await?;

        if let Some(username) = &update.username {
            Self::ensure_username_free(db, username, Some(user_id)).await?;
        }

        let mut active: users::ActiveModel = user.clone().into();
        if let Some(username) = update.username {
            active.username = Set(username);
        }
        if let Some(password) = update.password {
            active.password = Set(hash_password(&password)?);
        }
        if let Some(email) = update.email {
            active.email = Set(email);
        }
        if let Some(first_name) = update.first_name {
            active.first_name = Set(first_name);
        }
        if let Some(last_name) = update.last_name {
            active.last_name = Set(last_name);
        }

        if !active.is_changed() {
            return Ok(user);
        }

        Ok(active.update(db).await?)
    }

    pub fn check_password(user: &users::Model, raw_password: &str) -> bool {
        verify_password(raw_password, &user.password)
    }

    async fn ensure_username_free<C: ConnectionTrait>(
        db: &C,
        username: &str,
        except_id: Option<i32>,
    ) -> ServiceResult<()> {
        if username.is_empty() {
            return Err(ServiceError::invalid_field(
                "username",
                "This field may not be blank.",
            ));
        }

        let mut query = users::Entity::find().filter(users::Column::Username.eq(username));
        if let Some(id) = except_id {
            query = query.filter(users::Column::Id.ne(id));
        }

        if query.one(db).await?.is_some() {
            return Err(ServiceError::invalid_field(
                "username",
                "A user with that username already exists.",
            ));
        }
        Ok(())
    }
}
