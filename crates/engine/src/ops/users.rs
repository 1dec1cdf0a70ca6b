//! User registration and credential checks.

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use password_hash::SaltString;
use rand_core::OsRng;
use sea_orm::{ActiveValue::Set, QueryFilter, TransactionTrait, prelude::*};

use crate::{EngineError, ResultEngine, users};

use super::{Engine, normalize_required_text, with_tx};

const MIN_PASSWORD_LEN: usize = 8;

impl Engine {
    /// Register a new user.
    ///
    /// The password is hashed before anything touches the database; the
    /// stored row never sees the raw value. Fails with [`ExistingKey`] when
    /// the email is already taken.
    ///
    /// [`ExistingKey`]: EngineError::ExistingKey
    pub async fn register_user(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> ResultEngine<users::Model> {
        let username = normalize_required_text(username, "username")?;
        let email = normalize_required_text(email, "email")?;
        if password.len() < MIN_PASSWORD_LEN {
            return Err(EngineError::InvalidArgument(
                "password must be at least 8 characters long".to_string(),
            ));
        }
        let password = hash_password(password)?;

        with_tx!(self, |db_tx| {
            let taken = users::Entity::find()
                .filter(users::Column::Email.eq(email.clone()))
                .one(&db_tx)
                .await?
                .is_some();
            if taken {
                return Err(EngineError::ExistingKey("email".to_string()));
            }

            let user = users::ActiveModel {
                username: Set(username),
                email: Set(email),
                password: Set(password),
                ..Default::default()
            };
            Ok(user.insert(&db_tx).await?)
        })
    }

    /// Check a login attempt.
    ///
    /// `Ok(None)` covers both an unknown email and a wrong password; the
    /// caller cannot tell which.
    pub async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> ResultEngine<Option<users::Model>> {
        let Some(user) = users::Entity::find()
            .filter(users::Column::Email.eq(email.trim()))
            .one(&self.database)
            .await?
        else {
            return Ok(None);
        };

        if verify_password(&user.password, password) {
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }

    pub async fn user_by_id(&self, user_id: i32) -> ResultEngine<Option<users::Model>> {
        Ok(users::Entity::find_by_id(user_id)
            .one(&self.database)
            .await?)
    }
}

fn hash_password(password: &str) -> ResultEngine<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|err| EngineError::PasswordHash(err.to_string()))?;
    Ok(hash.to_string())
}

fn verify_password(hash: &str, password: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
