//! Account bootstrap and the credential rules applied before a record is
//! created or a session started.

use serde::Deserialize;

use crate::{
  Error, Result,
  subject::Subject,
  weight::Weight,
};

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 6;

/// The weight catalog every new account starts with.
pub fn default_weights() -> Vec<Weight> {
  vec![
    Weight::new("1", "Kartkówka", 1.0),
    Weight::new("2", "Sprawdzian", 3.0),
    Weight::new("3", "Praca klasowa", 5.0),
  ]
}

/// The subject catalog every new account starts with.
pub fn default_subjects() -> Vec<Subject> {
  ["Matematyka", "Polski", "Angielski", "Historia", "Biologia"]
    .into_iter()
    .enumerate()
    .map(|(i, name)| Subject::new((i + 1).to_string(), name))
    .collect()
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegistrationForm {
  pub email:            String,
  pub password:         String,
  pub confirm_password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
  pub email:    String,
  pub password: String,
}

/// Validate a registration attempt. `already_registered` tells whether the
/// store holds a record for `form.email`.
///
/// Rules are checked in order and the first failure is returned.
pub fn check_registration(form: &RegistrationForm, already_registered: bool) -> Result<()> {
  if form.email.is_empty() || form.password.is_empty() {
    return Err(Error::MissingCredentials);
  }
  if form.password != form.confirm_password {
    return Err(Error::PasswordMismatch);
  }
  if form.password.chars().count() < MIN_PASSWORD_LEN {
    return Err(Error::PasswordTooShort { min: MIN_PASSWORD_LEN });
  }
  if already_registered {
    return Err(Error::EmailTaken(form.email.clone()));
  }
  Ok(())
}

/// Validate a login attempt before any credential lookup.
pub fn check_login(form: &LoginForm) -> Result<()> {
  if form.email.is_empty() || form.password.is_empty() {
    return Err(Error::MissingCredentials);
  }
  Ok(())
}
