//! Opaque string identifiers shared by the entity modules.

/// Declare a `#[serde(transparent)]` string newtype used as an entity id.
///
/// Fresh ids are UUID v7 strings: time-ordered and unique within a practical
/// single-user session. Existing ids (e.g. the `"1"`, `"2"`, … of the default
/// catalog) are carried verbatim.
macro_rules! opaque_id {
  ($(#[$meta:meta])* $name:ident) => {
    $(#[$meta])*
    #[derive(
      Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash,
      serde::Serialize, serde::Deserialize,
    )]
    #[serde(transparent)]
    pub struct $name(String);

    impl $name {
      /// Mint a fresh, time-derived id.
      pub fn generate() -> Self { Self(uuid::Uuid::now_v7().to_string()) }

      pub fn as_str(&self) -> &str { &self.0 }

      pub fn is_empty(&self) -> bool { self.0.is_empty() }
    }

    impl std::fmt::Display for $name {
      fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
      }
    }

    impl From<String> for $name {
      fn from(s: String) -> Self { Self(s) }
    }

    impl From<&str> for $name {
      fn from(s: &str) -> Self { Self(s.to_owned()) }
    }
  };
}
