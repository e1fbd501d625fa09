use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;
use std::marker::PhantomData;
use thiserror::Error;

/// Errors raised while declaring or loading options.
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("invalid options JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{option}: {key:?} is not a valid key")]
    UnknownKey { option: &'static str, key: String },
    #[error("{option}: {key:?} is declared more than once")]
    DuplicateKey { option: &'static str, key: String },
    #[error("{option}: default {key:?} is outside the declared domain")]
    DefaultOutsideDomain { option: &'static str, key: String },
    #[error("option declaration has an empty key")]
    EmptyKey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OptionKind {
    Toggle {
        default: bool,
    },
    Set {
        valid_keys: &'static [&'static str],
        default: &'static [&'static str],
    },
}

/// A configuration knob the host renders and persists for the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OptionDeclaration {
    pub key: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub kind: OptionKind,
}

impl OptionDeclaration {
    #[must_use]
    pub const fn toggle(
        key: &'static str,
        display_name: &'static str,
        description: &'static str,
        default: bool,
    ) -> Self {
        Self {
            key,
            display_name,
            description,
            kind: OptionKind::Toggle { default },
        }
    }

    #[must_use]
    pub const fn set<D: SetDomain>(display_name: &'static str, description: &'static str) -> Self {
        Self {
            key: D::OPTION,
            display_name,
            description,
            kind: OptionKind::Set {
                valid_keys: D::VALID_KEYS,
                default: D::DEFAULT,
            },
        }
    }

    /// Check the declaration is internally consistent.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty key, a repeated valid key, or a default
    /// outside the declared domain.
    pub fn check(&self) -> Result<(), OptionsError> {
        if self.key.is_empty() {
            return Err(OptionsError::EmptyKey);
        }
        let OptionKind::Set {
            valid_keys,
            default,
        } = self.kind
        else {
            return Ok(());
        };

        let mut seen = BTreeSet::new();
        for key in valid_keys {
            if !seen.insert(*key) {
                return Err(OptionsError::DuplicateKey {
                    option: self.key,
                    key: (*key).to_string(),
                });
            }
        }
        if let Some(key) = default.iter().find(|key| !seen.contains(*key)) {
            return Err(OptionsError::DefaultOutsideDomain {
                option: self.key,
                key: (*key).to_string(),
            });
        }
        Ok(())
    }
}

/// The enumerated domain of a multi-select option.
pub trait SetDomain {
    /// Option key the set is persisted under.
    const OPTION: &'static str;
    const VALID_KEYS: &'static [&'static str];
    const DEFAULT: &'static [&'static str];
}

/// A multi-select value that only ever holds keys from `D`'s domain.
///
/// Iteration is ascending, so pools projected from the set are sorted.
pub struct OwnedSet<D: SetDomain> {
    keys: BTreeSet<String>,
    domain: PhantomData<fn() -> D>,
}

impl<D: SetDomain> OwnedSet<D> {
    /// Build a set, rejecting keys outside the domain.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::UnknownKey`] for the first key not in `D::VALID_KEYS`.
    pub fn new<I, S>(keys: I) -> Result<Self, OptionsError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = BTreeSet::new();
        for key in keys {
            let key = key.into();
            if !D::VALID_KEYS.iter().any(|valid| *valid == key) {
                return Err(OptionsError::UnknownKey {
                    option: D::OPTION,
                    key,
                });
            }
            set.insert(key);
        }
        Ok(Self {
            keys: set,
            domain: PhantomData,
        })
    }

    #[must_use]
    pub fn empty() -> Self {
        Self {
            keys: BTreeSet::new(),
            domain: PhantomData,
        }
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl<D: SetDomain> Default for OwnedSet<D> {
    fn default() -> Self {
        Self {
            keys: D::DEFAULT.iter().map(|key| (*key).to_string()).collect(),
            domain: PhantomData,
        }
    }
}

impl<D: SetDomain> Clone for OwnedSet<D> {
    fn clone(&self) -> Self {
        Self {
            keys: self.keys.clone(),
            domain: PhantomData,
        }
    }
}

impl<D: SetDomain> PartialEq for OwnedSet<D> {
    fn eq(&self, other: &Self) -> bool {
        self.keys == other.keys
    }
}

impl<D: SetDomain> Eq for OwnedSet<D> {}

impl<D: SetDomain> fmt::Debug for OwnedSet<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.keys.iter()).finish()
    }
}

impl<D: SetDomain> TryFrom<Vec<String>> for OwnedSet<D> {
    type Error = OptionsError;

    fn try_from(keys: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(keys)
    }
}

impl<D: SetDomain> Serialize for OwnedSet<D> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.keys)
    }
}

impl<'de, D: SetDomain> Deserialize<'de> for OwnedSet<D> {
    fn deserialize<De: Deserializer<'de>>(deserializer: De) -> Result<Self, De::Error> {
        let keys = Vec::<String>::deserialize(deserializer)?;
        Self::new(keys).map_err(serde::de::Error::custom)
    }
}

/// A game's option snapshot, as persisted by the host.
///
/// Fields missing from the JSON fall back to the declared defaults; keys
/// belonging to other games are ignored.
pub trait GameOptions: Serialize + DeserializeOwned + Default + Clone + fmt::Debug {
    fn declarations() -> Vec<OptionDeclaration>;

    /// Check the declarations this snapshot was built against, including
    /// that every set default lies inside its domain.
    ///
    /// # Errors
    ///
    /// Returns the first declaration problem found.
    fn validate(&self) -> Result<(), OptionsError> {
        Self::declarations().iter().try_for_each(OptionDeclaration::check)
    }

    /// Parse and validate an option snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed, names a key outside a
    /// declared domain, or falls back to a default outside its domain.
    fn from_json(json: &str) -> Result<Self, OptionsError> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        log::debug!("loaded options {options:?}");
        Ok(options)
    }
}

/// Read a toggle the way hosts persist it: `true`/`false` or `1`/`0`.
///
/// # Errors
///
/// Rejects strings and integers other than 0 and 1.
pub fn deserialize_toggle<'de, De: Deserializer<'de>>(
    deserializer: De,
) -> Result<bool, De::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Toggle {
        Flag(bool),
        Value(u64),
    }

    match Toggle::deserialize(deserializer)? {
        Toggle::Flag(flag) => Ok(flag),
        Toggle::Value(0) => Ok(false),
        Toggle::Value(1) => Ok(true),
        Toggle::Value(other) => Err(serde::de::Error::custom(format!(
            "toggle value {other} is neither 0 nor 1"
        ))),
    }
}
