//! Identifier newtypes shared by every layer.
//!
//! Dossiers, users and guest tokens are keyed by Postgres `serial` columns.
//! Wrapping them keeps a user id from being passed where a dossier id is
//! expected, which matters in code whose whole job is comparing the two.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

macro_rules! id_newtype {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i32);

        impl $name {
            #[must_use]
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<i32>().map(Self).map_err(|e| {
                    CoreError::InvalidInput(format!("invalid {} '{s}': {e}", $label))
                })
            }
        }
    };
}

id_newtype!(
    /// Primary key of a dossier (case file), the unit of access control.
    DossierId,
    "dossier id"
);

id_newtype!(
    /// Primary key of a registered user.
    UserId,
    "user id"
);

id_newtype!(
    /// Primary key of a guest token record.
    GuestId,
    "guest id"
);
