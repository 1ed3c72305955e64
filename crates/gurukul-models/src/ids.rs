//! Strongly-typed ID newtypes for domain entities.
//!
//! Several tables in this schema share UUID keys that are easy to confuse —
//! most notably a student's id, which *is* a profile id. Newtypes make a
//! swapped argument a compile error instead of a data bug.

use serde::{Deserialize, Serialize};
use sqlx::{
    postgres::{PgHasArrayType, PgTypeInfo},
    Database, Decode, Encode, Type,
};
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

macro_rules! entity_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
        #[schema(value_type = String, format = "uuid")]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new random ID.
            #[inline]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            #[inline]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            #[inline]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }

            #[inline]
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            #[inline]
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            #[inline]
            fn from(id: $name) -> Uuid {
                id.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }

        impl Type<sqlx::Postgres> for $name {
            fn type_info() -> PgTypeInfo {
                <Uuid as Type<sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &PgTypeInfo) -> bool {
                <Uuid as Type<sqlx::Postgres>>::compatible(ty)
            }
        }

        impl<'q> Encode<'q, sqlx::Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut <sqlx::Postgres as Database>::ArgumentBuffer<'q>,
            ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
                <Uuid as Encode<'q, sqlx::Postgres>>::encode_by_ref(&self.0, buf)
            }
        }

        impl<'r> Decode<'r, sqlx::Postgres> for $name {
            fn decode(
                value: <sqlx::Postgres as Database>::ValueRef<'r>,
            ) -> Result<Self, sqlx::error::BoxDynError> {
                <Uuid as Decode<'r, sqlx::Postgres>>::decode(value).map(Self)
            }
        }

        impl PgHasArrayType for $name {
            fn array_type_info() -> PgTypeInfo {
                <Uuid as PgHasArrayType>::array_type_info()
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                Uuid::deserialize(deserializer).map(Self)
            }
        }
    };
}

entity_id!(
    /// A profile id; also the id of the student record linked one-to-one.
    UserId
);

entity_id!(
    /// A batch (named cohort sharing board/grade/mode).
    BatchId
);

entity_id!(
    /// A scheduled class within a batch.
    ClassId
);

entity_id!(
    /// An attendance row for one (class, student) pair.
    AttendanceId
);

entity_id!(
    /// A fee record.
    FeeId
);

entity_id!(
    /// A test scheduled for a batch.
    TestId
);

entity_id!(
    /// A mark row for one (test, student) pair.
    TestMarkId
);

entity_id!(
    /// A task assigned to a batch.
    TaskId
);

entity_id!(
    /// A task submission for one (task, student) pair.
    SubmissionId
);

entity_id!(
    /// An uploaded class note.
    NoteId
);

entity_id!(
    /// An event open for student registration.
    EventId
);

entity_id!(
    /// An event registration for one (event, student) pair.
    RegistrationId
);

entity_id!(
    /// A notification addressed to a single recipient.
    NotificationId
);

entity_id!(
    /// A testimonial shown on the public site.
    TestimonialId
);

entity_id!(
    /// A demo booking submitted from the public site.
    DemoBookingId
);
