//! Curriculum enums mirroring the database types.

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Curriculum standard a batch or student follows.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "board_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Board {
    StateBoard,
    Cbse,
    Icse,
    Cambridge,
}

impl Board {
    pub fn as_str(&self) -> &'static str {
        match self {
            Board::StateBoard => "state_board",
            Board::Cbse => "cbse",
            Board::Icse => "icse",
            Board::Cambridge => "cambridge",
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a batch meets online or at the center.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "class_mode", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ClassMode {
    Online,
    Offline,
}

impl fmt::Display for ClassMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ClassMode::Online => "online",
            ClassMode::Offline => "offline",
        })
    }
}

/// Fee payment state. Set explicitly by admins; never derived from dates.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "fee_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FeeStatus {
    Pending,
    Paid,
    Overdue,
}

impl fmt::Display for FeeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FeeStatus::Pending => "pending",
            FeeStatus::Paid => "paid",
            FeeStatus::Overdue => "overdue",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_serde_matches_database_spelling() {
        assert_eq!(
            serde_json::to_string(&Board::StateBoard).unwrap(),
            r#""state_board""#
        );
        let parsed: Board = serde_json::from_str(r#""cbse""#).unwrap();
        assert_eq!(parsed, Board::Cbse);
    }

    #[test]
    fn mode_and_status_serde() {
        assert_eq!(
            serde_json::to_string(&ClassMode::Offline).unwrap(),
            r#""offline""#
        );
        assert_eq!(
            serde_json::to_string(&FeeStatus::Overdue).unwrap(),
            r#""overdue""#
        );
    }
}
