// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Contains the guest specific database structs and queries
use crate::events::EventId;
use crate::schema::guests;
use chrono::{DateTime, Utc};
use database::{DbConnection, Result};
use diesel::deserialize::{self, FromSql};
use diesel::pg::{Pg, PgValue};
use diesel::serialize::{self, Output, ToSql};
use diesel::sql_types::Text;
use diesel::{AsExpression, ExpressionMethods, FromSqlRow, QueryDsl, RunQueryDsl};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

diesel_newtype! {
    #[derive(Copy)] GuestId(uuid::Uuid) => diesel::sql_types::Uuid
}

impl GuestId {
    /// Generate a new random guest id
    pub fn generate() -> Self {
        Self::from(uuid::Uuid::new_v4())
    }
}

/// Invitation status of a guest
///
/// Guests always start out as [`GuestStatus::Pending`].
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsExpression, FromSqlRow,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "snake_case")]
pub enum GuestStatus {
    #[default]
    Pending,
    Confirmed,
    Declined,
    Cancelled,
}

impl GuestStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            GuestStatus::Pending => "pending",
            GuestStatus::Confirmed => "confirmed",
            GuestStatus::Declined => "declined",
            GuestStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for GuestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown guest status `{0}`")]
pub struct UnknownGuestStatus(String);

impl FromStr for GuestStatus {
    type Err = UnknownGuestStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(GuestStatus::Pending),
            "confirmed" => Ok(GuestStatus::Confirmed),
            "declined" => Ok(GuestStatus::Declined),
            "cancelled" => Ok(GuestStatus::Cancelled),
            other => Err(UnknownGuestStatus(other.to_owned())),
        }
    }
}

impl ToSql<Text, Pg> for GuestStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        <str as ToSql<Text, Pg>>::to_sql(self.as_str(), out)
    }
}

impl FromSql<Text, Pg> for GuestStatus {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        let s = <String as FromSql<Text, Pg>>::from_sql(bytes)?;
        Ok(s.parse()?)
    }
}

/// Diesel guest struct
///
/// Is used as a result in various queries. Represents a guest row
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Identifiable)]
#[diesel(table_name = guests)]
pub struct Guest {
    pub id: GuestId,
    pub event_id: EventId,
    pub name: String,
    pub email: String,
    pub notes: Option<String>,
    pub status: GuestStatus,
    pub invite_link: String,
    pub invited_at: DateTime<Utc>,
}

/// Diesel insertable guest struct
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = guests)]
pub struct NewGuest {
    pub id: GuestId,
    pub event_id: EventId,
    pub name: String,
    pub email: String,
    pub notes: Option<String>,
    pub status: GuestStatus,
    pub invite_link: String,
    pub invited_at: DateTime<Utc>,
}

impl NewGuest {
    #[tracing::instrument(err, skip_all)]
    pub fn insert(self, conn: &mut DbConnection) -> Result<Guest> {
        let guest = diesel::insert_into(guests::table)
            .values(self)
            .get_result(conn)?;

        Ok(guest)
    }

    /// Build the [`Guest`] that results from inserting this struct
    pub fn into_guest(self) -> Guest {
        Guest {
            id: self.id,
            event_id: self.event_id,
            name: self.name,
            email: self.email,
            notes: self.notes,
            status: self.status,
            invite_link: self.invite_link,
            invited_at: self.invited_at,
        }
    }
}

impl Guest {
    /// Returns all guests of an event in invitation order
    #[tracing::instrument(err, skip_all)]
    pub fn get_all_for_event(conn: &mut DbConnection, event_id: EventId) -> Result<Vec<Guest>> {
        let query = guests::table
            .filter(guests::event_id.eq(event_id))
            .order_by((guests::invited_at.asc(), guests::id.asc()));

        let guests = query.load(conn)?;

        Ok(guests)
    }

    /// Deletes all guests of an event, returns the number of deleted rows
    #[tracing::instrument(err, skip_all)]
    pub fn delete_all_for_event(conn: &mut DbConnection, event_id: EventId) -> Result<usize> {
        let deleted =
            diesel::delete(guests::table.filter(guests::event_id.eq(event_id))).execute(conn)?;

        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_string_forms_match_serde() {
        for status in [
            GuestStatus::Pending,
            GuestStatus::Confirmed,
            GuestStatus::Declined,
            GuestStatus::Cancelled,
        ] {
            let json = serde_json::to_value(status).unwrap();
            assert_eq!(json, serde_json::Value::String(status.to_string()));
            assert_eq!(status.as_str().parse::<GuestStatus>().unwrap(), status);
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!("maybe".parse::<GuestStatus>().is_err());
    }

    #[test]
    fn default_status_is_pending() {
        assert_eq!(GuestStatus::default(), GuestStatus::Pending);
    }
}
