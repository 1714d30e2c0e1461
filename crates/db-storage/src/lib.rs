// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Contains the database ORM and database migrations for the MeetBase controller
//! Builds upon meetbase-database
//!
//! Every table has a model for reading (e.g. [`events::Event`]), one for insertion
//! (e.g. [`events::NewEvent`]) and, where the table can be modified, a changeset
//! (e.g. [`events::UpdateEvent`]). Queries are associated functions taking a
//! [`database::DbConnection`].

#[macro_use]
extern crate diesel;

#[macro_use]
mod macros;
mod schema;

pub mod events;
pub mod guests;
pub mod migrations;
pub mod users;
