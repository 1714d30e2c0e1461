// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Identifiers of users
//!
//! Users themselves live in the hosted auth provider, only their opaque id is stored
//! as owner of events.

diesel_newtype! {
    UserId(String) => diesel::sql_types::Text
}

