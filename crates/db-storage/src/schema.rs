// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

diesel::table! {
    events (id) {
        id -> Uuid,
        owner_id -> Text,
        name -> Text,
        description -> Nullable<Text>,
        date -> Text,
        duration -> Int4,
        location -> Nullable<Text>,
        event_password -> Nullable<Text>,
        is_public -> Bool,
        max_attendees -> Nullable<Int4>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    guests (id) {
        id -> Uuid,
        event_id -> Uuid,
        name -> Text,
        email -> Text,
        notes -> Nullable<Text>,
        status -> Text,
        invite_link -> Text,
        invited_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(events, guests);
