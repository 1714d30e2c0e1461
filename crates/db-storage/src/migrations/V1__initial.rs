// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use crate::migrations::type_polyfills::datetime;
use barrel::backend::Pg;
use barrel::{types, Migration};

pub fn migration() -> String {
    let mut migr = Migration::new();

    migr.create_table("events", |table| {
        table.add_column("id", types::uuid().primary(true));
        table.add_column("owner_id", types::text().nullable(false).indexed(true));
        table.add_column("name", types::varchar(255).nullable(false));
        table.add_column("description", types::text().nullable(true));
        table.add_column("date", types::text().nullable(false));
        table.add_column("duration", types::integer().nullable(false));
        table.add_column("location", types::text().nullable(true));
        table.add_column("event_password", types::text().nullable(true));
        table.add_column("is_public", types::boolean().nullable(false).default(false));
        table.add_column("max_attendees", types::integer().nullable(true));
        table.add_column("created_at", datetime().nullable(false));
        table.add_column("updated_at", datetime().nullable(false));
    });

    // No foreign key on event_id, guests outlive their event unless deleted explicitly
    migr.create_table("guests", |table| {
        table.add_column("id", types::uuid().primary(true));
        table.add_column("event_id", types::uuid().nullable(false).indexed(true));
        table.add_column("name", types::text().nullable(false));
        table.add_column("email", types::text().nullable(false));
        table.add_column("notes", types::text().nullable(true));
        table.add_column(
            "status",
            types::varchar(16).nullable(false).default("pending"),
        );
        table.add_column("invite_link", types::text().nullable(false));
        table.add_column("invited_at", datetime().nullable(false));
    });

    migr.make::<Pg>()
}
