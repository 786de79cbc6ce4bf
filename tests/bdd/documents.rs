//! Named JSON documents served by the stub API in scenarios.

use anyhow::{Result, bail};
use serde_json::{Value, json};

/// Look up the document registered under `name`.
pub fn document(name: &str) -> Result<Value> {
    let doc = match name {
        "user" => json!({
            "id": 42,
            "name": "Ann",
            "email": "ann@example.com",
            "active": true,
            "roles": ["admin", "editor"],
            "owner": {"name": "John", "address": {"city": "Oslo"}},
        }),
        "users" => json!([
            {"id": 1, "name": "Ann", "active": true, "status": "ok", "profile": {"city": "Oslo"}},
            {"id": 2, "name": "Bob", "active": true, "status": "ok", "profile": {"city": "Oslo"}},
        ]),
        "empty list" => json!([]),
        "team" => json!({
            "name": "core",
            "members": [
                {"name": "Ann", "team": "core", "admin": true, "role": {"title": "lead"}},
                {"name": "Bob", "team": "core", "admin": true, "role": {"title": "lead"}},
            ],
            "guests": [],
        }),
        other => bail!("no document named '{other}'"),
    };
    Ok(doc)
}
