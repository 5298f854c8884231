use crate::output::{print_fields, print_json};
use anyhow::Result;
use std::path::Path;

pub fn run(config_path: Option<&Path>, email: &str, json: bool) -> Result<()> {
    let config = super::load_checked_config(config_path)?;
    let service = super::service(&config)?;

    let entry = super::runtime()?.block_on(service.last_entry(email))?;

    if json {
        let value = match &entry {
            Some(data) => serde_json::json!({ "message": "Last entry retrieved", "data": data }),
            None => serde_json::json!({ "message": "No previous entries found", "data": null }),
        };
        return print_json(&value);
    }

    let Some(entry) = entry else {
        println!("No previous entries found");
        return Ok(());
    };

    let show = |column: &str| entry.text(column).unwrap_or_else(|| "-".to_string());
    print_fields(&[
        ("date", show("timestamp")),
        ("name", show("name")),
        ("yesterday", show("yesterday")),
        ("today", show("today")),
        ("blockers", show("blockers")),
    ]);
    Ok(())
}
