use crate::output::print_json;
use anyhow::Result;
use chrono::NaiveDate;
use standup_core::clock::{thread_key, Clock, SystemClock};

pub fn run(date: Option<NaiveDate>, json: bool) -> Result<()> {
    let date = date.unwrap_or_else(|| SystemClock.today());
    let key = thread_key(date);
    if json {
        print_json(&serde_json::json!({ "date": date, "thread_key": key }))
    } else {
        println!("{key}");
        Ok(())
    }
}
