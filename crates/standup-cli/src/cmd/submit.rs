use crate::output::{print_fields, print_json};
use anyhow::Result;
use standup_core::types::{SinkOutcome, SubmissionInput, SubmissionResult};
use std::path::Path;

pub struct SubmitArgs {
    pub today: String,
    pub yesterday: Option<String>,
    pub blockers: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
}

pub fn run(config_path: Option<&Path>, args: SubmitArgs, json: bool) -> Result<()> {
    let config = super::load_checked_config(config_path)?;
    let service = super::service(&config)?;

    let input = SubmissionInput {
        name: args.name,
        email: args.email,
        yesterday: args.yesterday,
        today: Some(args.today),
        blockers: args.blockers,
    };
    let result = super::runtime()?.block_on(async {
        let input = service.prefill(input).await;
        service.submit(input).await
    })?;

    if json {
        print_json(&serde_json::json!({
            "message": result.overall.message(),
            "status": result.overall,
            "chat": result.chat,
            "sheet": result.log,
        }))?;
    } else {
        print_summary(&result);
    }

    if !result.overall.is_delivered() {
        anyhow::bail!(
            "chat: {}; sheet: {}",
            describe(&result.chat),
            describe(&result.log)
        );
    }
    Ok(())
}

fn print_summary(result: &SubmissionResult) {
    println!("{}", result.overall.message());
    print_fields(&[
        ("chat", describe(&result.chat)),
        ("sheet", describe(&result.log)),
    ]);
}

fn describe(outcome: &SinkOutcome) -> String {
    match (outcome.succeeded, outcome.error_detail.as_deref()) {
        (true, _) => "ok".to_string(),
        (false, Some(detail)) => format!("failed ({detail})"),
        (false, None) => "failed".to_string(),
    }
}
