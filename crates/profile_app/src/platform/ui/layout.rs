use profile_core::{Affiliation, CareerStage};

use super::constants::*;

pub fn banner(base_url: &str) -> Vec<String> {
    vec![
        "=".repeat(RULE_WIDTH),
        "LinkedIn Profile Search".to_string(),
        format!("Service: {base_url}"),
        "=".repeat(RULE_WIDTH),
    ]
}

pub fn help() -> Vec<String> {
    let affiliations: Vec<_> = Affiliation::ALL.iter().map(|a| a.wire_value()).collect();
    let stages: Vec<_> = CareerStage::ALL.iter().map(|s| s.wire_value()).collect();
    vec![
        "Commands:".to_string(),
        format!("  {CMD_NAME} <text>          student's name (required)"),
        format!(
            "  {CMD_AFFILIATION} <value>   one of: {}",
            affiliations.join(", ")
        ),
        format!("  {CMD_STAGE} <value>         one of: {}", stages.join(", ")),
        format!("  {CMD_SEARCH} [name]         run the search"),
        format!("  {CMD_SELECT} <n>            load details for candidate n"),
        format!("  {CMD_SHOW}                  redraw the screen"),
        format!("  {CMD_HELP}                  this list"),
        format!("  {CMD_QUIT}                  leave"),
    ]
}
