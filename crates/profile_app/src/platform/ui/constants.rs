pub const PROMPT: &str = "> ";

pub const CMD_NAME: &str = "name";
pub const CMD_AFFILIATION: &str = "affiliation";
pub const CMD_STAGE: &str = "stage";
pub const CMD_SEARCH: &str = "search";
pub const CMD_SELECT: &str = "select";
pub const CMD_SHOW: &str = "show";
pub const CMD_HELP: &str = "help";
pub const CMD_QUIT: &str = "quit";

pub const RULE_WIDTH: usize = 64;
