/// Commands understood by the interactive picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Groups,         // groups - list categories
    Group(usize),   // group <index> - switch category
    List,           // list - show the visible rows
    Search(String), // search <text> - live search, empty text clears
    Pick(usize),    // pick <row> - highlight a visible row (1-based)
    Activate,       // activate - confirm the highlighted row
    Info,           // info - details of the highlighted row
    Json,           // json - highlighted row as JSON
    Help,
    Quit,
    Invalid { command: String, reason: String },
    Unknown(String),
}

impl Command {
    /// Parse one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }

        let (keyword, arguments) = match trimmed.find(char::is_whitespace) {
            Some(pos) => (&trimmed[..pos], trimmed[pos..].trim()),
            None => (trimmed, ""),
        };
        let keyword = keyword.trim_start_matches(['/', '\\']).to_lowercase();

        let command = match keyword.as_str() {
            "groups" | "g" => Command::Groups,
            "group" => Self::number(&keyword, arguments, Command::Group),
            "list" | "ls" | "l" => Command::List,
            "search" | "s" | "find" => Command::Search(arguments.to_string()),
            "pick" | "p" => match Self::number(&keyword, arguments, Command::Pick) {
                Command::Pick(0) => Command::Invalid {
                    command: keyword.clone(),
                    reason: "rows are numbered from 1".to_string(),
                },
                other => other,
            },
            "activate" | "a" => Command::Activate,
            "info" | "i" => Command::Info,
            "json" => Command::Json,
            "help" | "h" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            _ => Command::Unknown(trimmed.to_string()),
        };
        Some(command)
    }

    fn number(keyword: &str, arguments: &str, build: fn(usize) -> Command) -> Command {
        match arguments.parse::<usize>() {
            Ok(n) => build(n),
            Err(_) => Command::Invalid {
                command: keyword.to_string(),
                reason: format!("expected a number, got {:?}", arguments),
            },
        }
    }
}

pub const HELP: &str = "\
Commands:
  groups            list satellite groups
  group <index>     switch to a group
  list              show the satellites of the current group
  search <text>     search by name (empty text clears the search)
  pick <row>        highlight a row of the list
  activate          select the highlighted satellite
  info              show the highlighted satellite
  json              print the highlighted satellite as JSON
  help              this text
  quit              leave";
