//! Line commands read from the terminal.

use event_sync::FilterField;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    More,
    Filter { field: FilterField, value: String },
    Search(String),
    Reset,
    Show,
    Options,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  more                      load the next page
  venue <name>              filter by venue (no name clears)
  type <name>               filter by event type (no name clears)
  from <YYYY-MM-DD>         start date (no date clears)
  to <YYYY-MM-DD>           end date (no date clears)
  search <text>             search event names (no text clears)
  reset                     back to the default week, no filters
  show                      print the whole list
  options                   list known venues and event types
  quit";

pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };
    let filter = |field| Command::Filter {
        field,
        value: rest.to_string(),
    };

    match head.to_ascii_lowercase().as_str() {
        "" | "more" | "m" => Ok(Command::More),
        "venue" => Ok(filter(FilterField::Venue)),
        "type" => Ok(filter(FilterField::EventType)),
        "from" => Ok(filter(FilterField::StartDate)),
        "to" => Ok(filter(FilterField::EndDate)),
        "search" | "/" => Ok(Command::Search(rest.to_string())),
        "reset" => Ok(Command::Reset),
        "show" => Ok(Command::Show),
        "options" => Ok(Command::Options),
        "help" | "?" => Ok(Command::Help),
        "quit" | "q" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command '{other}', try 'help'")),
    }
}
