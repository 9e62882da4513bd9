use std::path::PathBuf;

use variantdesk_core::{Column, SearchField};

/// One line of shell input.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ShellCommand {
    /// Blank line.
    Nothing,
    Fetch(String),
    Search { field: SearchField, query: String },
    Sort(Column),
    Show,
    Clear,
    Export(Option<PathBuf>),
    Status,
    Help,
    Quit,
}

pub(crate) const HELP: &str = "\
commands:
  fetch <url>              fetch a color-variants URL in the background
  search <field> [query]   filter rows; field is name, product_id or barcode
  sort <column>            sort by column; repeat to flip direction
  show                     print the grid
  clear                    remove every record (asks for confirmation)
  export [path]            write all records to .xlsx (or .csv / .json)
  status                   show status line, progress and record count
  help                     show this help
  quit                     leave the shell";

/// Parses one input line.
///
/// # Errors
///
/// Returns an error for an unknown command, a `sort` without a known
/// column, or a `search` without a field.
pub(crate) fn parse_command(line: &str) -> anyhow::Result<ShellCommand> {
    let line = line.trim();
    let (name, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(name, rest)| (name, rest.trim()));

    let command = match name.to_lowercase().as_str() {
        "" => ShellCommand::Nothing,
        "fetch" | "get" => ShellCommand::Fetch(rest.to_string()),
        "search" | "find" => {
            let (field, query) = rest
                .split_once(char::is_whitespace)
                .map_or((rest, ""), |(field, query)| (field, query.trim()));
            if field.is_empty() {
                anyhow::bail!("usage: search <field> [query]");
            }
            ShellCommand::Search {
                field: SearchField::parse_or_name(field),
                query: query.to_string(),
            }
        }
        "sort" => {
            if rest.is_empty() {
                anyhow::bail!("usage: sort <column>");
            }
            ShellCommand::Sort(rest.parse::<Column>()?)
        }
        "show" | "ls" => ShellCommand::Show,
        "clear" => ShellCommand::Clear,
        "export" => ShellCommand::Export((!rest.is_empty()).then(|| PathBuf::from(rest))),
        "status" => ShellCommand::Status,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => anyhow::bail!("unknown command \"{other}\"; type `help`"),
    };
    Ok(command)
}

/// `y`/`yes` confirm; anything else, including a blank line, declines.
pub(crate) fn is_confirmation(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
#[path = "command_test.rs"]
mod tests;
