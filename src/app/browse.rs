//! Commands of the interactive listing prompt
//!
//! Each input line is parsed into a [`BrowseCommand`] and applied to a
//! listing. Table listings receive the intents through the same
//! [`TableHandler`] calls a graphical surface would make.

use crate::app::controller::ListingController;
use crate::app::pages::{RocketTab, RocketsPage};
use crate::app::router::Route;
use crate::core::record::Record;
use crate::core::table::{Column, TableHandler};

pub const HELP: &str = "\
Commands:
  /TEXT | search TEXT   filter the listing (search with no text clears it)
  sort COLUMN           sort by a column; again to flip the direction
  tab all|active|inactive
  N | open N            open the N-th entry
  theme                 switch between light and dark
  help                  show this help
  q | quit              leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Search(String),
    Sort(String),
    Tab(String),
    Open(usize),
    Theme,
    Help,
    Quit,
}

impl BrowseCommand {
    /// Parse one input line; `None` for blank lines
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        if let Some(query) = line.strip_prefix('/') {
            return Ok(Some(BrowseCommand::Search(query.trim().to_string())));
        }
        if let Ok(position) = line.parse::<usize>() {
            return Ok(Some(BrowseCommand::Open(position)));
        }

        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        let command = match word.to_ascii_lowercase().as_str() {
            "search" | "s" => BrowseCommand::Search(rest.to_string()),
            "sort" if !rest.is_empty() => BrowseCommand::Sort(rest.to_string()),
            "tab" if !rest.is_empty() => BrowseCommand::Tab(rest.to_string()),
            "open" | "o" => BrowseCommand::Open(
                rest.parse()
                    .map_err(|_| format!("'{}' is not a row number", rest))?,
            ),
            "theme" | "t" => BrowseCommand::Theme,
            "help" | "h" | "?" => BrowseCommand::Help,
            "q" | "quit" | "exit" => BrowseCommand::Quit,
            _ => return Err(format!("Unknown command '{}'; type help", line)),
        };
        Ok(Some(command))
    }
}

/// What the prompt should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Redraw,
    /// Flip the color scheme, then redraw
    ToggleTheme,
    Navigate(Route),
    Message(String),
    Quit,
}

/// Apply a command to a table listing
pub fn apply_to_table<R: Record>(
    command: BrowseCommand,
    controller: &mut ListingController<R>,
    columns: &[Column<R>],
) -> Step {
    match command {
        BrowseCommand::Search(query) => {
            controller.on_search_change(&query);
            Step::Redraw
        }
        BrowseCommand::Sort(name) => {
            let Some(column) = columns
                .iter()
                .find(|c| c.key == name || c.label.eq_ignore_ascii_case(&name))
            else {
                return Step::Message(format!("No column named '{}'", name));
            };
            let snapshot = controller.snapshot();
            snapshot.frame("", columns).click_header(&column.key, controller);
            Step::Redraw
        }
        BrowseCommand::Open(position) => {
            let snapshot = controller.snapshot();
            let frame = snapshot.frame("", columns);
            if position == 0 || !frame.click_row(position - 1, controller) {
                return Step::Message(format!("No row {}", position));
            }
            match controller.take_navigation() {
                Some(route) => Step::Navigate(route),
                None => Step::Redraw,
            }
        }
        BrowseCommand::Tab(_) => Step::Message("This listing has no tabs".to_string()),
        BrowseCommand::Theme => Step::ToggleTheme,
        BrowseCommand::Help => Step::Message(HELP.to_string()),
        BrowseCommand::Quit => Step::Quit,
    }
}

/// Apply a command to the rockets listing
pub fn apply_to_rockets(command: BrowseCommand, page: &mut RocketsPage) -> Step {
    match command {
        BrowseCommand::Tab(name) => match name.parse::<RocketTab>() {
            Ok(tab) => {
                page.select_tab(tab);
                Step::Redraw
            }
            Err(message) => Step::Message(message),
        },
        BrowseCommand::Open(position) => {
            match position.checked_sub(1).and_then(|i| page.visible().nth(i)) {
                Some(rocket) => Step::Navigate(Route::RocketDetail(rocket.id.clone())),
                None => Step::Message(format!("No rocket {}", position)),
            }
        }
        BrowseCommand::Search(_) | BrowseCommand::Sort(_) => {
            Step::Message("Use tab to filter rockets".to_string())
        }
        BrowseCommand::Theme => Step::ToggleTheme,
        BrowseCommand::Help => Step::Message(HELP.to_string()),
        BrowseCommand::Quit => Step::Quit,
    }
}
