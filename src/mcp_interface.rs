//! Text surface shared by the terminal front end and the MCP server.
//!
//! Both front ends keep their own [`FilterSelection`] (the widget state) and
//! drive a [`CatalogSession`] through the functions in this module, which
//! return ready-to-print text.

use crate::errors::SelectionError;
use crate::render::TextCardSink;
use crate::session::{CatalogSession, FilterOutcome};
use schema::{Category, FilterSelection, GenderFilter};

/// A parsed line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(String),
    Filter(Category, Vec<String>),
    More,
    Reset,
    Show(String),
    Options(Category),
    Status,
    Help,
    Quit,
}

/// Response to one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResponse {
    pub text: String,
    pub quit: bool,
}

impl CommandResponse {
    fn text(text: String) -> Self {
        Self { text, quit: false }
    }
}

pub fn help_text() -> &'static str {
    "Commands:\n\
     \x20 search <text>        filter by name or pokedex number (empty clears)\n\
     \x20 type <value>...      keep Pokemon of ANY listed type (no values clears)\n\
     \x20 color <value>...     keep Pokemon of ANY listed color (no values clears)\n\
     \x20 gender <value|all>   keep Pokemon with the given gender\n\
     \x20 more                 show the next batch\n\
     \x20 reset                clear every filter\n\
     \x20 show <name|number>   show details of one Pokemon\n\
     \x20 options <category>   list values for type, color or gender\n\
     \x20 status               show the current filters\n\
     \x20 quit                 exit"
}

pub fn parse_command(line: &str) -> Result<Command, SelectionError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_lowercase().as_str() {
        "search" | "find" => Ok(Command::Search(rest.to_string())),
        "type" | "types" => Ok(Command::Filter(Category::Type, split_values(rest))),
        "color" | "colors" => Ok(Command::Filter(Category::Color, split_values(rest))),
        "gender" => Ok(Command::Filter(Category::Gender, split_values(rest))),
        "more" | "next" => Ok(Command::More),
        "reset" | "clear" => Ok(Command::Reset),
        "show" | "lookup" => {
            if rest.is_empty() {
                Err(SelectionError::Usage("show <name|number>"))
            } else {
                Ok(Command::Show(rest.to_string()))
            }
        }
        "options" => parse_category(rest).map(Command::Options),
        "status" => Ok(Command::Status),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(SelectionError::UnknownCommand(other.to_string())),
    }
}

pub fn parse_category(input: &str) -> Result<Category, SelectionError> {
    input
        .trim()
        .parse::<Category>()
        .map_err(|_| SelectionError::UnknownCategory(input.trim().to_string()))
}

fn split_values(input: &str) -> Vec<String> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect()
}

/// Replaces the values of one filter in `selection`.
///
/// Gender is single-choice and cannot be left empty; use "all" to clear it.
pub fn update_selection(
    selection: &mut FilterSelection,
    category: Category,
    values: &[String],
) -> Result<(), SelectionError> {
    match category {
        Category::Type => selection.types = FilterSelection::cleared().with_types(values).types,
        Category::Color => {
            selection.colors = FilterSelection::cleared().with_colors(values).colors
        }
        Category::Gender => match values {
            [] => return Err(SelectionError::MissingValue(category.to_string())),
            [value] => selection.gender = GenderFilter::from_input(value),
            many => return Err(SelectionError::MultipleGenders(many.len())),
        },
    }
    Ok(())
}

/// Runs a filter pass for `selection` and renders its first batch.
pub async fn refresh_results(session: &CatalogSession, selection: &FilterSelection) -> String {
    let mut sink = TextCardSink::new();
    sink.show_loading();
    let (outcome, has_more) = session.show(selection, &mut sink).await;
    finish_pass(session, sink, outcome, has_more)
}

/// Clears every filter and renders the first batch of the full catalog.
pub async fn reset_display(session: &CatalogSession) -> String {
    let mut sink = TextCardSink::new();
    sink.show_loading();
    let (outcome, has_more) = session.reset_filters(&mut sink).await;
    finish_pass(session, sink, outcome, has_more)
}

fn finish_pass(
    session: &CatalogSession,
    mut sink: TextCardSink,
    outcome: FilterOutcome,
    has_more: bool,
) -> String {
    if !outcome.published {
        sink.push_line("(a newer search replaced these results)");
    } else if outcome.matched == 0 {
        sink.push_line("No Pokemon match the current filters.");
    }
    sink.push_line(&progress_line(session, has_more));
    sink.take_output()
}

/// Renders the next batch of the published result.
pub fn load_more_display(session: &CatalogSession) -> String {
    let mut sink = TextCardSink::new();
    let has_more = session.load_more(&mut sink);
    if sink.cards_rendered() == 0 {
        sink.push_line("Nothing more to show.");
    }
    sink.push_line(&progress_line(session, has_more));
    sink.take_output()
}

fn progress_line(session: &CatalogSession, has_more: bool) -> String {
    let (shown, total) = session.progress();
    if has_more {
        format!("Showing {} of {}. Type 'more' for the next batch.", shown, total)
    } else {
        format!("Showing {} of {}.", shown, total)
    }
}

pub fn filter_options_display(session: &CatalogSession, category: Category) -> String {
    let values = session.category_values(category);
    if values.is_empty() {
        return format!("No {} values are available.", category);
    }
    let mut output = format!("Available {} values:\n", category);
    for value in values {
        output.push_str(&format!("  {}\n", value));
    }
    if category == Category::Gender {
        output.push_str("  all\n");
    }
    output
}

pub async fn lookup_pokemon_display(session: &CatalogSession, name_or_id: &str) -> String {
    if name_or_id.trim().is_empty() {
        return "What Pokemon do you want to look up? (e.g., 'pikachu' or '25')".to_string();
    }
    match session.detail(name_or_id).await {
        Ok(detail) => format!("--- Pokemon Details ---\n{}", detail),
        Err(err) => format!("Error: {}", err),
    }
}

pub fn selection_display(selection: &FilterSelection) -> String {
    format!("Current filters: {}", selection)
}

/// Parses and executes one line of input against the session.
pub async fn handle_command(
    session: &CatalogSession,
    selection: &mut FilterSelection,
    line: &str,
) -> CommandResponse {
    let command = match parse_command(line) {
        Ok(command) => command,
        Err(err) => return CommandResponse::text(format!("Error: {}", err)),
    };

    match command {
        Command::Search(query) => {
            selection.query = query;
            CommandResponse::text(refresh_results(session, selection).await)
        }
        Command::Filter(category, values) => {
            if let Err(err) = update_selection(selection, category, &values) {
                return CommandResponse::text(format!("Error: {}", err));
            }
            CommandResponse::text(refresh_results(session, selection).await)
        }
        Command::More => CommandResponse::text(load_more_display(session)),
        Command::Reset => {
            *selection = FilterSelection::cleared();
            CommandResponse::text(reset_display(session).await)
        }
        Command::Show(name) => CommandResponse::text(lookup_pokemon_display(session, &name).await),
        Command::Options(category) => {
            CommandResponse::text(filter_options_display(session, category))
        }
        Command::Status => CommandResponse::text(selection_display(selection)),
        Command::Help => CommandResponse::text(help_text().to_string()),
        Command::Quit => CommandResponse {
            text: "Goodbye!".to_string(),
            quit: true,
        },
    }
}
