use super::ui;
use crate::core::dashboard::{CategoryTotal, DashboardProvider};
use crate::core::filter::{self, SortOrder};
use crate::core::selection::CategorySelection;
use anyhow::{Context, Result};
use comfy_table::Cell;
use std::io::{self, BufRead, Write};

/// One line of picker input, already parsed.
#[derive(Debug, Clone, PartialEq)]
enum PickCommand {
    Toggle(usize),
    SelectAll,
    Clear,
    Search(String),
    Done,
}

impl PickCommand {
    /// Parses one line of picker input. Numbers are 1-based positions in the
    /// currently visible list.
    fn parse(input: &str) -> Option<PickCommand> {
        let trimmed = input.trim();
        if let Some(search) = trimmed.strip_prefix('/') {
            return Some(PickCommand::Search(search.trim().to_string()));
        }
        match trimmed {
            "" | "q" => Some(PickCommand::Done),
            "a" => Some(PickCommand::SelectAll),
            "n" => Some(PickCommand::Clear),
            _ => trimmed
                .parse::<usize>()
                .ok()
                .filter(|position| *position >= 1)
                .map(PickCommand::Toggle),
        }
    }
}

/// Applies a picker command to the selection. Out-of-range toggles leave
/// the selection unchanged.
fn apply_command(
    selection: &CategorySelection,
    categories: &[CategoryTotal],
    command: &PickCommand,
) -> CategorySelection {
    match command {
        PickCommand::Toggle(position) => match selection.visible(categories).get(position - 1) {
            Some(category) => selection.toggle(&category.name),
            None => selection.clone(),
        },
        PickCommand::SelectAll => {
            selection.select_all(categories.iter().map(|category| category.name.as_str()))
        }
        PickCommand::Clear => selection.clear(),
        PickCommand::Search(search) => selection.with_search(search),
        PickCommand::Done => selection.clone(),
    }
}

fn print_picker(categories: &[CategoryTotal], selection: &CategorySelection) {
    let visible = selection.visible(categories);

    println!();
    if !selection.search().is_empty() {
        println!(
            "Search '{}' shows {} of {} categories.",
            selection.search(),
            visible.len(),
            categories.len()
        );
    }
    if visible.is_empty() {
        println!("  No category matches the search.");
    }
    for (position, category) in visible.iter().enumerate() {
        let mark = if selection.is_selected(&category.name) {
            "x"
        } else {
            " "
        };
        println!(
            "  [{mark}] {:>2} {} ({:.2})",
            position + 1,
            category.name,
            category.total
        );
    }

    let picked = selection.selected().len();
    if picked == 0 {
        println!("  Picked: none, every category will be shown.");
    } else {
        println!("  Picked: {picked}");
    }
}

fn read_line(prompt: &str) -> Result<String> {
    print!("{prompt}");
    io::stdout().flush().context("Failed to flush stdout")?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read picker input")?;
    Ok(line)
}

fn pick_loop(
    categories: &[CategoryTotal],
    mut selection: CategorySelection,
) -> Result<CategorySelection> {
    println!(
        "Pick categories: a number toggles, 'a' selects all, 'n' clears, '/text' searches, Enter finishes."
    );
    loop {
        print_picker(categories, &selection);
        let input = read_line("> ")?;
        match PickCommand::parse(&input) {
            Some(PickCommand::Done) => return Ok(selection),
            Some(command) => selection = apply_command(&selection, categories, &command),
            None => println!("  Unrecognized input. Use a number, 'a', 'n', '/text' or Enter."),
        }
    }
}

fn display_categories(categories: &[CategoryTotal], currency: &str) -> String {
    let shown_total: f64 = categories.iter().map(|category| category.total).sum();

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Category"),
        ui::header_cell(&format!("Total ({currency})")),
        ui::header_cell("Share"),
    ]);
    for category in categories {
        let share = if shown_total != 0.0 {
            category.total / shown_total * 100.0
        } else {
            0.0
        };
        table.add_row(vec![
            Cell::new(&category.name),
            ui::number_cell(category.total),
            ui::share_cell(share),
        ]);
    }

    format!(
        "{}\n\n{} {}",
        table,
        ui::style_text(&format!("Total ({currency}):"), ui::StyleType::TotalLabel),
        ui::style_text(&format!("{shown_total:.2}"), ui::StyleType::TotalValue)
    )
}

pub async fn run(
    provider: &(dyn DashboardProvider + Send + Sync),
    search: Option<&str>,
    order: SortOrder,
    pick: bool,
    currency: &str,
) -> Result<()> {
    let pb = ui::new_progress_bar(1, true);
    pb.set_message("Loading categories...");

    let result = provider.fetch_categories().await;
    pb.inc(1);
    pb.finish_and_clear();
    let categories = result?;

    if categories.is_empty() {
        println!("No categories found.");
        return Ok(());
    }

    let mut selection = CategorySelection::new();
    if let Some(search) = search {
        selection = selection.with_search(search);
    }

    let shown: Vec<CategoryTotal> = if pick {
        selection = pick_loop(&categories, selection)?;
        ui::print_separator();
        filter::filter_categories(&categories, selection.selected())
    } else {
        selection
            .visible(&categories)
            .into_iter()
            .cloned()
            .collect()
    };

    if shown.is_empty() {
        println!("No categories match the current search or selection.");
        return Ok(());
    }

    let sorted = filter::sort_categories(&shown, order);
    println!("{}", display_categories(&sorted, currency));

    Ok(())
}
