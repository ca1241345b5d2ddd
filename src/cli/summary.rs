use super::ui;
use crate::core::analytics::{self, DashboardView};
use crate::core::dashboard::{self, DashboardProvider};
use crate::core::filter::FilterState;
use anyhow::Result;
use comfy_table::Cell;

impl DashboardView {
    fn counts_section(&self) -> String {
        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Sheets"),
            ui::header_cell("Categories"),
            ui::header_cell("Transactions"),
            ui::header_cell("Users"),
        ]);
        table.add_row(vec![
            Cell::new(self.counts.sheets),
            Cell::new(self.counts.categories),
            Cell::new(self.counts.transactions),
            Cell::new(self.counts.users),
        ]);
        table.to_string()
    }

    fn monthly_section(&self, currency: &str) -> String {
        if self.monthly.is_empty() {
            return ui::style_text(
                "No monthly data for the selected filters.",
                ui::StyleType::Subtle,
            );
        }

        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Month"),
            ui::header_cell(&format!("Income ({currency})")),
            ui::header_cell(&format!("Expense ({currency})")),
        ]);
        for point in &self.monthly {
            table.add_row(vec![
                Cell::new(&point.month),
                ui::number_cell(point.income),
                ui::number_cell(point.expense),
            ]);
        }
        table.to_string()
    }

    fn balance_section(&self, currency: &str) -> String {
        if self.balance.is_empty() {
            return ui::style_text(
                "No balance data for the selected filters.",
                ui::StyleType::Subtle,
            );
        }

        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Month"),
            ui::header_cell(&format!("Balance ({currency})")),
        ]);
        for point in &self.balance {
            table.add_row(vec![Cell::new(&point.month), ui::balance_cell(point.balance)]);
        }
        table.to_string()
    }

    fn categories_section(&self, currency: &str) -> String {
        if self.categories.is_empty() {
            return ui::style_text(
                "No categories for the selected filters.",
                ui::StyleType::Subtle,
            );
        }

        let shown_total: f64 = self.categories.iter().map(|category| category.total).sum();

        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Category"),
            ui::header_cell(&format!("Total ({currency})")),
            ui::header_cell("Share"),
        ]);
        for category in &self.categories {
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
        table.to_string()
    }

    fn totals_section(&self, currency: &str) -> String {
        let balance_style = if self.totals.current_balance >= 0.0 {
            ui::StyleType::TotalValue
        } else {
            ui::StyleType::Error
        };
        let savings_style = if self.totals.average_savings >= 0.0 {
            ui::StyleType::TotalValue
        } else {
            ui::StyleType::Error
        };

        format!(
            "{} {}\n{} {}\n{} {}\n{} {}",
            ui::style_text(
                &format!("Total Income ({currency}):"),
                ui::StyleType::TotalLabel
            ),
            ui::style_text(
                &format!("{:.2}", self.totals.total_income),
                ui::StyleType::TotalValue
            ),
            ui::style_text(
                &format!("Total Expense ({currency}):"),
                ui::StyleType::TotalLabel
            ),
            ui::style_text(
                &format!("{:.2}", self.totals.total_expense),
                ui::StyleType::Error
            ),
            ui::style_text(
                &format!("Current Balance ({currency}):"),
                ui::StyleType::TotalLabel
            ),
            ui::style_text(
                &format!("{:.2}", self.totals.current_balance),
                balance_style
            ),
            ui::style_text(
                &format!("Average Savings ({currency}):"),
                ui::StyleType::TotalLabel
            ),
            ui::style_text(
                &format!("{:.2}", self.totals.average_savings),
                savings_style
            ),
        )
    }

    /// Renders the whole dashboard as a sequence of styled sections.
    pub fn display_as_table(&self, currency: &str) -> String {
        let mut output = format!(
            "{}\n\n",
            ui::style_text("Dashboard", ui::StyleType::Title)
        );

        output.push_str(&self.counts_section());
        output.push_str("\n\n");
        output.push_str(&format!(
            "{}\n{}",
            ui::style_text("Monthly income and expense", ui::StyleType::Title),
            self.monthly_section(currency)
        ));
        output.push_str("\n\n");
        output.push_str(&format!(
            "{}\n{}",
            ui::style_text("Balance evolution", ui::StyleType::Title),
            self.balance_section(currency)
        ));
        output.push_str("\n\n");
        output.push_str(&format!(
            "{}\n{}",
            ui::style_text("Spending by category", ui::StyleType::Title),
            self.categories_section(currency)
        ));
        output.push_str("\n\n");
        output.push_str(&self.totals_section(currency));

        output
    }
}

/// Describes the filters applied to the view, or `None` when everything is
/// at its default.
fn active_filters_line(filters: &FilterState) -> Option<String> {
    if *filters == FilterState::default() {
        return None;
    }

    let mut parts = vec![
        format!("period: {}", filters.period),
        format!("type: {}", filters.type_filter),
        format!("order: {}", filters.order),
    ];
    if !filters.selected_categories.is_empty() {
        let names: Vec<&str> = filters
            .selected_categories
            .iter()
            .map(String::as_str)
            .collect();
        parts.push(format!("categories: {}", names.join(", ")));
    }
    Some(format!("Filters | {}", parts.join(" | ")))
}

pub async fn run(
    provider: &(dyn DashboardProvider + Send + Sync),
    filters: &FilterState,
    currency: &str,
) -> Result<()> {
    let pb = ui::new_progress_bar(4, true);
    pb.set_message("Loading dashboard...");

    let result = dashboard::load_dashboard(provider, &|| pb.inc(1)).await;
    pb.finish_and_clear();
    let data = result?;

    let view = analytics::build_view(&data, filters);

    if let Some(line) = active_filters_line(filters) {
        println!("{}", ui::style_text(&line, ui::StyleType::Subtle));
    }
    println!("{}", view.display_as_table(currency));

    Ok(())
}
