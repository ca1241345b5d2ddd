use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use fdash::core::filter::{FilterState, Period, SortOrder, TypeFilter};
use fdash::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl TryFrom<Commands> for fdash::AppCommand {
    type Error = anyhow::Error;

    fn try_from(cmd: Commands) -> Result<fdash::AppCommand> {
        match cmd {
            Commands::Summary {
                period,
                type_filter,
                order,
                categories,
            } => Ok(fdash::AppCommand::Summary(FilterState {
                period: period.parse::<Period>()?,
                type_filter: type_filter.parse::<TypeFilter>()?,
                order: order.parse::<SortOrder>()?,
                selected_categories: categories.into_iter().collect(),
            })),
            Commands::Categories {
                search,
                order,
                pick,
            } => Ok(fdash::AppCommand::Categories {
                search,
                order: order.parse::<SortOrder>()?,
                pick,
            }),
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display the dashboard summary
    Summary {
        /// Time window: 3m, 6m, year, lastyear or all
        #[arg(long, default_value = "all")]
        period: String,

        /// Series to keep: all, income or expense
        #[arg(long = "type", value_name = "TYPE", default_value = "all")]
        type_filter: String,

        /// Category order: none, high, low, az or za
        #[arg(long, default_value = "none")]
        order: String,

        /// Only show these categories (comma separated)
        #[arg(long, value_delimiter = ',')]
        categories: Vec<String>,
    },
    /// Browse spending categories
    Categories {
        /// Show only categories whose name contains this text
        #[arg(long)]
        search: Option<String>,

        /// Category order: none, high, low, az or za
        #[arg(long, default_value = "none")]
        order: String,

        /// Pick the categories to show interactively
        #[arg(long)]
        pick: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => fdash::cli::setup::setup(),
        Some(cmd) => match fdash::AppCommand::try_from(cmd) {
            Ok(command) => fdash::run_command(command, cli.config_path.as_deref()).await,
            Err(e) => Err(e),
        },
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
