use clap::{Parser, Subcommand};
use pharmaplus_app::{config::AppConfig, context::AppContext};

mod dashboard;
mod products;
mod promotions;

#[derive(Debug, Parser)]
#[command(name = "pharmaplus-app", about = "PharmaPlus promotions CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) config: AppConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Promotions(promotions::PromotionsCommand),
    Products(products::ProductsCommand),
    Dashboard,
}

impl Cli {
    pub(crate) fn run(self) -> Result<(), String> {
        let context = AppContext::from_config(&self.config.storage);

        match self.command {
            Commands::Promotions(command) => promotions::run(&context, command),
            Commands::Products(command) => products::run(&context, command),
            Commands::Dashboard => dashboard::run(&context),
        }
    }
}

/// Wall-clock time the dashboard compares schedules against.
fn local_now() -> jiff::civil::DateTime {
    jiff::Zoned::now().datetime()
}
