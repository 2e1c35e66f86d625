use clap::{Args, Subcommand};
use pharmaplus_app::context::AppContext;

#[derive(Debug, Args)]
pub(crate) struct ProductsCommand {
    #[command(subcommand)]
    command: ProductsSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProductsSubcommand {
    /// List the whole catalog
    List,

    /// Search the catalog by name or code
    Search(SearchProductsArgs),
}

#[derive(Debug, Args)]
struct SearchProductsArgs {
    query: String,

    /// Product code to leave out of the results; repeat for several
    #[arg(long = "exclude")]
    excluded: Vec<String>,
}

pub(crate) fn run(context: &AppContext, command: ProductsCommand) -> Result<(), String> {
    match command.command {
        ProductsSubcommand::List => {
            for product in context.products.list_products() {
                println!("{}: {}", product.code, product.name);
            }

            Ok(())
        }
        ProductsSubcommand::Search(args) => {
            let products = context.products.search_products(&args.query, &args.excluded);

            if products.is_empty() {
                println!("no products found");
            }

            for product in products {
                println!("{}: {}", product.code, product.name);
            }

            Ok(())
        }
    }
}
