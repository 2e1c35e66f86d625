use clap::Args;
use pharmaplus_app::{context::AppContext, domain::promotions::records::PromotionId};

use crate::cli::promotions::storage_error;

#[derive(Debug, Args)]
pub(crate) struct DeletePromotionArgs {
    /// Promotion id
    id: String,
}

pub(crate) fn run(context: &AppContext, args: &DeletePromotionArgs) -> Result<(), String> {
    let id = PromotionId::new(args.id.as_str());

    context.promotions.remove(&id).map_err(storage_error)?;

    println!("promotion_id: {id}");
    println!("deleted: true");

    Ok(())
}
