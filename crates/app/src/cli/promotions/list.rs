use clap::Args;
use pharmaplus_app::{context::AppContext, domain::promotions::status::PromotionStatus};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

use crate::cli::{
    local_now,
    promotions::{StatusArg, discount_label, storage_error},
};

#[derive(Debug, Args)]
pub(crate) struct ListPromotionsArgs {
    /// Only show promotions in this status
    #[arg(long, value_enum)]
    status: Option<StatusArg>,
}

pub(crate) fn run(context: &AppContext, args: &ListPromotionsArgs) -> Result<(), String> {
    let now = local_now();
    let wanted = args.status.map(PromotionStatus::from);

    let promotions = context.promotions.load_all().map_err(storage_error)?;

    let mut builder = Builder::default();

    builder.push_record([
        "ID", "Name", "Applies To", "Discount", "Status", "Start", "End", "Progress",
    ]);

    let mut rows = 0_usize;

    for promotion in &promotions {
        let status = promotion.status(now);

        if wanted.is_some_and(|wanted| wanted != status) {
            continue;
        }

        builder.push_record([
            promotion.id.to_string(),
            promotion.name.clone(),
            promotion.apply_to.as_str().to_string(),
            discount_label(promotion),
            status.to_string(),
            promotion.start_datetime.strftime("%Y-%m-%d %H:%M").to_string(),
            promotion.end_datetime.strftime("%Y-%m-%d %H:%M").to_string(),
            format!("{}%", promotion.progress_percentage(now)),
        ]);

        rows += 1;
    }

    if rows == 0 {
        println!("no promotions found");

        return Ok(());
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(3..4), Alignment::right());
    table.modify(Columns::new(7..8), Alignment::right());

    println!("{table}");

    Ok(())
}
