use clap::Args;
use pharmaplus_app::{
    context::AppContext, domain::promotions::records::PromotionId, format::format_file_size,
};

use crate::cli::{
    local_now,
    promotions::{discount_label, storage_error},
};

#[derive(Debug, Args)]
pub(crate) struct ShowPromotionArgs {
    /// Promotion id
    id: String,
}

pub(crate) fn run(context: &AppContext, args: &ShowPromotionArgs) -> Result<(), String> {
    let id = PromotionId::new(args.id.as_str());

    let promotion = context
        .promotions
        .find_by_id(&id)
        .map_err(storage_error)?
        .ok_or_else(|| format!("promotion {id} not found"))?;

    let now = local_now();

    println!("promotion_id: {}", promotion.id);
    println!("name: {}", promotion.name);
    println!("description: {}", promotion.description);
    println!("status: {}", promotion.status(now));
    println!("discount_type: {}", promotion.discount_type.as_str());
    println!("discount: {}", discount_label(&promotion));
    println!("apply_to: {}", promotion.apply_to.as_str());

    for code in promotion.product_codes() {
        match context.products.get_product(code) {
            Some(product) => println!("product: {code} ({})", product.name),
            None => println!("product: {code}"),
        }
    }

    println!("min_cart_qty: {}", promotion.min_cart_qty);
    println!("max_uses_per_user: {}", promotion.max_uses_per_user);
    println!("total_uses_limit: {}", promotion.total_uses_limit);
    println!("start: {}", promotion.start_datetime);
    println!("end: {}", promotion.end_datetime);
    println!("progress: {}%", promotion.progress_percentage(now));
    println!("days_active: {}", promotion.days_active(now));
    println!("time_remaining: {}", promotion.time_remaining(now));

    if let Some(promotion_type) = promotion.promotion_type {
        println!("promotion_type: {}", promotion_type.as_str());
    }

    if let Some(partner_name) = &promotion.partner_name {
        println!("partner_name: {partner_name}");
    }

    if let Some(claimed) = promotion.claimed {
        println!("claimed: {claimed}");
    }

    for file in &promotion.files {
        println!("file: {} ({})", file.name, format_file_size(file.size));
    }

    if let Some(file) = &promotion.terms_file {
        println!("terms_file: {} ({})", file.name, format_file_size(file.size));
    }

    if !promotion.terms_and_conditions.is_empty() {
        println!("terms_and_conditions: {}", promotion.terms_and_conditions);
    }

    if !promotion.rules.is_empty() {
        println!("rules: {}", promotion.rules);
    }

    println!("created_at: {}", promotion.created_at);

    Ok(())
}
