use pharmaplus_app::{context::AppContext, domain::dashboard::summarize};

use crate::cli::local_now;

pub(crate) fn run(context: &AppContext) -> Result<(), String> {
    let summary = summarize(context.promotions.as_ref(), local_now())
        .map_err(|error| format!("failed to build dashboard: {error}"))?;

    println!("total: {}", summary.total);
    println!("active: {}", summary.active);
    println!("scheduled: {}", summary.scheduled);
    println!("expired: {}", summary.expired);
    println!("inactive: {}", summary.inactive);
    println!("product_promotions: {}", summary.product_promotions);
    println!("bundle_promotions: {}", summary.bundle_promotions);
    println!("partner_promotions: {}", summary.partner_promotions);
    println!("total_claimed: {}", summary.total_claimed);

    let mut per_product: Vec<_> = summary.promotions_per_product.into_iter().collect();
    per_product.sort_unstable();

    for (code, count) in per_product {
        match context.products.get_product(&code) {
            Some(product) => println!("product: {code} {} ({count})", product.name),
            None => println!("product: {code} ({count})"),
        }
    }

    Ok(())
}
