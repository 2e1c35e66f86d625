use clap::Args;
use jiff::civil::DateTime;
use pharmaplus_app::{
    context::AppContext,
    domain::promotions::{
        records::{
            ApplyTo, FileMetadata, ProductCodes, PromotionId, PromotionRecord, PromotionType,
        },
        validation::validate_update,
    },
};

use crate::cli::promotions::{
    ApplyToArg, DiscountTypeArg, PromotionTypeArg, parse_file, storage_error,
};

#[derive(Debug, Args)]
pub(crate) struct UpdatePromotionArgs {
    /// Promotion id
    id: String,

    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    description: Option<String>,

    #[arg(long, value_enum)]
    discount_type: Option<DiscountTypeArg>,

    #[arg(long)]
    discount_value: Option<f64>,

    /// Target individual products or a bundle
    #[arg(long, value_enum)]
    apply_to: Option<ApplyToArg>,

    /// Product code; replaces the current selection, repeat for several
    #[arg(long = "product")]
    products: Vec<String>,

    /// New start, as YYYY-MM-DDTHH:MM local time
    #[arg(long)]
    start: Option<DateTime>,

    /// New end, as YYYY-MM-DDTHH:MM local time
    #[arg(long)]
    end: Option<DateTime>,

    #[arg(long)]
    min_cart_qty: Option<u32>,

    #[arg(long)]
    max_uses_per_user: Option<u32>,

    #[arg(long)]
    total_uses_limit: Option<u32>,

    /// Switch the promotion on or off
    #[arg(long)]
    active: Option<bool>,

    /// Terms and conditions text
    #[arg(long)]
    terms: Option<String>,

    /// Promotion rules text
    #[arg(long)]
    rules: Option<String>,

    #[arg(long, value_enum)]
    promotion_type: Option<PromotionTypeArg>,

    /// Partner running the promotion
    #[arg(long)]
    partner_name: Option<String>,

    /// File to attach as name:size:mime; repeat for several files
    #[arg(long = "file", value_parser = parse_file)]
    files: Vec<FileMetadata>,

    /// Name of an attached file to remove; repeat for several files
    #[arg(long = "remove-file")]
    removed_files: Vec<String>,

    /// Terms and conditions document as name:size:mime
    #[arg(long, value_parser = parse_file, conflicts_with = "clear_terms_file")]
    terms_file: Option<FileMetadata>,

    /// Drop the terms and conditions document
    #[arg(long)]
    clear_terms_file: bool,
}

pub(crate) fn run(context: &AppContext, args: UpdatePromotionArgs) -> Result<(), String> {
    let id = PromotionId::new(args.id.as_str());

    if let Some(code) = args
        .products
        .iter()
        .find(|code| context.products.get_product(code).is_none())
    {
        return Err(format!("unknown product code: {code}"));
    }

    let mut promotion = context
        .promotions
        .find_by_id(&id)
        .map_err(storage_error)?
        .ok_or_else(|| format!("promotion {id} not found"))?;

    apply_changes(args, &mut promotion);

    validate_update(&promotion).map_err(|errors| format!("invalid promotion: {errors}"))?;

    context.promotions.update(promotion).map_err(storage_error)?;

    println!("promotion_id: {id}");
    println!("updated: true");

    Ok(())
}

/// Apply the given flags to a stored promotion, leaving everything else as is.
fn apply_changes(args: UpdatePromotionArgs, promotion: &mut PromotionRecord) {
    if let Some(name) = args.name {
        promotion.name = name;
    }

    if let Some(description) = args.description {
        promotion.description = description;
    }

    if let Some(discount_type) = args.discount_type {
        promotion.discount_type = discount_type.into();
    }

    if let Some(discount_value) = args.discount_value {
        promotion.discount_value = discount_value;
    }

    if let Some(apply_to) = args.apply_to {
        promotion.apply_to = apply_to.into();
    }

    if !args.products.is_empty() {
        let codes: ProductCodes = args.products.into_iter().collect();

        match promotion.apply_to {
            ApplyTo::Product => promotion.target_identifiers = codes,
            ApplyTo::Bundle => promotion.bundled_product_codes = codes,
        }
    }

    if let Some(start) = args.start {
        promotion.start_datetime = start;
    }

    if let Some(end) = args.end {
        promotion.end_datetime = end;
    }

    if let Some(min_cart_qty) = args.min_cart_qty {
        promotion.min_cart_qty = min_cart_qty;
    }

    if let Some(max_uses_per_user) = args.max_uses_per_user {
        promotion.max_uses_per_user = max_uses_per_user;
    }

    if let Some(total_uses_limit) = args.total_uses_limit {
        promotion.total_uses_limit = total_uses_limit;
    }

    if let Some(active) = args.active {
        promotion.is_active = active;
    }

    if let Some(terms) = args.terms {
        promotion.terms_and_conditions = terms;
    }

    if let Some(rules) = args.rules {
        promotion.rules = rules;
    }

    if let Some(promotion_type) = args.promotion_type {
        promotion.promotion_type = Some(promotion_type.into());
    }

    if let Some(partner_name) = args.partner_name {
        promotion.partner_name = Some(partner_name);
    }

    if promotion.promotion_type == Some(PromotionType::Partner) && promotion.partner_name.is_none()
    {
        promotion.partner_name = Some(String::new());
    }

    promotion
        .files
        .retain(|file| !args.removed_files.contains(&file.name));
    promotion.files.extend(args.files);

    if args.clear_terms_file {
        promotion.terms_file = None;
    } else if let Some(terms_file) = args.terms_file {
        promotion.terms_file = Some(terms_file);
    }
}
