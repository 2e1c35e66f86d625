use clap::Args;
use jiff::civil::DateTime;
use pharmaplus_app::{
    context::AppContext,
    domain::promotions::{
        data::{
            DEFAULT_MAX_USES_PER_USER, DEFAULT_MIN_CART_QTY, DEFAULT_TOTAL_USES_LIMIT,
            NewPromotion,
        },
        records::{ApplyTo, FileMetadata, PromotionType},
        validation::validate_new,
    },
};

use crate::cli::{
    local_now,
    promotions::{ApplyToArg, DiscountTypeArg, PromotionTypeArg, parse_file, storage_error},
};

#[derive(Debug, Args)]
pub(crate) struct CreatePromotionArgs {
    /// Promotion name
    #[arg(long)]
    name: String,

    /// Promotion description
    #[arg(long)]
    description: String,

    /// How the discount value is applied
    #[arg(long, value_enum, default_value_t = DiscountTypeArg::Percentage)]
    discount_type: DiscountTypeArg,

    /// Percentage or fixed amount
    #[arg(long)]
    discount_value: f64,

    /// Target individual products or a bundle
    #[arg(long, value_enum, default_value_t = ApplyToArg::Product)]
    apply_to: ApplyToArg,

    /// Product code to include; repeat for several products
    #[arg(long = "product")]
    products: Vec<String>,

    /// Start, as YYYY-MM-DDTHH:MM local time
    #[arg(long)]
    start: DateTime,

    /// End, as YYYY-MM-DDTHH:MM local time
    #[arg(long)]
    end: DateTime,

    #[arg(long, default_value_t = DEFAULT_MIN_CART_QTY)]
    min_cart_qty: u32,

    #[arg(long, default_value_t = DEFAULT_MAX_USES_PER_USER)]
    max_uses_per_user: u32,

    #[arg(long, default_value_t = DEFAULT_TOTAL_USES_LIMIT)]
    total_uses_limit: u32,

    /// Create the promotion switched off
    #[arg(long)]
    inactive: bool,

    #[arg(long, value_enum)]
    promotion_type: Option<PromotionTypeArg>,

    /// Partner running the promotion
    #[arg(long)]
    partner_name: Option<String>,

    /// Terms and conditions text
    #[arg(long, default_value = "")]
    terms: String,

    /// Promotion rules text
    #[arg(long, default_value = "")]
    rules: String,

    /// Attached file as name:size:mime; repeat for several files
    #[arg(long = "file", value_parser = parse_file)]
    files: Vec<FileMetadata>,

    /// Terms and conditions document as name:size:mime
    #[arg(long, value_parser = parse_file)]
    terms_file: Option<FileMetadata>,
}

pub(crate) fn run(context: &AppContext, args: CreatePromotionArgs) -> Result<(), String> {
    if let Some(code) = args
        .products
        .iter()
        .find(|code| context.products.get_product(code).is_none())
    {
        return Err(format!("unknown product code: {code}"));
    }

    let promotion = new_promotion(args);

    validate_new(&promotion, local_now())
        .map_err(|errors| format!("invalid promotion: {errors}"))?;

    let promotion = context.promotions.save(promotion).map_err(storage_error)?;

    println!("promotion_id: {}", promotion.id);
    println!("name: {}", promotion.name);
    println!("created_at: {}", promotion.created_at);

    Ok(())
}

fn new_promotion(args: CreatePromotionArgs) -> NewPromotion {
    let mut promotion = NewPromotion::with_defaults(args.name, args.start);

    let apply_to = ApplyTo::from(args.apply_to);
    let promotion_type = args.promotion_type.map(PromotionType::from);

    match apply_to {
        ApplyTo::Product => promotion.target_identifiers = args.products.into_iter().collect(),
        ApplyTo::Bundle => promotion.bundled_product_codes = args.products.into_iter().collect(),
    }

    let partner_name = match promotion_type {
        Some(PromotionType::Partner) => Some(args.partner_name.unwrap_or_default()),
        Some(PromotionType::Pharmaplus) | None => args.partner_name,
    };

    NewPromotion {
        description: args.description,
        discount_type: args.discount_type.into(),
        discount_value: args.discount_value,
        apply_to,
        end_datetime: args.end,
        min_cart_qty: args.min_cart_qty,
        max_uses_per_user: args.max_uses_per_user,
        total_uses_limit: args.total_uses_limit,
        is_active: !args.inactive,
        terms_and_conditions: args.terms,
        rules: args.rules,
        promotion_type,
        partner_name,
        files: args.files,
        terms_file: args.terms_file,
        ..promotion
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use jiff::civil::date;
    use pharmaplus_app::domain::promotions::records::DiscountType;
    use testresult::TestResult;

    use super::*;

    #[derive(Debug, Parser)]
    struct CreateCli {
        #[command(flatten)]
        args: CreatePromotionArgs,
    }

    fn parse(extra: &[&str]) -> Result<NewPromotion, clap::Error> {
        let base = [
            "create",
            "--name",
            "Cold season",
            "--description",
            "Cough syrup bundle",
            "--discount-value",
            "50",
            "--start",
            "2030-01-01T09:00",
            "--end",
            "2030-02-01T09:00",
        ];

        let cli = CreateCli::try_parse_from(base.iter().chain(extra).copied())?;

        Ok(new_promotion(cli.args))
    }

    #[test]
    fn defaults_match_the_create_form() -> TestResult {
        let promotion = parse(&["--product", "A0001"])?;

        assert_eq!(promotion.discount_type, DiscountType::Percentage);
        assert_eq!(promotion.apply_to, ApplyTo::Product);
        assert_eq!(promotion.target_identifiers.as_slice(), ["A0001".to_string()]);
        assert!(promotion.bundled_product_codes.is_empty());
        assert_eq!(promotion.min_cart_qty, DEFAULT_MIN_CART_QTY);
        assert_eq!(promotion.start_datetime, date(2030, 1, 1).at(9, 0, 0, 0));
        assert_eq!(promotion.end_datetime, date(2030, 2, 1).at(9, 0, 0, 0));
        assert!(promotion.is_active);
        assert!(promotion.files.is_empty());
        assert_eq!(promotion.terms_file, None);

        Ok(())
    }

    #[test]
    fn bundle_products_go_to_bundled_codes() -> TestResult {
        let promotion = parse(&[
            "--apply-to",
            "bundle",
            "--discount-type",
            "fixed",
            "--product",
            "C0002",
            "--product",
            "D0002",
        ])?;

        assert_eq!(promotion.apply_to, ApplyTo::Bundle);
        assert_eq!(promotion.discount_type, DiscountType::Fixed);
        assert!(promotion.target_identifiers.is_empty());
        assert_eq!(promotion.bundled_product_codes.len(), 2);

        Ok(())
    }

    #[test]
    fn files_and_partner_details_are_recorded() -> TestResult {
        let promotion = parse(&[
            "--product",
            "A0001",
            "--promotion-type",
            "partner",
            "--file",
            "banner.png:2048:image/png",
            "--file",
            "flyer.pdf:4096:application/pdf",
            "--terms-file",
            "terms.pdf:100:application/pdf",
            "--max-uses-per-user",
            "5",
            "--inactive",
        ])?;

        assert_eq!(promotion.promotion_type, Some(PromotionType::Partner));
        assert_eq!(promotion.partner_name.as_deref(), Some(""));
        assert_eq!(promotion.files.len(), 2);
        assert_eq!(
            promotion.terms_file.map(|file| file.name),
            Some("terms.pdf".to_string())
        );
        assert_eq!(promotion.max_uses_per_user, 5);
        assert!(!promotion.is_active);

        Ok(())
    }
}
