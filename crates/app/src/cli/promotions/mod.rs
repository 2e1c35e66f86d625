use clap::{Args, Subcommand, ValueEnum};
use pharmaplus_app::{
    context::AppContext,
    domain::promotions::{
        records::{ApplyTo, DiscountType, FileMetadata, PromotionRecord, PromotionType},
        status::PromotionStatus,
    },
};

mod create;
mod delete;
mod list;
mod show;
mod update;

#[derive(Debug, Args)]
pub(crate) struct PromotionsCommand {
    #[command(subcommand)]
    command: PromotionsSubcommand,
}

#[derive(Debug, Subcommand)]
enum PromotionsSubcommand {
    List(list::ListPromotionsArgs),
    Show(show::ShowPromotionArgs),
    Create(create::CreatePromotionArgs),
    Update(update::UpdatePromotionArgs),
    Delete(delete::DeletePromotionArgs),
}

pub(crate) fn run(context: &AppContext, command: PromotionsCommand) -> Result<(), String> {
    match command.command {
        PromotionsSubcommand::List(args) => list::run(context, &args),
        PromotionsSubcommand::Show(args) => show::run(context, &args),
        PromotionsSubcommand::Create(args) => create::run(context, args),
        PromotionsSubcommand::Update(args) => update::run(context, args),
        PromotionsSubcommand::Delete(args) => delete::run(context, &args),
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StatusArg {
    Inactive,
    Scheduled,
    Active,
    Expired,
}

impl From<StatusArg> for PromotionStatus {
    fn from(status: StatusArg) -> Self {
        match status {
            StatusArg::Inactive => Self::Inactive,
            StatusArg::Scheduled => Self::Scheduled,
            StatusArg::Active => Self::Active,
            StatusArg::Expired => Self::Expired,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DiscountTypeArg {
    Percentage,
    Fixed,
}

impl From<DiscountTypeArg> for DiscountType {
    fn from(discount_type: DiscountTypeArg) -> Self {
        match discount_type {
            DiscountTypeArg::Percentage => Self::Percentage,
            DiscountTypeArg::Fixed => Self::Fixed,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ApplyToArg {
    Product,
    Bundle,
}

impl From<ApplyToArg> for ApplyTo {
    fn from(apply_to: ApplyToArg) -> Self {
        match apply_to {
            ApplyToArg::Product => Self::Product,
            ApplyToArg::Bundle => Self::Bundle,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PromotionTypeArg {
    Pharmaplus,
    Partner,
}

impl From<PromotionTypeArg> for PromotionType {
    fn from(promotion_type: PromotionTypeArg) -> Self {
        match promotion_type {
            PromotionTypeArg::Pharmaplus => Self::Pharmaplus,
            PromotionTypeArg::Partner => Self::Partner,
        }
    }
}

/// Discount as the list and detail pages show it, e.g. `10%` or `50 KSH`.
fn discount_label(promotion: &PromotionRecord) -> String {
    match promotion.discount_type {
        DiscountType::Percentage => format!("{}%", promotion.discount_value),
        DiscountType::Fixed => format!("{} KSH", promotion.discount_value),
    }
}

/// Parse file metadata given as `name:size:mime`, e.g. `banner.png:2048:image/png`.
///
/// The name may itself contain colons; size and MIME type are taken from the right.
fn parse_file(value: &str) -> Result<FileMetadata, String> {
    let mut parts = value.rsplitn(3, ':');

    let (Some(mime_type), Some(size), Some(name)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(format!("expected name:size:mime, got {value:?}"));
    };

    if name.is_empty() {
        return Err("file name cannot be empty".to_string());
    }

    let size = size
        .parse()
        .map_err(|error| format!("invalid file size {size:?}: {error}"))?;

    Ok(FileMetadata {
        name: name.to_string(),
        size,
        mime_type: mime_type.to_string(),
    })
}

fn storage_error(error: impl std::fmt::Display) -> String {
    format!("failed to access promotions: {error}")
}
