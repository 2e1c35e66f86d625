//! Integration tests for the promotion store over file-backed storage

use std::{fs, sync::Arc};

use jiff::civil::date;
use serde_json::{Value, json};
use smallvec::smallvec;
use testresult::TestResult;

use pharmaplus_app::{
    config::StorageConfig,
    context::AppContext,
    domain::{
        dashboard::summarize,
        promotions::{
            PROMOTIONS_KEY,
            data::NewPromotion,
            records::{ApplyTo, PromotionId},
            status::PromotionStatus,
            validation::validate_new,
        },
    },
    storage::{FileStorage, StorageMedium},
};

fn vitamin_week() -> NewPromotion {
    let mut promotion =
        NewPromotion::with_defaults("Vitamin week", date(2030, 3, 1).at(9, 0, 0, 0));

    promotion.description = "Ten percent off vitamins".to_string();
    promotion.discount_value = 10.0;
    promotion.target_identifiers = smallvec!["B0001".to_string(), "B0002".to_string()];

    promotion
}

#[test]
fn promotions_survive_a_new_context() -> TestResult {
    let dir = tempfile::tempdir()?;
    let config = StorageConfig {
        storage_path: dir.path().join("storage.json"),
    };

    let promotion = vitamin_week();

    validate_new(&promotion, date(2030, 1, 1).at(0, 0, 0, 0))?;

    let saved = AppContext::from_config(&config).promotions.save(promotion)?;

    let reopened = AppContext::from_config(&config);

    let found = reopened.promotions.find_by_id(&saved.id)?;

    assert_eq!(found, Some(saved.clone()));

    let mut edited = saved.clone();
    edited.name = "Vitamin fortnight".to_string();

    reopened.promotions.update(edited)?;

    let all = reopened.promotions.load_all()?;

    assert_eq!(all.len(), 1);

    let stored = all.first().ok_or("updated promotion missing")?;

    assert_eq!(stored.name, "Vitamin fortnight");
    assert_eq!(stored.created_at, saved.created_at);

    reopened.promotions.remove(&saved.id)?;

    assert!(reopened.promotions.load_all()?.is_empty());

    Ok(())
}

#[test]
fn legacy_file_is_migrated_and_rewritten() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("storage.json");

    let legacy = json!([{
        "id": "1700000000000",
        "name": "Cold season bundle",
        "description": "Cough syrup with tissues",
        "discount_type": "FIXED",
        "discount_value": 50,
        "apply_to": "BUNDLE",
        "target_identifiers": ["C0002", "D0002"],
        "start_datetime": "2030-01-01T09:00",
        "end_datetime": "2030-02-01T09:00",
        "is_active": true,
        "createdAt": "2029-12-20T10:15:00Z"
    }]);

    let storage = FileStorage::new(&path);
    storage.set(PROMOTIONS_KEY, legacy.to_string())?;

    let context = AppContext::from_storage(Arc::new(FileStorage::new(&path)));

    let promotions = context.promotions.load_all()?;

    assert_eq!(promotions.len(), 1);

    let migrated = promotions.first().ok_or("migrated promotion missing")?;

    assert_eq!(migrated.apply_to, ApplyTo::Bundle);
    assert_eq!(migrated.product_codes(), ["C0002", "D0002"]);

    let raw: Value = serde_json::from_str(&fs::read_to_string(&path)?)?;
    let stored = raw[PROMOTIONS_KEY].as_str().unwrap_or_default();
    let rewritten: Value = serde_json::from_str(stored)?;

    assert_eq!(rewritten[0]["files"], json!([]));
    assert_eq!(rewritten[0]["terms_and_conditions"], json!(""));
    assert_eq!(rewritten[0]["rules"], json!(""));
    assert_eq!(rewritten[0]["bundledProductCodes"], json!(["C0002", "D0002"]));

    let summary = summarize(
        context.promotions.as_ref(),
        date(2030, 1, 15).at(0, 0, 0, 0),
    )?;

    assert_eq!(summary.total, 1);
    assert_eq!(summary.bundle_promotions, 1);

    Ok(())
}

#[test]
fn missing_records_are_reported_as_none() -> TestResult {
    let dir = tempfile::tempdir()?;
    let context =
        AppContext::from_storage(Arc::new(FileStorage::new(dir.path().join("storage.json"))));

    let found = context.promotions.find_by_id(&PromotionId::new("404"))?;

    assert_eq!(found, None);

    let saved = context.promotions.save(vitamin_week())?;

    assert_eq!(
        saved.status(date(2030, 3, 5).at(0, 0, 0, 0)),
        PromotionStatus::Active
    );

    Ok(())
}
