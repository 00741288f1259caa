//! Business rules against a real Postgres
//!
//! Each test gets a fresh database with the migrations applied. They need
//! `DATABASE_URL` pointing at a server that allows creating databases, so
//! they are ignored by default: `make test-db` runs them.
//!
//! Covers:
//! - Name uniqueness and not-found rules in the catalogue services
//! - Tasting session ownership
//! - Soft delete, restore and flavor tag revival
//! - LIKE escaping and pagination totals

use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use coffee_tasting::error::AppError;
use coffee_tasting::models::{BrewMethod, GrindSize, ProcessingMethod, RoastLevel};
use coffee_tasting::repositories::{FlavorTagRepository, TastingRepository, USER_HISTORY_LIMIT};
use coffee_tasting::services::{CoffeeService, FlavorTagService, RoasterService, TastingService};
use shared::schemas::{
    CoffeeCreate, CoffeeListQuery, CoffeeUpdate, FlavorTagCreate, FlavorTagListQuery,
    FlavorTagUpdate, RoasterCreate, RoasterListQuery, TastingListQuery, TastingNoteCreate,
    TastingSessionCreate, TastingSessionUpdate,
};

const ALICE: &str = "user-alice";
const BOB: &str = "user-bob";

fn from_json<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> T {
    serde_json::from_value(value).unwrap()
}

async fn roaster(pool: &PgPool, name: &str) -> Uuid {
    RoasterService::new(pool.clone())
        .create(from_json::<RoasterCreate>(json!({ "name": name })), ALICE)
        .await
        .unwrap()
        .id
}

async fn coffee(pool: &PgPool, roaster_id: Uuid, name: &str) -> Uuid {
    let input: CoffeeCreate = from_json(json!({
        "name": name,
        "roaster_id": roaster_id,
        "processing_method": "washed",
        "roast_level": "medium_light",
    }));
    CoffeeService::new(pool.clone())
        .create(input, ALICE)
        .await
        .unwrap()
        .id
}

fn session_input(coffee_id: Uuid, notes: serde_json::Value) -> TastingSessionCreate {
    from_json(json!({
        "coffee_id": coffee_id,
        "brew_method": "v60",
        "grind_size": "medium_fine",
        "overall_rating": 8,
        "tasting_notes": notes,
    }))
}

fn tag_input(name: &str, category: Option<&str>) -> FlavorTagCreate {
    from_json(json!({ "name": name, "category": category }))
}

// ============================================================================
// Roasters
// ============================================================================

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL (make test-db)"]
async fn test_roaster_duplicate_name_conflicts(pool: PgPool) {
    let service = RoasterService::new(pool.clone());
    roaster(&pool, "Onyx").await;

    let err = service
        .create(from_json(json!({ "name": "  Onyx " })), BOB)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    let other = roaster(&pool, "Sey").await;
    let err = service
        .update(other, from_json(json!({ "name": "Onyx" })), BOB)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL (make test-db)"]
async fn test_roaster_soft_delete_and_restore(pool: PgPool) {
    let service = RoasterService::new(pool.clone());
    let id = roaster(&pool, "Onyx").await;

    let err = service.restore(id, ALICE).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)), "live row restored");

    service.delete(id, BOB).await.unwrap();
    assert!(matches!(service.get(id).await, Err(AppError::NotFound(_))));
    assert!(matches!(service.delete(id, BOB).await, Err(AppError::NotFound(_))));

    let query: RoasterListQuery = from_json(json!({}));
    assert_eq!(service.list(&query).await.unwrap().total, 0);

    // The name is free again while the row is deleted
    roaster(&pool, "Onyx").await;

    let restored = service.restore(id, ALICE).await.unwrap();
    assert_eq!(restored.id, id);
    assert_eq!(restored.updated_by.as_deref(), Some(ALICE));
    assert_eq!(service.list(&query).await.unwrap().total, 2);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL (make test-db)"]
async fn test_roaster_search_escapes_like_metacharacters(pool: PgPool) {
    let service = RoasterService::new(pool.clone());
    roaster(&pool, "50% Arabica").await;
    roaster(&pool, "500 Beans").await;
    roaster(&pool, "Under_score").await;
    roaster(&pool, "Four Sisters").await;

    let percent = service
        .list(&from_json(json!({ "search": "50%" })))
        .await
        .unwrap();
    assert_eq!(percent.total, 1);
    assert_eq!(percent.roasters[0].name, "50% Arabica");

    let underscore = service
        .list(&from_json(json!({ "search": "r_s" })))
        .await
        .unwrap();
    assert_eq!(underscore.total, 1);
    assert_eq!(underscore.roasters[0].name, "Under_score");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL (make test-db)"]
async fn test_list_page_and_total(pool: PgPool) {
    for i in 0..5 {
        roaster(&pool, &format!("Roaster {}", i)).await;
    }
    let service = RoasterService::new(pool.clone());

    let page = service
        .list(&from_json(json!({ "skip": 2, "limit": 2 })))
        .await
        .unwrap();
    assert_eq!(page.total, 5);
    assert_eq!(page.page, 2);
    assert_eq!(page.size, 2);
    assert_eq!(page.roasters.len(), 2);

    let last = service
        .list(&from_json(json!({ "skip": 4, "limit": 2 })))
        .await
        .unwrap();
    assert_eq!(last.size, 1);
    assert_eq!(last.page, 3);
}

// ============================================================================
// Coffees
// ============================================================================

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL (make test-db)"]
async fn test_coffee_requires_live_roaster(pool: PgPool) {
    let service = CoffeeService::new(pool.clone());

    let input: CoffeeCreate = from_json(json!({ "name": "Guji", "roaster_id": Uuid::new_v4() }));
    let err = service.create(input, ALICE).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(ref what) if what == "Roaster"));

    let roaster_id = roaster(&pool, "Onyx").await;
    RoasterService::new(pool.clone())
        .delete(roaster_id, ALICE)
        .await
        .unwrap();
    let input: CoffeeCreate = from_json(json!({ "name": "Guji", "roaster_id": roaster_id }));
    assert!(matches!(
        service.create(input, ALICE).await,
        Err(AppError::NotFound(_))
    ));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL (make test-db)"]
async fn test_coffee_name_unique_per_roaster(pool: PgPool) {
    let service = CoffeeService::new(pool.clone());
    let onyx = roaster(&pool, "Onyx").await;
    let sey = roaster(&pool, "Sey").await;

    let guji = coffee(&pool, onyx, "Guji").await;
    let err = service
        .create(from_json(json!({ "name": "Guji", "roaster_id": onyx })), BOB)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    // Same name at another roaster is fine
    let other = coffee(&pool, sey, "Guji").await;

    // Moving it onto the first roaster collides
    let err = service
        .update(other, from_json::<CoffeeUpdate>(json!({ "roaster_id": onyx })), BOB)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    // Renaming to its own name is not a conflict
    let same = service
        .update(guji, from_json::<CoffeeUpdate>(json!({ "name": "Guji" })), BOB)
        .await
        .unwrap();
    assert_eq!(same.updated_by.as_deref(), Some(BOB));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL (make test-db)"]
async fn test_coffee_enums_and_tags_round_trip_storage(pool: PgPool) {
    let service = CoffeeService::new(pool.clone());
    let onyx = roaster(&pool, "Onyx").await;

    let input: CoffeeCreate = from_json(json!({
        "name": "Monarch",
        "roaster_id": onyx,
        "processing_method": "carbonic_maceration",
        "roast_level": "medium_dark",
        "flavor_tags": ["Cherry", " cherry ", "Cacao", ""],
    }));
    let created = service.create(input, ALICE).await.unwrap();

    let fetched = service.get(created.id).await.unwrap();
    assert_eq!(fetched.processing_method, Some(ProcessingMethod::CarbonicMaceration));
    assert_eq!(fetched.roast_level, Some(RoastLevel::MediumDark));
    let mut names: Vec<_> = fetched.flavor_tags.iter().map(|t| t.name.as_str()).collect();
    names.sort();
    assert_eq!(names, vec!["Cacao", "Cherry"]);

    let stored: String = sqlx::query_scalar("SELECT roast_level FROM coffee WHERE id = $1")
        .bind(created.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(stored, "medium_dark");

    let updated = service
        .update(
            created.id,
            from_json(json!({ "flavor_tags": ["Plum"] })),
            BOB,
        )
        .await
        .unwrap();
    assert_eq!(updated.flavor_tags.len(), 1);
    assert_eq!(updated.flavor_tags[0].name, "Plum");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL (make test-db)"]
async fn test_coffee_search_escapes_like_metacharacters(pool: PgPool) {
    let onyx = roaster(&pool, "Onyx").await;
    coffee(&pool, onyx, "100% Geisha").await;
    coffee(&pool, onyx, "1000 Meters").await;

    let query: CoffeeListQuery = from_json(json!({ "search": "100%" }));
    let response = CoffeeService::new(pool.clone()).list(&query).await.unwrap();
    assert_eq!(response.total, 1);
    assert_eq!(response.coffees[0].name, "100% Geisha");
}

// ============================================================================
// Flavor tags
// ============================================================================

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL (make test-db)"]
async fn test_flavor_tag_create_revives_deleted_name(pool: PgPool) {
    let service = FlavorTagService::new(pool.clone());

    let original = service
        .create(tag_input("Jasmine", Some("floral")), ALICE)
        .await
        .unwrap();
    service.delete(original.id, ALICE).await.unwrap();

    let revived = service
        .create(tag_input("JASMINE", Some("tea-like")), BOB)
        .await
        .unwrap();
    assert_eq!(revived.id, original.id);
    assert_eq!(revived.name, "JASMINE");
    assert_eq!(revived.category.as_deref(), Some("tea-like"));

    let row = FlavorTagRepository::new(pool.clone())
        .get(original.id, false)
        .await
        .unwrap()
        .unwrap();
    assert!(row.deleted_at.is_none());
    assert!(row.deleted_by.is_none());
    assert_eq!(row.updated_by.as_deref(), Some(BOB));

    // A live tag still conflicts
    let err = service
        .create(tag_input("jasmine", None), ALICE)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL (make test-db)"]
async fn test_flavor_tag_rename_onto_deleted_name_is_explicit_conflict(pool: PgPool) {
    let service = FlavorTagService::new(pool.clone());

    let deleted = service.create(tag_input("Smoky", None), ALICE).await.unwrap();
    service.delete(deleted.id, ALICE).await.unwrap();
    let tag = service.create(tag_input("Ashy", None), ALICE).await.unwrap();

    let update: FlavorTagUpdate = from_json(json!({ "name": "smoky" }));
    match service.update(tag.id, update, ALICE).await {
        Err(AppError::Conflict(message)) => assert!(message.contains("was deleted")),
        other => panic!("expected conflict, got {:?}", other.map(|t| t.name)),
    }

    // Renaming a tag to a different case of its own name is allowed
    let update: FlavorTagUpdate = from_json(json!({ "name": "ASHY" }));
    assert_eq!(service.update(tag.id, update, ALICE).await.unwrap().name, "ASHY");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL (make test-db)"]
async fn test_find_or_create_dedupes_and_revives(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();

    let tags = FlavorTagRepository::find_or_create_multiple(
        &mut conn,
        &["Cherry", "CHERRY", " cherry", "Plum"],
        ALICE,
    )
    .await
    .unwrap();
    assert_eq!(tags.len(), 2);
    assert_eq!(tags[0].name, "Cherry");
    assert!(tags[0].updated_by.is_none());

    let again = FlavorTagRepository::find_or_create_by_name(&mut conn, "cherry", BOB)
        .await
        .unwrap();
    assert_eq!(again.id, tags[0].id);
    assert_eq!(again.name, "Cherry");
    assert!(again.updated_by.is_none(), "lookup of a live tag is not an update");
    assert_eq!(again.updated_at, tags[0].updated_at);

    FlavorTagRepository::new(pool.clone())
        .soft_delete(tags[0].id, ALICE)
        .await
        .unwrap();
    let revived = FlavorTagRepository::find_or_create_by_name(&mut conn, "Cherry", BOB)
        .await
        .unwrap();
    assert_eq!(revived.id, tags[0].id);
    assert!(revived.deleted_at.is_none());
    assert_eq!(revived.updated_by.as_deref(), Some(BOB));
    assert!(revived.updated_at > tags[0].updated_at);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL (make test-db)"]
async fn test_flavor_tag_search_matches_name_or_category(pool: PgPool) {
    let service = FlavorTagService::new(pool.clone());
    service.create(tag_input("Lemon", Some("fruity")), ALICE).await.unwrap();
    service.create(tag_input("Blueberry", Some("fruity")), ALICE).await.unwrap();
    service.create(tag_input("Hazelnut", Some("nutty")), ALICE).await.unwrap();

    let query: FlavorTagListQuery = from_json(json!({ "search": "FRUIT" }));
    let response = service.list(&query).await.unwrap();
    assert_eq!(response.total, 2);
    assert_eq!(response.flavor_tags[0].name, "Blueberry");
}

// ============================================================================
// Tasting sessions
// ============================================================================

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL (make test-db)"]
async fn test_tasting_requires_live_coffee(pool: PgPool) {
    let service = TastingService::new(pool.clone());
    let err = service
        .create(session_input(Uuid::new_v4(), json!([])), ALICE)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(ref what) if what == "Coffee"));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL (make test-db)"]
async fn test_tasting_ownership(pool: PgPool) {
    let onyx = roaster(&pool, "Onyx").await;
    let guji = coffee(&pool, onyx, "Guji").await;
    let service = TastingService::new(pool.clone());

    let session = service
        .create(
            session_input(guji, json!([{ "flavor_name": "Blueberry", "intensity": 7, "aroma": true }])),
            ALICE,
        )
        .await
        .unwrap();
    assert_eq!(session.brew_method, BrewMethod::V60);
    assert_eq!(session.grind_size, Some(GrindSize::MediumFine));
    assert_eq!(session.coffee_name.as_deref(), Some("Guji"));
    assert_eq!(session.roaster_name.as_deref(), Some("Onyx"));
    assert_eq!(session.tasting_notes.len(), 1);
    assert!(session.tasting_notes[0].aroma);

    assert!(matches!(
        service.get(session.id, BOB).await,
        Err(AppError::Forbidden(_))
    ));
    assert!(matches!(
        service
            .update(session.id, TastingSessionUpdate::default(), BOB)
            .await,
        Err(AppError::Forbidden(_))
    ));
    let note: TastingNoteCreate = from_json(json!({ "flavor_name": "Lime" }));
    assert!(matches!(
        service.add_note(session.id, note, BOB).await,
        Err(AppError::Forbidden(_))
    ));
    assert!(matches!(
        service.delete(session.id, BOB).await,
        Err(AppError::NotFound(_))
    ));

    let bobs: TastingListQuery = from_json(json!({}));
    assert_eq!(service.list(&bobs, BOB).await.unwrap().total, 0);

    service.delete(session.id, ALICE).await.unwrap();
    assert!(matches!(
        service.get(session.id, ALICE).await,
        Err(AppError::NotFound(_))
    ));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL (make test-db)"]
async fn test_tasting_update_and_note(pool: PgPool) {
    let onyx = roaster(&pool, "Onyx").await;
    let guji = coffee(&pool, onyx, "Guji").await;
    let service = TastingService::new(pool.clone());
    let session = service.create(session_input(guji, json!([])), ALICE).await.unwrap();

    let update: TastingSessionUpdate = from_json(json!({
        "brew_method": "french_press",
        "overall_rating": 6,
    }));
    let updated = service.update(session.id, update, ALICE).await.unwrap();
    assert_eq!(updated.brew_method, BrewMethod::FrenchPress);
    assert_eq!(updated.overall_rating, Some(6));
    assert_eq!(updated.grind_size, Some(GrindSize::MediumFine));

    let missing: TastingSessionUpdate = from_json(json!({ "coffee_id": Uuid::new_v4() }));
    assert!(matches!(
        service.update(session.id, missing, ALICE).await,
        Err(AppError::NotFound(_))
    ));

    let note: TastingNoteCreate = from_json(json!({ "flavor_name": " caramel ", "intensity": 4 }));
    let note = service.add_note(session.id, note, ALICE).await.unwrap();
    assert_eq!(note.flavor_tag.name, "caramel");
    assert_eq!(service.get(session.id, ALICE).await.unwrap().tasting_notes.len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL (make test-db)"]
async fn test_history_capped_for_profiles(pool: PgPool) {
    let onyx = roaster(&pool, "Onyx").await;
    let guji = coffee(&pool, onyx, "Guji").await;

    sqlx::query(
        r#"
        INSERT INTO tasting_session (coffee_id, user_id, brew_method, created_by, created_at)
        SELECT $1, $2, 'espresso', $2, NOW() - make_interval(mins => n)
        FROM generate_series(1, $3) AS n
        "#,
    )
    .bind(guji)
    .bind(ALICE)
    .bind((USER_HISTORY_LIMIT + 5) as i32)
    .execute(&pool)
    .await
    .unwrap();

    let rows = TastingRepository::new(pool.clone())
        .get_all_by_user_id(ALICE)
        .await
        .unwrap();
    assert_eq!(rows.len() as i64, USER_HISTORY_LIMIT);
    assert!(rows[0].created_at > rows[rows.len() - 1].created_at);
    assert!(rows.iter().all(|r| r.brew_method == BrewMethod::Espresso));

    let total = TastingRepository::new(pool.clone())
        .count_by_user(ALICE)
        .await
        .unwrap();
    assert_eq!(total, USER_HISTORY_LIMIT + 5);
}
