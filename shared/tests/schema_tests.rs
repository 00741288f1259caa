//! Request contract and enum tests
//!
//! Covers:
//! - Closed value sets stored as text
//! - Validation bounds on create/update payloads
//! - Pagination arithmetic

use std::str::FromStr;

use proptest::prelude::*;
use rust_decimal::Decimal;
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use shared::schemas::{
    CoffeeCreate, CoffeeListQuery, CoffeeUpdate, FlavorTagCreate, RoasterCreate, RoasterUpdate,
    TastingNoteCreate, TastingSessionCreate,
};
use shared::{BrewMethod, GrindSize, Pagination, ProcessingMethod, RoastLevel};

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn session(value: serde_json::Value) -> TastingSessionCreate {
    serde_json::from_value(value).unwrap()
}

// ============================================================================
// Enums
// ============================================================================

mod enum_tests {
    use super::*;

    #[test]
    fn test_brew_method_text_matches_json() {
        for method in BrewMethod::ALL {
            assert_eq!(serde_json::to_value(method).unwrap(), json!(method.as_str()));
            let parsed: BrewMethod = serde_json::from_value(json!(method.as_str())).unwrap();
            assert_eq!(parsed, method);
        }
        assert_eq!(BrewMethod::V60.as_str(), "v60");
    }

    #[test]
    fn test_grind_size_and_roast_level_values() {
        assert_eq!(GrindSize::MediumFine.as_str(), "medium_fine");
        assert_eq!(RoastLevel::ALL.len(), 5);
        for level in RoastLevel::ALL {
            assert_eq!(serde_json::to_value(level).unwrap(), json!(level.as_str()));
        }
        for size in GrindSize::ALL {
            assert_eq!(serde_json::to_value(size).unwrap(), json!(size.as_str()));
        }
        for method in ProcessingMethod::ALL {
            assert_eq!(serde_json::to_value(method).unwrap(), json!(method.as_str()));
        }
    }

    #[test]
    fn test_unknown_value_rejected() {
        let err = serde_json::from_value::<BrewMethod>(json!("percolator")).unwrap_err();
        assert!(err.to_string().contains("percolator"));
    }

    #[test]
    fn test_enum_json_uses_snake_case() {
        assert_eq!(
            serde_json::to_value(BrewMethod::PourOver).unwrap(),
            json!("pour_over")
        );
        let parsed: GrindSize = serde_json::from_value(json!("extra_coarse")).unwrap();
        assert_eq!(parsed, GrindSize::ExtraCoarse);
        assert!(serde_json::from_value::<BrewMethod>(json!("PourOver")).is_err());
    }
}

// ============================================================================
// Roasters, coffees, flavor tags
// ============================================================================

mod catalog_tests {
    use super::*;

    #[test]
    fn test_roaster_name_required() {
        let blank = RoasterCreate {
            name: "   ".to_string(),
            location: None,
            website: None,
            description: None,
        };
        let errors = blank.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));

        let empty = RoasterCreate {
            name: String::new(),
            location: None,
            website: None,
            description: None,
        };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_roaster_name_too_long() {
        let roaster = RoasterCreate {
            name: "x".repeat(256),
            location: None,
            website: None,
            description: None,
        };
        assert!(roaster.validate().is_err());
    }

    #[test]
    fn test_roaster_website_normalized() {
        let roaster = RoasterCreate {
            name: "Onyx".to_string(),
            location: Some("Rogers, AR".to_string()),
            website: Some("onyxcoffeelab.com".to_string()),
            description: None,
        }
        .normalized();
        assert!(roaster.validate().is_ok());
        assert_eq!(
            roaster.website.as_deref(),
            Some("https://onyxcoffeelab.com")
        );
    }

    #[test]
    fn test_empty_roaster_update_is_valid() {
        assert!(RoasterUpdate::default().validate().is_ok());

        let update = RoasterUpdate {
            name: Some(" ".to_string()),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_coffee_price_places() {
        let coffee: CoffeeCreate = serde_json::from_value(json!({
            "name": "Guji Natural",
            "roaster_id": Uuid::new_v4(),
            "price": "21.50",
            "roast_level": "light",
            "processing_method": "natural",
        }))
        .unwrap();
        assert!(coffee.validate().is_ok());
        assert!(coffee.flavor_tags.is_empty());

        let coffee = CoffeeCreate {
            price: Some(dec("21.505")),
            ..coffee
        };
        let errors = coffee.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("price"));
    }

    #[test]
    fn test_coffee_update_rejects_negative_price() {
        let update = CoffeeUpdate {
            price: Some(dec("-1")),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_coffee_unknown_roast_level_rejected() {
        let result = serde_json::from_value::<CoffeeCreate>(json!({
            "name": "Guji Natural",
            "roaster_id": Uuid::new_v4(),
            "roast_level": "burnt",
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_coffee_list_query_defaults_and_bounds() {
        let query: CoffeeListQuery = serde_json::from_value(json!({})).unwrap();
        assert_eq!(query.skip, 0);
        assert_eq!(query.limit, 100);
        assert!(query.validate().is_ok());

        let query: CoffeeListQuery = serde_json::from_value(json!({ "limit": 1001 })).unwrap();
        assert!(query.validate().is_err());

        let query: CoffeeListQuery = serde_json::from_value(json!({ "skip": -1 })).unwrap();
        assert!(query.validate().is_err());
    }

    #[test]
    fn test_flavor_tag_name_length() {
        let tag = FlavorTagCreate {
            name: "x".repeat(101),
            category: Some("fruity".to_string()),
            description: None,
        };
        assert!(tag.validate().is_err());
    }
}

// ============================================================================
// Tasting sessions
// ============================================================================

mod tasting_tests {
    use super::*;

    fn valid_session() -> serde_json::Value {
        json!({
            "coffee_id": Uuid::new_v4(),
            "brew_method": "v60",
            "grind_size": "medium_fine",
            "coffee_dose": "18.5",
            "water_amount": 300,
            "water_temperature": 94,
            "brew_time": "3:15",
            "overall_rating": 8,
            "would_buy_again": true,
            "tasting_notes": [
                { "flavor_name": "Blueberry", "intensity": 7, "aroma": true },
                { "flavor_name": "Cocoa" }
            ]
        })
    }

    #[test]
    fn test_valid_session() {
        let input = session(valid_session());
        assert!(input.validate().is_ok());
        assert_eq!(input.tasting_notes.len(), 2);
        assert!(input.tasting_notes[0].aroma);
        assert!(!input.tasting_notes[1].flavor);
    }

    #[test]
    fn test_rating_out_of_range() {
        let mut value = valid_session();
        value["overall_rating"] = json!(11);
        let errors = session(value).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("overall_rating"));

        let mut value = valid_session();
        value["overall_rating"] = json!(0);
        assert!(session(value).validate().is_err());
    }

    #[test]
    fn test_water_temperature_bounds() {
        let mut value = valid_session();
        value["water_temperature"] = json!(100);
        assert!(session(value).validate().is_ok());

        let mut value = valid_session();
        value["water_temperature"] = json!(101);
        assert!(session(value).validate().is_err());
    }

    #[test]
    fn test_dose_precision() {
        let mut value = valid_session();
        value["coffee_dose"] = json!("18.25");
        assert!(session(value).validate().is_err());
    }

    #[test]
    fn test_nested_note_intensity_validated() {
        let mut value = valid_session();
        value["tasting_notes"][1]["intensity"] = json!(12);
        assert!(session(value).validate().is_err());
    }

    #[test]
    fn test_unknown_brew_method_rejected() {
        let mut value = valid_session();
        value["brew_method"] = json!("percolator");
        assert!(serde_json::from_value::<TastingSessionCreate>(value).is_err());
    }

    #[test]
    fn test_note_flavor_name_required() {
        let note = TastingNoteCreate {
            flavor_name: " ".to_string(),
            intensity: None,
            notes: None,
            aroma: false,
            flavor: true,
            aftertaste: false,
        };
        assert!(note.validate().is_err());
    }
}

// ============================================================================
// Pagination properties
// ============================================================================

proptest! {
    #[test]
    fn prop_page_is_one_based(skip in 0i64..100_000, limit in 1i64..=1000) {
        let page = Pagination::new(skip, limit).page();
        prop_assert!(page >= 1);
        prop_assert!((page - 1) * limit <= skip);
        prop_assert!(skip < page * limit);
    }
}
