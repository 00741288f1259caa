use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

use super::{Coffee, Entity, FlavorTag, ProcessingMethod, RoastLevel};

#[derive(Debug, Clone, FromRow)]
pub struct CoffeeRow {
    pub id: Uuid,
    pub name: String,
    pub roaster_id: Uuid,
    pub origin_country: Option<String>,
    pub origin_region: Option<String>,
    pub farm_name: Option<String>,
    pub producer: Option<String>,
    pub altitude: Option<String>,
    pub processing_method: Option<ProcessingMethod>,
    pub variety: Option<String>,
    pub roast_level: Option<RoastLevel>,
    pub roast_date: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub bag_size: Option<String>,
    pub created_by: String,
    pub updated_by: Option<String>,
    pub deleted_by: Option<String>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for CoffeeRow {
    const TABLE: &'static str = "coffee";
    const COLUMNS: &'static str = "id, name, roaster_id, origin_country, origin_region, \
        farm_name, producer, altitude, processing_method, variety, roast_level, roast_date, \
        description, price, bag_size, \
        created_by, updated_by, deleted_by, deleted_at, created_at, updated_at";
    const NAME: &'static str = "Coffee";
}

impl CoffeeRow {
    pub fn into_model(self, flavor_tags: Vec<FlavorTag>) -> Coffee {
        Coffee {
            id: self.id,
            name: self.name,
            roaster_id: self.roaster_id,
            origin_country: self.origin_country,
            origin_region: self.origin_region,
            farm_name: self.farm_name,
            producer: self.producer,
            altitude: self.altitude,
            processing_method: self.processing_method,
            variety: self.variety,
            roast_level: self.roast_level,
            roast_date: self.roast_date,
            description: self.description,
            price: self.price,
            bag_size: self.bag_size,
            flavor_tags,
            created_by: self.created_by,
            updated_by: self.updated_by,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
