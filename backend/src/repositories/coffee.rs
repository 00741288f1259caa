use std::collections::HashMap;

use sqlx::PgConnection;
use uuid::Uuid;

use shared::schemas::{CoffeeCreate, CoffeeUpdate};

use super::base::{contains_pattern, Repository};
use super::flavor_tag::FlavorTagRepository;
use crate::error::AppResult;
use crate::models::{CoffeeFlavorRow, CoffeeRow, Entity, FlavorTagRow};

pub type CoffeeRepository = Repository<CoffeeRow>;

#[derive(Debug, Clone, Default)]
pub struct CoffeeFilter {
    pub roaster_id: Option<Uuid>,
    /// Case-insensitive name substring
    pub search: Option<String>,
    /// Case-insensitive country substring
    pub origin_country: Option<String>,
}

const FILTER_CLAUSE: &str = r#"
    deleted_at IS NULL
      AND ($1::uuid IS NULL OR roaster_id = $1)
      AND ($2::text IS NULL OR name ILIKE $2)
      AND ($3::text IS NULL OR origin_country ILIKE $3)
"#;

impl Repository<CoffeeRow> {
    /// Insert a coffee and link its flavor tags in one transaction
    pub async fn create(
        &self,
        input: &CoffeeCreate,
        user_id: &str,
    ) -> AppResult<(CoffeeRow, Vec<FlavorTagRow>)> {
        let mut tx = self.db.begin().await?;

        let sql = format!(
            r#"
            INSERT INTO coffee (
                name, roaster_id, origin_country, origin_region, farm_name, producer,
                altitude, processing_method, variety, roast_level, roast_date,
                description, price, bag_size, created_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING {}
            "#,
            CoffeeRow::COLUMNS
        );

        let row = sqlx::query_as::<_, CoffeeRow>(&sql)
            .bind(input.name.trim())
            .bind(input.roaster_id)
            .bind(&input.origin_country)
            .bind(&input.origin_region)
            .bind(&input.farm_name)
            .bind(&input.producer)
            .bind(&input.altitude)
            .bind(input.processing_method)
            .bind(&input.variety)
            .bind(input.roast_level)
            .bind(&input.roast_date)
            .bind(&input.description)
            .bind(input.price)
            .bind(&input.bag_size)
            .bind(user_id)
            .fetch_one(&mut *tx)
            .await?;

        let tags = Self::set_flavor_tags(&mut *tx, row.id, &input.flavor_tags, user_id).await?;

        tx.commit().await?;

        tracing::info!(id = %row.id, user_id, name = %row.name, tags = tags.len(), "Created coffee");
        Ok((row, tags))
    }

    /// Apply the provided fields; `flavor_tags`, when present, replaces the set
    pub async fn update(
        &self,
        id: Uuid,
        input: &CoffeeUpdate,
        user_id: &str,
    ) -> AppResult<Option<CoffeeRow>> {
        let mut tx = self.db.begin().await?;

        let sql = format!(
            r#"
            UPDATE coffee
            SET name = COALESCE($2, name),
                roaster_id = COALESCE($3, roaster_id),
                origin_country = COALESCE($4, origin_country),
                origin_region = COALESCE($5, origin_region),
                farm_name = COALESCE($6, farm_name),
                producer = COALESCE($7, producer),
                altitude = COALESCE($8, altitude),
                processing_method = COALESCE($9, processing_method),
                variety = COALESCE($10, variety),
                roast_level = COALESCE($11, roast_level),
                roast_date = COALESCE($12, roast_date),
                description = COALESCE($13, description),
                price = COALESCE($14, price),
                bag_size = COALESCE($15, bag_size),
                updated_by = $16,
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING {}
            "#,
            CoffeeRow::COLUMNS
        );

        let row = sqlx::query_as::<_, CoffeeRow>(&sql)
            .bind(id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(input.roaster_id)
            .bind(&input.origin_country)
            .bind(&input.origin_region)
            .bind(&input.farm_name)
            .bind(&input.producer)
            .bind(&input.altitude)
            .bind(input.processing_method)
            .bind(&input.variety)
            .bind(input.roast_level)
            .bind(&input.roast_date)
            .bind(&input.description)
            .bind(input.price)
            .bind(&input.bag_size)
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        if let Some(names) = &input.flavor_tags {
            sqlx::query("DELETE FROM coffee_flavors WHERE coffee_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            Self::set_flavor_tags(&mut *tx, id, names, user_id).await?;
        }

        tx.commit().await?;

        tracing::info!(%id, user_id, "Updated coffee");
        Ok(Some(row))
    }

    /// Resolve names to tags and link them to the coffee
    pub async fn set_flavor_tags(
        conn: &mut PgConnection,
        coffee_id: Uuid,
        names: &[String],
        user_id: &str,
    ) -> AppResult<Vec<FlavorTagRow>> {
        let tags = FlavorTagRepository::find_or_create_multiple(&mut *conn, names, user_id).await?;

        for tag in &tags {
            sqlx::query(
                r#"
                INSERT INTO coffee_flavors (coffee_id, flavor_tag_id)
                VALUES ($1, $2)
                ON CONFLICT DO NOTHING
                "#,
            )
            .bind(coffee_id)
            .bind(tag.id)
            .execute(&mut *conn)
            .await?;
        }

        Ok(tags)
    }

    /// Live tags for each coffee, keyed by coffee id, in one query
    pub async fn flavor_tags_for(
        &self,
        coffee_ids: &[Uuid],
    ) -> AppResult<HashMap<Uuid, Vec<FlavorTagRow>>> {
        if coffee_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, CoffeeFlavorRow>(
            r#"
            SELECT cf.coffee_id,
                   ft.id, ft.name, ft.category, ft.description,
                   ft.created_by, ft.updated_by, ft.deleted_by, ft.deleted_at,
                   ft.created_at, ft.updated_at
            FROM coffee_flavors cf
            JOIN flavortag ft ON ft.id = cf.flavor_tag_id
            WHERE cf.coffee_id = ANY($1) AND ft.deleted_at IS NULL
            ORDER BY ft.name
            "#,
        )
        .bind(coffee_ids)
        .fetch_all(&self.db)
        .await?;

        let mut grouped: HashMap<Uuid, Vec<FlavorTagRow>> = HashMap::new();
        for row in rows {
            grouped.entry(row.coffee_id).or_default().push(row.tag);
        }
        Ok(grouped)
    }

    /// Live coffee with this exact name from the roaster
    pub async fn get_by_name_and_roaster(
        &self,
        name: &str,
        roaster_id: Uuid,
    ) -> AppResult<Option<CoffeeRow>> {
        let sql = format!(
            "SELECT {} FROM coffee WHERE name = $1 AND roaster_id = $2 AND deleted_at IS NULL LIMIT 1",
            CoffeeRow::COLUMNS
        );

        let row = sqlx::query_as::<_, CoffeeRow>(&sql)
            .bind(name.trim())
            .bind(roaster_id)
            .fetch_optional(&self.db)
            .await?;

        Ok(row)
    }

    /// Live coffees matching every given filter, ordered by name
    pub async fn list(&self, filter: &CoffeeFilter, skip: i64, limit: i64) -> AppResult<Vec<CoffeeRow>> {
        let sql = format!(
            "SELECT {} FROM coffee WHERE {} ORDER BY name, id OFFSET $4 LIMIT $5",
            CoffeeRow::COLUMNS,
            FILTER_CLAUSE
        );

        let rows = sqlx::query_as::<_, CoffeeRow>(&sql)
            .bind(filter.roaster_id)
            .bind(filter.search.as_deref().map(contains_pattern))
            .bind(filter.origin_country.as_deref().map(contains_pattern))
            .bind(skip)
            .bind(limit)
            .fetch_all(&self.db)
            .await?;

        Ok(rows)
    }

    pub async fn count_filtered(&self, filter: &CoffeeFilter) -> AppResult<i64> {
        let sql = format!("SELECT COUNT(*) FROM coffee WHERE {}", FILTER_CLAUSE);

        let count: i64 = sqlx::query_scalar(&sql)
            .bind(filter.roaster_id)
            .bind(filter.search.as_deref().map(contains_pattern))
            .bind(filter.origin_country.as_deref().map(contains_pattern))
            .fetch_one(&self.db)
            .await?;

        Ok(count)
    }
}
