use std::collections::HashMap;

use sqlx::{PgConnection, PgPool};

use crate::{
    error::Result,
    models::{
        DetailView, ItemView, Language, LocalizationView, NewItem, NewLocalization, NewProduct,
        Product, ProductAggregate, ProductDetail, ProductItem, ProductLocalization,
        ProductSummary,
    },
};

const FEATURES_TABLE: &str = "product_features";
const USAGE_AREAS_TABLE: &str = "product_usage_areas";

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Product>> {
    let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(product)
}

pub async fn find_by_code(pool: &PgPool, code: &str) -> Result<Option<Product>> {
    let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE code = $1")
        .bind(code)
        .fetch_optional(pool)
        .await?;

    Ok(product)
}

pub async fn count_products(pool: &PgPool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
        .fetch_one(pool)
        .await?;

    Ok(count)
}

pub async fn find_aggregate(pool: &PgPool, id: i32) -> Result<Option<ProductAggregate>> {
    let Some(product) = find_by_id(pool, id).await? else {
        return Ok(None);
    };

    let mut aggregates = load_aggregates(pool, vec![product]).await?;
    Ok(aggregates.pop())
}

pub async fn list_aggregates(pool: &PgPool) -> Result<Vec<ProductAggregate>> {
    let products = sqlx::query_as::<_, Product>(
        "SELECT * FROM products ORDER BY created_at DESC, id DESC",
    )
    .fetch_all(pool)
    .await?;

    load_aggregates(pool, products).await
}

/// One summary per product in `language`, falling back to the Turkish copy
/// when a product has no localization in the requested language.
pub async fn list_summaries(pool: &PgPool, language: Language) -> Result<Vec<ProductSummary>> {
    let summaries = sqlx::query_as::<_, ProductSummary>(
        r#"
        SELECT p.id, p.code, p.image_url, l.language_code, l.name, l.description, l.slug
        FROM products p
        JOIN LATERAL (
            SELECT pl.language_code, pl.name, pl.description, pl.slug
            FROM product_localizations pl
            WHERE pl.product_id = p.id
            ORDER BY (pl.language_code = $1) DESC, (pl.language_code = $2) DESC
            LIMIT 1
        ) l ON TRUE
        ORDER BY p.created_at DESC, p.id DESC
        "#,
    )
    .bind(language.as_str())
    .bind(Language::PRIMARY.as_str())
    .fetch_all(pool)
    .await?;

    Ok(summaries)
}

pub async fn find_id_by_slug(
    pool: &PgPool,
    slug: &str,
    language: Language,
) -> Result<Option<i32>> {
    let product_id: Option<i32> = sqlx::query_scalar(
        r#"
        SELECT product_id
        FROM product_localizations
        WHERE slug = $1
        ORDER BY (language_code = $2) DESC, product_id DESC
        LIMIT 1
        "#,
    )
    .bind(slug)
    .bind(language.as_str())
    .fetch_optional(pool)
    .await?;

    Ok(product_id)
}

pub async fn create_product(pool: &PgPool, req: &NewProduct) -> Result<Product> {
    let mut tx = pool.begin().await?;

    let product = sqlx::query_as::<_, Product>(
        "INSERT INTO products (code, image_url) VALUES ($1, $2) RETURNING *",
    )
    .bind(&req.code)
    .bind(&req.image_url)
    .fetch_one(&mut *tx)
    .await?;

    insert_children(&mut tx, product.id, &req.localizations).await?;

    tx.commit().await?;

    Ok(product)
}

/// Overwrites the product row and replaces every child row in one transaction.
pub async fn update_product(pool: &PgPool, id: i32, req: &NewProduct) -> Result<Option<Product>> {
    let mut tx = pool.begin().await?;

    let product = sqlx::query_as::<_, Product>(
        r#"
        UPDATE products
        SET code = $1, image_url = $2, updated_at = NOW()
        WHERE id = $3
        RETURNING *
        "#,
    )
    .bind(&req.code)
    .bind(&req.image_url)
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(product) = product else {
        tx.rollback().await?;
        return Ok(None);
    };

    delete_children(&mut tx, id).await?;
    insert_children(&mut tx, id, &req.localizations).await?;

    tx.commit().await?;

    Ok(Some(product))
}

pub async fn delete_product(pool: &PgPool, id: i32) -> Result<u64> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

async fn delete_children(conn: &mut PgConnection, product_id: i32) -> Result<()> {
    for table in [
        "product_localizations",
        FEATURES_TABLE,
        "product_details",
        USAGE_AREAS_TABLE,
    ] {
        sqlx::query(&format!("DELETE FROM {} WHERE product_id = $1", table))
            .bind(product_id)
            .execute(&mut *conn)
            .await?;
    }

    Ok(())
}

async fn insert_children(
    conn: &mut PgConnection,
    product_id: i32,
    localizations: &[NewLocalization],
) -> Result<()> {
    for loc in localizations {
        let language = loc.language.as_str();

        sqlx::query(
            r#"
            INSERT INTO product_localizations (product_id, language_code, name, description, slug)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(product_id)
        .bind(language)
        .bind(&loc.name)
        .bind(&loc.description)
        .bind(&loc.slug)
        .execute(&mut *conn)
        .await?;

        insert_items(conn, FEATURES_TABLE, product_id, language, &loc.features).await?;
        insert_items(conn, USAGE_AREAS_TABLE, product_id, language, &loc.usage_areas).await?;

        if let Some(detail) = &loc.detail {
            sqlx::query(
                r#"
                INSERT INTO product_details (product_id, language_code, title, content)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(product_id)
            .bind(language)
            .bind(&detail.title)
            .bind(&detail.content)
            .execute(&mut *conn)
            .await?;
        }
    }

    Ok(())
}

async fn insert_items(
    conn: &mut PgConnection,
    table: &str,
    product_id: i32,
    language: &str,
    items: &[NewItem],
) -> Result<()> {
    let sql = format!(
        "INSERT INTO {} (product_id, language_code, title, description, icon, sort_order)
         VALUES ($1, $2, $3, $4, $5, $6)",
        table
    );

    for (position, item) in items.iter().enumerate() {
        sqlx::query(&sql)
            .bind(product_id)
            .bind(language)
            .bind(&item.title)
            .bind(&item.description)
            .bind(&item.icon)
            .bind(position as i32)
            .execute(&mut *conn)
            .await?;
    }

    Ok(())
}

async fn load_aggregates(pool: &PgPool, products: Vec<Product>) -> Result<Vec<ProductAggregate>> {
    if products.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<i32> = products.iter().map(|p| p.id).collect();

    let localizations = sqlx::query_as::<_, ProductLocalization>(
        "SELECT * FROM product_localizations WHERE product_id = ANY($1)",
    )
    .bind(&ids)
    .fetch_all(pool)
    .await?;

    let features = load_items(pool, FEATURES_TABLE, &ids).await?;
    let usage_areas = load_items(pool, USAGE_AREAS_TABLE, &ids).await?;

    let details = sqlx::query_as::<_, ProductDetail>(
        "SELECT * FROM product_details WHERE product_id = ANY($1)",
    )
    .bind(&ids)
    .fetch_all(pool)
    .await?;

    Ok(assemble(products, localizations, features, usage_areas, details))
}

async fn load_items(pool: &PgPool, table: &str, ids: &[i32]) -> Result<Vec<ProductItem>> {
    let items = sqlx::query_as::<_, ProductItem>(&format!(
        "SELECT * FROM {} WHERE product_id = ANY($1) ORDER BY sort_order ASC, id ASC",
        table
    ))
    .bind(ids)
    .fetch_all(pool)
    .await?;

    Ok(items)
}

type ChildKey = (i32, String);

fn group_items(items: Vec<ProductItem>) -> HashMap<ChildKey, Vec<ItemView>> {
    let mut grouped: HashMap<ChildKey, Vec<ItemView>> = HashMap::new();
    for item in items {
        grouped
            .entry((item.product_id, item.language_code.clone()))
            .or_default()
            .push(item.into());
    }
    grouped
}

/// Stitches child rows onto their products, keeping the product order and
/// listing the primary language first.
fn assemble(
    products: Vec<Product>,
    localizations: Vec<ProductLocalization>,
    features: Vec<ProductItem>,
    usage_areas: Vec<ProductItem>,
    details: Vec<ProductDetail>,
) -> Vec<ProductAggregate> {
    let mut features = group_items(features);
    let mut usage_areas = group_items(usage_areas);
    let mut details: HashMap<ChildKey, DetailView> = details
        .into_iter()
        .map(|d| ((d.product_id, d.language_code.clone()), d.into()))
        .collect();

    let mut by_product: HashMap<i32, Vec<LocalizationView>> = HashMap::new();
    for loc in localizations {
        let key = (loc.product_id, loc.language_code.clone());
        by_product
            .entry(loc.product_id)
            .or_default()
            .push(LocalizationView {
                features: features.remove(&key).unwrap_or_default(),
                usage_areas: usage_areas.remove(&key).unwrap_or_default(),
                detail: details.remove(&key),
                language_code: loc.language_code,
                name: loc.name,
                description: loc.description,
                slug: loc.slug,
            });
    }

    products
        .into_iter()
        .map(|product| {
            let mut localizations = by_product.remove(&product.id).unwrap_or_default();
            localizations.sort_by(|a, b| {
                let primary = Language::PRIMARY.as_str();
                (a.language_code != primary, &a.language_code)
                    .cmp(&(b.language_code != primary, &b.language_code))
            });
            ProductAggregate {
                product,
                localizations,
            }
        })
        .collect()
}
