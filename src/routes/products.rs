use std::collections::HashSet;

use axum::extract::State;
use http::StatusCode;

use crate::{
    AppState,
    error::{AppError, Result},
    models::{
        DetailInput, ItemInput, Language, LocalizationInput, LocalizedProduct, NewDetail,
        NewItem, NewLocalization, NewProduct, ProductAggregate, ProductListQuery, ProductRequest,
        ProductSummary,
    },
    queries::product_queries,
    utils::{
        extractors::{Json, Path, Query},
        slug::slugify,
        validation::{non_blank, require},
    },
};

// PUBLIC ROUTES
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<ProductListQuery>,
) -> Result<Json<Vec<ProductSummary>>> {
    let language = Language::from_optional(params.lang.as_deref());
    let products = product_queries::list_summaries(&state.db, language).await?;

    Ok(Json(products))
}

pub async fn get_product_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<ProductListQuery>,
) -> Result<Json<LocalizedProduct>> {
    let language = Language::from_optional(params.lang.as_deref());

    let id = product_queries::find_id_by_slug(&state.db, &slug, language)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    let product = product_queries::find_aggregate(&state.db, id)
        .await?
        .and_then(|aggregate| aggregate.localized(language))
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    Ok(Json(product))
}

// ADMIN ROUTES
pub async fn list_products_admin(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductAggregate>>> {
    let products = product_queries::list_aggregates(&state.db).await?;

    Ok(Json(products))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ProductAggregate>> {
    let product = product_queries::find_aggregate(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Product with id {} not found", id)))?;

    Ok(Json(product))
}

pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<ProductRequest>,
) -> Result<(StatusCode, Json<ProductAggregate>)> {
    let new_product = validate_product(payload)?;

    if product_queries::find_by_code(&state.db, &new_product.code)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(format!(
            "Product with code '{}' already exists",
            new_product.code
        )));
    }

    let product = product_queries::create_product(&state.db, &new_product).await?;
    tracing::info!("Created product {} ({})", product.id, product.code);

    let aggregate = product_queries::find_aggregate(&state.db, product.id)
        .await?
        .ok_or_else(|| AppError::InternalError("Created product vanished".to_string()))?;

    Ok((StatusCode::CREATED, Json(aggregate)))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ProductRequest>,
) -> Result<Json<ProductAggregate>> {
    let new_product = validate_product(payload)?;

    if product_queries::find_by_id(&state.db, id).await?.is_none() {
        return Err(AppError::NotFound(format!(
            "Product with id {} not found",
            id
        )));
    }

    if let Some(existing) = product_queries::find_by_code(&state.db, &new_product.code).await? {
        if existing.id != id {
            return Err(AppError::Conflict(format!(
                "Another product with code '{}' already exists",
                new_product.code
            )));
        }
    }

    product_queries::update_product(&state.db, id, &new_product)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Product with id {} not found", id)))?;
    tracing::info!("Updated product {}", id);

    let aggregate = product_queries::find_aggregate(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Product with id {} not found", id)))?;

    Ok(Json(aggregate))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    if product_queries::delete_product(&state.db, id).await? == 0 {
        return Err(AppError::NotFound(format!(
            "Product with id {} not found",
            id
        )));
    }

    tracing::info!("Deleted product {}", id);

    Ok(StatusCode::NO_CONTENT)
}

/// Checks required fields and normalizes the request into the rows that will
/// replace the product's children.
pub fn validate_product(payload: ProductRequest) -> Result<NewProduct> {
    let code = require(payload.code, "code")?;
    let image_url = require(payload.image_url, "image_url")?;

    let mut seen = HashSet::new();
    let mut localizations = Vec::with_capacity(payload.localizations.len());

    for input in payload.localizations {
        let language: Language = input.language_code.parse()?;
        if !seen.insert(language) {
            return Err(AppError::BadRequest(format!(
                "Duplicate localization for language '{}'",
                language
            )));
        }

        if let Some(localization) = normalize_localization(language, input, &code) {
            localizations.push(localization);
        }
    }

    if !localizations
        .iter()
        .any(|l| l.language == Language::PRIMARY)
    {
        return Err(AppError::BadRequest(format!(
            "A {} name is required",
            Language::PRIMARY
        )));
    }

    localizations.sort_by_key(|l| l.language != Language::PRIMARY);

    Ok(NewProduct {
        code,
        image_url,
        localizations,
    })
}

fn normalize_localization(
    language: Language,
    input: LocalizationInput,
    code: &str,
) -> Option<NewLocalization> {
    let name = non_blank(input.name)?;

    let slug = non_blank(input.slug)
        .map(|s| slugify(&s))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| slugify(&name));
    let slug = if slug.is_empty() { slugify(code) } else { slug };

    Some(NewLocalization {
        language,
        description: non_blank(input.description),
        slug,
        features: normalize_items(input.features),
        usage_areas: normalize_items(input.usage_areas),
        detail: input.detail.and_then(normalize_detail),
        name,
    })
}

fn normalize_items(items: Vec<ItemInput>) -> Vec<NewItem> {
    items
        .into_iter()
        .filter_map(|item| {
            Some(NewItem {
                title: non_blank(item.title)?,
                description: non_blank(item.description),
                icon: non_blank(item.icon),
            })
        })
        .collect()
}

fn normalize_detail(detail: DetailInput) -> Option<NewDetail> {
    match (non_blank(detail.title), non_blank(detail.content)) {
        (None, None) => None,
        (title, content) => Some(NewDetail {
            title: title.unwrap_or_default(),
            content: content.unwrap_or_default(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(value: serde_json::Value) -> ProductRequest {
        serde_json::from_value(value).unwrap()
    }

    fn bad_request(value: serde_json::Value) -> bool {
        matches!(validate_product(request(value)), Err(AppError::BadRequest(_)))
    }

    #[test]
    fn requires_code_image_and_turkish_name() {
        assert!(bad_request(json!({
            "image_url": "https://cdn/x.png",
            "localizations": [{ "language_code": "tr", "name": "Cihaz" }]
        })));
        assert!(bad_request(json!({
            "code": "MR-1",
            "image_url": "  ",
            "localizations": [{ "language_code": "tr", "name": "Cihaz" }]
        })));
        assert!(bad_request(json!({
            "code": "MR-1",
            "image_url": "https://cdn/x.png",
            "localizations": [{ "language_code": "en", "name": "Device" }]
        })));
        assert!(bad_request(json!({
            "code": "MR-1",
            "image_url": "https://cdn/x.png",
            "localizations": [{ "language_code": "tr", "name": " " }]
        })));
    }

    #[test]
    fn rejects_unknown_and_duplicate_languages() {
        assert!(bad_request(json!({
            "code": "MR-1",
            "image_url": "https://cdn/x.png",
            "localizations": [
                { "language_code": "tr", "name": "Cihaz" },
                { "language_code": "de", "name": "Gerät" }
            ]
        })));
        assert!(bad_request(json!({
            "code": "MR-1",
            "image_url": "https://cdn/x.png",
            "localizations": [
                { "language_code": "tr", "name": "Cihaz" },
                { "language_code": "TR", "name": "Cihaz 2" }
            ]
        })));
    }

    #[test]
    fn normalizes_children_and_slugs() {
        let product = validate_product(request(json!({
            "code": " MR-1 ",
            "image_url": "https://cdn/x.png",
            "localizations": [
                { "language_code": "en", "name": "" },
                {
                    "language_code": "tr",
                    "name": "Manyetik Rezonans Görüntüleme",
                    "features": [
                        { "title": "Hızlı tarama", "icon": "bolt" },
                        { "title": "  " },
                        { "title": "Sessiz", "description": "" }
                    ],
                    "usage_areas": [{ "title": "Nöroloji" }],
                    "detail": { "title": "", "content": "" }
                }
            ]
        })))
        .unwrap();

        assert_eq!(product.code, "MR-1");
        assert_eq!(product.localizations.len(), 1);

        let tr = &product.localizations[0];
        assert_eq!(tr.language, Language::Tr);
        assert_eq!(tr.slug, "manyetik-rezonans-goruntuleme");
        assert_eq!(tr.features.len(), 2);
        assert_eq!(tr.features[0].icon.as_deref(), Some("bolt"));
        assert_eq!(tr.features[1].description, None);
        assert_eq!(tr.usage_areas[0].title, "Nöroloji");
        assert!(tr.detail.is_none());
    }

    #[test]
    fn primary_language_is_ordered_first_and_slug_falls_back_to_code() {
        let product = validate_product(request(json!({
            "code": "CT 64",
            "image_url": "https://cdn/x.png",
            "localizations": [
                { "language_code": "en", "name": "CT Scanner", "slug": "Custom Slug" },
                { "language_code": "tr", "name": "---" }
            ]
        })))
        .unwrap();

        assert_eq!(product.localizations[0].language, Language::Tr);
        assert_eq!(product.localizations[0].slug, "ct-64");
        assert_eq!(product.localizations[1].slug, "custom-slug");
    }
}
