use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Language;

// DB models

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: i32,
    pub code: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductLocalization {
    pub id: i32,
    pub product_id: i32,
    pub language_code: String,
    pub name: String,
    pub description: Option<String>,
    pub slug: String,
}

/// Row shape shared by `product_features` and `product_usage_areas`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductItem {
    pub id: i32,
    pub product_id: i32,
    pub language_code: String,
    pub title: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub sort_order: i32,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductDetail {
    pub id: i32,
    pub product_id: i32,
    pub language_code: String,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProductSummary {
    pub id: i32,
    pub code: String,
    pub image_url: String,
    pub language_code: String,
    pub name: String,
    pub description: Option<String>,
    pub slug: String,
}

// Request types

#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    pub code: Option<String>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub localizations: Vec<LocalizationInput>,
}

#[derive(Debug, Deserialize)]
pub struct LocalizationInput {
    pub language_code: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub slug: Option<String>,
    #[serde(default)]
    pub features: Vec<ItemInput>,
    #[serde(default)]
    pub usage_areas: Vec<ItemInput>,
    pub detail: Option<DetailInput>,
}

#[derive(Debug, Deserialize)]
pub struct ItemInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DetailInput {
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProductListQuery {
    pub lang: Option<String>,
}

/// A product request that passed validation and normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub code: String,
    pub image_url: String,
    pub localizations: Vec<NewLocalization>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewLocalization {
    pub language: Language,
    pub name: String,
    pub description: Option<String>,
    pub slug: String,
    pub features: Vec<NewItem>,
    pub usage_areas: Vec<NewItem>,
    pub detail: Option<NewDetail>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub title: String,
    pub description: Option<String>,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewDetail {
    pub title: String,
    pub content: String,
}

// Response types

#[derive(Debug, Clone, Serialize)]
pub struct ProductAggregate {
    #[serde(flatten)]
    pub product: Product,
    pub localizations: Vec<LocalizationView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LocalizationView {
    pub language_code: String,
    pub name: String,
    pub description: Option<String>,
    pub slug: String,
    pub features: Vec<ItemView>,
    pub usage_areas: Vec<ItemView>,
    pub detail: Option<DetailView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ItemView {
    pub title: String,
    pub description: Option<String>,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DetailView {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct LocalizedProduct {
    pub id: i32,
    pub code: String,
    pub image_url: String,
    #[serde(flatten)]
    pub localization: LocalizationView,
}

impl From<ProductItem> for ItemView {
    fn from(item: ProductItem) -> Self {
        Self {
            title: item.title,
            description: item.description,
            icon: item.icon,
        }
    }
}

impl From<ProductDetail> for DetailView {
    fn from(detail: ProductDetail) -> Self {
        Self {
            title: detail.title,
            content: detail.content,
        }
    }
}

impl ProductAggregate {
    /// Picks the localization for `language`, falling back to the primary
    /// language and then to whatever exists.
    pub fn localized(self, language: Language) -> Option<LocalizedProduct> {
        let ProductAggregate {
            product,
            mut localizations,
        } = self;

        let index = localizations
            .iter()
            .position(|l| l.language_code == language.as_str())
            .or_else(|| {
                localizations
                    .iter()
                    .position(|l| l.language_code == Language::PRIMARY.as_str())
            })
            .or(if localizations.is_empty() { None } else { Some(0) })?;

        Some(LocalizedProduct {
            id: product.id,
            code: product.code,
            image_url: product.image_url,
            localization: localizations.swap_remove(index),
        })
    }
}
