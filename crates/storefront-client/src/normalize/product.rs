use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;
use storefront_core::{CanonicalProduct, ProductTranslation, ProductVariant, PLACEHOLDER_IMAGE_URL};

use crate::coalesce::{coalesce, field};
use crate::coerce::{opt_boolean, opt_number, opt_text, to_count, to_number, to_text};
use crate::media::MediaResolver;

use super::fresh_id;

const ID_KEYS: &[&str] = &["id", "Id", "ID", "_id", "productId", "ProductId"];
const NAME_KEYS: &[&str] = &["name", "Name", "productName", "ProductName", "title", "Title"];
const PRICE_KEYS: &[&str] = &["price", "Price", "salePrice", "SalePrice"];
const ORIGINAL_PRICE_KEYS: &[&str] = &[
    "originalPrice",
    "OriginalPrice",
    "compareAtPrice",
    "CompareAtPrice",
    "oldPrice",
];
const VOLUME_KEYS: &[&str] = &["volume", "Volume", "size", "Size"];
const IMAGE_PATH_KEYS: &[&str] = &[
    "url", "Url", "URL", "imageUrl", "ImageUrl", "path", "Path", "src", "filePath", "FilePath",
];
const SINGLE_IMAGE_KEYS: &[&str] = &[
    "imageUrl",
    "ImageUrl",
    "image",
    "Image",
    "mainImage",
    "MainImage",
    "thumbnail",
    "Thumbnail",
];

/// Normalizes one product payload.
///
/// Images come from the first non-empty source among `images`, `imageUrls`,
/// and single-image fields; the placeholder stands in when all are empty.
/// When variants exist, top-level price, volume, and original price mirror
/// the first variant.
#[must_use]
pub fn normalize_product(raw: &Value, media: &MediaResolver) -> CanonicalProduct {
    let variants = extract_variants(raw);
    let (price, volume, original_price) = match variants.first() {
        Some(first) => (first.price, first.volume.clone(), first.original_price),
        None => (
            field(raw, PRICE_KEYS).map_or(0.0, to_number).max(0.0),
            opt_text(field(raw, VOLUME_KEYS)).unwrap_or_default(),
            opt_number(field(raw, ORIGINAL_PRICE_KEYS)),
        ),
    };

    let category_id = opt_text(field(
        raw,
        &["categoryId", "CategoryId", "category.id", "Category.Id", "category.Id"],
    ));
    let category_name = opt_text(field(
        raw,
        &["categoryName", "CategoryName", "category.name", "Category.Name", "category.Name"],
    ));
    let brand_id = opt_text(field(
        raw,
        &["brandId", "BrandId", "brand.id", "Brand.Id", "brand.Id"],
    ));
    let brand_name = opt_text(field(
        raw,
        &["brandName", "BrandName", "brand.name", "Brand.Name", "brand.Name"],
    ));

    CanonicalProduct {
        id: opt_text(field(raw, ID_KEYS)).unwrap_or_else(fresh_id),
        name: opt_text(field(raw, NAME_KEYS)).unwrap_or_default(),
        slug: opt_text(field(raw, &["slug", "Slug", "handle"])),
        description: opt_text(field(
            raw,
            &["description", "Description", "shortDescription", "ShortDescription"],
        ))
        .unwrap_or_default(),
        price,
        original_price,
        images: extract_images(raw, media),
        category: field(raw, &["category", "Category"])
            .and_then(to_text)
            .or_else(|| category_name.clone())
            .unwrap_or_default(),
        category_id,
        category_name,
        brand: field(raw, &["brand", "Brand"])
            .and_then(to_text)
            .or_else(|| brand_name.clone())
            .unwrap_or_default(),
        brand_id,
        brand_name,
        volume,
        product_type: opt_text(field(raw, &["type", "Type", "productType", "ProductType"]))
            .unwrap_or_default(),
        tags: extract_tags(raw),
        is_active: opt_boolean(field(raw, &["isActive", "IsActive", "active", "Active"])),
        is_featured: opt_boolean(field(
            raw,
            &["isFeatured", "IsFeatured", "featured", "Featured"],
        )),
        rating: opt_number(field(
            raw,
            &["rating", "Rating", "averageRating", "AverageRating"],
        )),
        review_count: field(
            raw,
            &["reviewCount", "ReviewCount", "reviewsCount", "totalReviews"],
        )
        .map(to_count),
        variants,
        translations: extract_translations(raw),
    }
}

fn extract_variants(raw: &Value) -> Vec<ProductVariant> {
    field(
        raw,
        &["variants", "Variants", "productVariants", "ProductVariants"],
    )
    .and_then(Value::as_array)
    .map(|entries| {
        entries
            .iter()
            .filter(|entry| entry.is_object())
            .map(normalize_variant)
            .collect()
    })
    .unwrap_or_default()
}

fn normalize_variant(raw: &Value) -> ProductVariant {
    ProductVariant {
        volume: opt_text(field(
            raw,
            &["volume", "Volume", "size", "Size", "name", "Name"],
        ))
        .unwrap_or_default(),
        price: field(raw, PRICE_KEYS).map_or(0.0, to_number).max(0.0),
        original_price: opt_number(field(raw, ORIGINAL_PRICE_KEYS)),
        is_active: opt_boolean(field(raw, &["isActive", "IsActive", "active"])),
    }
}

fn extract_images(raw: &Value, media: &MediaResolver) -> Vec<String> {
    let paths = coalesce([
        non_empty(image_collection(raw)),
        non_empty(image_url_list(raw)),
        non_empty(
            field(raw, SINGLE_IMAGE_KEYS)
                .and_then(image_entry_path)
                .into_iter()
                .collect(),
        ),
    ])
    .unwrap_or_default();

    let resolved: Vec<String> = paths
        .iter()
        .map(|path| media.resolve(Some(path.as_str())))
        .collect();
    if resolved.is_empty() {
        vec![PLACEHOLDER_IMAGE_URL.to_string()]
    } else {
        resolved
    }
}

/// Paths from an `images` collection whose entries are strings or objects.
fn image_collection(raw: &Value) -> Vec<String> {
    match field(raw, &["images", "Images", "productImages", "ProductImages"]) {
        Some(Value::Array(entries)) => entries.iter().filter_map(image_entry_path).collect(),
        Some(single) => image_entry_path(single).into_iter().collect(),
        None => Vec::new(),
    }
}

fn image_entry_path(entry: &Value) -> Option<String> {
    match entry {
        Value::Object(_) => opt_text(field(entry, IMAGE_PATH_KEYS)),
        other => to_text(other),
    }
}

fn image_url_list(raw: &Value) -> Vec<String> {
    field(raw, &["imageUrls", "ImageUrls"])
        .and_then(Value::as_array)
        .map(|urls| urls.iter().filter_map(to_text).collect())
        .unwrap_or_default()
}

fn non_empty(paths: Vec<String>) -> Option<Vec<String>> {
    (!paths.is_empty()).then_some(paths)
}

/// Tags from an array of strings or a comma-separated string.
fn extract_tags(raw: &Value) -> Option<BTreeSet<String>> {
    match field(raw, &["tags", "Tags"])? {
        Value::Array(entries) => Some(entries.iter().filter_map(to_text).collect()),
        Value::String(joined) => Some(
            joined
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect(),
        ),
        _ => None,
    }
}

/// Builds the translations map only when the payload carries translations.
///
/// Accepts a language-keyed object, an array of entries naming their
/// language, or flat `nameEn`-style fields (mapped to `"en"`).
fn extract_translations(raw: &Value) -> Option<BTreeMap<String, ProductTranslation>> {
    let structured: BTreeMap<String, ProductTranslation> =
        match field(raw, &["translations", "Translations"]) {
            Some(Value::Object(by_lang)) => by_lang
                .iter()
                .filter_map(|(lang, entry)| {
                    translation_entry(entry).map(|t| (lang.trim().to_lowercase(), t))
                })
                .collect(),
            Some(Value::Array(entries)) => entries
                .iter()
                .filter_map(|entry| {
                    let lang = opt_text(field(
                        entry,
                        &[
                            "language",
                            "Language",
                            "languageCode",
                            "LanguageCode",
                            "lang",
                            "locale",
                        ],
                    ))?;
                    translation_entry(entry).map(|t| (lang.to_lowercase(), t))
                })
                .collect(),
            _ => BTreeMap::new(),
        };
    if !structured.is_empty() {
        return Some(structured);
    }

    let flat = ProductTranslation {
        name: opt_text(field(raw, &["nameEn", "NameEn", "name_en"])),
        description: opt_text(field(
            raw,
            &["descriptionEn", "DescriptionEn", "description_en"],
        )),
        product_type: opt_text(field(raw, &["typeEn", "TypeEn", "type_en"])),
    };
    if flat == ProductTranslation::default() {
        return None;
    }
    Some(BTreeMap::from([("en".to_string(), flat)]))
}

fn translation_entry(entry: &Value) -> Option<ProductTranslation> {
    let translation = ProductTranslation {
        name: opt_text(field(entry, &["name", "Name"])),
        description: opt_text(field(entry, &["description", "Description"])),
        product_type: opt_text(field(entry, &["type", "Type", "productType"])),
    };
    (translation != ProductTranslation::default()).then_some(translation)
}

#[cfg(test)]
#[path = "product_test.rs"]
mod tests;
