use serde_json::Value;
use storefront_core::CanonicalCategory;

use crate::coalesce::field;
use crate::coerce::{opt_text, to_count};
use crate::media::MediaResolver;

use super::fresh_id;

#[must_use]
pub fn normalize_category(raw: &Value, media: &MediaResolver) -> CanonicalCategory {
    let image = opt_text(field(
        raw,
        &["imageUrl", "ImageUrl", "image", "Image", "thumbnail", "Thumbnail"],
    ));

    CanonicalCategory {
        id: opt_text(field(raw, &["id", "Id", "ID", "_id", "categoryId", "CategoryId"]))
            .unwrap_or_else(fresh_id),
        name: opt_text(field(raw, &["name", "Name", "categoryName", "CategoryName", "title"]))
            .unwrap_or_default(),
        slug: opt_text(field(raw, &["slug", "Slug"])),
        description: opt_text(field(raw, &["description", "Description"])),
        image_url: media.resolve_optional(image.as_deref()),
        parent_id: opt_text(field(
            raw,
            &["parentId", "ParentId", "parent.id", "Parent.Id"],
        )),
        product_count: field(
            raw,
            &["productCount", "ProductCount", "productsCount", "totalProducts"],
        )
        .map(to_count),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn media() -> MediaResolver {
        MediaResolver::new("http://media.shop.test/")
    }

    #[test]
    fn reads_mixed_case_fields() {
        let raw = json!({
            "Id": 3,
            "Name": "Woody",
            "ImageUrl": "\\uploads\\cat\\woody.png",
            "ProductCount": "12",
            "parent": { "id": 1 }
        });
        let category = normalize_category(&raw, &media());
        assert_eq!(category.id, "3");
        assert_eq!(category.name, "Woody");
        assert_eq!(
            category.image_url.as_deref(),
            Some("http://media.shop.test/uploads/cat/woody.png")
        );
        assert_eq!(category.product_count, Some(12));
        assert_eq!(category.parent_id.as_deref(), Some("1"));
    }

    #[test]
    fn absent_image_stays_absent() {
        let category = normalize_category(&json!({ "id": 1, "name": "Floral" }), &media());
        assert!(category.image_url.is_none());
        assert!(category.product_count.is_none());
    }

    #[test]
    fn non_object_payload_yields_defaulted_record() {
        let category = normalize_category(&json!(17), &media());
        assert!(!category.id.is_empty());
        assert!(category.name.is_empty());
    }
}
