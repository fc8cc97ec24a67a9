//! Built-in catalog written to disk the first time the local store is used

use crate::core::data::{BeautyProduct, BeautyStandard, Catalog};

struct StandardSeed {
    id: &'static str,
    culture: &'static str,
    name: &'static str,
    description: &'static str,
    key_features: &'static [&'static str],
    style_recommendations: &'static [&'static str],
}

struct ProductSeed {
    id: &'static str,
    standard_id: &'static str,
    name: &'static str,
    description: &'static str,
    category: &'static str,
    price: f64,
}

const STANDARDS: &[StandardSeed] = &[
    StandardSeed {
        id: "korean-glass-skin",
        culture: "Korean",
        name: "Glass Skin",
        description: "Korean beauty standard emphasizing clear, luminous skin",
        key_features: &["Clear", "Dewy complexion", "Oval face", "High cheekbones"],
        style_recommendations: &[
            "Layer hydrating essences under a light cushion foundation",
            "Gradient lip tint",
            "Straight, softly filled brows",
        ],
    },
    StandardSeed {
        id: "japanese-soft-natural",
        culture: "Japanese",
        name: "Soft & Natural",
        description: "Japanese approach to natural beauty",
        key_features: &["Balanced features", "Almond eyes", "Natural", "Gentle expression"],
        style_recommendations: &[
            "Sheer base with a satin finish",
            "Warm blush placed high on the cheeks",
            "Minimal, soft-brown eyeliner",
        ],
    },
    StandardSeed {
        id: "chinese-sharp-features",
        culture: "Chinese",
        name: "Sharp Features",
        description: "Chinese beauty emphasizing defined features",
        key_features: &["Defined nose bridge", "Almond eyes", "V-shaped jawline", "Fair skin"],
        style_recommendations: &[
            "Matte base with subtle nose contour",
            "Winged eyeliner",
            "Bold red lip",
        ],
    },
    StandardSeed {
        id: "western-contoured",
        culture: "Western",
        name: "Contoured & Defined",
        description: "Western beauty focusing on sculpted features",
        key_features: &["High cheekbones", "Full lips", "Defined", "Strong bone structure"],
        style_recommendations: &[
            "Cream contour and highlight",
            "Overlined nude lip",
            "Laminated brows",
        ],
    },
    StandardSeed {
        id: "african-bold-radiant",
        culture: "African",
        name: "Bold & Radiant",
        description: "African beauty celebrating rich features",
        key_features: &["Full lips", "Radiant", "Expressive eyes", "Rich skin tone"],
        style_recommendations: &[
            "Golden highlighter on the high points",
            "Vibrant, saturated lip colors",
            "Shea-based moisture layering",
        ],
    },
];

const PRODUCTS: &[ProductSeed] = &[
    ProductSeed {
        id: "kgs-essence",
        standard_id: "korean-glass-skin",
        name: "Snail Mucin Essence",
        description: "Lightweight essence for a dewy finish",
        category: "Skincare",
        price: 24.0,
    },
    ProductSeed {
        id: "kgs-cushion",
        standard_id: "korean-glass-skin",
        name: "Glow Cushion Foundation",
        description: "Buildable, luminous coverage",
        category: "Makeup",
        price: 32.0,
    },
    ProductSeed {
        id: "kgs-tint",
        standard_id: "korean-glass-skin",
        name: "Water Lip Tint",
        description: "Sheer gradient lip stain",
        category: "Makeup",
        price: 14.5,
    },
    ProductSeed {
        id: "jsn-cleansing-oil",
        standard_id: "japanese-soft-natural",
        name: "Camellia Cleansing Oil",
        description: "Gentle first cleanse that melts makeup",
        category: "Skincare",
        price: 28.0,
    },
    ProductSeed {
        id: "jsn-blush",
        standard_id: "japanese-soft-natural",
        name: "Sheer Cheek Blush",
        description: "Soft, diffused color",
        category: "Makeup",
        price: 19.0,
    },
    ProductSeed {
        id: "csf-liner",
        standard_id: "chinese-sharp-features",
        name: "Precision Wing Liner",
        description: "Fine felt-tip liquid liner",
        category: "Makeup",
        price: 16.0,
    },
    ProductSeed {
        id: "csf-contour",
        standard_id: "chinese-sharp-features",
        name: "Nose Contour Duo",
        description: "Cool-toned shade and highlight",
        category: "Makeup",
        price: 22.0,
    },
    ProductSeed {
        id: "wcd-contour",
        standard_id: "western-contoured",
        name: "Cream Contour Stick",
        description: "Blendable sculpting stick",
        category: "Makeup",
        price: 26.0,
    },
    ProductSeed {
        id: "wcd-lip",
        standard_id: "western-contoured",
        name: "Nude Lip Liner",
        description: "Long-wear liner for fuller lips",
        category: "Makeup",
        price: 12.0,
    },
    ProductSeed {
        id: "abr-highlighter",
        standard_id: "african-bold-radiant",
        name: "Golden Glow Highlighter",
        description: "Pigment-rich highlight for deeper skin tones",
        category: "Makeup",
        price: 29.0,
    },
    ProductSeed {
        id: "abr-butter",
        standard_id: "african-bold-radiant",
        name: "Whipped Shea Body Butter",
        description: "Rich, fast-absorbing moisture",
        category: "Skincare",
        price: 18.0,
    },
];

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn default_catalog() -> Catalog {
    let standards = STANDARDS
        .iter()
        .map(|s| BeautyStandard {
            id: s.id.to_string(),
            culture: s.culture.to_string(),
            name: s.name.to_string(),
            description: s.description.to_string(),
            key_features: owned(s.key_features),
            style_recommendations: owned(s.style_recommendations),
        })
        .collect();

    let products = PRODUCTS
        .iter()
        .map(|p| BeautyProduct {
            id: p.id.to_string(),
            standard_id: p.standard_id.to_string(),
            name: p.name.to_string(),
            description: p.description.to_string(),
            category: p.category.to_string(),
            price: p.price,
            image_url: String::new(),
        })
        .collect();

    Catalog::new(standards, products)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::group_products;
    use crate::core::matching::rank;

    #[test]
    fn test_every_product_belongs_to_a_standard() {
        let catalog = default_catalog();
        for product in &catalog.products {
            assert!(
                catalog.standards.iter().any(|s| s.id == product.standard_id),
                "orphan product {}",
                product.id
            );
        }
        let grouped = group_products(&catalog.standards, &catalog.products);
        assert!(grouped.values().all(|items| !items.is_empty()));
    }

    #[test]
    fn test_simulated_features_rank_glass_skin_first() {
        let catalog = default_catalog();
        let observed = owned(&[
            "Clear, dewy complexion",
            "High cheekbones",
            "Almond eyes",
            "Defined nose bridge",
            "Full lips",
        ]);

        let ranked = rank(&catalog.standards, &observed);
        let order: Vec<(&str, u8)> = ranked
            .iter()
            .map(|m| (m.standard.id.as_str(), m.percentage))
            .collect();
        assert_eq!(
            order,
            vec![
                ("korean-glass-skin", 75),
                ("western-contoured", 75),
                ("chinese-sharp-features", 50),
                ("japanese-soft-natural", 25),
                ("african-bold-radiant", 25),
            ]
        );
    }
}
