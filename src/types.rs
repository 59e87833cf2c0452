use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Catalog product as served by the remote API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub category: Category,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
}

impl Product {
    /// Price as the storefront prints it: whole amounts without cents.
    pub fn display_price(&self) -> String {
        if self.price.fract() == 0.0 {
            format!("${:.0}", self.price)
        } else {
            format!("${:.2}", self.price)
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_product(id: u64, title: &str) -> Product {
    Product {
        id,
        title: title.to_string(),
        price: 10.0,
        description: format!("{} description", title),
        images: vec![format!("https://img.example/{}.png", id)],
        category: Category {
            name: "Misc".to_string(),
        },
        updated_at: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_api_product() {
        let json = r#"{
            "id": 7,
            "title": "Classic Red Hoodie",
            "slug": "classic-red-hoodie",
            "price": 44,
            "description": "Warm and soft.",
            "category": {"id": 1, "name": "Clothes", "slug": "clothes"},
            "images": ["https://i.imgur.com/a.jpeg", "https://i.imgur.com/b.jpeg"],
            "creationAt": "2024-05-01T10:00:00.000Z",
            "updatedAt": "2024-05-02T11:30:00.000Z"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, 7);
        assert_eq!(product.category.name, "Clothes");
        assert_eq!(product.images.len(), 2);
        assert_eq!(product.images[0], "https://i.imgur.com/a.jpeg");
        assert!(product.updated_at.is_some());
    }

    #[test]
    fn null_body_is_not_a_product() {
        assert!(serde_json::from_str::<Product>("null").is_err());
        assert!(serde_json::from_str::<Product>("{}").is_err());
    }

    #[test]
    fn display_price_drops_zero_cents() {
        let mut product = sample_product(1, "Mug");
        assert_eq!(product.display_price(), "$10");
        product.price = 12.5;
        assert_eq!(product.display_price(), "$12.50");
    }
}
