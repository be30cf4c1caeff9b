//! Vehicle card records
//!
//! A card is created once when the inventory is loaded and never mutated.
//! Its identity is its position in the source collection.

use serde::{Deserialize, Deserializer, Serialize};

/// One listing on the inventory grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleCard {
    /// Category tag used by the category select (e.g. "suv", "sedan")
    pub category: String,

    /// Asking price, `None` when the source value was not numeric
    #[serde(default, deserialize_with = "deserialize_price")]
    pub price: Option<i64>,

    /// Display name, e.g. "2024 Mercedes-Benz GLE"
    #[serde(default)]
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Corner badge ("New", "Certified", ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
}

impl VehicleCard {
    /// Bare card with only the attributes the filter engine reads
    pub fn new(category: impl Into<String>, price: i64) -> Self {
        Self {
            category: category.into(),
            price: Some(price),
            title: String::new(),
            image: None,
            badge: None,
            features: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Price formatted for the card footer: "$45,000" or "Call for price"
    pub fn display_price(&self) -> String {
        match self.price {
            Some(p) => format_currency(p),
            None => "Call for price".to_string(),
        }
    }
}

/// Format a whole-dollar amount with thousands separators
pub fn format_currency(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if amount < 0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// Accept the price as a JSON number or as the numeric string the markup
/// carried in `data-price`. Anything else loads as no price.
fn deserialize_price<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::Number(n) => n.as_i64(),
        serde_json::Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_from_number_or_string() {
        let card: VehicleCard =
            serde_json::from_str(r#"{"category": "suv", "price": 45000}"#).unwrap();
        assert_eq!(card.price, Some(45000));

        let card: VehicleCard =
            serde_json::from_str(r#"{"category": "suv", "price": " 38500 "}"#).unwrap();
        assert_eq!(card.price, Some(38500));
    }

    #[test]
    fn test_malformed_price_loads_as_none() {
        let card: VehicleCard =
            serde_json::from_str(r#"{"category": "coupe", "price": "call us"}"#).unwrap();
        assert_eq!(card.price, None);

        let card: VehicleCard = serde_json::from_str(r#"{"category": "coupe"}"#).unwrap();
        assert_eq!(card.price, None);
        assert_eq!(card.display_price(), "Call for price");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0), "$0");
        assert_eq!(format_currency(999), "$999");
        assert_eq!(format_currency(45000), "$45,000");
        assert_eq!(format_currency(1234567), "$1,234,567");
        assert_eq!(format_currency(-2500), "-$2,500");
    }
}
