//! The fixed menu both agents sell from.
//!
//! Every tool schema that mentions a menu item takes its `enum` from
//! [`MenuItem::ALL`], so the sales and payment agents cannot drift apart.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MenuItem {
    #[serde(rename = "Big Burger Combo")]
    BigBurgerCombo,
    #[serde(rename = "Double Cheeseburger")]
    DoubleCheeseburger,
    #[serde(rename = "Cheeseburger")]
    Cheeseburger,
    #[serde(rename = "Hamburger")]
    Hamburger,
    #[serde(rename = "Crispy Chicken Sandwich")]
    CrispyChickenSandwich,
    #[serde(rename = "Chicken Nuggets (6 pc)")]
    ChickenNuggets,
    #[serde(rename = "Crispy Fish Sandwich")]
    CrispyFishSandwich,
    #[serde(rename = "Fries")]
    Fries,
    #[serde(rename = "Baked Apple Pie")]
    BakedApplePie,
    #[serde(rename = "Manzana Postobon® Drink")]
    ManzanaPostobonDrink,
}

impl MenuItem {
    /// Menu order, as shown to customers and listed in every schema.
    pub const ALL: [Self; 10] = [
        Self::BigBurgerCombo,
        Self::DoubleCheeseburger,
        Self::Cheeseburger,
        Self::Hamburger,
        Self::CrispyChickenSandwich,
        Self::ChickenNuggets,
        Self::CrispyFishSandwich,
        Self::Fries,
        Self::BakedApplePie,
        Self::ManzanaPostobonDrink,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::BigBurgerCombo => "Big Burger Combo",
            Self::DoubleCheeseburger => "Double Cheeseburger",
            Self::Cheeseburger => "Cheeseburger",
            Self::Hamburger => "Hamburger",
            Self::CrispyChickenSandwich => "Crispy Chicken Sandwich",
            Self::ChickenNuggets => "Chicken Nuggets (6 pc)",
            Self::CrispyFishSandwich => "Crispy Fish Sandwich",
            Self::Fries => "Fries",
            Self::BakedApplePie => "Baked Apple Pie",
            Self::ManzanaPostobonDrink => "Manzana Postobon® Drink",
        }
    }

    #[must_use]
    pub const fn blurb(self) -> &'static str {
        match self {
            Self::BigBurgerCombo => "Classic burger + fries + medium drink",
            Self::DoubleCheeseburger => "Two patties, American cheese",
            Self::Cheeseburger => "Pickles, onions, ketchup, mustard",
            Self::Hamburger => "Simple & classic",
            Self::CrispyChickenSandwich => "Lettuce, mayo",
            Self::ChickenNuggets => "Choice of sauces",
            Self::CrispyFishSandwich => "Tartar sauce, shredded lettuce",
            Self::Fries => "Small/Medium/Large",
            Self::BakedApplePie => "Warm handheld pie",
            Self::ManzanaPostobonDrink => "Ice-cold, refreshing",
        }
    }

    /// Price in US cents.
    #[must_use]
    pub const fn price_cents(self) -> u32 {
        match self {
            Self::BigBurgerCombo => 1489,
            Self::DoubleCheeseburger => 579,
            Self::Cheeseburger => 349,
            Self::Hamburger => 299,
            Self::CrispyChickenSandwich => 499,
            Self::ChickenNuggets => 449,
            Self::CrispyFishSandwich => 529,
            Self::Fries => 319,
            Self::BakedApplePie => 179,
            Self::ManzanaPostobonDrink => 149,
        }
    }

    #[must_use]
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|item| item.name()).collect()
    }
}

impl std::fmt::Display for MenuItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One line per item, in the format the agent instructions use.
pub(crate) fn price_list() -> String {
    MenuItem::ALL
        .iter()
        .map(|item| {
            let cents = item.price_cents();
            format!(
                "- {} ({})  - ${}.{:02} USD",
                item.name(),
                item.blurb(),
                cents / 100,
                cents % 100
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub(crate) fn menu_item_property(description: &str) -> Value {
    json!({
        "type": "string",
        "enum": MenuItem::names(),
        "description": description,
    })
}

/// Schema for a `{menu_item, quantity}` cart line. Only ever forwarded; the
/// server never materialises a cart.
pub(crate) fn cart_line_schema(menu_item_description: &str) -> Value {
    json!({
        "type": "object",
        "properties": {
            "menu_item": menu_item_property(menu_item_description),
            "quantity": {
                "type": "integer",
                "minimum": 1,
                "description": "Number of units",
            },
        },
        "required": ["menu_item", "quantity"],
    })
}

pub(crate) fn cart_property(description: &str, menu_item_description: &str) -> Value {
    json!({
        "type": "array",
        "description": description,
        "items": cart_line_schema(menu_item_description),
    })
}
