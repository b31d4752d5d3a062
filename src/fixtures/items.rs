//! Item Fixtures

use serde::Deserialize;

use crate::{
    fixtures::FixtureError,
    items::{Item, parse_price},
};

/// Item Fixture
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemFixture {
    /// Item price (e.g., "12.50")
    pub price: String,

    /// Minimum number of picks, must not be negative
    #[serde(default)]
    pub min: i64,

    /// Whether the item takes part in searches
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl TryFrom<ItemFixture> for Item {
    type Error = FixtureError;

    fn try_from(fixture: ItemFixture) -> Result<Self, Self::Error> {
        let item = Item::new(parse_price(&fixture.price)?).try_with_min_count(fixture.min)?;

        Ok(if fixture.active { item } else { item.inactive() })
    }
}
