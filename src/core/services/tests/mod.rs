
use crate::domain::{Item, ItemId, Quadrant};

pub(super) fn item(id: &str, price: u64, quad: Quadrant, selected: bool) -> Item {
    Item {
        id: ItemId::new(id),
        name: id.to_uppercase(),
        price,
        quad,
        selected,
    }
}
