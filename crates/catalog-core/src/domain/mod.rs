//! Domain entities - the core business objects.

mod item;

pub use item::{
    Item, ItemChanges, ItemFilter, ItemId, ItemOrder, NAME_MAX_CHARS, NewItem, PAGE_BOUND_MAX,
};
