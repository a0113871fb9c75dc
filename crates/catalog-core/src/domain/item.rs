use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, SubsecRound, Utc};

use crate::error::DomainError;

/// Identifier assigned by the store when an item is inserted.
pub type ItemId = i64;

/// Maximum length of an item name, counted in characters.
pub const NAME_MAX_CHARS: usize = 100;

/// Largest `limit` or `offset` a listing accepts. Databases bind these as
/// signed 64-bit integers.
pub const PAGE_BOUND_MAX: u64 = i64::MAX as u64;

/// Item entity - a named, described piece of content with a publication state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub published: bool,
    pub created_at: DateTime<Utc>,
}

impl Item {
    /// Human-readable label of the item: its name, verbatim.
    pub fn display_name(&self) -> &str {
        &self.name
    }

    /// Timestamp for a record being inserted now.
    ///
    /// Storage keeps microseconds, so the value is rounded up to the next
    /// microsecond. It is never earlier than the moment of the call.
    pub fn creation_timestamp() -> DateTime<Utc> {
        let now = Utc::now();
        let truncated = now.trunc_subsecs(6);
        if truncated < now {
            truncated + Duration::microseconds(1)
        } else {
            truncated
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Fields required to create an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub name: String,
    pub description: String,
    pub published: bool,
}

impl NewItem {
    /// A new, unpublished item.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            published: false,
        }
    }

    pub fn published(mut self, published: bool) -> Self {
        self.published = published;
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        validate_name(&self.name)
    }
}

/// Partial update of an item. Only the mutable fields exist here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub published: Option<bool>,
}

impl ItemChanges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn published(mut self, published: bool) -> Self {
        self.published = Some(published);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.published.is_none()
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        match &self.name {
            Some(name) => validate_name(name),
            None => Ok(()),
        }
    }

    /// Apply the changes onto an item. `id` and `created_at` are left alone.
    pub fn apply_to(self, item: &mut Item) {
        if let Some(name) = self.name {
            item.name = name;
        }
        if let Some(description) = self.description {
            item.description = description;
        }
        if let Some(published) = self.published {
            item.published = published;
        }
    }
}

/// Ordering of a listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ItemOrder {
    /// Insertion order.
    #[default]
    Oldest,
    /// Reverse insertion order.
    Newest,
    /// By name in code point order (the `C` collation), ties in insertion order.
    Name,
}

impl FromStr for ItemOrder {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "oldest" => Ok(Self::Oldest),
            "newest" => Ok(Self::Newest),
            "name" => Ok(Self::Name),
            other => Err(DomainError::invalid(
                "order",
                format!("unknown ordering '{other}', expected oldest, newest or name"),
            )),
        }
    }
}

/// Criteria for listing items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemFilter {
    pub published: Option<bool>,
    pub order: ItemOrder,
    pub limit: Option<u64>,
    pub offset: u64,
}

impl ItemFilter {
    pub fn published(mut self, published: bool) -> Self {
        self.published = Some(published);
        self
    }

    pub fn order(mut self, order: ItemOrder) -> Self {
        self.order = order;
        self
    }

    pub fn page(mut self, offset: u64, limit: u64) -> Self {
        self.offset = offset;
        self.limit = Some(limit);
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.limit.is_some_and(|limit| limit > PAGE_BOUND_MAX) {
            return Err(DomainError::invalid(
                "limit",
                format!("must be at most {PAGE_BOUND_MAX}"),
            ));
        }
        if self.offset > PAGE_BOUND_MAX {
            return Err(DomainError::invalid(
                "offset",
                format!("must be at most {PAGE_BOUND_MAX}"),
            ));
        }
        Ok(())
    }

    pub fn matches(&self, item: &Item) -> bool {
        self.published.is_none_or(|p| item.published == p)
    }
}

fn validate_name(name: &str) -> Result<(), DomainError> {
    if name.is_empty() {
        return Err(DomainError::invalid("name", "must not be empty"));
    }

    let len = name.chars().count();
    if len > NAME_MAX_CHARS {
        return Err(DomainError::invalid(
            "name",
            format!("must be at most {NAME_MAX_CHARS} characters, got {len}"),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Item {
        Item {
            id: 1,
            name: "Widget".to_string(),
            description: String::new(),
            published: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_display_is_name() {
        let item = sample();
        assert_eq!(item.to_string(), "Widget");
        assert_eq!(item.display_name(), "Widget");
    }

    #[test]
    fn test_new_item_defaults_to_unpublished() {
        let item = NewItem::new("Widget", "A small widget");
        assert!(!item.published);
        assert!(item.published(true).published);
    }

    #[test]
    fn test_name_length_bound() {
        assert!(NewItem::new("a".repeat(100), "").validate().is_ok());

        let err = NewItem::new("a".repeat(101), "").validate().unwrap_err();
        assert!(matches!(err, DomainError::Validation { field: "name", .. }));
    }

    #[test]
    fn test_name_length_counts_characters() {
        // 100 two-byte characters
        assert!(NewItem::new("é".repeat(100), "").validate().is_ok());
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = NewItem::new("", "desc").validate().unwrap_err();
        assert!(matches!(err, DomainError::Validation { field: "name", .. }));
    }

    #[test]
    fn test_changes_keep_identity() {
        let mut item = sample();
        let before = item.clone();

        ItemChanges::new()
            .name("Gadget")
            .published(false)
            .apply_to(&mut item);

        assert_eq!(item.id, before.id);
        assert_eq!(item.created_at, before.created_at);
        assert_eq!(item.name, "Gadget");
        assert_eq!(item.description, before.description);
        assert!(!item.published);
    }

    #[test]
    fn test_changes_validate_name_only_when_present() {
        assert!(ItemChanges::new().published(true).validate().is_ok());
        assert!(ItemChanges::new().name("x".repeat(101)).validate().is_err());
        assert!(ItemChanges::new().is_empty());
    }

    #[test]
    fn test_order_parsing() {
        assert_eq!("newest".parse::<ItemOrder>().unwrap(), ItemOrder::Newest);
        assert_eq!("Name".parse::<ItemOrder>().unwrap(), ItemOrder::Name);
        assert!("random".parse::<ItemOrder>().is_err());
    }

    #[test]
    fn test_creation_timestamp_has_microsecond_precision() {
        let before = Utc::now();
        let stamp = Item::creation_timestamp();
        assert!(stamp >= before);
        assert_eq!(stamp.timestamp_subsec_nanos() % 1_000, 0);
    }

    #[test]
    fn test_filter_page_bounds() {
        assert!(ItemFilter::default().page(0, PAGE_BOUND_MAX).validate().is_ok());

        let err = ItemFilter::default().page(0, u64::MAX).validate().unwrap_err();
        assert!(matches!(err, DomainError::Validation { field: "limit", .. }));

        let err = ItemFilter::default()
            .page(PAGE_BOUND_MAX + 1, 10)
            .validate()
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation { field: "offset", .. }));
    }

    #[test]
    fn test_filter_matches_published_state() {
        let item = sample();
        assert!(ItemFilter::default().matches(&item));
        assert!(ItemFilter::default().published(true).matches(&item));
        assert!(!ItemFilter::default().published(false).matches(&item));
    }
}
