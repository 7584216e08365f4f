//! Category data types.

use chrono::{DateTime, Utc};
use pocketbook_shared::types::{CategoryId, UserId};
use serde::Serialize;

use super::error::CategoryError;
use crate::limits::{MAX_ICON_CHARS, MAX_NAME_CHARS, within_chars};
use crate::transaction::TransactionKind;

/// Color given to categories created without one.
pub const DEFAULT_COLOR: &str = "#3498db";

/// A default or user-defined category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Category ID.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// Income or expense.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// `#rrggbb` color.
    pub color: String,
    /// Emoji or icon name; may be empty.
    pub icon: String,
    /// Seeded category visible to everyone.
    pub is_default: bool,
    /// Owner; `None` for defaults.
    #[serde(skip_serializing)]
    pub owner_id: Option<UserId>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

fn validate_color(color: &str) -> Result<(), CategoryError> {
    let hex = color.strip_prefix('#').unwrap_or_default();
    if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        Ok(())
    } else {
        Err(CategoryError::InvalidColor(color.to_string()))
    }
}

fn validate_name(name: &str) -> Result<String, CategoryError> {
    let name = name.trim();
    if name.is_empty() {
        Err(CategoryError::EmptyName)
    } else if !within_chars(name, MAX_NAME_CHARS) {
        Err(CategoryError::NameTooLong)
    } else {
        Ok(name.to_string())
    }
}

fn validate_icon(icon: &str) -> Result<(), CategoryError> {
    if within_chars(icon, MAX_ICON_CHARS) {
        Ok(())
    } else {
        Err(CategoryError::IconTooLong)
    }
}

/// Validated fields for a new user category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    /// Display name, trimmed.
    pub name: String,
    /// Income or expense.
    pub kind: TransactionKind,
    /// `#rrggbb` color.
    pub color: String,
    /// Icon; empty when absent.
    pub icon: String,
}

impl NewCategory {
    /// Builds a new category from raw request fields. Missing or blank color
    /// and icon take their defaults.
    ///
    /// # Errors
    ///
    /// Returns a validation variant for a blank or overlong name, an unknown
    /// kind, a malformed color or an overlong icon.
    pub fn new(
        name: &str,
        kind: &str,
        color: Option<&str>,
        icon: Option<&str>,
    ) -> Result<Self, CategoryError> {
        let name = validate_name(name)?;
        let kind =
            TransactionKind::parse(kind).ok_or_else(|| CategoryError::InvalidKind(kind.to_string()))?;
        let color = match color.map(str::trim).filter(|c| !c.is_empty()) {
            Some(color) => {
                validate_color(color)?;
                color.to_string()
            }
            None => DEFAULT_COLOR.to_string(),
        };
        let icon = icon.map(str::trim).unwrap_or_default();
        validate_icon(icon)?;

        Ok(Self {
            name,
            kind,
            color,
            icon: icon.to_string(),
        })
    }
}

/// Partial update of a user category. Absent or blank fields keep their
/// current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryUpdate {
    /// New name.
    pub name: Option<String>,
    /// New color.
    pub color: Option<String>,
    /// New icon.
    pub icon: Option<String>,
}

impl CategoryUpdate {
    /// Builds an update from raw request fields.
    ///
    /// # Errors
    ///
    /// Returns a validation variant for an overlong name or icon, or a
    /// malformed color.
    pub fn new(
        name: Option<&str>,
        color: Option<&str>,
        icon: Option<&str>,
    ) -> Result<Self, CategoryError> {
        let non_blank = |v: Option<&str>| {
            v.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(ToString::to_string)
        };
        let name = non_blank(name).map(|n| validate_name(&n)).transpose()?;
        let color = non_blank(color);
        if let Some(color) = &color {
            validate_color(color)?;
        }
        let icon = non_blank(icon);
        if let Some(icon) = &icon {
            validate_icon(icon)?;
        }

        Ok(Self { name, color, icon })
    }

    /// Applies the update to `category`.
    pub fn apply_to(&self, category: &mut Category) {
        if let Some(name) = &self.name {
            category.name.clone_from(name);
        }
        if let Some(color) = &self.color {
            category.color.clone_from(color);
        }
        if let Some(icon) = &self.icon {
            category.icon.clone_from(icon);
        }
    }
}

/// Orders categories for listing: defaults first, then by name.
pub fn sort_for_listing(categories: &mut [Category]) {
    categories.sort_by(|a, b| {
        b.is_default
            .cmp(&a.is_default)
            .then_with(|| a.name.cmp(&b.name))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(name: &str, is_default: bool, owner: Option<UserId>) -> Category {
        let now = Utc::now();
        Category {
            id: CategoryId::new(),
            name: name.to_string(),
            kind: TransactionKind::Expense,
            color: DEFAULT_COLOR.to_string(),
            icon: String::new(),
            is_default,
            owner_id: owner,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_new_category_defaults() {
        let input = NewCategory::new(" Pets ", "expense", None, None).unwrap();

        assert_eq!(input.name, "Pets");
        assert_eq!(input.kind, TransactionKind::Expense);
        assert_eq!(input.color, DEFAULT_COLOR);
        assert_eq!(input.icon, "");
    }

    #[test]
    fn test_new_category_validation() {
        assert!(matches!(
            NewCategory::new(" ", "expense", None, None),
            Err(CategoryError::EmptyName)
        ));
        assert!(matches!(
            NewCategory::new("Pets", "transfer", None, None),
            Err(CategoryError::InvalidKind(_))
        ));
        assert!(matches!(
            NewCategory::new("Pets", "expense", Some("blue"), None),
            Err(CategoryError::InvalidColor(_))
        ));
        assert!(NewCategory::new("Pets", "income", Some("#A1b2C3"), Some("🐶")).is_ok());
    }

    #[test]
    fn test_new_category_length_limits() {
        let longest = "n".repeat(MAX_NAME_CHARS);
        let too_long = "n".repeat(MAX_NAME_CHARS + 1);

        assert_eq!(
            NewCategory::new(&longest, "expense", None, None).unwrap().name,
            longest
        );
        assert!(matches!(
            NewCategory::new(&too_long, "expense", None, None),
            Err(CategoryError::NameTooLong)
        ));
        assert!(matches!(
            NewCategory::new("Pets", "expense", None, Some(&"i".repeat(MAX_ICON_CHARS + 1))),
            Err(CategoryError::IconTooLong)
        ));
        assert!(NewCategory::new("Pets", "expense", None, Some(&"i".repeat(MAX_ICON_CHARS))).is_ok());
    }

    #[test]
    fn test_update_length_limits() {
        assert!(matches!(
            CategoryUpdate::new(Some(&"n".repeat(MAX_NAME_CHARS + 1)), None, None),
            Err(CategoryError::NameTooLong)
        ));
        assert!(matches!(
            CategoryUpdate::new(None, None, Some(&"i".repeat(MAX_ICON_CHARS + 1))),
            Err(CategoryError::IconTooLong)
        ));
    }

    #[test]
    fn test_update_keeps_blank_fields() {
        let mut cat = category("Pets", false, Some(UserId::new()));
        let update = CategoryUpdate::new(Some(""), Some("#000000"), None).unwrap();

        update.apply_to(&mut cat);

        assert_eq!(cat.name, "Pets");
        assert_eq!(cat.color, "#000000");
    }

    #[test]
    fn test_sort_defaults_first() {
        let owner = Some(UserId::new());
        let mut list = vec![
            category("Zoo", false, owner),
            category("Transport", true, None),
            category("Apple", false, owner),
            category("Food", true, None),
        ];

        sort_for_listing(&mut list);

        let names: Vec<&str> = list.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Food", "Transport", "Apple", "Zoo"]);
    }
}
