//! Categories seeded for every user.

use crate::transaction::TransactionKind;

/// A seeded category definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultCategory {
    /// Display name.
    pub name: &'static str,
    /// Income or expense.
    pub kind: TransactionKind,
    /// `#rrggbb` color.
    pub color: &'static str,
    /// Emoji icon.
    pub icon: &'static str,
}

const fn income(name: &'static str, color: &'static str, icon: &'static str) -> DefaultCategory {
    DefaultCategory {
        name,
        kind: TransactionKind::Income,
        color,
        icon,
    }
}

const fn expense(name: &'static str, color: &'static str, icon: &'static str) -> DefaultCategory {
    DefaultCategory {
        name,
        kind: TransactionKind::Expense,
        color,
        icon,
    }
}

/// The default category set.
pub const DEFAULT_CATEGORIES: [DefaultCategory; 13] = [
    income("Salary", "#27ae60", "💰"),
    income("Side Income", "#2ecc71", "💼"),
    income("Investment", "#16a085", "📈"),
    income("Other Income", "#1abc9c", "💵"),
    expense("Food", "#e74c3c", "🍽️"),
    expense("Transport", "#e67e22", "🚗"),
    expense("Shopping", "#f39c12", "🛍️"),
    expense("Entertainment", "#9b59b6", "🎬"),
    expense("Medical", "#3498db", "🏥"),
    expense("Education", "#2980b9", "📚"),
    expense("Household", "#34495e", "🏠"),
    expense("Communication", "#8e44ad", "📱"),
    expense("Other Expense", "#95a5a6", "💸"),
];
