//! Pictures shown next to a category name.
//!
//! The dashboard and the categories page each have their own lookup; they key
//! on different names and only the dashboard knows about "personal usage".

use std::collections::BTreeSet;

use crate::models::{Transaction, TransactionMode};

pub const PERSON_LOGO_GREEN: &str = "/assets/person_logo_green.svg";
pub const PERSON_LOGO_RED: &str = "/assets/person_logo_red.svg";

const PERSONAL_USAGE: &str = "personal usage";
const SNACKS_AND_DRINKS: &str = "snacks & drinks";
const SNACKS_CREDIT: &str = "snacks&drinks_grren.png";
const SNACKS_DEBIT: &str = "snacks&drinks_red.png";

const BACKEND_IMAGES: &[(&str, &str)] = &[
    ("alcohol", "alchocal.png"),
    ("tea & coffee", "tea_coffee.png"),
    ("transport", "transport.png"),
    ("food", "food.png"),
];

const DASHBOARD_EMOJI: &[(&str, &str)] = &[
    ("salary", "💸"),
    ("bills", "💡"),
    ("health", "💊"),
    ("entertainment", "🎬"),
    ("investment", "📈"),
    ("gift", "🎁"),
    ("travel", "✈️"),
    ("rent", "🏠"),
    ("education", "🎓"),
    ("insurance", "🛡️"),
    ("recharge", "🔋"),
    ("mobile", "📱"),
    ("fuel", "⛽"),
    ("tax", "🧾"),
    ("loan", "💳"),
    ("emi", "💰"),
    ("fees", "💵"),
    ("donation", "🙏"),
    ("pets", "🐾"),
    ("kids", "🧒"),
    ("grocer", "🛒"),
    ("uncategorized", "❓"),
];

// Matched by substring, first hit wins.
const CATEGORY_ICONS: &[(&str, &str)] = &[
    ("food", "🍔"),
    ("transport", "🚗"),
    ("shopping", "🛍️"),
    ("entertainment", "🎬"),
    ("health", "💊"),
    ("education", "📚"),
    ("bills", "📄"),
    ("salary", "💼"),
    ("investment", "📈"),
    ("other", "📁"),
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CategoryArt {
    /// Filename under the backend image directory.
    Image(&'static str),
    /// Bundled logo path.
    PersonLogo(&'static str),
    Emoji(&'static str),
}

fn key(category_name: Option<&str>) -> String {
    category_name.unwrap_or_default().to_lowercase()
}

/// Dashboard art for one transaction.
pub fn dashboard_art(transaction: &Transaction) -> CategoryArt {
    let key = key(transaction.category_name.as_deref());
    let credit = transaction.mode == TransactionMode::Credit;

    match key.as_str() {
        PERSONAL_USAGE => {
            CategoryArt::PersonLogo(if credit { PERSON_LOGO_GREEN } else { PERSON_LOGO_RED })
        }
        SNACKS_AND_DRINKS => CategoryArt::Image(if credit { SNACKS_CREDIT } else { SNACKS_DEBIT }),
        other => match lookup(BACKEND_IMAGES, other) {
            Some(file) => CategoryArt::Image(file),
            None => CategoryArt::Emoji(lookup(DASHBOARD_EMOJI, other).unwrap_or("❓")),
        },
    }
}

/// Backend images worth downloading ahead of rendering `transactions`.
/// Both snack variants are fetched whatever the mode.
pub fn prefetch_files(transactions: &[Transaction]) -> BTreeSet<&'static str> {
    let mut needed = BTreeSet::new();
    for transaction in transactions {
        let key = key(transaction.category_name.as_deref());
        if key == SNACKS_AND_DRINKS {
            needed.insert(SNACKS_CREDIT);
            needed.insert(SNACKS_DEBIT);
        } else if let Some(file) = lookup(BACKEND_IMAGES, &key) {
            needed.insert(file);
        }
    }
    needed
}

/// Icon for the categories page.
pub fn category_icon(name: &str) -> &'static str {
    let lower = name.to_lowercase();
    CATEGORY_ICONS
        .iter()
        .find(|(needle, _)| lower.contains(needle))
        .map(|(_, icon)| *icon)
        .unwrap_or("📁")
}

fn lookup(table: &[(&str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tx(category: &str, mode: TransactionMode) -> Transaction {
        Transaction {
            category_name: Some(category.to_string()),
            mode,
            ..Transaction::default()
        }
    }

    #[test]
    fn dashboard_prefers_backend_images() {
        assert_eq!(
            dashboard_art(&tx("Food", TransactionMode::Debit)),
            CategoryArt::Image("food.png")
        );
        assert_eq!(
            dashboard_art(&tx("Snacks & Drinks", TransactionMode::Credit)),
            CategoryArt::Image("snacks&drinks_grren.png")
        );
        assert_eq!(
            dashboard_art(&tx("snacks & drinks", TransactionMode::Debit)),
            CategoryArt::Image("snacks&drinks_red.png")
        );
    }

    #[test]
    fn personal_usage_uses_the_bundled_logo() {
        assert_eq!(
            dashboard_art(&tx("Personal Usage", TransactionMode::Credit)),
            CategoryArt::PersonLogo(PERSON_LOGO_GREEN)
        );
        assert_eq!(
            dashboard_art(&tx("personal usage", TransactionMode::Debit)),
            CategoryArt::PersonLogo(PERSON_LOGO_RED)
        );
    }

    #[test]
    fn dashboard_falls_back_to_emoji() {
        assert_eq!(
            dashboard_art(&tx("Salary", TransactionMode::Credit)),
            CategoryArt::Emoji("💸")
        );
        assert_eq!(
            dashboard_art(&tx("Groceries", TransactionMode::Debit)),
            CategoryArt::Emoji("❓")
        );
        assert_eq!(
            dashboard_art(&Transaction::default()),
            CategoryArt::Emoji("❓")
        );
    }

    #[test]
    fn prefetch_skips_personal_usage_and_adds_both_snacks() {
        let list = vec![
            tx("Food", TransactionMode::Debit),
            tx("food", TransactionMode::Credit),
            tx("Personal Usage", TransactionMode::Debit),
            tx("Snacks & Drinks", TransactionMode::Debit),
            tx("Salary", TransactionMode::Credit),
        ];
        let files: Vec<_> = prefetch_files(&list).into_iter().collect();
        assert_eq!(
            files,
            vec!["food.png", "snacks&drinks_grren.png", "snacks&drinks_red.png"]
        );
    }

    #[test]
    fn categories_page_matches_substrings() {
        assert_eq!(category_icon("Fast Food"), "🍔");
        assert_eq!(category_icon("Public Transport"), "🚗");
        assert_eq!(category_icon("Electricity Bills"), "📄");
        assert_eq!(category_icon("Personal Usage"), "📁");
        assert_eq!(category_icon(""), "📁");
    }
}
