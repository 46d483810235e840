//! Terminal rendering of shelf contents

use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use memo_shelf_lib::commands::ShelfSection;
use memo_shelf_lib::domain::{Category, ClipboardButton, Memo, Section};

fn table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.to_vec());
    table
}

/// Pin and bookmark markers
fn flags(memo: &Memo) -> String {
    let mut out = String::new();
    if memo.pinned {
        out.push('P');
    }
    if memo.has_bookmark() {
        out.push('B');
    }
    out
}

pub fn memos(memos: &[Memo]) -> String {
    let mut table = table(&["", "Title", "Id"]);
    for memo in memos {
        table.add_row(vec![flags(memo), memo.title.clone(), memo.id.clone()]);
    }
    table.to_string()
}

pub fn shelf(sections: &[ShelfSection]) -> String {
    sections
        .iter()
        .map(|section| {
            format!(
                "{} ({}) {}\n{}",
                section.category.name,
                section.memos.len(),
                section.category.id,
                memos(&section.memos)
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn categories(categories: &[Category]) -> String {
    let mut table = table(&["Name", "Color", "Order", "Id"]);
    for category in categories {
        table.add_row(vec![
            category.name.clone(),
            category.color.clone(),
            category.order.to_string(),
            category.id.clone(),
        ]);
    }
    table.to_string()
}

pub fn clipboard_buttons(buttons: &[ClipboardButton]) -> String {
    let mut table = table(&["Title", "Content", "Color", "Id"]);
    for button in buttons {
        table.add_row(vec![
            button.title.clone(),
            button.content.clone(),
            button.color.clone(),
            button.id.clone(),
        ]);
    }
    table.to_string()
}

/// Confirmation shown before a category and its memos are deleted
pub fn delete_category_prompt(category: &Category) -> String {
    format!("Delete category {:?} and all of its memos?", category.name)
}

pub fn outline(sections: &[Section]) -> String {
    memo_shelf_lib::domain::flatten_outline(sections)
        .iter()
        .map(|s| format!("{}{} {}", "  ".repeat(usize::from(s.level.saturating_sub(1))), s.number, s.title))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use memo_shelf_lib::domain::outline as parse_outline;

    #[test]
    fn test_outline_indents_children() {
        let text = outline(&parse_outline("== Intro ==\n=== Goals ===\n== Usage =="));
        assert_eq!(text, "1 Intro\n  1.1 Goals\n2 Usage");
    }

    #[test]
    fn test_delete_prompt_names_category() {
        let category = Category::new("01HZX3".into(), "Work".into(), "#E1F0FF".into(), 1, 1);
        let prompt = delete_category_prompt(&category);
        assert_eq!(prompt, "Delete category \"Work\" and all of its memos?");
        assert!(!prompt.contains("01HZX3"));
    }

    #[test]
    fn test_flags_and_rows() {
        let mut memo = Memo::new("m1".into(), "Groceries\nmilk".into(), "in-box".into(), 1);
        memo.pinned = true;
        memo.pinned_at = Some(2);
        memo.bookmark_position = 10.0;

        assert_eq!(flags(&memo), "PB");
        let rendered = memos(&[memo]);
        assert!(rendered.contains("Groceries"));
        assert!(rendered.contains("m1"));
    }
}
