//! Generators for dossier-shaped markdown. Each bench target pulls in only
//! the helpers it needs.
#![allow(dead_code)]

/// A chapter in the house dialect: breadcrumb, hand-written contents
/// section, TL;DR callout, sections with bullets, a pipe table and a fence.
pub fn generate_chapter(sections: usize) -> String {
    let mut content = String::from("[Home](../readme.md) > Chapter\n\n# Chapter Overview\n\n");

    content.push_str("## Table of Contents\n\n");
    for section in 0..sections {
        content.push_str(&format!("- [Section {section}](#section-{section})\n"));
    }
    content.push_str("\n[TOC]\n\n");

    content.push_str(
        "> ### TL;DR\n> - Scope is **fixed** for `Q3`\n> - Owners: _platform_ team\n>\n> Budget follows the plan.\n\n",
    );

    for section in 0..sections {
        content.push_str(&format!("## Section {section}\n\n"));
        content.push_str(
            "Paragraph with **bold**, _italic_, `user_id` and [the plan](https://example.com/user_id).\n\n",
        );
        for item in 0..3 {
            content.push_str(&format!("- Item {item} of section {section}\n"));
        }
        content.push('\n');
        content.push_str(&generate_table(4, 3));
        content.push('\n');
        if section % 3 == 0 {
            content.push_str("```sql\nSELECT id, name\nFROM accounts\nWHERE active;\n```\n\n");
        }
        content.push_str("---\n\n");
    }

    content
}

/// A pipe table with a header, divider and `rows` body rows.
pub fn generate_table(rows: usize, columns: usize) -> String {
    let header: Vec<String> = (0..columns).map(|c| format!("Column {c}")).collect();
    let mut table = format!("| {} |\n", header.join(" | "));
    table.push_str(&format!("|{}\n", "---|".repeat(columns)));
    for row in 0..rows {
        let cells: Vec<String> = (0..columns).map(|c| format!("**r{row}** c{c}")).collect();
        table.push_str(&format!("| {} |\n", cells.join(" | ")));
    }
    table
}

/// Headings that repeat every `distinct` titles, so slugs collide.
pub fn colliding_titles(count: usize, distinct: usize) -> Vec<String> {
    (0..count)
        .map(|i| format!("Risks & Mitigations {}", i % distinct.max(1)))
        .collect()
}

pub fn generate_large_dossier() -> Vec<String> {
    (0..20).map(|_| generate_chapter(10)).collect()
}
