//! Context assembly and budgeting
//!
//! Pure text functions: they read documents and a budget, and produce the
//! context string handed to the answering collaborator. Budgets are counted
//! in characters, and truncation never splits a `char`.
//!
//! Single mode uses the full page sequence of one document, truncated at the
//! last complete page boundary within the budget. Multi mode renders one
//! section per document (header plus truncated text); header and separator
//! costs come off the top, the remainder is divided equally, and a second
//! pass hands unused share to still-hungry documents in submission order.

use crate::QueryConfig;
use docqa_domain::Document;

/// Joiner between pages of one document
pub const PAGE_JOIN: &str = "\n\n";

/// Separator between document sections in multi mode
pub const SECTION_SEPARATOR: &str = "\n\n---\n\n";

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Prefix of `s` holding at most `n` characters
fn take_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

fn section_header(filename: &str) -> String {
    format!("=== Document: {} ===", filename)
}

/// Join pages in order, stopping at the last page boundary within `budget`
///
/// If the first page alone exceeds the budget it is cut mid-page at
/// `overflow_cut` characters (never past `budget`).
fn truncate_pages(pages: &[String], budget: usize, overflow_cut: usize) -> String {
    let mut assembled = String::new();
    let mut used = 0usize;

    for (i, page) in pages.iter().enumerate() {
        let join_cost = if i == 0 { 0 } else { char_len(PAGE_JOIN) };
        let page_cost = char_len(page);
        if used + join_cost + page_cost > budget {
            if i == 0 {
                return take_chars(page, budget.min(overflow_cut)).to_string();
            }
            break;
        }
        if i > 0 {
            assembled.push_str(PAGE_JOIN);
        }
        assembled.push_str(page);
        used += join_cost + page_cost;
    }

    assembled
}

fn document_need(document: &Document) -> usize {
    let pages = document.pages();
    let text: usize = pages.iter().map(|p| char_len(p)).sum();
    text + pages.len().saturating_sub(1) * char_len(PAGE_JOIN)
}

/// Assemble the context for a single-document query
pub fn single_context(document: &Document, config: &QueryConfig) -> String {
    truncate_pages(
        document.pages(),
        config.max_context_chars,
        config.page_overflow_ceiling,
    )
}

/// Assemble the context for a multi-document query
///
/// Documents must already be filtered to succeeded ones, in the order their
/// sections should appear.
pub fn multi_context(documents: &[&Document], config: &QueryConfig) -> String {
    let overhead: usize = documents
        .iter()
        .map(|d| char_len(&section_header(d.filename())) + char_len(PAGE_JOIN))
        .sum::<usize>()
        + documents.len().saturating_sub(1) * char_len(SECTION_SEPARATOR);
    let budget = config.max_context_chars.saturating_sub(overhead);

    let needs: Vec<usize> = documents.iter().map(|d| document_need(d)).collect();
    let share = match documents.len() {
        0 => 0,
        n => budget / n,
    };

    // Pass 1: equal shares, capped at what each document actually has.
    let mut allocations: Vec<usize> = needs.iter().map(|&need| need.min(share)).collect();
    let mut spare = budget.saturating_sub(allocations.iter().sum());

    // Pass 2: unused share goes to still-hungry documents in submission order.
    for (allocation, &need) in allocations.iter_mut().zip(&needs) {
        if spare == 0 {
            break;
        }
        if *allocation < need {
            let extra = (need - *allocation).min(spare);
            *allocation += extra;
            spare -= extra;
        }
    }

    let sections: Vec<String> = documents
        .iter()
        .zip(&allocations)
        .map(|(doc, &allocation)| {
            let text = truncate_pages(doc.pages(), allocation, allocation);
            format!("{}{}{}", section_header(doc.filename()), PAGE_JOIN, text)
        })
        .collect();

    let assembled = sections.join(SECTION_SEPARATOR);
    // Overhead alone can exceed a tiny budget; the total bound still holds
    if assembled.chars().count() > config.max_context_chars {
        return take_chars(&assembled, config.max_context_chars).to_string();
    }
    assembled
}
