//! Heuristic scoring of markup regions that are likely to hold vocabulary lists.

use std::collections::HashMap;

use scraper::{ElementRef, Html};

use crate::types::MarkupHint;

const CONTAINER_BONUS: u32 = 3;
const VOCAB_CLASS_BONUS: u32 = 5;
const LIST_CLASS_BONUS: u32 = 2;
const CHILD_COUNT_BONUS: u32 = 2;
const REPEATED_ITEM_CHILDREN: usize = 4;

const CONTAINER_TAGS: [&str; 5] = ["ul", "ol", "dl", "table", "tbody"];
const VOCAB_PATTERNS: [&str; 6] = ["word", "vocab", "term", "lexicon", "glossary", "flashcard"];
const LIST_PATTERNS: [&str; 6] = ["list", "item", "entry", "row", "card", "grid"];

// Subtrees that never hold taught vocabulary.
const SKIPPED_TAGS: [&str; 7] = ["head", "script", "style", "noscript", "nav", "header", "footer"];

/// Scores every element of `html` and returns the `max_hints` best
/// `tag.class` signatures, highest total first.
///
/// Elements are visited in document order; signatures with equal totals keep
/// the order in which they were first seen.
#[must_use]
pub fn score_markup(html: &str, max_hints: usize, max_elements: usize) -> Vec<MarkupHint> {
    let document = Html::parse_document(html);
    let mut tally = Tally::default();

    let mut stack: Vec<ElementRef<'_>> = vec![document.root_element()];
    let mut visited = 0usize;

    while let Some(element) = stack.pop() {
        visited += 1;
        if visited > max_elements {
            break;
        }

        let tag = element.value().name();
        if SKIPPED_TAGS.contains(&tag) {
            continue;
        }

        let score = score_element(element);
        if score > 0 {
            tally.add(signature(element), score);
        }

        let children: Vec<ElementRef<'_>> =
            element.children().filter_map(ElementRef::wrap).collect();
        stack.extend(children.into_iter().rev());
    }

    tally.into_ranked(max_hints)
}

fn score_element(element: ElementRef<'_>) -> u32 {
    let mut score = 0;
    let tag = element.value().name();

    if CONTAINER_TAGS.contains(&tag) {
        score += CONTAINER_BONUS;
    }

    let class = element.value().attr("class").unwrap_or("").to_ascii_lowercase();
    let id = element.value().attr("id").unwrap_or("").to_ascii_lowercase();

    if VOCAB_PATTERNS
        .iter()
        .any(|pattern| class.contains(pattern) || id.contains(pattern))
    {
        score += VOCAB_CLASS_BONUS;
    }

    if LIST_PATTERNS.iter().any(|pattern| class.contains(pattern)) {
        score += LIST_CLASS_BONUS;
    }

    let element_children = element
        .children()
        .filter(|child| child.value().is_element())
        .count();
    if element_children >= REPEATED_ITEM_CHILDREN {
        score += CHILD_COUNT_BONUS;
    }

    score
}

/// `tag.class1.class2`, classes in attribute order.
fn signature(element: ElementRef<'_>) -> String {
    let mut selector = element.value().name().to_string();
    if let Some(class) = element.value().attr("class") {
        for name in class.split_whitespace() {
            selector.push('.');
            selector.push_str(name);
        }
    }
    selector
}

#[derive(Default)]
struct Tally {
    totals: Vec<(String, u32)>,
    index: HashMap<String, usize>,
}

impl Tally {
    fn add(&mut self, selector: String, score: u32) {
        if let Some(&slot) = self.index.get(&selector) {
            self.totals[slot].1 += score;
        } else {
            self.index.insert(selector.clone(), self.totals.len());
            self.totals.push((selector, score));
        }
    }

    fn into_ranked(mut self, max_hints: usize) -> Vec<MarkupHint> {
        // sort_by is stable, so ties keep first-seen order.
        self.totals.sort_by(|a, b| b.1.cmp(&a.1));
        self.totals
            .into_iter()
            .take(max_hints)
            .map(|(selector, score)| MarkupHint { selector, score })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LESSON_PAGE: &str = r#"
        <html>
          <head><title>Lesson 4</title></head>
          <body>
            <nav><ul class="menu-list"><li>Home</li><li>About</li><li>Blog</li><li>Shop</li></ul></nav>
            <div class="content">
              <ul class="vocab-list">
                <li class="vocab-item">agree</li>
                <li class="vocab-item">borrow</li>
                <li class="vocab-item">carry</li>
                <li class="vocab-item">decide</li>
              </ul>
              <p>Some prose that mentions words in passing.</p>
            </div>
            <footer><table><tr><td>copyright</td></tr></table></footer>
          </body>
        </html>
    "#;

    #[test]
    fn test_vocab_list_ranks_first() {
        let hints = score_markup(LESSON_PAGE, 5, 20_000);

        // four items, each vocab class + list class
        assert_eq!(hints[0].selector, "li.vocab-item");
        assert_eq!(hints[0].score, 4 * 7);
        // container + vocab class + list class + four children
        assert_eq!(hints[1].selector, "ul.vocab-list");
        assert_eq!(hints[1].score, 3 + 5 + 2 + 2);
        assert_eq!(hints.len(), 2);
    }

    #[test]
    fn test_boilerplate_subtrees_are_skipped() {
        let hints = score_markup(LESSON_PAGE, 5, 20_000);

        assert!(hints.iter().all(|h| !h.selector.contains("menu")));
        assert!(hints.iter().all(|h| h.selector != "table"));
    }

    #[test]
    fn test_ranking_is_descending_and_capped() {
        let mut html = String::from("<html><body>");
        for i in 0..8 {
            html.push_str(&format!("<ul class=\"group{i}\"><li>a</li></ul>"));
        }
        html.push_str("<dl class=\"glossary\"><dt>a</dt><dd>b</dd></dl></body></html>");

        let hints = score_markup(&html, 5, 20_000);

        assert_eq!(hints.len(), 5);
        assert_eq!(hints[0].selector, "dl.glossary");
        assert!(hints.windows(2).all(|w| w[0].score >= w[1].score));
        // equal scores keep document order
        assert_eq!(hints[1].selector, "ul.group0");
        assert_eq!(hints[4].selector, "ul.group3");
    }

    #[test]
    fn test_plain_prose_yields_no_hints() {
        let html = "<html><body><p>Hello</p><div><span>there</span></div></body></html>";
        assert!(score_markup(html, 5, 20_000).is_empty());
    }

    #[test]
    fn test_id_matches_vocab_pattern() {
        let html = r#"<html><body><section id="Lexicon"><p>x</p></section></body></html>"#;
        let hints = score_markup(html, 5, 20_000);
        assert_eq!(
            hints,
            vec![MarkupHint {
                selector: "section".to_string(),
                score: 5
            }]
        );
    }
}
