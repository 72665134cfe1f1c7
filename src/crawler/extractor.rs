//! Article text extraction for detail pages

use scraper::{ElementRef, Html, Selector};

/// Title and body of an article page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedContent {
    /// `<title>` text, trimmed; empty when absent
    pub title: String,
    /// Every non-empty paragraph, trimmed, each followed by a newline
    pub body: String,
}

impl ExtractedContent {
    /// True when no paragraph text was found
    pub fn is_empty(&self) -> bool {
        self.body.trim().is_empty()
    }

    /// Title and body joined the way they are written to the corpus
    pub fn into_text(self) -> String {
        format!("{}\n{}", self.title, self.body)
    }
}

/// Extracts the title and paragraph text of an article
///
/// When `container` is given and matches, only paragraphs inside the first
/// matching element are read; otherwise every `<p>` in the document is.
/// All paragraphs are accumulated.
///
/// # Example
///
/// ```
/// use corpus_crawler::crawler::extract_content;
///
/// let html = "<title> Headline </title><p>First.</p><p>Second.</p>";
/// let content = extract_content(html, None);
/// assert_eq!(content.title, "Headline");
/// assert_eq!(content.body, "First.\nSecond.\n");
/// ```
pub fn extract_content(html: &str, container: Option<&Selector>) -> ExtractedContent {
    let document = Html::parse_document(html);

    let title = extract_title(&document);

    let Ok(p_selector) = Selector::parse("p") else {
        return ExtractedContent {
            title,
            body: String::new(),
        };
    };

    let scoped = container.and_then(|selector| document.select(selector).next());
    let body = match scoped {
        Some(root) => collect_paragraphs(root.select(&p_selector)),
        None => collect_paragraphs(document.select(&p_selector)),
    };

    ExtractedContent { title, body }
}

fn extract_title(document: &Html) -> String {
    let Ok(title_selector) = Selector::parse("title") else {
        return String::new();
    };

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

fn collect_paragraphs<'a>(paragraphs: impl Iterator<Item = ElementRef<'a>>) -> String {
    let mut body = String::new();
    for paragraph in paragraphs {
        let text = paragraph.text().collect::<String>();
        let text = text.trim();
        if text.is_empty() {
            continue;
        }
        body.push_str(text);
        body.push('\n');
    }
    body
}
