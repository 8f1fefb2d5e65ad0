use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Title, then author name.
    #[default]
    Title,
    /// Author name, then title.
    Author,
}

impl SortOrder {
    /// Parses the `sort` query parameter. Anything other than `author` sorts by title.
    pub fn from_param(param: Option<&str>) -> Self {
        match param.map(str::trim) {
            Some(p) if p.eq_ignore_ascii_case("author") => SortOrder::Author,
            _ => SortOrder::Title,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Title => "title",
            SortOrder::Author => "author",
        }
    }

    pub(crate) fn order_by_clause(self) -> &'static str {
        match self {
            SortOrder::Title => "ORDER BY b.title, a.name, b.id",
            SortOrder::Author => "ORDER BY a.name, b.title, b.id",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    /// Free text matched case-insensitively against title, author name and ISBN.
    pub search: Option<String>,
    pub sort: SortOrder,
}

impl CatalogQuery {
    pub fn new(search: Option<&str>, sort: SortOrder) -> Self {
        let search = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        Self { search, sort }
    }

    /// `LIKE` pattern for the search text, or `None` when every row matches.
    pub(crate) fn like_pattern(&self) -> Option<String> {
        self.search.as_deref().map(|s| format!("%{}%", escape_like(s)))
    }
}

/// Escapes `LIKE` wildcards so the text matches literally (used with `ESCAPE '\'`).
fn escape_like(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_sort_falls_back_to_title() {
        assert_eq!(SortOrder::from_param(None), SortOrder::Title);
        assert_eq!(SortOrder::from_param(Some("year")), SortOrder::Title);
        assert_eq!(SortOrder::from_param(Some("title")), SortOrder::Title);
        assert_eq!(SortOrder::from_param(Some("author")), SortOrder::Author);
        assert_eq!(SortOrder::from_param(Some(" Author ")), SortOrder::Author);
    }

    #[test]
    fn blank_search_matches_everything() {
        assert_eq!(CatalogQuery::new(Some("   "), SortOrder::Title).like_pattern(), None);
        assert_eq!(CatalogQuery::new(None, SortOrder::Title).like_pattern(), None);
    }

    #[test]
    fn search_text_is_trimmed_and_wildcards_escaped() {
        let q = CatalogQuery::new(Some("  100%_done\\ "), SortOrder::Author);
        assert_eq!(q.search.as_deref(), Some("100%_done\\"));
        assert_eq!(q.like_pattern().as_deref(), Some("%100\\%\\_done\\\\%"));
    }
}
