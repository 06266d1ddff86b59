//! Local keyword post-filter for list results.
//!
//! Narrows a page that has already been fetched. It never fetches more data
//! to find additional matches.

/// Case-insensitive substring filter over one page of items.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeywordFilter {
    needle: Option<String>,
}

impl KeywordFilter {
    /// A blank keyword is the same as no keyword.
    pub fn new(keyword: Option<&str>) -> Self {
        let needle = keyword
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_lowercase);
        Self { needle }
    }

    pub fn is_active(&self) -> bool {
        self.needle.is_some()
    }

    /// Whether any of the given fields contains the keyword. Everything
    /// matches when no keyword is set.
    pub fn matches<'a>(&self, fields: impl IntoIterator<Item = Option<&'a str>>) -> bool {
        let Some(needle) = &self.needle else {
            return true;
        };
        fields
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(needle.as_str()))
    }

    /// Keep the items whose selected fields contain the keyword.
    pub fn apply<T, const N: usize>(
        &self,
        items: Vec<T>,
        fields: impl Fn(&T) -> [Option<&str>; N],
    ) -> Vec<T> {
        if !self.is_active() {
            return items;
        }
        items
            .into_iter()
            .filter(|item| self.matches(fields(item)))
            .collect()
    }
}
