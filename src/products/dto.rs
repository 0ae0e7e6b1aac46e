/// `?name=&category=`; an absent key imposes no constraint.
#[derive(Debug, Default)]
pub struct SearchFilters {
    pub name: Option<String>,
    pub category: Option<String>,
}

impl SearchFilters {
    /// Build from raw query pairs. A repeated key keeps its last value and
    /// unknown keys are ignored.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut filters = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "name" => filters.name = Some(value),
                "category" => filters.category = Some(value),
                _ => {}
            }
        }
        filters
    }
}
