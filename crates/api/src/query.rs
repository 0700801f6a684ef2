//! Query parameter types for API handlers.

/// Query string of the admin message listing.
///
/// Everything is kept as raw text so malformed values reach the pagination
/// rules (clamp `limit`, reject a bad `cursor`) instead of failing
/// extraction.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ListMessagesParams {
    pub limit: Option<String>,
    pub cursor: Option<String>,
    pub direction: Option<String>,
    pub q: Option<String>,
}

impl ListMessagesParams {
    /// Collect the known keys from decoded query pairs. When a key repeats,
    /// the last value wins; unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "limit" => &mut params.limit,
                "cursor" => &mut params.cursor,
                "direction" => &mut params.direction,
                "q" => &mut params.q,
                _ => continue,
            };
            *slot = Some(value);
        }
        params
    }
}
