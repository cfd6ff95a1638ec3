use crate::domain::filter::FilterSelection;

/// Number of products returned by the search-as-you-type endpoint.
pub const PREDICTIVE_RESULTS: u32 = 20;

/// Clause matching a free-text term against title, tags and vendor.
pub fn text_clause(term: &str) -> Option<String> {
    let term = term.trim();
    if term.is_empty() {
        return None;
    }
    Some(format!("title:*{term}* OR tag:{term} OR vendor:{term}"))
}

/// Backend query for the search page: the text clause and every active
/// filter clause joined with `AND`. `None` when nothing restricts the search.
pub fn build_search_query(term: Option<&str>, selection: &FilterSelection) -> Option<String> {
    let mut clauses = Vec::new();

    if let Some(text) = term.and_then(text_clause) {
        clauses.push(format!("({text})"));
    }
    if let Some(filters) = selection.to_search_syntax() {
        clauses.push(filters);
    }

    if clauses.is_empty() {
        None
    } else {
        Some(clauses.join(" AND "))
    }
}
