pub mod filter_state;
pub mod search_state;
pub mod url_query;
