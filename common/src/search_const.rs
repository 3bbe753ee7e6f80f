//! Constants shared by the search workflows and the search service adapter.

use std::time::Duration;

use crate::resource::ResourceType;

/// Number of hits requested per resource page.
pub const RESULTS_PER_PAGE: u32 = 10;

/// Quiet period after the last keystroke before a lookahead query is sent.
pub const INLINE_SEARCH_DEBOUNCE: Duration = Duration::from_millis(350);

/// Order in which a resource is picked when a full search did not name one.
pub const RESOURCE_PRECEDENCE: [ResourceType; 3] = [ResourceType::Table, ResourceType::User, ResourceType::Dashboard];
