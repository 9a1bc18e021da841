/// Header carrying the authenticated coach id, set by the gateway
pub const COACH_ID_HEADER: &str = "x-coach-id";

// =============================================================================
// CLUB CODES
// =============================================================================

/// Width of the zero-padded numeric part of a club code
pub const CLUB_CODE_DIGITS: usize = 8;

/// Number of distinct one- and two-letter suffixes (26 + 26 * 26)
pub const CLUB_CODE_SUFFIX_CYCLE: i64 = 702;

// =============================================================================
// EVENTS
// =============================================================================

/// Pushed to a coach when a national owner requests them
pub const NATIONAL_REQUEST_EVENT: &str = "national request";
