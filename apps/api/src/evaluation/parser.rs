//! Response parser — pulls the `Rating: N/10` line and the feedback out of a
//! free-text assistant reply.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

pub const RATING_NOT_FOUND_MESSAGE: &str = "Unable to extract rating from the response.";

static RATING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Rating: (\d+)/10").expect("rating pattern is valid"));

/// Rating and feedback pulled from one reply.
/// `rating` is `None` when the reply carried no usable `Rating: N/10` line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedReply {
    pub rating: Option<u32>,
    pub feedback: String,
}

/// The first `Rating: N/10` match wins. N is taken as written (not clamped).
/// Feedback is everything after the first newline following the match, or
/// empty when none follows. Digits that overflow `u32` count as no match.
pub fn parse_rated_reply(reply: &str) -> ParsedReply {
    let Some(captures) = RATING_RE.captures(reply) else {
        return not_found();
    };
    let Some(rating) = captures.get(1).and_then(|m| m.as_str().parse::<u32>().ok()) else {
        return not_found();
    };

    let match_start = captures.get(0).map(|m| m.start()).unwrap_or_default();
    let feedback = reply[match_start..]
        .split_once('\n')
        .map(|(_, rest)| rest.to_string())
        .unwrap_or_default();

    ParsedReply {
        rating: Some(rating),
        feedback,
    }
}

fn not_found() -> ParsedReply {
    ParsedReply {
        rating: None,
        feedback: RATING_NOT_FOUND_MESSAGE.to_string(),
    }
}
