//! Share links: the whole event list packed into a URL query parameter.
//!
//! The payload is the JSON event list in URL-safe base64 without padding.
//! There is no size bound and no expiry, and anyone holding the link can
//! read every event in it; it is a snapshot for small personal calendars.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use url::Url;

use crate::constants::{MAX_PORTABLE_URL_LEN, SHARE_PARAM};
use crate::error::{ShareCalError, ShareCalResult};
use crate::event::{Event, EventRecord, normalize_records};

/// Encode events into the text-safe snapshot payload
pub fn encode_snapshot(events: &[Event]) -> ShareCalResult<String> {
    let json = serde_json::to_string(events)?;
    Ok(URL_SAFE_NO_PAD.encode(json.as_bytes()))
}

/// Decode a snapshot payload back into events.
///
/// Accepts standard base64 as well, including `+` that form decoding
/// turned into a space.
pub fn decode_snapshot(payload: &str) -> ShareCalResult<Vec<Event>> {
    let normalized: String = payload
        .trim()
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' | ' ' => '-',
            '/' => '_',
            other => other,
        })
        .collect();

    let bytes = URL_SAFE_NO_PAD
        .decode(normalized.as_bytes())
        .map_err(|e| ShareCalError::Snapshot(format!("not base64: {e}")))?;

    let records: Vec<EventRecord> = serde_json::from_slice(&bytes)
        .map_err(|e| ShareCalError::Snapshot(format!("not an event list: {e}")))?;

    Ok(normalize_records(records))
}

/// Build a link to `base` that carries the full event list.
///
/// Any snapshot already present on `base` is replaced; other query
/// parameters are kept.
pub fn make_share_link(base: &Url, events: &[Event]) -> ShareCalResult<Url> {
    let payload = encode_snapshot(events)?;

    let kept: Vec<(String, String)> = base
        .query_pairs()
        .filter(|(k, _)| k != SHARE_PARAM)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let mut link = base.clone();
    link.set_query(None);
    {
        let mut query = link.query_pairs_mut();
        for (k, v) in &kept {
            query.append_pair(k, v);
        }
        query.append_pair(SHARE_PARAM, &payload);
    }

    if link.as_str().len() > MAX_PORTABLE_URL_LEN {
        tracing::warn!(
            len = link.as_str().len(),
            events = events.len(),
            "share link is longer than many clients accept"
        );
    }

    Ok(link)
}

/// Extract the snapshot from a URL.
///
/// `None` means the URL carries no snapshot at all; `Some(Err(_))` means it
/// carries one that could not be decoded.
pub fn parse_shared_snapshot(url: &Url) -> Option<ShareCalResult<Vec<Event>>> {
    let (_, payload) = url.query_pairs().find(|(k, _)| k == SHARE_PARAM)?;
    Some(decode_snapshot(&payload))
}
