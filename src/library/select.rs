use super::model::{SelectedTrack, TrackCandidate};

/// Keep the first `limit` candidates, numbered from 1 in their original order.
///
/// A zero or negative limit selects nothing.
pub fn select_tracks(candidates: Vec<TrackCandidate>, limit: i64) -> Vec<SelectedTrack> {
    let limit = usize::try_from(limit).unwrap_or(0);
    candidates
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(i, candidate)| SelectedTrack {
            number: i + 1,
            candidate,
        })
        .collect()
}
