use im::Vector;

use crate::model::Track;

/// Index of the track whose file key matches `song_id`, if any.
pub fn position_of(list: &Vector<Track>, song_id: &str) -> Option<usize> {
    list.iter().position(|t| t.file_key == song_id)
}

/// Target index for a queue advance, or `None` when the move would leave
/// the queue. No wraparound: reaching either end simply stops advancing.
pub fn advance_index(list: &Vector<Track>, song_id: &str, delta: isize) -> Option<usize> {
    let current = position_of(list, song_id)? as isize;
    let target = current + delta;
    if target < 0 || target >= list.len() as isize {
        return None;
    }
    Some(target as usize)
}

/// Insertion point for an explicitly queued track.
///
/// Queued insertions accumulate in FIFO order directly after whatever is
/// currently playing, ahead of the untouched tail of the original list: scan
/// backward from the end down to (but not including) the current track; the
/// first `queued` entry marks the insertion point one past it, otherwise the
/// slot right after the current track. With no current track the scan covers
/// the whole list and the fallback slot is the front.
pub fn insertion_index(list: &Vector<Track>, song_id: Option<&str>) -> usize {
    let current = song_id
        .and_then(|id| position_of(list, id))
        .map(|i| i as isize)
        .unwrap_or(-1);

    let mut i = list.len() as isize - 1;
    while i > current {
        if list[i as usize].queued {
            return (i + 1) as usize;
        }
        i -= 1;
    }
    (current + 1) as usize
}
