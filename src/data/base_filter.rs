use std::collections::BTreeMap;

use super::model::{PlayRecord, PlayTable};

/// Default minimum number of qualifying plays a passer needs to be shown.
pub const DEFAULT_MIN_PLAYS: usize = 10;

/// A real pass attempt: a pass play that stood, excluding kneels and spikes.
pub fn is_real_pass(play: &PlayRecord) -> bool {
    play.pass == Some(true)
        && play.play_type.as_deref() != Some("no_play")
        && play.qb_kneel == Some(false)
        && play.qb_spike == Some(false)
}

/// Restrict a raw season table to real passes by passers with at least
/// `min_plays` of them. Plays without a passer are dropped.
pub fn base_filter(table: &PlayTable, min_plays: usize) -> PlayTable {
    let passes: Vec<&PlayRecord> = table
        .plays
        .iter()
        .filter(|p| is_real_pass(p) && p.passer.is_some())
        .collect();

    let mut plays_per_passer: BTreeMap<&str, usize> = BTreeMap::new();
    for play in &passes {
        if let Some(passer) = play.passer.as_deref() {
            *plays_per_passer.entry(passer).or_default() += 1;
        }
    }

    let dropped = plays_per_passer
        .values()
        .filter(|&&n| n < min_plays)
        .count();
    log::debug!(
        "Base filter: {} real passes, {} passers, {dropped} below {min_plays} plays",
        passes.len(),
        plays_per_passer.len()
    );

    let plays: Vec<PlayRecord> = passes
        .iter()
        .filter(|p| {
            p.passer
                .as_deref()
                .and_then(|name| plays_per_passer.get(name))
                .is_some_and(|&n| n >= min_plays)
        })
        .map(|p| (*p).clone())
        .collect();

    PlayTable::new(plays)
}
