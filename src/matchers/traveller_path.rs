use std::collections::HashSet;

use crate::models::Place;

/// Number of distinct answer codes present in the place's Traveller Path tags
pub fn traveller_path_score(place: &Place, answers: &[i32]) -> usize {
    let codes = match &place.tp_codes {
        Some(codes) => codes,
        None => return 0,
    };

    let answers: HashSet<i32> = answers.iter().copied().collect();
    answers.iter().filter(|code| codes.contains(code)).count()
}

/// Places sharing at least one code with the answers, best match first
pub fn rank_by_traveller_path(places: &[Place], answers: &[i32]) -> Vec<Place> {
    let mut scored: Vec<(usize, &Place)> = places
        .iter()
        .map(|place| (traveller_path_score(place, answers), place))
        .filter(|(score, _)| *score > 0)
        .collect();

    // stable, so equal scores keep sheet order
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().map(|(_, place)| place.clone()).collect()
}
