use std::collections::HashSet;

use thiserror::Error;

use super::types::Card;
use crate::games::session_rng::SessionRng;

const MIN_DEAL_SIZE: usize = 2;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DealError {
    #[error("grid size must be at least 2, got {0}")]
    GridTooSmall(usize),

    #[error("icon pool has {available} distinct icons, {needed} needed")]
    NotEnoughIcons { needed: usize, available: usize },
}

/// Pairs dealt onto a `size`x`size` grid. Odd grids leave one cell empty.
pub fn pair_count(size: usize) -> usize {
    size * size / 2
}

/// Picks `pair_count(size)` distinct icons at random, doubles them and
/// shuffles the result into a uniformly random deck with sequential ids.
pub fn deal(size: usize, icon_pool: &[String], rng: &mut SessionRng) -> Result<Vec<Card>, DealError> {
    if size < MIN_DEAL_SIZE {
        return Err(DealError::GridTooSmall(size));
    }

    let mut seen = HashSet::new();
    let mut icons: Vec<&String> = icon_pool
        .iter()
        .filter(|icon| seen.insert(icon.as_str()))
        .collect();

    let needed = pair_count(size);
    if icons.len() < needed {
        return Err(DealError::NotEnoughIcons {
            needed,
            available: icons.len(),
        });
    }

    rng.shuffle(&mut icons);
    icons.truncate(needed);

    let mut faces: Vec<&String> = icons.iter().chain(icons.iter()).copied().collect();
    rng.shuffle(&mut faces);

    Ok(faces
        .into_iter()
        .enumerate()
        .map(|(id, icon)| Card {
            id: id as u32,
            icon: icon.clone(),
            matched: false,
        })
        .collect())
}
