use crate::models::{CatalogOrder, FashionItem};
use rand::seq::SliceRandom;
use rand::Rng;

/// Order items in place
///
/// `Ranked` sorts by `style_score` descending. Items with equal scores end up
/// in a uniformly random order: the slice is shuffled first and the stable
/// sort keeps that order among ties.
pub fn rank_items<R: Rng + ?Sized>(items: &mut [FashionItem], order: CatalogOrder, rng: &mut R) {
    match order {
        CatalogOrder::Ranked => {
            items.shuffle(rng);
            items.sort_by(|a, b| b.style_score.total_cmp(&a.style_score));
        }
        CatalogOrder::Newest => {
            items.sort_by(|a, b| {
                b.created_at
                    .cmp(&a.created_at)
                    .then_with(|| b.id.cmp(&a.id))
            });
        }
    }
}

/// True when scores never increase along the slice
pub fn is_ranked(items: &[FashionItem]) -> bool {
    items
        .windows(2)
        .all(|pair| pair[0].style_score >= pair[1].style_score)
}
