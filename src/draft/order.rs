//! Draft order assignment

use std::collections::HashSet;

use rand::{Rng, seq::SliceRandom};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Commissioner input: either an explicit order or a shuffle
#[derive(Debug, Clone, Default)]
pub struct OrderRequest {
    pub order: Option<Vec<Uuid>>,
    pub randomize: bool,
}

/// Turn a request into a concrete order over `members`.
///
/// Exactly one of an explicit order or `randomize` must be given, and an
/// explicit order must be a permutation of the members.
pub fn resolve_order<R: Rng + ?Sized>(
    members: &[Uuid],
    request: OrderRequest,
    rng: &mut R,
) -> AppResult<Vec<Uuid>> {
    if members.is_empty() {
        return Err(AppError::Validation(
            "League has no members to order".to_string(),
        ));
    }

    match (request.order, request.randomize) {
        (Some(_), true) => Err(AppError::Validation(
            "Provide either an explicit order or randomize, not both".to_string(),
        )),
        (None, false) => Err(AppError::Validation(
            "Provide an explicit order or set randomize to true".to_string(),
        )),
        (Some(order), false) => {
            if !is_permutation(&order, members) {
                return Err(AppError::Validation(
                    "Draft order must list every league member exactly once".to_string(),
                ));
            }
            Ok(order)
        }
        (None, true) => {
            let mut order = members.to_vec();
            order.shuffle(rng);
            Ok(order)
        }
    }
}

/// `order` contains each of `members` exactly once and nothing else
pub fn is_permutation(order: &[Uuid], members: &[Uuid]) -> bool {
    if order.len() != members.len() {
        return false;
    }
    let unique: HashSet<&Uuid> = order.iter().collect();
    unique.len() == order.len() && members.iter().all(|m| unique.contains(m))
}

/// 1-based draft positions for each member of `order`
pub fn draft_positions(order: &[Uuid]) -> Vec<(Uuid, i32)> {
    order
        .iter()
        .enumerate()
        .map(|(index, user_id)| (*user_id, index as i32 + 1))
        .collect()
}
