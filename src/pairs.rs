//! Candidate pair generation: the full user×item cross join.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::error::PrepError;
use crate::filter::filter_by;
use crate::table::Table;

/// Row-order randomization strategy for [`user_item_pairs`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shuffle {
    /// Keep the cross-join order.
    #[default]
    No,

    /// Randomize row order from OS entropy.
    ///
    /// This is deliberately **not reproducible**: two calls with identical
    /// inputs produce different orders. Use [`Shuffle::Seeded`] when a
    /// reproducible permutation is needed.
    Unseeded,

    /// Randomize row order with a seeded generator; the same seed and input
    /// always produce the same permutation.
    Seeded(u64),
}

/// Produce every combination of one user row and one item row.
///
/// The output is the full cross join, `|users| × |items|` rows, with the user
/// table's columns followed by the item table's columns. The two tables must
/// not share a column name.
///
/// When `filter` is given, every row whose `(user_col, item_col)` key occurs
/// in the filter table is removed (see [`filter_by`]); both columns must then
/// exist in the joined output and in the filter table. Typical use is
/// excluding already-observed interactions from the candidate space.
///
/// Neither input table is mutated.
pub fn user_item_pairs(
    users: &Table,
    items: &Table,
    user_col: &str,
    item_col: &str,
    filter: Option<&Table>,
    shuffle: Shuffle,
) -> Result<Table, PrepError> {
    let mut pairs = users.cross_join(items)?;

    if let Some(filter) = filter {
        pairs = filter_by(&pairs, filter, &[user_col, item_col])?;
    }

    let pairs = match shuffle {
        Shuffle::No => pairs,
        Shuffle::Unseeded => shuffle_rows(&pairs, &mut rand::thread_rng()),
        Shuffle::Seeded(seed) => {
            shuffle_rows(&pairs, &mut Xoshiro256PlusPlus::seed_from_u64(seed))
        }
    };

    Ok(pairs)
}

fn shuffle_rows<R: rand::Rng>(table: &Table, rng: &mut R) -> Table {
    let mut rows: Vec<usize> = (0..table.n_rows()).collect();
    rows.shuffle(rng);
    table.take_rows(&rows)
}
