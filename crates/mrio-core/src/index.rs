//! Index generators for regional and sectoral aggregation
//!
//! Pure functions mapping the block structure to 1-based index sequences.
//! The 5-way and 15-way sector mappings are fixed domain classification
//! tables over the 35 base sectors, not derived quantities.

use crate::error::{BlockError, BlockResult};

/// Number of base sectors in the classification.
pub const BASE_SECTORS: usize = 35;

/// 5-way aggregate-sector id for each base sector.
const SECTOR_AGG_5: [u8; BASE_SECTORS] = [
    1, 1, 2, 2, 2, 2, 2, 3, 3, 2, 3, 3, 3, 3, 3, 2, 2, 2, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 5,
    5, 5, 5, 5,
];

/// 15-way aggregate-sector id for each base sector.
const SECTOR_AGG_15: [u8; BASE_SECTORS] = [
    1, 2, 3, 3, 3, 3, 3, 4, 4, 3, 3, 4, 4, 4, 4, 3, 5, 6, 7, 7, 7, 8, 9, 9, 9, 9, 10, 11, 12, 12,
    13, 14, 14, 15, 15,
];

/// The ordered region sequence `1..=regions`, optionally with one region
/// excluded.
///
/// # Examples
///
/// ```
/// use mrio_core::index::country_inds;
///
/// assert_eq!(country_inds(4, None).unwrap(), vec![1, 2, 3, 4]);
/// assert_eq!(country_inds(4, Some(3)).unwrap(), vec![1, 2, 4]);
/// ```
pub fn country_inds(regions: usize, exclude: Option<usize>) -> BlockResult<Vec<u8>> {
    if let Some(ex) = exclude {
        if ex < 1 || ex > regions {
            return Err(BlockError::InvalidIndex {
                index: ex as isize,
                blocks: regions,
            });
        }
    }
    Ok((1..=regions)
        .filter(|&k| Some(k) != exclude)
        .map(|k| k as u8)
        .collect())
}

/// Aggregate-sector id for each of the 35 base sectors under the requested
/// aggregation scheme. `35` is the identity mapping; `5` and `15` are the
/// fixed classification tables; anything else is rejected.
pub fn sector_inds(agg: usize) -> BlockResult<Vec<u8>> {
    match agg {
        5 => Ok(SECTOR_AGG_5.to_vec()),
        15 => Ok(SECTOR_AGG_15.to_vec()),
        35 => Ok((1..=BASE_SECTORS as u8).collect()),
        _ => Err(BlockError::InvalidAggregation { agg }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_inds_full_sequence() {
        assert_eq!(country_inds(5, None).unwrap(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_country_inds_exclusion() {
        assert_eq!(country_inds(5, Some(1)).unwrap(), vec![2, 3, 4, 5]);
        assert_eq!(country_inds(5, Some(5)).unwrap(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_country_inds_exclusion_bounds() {
        assert!(matches!(
            country_inds(5, Some(0)),
            Err(BlockError::InvalidIndex { .. })
        ));
        assert!(matches!(
            country_inds(5, Some(6)),
            Err(BlockError::InvalidIndex { index: 6, blocks: 5 })
        ));
    }

    #[test]
    fn test_sector_inds_identity() {
        let ids = sector_inds(35).unwrap();
        assert_eq!(ids.len(), BASE_SECTORS);
        assert_eq!(ids[0], 1);
        assert_eq!(ids[34], 35);
    }

    #[test]
    fn test_sector_inds_tables_cover_all_groups() {
        let c5 = sector_inds(5).unwrap();
        assert_eq!(c5.len(), BASE_SECTORS);
        for group in 1..=5u8 {
            assert!(c5.contains(&group));
        }

        let c15 = sector_inds(15).unwrap();
        assert_eq!(c15.len(), BASE_SECTORS);
        for group in 1..=15u8 {
            assert!(c15.contains(&group));
        }
    }

    #[test]
    fn test_sector_inds_rejects_unknown_scheme() {
        assert!(matches!(
            sector_inds(10),
            Err(BlockError::InvalidAggregation { agg: 10 })
        ));
    }
}
