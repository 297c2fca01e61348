//! Tile-count resolution for stretchable cells.
//!
//! When a cell is tiled instead of scaled, each axis is resolved on its own:
//! how many copies of the source extent to lay down, and how large the
//! resulting block is before any final scale.

use std::fmt;

/// Default leftover fraction at which integer tiling keeps an extra tile.
pub const DEFAULT_TILE_RATIO: f64 = 0.5;

/// How a frame resizes its stretchable cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum TileMode {
    /// Scale continuously.
    #[default]
    None,
    /// Repeat source pixels, cropping the last partial tile.
    Simple,
    /// Repeat a whole number of tiles, then scale the block to fit.
    Integer,
}

impl TileMode {
    pub fn is_tiled(self) -> bool {
        !matches!(self, Self::None)
    }

    /// The per-axis strategy for this mode, or `None` when scaling.
    pub fn strategy(self, ratio: f64) -> Option<TileStrategy> {
        match self {
            Self::None => None,
            Self::Simple => Some(TileStrategy::Simple),
            Self::Integer => Some(TileStrategy::Integer { ratio }),
        }
    }
}

impl fmt::Display for TileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "off"),
            Self::Simple => write!(f, "on"),
            Self::Integer => write!(f, "integer"),
        }
    }
}

/// Per-axis tiling rule.
///
/// Cropping and integer tile-count selection are separate strategies;
/// there is no way to ask for both.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TileStrategy {
    Simple,
    /// `ratio` is the leftover fraction below which the partial tile is
    /// dropped.
    Integer { ratio: f64 },
}

impl TileStrategy {
    /// Whether the tiled block is cropped (rather than scaled) to size.
    pub fn crops(&self) -> bool {
        matches!(self, Self::Simple)
    }
}

/// Outcome of resolving one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TilePlan {
    /// Number of tile repetitions, at least 1.
    pub count: u32,
    /// Extent of the block after tiling (and cropping, for `Simple`).
    pub extent: u32,
}

impl TilePlan {
    /// Whether the block still needs scaling to reach `dest`.
    pub fn needs_scale(&self, dest: u32) -> bool {
        self.extent != dest
    }
}

/// Decide how to tile `source` pixels across `dest` pixels.
///
/// `Simple` uses `ceil(dest / source)` tiles and crops to exactly `dest`.
/// `Integer` keeps an exact multiple as is; otherwise it drops the partial
/// tile when the leftover fraction is strictly below `ratio` (fewer, larger
/// tiles) and keeps it when not (one extra, smaller tile). The block is then
/// `count * source` and gets scaled to `dest`.
pub fn resolve_tiles(source: u32, dest: u32, strategy: TileStrategy) -> TilePlan {
    if source == 0 {
        return TilePlan {
            count: 1,
            extent: dest,
        };
    }
    let count = dest.div_ceil(source).max(1);
    match strategy {
        TileStrategy::Simple => TilePlan {
            count,
            extent: dest,
        },
        TileStrategy::Integer { ratio } => {
            let leftover = dest % source;
            if leftover == 0 {
                return TilePlan {
                    count,
                    extent: dest,
                };
            }
            let fraction = leftover as f64 / source as f64;
            let count = if fraction < ratio {
                (count - 1).max(1)
            } else {
                count
            };
            TilePlan {
                count,
                extent: count * source,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn integer(ratio: f64) -> TileStrategy {
        TileStrategy::Integer { ratio }
    }

    #[test]
    fn simple_crops_partial_tile() {
        let plan = resolve_tiles(10, 25, TileStrategy::Simple);
        assert_eq!(plan, TilePlan { count: 3, extent: 25 });
        assert!(!plan.needs_scale(25));
    }

    #[test]
    fn simple_smaller_than_one_tile() {
        let plan = resolve_tiles(10, 4, TileStrategy::Simple);
        assert_eq!(plan, TilePlan { count: 1, extent: 4 });
    }

    #[test]
    fn integer_exact_multiple_is_unscaled() {
        let plan = resolve_tiles(10, 30, integer(0.9));
        assert_eq!(plan, TilePlan { count: 3, extent: 30 });
        assert!(!plan.needs_scale(30));
    }

    #[test]
    fn integer_tie_keeps_extra_tile() {
        let plan = resolve_tiles(10, 15, integer(0.5));
        assert_eq!(plan, TilePlan { count: 2, extent: 20 });
        assert!(plan.needs_scale(15));
    }

    #[test]
    fn integer_below_ratio_drops_tile() {
        let plan = resolve_tiles(10, 15, integer(0.51));
        assert_eq!(plan, TilePlan { count: 1, extent: 10 });
    }

    #[test]
    fn integer_never_drops_below_one() {
        let plan = resolve_tiles(10, 3, integer(1.0));
        assert_eq!(plan, TilePlan { count: 1, extent: 10 });
    }

    #[test]
    fn integer_ratio_zero_always_keeps() {
        let plan = resolve_tiles(10, 21, integer(0.0));
        assert_eq!(plan.count, 3);
    }

    #[test]
    fn mode_strategies() {
        assert_eq!(TileMode::None.strategy(0.5), None);
        assert_eq!(TileMode::Simple.strategy(0.5), Some(TileStrategy::Simple));
        assert_eq!(
            TileMode::Integer.strategy(0.25),
            Some(TileStrategy::Integer { ratio: 0.25 })
        );
        assert!(!TileMode::None.is_tiled());
        assert!(TileMode::Integer.is_tiled());
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn simple_covers_and_crops(source in 1u32..64, dest in 1u32..512) {
                let plan = resolve_tiles(source, dest, TileStrategy::Simple);
                prop_assert!(plan.count >= 1);
                prop_assert!(plan.count * source >= dest, "tiles must cover the span");
                prop_assert_eq!(plan.extent, dest);
            }

            #[test]
            fn integer_exact_multiples(source in 1u32..64, n in 1u32..16, ratio in 0.0f64..=1.0) {
                let dest = source * n;
                let plan = resolve_tiles(source, dest, integer(ratio));
                prop_assert_eq!(plan.count, n);
                prop_assert!(!plan.needs_scale(dest));
            }

            #[test]
            fn integer_block_is_whole_tiles(source in 1u32..64, dest in 1u32..512, ratio in 0.0f64..=1.0) {
                let plan = resolve_tiles(source, dest, integer(ratio));
                prop_assert!(plan.count >= 1);
                prop_assert_eq!(plan.extent % source, 0);
                let floor = (dest / source).max(1);
                let ceil = dest.div_ceil(source).max(1);
                prop_assert!(plan.count == floor || plan.count == ceil);
            }
        }
    }
}
