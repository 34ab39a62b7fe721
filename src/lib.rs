//! Subblock query engine for a tiled, pyramidal microscopy image container.
//!
//! Queries select a subset of subblocks (image tiles) by conditions over
//! their dimension coordinates and derived geometric attributes. Conditions
//! of the form "variable = constant" can be combined with the boolean
//! operators AND, OR, XOR and NOT, and grouped with parentheses.
//!
//! Variables are the coordinates of the various dimensions (like T, Z, C),
//! or one of the following:
//!
//! | string       | meaning                                                |
//! | ------------ | ------------------------------------------------------ |
//! | Width        | the (physical) width of the subblock in pixels         |
//! | Height       | the (physical) height of the subblock in pixels        |
//! | LogPosX      | the x-position of the logical subblock position        |
//! | LogPosY      | the y-position of the logical subblock position        |
//! | LogPosWidth  | the width of the logical subblock position             |
//! | LogPosHeight | the height of the logical subblock position            |
//! | IsLayer0     | "1" if the subblock is in pyramid layer 0, "0" otherwise |
//!
//! Besides the relational operators `= != < > <= >=`, a condition may test
//! an inclusive range `T=[2,4]` or list membership `T={1,3,5}`.
//!
//! A query string is compiled once into a [`QueryCondition`] and can then be
//! evaluated any number of times, from any number of threads:
//!
//! ```
//! use subblock_query::{QueryCondition, SubBlockInfo, sub_blocks_matching};
//!
//! let condition = QueryCondition::parse("T=3 AND (Z=1 OR C=0)").unwrap();
//! let sub_blocks: Vec<SubBlockInfo> = Vec::new();
//! let indices = sub_blocks_matching(sub_blocks.as_slice(), &condition, None).unwrap();
//! assert!(indices.is_empty());
//! ```

pub mod error;
pub mod query;
pub mod subblock;

pub use error::{EvalError, ParseError};
pub use query::{
    EvaluationData, NonExistentDimensionHandling, QueryCondition, QueryOptions, enum_subset,
    sub_blocks_matching, sub_blocks_matching_par,
};
pub use subblock::{DimCoordinate, Dimension, IntRect, IntSize, SubBlockInfo, SubBlockRepository};
