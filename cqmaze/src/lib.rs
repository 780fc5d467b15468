pub mod amplify;
pub mod array;
pub mod board;
pub mod dims;
pub mod encoding;
pub mod graph;
pub mod paths;
pub mod registry;
pub mod selectors;
pub mod solver;

/// Random number generator used for anything, where determinism is required.
pub type Random = rand_xoshiro::Xoshiro256StarStar;
