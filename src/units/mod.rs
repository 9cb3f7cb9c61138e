mod subunits;
mod token;

pub use subunits::SubunitAmount;

pub use token::TokenAmount;

pub const SUBUNITS_PER_TOKEN: u128 = 1_000_000_000_000_000_000;

/// Integer strings with more digits than this are assumed to be denominated in subunits.
pub const SUBUNIT_DIGITS_THRESHOLD: usize = 15;

pub const DISPLAY_DECIMALS: u32 = 6;
