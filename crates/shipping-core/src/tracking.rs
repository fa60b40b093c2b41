//! Tracking id derivation for shipped orders.
//!
//! A tracking id is a deterministic function of the shipment's address line:
//! the SHA-256 digest of the line seeds a [`StdRng`], which then draws the id
//! in the shape `LL-<n><ddd>-<n/2><ddddddd>`. `L` is an uppercase letter in
//! `A..=Y`, `d` a decimal digit and `n` the byte length of the address line.
//! Identical shipments therefore map to identical ids, although nothing
//! resolves them.

use crate::proto::Address;
use core::ops::RangeInclusive;
use rand::{Rng, SeedableRng, rngs::StdRng};
use sha2::{Digest, Sha256};

/// Postal codes accepted as plausible US ZIP codes.
pub const ZIP_CODE_RANGE: RangeInclusive<i32> = 10_000..=99_999;

/// Joins an address into the single line tracking ids are derived from:
/// `"<street>, <city>, <state>, <zip>"`.
pub fn format_address(address: &Address) -> String {
    format!(
        "{}, {}, {}, {}",
        address.street_address, address.city, address.state, address.zip_code
    )
}

pub fn is_valid_zip_code(zip_code: i32) -> bool {
    ZIP_CODE_RANGE.contains(&zip_code)
}

/// Derives a tracking id from an address line. Never returns an empty string.
pub fn create_tracking_id(address_line: &str) -> String {
    let mut seed = [0u8; 32];
    seed.copy_from_slice(&Sha256::digest(address_line.as_bytes()));
    let mut rng = StdRng::from_seed(seed);
    let len = address_line.len();

    let first = random_letter(&mut rng);
    let second = random_letter(&mut rng);
    let short = random_digits(&mut rng, 3);
    let long = random_digits(&mut rng, 7);

    format!("{first}{second}-{len}{short}-{}{long}", len / 2)
}

fn random_letter(rng: &mut impl Rng) -> char {
    char::from(rng.random_range(b'A'..b'Z'))
}

fn random_digits(rng: &mut impl Rng, digits: usize) -> String {
    (0..digits)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect()
}
