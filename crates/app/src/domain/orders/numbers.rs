//! Human-readable order and payment numbers.

use jiff::Timestamp;
use rand::{Rng, seq::SliceRandom};

/// Prefix of every order number.
pub const ORDER_NO_PREFIX: &str = "ORD";

/// Prefix of every payment number.
pub const PAYMENT_NO_PREFIX: &str = "PAY";

const ORDER_NO_SUFFIX_LEN: usize = 6;
const PAYMENT_NO_SUFFIX_LEN: usize = 8;
const SUFFIX_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// `ORD` + `YYYYMMDDHHMMSS` in UTC + six random uppercase alphanumerics.
///
/// Not unique on its own; the `orders_order_no_key` constraint decides.
pub fn order_no<R: Rng + ?Sized>(now: Timestamp, rng: &mut R) -> String {
    format!(
        "{ORDER_NO_PREFIX}{}{}",
        now.strftime("%Y%m%d%H%M%S"),
        random_suffix(rng, ORDER_NO_SUFFIX_LEN)
    )
}

/// `PAY` + unix seconds + eight random uppercase alphanumerics.
pub fn payment_no<R: Rng + ?Sized>(now: Timestamp, rng: &mut R) -> String {
    format!(
        "{PAYMENT_NO_PREFIX}{}{}",
        now.as_second(),
        random_suffix(rng, PAYMENT_NO_SUFFIX_LEN)
    )
}

fn random_suffix<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .filter_map(|_| SUFFIX_ALPHABET.choose(rng).copied().map(char::from))
        .collect()
}
