/// Current UTC timestamp in milliseconds.
///
/// All record timestamps (`timestamp`, `createdAt`, `updatedAt`) use this
/// representation; date strings only exist at the HTTP boundary.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Snowflake-style i64 used as the numeric part of resource IDs.
///
/// 53 bits so the value survives a round-trip through a JavaScript client:
///   - 41 bits: milliseconds since 2024-01-01 UTC
///   - 12 bits: random
pub fn snowflake_id() -> i64 {
    use rand::Rng;
    const EPOCH_MS: i64 = 1_704_067_200_000; // 2024-01-01 00:00:00 UTC
    let ts = (now_millis() - EPOCH_MS) & 0x1FF_FFFF_FFFF; // 41 bits
    let rand_bits: i64 = rand::thread_rng().gen_range(0..0x1000); // 12 bits
    (ts << 12) | rand_bits
}

/// Prefixed resource ID, e.g. `item_8791624523776` / `bill_8791624523777`.
///
/// The prefix convention comes from the wire format; the numeric part is a
/// snowflake so concurrent creates never collide.
pub fn prefixed_id(prefix: &str) -> String {
    format!("{}_{}", prefix, snowflake_id())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snowflake_ids_are_distinct() {
        let a = snowflake_id();
        let b = snowflake_id();
        assert!(a > 0);
        assert!(b > 0);
        assert_ne!(a, b);
    }

    #[test]
    fn prefixed_id_carries_prefix() {
        let id = prefixed_id("bill");
        assert!(id.starts_with("bill_"));
    }
}
