use solana_program::keccak::hashv;

// https://docs.chain.link/docs/chainlink-vrf-best-practices/#getting-multiple-random-number

/// Expands one revealed randomness value into a stream of u64s, so a single
/// oracle round can drive both the index pick and every Fisher-Yates swap.
pub fn random_u64(seed: &[u8; 32], nonce: u64) -> u64 {
    let hash = hashv(&[seed, &nonce.to_le_bytes()]);
    u64::from_le_bytes(
        hash.to_bytes()[0..8]
            .try_into()
            .expect("slice with incorrect length"),
    )
}

/// Fisher-Yates permutation driven by the expanded randomness stream.
pub fn permute_in_place<T>(items: &mut [T], seed: &[u8; 32]) {
    for i in (1..items.len()).rev() {
        let j = (random_u64(seed, i as u64) % (i as u64 + 1)) as usize;
        items.swap(i, j);
    }
}

/// Formats the civil date of a unix timestamp as YYYYMMDD digits, the
/// derived unlock code of the card variant's child lock.
pub fn date_code_from_unix(unix_ts: i64) -> u32 {
    let days = unix_ts.div_euclid(86_400);
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year as u32) * 10_000 + (month as u32) * 100 + day as u32
}
