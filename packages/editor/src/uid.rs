use crc32fast::Hasher;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static UID_COUNTER: AtomicU64 = AtomicU64::new(0);

const PREFIX_LEN: usize = 5;

/// Generate a short lowercase identifier, unique within this process
///
/// Five letters derived from a CRC32 of the clock and a counter, followed by
/// the counter itself in base 36.
pub fn create_uid() -> String {
    let count = UID_COUNTER.fetch_add(1, Ordering::Relaxed);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();

    let mut hasher = Hasher::new();
    hasher.update(&nanos.to_le_bytes());
    hasher.update(&count.to_le_bytes());
    let mut hash = hasher.finalize();

    let mut uid = String::with_capacity(PREFIX_LEN + 4);
    for _ in 0..PREFIX_LEN {
        uid.push((b'a' + (hash % 26) as u8) as char);
        hash /= 26;
    }
    uid.push_str(&to_base36(count));
    uid
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8_lossy(&digits).into_owned()
}
