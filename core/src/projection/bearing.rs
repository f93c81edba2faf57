/// Deterministic pseudo-bearing for a target the hardware cannot localize:
/// an FNV-1a hash of the identifier mapped into `[0, 360)`. The same BSSID
/// lands on the same bearing across frames and sessions.
pub fn bearing_for(id: &str) -> f32 {
    const FNV_OFFSET: u32 = 0x811c_9dc5;
    const FNV_PRIME: u32 = 0x0100_0193;
    let mut hash = FNV_OFFSET;
    for byte in id.bytes() {
        hash ^= u32::from(byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    (hash % 360) as f32
}
