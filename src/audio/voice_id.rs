use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

// Identifies one start of one pad, so a late "voice ended" can be told apart
// from the voice that replaced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VoiceId(pub u64);

pub fn next_voice_id() -> VoiceId {
    VoiceId(NEXT_ID.fetch_add(1, Ordering::Relaxed))
}
