use std::sync::atomic::{AtomicUsize, Ordering};

/// Observer notified each time a scanner inspects a locus of a comparison.
///
/// Scanners are generic over this trait, so that the no-op `()` implementation compiles away
/// entirely, while an `AtomicUsize` can count how much work a scan actually performed.
pub trait LocusVisitor: Sync {
    fn visit(&self);
}

impl LocusVisitor for () {
    #[inline(always)]
    fn visit(&self) {}
}

impl LocusVisitor for AtomicUsize {
    #[inline]
    fn visit(&self) {
        self.fetch_add(1, Ordering::Relaxed);
    }
}
