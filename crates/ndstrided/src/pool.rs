//! Reuse pools for scratch buffers.
//!
//! Stride scratch, axis permutations and transposition bitmaps are borrowed
//! from and returned to process-global pools. Pooling never changes results;
//! with the `pool` feature disabled every borrow allocates and every return
//! drops.
//!
//! The pools are guarded by `parking_lot` mutexes so separate arrays can be
//! used from separate threads.

use parking_lot::Mutex;

/// Maximum number of buffers each pool retains.
pub const MAX_RETAINED: usize = 64;

const POOLING: bool = cfg!(feature = "pool");

static INTS: Mutex<Vec<Vec<usize>>> = Mutex::new(Vec::new());
static BITMAPS: Mutex<Vec<BitMap>> = Mutex::new(Vec::new());

/// Borrow a zeroed integer buffer of length `len`.
pub fn borrow_ints(len: usize) -> Vec<usize> {
    if POOLING {
        let mut pool = INTS.lock();
        if let Some(pos) = pool.iter().position(|v| v.capacity() >= len) {
            let mut ints = pool.swap_remove(pos);
            ints.clear();
            ints.resize(len, 0);
            return ints;
        }
    }
    vec![0; len]
}

/// Return a buffer obtained from [`borrow_ints`].
pub fn return_ints(ints: Vec<usize>) {
    if !POOLING {
        return;
    }
    let mut pool = INTS.lock();
    if pool.len() < MAX_RETAINED {
        pool.push(ints);
    }
}

/// Fixed-capacity set of flags, one bit per element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitMap {
    words: Vec<u64>,
    len: usize,
}

impl BitMap {
    /// Bitmap with `len` cleared flags.
    pub fn new(len: usize) -> Self {
        Self {
            words: vec![0; len.div_ceil(64)],
            len,
        }
    }

    /// Number of flags.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn set(&mut self, i: usize) {
        debug_assert!(i < self.len);
        self.words[i / 64] |= 1u64 << (i % 64);
    }

    #[inline]
    pub fn is_set(&self, i: usize) -> bool {
        debug_assert!(i < self.len);
        self.words[i / 64] & (1u64 << (i % 64)) != 0
    }

    /// Clear every flag and resize to `len`.
    pub fn reset(&mut self, len: usize) {
        self.words.clear();
        self.words.resize(len.div_ceil(64), 0);
        self.len = len;
    }

    /// Number of set flags.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }
}

/// Borrow a cleared bitmap of `len` flags.
pub fn borrow_bitmap(len: usize) -> BitMap {
    if POOLING {
        let mut pool = BITMAPS.lock();
        let words = len.div_ceil(64);
        if let Some(pos) = pool.iter().position(|b| b.words.capacity() >= words) {
            let mut bitmap = pool.swap_remove(pos);
            bitmap.reset(len);
            return bitmap;
        }
    }
    BitMap::new(len)
}

/// Return a bitmap obtained from [`borrow_bitmap`].
pub fn return_bitmap(bitmap: BitMap) {
    if !POOLING {
        return;
    }
    let mut pool = BITMAPS.lock();
    if pool.len() < MAX_RETAINED {
        pool.push(bitmap);
    }
}
