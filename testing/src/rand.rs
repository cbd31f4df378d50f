use rand::RngCore;

/// A deterministic `RngCore` replaying the seed bytes in a loop; words
/// are assembled big-endian.  An empty seed yields zeros.
pub struct MockRng {
    seed: Vec<u8>,
    pos: usize,
}

impl MockRng {
    pub fn new(seed: impl Into<Vec<u8>>) -> Self {
        Self {
            seed: seed.into(),
            pos: 0,
        }
    }

    fn byte(&mut self) -> u8 {
        let Some(byte) = self.seed.get(self.pos % self.seed.len().max(1)) else {
            return 0;
        };
        self.pos += 1;
        *byte
    }
}

impl Default for MockRng {
    fn default() -> Self {
        Self::new("snowlight")
    }
}

impl RngCore for MockRng {
    fn next_u32(&mut self) -> u32 {
        let mut buf = [0; 4];
        self.fill_bytes(&mut buf);
        u32::from_be_bytes(buf)
    }

    fn next_u64(&mut self) -> u64 {
        let mut buf = [0; 8];
        self.fill_bytes(&mut buf);
        u64::from_be_bytes(buf)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for slot in dest.iter_mut() {
            *slot = self.byte();
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
