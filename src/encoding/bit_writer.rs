use alloc::vec::Vec;

/// An interface for writing an arbitrary number of bits into a buffer,
/// filling every byte from the most significant bit downwards.
pub struct BitWriter {
    /// The buffer that's filled with completed bytes
    output: Vec<u8>,
    /// The byte that is currently being filled
    partial: u8,
    /// How many of the upper bits of `partial` are occupied
    bits_in_partial: u8,
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl BitWriter {
    /// Initialize a new writer. Write new bits into the buffer with `write_bits`, and
    /// obtain the output using `finish`
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            output: Vec::with_capacity(bytes),
            partial: 0,
            bits_in_partial: 0,
        }
    }

    /// Write the lowest `num_bits` of `bits` into the writer.
    ///
    /// `num_bits` refers to how many bits starting from the *least significant position*,
    /// but the bits will be written starting from the *most significant position*, continuing
    /// to the least significant position.
    ///
    /// # Panics
    /// If `num_bits` is greater than 64
    pub fn write_bits(&mut self, bits: u64, num_bits: u8) {
        assert!(num_bits <= 64, "can not write {num_bits} bits from a u64");
        let mut remaining = num_bits;
        while remaining > 0 {
            let free_bits_in_current_byte = 8 - self.bits_in_partial;
            let num_bits_being_added = free_bits_in_current_byte.min(remaining);
            // The next `num_bits_being_added` bits of the input, moved all the way to the right
            let chunk =
                (bits >> (remaining - num_bits_being_added)) & ((1 << num_bits_being_added) - 1);
            // ...and then moved left again until they sit right behind the occupied bits
            self.partial |= (chunk as u8) << (free_bits_in_current_byte - num_bits_being_added);

            self.bits_in_partial += num_bits_being_added;
            remaining -= num_bits_being_added;
            if self.bits_in_partial == 8 {
                self.output.push(self.partial);
                self.partial = 0;
                self.bits_in_partial = 0;
            }
        }
    }

    /// Amount of bits written so far
    pub fn bits_written(&self) -> usize {
        self.output.len() * 8 + self.bits_in_partial as usize
    }

    /// Returns the populated buffer that you've been writing bits into.
    ///
    /// A partially filled last byte is padded with zeros.
    pub fn finish(mut self) -> Vec<u8> {
        if self.bits_in_partial > 0 {
            self.output.push(self.partial);
        }
        self.output
    }
}
