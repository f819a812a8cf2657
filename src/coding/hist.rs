//! A Histogram that counts the occurrences of every symbol in a buffer.

use crate::utils::numeric::gcd_of;

/// A list of (symbol, count) pairs, sorted by symbol, with no zero counts.
pub type FrequencyTable = Vec<(u8, u64)>;

pub struct Histogram<const BINS: usize> {
    values: [u64; BINS],
}

impl<const BINS: usize> Histogram<BINS> {
    pub fn from_data<Ty: Into<usize> + Copy>(values: &[Ty]) -> Histogram<BINS> {
        // Fill the histogram in four buckets to allow instruction-level
        // parallelism.
        let mut hist0 = [0; BINS];
        let mut hist1 = [0; BINS];
        let mut hist2 = [0; BINS];
        let mut hist3 = [0; BINS];

        let mut i = 0;
        while i + 3 < values.len() {
            hist0[Into::into(values[i])] += 1;
            hist1[Into::into(values[i + 1])] += 1;
            hist2[Into::into(values[i + 2])] += 1;
            hist3[Into::into(values[i + 3])] += 1;
            i += 4;
        }
        while i < values.len() {
            hist0[Into::into(values[i])] += 1;
            i += 1;
        }

        let mut hist = [0; BINS];
        for i in 0..BINS {
            hist[i] = hist0[i] + hist1[i] + hist2[i] + hist3[i];
        }

        Histogram { values: hist }
    }

    pub fn get_bins(&self) -> &[u64; BINS] {
        &self.values
    }

    /// Returns the number of bins with a non-zero count.
    pub fn num_symbols(&self) -> usize {
        self.values.iter().filter(|&c| *c != 0).count()
    }

    /// Divide all of the counts by their greatest common divisor. This keeps
    /// the ratios between the counts. Returns the divisor.
    pub fn normalize(&mut self) -> u64 {
        let divisor = gcd_of(self.values.iter().copied());
        if divisor > 1 {
            for val in self.values.iter_mut() {
                *val /= divisor;
            }
        }
        divisor
    }
}

impl Histogram<256> {
    /// Returns the non-zero bins in ascending symbol order.
    pub fn frequency_table(&self) -> FrequencyTable {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, count)| **count != 0)
            .map(|(sym, count)| (sym as u8, *count))
            .collect()
    }
}
