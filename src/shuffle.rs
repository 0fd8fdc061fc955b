use rand::Rng;

use crate::error::EvalError;

pub const MIN_DEGREE: u8 = 1;
pub const MAX_DEGREE: u8 = 5;

/// Sentences are cut into blocks of `len / WORDS_PER_BLOCK` words (at least
/// one) before shuffling, so long sentences move whole phrases.
const WORDS_PER_BLOCK: usize = 15;

/// Turns a correct translation into a plausible-looking wrong one by swapping
/// word blocks. `degree` is the maximum number of swaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shuffler {
    degree: u8,
}

impl Shuffler {
    pub fn new(degree: u8) -> Result<Shuffler, EvalError> {
        if !(MIN_DEGREE..=MAX_DEGREE).contains(&degree) {
            return Err(EvalError::InvalidDegree(degree));
        }
        Ok(Shuffler { degree })
    }

    pub fn degree(&self) -> u8 {
        self.degree
    }

    pub fn shuffle<R: Rng + ?Sized>(&self, sentence: &str, rng: &mut R) -> String {
        let mut blocks = split_blocks(sentence);
        let swaps = plan_swaps(blocks.len(), self.degree, rng);
        for (from, to) in swaps {
            blocks.swap(from, to);
        }
        capitalize_first(&blocks.join(" "))
    }
}

/// Lower-cased word blocks of `sentence`, in order.
pub fn split_blocks(sentence: &str) -> Vec<String> {
    let lowered = sentence.to_lowercase();
    let words = lowered.split_whitespace().collect::<Vec<_>>();
    let block_len = (words.len() / WORDS_PER_BLOCK).max(1);
    words.chunks(block_len).map(|chunk| chunk.join(" ")).collect()
}

/// Picks `degree` swaps between block positions, each position taking part in
/// at most one swap. Before every swap the pool must hold more than twice the
/// swaps still owed, so a sentence with too few blocks for the full degree is
/// left as it is.
pub fn plan_swaps<R: Rng + ?Sized>(
    n_blocks: usize,
    degree: u8,
    rng: &mut R,
) -> Vec<(usize, usize)> {
    let mut positions = (0..n_blocks).collect::<Vec<_>>();
    let mut swaps = Vec::with_capacity(degree as usize);

    for done in 0..degree {
        if (degree - done) as usize * 2 >= positions.len() {
            break;
        }
        let from = rng.gen_range(0..positions.len());
        let mut to = rng.gen_range(0..positions.len());
        while to == from {
            to = rng.gen_range(0..positions.len());
        }
        swaps.push((positions[from], positions[to]));

        positions.remove(from.max(to));
        positions.remove(from.min(to));
    }

    swaps
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/shuffle.rs"]
mod tests;
