use canonical_huffman::huffman::encoder::concatenate;
use canonical_huffman::huffman::{canonicalize, FrequencyTable, HuffmanTree};
use canonical_huffman::Result;

fn main() -> Result<()> {
    // symbol-frequency pairs
    let syms_and_freqs = vec![(0u8, 10), (1, 2), (2, 24), (3, 340), (4, 10), (5, 11)];
    let frequencies = FrequencyTable::from_pairs(syms_and_freqs)?;

    let tree = HuffmanTree::new(&frequencies)?;
    println!("huffman tree\n{}", tree);
    let code_lengths = tree.code_lengths();
    println!("code lengths\n{:?}", code_lengths);

    let table = canonicalize(&code_lengths)?;
    println!("canonical codes");
    for (symbol, code) in table.iter_canonical() {
        println!("{:>3} | {}", symbol, code);
    }

    let sequence_to_encode = vec![3, 3, 3, 2, 1, 4, 5, 3, 3, 3];
    println!("sequence to encode\n{:?}", sequence_to_encode);
    let encoded = concatenate(&table, sequence_to_encode, "")?;
    println!("encoded sequence\n{}", encoded);
    Ok(())
}
