use phf::phf_map;

pub const UTF8_SPACE: u8 = 32;
pub const UTF8_PIPE: u8 = 124;
pub const UTF8_UNDERSCORE: u8 = 95;

/// The UTF8 byte used to render a gap in an aligned sequence.
pub const UTF8_GAP: u8 = UTF8_UNDERSCORE;

/// The digital byte used to represent a gap in an aligned sequence.
///
/// This sits just past the end of the nucleotide alphabet, so
/// it can never be confused with a real residue.
pub const DIGITAL_GAP: u8 = 4;

pub const NUCLEOTIDE_ALPHABET_SIZE: usize = 4;

pub const NUCLEOTIDE_ALPHABET: [&str; NUCLEOTIDE_ALPHABET_SIZE] = ["A", "C", "G", "T"];

pub const UTF8_TO_DIGITAL_NUCLEOTIDE: phf::Map<u8, u8> = phf_map! {
    // upper case
    65u8 => 0,    // A
    67u8 => 1,    // C
    71u8 => 2,    // G
    84u8 => 3,    // T
    // lower case
    97u8 => 0,    // a
    99u8 => 1,    // c
    103u8 => 2,   // g
    116u8 => 3,   // t
};

pub const NUCLEOTIDE_INVERSE_MAP: phf::Map<u8, u8> = phf_map! {
    0u8 => 65,    // A
    1u8 => 67,    // C
    2u8 => 71,    // G
    3u8 => 84,    // T
    // end base alphabet
    4u8 => 95,    // _
};

/// Returns true if the digital byte is one of the four nucleotides.
#[inline]
pub fn is_nucleotide(digital_byte: u8) -> bool {
    (digital_byte as usize) < NUCLEOTIDE_ALPHABET_SIZE
}
