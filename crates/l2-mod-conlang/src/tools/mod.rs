pub mod grammar;
pub mod lexicon;
pub mod phonology;
