pub mod heading_tree;
pub mod path_patterns;
pub mod sentence_scanner;
pub mod text;
