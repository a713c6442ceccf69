pub mod file_tree;

pub use file_tree::{FileTree, FileTreeWalker};
