//! Tree Command
//!
//! Print the filtered directory → files map.

use crate::analyzer::{FileTree, FileTreeWalker};
use crate::config::ConfigLoader;
use crate::types::Result;

pub fn run(path: &std::path::Path) -> Result<()> {
    let config = ConfigLoader::load()?;
    let tree = FileTreeWalker::from_config(path, &config.analysis).walk()?;
    print!("{}", format_tree(&tree));
    Ok(())
}

fn format_tree(tree: &FileTree) -> String {
    let mut out = String::new();
    for (dir, files) in tree.directories() {
        let label = if dir.is_empty() { "." } else { dir };
        out.push_str(&format!("{}/\n", label));
        for file in files {
            out.push_str(&format!("  {}\n", file));
        }
    }
    out.push_str(&format!(
        "\n{} files in {} directories\n",
        tree.file_count(),
        tree.dir_count()
    ));
    out
}
