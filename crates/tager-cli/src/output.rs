//! Terminal output helpers.

use colored::Colorize;
use std::fmt::Display;
use tager_graph::TagNode;

/// Per-item problem inside a batch; the batch keeps going.
pub fn warn(message: impl Display) {
    eprintln!("{} {}", "warning:".yellow().bold(), message);
}

pub fn done(verb: &str, message: impl Display) {
    println!("{} {}", verb.green().bold(), message);
}

/// `name` or `name : comment`, as listed by `ls` and `show tag`.
pub fn tag_line(node: &TagNode) -> String {
    match &node.comment {
        Some(comment) => format!("{} : {}", node.name, comment),
        None => node.name.clone(),
    }
}
