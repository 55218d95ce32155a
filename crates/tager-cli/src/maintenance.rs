//! `tager autoremove` and `tager info`.

use crate::output::{done, warn};
use crate::session::Session;
use anyhow::Result;
use colored::Colorize;
use tager_graph::{
    ConsistencyReconciler, EdgeKind, FsProbe, GraphNavigator, ReconcileReport, TagStore,
};

/// Which dangling edges `autoremove` cleans up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Tags,
    Files,
    All,
}

pub fn autoremove(session: &mut Session, scope: Scope, targets: &[String]) -> Result<()> {
    let reconciler = ConsistencyReconciler::new(&FsProbe);
    let report = match scope {
        Scope::Tags => reconciler.execute(&mut session.store, EdgeKind::Tag, targets),
        Scope::Files => reconciler.execute(&mut session.store, EdgeKind::File, targets),
        Scope::All => reconciler.execute_all(&mut session.store, targets),
    };

    for err in &report.unresolved {
        warn(err);
    }
    for found in &report.dangling {
        for target in &found.targets {
            done("removed", format_args!("{} {} -> {}", found.kind, found.tag, target));
        }
    }

    if report.is_clean() {
        println!("nothing to remove");
        return Ok(());
    }
    session.save()
}

/// Without a tag: the current tag and a per-tag count of dangling edges.
/// With one: every dangling edge of that tag.
pub fn info(store: &TagStore, tag: Option<&str>) -> Result<()> {
    let reconciler = ConsistencyReconciler::new(&FsProbe);
    match tag {
        Some(reference) => {
            let node = GraphNavigator::new(store).resolve(reference)?;
            let report = reconciler.scan_all(store, &[node.name.as_str()]);
            if report.is_clean() {
                println!("{}: no dangling edges", node.name);
            }
            for found in &report.dangling {
                for target in &found.targets {
                    println!("{} {}", found.kind, target);
                }
            }
        }
        None => {
            match store.current() {
                Some(current) => println!("current tag: {current}"),
                None => println!("current tag: (none)"),
            }
            let report = reconciler.scan_all::<&str>(store, &[]);
            print_counts(&report);
        }
    }
    Ok(())
}

fn print_counts(report: &ReconcileReport) {
    if report.is_clean() {
        println!("no dangling edges");
        return;
    }
    for found in &report.dangling {
        println!(
            "{}: {} dangling {} edge(s)",
            found.tag,
            found.targets.len(),
            found.kind
        );
    }
    println!(
        "{} run `tager autoremove all` to clean up {} edge(s)",
        "hint:".cyan().bold(),
        report.edge_count()
    );
}
