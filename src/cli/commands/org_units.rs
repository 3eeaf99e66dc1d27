//! Org-units command implementation
//!
//! Prints the organisation unit tree, optionally filtered and with a set of
//! units marked as selected.

use crate::cli::commands::{open_session, split_ids};
use crate::cli::exit_code;
use crate::core::selection::{OrgUnitView, SelectionKind, Tree};
use clap::Args;

/// Arguments for the org-units command
#[derive(Args, Debug)]
pub struct OrgUnitsArgs {
    /// Only show branches containing a unit whose name contains this text
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Expand every node
    #[arg(long)]
    pub expand_all: bool,

    /// Mark these units as selected (comma-separated ids)
    #[arg(long, value_name = "IDS")]
    pub select: Option<String>,
}

impl OrgUnitsArgs {
    /// Execute the org-units command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let (_, mut session) = match open_session(config_path).await {
            Ok(s) => s,
            Err(code) => return Ok(code),
        };

        if self.expand_all {
            session.selection.expand_all(Tree::OrgUnits, &session.catalog);
        }
        for id in self.select.as_deref().map(split_ids).unwrap_or_default() {
            session.selection.select(SelectionKind::OrgUnits, id);
        }

        let view = session.selection.org_unit_view(&session.catalog, &self.search);
        if view.is_empty() {
            println!("No organisation units match '{}'", self.search);
            return Ok(exit_code::SUCCESS);
        }

        let mut out = String::new();
        for node in &view {
            render_node(node, 0, &mut out);
        }
        print!("{out}");

        Ok(exit_code::SUCCESS)
    }
}

/// One line per visible node; children only under expanded nodes
fn render_node(node: &OrgUnitView<'_>, depth: usize, out: &mut String) {
    let toggle = match (node.has_children, node.expanded) {
        (false, _) => " ",
        (true, true) => "▼",
        (true, false) => "▶",
    };
    let check = if node.selected { "[x]" } else { "[ ]" };
    out.push_str(&format!(
        "{}{toggle} {check} {}  [{}]\n",
        "  ".repeat(depth),
        node.unit.display_name,
        node.unit.id
    ));

    if node.expanded {
        for child in &node.children {
            render_node(child, depth + 1, out);
        }
    }
}
