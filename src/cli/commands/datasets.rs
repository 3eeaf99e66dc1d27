//! Datasets command implementation
//!
//! Lists datasets with their data elements, the way they are offered for
//! selection.

use crate::cli::commands::open_session;
use crate::cli::exit_code;
use crate::core::selection::{SelectionKind, Tree};
use clap::Args;

/// Arguments for the datasets command
#[derive(Args, Debug)]
pub struct DatasetsArgs {
    /// Only show datasets and elements whose name contains this text
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// List the elements of every dataset, not only search hits
    #[arg(long)]
    pub expand_all: bool,
}

impl DatasetsArgs {
    /// Execute the datasets command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let (_, mut session) = match open_session(config_path).await {
            Ok(s) => s,
            Err(code) => return Ok(code),
        };

        if self.expand_all {
            session.selection.expand_all(Tree::Datasets, &session.catalog);
        }

        let views = session
            .selection
            .available_datasets(&session.catalog, &self.search);

        if views.is_empty() {
            println!("No datasets match '{}'", self.search);
            return Ok(exit_code::SUCCESS);
        }

        for view in &views {
            let marker = if view.expanded { "▼" } else { "▶" };
            println!("{marker} {}  [{}]", view.label, view.dataset.id);
            if view.expanded {
                for element in &view.elements {
                    println!("    {}  [{}]", element.display_name, element.id);
                }
            }
        }

        println!();
        println!(
            "{} items",
            session
                .selection
                .visible_available_count(SelectionKind::DataElements, &session.catalog)
        );

        Ok(exit_code::SUCCESS)
    }
}
