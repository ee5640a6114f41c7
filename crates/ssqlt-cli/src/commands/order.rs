//! Order command implementation

use anyhow::{Context, Result};
use serde::Serialize;
use ssqlt_core::SchemaContext;

use crate::cli::{GlobalArgs, OrderArgs, OrderOutput};
use crate::commands::common::load_context;

/// Dependency order of one side
#[derive(Debug, Serialize)]
struct SideOrder<'a> {
    schema: &'a str,
    tables: &'a [String],
}

#[derive(Debug, Serialize)]
struct Orders<'a> {
    source: SideOrder<'a>,
    target: SideOrder<'a>,
}

impl<'a> From<&'a SchemaContext> for SideOrder<'a> {
    fn from(side: &'a SchemaContext) -> Self {
        Self {
            schema: &side.schema,
            tables: &side.dependency_order,
        }
    }
}

/// Execute the order command
pub(crate) fn execute(args: &OrderArgs, global: &GlobalArgs) -> Result<()> {
    let (_, ctx) = load_context(global)?;
    let orders = Orders {
        source: (&ctx.source).into(),
        target: (&ctx.target).into(),
    };

    match args.output {
        OrderOutput::Text => print_text(&orders),
        OrderOutput::Json => {
            let json =
                serde_json::to_string_pretty(&orders).context("Failed to serialize to JSON")?;
            println!("{json}");
        }
    }
    Ok(())
}

fn print_text(orders: &Orders<'_>) {
    for (label, side) in [("source", &orders.source), ("target", &orders.target)] {
        println!("{label}:");
        for (i, table) in side.tables.iter().enumerate() {
            println!("  {}. {}.{}", i + 1, side.schema, table);
        }
    }
}
