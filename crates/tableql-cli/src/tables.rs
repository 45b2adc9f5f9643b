use anyhow::Result;
use clap::Parser;
use console::style;
use std::fmt::Write;
use tableql::{schema::db::Catalog, Db};

#[derive(Parser, Debug)]
pub struct TablesCommand {
    /// Also list every column with its database type
    #[arg(short, long)]
    columns: bool,

    /// Print the catalog as JSON instead
    #[arg(long, conflicts_with = "columns")]
    json: bool,
}

impl TablesCommand {
    pub(crate) fn run(self, db: &Db) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(db.catalog())?);
        } else {
            print!("{}", render(db.catalog(), self.columns)?);
        }

        Ok(())
    }
}

fn render(catalog: &Catalog, columns: bool) -> Result<String> {
    let mut out = String::new();

    writeln!(out)?;
    writeln!(out, "  {}", style("Tables").cyan().bold().underlined())?;
    writeln!(out)?;

    for table in catalog.tables() {
        let pk = match &table.primary_key {
            Some(column) => style(format!("(primary key: {column})")).dim(),
            None => style("(no primary key)".to_string()).yellow().dim(),
        };
        writeln!(out, "  {} {pk}", style(&table.name).bold())?;

        if columns {
            for column in &table.columns {
                writeln!(
                    out,
                    "      {} {}",
                    column.name,
                    style(&column.data_type).dim()
                )?;
            }
        }

        for fk in catalog.foreign_keys_owned_by(&table.name) {
            writeln!(
                out,
                "    {} {}.{} -> {}.{}",
                style("→").green(),
                fk.table,
                fk.column,
                fk.foreign_table,
                fk.foreign_column
            )?;
        }
    }

    writeln!(out)?;
    Ok(out)
}
