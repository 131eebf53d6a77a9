use comfy_table::{Attribute, Cell, Color as TableColor, Table};
use ifacegen_build::{GenerationReport, GenerationStatus};

use crate::output::{GlobalOptions, TableDisplay, create_table};

pub fn status_label(status: GenerationStatus) -> &'static str {
    match status {
        GenerationStatus::Written => "written",
        GenerationStatus::Unchanged => "unchanged",
        GenerationStatus::Stale => "out of date",
    }
}

impl TableDisplay for GenerationReport {
    fn to_table(&self, options: &GlobalOptions) -> Table {
        let mut table = create_table(options);

        let headers = ["Index", "Function", "Returns", "Parameters"];
        let header_cells: Vec<Cell> = headers
            .iter()
            .map(|h| {
                let cell = Cell::new(h).add_attribute(Attribute::Bold);
                if options.no_color { cell } else { cell.fg(TableColor::Cyan) }
            })
            .collect();
        table.set_header(header_cells);

        if self.signatures.is_empty() {
            table.add_row(vec![Cell::new("-"), Cell::new("No exported functions found")]);
            return table;
        }

        for (index, signature) in self.signatures.iter().enumerate() {
            table.add_row(vec![
                Cell::new(index),
                Cell::new(signature.name()),
                Cell::new(signature.return_and_qualifiers()),
                Cell::new(signature.parameters()),
            ]);
        }

        table
    }

    fn to_compact(&self) -> String {
        format!(
            "{}: {} function(s), {}",
            self.destination.display(),
            self.signatures.len(),
            status_label(self.status)
        )
    }
}
