use crate::SimplifyDisplayFormat;
use crate::areas::project::Project;
use crate::artifacts::trackchanges::pairing::pair_operations;
use anyhow::Context;
use colored::Colorize;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct SimplifyOptions {
    pub input: PathBuf,
    pub format: SimplifyDisplayFormat,
}

impl Project {
    /// Pair and simplify the track-changes operations of a diff fragment
    pub fn simplify(&self, opts: &SimplifyOptions) -> anyhow::Result<()> {
        let fragment = std::fs::read_to_string(&opts.input)
            .with_context(|| format!("cannot read diff fragment {}", opts.input.display()))?;

        let simplified: Vec<_> = pair_operations(&fragment)?
            .iter()
            .map(|operation| operation.simplify())
            .collect();

        match opts.format {
            SimplifyDisplayFormat::Json => {
                let json = serde_json::to_string_pretty(&simplified)?;
                writeln!(self.writer(), "{json}")?;
            }
            SimplifyDisplayFormat::Marked => {
                if simplified.is_empty() {
                    writeln!(self.writer(), "No paired change operations found.")?;
                    return Ok(());
                }

                for change in &simplified {
                    // "~" marks operations the trim actually simplified
                    let marker = if change.changed() {
                        "~".green()
                    } else {
                        "=".normal()
                    };
                    writeln!(
                        self.writer(),
                        "{} {} {}",
                        marker,
                        change.operation_index().bold(),
                        change.render()
                    )?;
                }
            }
        }

        Ok(())
    }
}
