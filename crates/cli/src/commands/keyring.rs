//! Keyring inspection.

use anyhow::Result;
use serde::Serialize;
use std::path::Path;

use super::load_keyring;
use crate::args::OutputFormat;

#[derive(Debug, Serialize)]
struct KeyringReport {
    home: String,
    secret_keys: Vec<String>,
    public_keys: Vec<String>,
    partial_failures: Vec<String>,
}

pub fn run(home: &Path, output: OutputFormat) -> Result<()> {
    let keyring = load_keyring(home)?;
    let report = KeyringReport {
        home: keyring.home().display().to_string(),
        secret_keys: keyring.secret_key_ids(),
        public_keys: keyring.public_key_ids(),
        partial_failures: keyring
            .partial_failures()
            .iter()
            .map(ToString::to_string)
            .collect(),
    };

    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Table => print!("{}", format_table(&report)),
    }
    Ok(())
}

fn format_table(report: &KeyringReport) -> String {
    let mut out = format!("Keyring: {}\n", report.home);
    for (label, ids) in [("secret", &report.secret_keys), ("public", &report.public_keys)] {
        if ids.is_empty() {
            out.push_str(&format!("{:<8}(none)\n", label));
        }
        for id in ids {
            out.push_str(&format!("{:<8}{}\n", label, id));
        }
    }
    for failure in &report.partial_failures {
        out.push_str(&format!("skipped {}\n", failure));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_lists_keys_and_failures() {
        let report = KeyringReport {
            home: "/keys".to_string(),
            secret_keys: vec!["AAAA".to_string()],
            public_keys: Vec::new(),
            partial_failures: vec!["keyring file /keys/pubring.gpg does not exist".to_string()],
        };

        let table = format_table(&report);
        assert!(table.starts_with("Keyring: /keys\n"));
        assert!(table.contains("secret  AAAA\n"));
        assert!(table.contains("public  (none)\n"));
        assert!(table.contains("skipped keyring file /keys/pubring.gpg does not exist"));
    }
}
