//! ClauseCheck command line
//!
//! Reads plain-text contracts, runs the contract engine and prints JSON on
//! stdout. Logs go to stderr.

mod input;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use contract_engine::jurisdiction::RequiredClause;
use contract_engine::{
    AnalysisOptions, ContractEngine, ContractType, Jurisdiction, NamedText, SeverityOverride,
};
use serde::Serialize;
use shared_types::{ContractTypeProfile, Language};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::input::{read_document, DEFAULT_MAX_BYTES};

#[derive(Parser, Debug)]
#[command(name = "clausecheck")]
#[command(
    version,
    about = "Contract analysis: clause segmentation, risks, compliance, obligations and version comparison"
)]
struct Cli {
    /// Reject input files larger than this many bytes
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_BYTES)]
    max_bytes: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze one contract
    Analyze {
        file: PathBuf,

        /// Document language (en or hi); detected from the text when omitted
        #[arg(long, value_parser = parse_language)]
        language: Option<Language>,

        /// Jurisdiction profile (india, us, uk, general)
        #[arg(long, value_parser = parse_jurisdiction)]
        jurisdiction: Option<Jurisdiction>,

        /// Contract kind (general, employment, nda, service, rental, freelance)
        #[arg(long, value_parser = parse_contract_type)]
        contract_type: Option<ContractType>,

        /// Single-line JSON
        #[arg(long)]
        compact: bool,
    },

    /// Compare two versions of a contract
    Compare {
        file1: PathBuf,
        file2: PathBuf,

        #[arg(long, default_value = "Document 1")]
        name1: String,

        #[arg(long, default_value = "Document 2")]
        name2: String,

        /// Document language (en or hi); detected from the first file when omitted
        #[arg(long, value_parser = parse_language)]
        language: Option<Language>,

        #[arg(long)]
        compact: bool,
    },

    /// List the built-in jurisdiction profiles and contract types
    Jurisdictions,
}

fn parse_language(s: &str) -> std::result::Result<Language, String> {
    match s.trim().to_lowercase().as_str() {
        "en" | "english" => Ok(Language::English),
        "hi" | "hindi" => Ok(Language::Hindi),
        other => Err(format!("unsupported language '{}', use 'en' or 'hi'", other)),
    }
}

fn parse_jurisdiction(s: &str) -> std::result::Result<Jurisdiction, String> {
    Jurisdiction::parse_code(s)
        .ok_or_else(|| format!("unknown jurisdiction '{}', use india, us, uk or general", s))
}

fn parse_contract_type(s: &str) -> std::result::Result<ContractType, String> {
    ContractType::parse_code(s).ok_or_else(|| {
        format!(
            "unknown contract type '{}', use general, employment, nda, service, rental or freelance",
            s
        )
    })
}

#[derive(Serialize)]
struct Catalog {
    jurisdictions: Vec<JurisdictionProfile>,
    contract_types: Vec<ContractTypeProfile>,
}

impl Catalog {
    fn builtin() -> Self {
        Self {
            jurisdictions: Jurisdiction::ALL
                .into_iter()
                .map(JurisdictionProfile::from)
                .collect(),
            contract_types: ContractType::ALL.iter().map(ContractType::profile).collect(),
        }
    }
}

#[derive(Serialize)]
struct JurisdictionProfile {
    code: &'static str,
    name: &'static str,
    laws: Vec<Law>,
    required_clauses: &'static [RequiredClause],
    severity_overrides: Vec<SeverityOverride>,
}

#[derive(Serialize)]
struct Law {
    area: &'static str,
    law: &'static str,
}

impl From<Jurisdiction> for JurisdictionProfile {
    fn from(jurisdiction: Jurisdiction) -> Self {
        Self {
            code: jurisdiction.code(),
            name: jurisdiction.name(),
            laws: jurisdiction
                .laws()
                .iter()
                .map(|&(area, law)| Law { area, law })
                .collect(),
            required_clauses: jurisdiction.required_clauses(),
            severity_overrides: jurisdiction.severity_overrides(),
        }
    }
}

fn print_json<T: Serialize>(value: &T, compact: bool) -> Result<()> {
    let json = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    }
    .context("Failed to serialize result")?;
    println!("{}", json);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // stdout carries the JSON result, so logs go to stderr
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let engine = ContractEngine::from_env().context("Invalid CLAUSECHECK_* configuration")?;

    match cli.command {
        Command::Analyze {
            file,
            language,
            jurisdiction,
            contract_type,
            compact,
        } => {
            let text = read_document(&file, cli.max_bytes)?;
            tracing::info!(file = %file.display(), "Analyzing contract");

            let analysis = engine.analyze(
                &text,
                AnalysisOptions {
                    language,
                    jurisdiction,
                    contract_type,
                },
            );
            print_json(&analysis, compact)?;
        }
        Command::Compare {
            file1,
            file2,
            name1,
            name2,
            language,
            compact,
        } => {
            let text1 = read_document(&file1, cli.max_bytes)?;
            let text2 = read_document(&file2, cli.max_bytes)?;
            let language = language.unwrap_or_else(|| engine.detect_language(&text1));
            tracing::info!(
                first = %file1.display(),
                second = %file2.display(),
                language = %language,
                "Comparing contracts"
            );

            let result = engine.compare_named(
                NamedText::new(&name1, &text1),
                NamedText::new(&name2, &text2),
                language,
            );
            print_json(&result, compact)?;
        }
        Command::Jurisdictions => print_json(&Catalog::builtin(), false)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_analyze_arguments() {
        let cli = Cli::try_parse_from([
            "clausecheck",
            "analyze",
            "lease.txt",
            "--language",
            "hi",
            "--jurisdiction",
            "india",
            "--contract-type",
            "rental",
            "--compact",
        ])
        .unwrap();

        assert_eq!(cli.max_bytes, DEFAULT_MAX_BYTES);
        match cli.command {
            Command::Analyze {
                file,
                language,
                jurisdiction,
                contract_type,
                compact,
            } => {
                assert_eq!(file, PathBuf::from("lease.txt"));
                assert_eq!(language, Some(Language::Hindi));
                assert_eq!(jurisdiction, Some(Jurisdiction::India));
                assert_eq!(contract_type, Some(ContractType::Rental));
                assert!(compact);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_compare_defaults_and_global_limit() {
        let cli = Cli::try_parse_from([
            "clausecheck",
            "compare",
            "v1.txt",
            "v2.txt",
            "--max-bytes",
            "2048",
        ])
        .unwrap();

        assert_eq!(cli.max_bytes, 2048);
        match cli.command {
            Command::Compare {
                name1,
                name2,
                language,
                compact,
                ..
            } => {
                assert_eq!(name1, "Document 1");
                assert_eq!(name2, "Document 2");
                assert_eq!(language, None);
                assert!(!compact);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_unknown_language_and_jurisdiction() {
        assert!(Cli::try_parse_from(["clausecheck", "analyze", "a.txt", "--language", "fr"]).is_err());
        assert!(
            Cli::try_parse_from(["clausecheck", "analyze", "a.txt", "--jurisdiction", "mars"])
                .is_err()
        );
        assert!(
            Cli::try_parse_from(["clausecheck", "analyze", "a.txt", "--contract-type", "barter"])
                .is_err()
        );
    }

    #[test]
    fn test_jurisdiction_profiles_serialize() {
        let profile = JurisdictionProfile::from(Jurisdiction::UnitedKingdom);
        let json = serde_json::to_value(&profile).unwrap();

        assert_eq!(json["code"], "uk");
        assert!(json["laws"].as_array().is_some_and(|laws| !laws.is_empty()));
        assert!(json["required_clauses"][0]["reference"].is_string());
    }

    #[test]
    fn test_catalog_lists_contract_types() {
        let json = serde_json::to_value(Catalog::builtin()).unwrap();

        assert_eq!(json["jurisdictions"].as_array().map(Vec::len), Some(4));
        let types = json["contract_types"].as_array().unwrap();
        assert_eq!(types.len(), 6);
        assert_eq!(types[2]["code"], "nda");
        assert_eq!(types[2]["name"], "Non-Disclosure Agreement");
        assert!(types[2]["focus"].as_array().is_some_and(|f| !f.is_empty()));
    }
}
