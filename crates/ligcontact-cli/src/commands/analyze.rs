use crate::cli::{AnalyzeArgs, OutputFormat};
use crate::config::build_config;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use ligcontact::core::io::report::{write_contacts_csv, write_json};
use ligcontact::engine::progress::ProgressReporter;
use ligcontact::workflows::analyze::{self, AnalysisReport};
use std::io::Write;
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

pub async fn run(args: AnalyzeArgs, show_progress: bool) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let config = build_config(args.config.as_deref(), &args.overrides, &args.set_values)?;

    let protein_text = read_input(&args.protein).await?;
    let ligand_text = read_input(&args.ligand).await?;

    let progress_handler = if show_progress {
        CliProgressHandler::new()
    } else {
        CliProgressHandler::hidden()
    };
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Invoking the contact analysis workflow...");
    let report = tokio::task::block_in_place(|| {
        analyze::run(&protein_text, &ligand_text, &config, &reporter)
    })?;

    info!(contacts = report.contacts.len(), "Workflow finished.");
    for warning in &report.warnings {
        warn!("{}", warning);
    }

    let mut rendered = Vec::new();
    render(&report, args.format, &mut rendered)?;

    match &args.output {
        Some(path) => {
            tokio::fs::write(path, &rendered).await?;
            info!("Report written to {:?}", path);
        }
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(&rendered).await?;
            stdout.flush().await?;
        }
    }

    Ok(())
}

async fn read_input(path: &Path) -> Result<String> {
    info!("Loading input structure from {:?}", path);
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CliError::ReadInput {
            path: path.to_path_buf(),
            source,
        })
}

fn render(report: &AnalysisReport, format: OutputFormat, out: &mut impl Write) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(report, out, true)?,
        OutputFormat::Csv => write_contacts_csv(&report.contacts, out)?,
        OutputFormat::Text => render_text(report, out)?,
    }
    Ok(())
}

fn render_text(report: &AnalysisReport, out: &mut impl Write) -> std::io::Result<()> {
    writeln!(
        out,
        "{:<12} {:>6}  {:<10} {:<5} {:>8} {:>7}",
        "TYPE", "LIGAND", "RESIDUE", "ATOM", "DIST", "ANGLE"
    )?;
    for contact in &report.contacts {
        let residue = format!("{}{}", contact.protein_resn, contact.protein_resi);
        let angle = contact
            .angle
            .map(|a| format!("{:.1}", a))
            .unwrap_or_else(|| "-".to_string());
        writeln!(
            out,
            "{:<12} {:>6}  {:<10} {:<5} {:>8.3} {:>7}",
            contact.kind.label(),
            contact.ligand_atom,
            residue,
            contact.protein_atom,
            contact.distance,
            angle
        )?;
    }
    writeln!(out)?;
    writeln!(out, "Contacts: {}", report.contacts.len())?;
    writeln!(
        out,
        "Ligand: {} atoms, {} bonds",
        report.ligand_summary.atoms, report.ligand_summary.bonds
    )?;
    writeln!(
        out,
        "Protein: {} residues, {} chain(s)",
        report.protein_summary.residues, report.protein_summary.chains
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ligcontact::core::models::contact::{Contact, ContactKind};
    use ligcontact::engine::summary::{LigandSummary, ProteinSummary};

    fn sample_report() -> AnalysisReport {
        AnalysisReport {
            contacts: vec![
                Contact {
                    kind: ContactKind::HydrogenBond,
                    ligand_atom: 0,
                    protein_resi: 2,
                    protein_resn: "ARG".to_string(),
                    protein_atom: "NE".to_string(),
                    distance: 2.9,
                    angle: Some(180.0),
                },
                Contact {
                    kind: ContactKind::PiStacking,
                    ligand_atom: 3,
                    protein_resi: 3,
                    protein_resn: "PHE".to_string(),
                    protein_atom: "CG".to_string(),
                    distance: 4.5,
                    angle: None,
                },
            ],
            ligand_summary: LigandSummary { atoms: 6, bonds: 6 },
            protein_summary: ProteinSummary {
                residues: 3,
                chains: 1,
            },
            warnings: Vec::new(),
        }
    }

    fn rendered(format: OutputFormat) -> String {
        let mut out = Vec::new();
        render(&sample_report(), format, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn text_output_lists_contacts_and_summaries() {
        let text = rendered(OutputFormat::Text);
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("TYPE"));
        assert!(lines[1].starts_with("HBOND"));
        assert!(lines[1].contains("ARG2"));
        assert!(lines[1].contains("2.900"));
        assert!(lines[1].ends_with("180.0"));
        assert!(lines[2].starts_with("PI-PI"));
        assert!(lines[2].ends_with('-'));
        assert!(text.contains("Contacts: 2"));
        assert!(text.contains("Ligand: 6 atoms, 6 bonds"));
        assert!(text.contains("Protein: 3 residues, 1 chain(s)"));
    }

    #[test]
    fn json_output_is_the_full_report() {
        let json = rendered(OutputFormat::Json);
        let parsed: AnalysisReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, sample_report());
    }

    #[test]
    fn csv_output_has_one_row_per_contact() {
        let csv = rendered(OutputFormat::Csv);
        assert_eq!(csv.lines().count(), 3);
        assert!(csv.lines().nth(1).unwrap().starts_with("HBOND,0,2,ARG,NE"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn missing_input_file_is_invalid_input() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_input(&dir.path().join("absent.pdb")).await.unwrap_err();
        assert!(matches!(err, CliError::ReadInput { .. }));
        assert_eq!(err.exit_code(), crate::error::EXIT_INVALID_INPUT);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn end_to_end_run_writes_report_file() {
        let dir = tempfile::tempdir().unwrap();
        let protein = dir.path().join("protein.pdb");
        let ligand = dir.path().join("ligand.sdf");
        let output = dir.path().join("report.csv");

        std::fs::write(
            &protein,
            "ATOM      1  NE  ARG A   2       1.000   1.000   3.000  1.00  0.00           N\nEND\n",
        )
        .unwrap();
        std::fs::write(
            &ligand,
            "ligand\n  test\n\n  1  0  0  0  0  0  0  0  0  0999 V2000\n    1.0000    1.0000    3.5000 O   0  0  0  0  0  0  0  0  0  0  0  0\nM  END\n$$$$\n",
        )
        .unwrap();

        let args = AnalyzeArgs {
            protein,
            ligand,
            config: None,
            overrides: Default::default(),
            set_values: Vec::new(),
            format: OutputFormat::Csv,
            output: Some(output.clone()),
        };
        run(args, false).await.unwrap();

        let csv = std::fs::read_to_string(output).unwrap();
        let rows: Vec<&str> = csv.lines().collect();
        assert_eq!(rows[1], "HBOND,0,2,ARG,NE,0.5,180.0");
        assert!(rows[2].starts_with("SALT_BRIDGE,0,2,ARG,NE"));
    }
}
