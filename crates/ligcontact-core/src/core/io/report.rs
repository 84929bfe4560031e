use crate::core::models::contact::Contact;
use serde::Serialize;
use std::io::{self, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),
}

/// Serializes any report as JSON, pretty-printed on request.
pub fn write_json<T: Serialize>(
    report: &T,
    writer: &mut impl Write,
    pretty: bool,
) -> Result<(), ReportError> {
    if pretty {
        serde_json::to_writer_pretty(&mut *writer, report)?;
    } else {
        serde_json::to_writer(&mut *writer, report)?;
    }
    writeln!(writer)?;
    Ok(())
}

/// Writes one CSV row per contact, with a header row.
///
/// Columns: `type,ligand_atom,protein_resi,protein_resn,protein_atom,distance,angle`.
/// A missing angle is written as an empty field.
pub fn write_contacts_csv(contacts: &[Contact], writer: &mut impl Write) -> Result<(), ReportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    if contacts.is_empty() {
        csv_writer.write_record([
            "type",
            "ligand_atom",
            "protein_resi",
            "protein_resn",
            "protein_atom",
            "distance",
            "angle",
        ])?;
    }
    for contact in contacts {
        csv_writer.serialize(contact)?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::contact::ContactKind;

    fn sample_contacts() -> Vec<Contact> {
        vec![
            Contact {
                kind: ContactKind::HydrogenBond,
                ligand_atom: 0,
                protein_resi: 2,
                protein_resn: "ARG".into(),
                protein_atom: "NE".into(),
                distance: 0.2,
                angle: Some(180.0),
            },
            Contact {
                kind: ContactKind::PiStacking,
                ligand_atom: 3,
                protein_resi: 3,
                protein_resn: "PHE".into(),
                protein_atom: "CG".into(),
                distance: 4.5,
                angle: None,
            },
        ]
    }

    #[test]
    fn csv_has_header_and_empty_angle_field() {
        let mut buffer = Vec::new();
        write_contacts_csv(&sample_contacts(), &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "type,ligand_atom,protein_resi,protein_resn,protein_atom,distance,angle"
        );
        assert_eq!(lines[1], "HBOND,0,2,ARG,NE,0.2,180.0");
        assert_eq!(lines[2], "PI-PI,3,3,PHE,CG,4.5,");
    }

    #[test]
    fn csv_for_no_contacts_is_header_only() {
        let mut buffer = Vec::new();
        write_contacts_csv(&[], &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("type,"));
    }

    #[test]
    fn json_is_a_parseable_array() {
        let mut buffer = Vec::new();
        write_json(&sample_contacts(), &mut buffer, false).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
        assert_eq!(value[1]["type"], "PI-PI");
    }
}
