use anyhow::{Context, Result};
use serde_json::json;
use std::fs;
use std::io::Read;
use std::path::Path;

use geomark_core::centroid::centroid;
use geomark_core::export::to_schema_org;
use geomark_core::models::RecordDraft;
use geomark_core::sanitize::sanitize_str;
use geomark_store::{MemoryRecordStore, RecordStore};

use crate::cli::{Cli, Commands, FileArgs};
use crate::config;
use crate::output::OutputWriter;

pub async fn execute(cli: Cli) -> Result<()> {
    let config = config::load(cli.config.as_deref())?;
    let out = OutputWriter::new(cli.json || config.output.json, config.output.pretty);

    match cli.command {
        Commands::Validate(args) => validate(&args, &out),
        Commands::Centroid(args) => derive_centroid(&args, &out),
        Commands::Schema(args) => schema(&args, &out),
        Commands::Import(args) => import(&args, &out).await,
    }
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read standard input")?;
        Ok(buffer)
    } else {
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
    }
}

fn validate(args: &FileArgs, out: &OutputWriter) -> Result<()> {
    let raw = read_input(&args.file)?;
    let feature = sanitize_str(&raw)?;

    out.success(format!("valid {} feature", feature.geometry().kind()));
    out.value(&feature.to_value());
    Ok(())
}

fn derive_centroid(args: &FileArgs, out: &OutputWriter) -> Result<()> {
    let raw = read_input(&args.file)?;
    let feature = sanitize_str(&raw)?;
    let center = centroid(feature.geometry());

    out.success(format!("centroid of {} feature", feature.geometry().kind()));
    out.value(&json!({"longitude": center.lon, "latitude": center.lat}));
    Ok(())
}

fn schema(args: &FileArgs, out: &OutputWriter) -> Result<()> {
    let raw = read_input(&args.file)?;
    let feature = sanitize_str(&raw)?;

    out.value(&to_schema_org(feature.geometry()));
    Ok(())
}

async fn import(args: &FileArgs, out: &OutputWriter) -> Result<()> {
    let raw = read_input(&args.file)?;
    let drafts: Vec<RecordDraft> =
        serde_json::from_str(&raw).context("draft file must be a JSON array of record drafts")?;
    tracing::debug!(count = drafts.len(), "validating draft batch");

    let store = MemoryRecordStore::new();
    let records = store
        .create_records(drafts)
        .await
        .context("batch rejected, nothing was imported")?;

    out.success(format!("imported {} records", records.len()));
    let summary: Vec<_> = records
        .iter()
        .map(|record| {
            json!({
                "id": record.id.0,
                "title": record.title,
                "kind": record.feature.geometry().kind(),
                "centroid": {"longitude": record.centroid.lon, "latitude": record.centroid.lat},
            })
        })
        .collect();
    out.value(&json!(summary));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_input_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{}}").unwrap();
        assert_eq!(read_input(file.path()).unwrap(), "{}");
    }

    #[test]
    fn test_validate_rejects_bad_payloads() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"type":"FeatureCollection"}}"#).unwrap();

        let args = FileArgs { file: file.path().to_path_buf() };
        let out = OutputWriter::new(true, false);
        assert!(validate(&args, &out).is_err());
    }

    #[tokio::test]
    async fn test_import_round_trip() {
        let drafts = serde_json::json!([{
            "title": "Charcoal kiln",
            "description": "Round charcoal kiln remains",
            "creator": "surveyor",
            "observation": "FO",
            "geojson": "{\"type\":\"Feature\",\"geometry\":{\"type\":\"Point\",\"coordinates\":[13.0743,60.5963]}}",
        }]);
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", drafts).unwrap();

        let args = FileArgs { file: file.path().to_path_buf() };
        let out = OutputWriter::new(true, false);
        import(&args, &out).await.unwrap();
    }
}
