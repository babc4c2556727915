// Preview an import without writing anything: parse, validate and compare
// against reference lists, then print the ImportResult as JSON.
// With `--drafts`, the valid interventions are also converted and printed.
//
// Usage:
//   cargo run --bin import_preview -- [--rooms] [--drafts] [--lists lists.json] [--config import.json] <file>
//
// When the file has errors, the text report is saved to `report_dir`
// (config) or the user's download directory.

use anyhow::{bail, Context};
use hotel_maintenance_import::config::{ConfigManager, ImportConfigReader};
use hotel_maintenance_import::domain::{ExistingLists, ImportError};
use hotel_maintenance_import::importer::{
    convert_to_interventions, download_error_report, ConversionContext, FileSystemReportWriter, ImportFile, SpreadsheetImporter,
    SpreadsheetImporterImpl,
};
use hotel_maintenance_import::{i18n, logging, ImportOptions};
use std::path::PathBuf;

struct CliArgs {
    file: PathBuf,
    rooms: bool,
    drafts: bool,
    lists: Option<PathBuf>,
    config: Option<PathBuf>,
}

fn parse_args() -> anyhow::Result<CliArgs> {
    let mut file = None;
    let mut rooms = false;
    let mut drafts = false;
    let mut lists = None;
    let mut config = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--rooms" => rooms = true,
            "--drafts" => drafts = true,
            "--lists" => lists = Some(PathBuf::from(args.next().context("--lists 需要文件路径")?)),
            "--config" => {
                config = Some(PathBuf::from(args.next().context("--config 需要文件路径")?))
            }
            other if other.starts_with("--") => bail!("未知参数: {}", other),
            other => file = Some(PathBuf::from(other)),
        }
    }

    Ok(CliArgs {
        file: file.context("缺少导入文件路径")?,
        rooms,
        drafts,
        lists,
        config,
    })
}

fn save_report(config: &ConfigManager, errors: &[ImportError]) -> anyhow::Result<PathBuf> {
    let writer = match config.get_report_dir() {
        Some(dir) => FileSystemReportWriter::new(dir),
        None => FileSystemReportWriter::downloads(),
    };
    let file_name = config.get_report_file_name();
    Ok(download_error_report(errors, Some(&file_name), &writer)?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = parse_args()?;

    let config = match &args.config {
        Some(path) => {
            let manager = ConfigManager::from_json_file(path)?;
            manager.apply_overrides(std::env::vars());
            manager
        }
        None => ConfigManager::load()?,
    };
    logging::init_from_config(&config);
    i18n::set_locale(&config.get_locale());

    let lists: Option<ExistingLists> = match &args.lists {
        Some(path) => {
            let raw = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("无法读取参考列表: {}", path.display()))?;
            Some(serde_json::from_str(&raw).context("参考列表 JSON 格式错误")?)
        }
        None => None,
    };

    let file = ImportFile::from_path(&args.file).await?;
    let options = ImportOptions::from_config(&config);
    let importer = SpreadsheetImporterImpl::default();

    let errors = if args.rooms {
        let result = importer.import_rooms(&file, &options).await;
        println!("{}", serde_json::to_string_pretty(&result)?);
        result.errors
    } else {
        let result = importer
            .import_interventions(&file, &options, lists.as_ref())
            .await;
        println!("{}", serde_json::to_string_pretty(&result)?);
        if args.drafts {
            let users = lists
                .as_ref()
                .and_then(|l| l.users.clone())
                .unwrap_or_default();
            let ctx = ConversionContext::new("preview", "preview", "Aperçu")
                .with_users(&users)
                .with_config(&config);
            let drafts = convert_to_interventions(&result.data, &ctx);
            println!("{}", serde_json::to_string_pretty(&drafts)?);
        }
        result.errors
    };

    if !errors.is_empty() {
        let path = save_report(&config, &errors)?;
        eprintln!("report={}", path.display());
    }
    Ok(())
}
