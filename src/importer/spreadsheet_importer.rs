// ==========================================
// 酒店维护导入 - 表格导入器实现
// ==========================================
// 职责: 整合导入流程，从文件字节到 ImportResult
// 流程: 解析 → 空行过滤 → 偏移/上限 → 规范化 + 校验
//       → 缺失值检测 → 状态硬错误 / 其他软警告
// 边界: 任何 PipelineError 均在此转换为 row 0 错误
// ==========================================

use crate::domain::{
    ExistingLists, ImportError, ImportOptions, ImportResult, ImportStats,
    ImportWarning, InterventionImportRow, MissingCategory, MissingListValues, RoomImportRow,
};
use crate::i18n::{t, t_with_args};
use crate::importer::data_cleaner::normalize_status;
use crate::importer::error::{PipelineError, PipelineResult};
use crate::importer::field_mapper::{normalize_object, INTERVENTION_KEY_MAPPING, ROOM_KEY_MAPPING};
use crate::importer::file_parser::{ImportFile, UniversalFileParser};
use crate::importer::importer_trait::{FileParser, NormalizedRow, RawRow, SpreadsheetImporter};
use crate::importer::missing_values::{detect_missing_values, MissingValueReport};
use crate::importer::schema_validator::{
    validate_intervention_row, validate_room_row, FieldIssue, ValidationOutcome,
};
use indexmap::IndexSet;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

// ==========================================
// SpreadsheetImporterImpl - 表格导入器实现
// ==========================================
pub struct SpreadsheetImporterImpl {
    // 文件解析器（阻塞解析在 spawn_blocking 中执行）
    file_parser: Arc<dyn FileParser>,
}

impl Default for SpreadsheetImporterImpl {
    fn default() -> Self {
        Self::new(Arc::new(UniversalFileParser))
    }
}

/// 通过校验的行及其表格行号
struct ValidatedRows<T> {
    rows: Vec<(usize, T)>,
    errors: Vec<ImportError>,
    total: usize,
}

impl SpreadsheetImporterImpl {
    /// 创建导入器
    ///
    /// # 参数
    /// - file_parser: 表格读取协作方
    pub fn new(file_parser: Arc<dyn FileParser>) -> Self {
        Self { file_parser }
    }

    // 读取并解析文件（阻塞解析移出异步线程）
    async fn read_rows(&self, file: &ImportFile) -> PipelineResult<Vec<RawRow>> {
        let parser = Arc::clone(&self.file_parser);
        let file_name = file.file_name.clone();
        let content = file.content.clone();

        tokio::task::spawn_blocking(move || parser.parse_bytes(&file_name, &content))
            .await
            .map_err(|e| PipelineError::InternalError(e.to_string()))?
    }

    /// 空行过滤 + 起始偏移 + 行数上限（max_rows = 0 表示不限）
    pub fn prepare_rows(raw: Vec<RawRow>, options: &ImportOptions) -> Vec<RawRow> {
        let limit = if options.max_rows == 0 {
            usize::MAX
        } else {
            options.max_rows
        };

        raw.into_iter()
            .filter(|row| !options.skip_empty_rows || row.values().any(|v| !v.is_empty()))
            .skip(options.start_row)
            .take(limit)
            .collect()
    }

    // 行号 = 过滤后索引 + start_row + 2（表头占第 1 行）
    fn validate_rows<T>(
        rows: &[RawRow],
        options: &ImportOptions,
        normalize: impl Fn(&RawRow) -> NormalizedRow,
        validate: impl Fn(&NormalizedRow) -> ValidationOutcome<T>,
    ) -> ValidatedRows<T> {
        let mut validated = Vec::new();
        let mut errors = Vec::new();

        for (index, raw) in rows.iter().enumerate() {
            let row_number = index + options.start_row + 2;
            match validate(&normalize(raw)) {
                Ok(row) => validated.push((row_number, row)),
                Err(issues) => {
                    debug!(row = row_number, issues = issues.len(), "行校验失败");
                    errors.extend(issues.into_iter().map(|issue| issue_to_error(row_number, issue)));
                }
            }
        }

        ValidatedRows {
            rows: validated,
            errors,
            total: rows.len(),
        }
    }

    /// 并发导入多个工单文件
    #[instrument(skip_all, fields(files = files.len()))]
    pub async fn import_many_interventions(
        &self,
        files: &[ImportFile],
        options: &ImportOptions,
        existing_lists: Option<&ExistingLists>,
    ) -> Vec<(String, ImportResult<InterventionImportRow>)> {
        use futures::future::join_all;

        info!(count = files.len(), "开始批量导入文件");
        let tasks = files.iter().map(|file| async move {
            let result = self.import_interventions(file, options, existing_lists).await;
            (file.file_name.clone(), result)
        });
        let results = join_all(tasks).await;

        info!(
            succeeded = results.iter().filter(|(_, r)| r.success).count(),
            total = results.len(),
            "批量导入完成"
        );
        results
    }
}

fn issue_to_error(row: usize, issue: FieldIssue) -> ImportError {
    ImportError {
        row,
        field: Some(issue.field),
        message: issue.message,
        value: issue.value,
    }
}

fn file_failure<T>(file: &ImportFile, err: PipelineError) -> ImportResult<T> {
    warn!(file = %file.file_name, error = %err, "文件读取失败");
    ImportResult::file_failure(err.to_string())
}

// 每个软警告类别、每个不同值一条警告（row 0）
fn build_warnings(missing: &MissingListValues) -> Vec<ImportWarning> {
    let mut warnings = Vec::new();
    for category in MissingCategory::WARNING_ORDER {
        let key = category.message_key();
        for value in missing.get(category) {
            warnings.push(ImportWarning {
                row: 0,
                field: category.field().to_string(),
                message: t_with_args(
                    &format!("warnings.{}.message", key),
                    &[("value", value.as_str())],
                ),
                value: value.clone(),
                suggestion: Some(t(&format!("warnings.{}.suggestion", key))),
            });
        }
    }
    warnings
}

#[async_trait::async_trait]
impl SpreadsheetImporter for SpreadsheetImporterImpl {
    #[instrument(skip(self, file, options, existing_lists), fields(file = %file.file_name))]
    async fn import_interventions(
        &self,
        file: &ImportFile,
        options: &ImportOptions,
        existing_lists: Option<&ExistingLists>,
    ) -> ImportResult<InterventionImportRow> {
        let start_time = Instant::now();
        info!(bytes = file.content.len(), "开始导入工单表格");

        // === 步骤 1: 文件解析 ===
        let raw = match self.read_rows(file).await {
            Ok(raw) => raw,
            Err(e) => return file_failure(file, e),
        };
        debug!(raw_rows = raw.len(), "文件解析完成");

        // === 步骤 2-3: 过滤与截取 ===
        let rows = Self::prepare_rows(raw, options);

        // === 步骤 4: 规范化 + 校验 ===
        let ValidatedRows {
            rows: mut validated,
            mut errors,
            total,
        } = Self::validate_rows(
            &rows,
            options,
            |raw| normalize_object(Some(raw), &INTERVENTION_KEY_MAPPING),
            validate_intervention_row,
        );
        debug!(valid = validated.len(), errors = errors.len(), "行校验完成");

        // === 步骤 5: 缺失值检测 ===
        let mut warnings = Vec::new();
        let MissingValueReport {
            missing,
            suggestions,
        } = match existing_lists {
            Some(lists) => {
                let data: Vec<InterventionImportRow> =
                    validated.iter().map(|(_, row)| row.clone()).collect();
                let report = detect_missing_values(&data, lists);

                // 未知状态 → 硬错误，行被剔除
                let rejected: IndexSet<String> =
                    report.missing.statuses.iter().map(|s| normalize_status(s)).collect();
                validated.retain(|(row_number, row)| {
                    let reject = !row.statut.is_empty()
                        && rejected.contains(&normalize_status(&row.statut));
                    if reject {
                        warn!(row = *row_number, statut = %row.statut, "未知状态，行被拒绝");
                        errors.push(ImportError::field_error(
                            *row_number,
                            "statut",
                            t_with_args("errors.unknown_status", &[("value", row.statut.as_str())]),
                            Some(row.statut.clone()),
                        ));
                    }
                    !reject
                });

                // 其余类别 → 软警告
                warnings = build_warnings(&report.missing);
                report
            }
            None => MissingValueReport::default(),
        };

        // === 步骤 6: 汇总 ===
        let data: Vec<InterventionImportRow> = validated.into_iter().map(|(_, row)| row).collect();
        let stats = ImportStats {
            total,
            valid: data.len(),
            invalid: errors.len(),
        };

        info!(
            total = stats.total,
            valid = stats.valid,
            invalid = stats.invalid,
            warnings = warnings.len(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "工单导入完成"
        );

        ImportResult {
            success: errors.is_empty(),
            data,
            errors,
            warnings,
            missing_values: missing,
            match_suggestions: Some(suggestions),
            stats,
        }
    }

    #[instrument(skip(self, file, options), fields(file = %file.file_name))]
    async fn import_rooms(
        &self,
        file: &ImportFile,
        options: &ImportOptions,
    ) -> ImportResult<RoomImportRow> {
        info!(bytes = file.content.len(), "开始导入房间表格");

        let raw = match self.read_rows(file).await {
            Ok(raw) => raw,
            Err(e) => return file_failure(file, e),
        };

        let rows = Self::prepare_rows(raw, options);
        let ValidatedRows {
            rows: validated,
            errors,
            total,
        } = Self::validate_rows(
            &rows,
            options,
            |raw| normalize_object(Some(raw), &ROOM_KEY_MAPPING),
            validate_room_row,
        );

        let data: Vec<RoomImportRow> = validated.into_iter().map(|(_, row)| row).collect();
        let stats = ImportStats {
            total,
            valid: data.len(),
            invalid: errors.len(),
        };
        info!(total = stats.total, valid = stats.valid, invalid = stats.invalid, "房间导入完成");

        ImportResult {
            success: errors.is_empty(),
            data,
            errors,
            warnings: Vec::new(),
            missing_values: MissingListValues::default(),
            match_suggestions: None,
            stats,
        }
    }
}
